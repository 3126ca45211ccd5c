/*
 *     This file is part of cpscan.
 *
 *     cpscan is free software: you can redistribute it and/or modify
 *     it under the terms of the GNU Lesser General Public License as published by
 *     the Free Software Foundation, either version 3 of the License, or
 *     (at your option) any later version.
 *
 *     cpscan is distributed in the hope that it will be useful,
 *     but WITHOUT ANY WARRANTY; without even the implied warranty of
 *     MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *     GNU General Public License for more details.
 *
 *     You should have received a copy of the GNU Lesser General Public License
 *     along with cpscan. (LICENSE.md)  If not, see <https://www.gnu.org/licenses/>.
 */

//! Callbacks fired by the scanner for each decoded constant.
//!
//! Entries handed to a visitor may refer to indices the scanner has not reached yet. The
//! handles below are only indices, resolve them against the [`ConstantPool`] once the scan
//! has completed. Resolving them earlier returns [`Error::Unresolved`] for anything not yet
//! decoded.

use std::io::Read;

use crate::kind::{ConstantKind, Kinds};
use crate::pool::ConstantPool;
use crate::rw::ReadFrom;
use crate::{Error, Result};

/// A class entry found at `index`, naming the UTF-8 entry at `name`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct ClassConstant {
    pub index: u16,
    pub name: u16,
}

impl ClassConstant {
    /// The internal name of the class, such as `java/lang/String`.
    pub fn internal_name<'cp>(&self, cp: &'cp ConstantPool) -> Result<&'cp str> {
        cp.utf8(self.name)
    }
}

/// A name and type entry: the name of a field or method and its descriptor.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct NameAndTypeConstant {
    pub index: u16,
    pub name: u16,
    pub descriptor: u16,
}

impl NameAndTypeConstant {
    pub fn name<'cp>(&self, cp: &'cp ConstantPool) -> Result<&'cp str> {
        cp.utf8(self.name)
    }

    pub fn descriptor<'cp>(&self, cp: &'cp ConstantPool) -> Result<&'cp str> {
        cp.utf8(self.descriptor)
    }
}

/// A reference to a field, method or interface method of some class.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct MemberRefConstant {
    pub index: u16,
    pub kind: ConstantKind,
    pub class: u16,
    pub name_and_type: u16,
}

impl MemberRefConstant {
    /// The internal name of the class that declares the member.
    pub fn class_name<'cp>(&self, cp: &'cp ConstantPool) -> Result<&'cp str> {
        cp.class_name(self.class)
    }

    pub fn name<'cp>(&self, cp: &'cp ConstantPool) -> Result<&'cp str> {
        cp.utf8(cp.name_and_type(self.name_and_type)?.name)
    }

    pub fn descriptor<'cp>(&self, cp: &'cp ConstantPool) -> Result<&'cp str> {
        cp.utf8(cp.name_and_type(self.name_and_type)?.descriptor)
    }
}

/// A string literal at `index`, whose text is the UTF-8 entry at `utf8`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct StringConstant {
    pub index: u16,
    pub utf8: u16,
}

impl StringConstant {
    pub fn value<'cp>(&self, cp: &'cp ConstantPool) -> Result<&'cp str> {
        cp.utf8(self.utf8)
    }
}

enum State<T> {
    Pending,
    Failed,
    Read(T),
}

/// The not yet decoded payload of a numeric constant.
///
/// [`read`](Pending::read) may be called at most once. If it is never called, the scanner
/// skips the payload without decoding it.
pub struct Pending<'a, T> {
    reader: &'a mut dyn Read,
    state: State<T>,
}

impl<'a, T: ReadFrom + Copy> Pending<'a, T> {
    pub(crate) fn new(reader: &'a mut dyn Read) -> Self {
        Self {
            reader,
            state: State::Pending,
        }
    }

    /// Decodes the value. Fails with [`Error::AlreadyRead`] when called a second time.
    pub fn read(&mut self) -> Result<T> {
        match self.state {
            State::Pending => {
                self.state = State::Failed;
                let value = T::read_from(&mut *self.reader)?;
                self.state = State::Read(value);
                Ok(value)
            }
            State::Failed | State::Read(_) => Err(Error::AlreadyRead),
        }
    }

    /// Returns `true` once [`read`](Pending::read) has been called.
    pub fn is_read(&self) -> bool {
        !matches!(self.state, State::Pending)
    }

    /// `Ok(None)` if the payload is still in the stream, `Ok(Some(_))` if it was read.
    pub(crate) fn finish(self) -> Result<Option<T>> {
        match self.state {
            State::Pending => Ok(None),
            State::Read(v) => Ok(Some(v)),
            State::Failed => Err(Error::Truncated),
        }
    }
}

/// Receives callbacks for constants discovered in the class file.
///
/// Every method does nothing by default. Callbacks fire in ascending index order during the
/// single pass over the constant pool, and an error returned from any of them aborts the scan.
#[allow(unused_variables)]
pub trait ConstantPoolVisitor {
    /// A UTF-8 entry was decoded.
    fn on_utf8(&mut self, cp: &ConstantPool, index: u16, value: &str) -> Result<()> {
        Ok(())
    }

    /// A class entry was found. Its name may not be available until the scan is complete.
    fn on_class(&mut self, cp: &ConstantPool, class: ClassConstant) -> Result<()> {
        Ok(())
    }

    /// A name and type entry was found. Name and descriptor may not be available until the scan is complete.
    fn on_name_and_type(&mut self, cp: &ConstantPool, nt: NameAndTypeConstant) -> Result<()> {
        Ok(())
    }

    fn on_field_ref(&mut self, cp: &ConstantPool, member: MemberRefConstant) -> Result<()> {
        Ok(())
    }

    fn on_method_ref(&mut self, cp: &ConstantPool, member: MemberRefConstant) -> Result<()> {
        Ok(())
    }

    fn on_interface_method_ref(&mut self, cp: &ConstantPool, member: MemberRefConstant) -> Result<()> {
        Ok(())
    }

    /// A string literal was found. Its text may not be available until the scan is complete.
    fn on_string(&mut self, cp: &ConstantPool, string: StringConstant) -> Result<()> {
        Ok(())
    }

    /// An integer literal was found. Call [`Pending::read`] to obtain the value, otherwise it is skipped.
    fn on_integer(&mut self, index: u16, value: &mut Pending<'_, i32>) -> Result<()> {
        Ok(())
    }

    fn on_float(&mut self, index: u16, value: &mut Pending<'_, f32>) -> Result<()> {
        Ok(())
    }

    fn on_long(&mut self, index: u16, value: &mut Pending<'_, i64>) -> Result<()> {
        Ok(())
    }

    fn on_double(&mut self, index: u16, value: &mut Pending<'_, f64>) -> Result<()> {
        Ok(())
    }

    /// Wraps this visitor so that it only receives callbacks for `kinds` and the kinds they imply.
    fn filtered(self, kinds: Kinds) -> Filtered<Self>
    where
        Self: Sized,
    {
        Filtered {
            inner: self,
            kinds: kinds.implied(),
        }
    }
}

/// Scanning with the unit visitor only builds the [`ConstantPool`].
impl ConstantPoolVisitor for () {}

impl<V: ConstantPoolVisitor + ?Sized> ConstantPoolVisitor for &mut V {
    fn on_utf8(&mut self, cp: &ConstantPool, index: u16, value: &str) -> Result<()> {
        (**self).on_utf8(cp, index, value)
    }
    fn on_class(&mut self, cp: &ConstantPool, class: ClassConstant) -> Result<()> {
        (**self).on_class(cp, class)
    }
    fn on_name_and_type(&mut self, cp: &ConstantPool, nt: NameAndTypeConstant) -> Result<()> {
        (**self).on_name_and_type(cp, nt)
    }
    fn on_field_ref(&mut self, cp: &ConstantPool, member: MemberRefConstant) -> Result<()> {
        (**self).on_field_ref(cp, member)
    }
    fn on_method_ref(&mut self, cp: &ConstantPool, member: MemberRefConstant) -> Result<()> {
        (**self).on_method_ref(cp, member)
    }
    fn on_interface_method_ref(&mut self, cp: &ConstantPool, member: MemberRefConstant) -> Result<()> {
        (**self).on_interface_method_ref(cp, member)
    }
    fn on_string(&mut self, cp: &ConstantPool, string: StringConstant) -> Result<()> {
        (**self).on_string(cp, string)
    }
    fn on_integer(&mut self, index: u16, value: &mut Pending<'_, i32>) -> Result<()> {
        (**self).on_integer(index, value)
    }
    fn on_float(&mut self, index: u16, value: &mut Pending<'_, f32>) -> Result<()> {
        (**self).on_float(index, value)
    }
    fn on_long(&mut self, index: u16, value: &mut Pending<'_, i64>) -> Result<()> {
        (**self).on_long(index, value)
    }
    fn on_double(&mut self, index: u16, value: &mut Pending<'_, f64>) -> Result<()> {
        (**self).on_double(index, value)
    }
}

/// A visitor that forwards only the callbacks of selected kinds.
///
/// Created by [`ConstantPoolVisitor::filtered`]. Numeric constants of kinds that are filtered
/// out are never decoded.
#[derive(Debug, Clone)]
pub struct Filtered<V> {
    inner: V,
    kinds: Kinds,
}

impl<V> Filtered<V> {
    /// The kinds forwarded to the inner visitor, implied kinds included.
    pub fn kinds(&self) -> Kinds {
        self.kinds
    }

    pub fn into_inner(self) -> V {
        self.inner
    }
}

macro_rules! forward_if {
    ($self:ident, $kind:expr, $call:expr) => {
        if $self.kinds.has($kind) {
            $call
        } else {
            Ok(())
        }
    };
}

impl<V: ConstantPoolVisitor> ConstantPoolVisitor for Filtered<V> {
    fn on_utf8(&mut self, cp: &ConstantPool, index: u16, value: &str) -> Result<()> {
        forward_if!(self, ConstantKind::Utf8, self.inner.on_utf8(cp, index, value))
    }
    fn on_class(&mut self, cp: &ConstantPool, class: ClassConstant) -> Result<()> {
        forward_if!(self, ConstantKind::Class, self.inner.on_class(cp, class))
    }
    fn on_name_and_type(&mut self, cp: &ConstantPool, nt: NameAndTypeConstant) -> Result<()> {
        forward_if!(self, ConstantKind::NameAndType, self.inner.on_name_and_type(cp, nt))
    }
    fn on_field_ref(&mut self, cp: &ConstantPool, member: MemberRefConstant) -> Result<()> {
        forward_if!(self, ConstantKind::FieldRef, self.inner.on_field_ref(cp, member))
    }
    fn on_method_ref(&mut self, cp: &ConstantPool, member: MemberRefConstant) -> Result<()> {
        forward_if!(self, ConstantKind::MethodRef, self.inner.on_method_ref(cp, member))
    }
    fn on_interface_method_ref(&mut self, cp: &ConstantPool, member: MemberRefConstant) -> Result<()> {
        forward_if!(self, ConstantKind::InterfaceMethodRef, self.inner.on_interface_method_ref(cp, member))
    }
    fn on_string(&mut self, cp: &ConstantPool, string: StringConstant) -> Result<()> {
        forward_if!(self, ConstantKind::String, self.inner.on_string(cp, string))
    }
    fn on_integer(&mut self, index: u16, value: &mut Pending<'_, i32>) -> Result<()> {
        forward_if!(self, ConstantKind::Integer, self.inner.on_integer(index, value))
    }
    fn on_float(&mut self, index: u16, value: &mut Pending<'_, f32>) -> Result<()> {
        forward_if!(self, ConstantKind::Float, self.inner.on_float(index, value))
    }
    fn on_long(&mut self, index: u16, value: &mut Pending<'_, i64>) -> Result<()> {
        forward_if!(self, ConstantKind::Long, self.inner.on_long(index, value))
    }
    fn on_double(&mut self, index: u16, value: &mut Pending<'_, f64>) -> Result<()> {
        forward_if!(self, ConstantKind::Double, self.inner.on_double(index, value))
    }
}
