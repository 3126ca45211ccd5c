/*
    This file is part of cpscan.

    cpscan is free software: you can redistribute it and/or modify
    it under the terms of the GNU Lesser General Public License as published by
    the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    cpscan is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU General Public License for more details.

    You should have received a copy of the GNU Lesser General Public License
    along with cpscan. (LICENSE.md)  If not, see <https://www.gnu.org/licenses/>.
*/
use std::io::{Cursor, Read};

use tracing::{debug, trace};

use crate::kind::ConstantKind;
use crate::pool::{Constant, ConstantPool, MemberRef, NameAndType};
use crate::rw::{self, ReadFrom};
use crate::visitor::{ClassConstant, ConstantPoolVisitor, MemberRefConstant, NameAndTypeConstant, Pending, StringConstant};
use crate::{mod_utf8, Error, Result};

/// magic, minor_version, major_version
const HEADER_SIZE: u64 = 8;

/// Streaming parser of the constant pool in a Java class file.
///
/// The constant pool is read in a single forward pass. Every entry is reported to a
/// [`ConstantPoolVisitor`] as soon as its tag has been decoded, and references to entries
/// further down the pool are recorded as placeholders that are filled in once the scanner
/// reaches them. Nothing after the constant pool is read.
///
/// This might be used for dependency analysis, class loader optimizations, etc.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConstantPoolScanner;

impl ConstantPoolScanner {
    #[inline]
    pub const fn new() -> Self {
        ConstantPoolScanner
    }

    /// Parses a class file held in memory.
    pub fn parse_bytes<V: ConstantPoolVisitor>(&self, data: &[u8], visitor: V) -> Result<ConstantPool> {
        self.parse(&mut Cursor::new(data), visitor)
    }

    /// Parses a class file and invokes the visitor with constants.
    ///
    /// Returns the fully resolved constant pool. On error the partially decoded pool is dropped.
    pub fn parse<R: Read, V: ConstantPoolVisitor>(&self, source: &mut R, mut visitor: V) -> Result<ConstantPool> {
        rw::skip(source, HEADER_SIZE)?;
        let count: u16 = rw::read(source)?;
        let mut cp = ConstantPool::with_count(count);

        let mut i: u16 = 1;
        while i < count {
            let tag: u8 = rw::read(source)?;
            let kind = ConstantKind::from_tag(tag).ok_or(Error::UnrecognizedTag { index: i, tag })?;
            trace!(index = i, kind = kind.name(), "constant pool entry");
            match kind {
                ConstantKind::Utf8 => {
                    let bytes = rw::read_length_prefixed(source)?;
                    let value = mod_utf8::modified_utf8_to_string(&bytes)
                        .map_err(|source| Error::Utf8 { index: i, source })?;
                    cp.define(i, Constant::Utf8(Some(value)))?;
                    visitor.on_utf8(&cp, i, cp.utf8(i)?)?;
                }
                ConstantKind::Class => {
                    let name = cp.reference(rw::read(source)?, i, ConstantKind::Utf8)?;
                    cp.define(i, Constant::Class(Some(name)))?;
                    visitor.on_class(&cp, ClassConstant { index: i, name })?;
                }
                ConstantKind::NameAndType => {
                    let name = cp.reference(rw::read(source)?, i, ConstantKind::Utf8)?;
                    let descriptor = cp.reference(rw::read(source)?, i, ConstantKind::Utf8)?;
                    cp.define(i, Constant::NameAndType(Some(NameAndType { name, descriptor })))?;
                    visitor.on_name_and_type(&cp, NameAndTypeConstant { index: i, name, descriptor })?;
                }
                ConstantKind::FieldRef | ConstantKind::MethodRef | ConstantKind::InterfaceMethodRef => {
                    let class = cp.reference(rw::read(source)?, i, ConstantKind::Class)?;
                    let name_and_type = cp.reference(rw::read(source)?, i, ConstantKind::NameAndType)?;
                    let member = MemberRef { class, name_and_type };
                    let handle = MemberRefConstant { index: i, kind, class, name_and_type };
                    match kind {
                        ConstantKind::FieldRef => {
                            cp.define(i, Constant::FieldRef(member))?;
                            visitor.on_field_ref(&cp, handle)?;
                        }
                        ConstantKind::MethodRef => {
                            cp.define(i, Constant::MethodRef(member))?;
                            visitor.on_method_ref(&cp, handle)?;
                        }
                        _ => {
                            cp.define(i, Constant::InterfaceMethodRef(member))?;
                            visitor.on_interface_method_ref(&cp, handle)?;
                        }
                    }
                }
                ConstantKind::String => {
                    // only the referenced UTF-8 entry is materialized
                    let utf8 = cp.reference(rw::read(source)?, i, ConstantKind::Utf8)?;
                    visitor.on_string(&cp, StringConstant { index: i, utf8 })?;
                }
                ConstantKind::Integer => {
                    let value = numeric(source, kind, |p| visitor.on_integer(i, p))?;
                    cp.define(i, Constant::Integer(value))?;
                }
                ConstantKind::Float => {
                    let value = numeric(source, kind, |p| visitor.on_float(i, p))?;
                    cp.define(i, Constant::Float(value))?;
                }
                ConstantKind::Long => {
                    cp.mark_wide(i)?;
                    let value = numeric(source, kind, |p| visitor.on_long(i, p))?;
                    cp.define(i, Constant::Long(value))?;
                }
                ConstantKind::Double => {
                    cp.mark_wide(i)?;
                    let value = numeric(source, kind, |p| visitor.on_double(i, p))?;
                    cp.define(i, Constant::Double(value))?;
                }
            }
            i += if kind.is_wide() { 2 } else { 1 };
        }
        cp.check_resolved()?;
        debug!(count, "constant pool scanned");
        Ok(cp)
    }
}

/// Hands the payload of a numeric entry to `f` and skips it if `f` did not read it.
fn numeric<R, T, F>(source: &mut R, kind: ConstantKind, f: F) -> Result<Option<T>>
where
    R: Read,
    T: ReadFrom + Copy,
    F: FnOnce(&mut Pending<'_, T>) -> Result<()>,
{
    let mut pending = Pending::new(&mut *source);
    f(&mut pending)?;
    let value = pending.finish()?;
    if value.is_none() {
        rw::skip(source, kind.numeric_size())?;
    }
    Ok(value)
}
