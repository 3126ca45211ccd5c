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

//! The constant slot table filled in by the scanner.
//!
//! Slots are addressed by their constant pool index. A slot referenced before its own entry
//! is decoded becomes an empty placeholder of the kind the reference requires, and is filled
//! in place once the scanner reaches it. Cross references are plain indices into the table,
//! so two references to the same index always see the same slot.

use crate::kind::ConstantKind;
use crate::{Error, Result};

/// A name and type pair, as indices to UTF-8 entries.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct NameAndType {
    pub name: u16,
    pub descriptor: u16,
}

/// A field or method reference, as indices to a class entry and a name and type entry.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct MemberRef {
    pub class: u16,
    pub name_and_type: u16,
}

/// A slot of the constant pool.
///
/// `None` payloads mark placeholders (for UTF-8, class and name and type entries) or
/// numeric values that were skipped instead of being read.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    /// Never referenced nor defined. String entries leave their own slot vacant as well.
    Vacant,
    /// The unusable index following a Long or Double.
    Wide,
    Utf8(Option<String>),
    Class(Option<u16>),
    NameAndType(Option<NameAndType>),
    FieldRef(MemberRef),
    MethodRef(MemberRef),
    InterfaceMethodRef(MemberRef),
    Integer(Option<i32>),
    Float(Option<f32>),
    Long(Option<i64>),
    Double(Option<f64>),
}

impl Constant {
    /// The kind of this slot, `None` for vacant and wide slots.
    pub fn kind(&self) -> Option<ConstantKind> {
        Some(match self {
            Constant::Vacant | Constant::Wide => return None,
            Constant::Utf8(_) => ConstantKind::Utf8,
            Constant::Class(_) => ConstantKind::Class,
            Constant::NameAndType(_) => ConstantKind::NameAndType,
            Constant::FieldRef(_) => ConstantKind::FieldRef,
            Constant::MethodRef(_) => ConstantKind::MethodRef,
            Constant::InterfaceMethodRef(_) => ConstantKind::InterfaceMethodRef,
            Constant::Integer(_) => ConstantKind::Integer,
            Constant::Float(_) => ConstantKind::Float,
            Constant::Long(_) => ConstantKind::Long,
            Constant::Double(_) => ConstantKind::Double,
        })
    }

    /// Returns `true` for a placeholder that has been referenced but not yet decoded.
    pub fn is_placeholder(&self) -> bool {
        matches!(
            self,
            Constant::Utf8(None) | Constant::Class(None) | Constant::NameAndType(None)
        )
    }

    fn placeholder(kind: ConstantKind) -> Constant {
        match kind {
            ConstantKind::Utf8 => Constant::Utf8(None),
            ConstantKind::Class => Constant::Class(None),
            ConstantKind::NameAndType => Constant::NameAndType(None),
            _ => unreachable!("{} entries are never referenced by index", kind),
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Constant::Vacant => "nothing",
            Constant::Wide => "the second half of a Long/Double",
            _ => self.kind().map_or("nothing", ConstantKind::name),
        }
    }
}

/// A constant pool as decoded by the [scanner](crate::ConstantPoolScanner).
///
/// During a scan this is the table decoded so far, and placeholders may still be empty.
/// The table returned by a successful scan is fully resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantPool {
    slots: Vec<Constant>,
}

impl ConstantPool {
    /// Creates an empty table for a `constant_pool_count` of `count`.
    pub(crate) fn with_count(count: u16) -> Self {
        Self {
            slots: vec![Constant::Vacant; count.max(1) as usize],
        }
    }

    /// The declared `constant_pool_count`. Valid indices are `1..len()`.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the pool holds no valid index.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.len() <= 1
    }

    /// Gets a slot. Returns `None` for index 0 and for indices past the end.
    pub fn get(&self, index: u16) -> Option<&Constant> {
        match index {
            0 => None,
            i => self.slots.get(i as usize),
        }
    }

    /// Iterates over all slots that hold an entry or a placeholder, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &Constant)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, c)| !matches!(c, Constant::Vacant | Constant::Wide))
            .map(|(i, c)| (i as u16, c))
    }

    /// Iterates over the slots of one kind.
    pub fn iter_kind(&self, kind: ConstantKind) -> impl Iterator<Item = (u16, &Constant)> + '_ {
        self.iter().filter(move |(_, c)| c.kind() == Some(kind))
    }

    /// Reads the text of a UTF-8 entry.
    pub fn utf8(&self, index: u16) -> Result<&str> {
        match self.slot(index, 0)? {
            Constant::Utf8(Some(s)) => Ok(s),
            Constant::Utf8(None) => Err(Error::Unresolved { index }),
            c => Err(mismatch(index, ConstantKind::Utf8, c)),
        }
    }

    /// Reads the index of the UTF-8 entry holding a class's internal name.
    pub fn class(&self, index: u16) -> Result<u16> {
        match self.slot(index, 0)? {
            Constant::Class(Some(name)) => Ok(*name),
            Constant::Class(None) => Err(Error::Unresolved { index }),
            c => Err(mismatch(index, ConstantKind::Class, c)),
        }
    }

    /// Reads the internal name (such as `java/lang/Object`) of a class entry.
    pub fn class_name(&self, index: u16) -> Result<&str> {
        self.utf8(self.class(index)?)
    }

    pub fn name_and_type(&self, index: u16) -> Result<NameAndType> {
        match self.slot(index, 0)? {
            Constant::NameAndType(Some(nt)) => Ok(*nt),
            Constant::NameAndType(None) => Err(Error::Unresolved { index }),
            c => Err(mismatch(index, ConstantKind::NameAndType, c)),
        }
    }

    /// Reads a field, method or interface method reference.
    pub fn member_ref(&self, index: u16) -> Result<MemberRef> {
        match self.slot(index, 0)? {
            Constant::FieldRef(m) | Constant::MethodRef(m) | Constant::InterfaceMethodRef(m) => Ok(*m),
            Constant::Vacant => Err(Error::Unresolved { index }),
            c => Err(mismatch(index, ConstantKind::MethodRef, c)),
        }
    }

    fn slot(&self, index: u16, referrer: u16) -> Result<&Constant> {
        self.get(index).ok_or(Error::InvalidIndex { index, referrer })
    }

    /// Fetches the slot at `index` for a reference from `referrer`, creating a placeholder
    /// of `kind` if nothing is there yet.
    pub(crate) fn reference(&mut self, index: u16, referrer: u16, kind: ConstantKind) -> Result<u16> {
        let slot = self.slot_mut(index, referrer)?;
        if matches!(slot, Constant::Vacant) {
            *slot = Constant::placeholder(kind);
        } else if slot.kind() != Some(kind) {
            return Err(mismatch(index, kind, slot));
        }
        Ok(index)
    }

    /// Fills the slot at `index` with its decoded entry.
    ///
    /// The slot must either be vacant or hold a placeholder of the same kind.
    pub(crate) fn define(&mut self, index: u16, value: Constant) -> Result<()> {
        let slot = self.slot_mut(index, index)?;
        let fits = matches!(slot, Constant::Vacant)
            || (slot.is_placeholder() && slot.kind() == value.kind());
        if !fits {
            // the entry itself is fine, whatever referenced this index expected something else
            return Err(Error::KindMismatch {
                index,
                expected: slot.describe(),
                found: value.describe(),
            });
        }
        *slot = value;
        Ok(())
    }

    /// Marks the index after a Long or Double at `index` as unusable.
    pub(crate) fn mark_wide(&mut self, index: u16) -> Result<()> {
        let next = index
            .checked_add(1)
            .filter(|&n| (n as usize) < self.slots.len())
            .ok_or(Error::InvalidIndex { index: index.wrapping_add(1), referrer: index })?;
        let slot = &mut self.slots[next as usize];
        if !matches!(slot, Constant::Vacant) {
            return Err(Error::KindMismatch {
                index: next,
                expected: slot.describe(),
                found: Constant::Wide.describe(),
            });
        }
        *slot = Constant::Wide;
        Ok(())
    }

    /// Fails if a placeholder was never filled.
    ///
    /// Every index is either defined, wide, or left vacant by a String entry, and wide slots
    /// cannot be referenced. A placeholder left over after the pass therefore sits on the
    /// index of a String.
    pub(crate) fn check_resolved(&self) -> Result<()> {
        match self.iter().find(|(_, c)| c.is_placeholder()) {
            Some((index, c)) => Err(Error::KindMismatch {
                index,
                expected: c.describe(),
                found: ConstantKind::String.name(),
            }),
            None => Ok(()),
        }
    }

    fn slot_mut(&mut self, index: u16, referrer: u16) -> Result<&mut Constant> {
        match index {
            0 => None,
            i => self.slots.get_mut(i as usize),
        }
        .ok_or(Error::InvalidIndex { index, referrer })
    }
}

fn mismatch(index: u16, expected: ConstantKind, found: &Constant) -> Error {
    Error::KindMismatch {
        index,
        expected: expected.name(),
        found: found.describe(),
    }
}
