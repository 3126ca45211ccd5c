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
//! Kinds of constant pool entries understood by the scanner.

use std::fmt::{Display, Formatter};

/// The kind of a constant pool entry, discriminated by its tag byte.
///
/// Entries added by later revisions of the class file format (method handles,
/// method types, dynamic constants, modules and packages) are not represented here,
/// and tags for them are rejected by the scanner.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum ConstantKind {
    Utf8 = 1,
    Integer = 3,
    Float = 4,
    Long = 5,
    Double = 6,
    Class = 7,
    String = 8,
    FieldRef = 9,
    MethodRef = 10,
    InterfaceMethodRef = 11,
    NameAndType = 12,
}

impl ConstantKind {
    pub const ALL: [ConstantKind; 11] = [
        ConstantKind::Utf8,
        ConstantKind::Integer,
        ConstantKind::Float,
        ConstantKind::Long,
        ConstantKind::Double,
        ConstantKind::Class,
        ConstantKind::String,
        ConstantKind::FieldRef,
        ConstantKind::MethodRef,
        ConstantKind::InterfaceMethodRef,
        ConstantKind::NameAndType,
    ];

    /// The tag byte identifying this kind in a class file.
    #[inline]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Looks up the kind for a tag byte.
    pub const fn from_tag(tag: u8) -> Option<ConstantKind> {
        Some(match tag {
            1 => ConstantKind::Utf8,
            3 => ConstantKind::Integer,
            4 => ConstantKind::Float,
            5 => ConstantKind::Long,
            6 => ConstantKind::Double,
            7 => ConstantKind::Class,
            8 => ConstantKind::String,
            9 => ConstantKind::FieldRef,
            10 => ConstantKind::MethodRef,
            11 => ConstantKind::InterfaceMethodRef,
            12 => ConstantKind::NameAndType,
            _ => return None,
        })
    }

    /// Returns `true` for Long/Double, which take up two indices.
    #[inline]
    pub const fn is_wide(self) -> bool {
        matches!(self, ConstantKind::Long | ConstantKind::Double)
    }

    /// Size in bytes of the payload of a numeric kind, 0 for everything else.
    #[inline]
    pub const fn numeric_size(self) -> u64 {
        match self {
            ConstantKind::Integer | ConstantKind::Float => 4,
            ConstantKind::Long | ConstantKind::Double => 8,
            _ => 0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ConstantKind::Utf8 => "Utf8",
            ConstantKind::Integer => "Integer",
            ConstantKind::Float => "Float",
            ConstantKind::Long => "Long",
            ConstantKind::Double => "Double",
            ConstantKind::Class => "Class",
            ConstantKind::String => "String",
            ConstantKind::FieldRef => "Fieldref",
            ConstantKind::MethodRef => "Methodref",
            ConstantKind::InterfaceMethodRef => "InterfaceMethodref",
            ConstantKind::NameAndType => "NameAndType",
        }
    }

    /// The flag corresponding to this kind.
    pub const fn flag(self) -> Kinds {
        match self {
            ConstantKind::Utf8 => Kinds::UTF8,
            ConstantKind::Integer => Kinds::INTEGER,
            ConstantKind::Float => Kinds::FLOAT,
            ConstantKind::Long => Kinds::LONG,
            ConstantKind::Double => Kinds::DOUBLE,
            ConstantKind::Class => Kinds::CLASS,
            ConstantKind::String => Kinds::STRING,
            ConstantKind::FieldRef => Kinds::FIELD_REF,
            ConstantKind::MethodRef => Kinds::METHOD_REF,
            ConstantKind::InterfaceMethodRef => Kinds::INTERFACE_METHOD_REF,
            ConstantKind::NameAndType => Kinds::NAME_AND_TYPE,
        }
    }

    /// The kinds that have to be collected as well to make sense of this kind.
    ///
    /// The relation is transitive: a field reference implies its class, which implies a UTF-8 entry.
    pub const fn implies(self) -> Kinds {
        match self {
            ConstantKind::Class | ConstantKind::String | ConstantKind::NameAndType => Kinds::UTF8,
            ConstantKind::FieldRef | ConstantKind::MethodRef | ConstantKind::InterfaceMethodRef => {
                Kinds::from_bits_truncate(
                    Kinds::CLASS.bits() | Kinds::NAME_AND_TYPE.bits() | Kinds::UTF8.bits(),
                )
            }
            _ => Kinds::empty(),
        }
    }
}

impl Display for ConstantKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// A set of [`ConstantKind`]s.
    pub struct Kinds: u16 {
        // @formatter:off
        const UTF8                 = 1 << 1;
        const INTEGER              = 1 << 3;
        const FLOAT                = 1 << 4;
        const LONG                 = 1 << 5;
        const DOUBLE               = 1 << 6;
        const CLASS                = 1 << 7;
        const STRING               = 1 << 8;
        const FIELD_REF            = 1 << 9;
        const METHOD_REF           = 1 << 10;
        const INTERFACE_METHOD_REF = 1 << 11;
        const NAME_AND_TYPE        = 1 << 12;
        // @formatter:on
    }
}

impl Kinds {
    /// Expands this set with every kind it transitively implies.
    pub fn implied(self) -> Kinds {
        let mut set = self;
        loop {
            let next = ConstantKind::ALL
                .iter()
                .filter(|k| set.contains(k.flag()))
                .fold(set, |acc, k| acc | k.implies());
            if next == set {
                return set;
            }
            set = next;
        }
    }

    /// Returns `true` if `kind` is part of this set.
    #[inline]
    pub fn has(self, kind: ConstantKind) -> bool {
        self.contains(kind.flag())
    }
}

impl From<ConstantKind> for Kinds {
    fn from(kind: ConstantKind) -> Self {
        kind.flag()
    }
}
