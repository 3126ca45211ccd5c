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
use crate::kind::{ConstantKind, Kinds};

#[test]
fn tags_round_trip() {
    for kind in ConstantKind::ALL.iter() {
        assert_eq!(ConstantKind::from_tag(kind.tag()), Some(*kind));
    }
    assert_eq!(ConstantKind::from_tag(9), Some(ConstantKind::FieldRef));
    assert_eq!(ConstantKind::InterfaceMethodRef.tag(), 11);
}

#[test]
fn later_revision_tags_are_unknown() {
    for tag in [0u8, 2, 13, 14, 15, 16, 17, 18, 19, 20, 255].iter() {
        assert_eq!(ConstantKind::from_tag(*tag), None, "tag {}", tag);
    }
}

#[test]
fn wide_kinds() {
    assert!(ConstantKind::Long.is_wide());
    assert!(ConstantKind::Double.is_wide());
    assert!(!ConstantKind::Integer.is_wide());
    assert_eq!(ConstantKind::Double.numeric_size(), 8);
    assert_eq!(ConstantKind::Float.numeric_size(), 4);
    assert_eq!(ConstantKind::Class.numeric_size(), 0);
}

#[test]
fn implied_kinds_are_transitive() {
    let kinds = Kinds::FIELD_REF.implied();
    assert_eq!(kinds, Kinds::FIELD_REF | Kinds::CLASS | Kinds::NAME_AND_TYPE | Kinds::UTF8);

    assert_eq!(Kinds::CLASS.implied(), Kinds::CLASS | Kinds::UTF8);
    assert_eq!(Kinds::STRING.implied(), Kinds::STRING | Kinds::UTF8);
    let numeric = Kinds::INTEGER | Kinds::FLOAT | Kinds::LONG | Kinds::DOUBLE;
    assert_eq!(numeric.implied(), numeric);
    assert_eq!(Kinds::empty().implied(), Kinds::empty());
    assert!(Kinds::INTERFACE_METHOD_REF.implied().has(ConstantKind::Utf8));
}
