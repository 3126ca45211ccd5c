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

mod kind;
mod mutf8;

use crate::mod_utf8::string_to_modified_utf8;
use lazy_static::lazy_static;

/// Writes a class file header followed by a constant pool, one entry at a time.
///
/// Every insert returns the index of the new entry. References are written as given, so
/// forward references can be built by passing indices that are inserted later.
pub(crate) struct PoolWriter {
    entries: Vec<u8>,
    /// The index of the next entry.
    len: u16,
}

impl PoolWriter {
    pub fn new() -> Self {
        Self {
            entries: vec![],
            len: 1,
        }
    }

    pub fn insert_raw(&mut self, tag: u8, payload: &[u8]) -> u16 {
        let idx = self.len;
        self.entries.push(tag);
        self.entries.extend_from_slice(payload);
        self.len += if tag == 5 || tag == 6 { 2 } else { 1 };
        idx
    }

    pub fn utf8(&mut self, st: &str) -> u16 {
        let bytes = string_to_modified_utf8(st);
        let mut payload = (bytes.len() as u16).to_be_bytes().to_vec();
        payload.extend(bytes);
        self.insert_raw(1, &payload)
    }

    pub fn class_ref(&mut self, name: u16) -> u16 {
        self.insert_raw(7, &name.to_be_bytes())
    }

    pub fn class(&mut self, name: &str) -> u16 {
        let name = self.utf8(name);
        self.class_ref(name)
    }

    pub fn string_ref(&mut self, utf8: u16) -> u16 {
        self.insert_raw(8, &utf8.to_be_bytes())
    }

    pub fn name_and_type_ref(&mut self, name: u16, descriptor: u16) -> u16 {
        let mut payload = name.to_be_bytes().to_vec();
        payload.extend_from_slice(&descriptor.to_be_bytes());
        self.insert_raw(12, &payload)
    }

    pub fn name_and_type(&mut self, name: &str, descriptor: &str) -> u16 {
        let a = self.utf8(name);
        let b = self.utf8(descriptor);
        self.name_and_type_ref(a, b)
    }

    pub fn member_ref(&mut self, tag: u8, class: u16, name_and_type: u16) -> u16 {
        let mut payload = class.to_be_bytes().to_vec();
        payload.extend_from_slice(&name_and_type.to_be_bytes());
        self.insert_raw(tag, &payload)
    }

    pub fn int(&mut self, i: i32) -> u16 {
        self.insert_raw(3, &i.to_be_bytes())
    }

    pub fn float(&mut self, f: f32) -> u16 {
        self.insert_raw(4, &f.to_be_bytes())
    }

    pub fn long(&mut self, l: i64) -> u16 {
        self.insert_raw(5, &l.to_be_bytes())
    }

    pub fn double(&mut self, d: f64) -> u16 {
        self.insert_raw(6, &d.to_be_bytes())
    }

    /// The `constant_pool_count` for the entries written so far.
    pub fn count(&self) -> u16 {
        self.len
    }

    /// The class file bytes with the pool count taken from the entries written.
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes_with_count(self.len)
    }

    pub fn bytes_with_count(&self, count: u16) -> Vec<u8> {
        let mut buf = vec![0xCA, 0xFE, 0xBA, 0xBE, 0, 0, 0, 52];
        buf.extend_from_slice(&count.to_be_bytes());
        buf.extend_from_slice(&self.entries);
        // access_flags, this_class, super_class and empty tables, never read by the scanner
        buf.extend_from_slice(&[0, 0x21, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        buf
    }
}

/// The constant pool javac emits (give or take attributes) for
///
/// ```java
/// package demo;
///
/// public class D {
///     A a = new A();
///     C c;
///     String s = "hello";
///     B m() { return null; }
/// }
/// ```
///
/// with the constructor also calling `m()` and storing to `c`.
pub(crate) fn sample_d() -> Vec<u8> {
    let mut w = PoolWriter::new();
    assert_eq!(w.member_ref(10, 2, 3), 1);
    assert_eq!(w.class_ref(4), 2);
    assert_eq!(w.name_and_type_ref(5, 6), 3);
    w.utf8("java/lang/Object");
    w.utf8("<init>");
    w.utf8("()V");
    assert_eq!(w.member_ref(9, 8, 9), 7);
    assert_eq!(w.class_ref(10), 8);
    assert_eq!(w.name_and_type_ref(11, 12), 9);
    w.utf8("demo/D");
    w.utf8("a");
    w.utf8("LA;");
    assert_eq!(w.member_ref(9, 8, 14), 13);
    assert_eq!(w.name_and_type_ref(15, 16), 14);
    w.utf8("c");
    w.utf8("LC;");
    assert_eq!(w.string_ref(18), 17);
    w.utf8("hello");
    assert_eq!(w.member_ref(9, 8, 20), 19);
    assert_eq!(w.name_and_type_ref(21, 22), 20);
    w.utf8("s");
    w.utf8("Ljava/lang/String;");
    assert_eq!(w.member_ref(10, 8, 24), 23);
    assert_eq!(w.name_and_type_ref(25, 26), 24);
    w.utf8("m");
    w.utf8("()LB;");
    w.utf8("Code");
    assert_eq!(w.long(42), 28);
    assert_eq!(w.utf8("SourceFile"), 30);
    w.bytes()
}

/// `public class B extends A {}` in package `demo`.
pub(crate) fn sample_b() -> Vec<u8> {
    let mut w = PoolWriter::new();
    w.member_ref(10, 2, 3);
    w.class_ref(4);
    w.name_and_type_ref(5, 6);
    w.utf8("demo/A");
    w.utf8("<init>");
    w.utf8("()V");
    w.class("demo/B");
    w.utf8("Code");
    w.bytes()
}

/// Classes compiled by `javac --release 8` from the sources next to them in `classes/demo`.
pub(crate) mod compiled {
    pub const A: &[u8] = include_bytes!("classes/demo/A.class");
    pub const B: &[u8] = include_bytes!("classes/demo/B.class");
    pub const C: &[u8] = include_bytes!("classes/demo/C.class");
    pub const D: &[u8] = include_bytes!("classes/demo/D.class");
}

lazy_static! {
    pub(crate) static ref SAMPLE_D: Vec<u8> = sample_d();
    pub(crate) static ref SAMPLE_B: Vec<u8> = sample_b();
}
