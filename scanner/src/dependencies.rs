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

//! Dependency analysis on top of the constant pool scanner.
//!
//! A class depends on every class named by one of its class entries (its own name, the super
//! class, interfaces, owners of referenced members and class literals) and on every class that
//! appears in a field or method descriptor.

use std::collections::BTreeSet;
use std::io::Read;

use indexmap::IndexSet;
use nom::bytes::complete::{take_till, take_until};
use nom::character::complete::char;
use nom::multi::many0;
use nom::sequence::{delimited, preceded};
use nom::IResult;
use tracing::debug;

use crate::pool::ConstantPool;
use crate::visitor::{ClassConstant, ConstantPoolVisitor, NameAndTypeConstant};
use crate::{ConstantPoolScanner, Error, Result};

/// Examines the constant pool of a class file and looks for references to other classes.
///
/// Returns a sorted set of binary class names (e.g. `some.pkg.Outer$Inner`).
pub fn dependencies<R: Read>(source: &mut R) -> Result<BTreeSet<String>> {
    let mut collector = DependencyCollector::new();
    let cp = ConstantPoolScanner::new().parse(source, &mut collector)?;
    collector.finish(&cp)
}

/// Like [`dependencies`], for a class file held in memory.
pub fn dependencies_from_bytes(data: &[u8]) -> Result<BTreeSet<String>> {
    let mut collector = DependencyCollector::new();
    let cp = ConstantPoolScanner::new().parse_bytes(data, &mut collector)?;
    collector.finish(&cp)
}

/// A visitor recording the UTF-8 entries that name classes or hold descriptors.
///
/// Entries are recorded by index while the scan is running, their text is only looked at in
/// [`finish`](DependencyCollector::finish), once every placeholder has been filled.
#[derive(Debug, Default, Clone)]
pub struct DependencyCollector {
    class_names: IndexSet<u16>,
    descriptors: IndexSet<u16>,
}

impl DependencyCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indices of UTF-8 entries referenced by class entries, in the order they were found.
    pub fn class_names(&self) -> &IndexSet<u16> {
        &self.class_names
    }

    /// Indices of UTF-8 entries used as descriptors by name and type entries.
    pub fn descriptors(&self) -> &IndexSet<u16> {
        &self.descriptors
    }

    /// Turns the recorded entries into binary class names using the fully resolved pool.
    ///
    /// Fails without a partial result if any descriptor is malformed.
    pub fn finish(&self, cp: &ConstantPool) -> Result<BTreeSet<String>> {
        let mut result = BTreeSet::new();
        for &idx in &self.descriptors {
            result.extend(descriptor_classes(cp.utf8(idx)?)?);
        }
        for &idx in &self.class_names {
            if let Some(name) = binary_name(cp.utf8(idx)?)? {
                result.insert(name);
            }
        }
        debug!(
            classes = self.class_names.len(),
            descriptors = self.descriptors.len(),
            dependencies = result.len(),
            "dependencies extracted"
        );
        Ok(result)
    }
}

impl ConstantPoolVisitor for DependencyCollector {
    fn on_class(&mut self, _cp: &ConstantPool, class: ClassConstant) -> Result<()> {
        self.class_names.insert(class.name);
        Ok(())
    }

    fn on_name_and_type(&mut self, _cp: &ConstantPool, nt: NameAndTypeConstant) -> Result<()> {
        self.descriptors.insert(nt.descriptor);
        Ok(())
    }
}

/// Converts the name held by a class entry to a binary class name.
///
/// Class entries of array types hold a descriptor such as `[Ljava/lang/String;`, whose element
/// type is returned. `Ok(None)` is returned for arrays of primitives, and for any other name
/// that is a single character once the array markers are gone.
pub fn binary_name(internal: &str) -> Result<Option<String>> {
    let s = internal.trim_start_matches('[');
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (None, _) => return Err(Error::InvalidDescriptor(internal.to_owned())),
        // primitive
        (Some(_), None) => return Ok(None),
        _ => {}
    }
    let s = if s.len() >= 2 && s.starts_with('L') && s.ends_with(';') {
        &s[1..s.len() - 1]
    } else {
        s
    };
    Ok(Some(s.replace('/', ".")))
}

// 'L' ClassName ';', anything before the 'L' is skipped
fn object_type(i: &str) -> IResult<&str, &str> {
    preceded(
        take_till(|c: char| c == 'L'),
        delimited(char('L'), take_until(";"), char(';')),
    )(i)
}

/// Lists the binary names of all classes referred to by a field or method descriptor.
///
/// `(Ljava/lang/String;I)Ljava/util/List;` yields `java.lang.String` and `java.util.List`.
pub fn descriptor_classes(descriptor: &str) -> Result<Vec<String>> {
    let invalid = || Error::InvalidDescriptor(descriptor.to_owned());
    let (rest, names) = many0(object_type)(descriptor).map_err(|_| invalid())?;
    if rest.contains('L') {
        // an 'L' without its ';'
        return Err(invalid());
    }
    Ok(names.into_iter().map(|n| n.replace('/', ".")).collect())
}
