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
//! A streaming scanner for the constant pool of Java class files.
//!
//! The constant pool is read in one forward pass without loading the rest of the class. The
//! [`ConstantPoolScanner`] reports each entry to a [`ConstantPoolVisitor`] and returns the
//! resolved [`ConstantPool`]; [`dependencies`] builds on it to list the classes a class file
//! refers to.
//!
//! ```no_run
//! # fn main() -> cpscan::Result<()> {
//! let mut file = std::fs::File::open("Foo.class")?;
//! for class in cpscan::dependencies(&mut file)? {
//!     println!("{}", class);
//! }
//! # Ok(())
//! # }
//! ```

#[macro_use]
extern crate bitflags;

pub mod dependencies;
pub mod error;
pub mod kind;
pub mod mod_utf8;
pub mod pool;
pub mod prelude;
pub mod rw;
pub mod scanner;
pub mod visitor;

#[cfg(test)]
mod tests;

pub use crate::dependencies::{dependencies, dependencies_from_bytes, DependencyCollector};
pub use crate::error::{Error, Result};
pub use crate::kind::{ConstantKind, Kinds};
pub use crate::pool::{Constant, ConstantPool};
pub use crate::scanner::ConstantPoolScanner;
pub use crate::visitor::ConstantPoolVisitor;
