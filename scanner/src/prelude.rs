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
//! Useful re-exports for writing visitors.

pub use crate::kind::{ConstantKind, Kinds};
pub use crate::pool::{Constant, ConstantPool, MemberRef, NameAndType};
pub use crate::visitor::{
    ClassConstant, ConstantPoolVisitor, MemberRefConstant, NameAndTypeConstant, Pending, StringConstant,
};
pub use crate::{ConstantPoolScanner, Error, Result};
