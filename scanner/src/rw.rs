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

//! Big-endian reads from a byte source.

use std::io::{self, Read};

use crate::Result;

/// Types that can be read from the class file without any contextual information.
///
/// All fixed-width integers and floats implement `ReadFrom`, decoded as big-endian.
pub trait ReadFrom: Sized {
    fn read_from<R: Read + ?Sized>(reader: &mut R) -> Result<Self>;
}

macro_rules! impl_read_nums {
    ($(($i:ty, $s:literal)),*) => {
        $(
            impl ReadFrom for $i {
                #[inline]
                fn read_from<R: Read + ?Sized>(reader: &mut R) -> Result<Self> {
                    let mut bytes = [0u8; $s];
                    reader.read_exact(&mut bytes)?;
                    Ok(<$i>::from_be_bytes(bytes))
                }
            }
        )*
    };
}

impl_read_nums! { (u8, 1), (i8, 1), (u16, 2), (i16, 2), (u32, 4), (i32, 4), (f32, 4), (u64, 8), (i64, 8), (f64, 8) }

/// Reads a value with the type inferred from the call site.
#[inline]
pub fn read<T: ReadFrom, R: Read + ?Sized>(reader: &mut R) -> Result<T> {
    T::read_from(reader)
}

/// Consumes exactly `n` bytes, failing with [`Error::Truncated`](crate::Error::Truncated)
/// if the source ends first.
pub fn skip<R: Read + ?Sized>(reader: &mut R, n: u64) -> Result<()> {
    let copied = io::copy(&mut Read::take(&mut *reader, n), &mut io::sink())?;
    if copied < n {
        return Err(crate::Error::Truncated);
    }
    Ok(())
}

/// Reads a `u2` length followed by that many bytes.
pub fn read_length_prefixed<R: Read + ?Sized>(reader: &mut R) -> Result<Vec<u8>> {
    let length: u16 = read(reader)?;
    let mut buf = vec![0; length as usize];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}
