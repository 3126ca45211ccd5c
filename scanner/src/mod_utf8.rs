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

//! Conversion between Java's Modified UTF-8 and Rust strings.
//!
//! Modified UTF-8 differs from UTF-8 in two ways: the NUL character is written as the
//! two byte sequence `C0 80`, and characters outside the Basic Multilingual Plane are
//! written as a surrogate pair, each half encoded on its own in three bytes.
//!
//! Refer to the [JVM Spec](https://docs.oracle.com/javase/specs/jvms/se16/html/jvms-4.html#jvms-4.4.7) for more info.

use thiserror::Error;

/// An error encountered during conversion.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum MUTFError {
    /// A multi-byte sequence was cut off by the end of the buffer.
    #[error("Malformed Input: Partial character at end")]
    PartialCharacterAtEnd,

    /// The byte at this offset cannot start or continue a character.
    #[error("Malformed Input around byte: {0}")]
    AroundByte(usize),

    /// A surrogate half that is not part of a valid pair. Rust strings cannot hold these.
    #[error("Unpaired surrogate {0:#06X}")]
    UnpairedSurrogate(u16),
}

#[inline]
fn continuation(buf: &[u8], at: usize) -> Result<u16, MUTFError> {
    match buf.get(at) {
        Some(&b) if b & 0xC0 == 0x80 => Ok((b & 0x3F) as u16),
        Some(_) => Err(MUTFError::AroundByte(at)),
        None => Err(MUTFError::PartialCharacterAtEnd),
    }
}

/// Converts a modified utf-8 sequence to an owned rust string.
pub fn modified_utf8_to_string(buf: &[u8]) -> Result<String, MUTFError> {
    if buf.iter().all(|&b| b < 0x80) {
        // ascii only, which is the case for nearly every name and descriptor
        return Ok(buf.iter().map(|&b| b as char).collect());
    }

    let mut units: Vec<u16> = Vec::with_capacity(buf.len());
    let mut i = 0;
    while i < buf.len() {
        let b = buf[i];
        let (unit, width) = match b {
            0x00..=0x7F => (b as u16, 1),
            0xC0..=0xDF => {
                let b2 = continuation(buf, i + 1)?;
                (((b as u16 & 0x1F) << 6) | b2, 2)
            }
            0xE0..=0xEF => {
                let b2 = continuation(buf, i + 1)?;
                let b3 = continuation(buf, i + 2)?;
                (((b as u16 & 0x0F) << 12) | (b2 << 6) | b3, 3)
            }
            _ => return Err(MUTFError::AroundByte(i)),
        };
        units.push(unit);
        i += width;
    }

    std::char::decode_utf16(units.into_iter())
        .map(|c| c.map_err(|e| MUTFError::UnpairedSurrogate(e.unpaired_surrogate())))
        .collect()
}

/// Converts a string to modified UTF-8.
///
/// This never fails: every `&str` is valid UTF-8 and therefore has a modified UTF-8 form.
pub fn string_to_modified_utf8(str: &str) -> Vec<u8> {
    let mut vec = Vec::with_capacity(str.len());
    for unit in str.encode_utf16() {
        match unit {
            0x0001..=0x007F => vec.push(unit as u8),
            // 110xxxxx 10xxxxxx
            0x0000 | 0x0080..=0x07FF => {
                vec.push(0xC0 | (unit >> 6) as u8);
                vec.push(0x80 | (unit & 0x3F) as u8);
            }
            // 1110xxxx 10xxxxxx 10xxxxxx, surrogate halves included
            _ => {
                vec.push(0xE0 | (unit >> 12) as u8);
                vec.push(0x80 | ((unit >> 6) & 0x3F) as u8);
                vec.push(0x80 | (unit & 0x3F) as u8);
            }
        }
    }
    vec
}
