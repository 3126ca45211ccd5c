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
use thiserror::Error;

use crate::mod_utf8::MUTFError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    IO(std::io::Error),
    #[error("Unexpected end of stream: the constant pool is truncated")]
    Truncated,
    #[error("Unrecognized constant pool tag {tag} at index {index}")]
    UnrecognizedTag { index: u16, tag: u8 },
    #[error("Invalid constant pool index {index} referenced at index {referrer}")]
    InvalidIndex { index: u16, referrer: u16 },
    #[error("Constant pool entry {index} is used as {expected} but holds {found}")]
    KindMismatch {
        index: u16,
        expected: &'static str,
        found: &'static str,
    },
    #[error("Invalid type or descriptor: {0}")]
    InvalidDescriptor(String),
    #[error("Malformed UTF-8 constant at index {index}")]
    Utf8 {
        index: u16,
        #[source]
        source: MUTFError,
    },
    #[error("Constant was already read")]
    AlreadyRead,
    #[error("Constant pool entry {index} has not been resolved")]
    Unresolved { index: u16 },
}

impl Error {
    /// Returns `true` if the error was caused by bytes that do not form a valid constant pool.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Error::Truncated
                | Error::UnrecognizedTag { .. }
                | Error::InvalidIndex { .. }
                | Error::KindMismatch { .. }
                | Error::InvalidDescriptor(_)
                | Error::Utf8 { .. }
        )
    }

    /// Returns `true` if the error signals a broken usage contract rather than bad input,
    /// such as reading a pending numeric twice or reading a slot before it was decoded.
    pub fn is_invalid_usage(&self) -> bool {
        matches!(self, Error::AlreadyRead | Error::Unresolved { .. })
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Error::Truncated,
            _ => Error::IO(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
