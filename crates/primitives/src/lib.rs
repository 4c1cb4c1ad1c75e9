//! Fixed-width value types shared by the `evmtrace` interpreter: a 256-bit
//! [`Word256`] and a 160-bit [`Address`], plus the error type their fallible
//! constructors return.

mod address;
mod error;
mod hex_util;
mod word;

pub use address::Address;
pub use error::ParseError;
pub use word::Word256;
