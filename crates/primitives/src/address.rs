use alloy_primitives::Address as AlloyAddress;
use core::fmt;

use crate::error::ParseError;
use crate::hex_util::decode_fixed;

/// A 160-bit identifier: an EVM contract or externally-owned account
/// address.
///
/// Thin wrapper over [`alloy_primitives::Address`], the same fixed-width
/// type used throughout the wider `revm` ecosystem, exposing the
/// conventions this crate's trace/host surface needs (20-byte big-endian
/// representation, 40-character hex with or without a `0x` prefix).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Address(AlloyAddress);

impl Address {
    /// The zero address.
    pub const ZERO: Self = Self(AlloyAddress::ZERO);

    /// Constructs an `Address` from 20 big-endian bytes.
    #[inline]
    pub fn from_be_bytes(bytes: [u8; 20]) -> Self {
        Self(AlloyAddress::new(bytes))
    }

    /// Returns the big-endian byte representation.
    #[inline]
    pub fn to_be_bytes(self) -> [u8; 20] {
        self.0.into_array()
    }

    /// Parses a hex string into an `Address`.
    ///
    /// Accepts an optional `0x`/`0X` prefix, rejects non-hex characters, and
    /// rejects inputs that decode to more than 20 bytes.
    pub fn from_hex(input: &str) -> Result<Self, ParseError> {
        decode_fixed::<20>(input).map(Self::from_be_bytes)
    }

    /// Renders as `0x` followed by 40 lowercase hex characters, zero-padded.
    pub fn to_hex(self) -> String {
        std::format!("0x{}", hex::encode(self.to_be_bytes()))
    }

    /// Renders as 40 lowercase hex characters, zero-padded, without a `0x`
    /// prefix.
    pub fn to_hex_no_prefix(self) -> String {
        hex::encode(self.to_be_bytes())
    }

    /// Returns the underlying [`alloy_primitives::Address`].
    #[inline]
    pub fn into_inner(self) -> AlloyAddress {
        self.0
    }
}

impl From<AlloyAddress> for Address {
    fn from(value: AlloyAddress) -> Self {
        Self(value)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_bytes_and_hex() {
        let a = Address::from_be_bytes([0x11; 20]);
        assert_eq!(Address::from_be_bytes(a.to_be_bytes()), a);
        assert_eq!(Address::from_hex(&a.to_hex()).unwrap(), a);
        assert_eq!(Address::from_hex(&a.to_hex_no_prefix()).unwrap(), a);
    }

    #[test]
    fn rejects_overlong_input() {
        let too_long = format!("0x{}", "ab".repeat(21));
        assert!(Address::from_hex(&too_long).is_err());
    }

    #[test]
    fn rejects_non_hex_chars() {
        assert!(Address::from_hex("0xnothex00000000000000000000000000000000").is_err());
    }
}
