use alloy_primitives::U256;
use core::fmt;

use crate::error::ParseError;
use crate::hex_util::decode_fixed;

/// An unsigned 256-bit integer, the universal EVM value type.
///
/// Every constructor and arithmetic operation is reduced modulo 2²⁵⁶, so a
/// `Word256` is always a canonical representative in `[0, 2²⁵⁶)`. Internally
/// this is a thin wrapper over [`alloy_primitives::U256`], the same
/// fixed-width backing type used throughout the wider `revm` ecosystem.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Word256(U256);

impl Word256 {
    /// The additive identity, `0`.
    pub const ZERO: Self = Self(U256::ZERO);
    /// The multiplicative identity, `1`.
    pub const ONE: Self = Self(U256::from_limbs([1, 0, 0, 0]));
    /// `2²⁵⁶ - 1`, the largest representable value.
    pub const MAX: Self = Self(U256::MAX);

    /// Constructs a `Word256` from a native `u64`, zero-extended.
    #[inline]
    pub fn from_u64(value: u64) -> Self {
        Self(U256::from(value))
    }

    /// Constructs a `Word256` from 32 big-endian bytes. Lossless and
    /// infallible: every byte pattern is a valid 256-bit value.
    #[inline]
    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        Self(U256::from_be_bytes(bytes))
    }

    /// Returns the big-endian byte representation. `from_be_bytes(w.to_be_bytes()) == w`
    /// for all `w`.
    #[inline]
    pub fn to_be_bytes(self) -> [u8; 32] {
        self.0.to_be_bytes()
    }

    /// Parses a hex string into a `Word256`.
    ///
    /// Accepts an optional `0x`/`0X` prefix, rejects non-hex characters, and
    /// rejects inputs that decode to more than 32 bytes.
    pub fn from_hex(input: &str) -> Result<Self, ParseError> {
        decode_fixed::<32>(input).map(Self::from_be_bytes)
    }

    /// Renders as `0x` followed by 64 lowercase hex characters, zero-padded.
    pub fn to_hex(self) -> String {
        std::format!("0x{}", hex::encode(self.to_be_bytes()))
    }

    /// Renders as 64 lowercase hex characters, zero-padded, without a `0x`
    /// prefix.
    pub fn to_hex_no_prefix(self) -> String {
        hex::encode(self.to_be_bytes())
    }

    /// Renders as an unsigned base-10 string.
    pub fn to_decimal(self) -> String {
        self.0.to_string()
    }

    /// Renders as 256 `'0'`/`'1'` characters, most significant bit first.
    pub fn to_binary(self) -> String {
        let bytes = self.to_be_bytes();
        let mut out = String::with_capacity(256);
        for byte in bytes {
            for bit in (0..8).rev() {
                out.push(if byte & (1 << bit) != 0 { '1' } else { '0' });
            }
        }
        out
    }

    /// Returns the byte at `index`, where index 0 is the most significant
    /// byte. Returns `0` for indices outside `0..32`.
    #[inline]
    pub fn byte_at(self, index: usize) -> u8 {
        if index >= 32 {
            return 0;
        }
        self.to_be_bytes()[index]
    }

    /// Returns `true` if this value is zero.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Wrapping addition, modulo 2²⁵⁶.
    #[inline]
    pub fn add(self, rhs: Self) -> Self {
        Self(self.0.wrapping_add(rhs.0))
    }

    /// Wrapping subtraction, modulo 2²⁵⁶.
    #[inline]
    pub fn sub(self, rhs: Self) -> Self {
        Self(self.0.wrapping_sub(rhs.0))
    }

    /// Wrapping multiplication, modulo 2²⁵⁶.
    #[inline]
    pub fn mul(self, rhs: Self) -> Self {
        Self(self.0.wrapping_mul(rhs.0))
    }

    /// Unsigned division. Division by zero yields `0` rather than panicking
    /// or being undefined, matching EVM `DIV` semantics.
    #[inline]
    pub fn div(self, rhs: Self) -> Self {
        if rhs.is_zero() {
            Self::ZERO
        } else {
            Self(self.0.wrapping_div(rhs.0))
        }
    }

    /// Unsigned modulus. Modulus by zero yields `0`, matching EVM `MOD`
    /// semantics.
    #[inline]
    pub fn rem(self, rhs: Self) -> Self {
        if rhs.is_zero() {
            Self::ZERO
        } else {
            Self(self.0.wrapping_rem(rhs.0))
        }
    }

    /// Modular exponentiation, `self.pow(exponent) mod 2²⁵⁶`, computed by
    /// square-and-multiply.
    pub fn exp(self, exponent: Self) -> Self {
        let mut base = self;
        let mut exp = exponent;
        let mut result = Self::ONE;
        while !exp.is_zero() {
            if exp.0 & U256::from(1u8) == U256::from(1u8) {
                result = result.mul(base);
            }
            base = base.mul(base);
            exp = Self(exp.0 >> 1);
        }
        result
    }

    /// Bitwise AND.
    #[inline]
    pub fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }

    /// Bitwise OR.
    #[inline]
    pub fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }

    /// Bitwise XOR.
    #[inline]
    pub fn bitxor(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }

    /// Bitwise NOT (one's complement).
    #[inline]
    pub fn bitnot(self) -> Self {
        Self(!self.0)
    }

    /// Logical left shift. A shift amount of 256 or more yields `0`.
    #[inline]
    pub fn shl(self, amount: u32) -> Self {
        if amount >= 256 {
            Self::ZERO
        } else {
            Self(self.0 << amount)
        }
    }

    /// Logical right shift. A shift amount of 256 or more yields `0`.
    #[inline]
    pub fn shr(self, amount: u32) -> Self {
        if amount >= 256 {
            Self::ZERO
        } else {
            Self(self.0 >> amount)
        }
    }

    /// Unsigned less-than.
    #[inline]
    pub fn lt(self, rhs: Self) -> bool {
        self.0 < rhs.0
    }

    /// Unsigned greater-than.
    #[inline]
    pub fn gt(self, rhs: Self) -> bool {
        self.0 > rhs.0
    }

    /// Returns the value truncated to a `usize`, or `None` if it does not
    /// fit. Used by handlers that treat a `Word256` as a memory offset or
    /// length.
    pub fn to_usize(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }

    /// Returns the underlying [`alloy_primitives::U256`].
    #[inline]
    pub fn into_inner(self) -> U256 {
        self.0
    }
}

impl From<u64> for Word256 {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl From<usize> for Word256 {
    fn from(value: usize) -> Self {
        Self(U256::from(value))
    }
}

impl fmt::Debug for Word256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word256({})", self.to_hex())
    }
}

impl fmt::Display for Word256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_bytes_and_hex() {
        let w = Word256::from_u64(0x1234_5678);
        assert_eq!(Word256::from_be_bytes(w.to_be_bytes()), w);
        assert_eq!(Word256::from_hex(&w.to_hex()).unwrap(), w);
        assert_eq!(Word256::from_hex(&w.to_hex_no_prefix()).unwrap(), w);
    }

    #[test]
    fn add_wraps_at_max() {
        assert_eq!(Word256::MAX.add(Word256::ONE), Word256::ZERO);
    }

    #[test]
    fn sub_wraps_below_zero() {
        assert_eq!(Word256::ZERO.sub(Word256::ONE), Word256::MAX);
    }

    #[test]
    fn mul_wraps_at_max() {
        let two = Word256::from_u64(2);
        assert_eq!(Word256::MAX.mul(two), Word256::MAX.sub(Word256::ONE));
    }

    #[test]
    fn div_and_mod_by_zero_are_zero() {
        let a = Word256::from_u64(42);
        assert_eq!(a.div(Word256::ZERO), Word256::ZERO);
        assert_eq!(a.rem(Word256::ZERO), Word256::ZERO);
    }

    #[test]
    fn shift_at_or_beyond_256_is_zero() {
        let a = Word256::MAX;
        assert_eq!(a.shl(256), Word256::ZERO);
        assert_eq!(a.shr(300), Word256::ZERO);
    }

    #[test]
    fn exp_matches_repeated_multiplication() {
        let base = Word256::from_u64(3);
        let exp = Word256::from_u64(5);
        assert_eq!(base.exp(exp), Word256::from_u64(243));
        assert_eq!(base.exp(Word256::ZERO), Word256::ONE);
    }

    #[test]
    fn byte_at_zero_is_most_significant() {
        let w = Word256::from_hex(
            "0x0100000000000000000000000000000000000000000000000000000000000000",
        );
        // 66 hex chars after 0x -> too long, expect error instead.
        assert!(w.is_err());

        let w = Word256::from_u64(1);
        assert_eq!(w.byte_at(31), 1);
        assert_eq!(w.byte_at(0), 0);
        assert_eq!(w.byte_at(32), 0);
    }

    #[test]
    fn rejects_non_hex_and_overlong_input() {
        assert!(Word256::from_hex("0xzz").is_err());
        let too_long = format!("0x{}", "ff".repeat(33));
        assert!(Word256::from_hex(&too_long).is_err());
    }
}
