/// Errors produced while constructing a [`crate::Word256`] or
/// [`crate::Address`] from caller-supplied bytes or hex text.
///
/// These are ordinary caller-side construction failures, never interpreter
/// halt reasons: they can only occur before an interpreter exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The hex string contained a character outside `[0-9a-fA-F]`
    /// (after stripping an optional `0x` prefix).
    #[error("invalid hex character at byte offset {0}")]
    InvalidHexChar(usize),
    /// The hex string decoded to more bytes than the target type holds.
    #[error("hex input has {got} hex digits, expected at most {max}")]
    TooLong {
        /// Number of hex digits found in the input.
        got: usize,
        /// Maximum number of hex digits the target type accepts.
        max: usize,
    },
    /// A fixed-size byte slice had the wrong length.
    #[error("expected {expected} bytes, got {got}")]
    WrongByteLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        got: usize,
    },
}
