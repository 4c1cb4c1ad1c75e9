use crate::error::ParseError;

/// Strips an optional `0x`/`0X` prefix and decodes the remainder as hex into
/// a big-endian, zero-left-padded fixed-size byte array.
///
/// Rejects non-hex characters and inputs that decode to more than `N` bytes.
pub(crate) fn decode_fixed<const N: usize>(input: &str) -> Result<[u8; N], ParseError> {
    let digits = input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")).unwrap_or(input);

    if digits.len() > N * 2 {
        return Err(ParseError::TooLong {
            got: digits.len(),
            max: N * 2,
        });
    }

    if let Some(offset) = digits.find(|c: char| !c.is_ascii_hexdigit()) {
        return Err(ParseError::InvalidHexChar(offset));
    }

    // Left-pad odd-length input with a leading zero nibble so `hex::decode`
    // always sees an even number of digits.
    let padded: std::borrow::Cow<'_, str> = if digits.len() % 2 == 1 {
        std::borrow::Cow::Owned(std::format!("0{digits}"))
    } else {
        std::borrow::Cow::Borrowed(digits)
    };

    let mut bytes = [0u8; N];
    let decoded = hex::decode(padded.as_ref()).expect("already validated as hex digits");
    let start = N - decoded.len();
    bytes[start..].copy_from_slice(&decoded);
    Ok(bytes)
}
