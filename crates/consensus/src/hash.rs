//! 256-bit hash values and hex helpers.
//!
//! Hashes are stored in internal (little-endian) byte order. Hex strings use the
//! conventional display order, most significant byte first.

pub type Hash256 = [u8; 32];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HexError {
    InvalidLength,
    InvalidHex,
}

impl std::fmt::Display for HexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HexError::InvalidLength => write!(f, "invalid hex length"),
            HexError::InvalidHex => write!(f, "invalid hex character"),
        }
    }
}

impl std::error::Error for HexError {}

fn strip_hex_prefix(input: &str) -> &str {
    let hex = input.trim();
    hex.strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .unwrap_or(hex)
}

/// Parses a display-order hex string into a hash, left-padding short input
/// with zeros.
pub fn hash256_from_hex(input: &str) -> Result<Hash256, HexError> {
    let hex = strip_hex_prefix(input);
    if hex.is_empty() {
        return Err(HexError::InvalidLength);
    }
    if hex.len() > 64 {
        return Err(HexError::InvalidLength);
    }

    let mut padded = String::with_capacity(64);
    for _ in 0..(64 - hex.len()) {
        padded.push('0');
    }
    padded.push_str(hex);

    let mut bytes = [0u8; 32];
    for (i, byte_out) in bytes.iter_mut().enumerate() {
        let start = i * 2;
        let byte = padded
            .get(start..start + 2)
            .ok_or(HexError::InvalidHex)
            .and_then(|pair| u8::from_str_radix(pair, 16).map_err(|_| HexError::InvalidHex))?;
        *byte_out = byte;
    }
    bytes.reverse();

    Ok(bytes)
}

pub fn hash256_to_hex(hash: &Hash256) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(64);
    for byte in hash.iter().rev() {
        let _ = write!(out, "{:02x}", byte);
    }
    out
}

/// Decodes a plain byte string (no reversal). Odd-length input is zero-padded
/// on the left.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, HexError> {
    let hex = strip_hex_prefix(input);
    if hex.is_empty() {
        return Err(HexError::InvalidLength);
    }

    let owned;
    let hex = if hex.len() % 2 == 1 {
        owned = format!("0{hex}");
        owned.as_str()
    } else {
        hex
    };

    let mut bytes = Vec::with_capacity(hex.len() / 2);
    for i in (0..hex.len()).step_by(2) {
        let pair = hex.get(i..i + 2).ok_or(HexError::InvalidHex)?;
        let byte = u8::from_str_radix(pair, 16).map_err(|_| HexError::InvalidHex)?;
        bytes.push(byte);
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_hex_is_left_padded() {
        let hash = hash256_from_hex("0x00").expect("zero");
        assert_eq!(hash, [0u8; 32]);

        let hash = hash256_from_hex("100010").expect("short");
        assert_eq!(hash[0], 0x10);
        assert_eq!(hash[1], 0x00);
        assert_eq!(hash[2], 0x10);
        assert!(hash[3..].iter().all(|b| *b == 0));
    }

    #[test]
    fn hex_roundtrip_keeps_display_order() {
        let text = "00000fffff000000000000000000000000000000000000000000000000000000";
        let hash = hash256_from_hex(text).expect("pow limit");
        assert_eq!(hash[31], 0x00);
        assert_eq!(hash[29], 0x0f);
        assert_eq!(hash256_to_hex(&hash), text);
    }

    #[test]
    fn rejects_bad_hex() {
        assert_eq!(hash256_from_hex(""), Err(HexError::InvalidLength));
        assert_eq!(hash256_from_hex("zz"), Err(HexError::InvalidHex));
        assert_eq!(
            hash256_from_hex(&"1".repeat(65)),
            Err(HexError::InvalidLength)
        );
        assert_eq!(decode_hex("0g"), Err(HexError::InvalidHex));
    }

    #[test]
    fn decode_hex_keeps_byte_order() {
        assert_eq!(decode_hex("04ab").expect("bytes"), vec![0x04, 0xab]);
        assert_eq!(decode_hex("abc").expect("odd"), vec![0x0a, 0xbc]);
    }
}
