//! Base58Check addresses and WIF keys, parameterized by a network's prefixes.

use geekd_consensus::{Base58Prefixes, Base58Type};

use crate::hash::{hash160, sha256d};
use crate::script::{is_p2pkh, is_p2sh, pay_to_pubkey_hash, pay_to_script_hash};

const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    InvalidLength,
    InvalidCharacter,
    InvalidChecksum,
    UnknownPrefix,
}

impl std::fmt::Display for AddressError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddressError::InvalidLength => write!(f, "invalid payload length"),
            AddressError::InvalidCharacter => write!(f, "invalid base58 character"),
            AddressError::InvalidChecksum => write!(f, "checksum mismatch"),
            AddressError::UnknownPrefix => write!(f, "prefix does not belong to this network"),
        }
    }
}

impl std::error::Error for AddressError {}

pub fn address_to_script_pubkey(
    address: &str,
    prefixes: &Base58Prefixes,
) -> Result<Vec<u8>, AddressError> {
    let payload = base58check_decode(address)?;

    if let Some(hash) = strip_prefix(&payload, prefixes.get(Base58Type::PubkeyAddress)) {
        return Ok(pay_to_pubkey_hash(&hash?));
    }
    if let Some(hash) = strip_prefix(&payload, prefixes.get(Base58Type::ScriptAddress)) {
        return Ok(pay_to_script_hash(&hash?));
    }

    Err(AddressError::UnknownPrefix)
}

pub fn script_pubkey_to_address(script: &[u8], prefixes: &Base58Prefixes) -> Option<String> {
    if is_p2pkh(script) {
        return Some(encode_with_prefix(
            prefixes.get(Base58Type::PubkeyAddress),
            &script[3..23],
        ));
    }
    if is_p2sh(script) {
        return Some(encode_with_prefix(
            prefixes.get(Base58Type::ScriptAddress),
            &script[2..22],
        ));
    }
    None
}

/// P2PKH address for a serialized public key.
pub fn pubkey_to_address(pubkey: &[u8], prefixes: &Base58Prefixes) -> String {
    encode_with_prefix(prefixes.get(Base58Type::PubkeyAddress), &hash160(pubkey))
}

pub fn secret_key_to_wif(secret: &[u8; 32], prefixes: &Base58Prefixes, compressed: bool) -> String {
    let prefix = prefixes.get(Base58Type::SecretKey);
    let mut payload = Vec::with_capacity(prefix.len() + secret.len() + usize::from(compressed));
    payload.extend_from_slice(prefix);
    payload.extend_from_slice(secret);
    if compressed {
        payload.push(0x01);
    }
    base58check_encode(&payload)
}

pub fn wif_to_secret_key(
    wif: &str,
    prefixes: &Base58Prefixes,
) -> Result<([u8; 32], bool), AddressError> {
    let payload = base58check_decode(wif)?;
    let prefix = prefixes.get(Base58Type::SecretKey);
    let body = payload
        .strip_prefix(prefix)
        .ok_or(AddressError::UnknownPrefix)?;

    let compressed = match body.len() {
        32 => false,
        33 if body[32] == 0x01 => true,
        _ => return Err(AddressError::InvalidLength),
    };
    let mut secret = [0u8; 32];
    secret.copy_from_slice(&body[..32]);
    Ok((secret, compressed))
}

fn strip_prefix(payload: &[u8], prefix: &[u8]) -> Option<Result<[u8; 20], AddressError>> {
    let hash = payload.strip_prefix(prefix)?;
    Some(<[u8; 20]>::try_from(hash).map_err(|_| AddressError::InvalidLength))
}

fn encode_with_prefix(prefix: &[u8], body: &[u8]) -> String {
    let mut payload = Vec::with_capacity(prefix.len() + body.len());
    payload.extend_from_slice(prefix);
    payload.extend_from_slice(body);
    base58check_encode(&payload)
}

pub fn base58check_decode(input: &str) -> Result<Vec<u8>, AddressError> {
    let bytes = base58_decode(input)?;
    if bytes.len() < 4 {
        return Err(AddressError::InvalidLength);
    }
    let (payload, checksum) = bytes.split_at(bytes.len() - 4);
    let digest = sha256d(payload);
    if checksum != &digest[..4] {
        return Err(AddressError::InvalidChecksum);
    }
    Ok(payload.to_vec())
}

pub fn base58check_encode(payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(payload.len() + 4);
    data.extend_from_slice(payload);
    let checksum = sha256d(payload);
    data.extend_from_slice(&checksum[..4]);
    base58_encode(&data)
}

fn base58_decode(input: &str) -> Result<Vec<u8>, AddressError> {
    if input.is_empty() {
        return Err(AddressError::InvalidLength);
    }
    let mut bytes = Vec::new();
    for ch in input.bytes() {
        let mut carry = base58_value(ch).ok_or(AddressError::InvalidCharacter)? as u32;
        for byte in bytes.iter_mut().rev() {
            let val = (*byte as u32) * 58 + carry;
            *byte = (val & 0xff) as u8;
            carry = val >> 8;
        }
        while carry > 0 {
            bytes.insert(0, (carry & 0xff) as u8);
            carry >>= 8;
        }
    }

    let leading_zeros = input.bytes().take_while(|b| *b == b'1').count();
    let mut out = vec![0u8; leading_zeros];
    out.extend_from_slice(&bytes);
    Ok(out)
}

fn base58_encode(data: &[u8]) -> String {
    if data.is_empty() {
        return String::new();
    }
    let leading_zeros = data.iter().take_while(|b| **b == 0u8).count();
    let mut digits: Vec<u8> = Vec::new();
    for byte in &data[leading_zeros..] {
        let mut carry = *byte as u32;
        for digit in digits.iter_mut().rev() {
            let value = (*digit as u32) * 256 + carry;
            *digit = (value % 58) as u8;
            carry = value / 58;
        }
        while carry > 0 {
            digits.insert(0, (carry % 58) as u8);
            carry /= 58;
        }
    }
    let mut out = String::with_capacity(leading_zeros + digits.len());
    for _ in 0..leading_zeros {
        out.push('1');
    }
    for digit in digits {
        out.push(ALPHABET[digit as usize] as char);
    }
    out
}

fn base58_value(byte: u8) -> Option<u8> {
    ALPHABET
        .iter()
        .position(|value| *value == byte)
        .map(|pos| pos as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIXES: Base58Prefixes = Base58Prefixes {
        pubkey_address: &[0],
        script_address: &[5],
        secret_key: &[128],
        ext_public_key: &[0x04, 0x88, 0xB2, 0x1E],
        ext_secret_key: &[0x04, 0x88, 0xAD, 0xE4],
    };

    #[test]
    fn base58_keeps_leading_zero_bytes() {
        assert_eq!(base58_encode(&[0, 0, 1]), "112");
        assert_eq!(base58_decode("112"), Ok(vec![0, 0, 1]));
    }

    #[test]
    fn known_p2pkh_address() {
        // hash160 of nothing in particular, checked against a reference encoder.
        let hash = [0u8; 20];
        let script = pay_to_pubkey_hash(&hash);
        let address = script_pubkey_to_address(&script, &PREFIXES).expect("address");
        assert_eq!(address, "1111111111111111111114oLvT2");
        assert_eq!(address_to_script_pubkey(&address, &PREFIXES), Ok(script));
    }

    #[test]
    fn corrupted_checksum_is_rejected() {
        assert_eq!(
            base58check_decode("1111111111111111111114oLvT3"),
            Err(AddressError::InvalidChecksum)
        );
        assert_eq!(
            base58check_decode("0OIl"),
            Err(AddressError::InvalidCharacter)
        );
    }
}
