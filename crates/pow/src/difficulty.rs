//! Difficulty and compact target utilities.

use primitive_types::U256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompactError {
    Negative,
    Overflow,
}

impl std::fmt::Display for CompactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompactError::Negative => write!(f, "compact target has negative sign bit"),
            CompactError::Overflow => write!(f, "compact target overflows 256-bit range"),
        }
    }
}

impl std::error::Error for CompactError {}

pub fn compact_to_u256(bits: u32) -> Result<U256, CompactError> {
    let size = bits >> 24;
    let mut word = bits & 0x007f_ffff;
    let negative = (bits & 0x0080_0000) != 0;

    if negative && word != 0 {
        return Err(CompactError::Negative);
    }

    let value = if size <= 3 {
        word >>= 8 * (3 - size);
        U256::from(word)
    } else {
        if word != 0 {
            let overflow =
                size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32);
            if overflow {
                return Err(CompactError::Overflow);
            }
        }
        U256::from(word) << (8 * (size - 3))
    };

    Ok(value)
}

/// Expected number of hashes needed to meet `bits`.
pub fn block_proof(bits: u32) -> Result<U256, CompactError> {
    let target = compact_to_u256(bits)?;
    if target.is_zero() {
        return Ok(U256::zero());
    }
    let one = U256::from(1u64);
    Ok((!target / (target + one)) + one)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_reference_compact_values() {
        assert_eq!(compact_to_u256(0x01003456), Ok(U256::zero()));
        assert_eq!(compact_to_u256(0x01123456), Ok(U256::from(0x12u64)));
        assert_eq!(compact_to_u256(0x02123456), Ok(U256::from(0x1234u64)));
        assert_eq!(compact_to_u256(0x04123456), Ok(U256::from(0x1234_5600u64)));
        assert_eq!(compact_to_u256(0x04923456), Err(CompactError::Negative));
        assert_eq!(compact_to_u256(0xff123456), Err(CompactError::Overflow));
    }

    #[test]
    fn block_proof_of_easiest_regtest_target() {
        assert_eq!(block_proof(0x207fffff), Ok(U256::from(2u64)));
        assert_eq!(block_proof(0), Ok(U256::zero()));
    }
}
