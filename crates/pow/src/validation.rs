use geekd_consensus::Hash256;
use primitive_types::U256;

use crate::difficulty::{compact_to_u256, CompactError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PowError {
    InvalidBits(&'static str),
    Compact(CompactError),
}

impl std::fmt::Display for PowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PowError::InvalidBits(message) => write!(f, "{message}"),
            PowError::Compact(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for PowError {}

impl From<CompactError> for PowError {
    fn from(err: CompactError) -> Self {
        PowError::Compact(err)
    }
}

/// Decodes `bits` and checks the target is non-zero and no easier than
/// `pow_limit`.
pub fn check_target(bits: u32, pow_limit: &Hash256) -> Result<U256, PowError> {
    let target = compact_to_u256(bits)?;
    if target.is_zero() {
        return Err(PowError::InvalidBits("pow target is zero"));
    }

    if target > U256::from_little_endian(pow_limit) {
        return Err(PowError::InvalidBits("pow target above limit"));
    }

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_target_above_limit() {
        let mut limit = [0u8; 32];
        limit[29] = 0x0f;
        let err = check_target(0x207fffff, &limit).unwrap_err();
        assert_eq!(err, PowError::InvalidBits("pow target above limit"));
    }

    #[test]
    fn target_equal_to_limit_is_accepted() {
        let mut limit = [0u8; 32];
        limit[29] = 0xff;
        limit[30] = 0xff;
        limit[31] = 0x7f;
        let target = check_target(0x207fffff, &limit).expect("target");
        assert_eq!(target, U256::from_little_endian(&limit));
    }

    #[test]
    fn zero_and_negative_targets_fail() {
        let limit = [0xffu8; 32];
        assert_eq!(
            check_target(0, &limit),
            Err(PowError::InvalidBits("pow target is zero"))
        );
        assert_eq!(
            check_target(0x04923456, &limit),
            Err(PowError::Compact(CompactError::Negative))
        );
    }
}
