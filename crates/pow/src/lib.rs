//! Compact difficulty targets and proof-of-work limits.

pub mod difficulty;
pub mod validation;

pub use difficulty::{block_proof, compact_to_u256, CompactError};
pub use validation::{check_target, PowError};
