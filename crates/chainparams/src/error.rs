use std::fmt;

use geekd_consensus::{hash256_to_hex, DeploymentError, DeploymentPos, Hash256, HexError, Network};
use geekd_pow::PowError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    UnknownNetwork(String),
    AlreadySelected {
        active: Network,
        requested: Network,
    },
    GenesisHashMismatch {
        network: Network,
        expected: Hash256,
        actual: Hash256,
    },
    GenesisMerkleRootMismatch {
        network: Network,
        expected: Hash256,
        actual: Hash256,
    },
    GenesisTarget {
        network: Network,
        error: PowError,
    },
    DeploymentBitOutOfRange {
        network: Network,
        deployment: DeploymentPos,
        bit: u8,
    },
    DeploymentBitConflict {
        network: Network,
        first: DeploymentPos,
        second: DeploymentPos,
        bit: u8,
    },
    InvalidHex {
        network: Network,
        field: &'static str,
        error: HexError,
    },
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamsError::UnknownNetwork(id) => write!(f, "unknown chain {id}"),
            ParamsError::AlreadySelected { active, requested } => write!(
                f,
                "cannot select chain {requested}: chain {active} is already active"
            ),
            ParamsError::GenesisHashMismatch {
                network,
                expected,
                actual,
            } => write!(
                f,
                "{network} genesis hash mismatch: expected {}, computed {}",
                hash256_to_hex(expected),
                hash256_to_hex(actual)
            ),
            ParamsError::GenesisMerkleRootMismatch {
                network,
                expected,
                actual,
            } => write!(
                f,
                "{network} genesis merkle root mismatch: expected {}, computed {}",
                hash256_to_hex(expected),
                hash256_to_hex(actual)
            ),
            ParamsError::GenesisTarget { network, error } => {
                write!(f, "{network} genesis target invalid: {error}")
            }
            ParamsError::DeploymentBitOutOfRange {
                network,
                deployment,
                bit,
            } => write!(
                f,
                "{network} deployment {} uses out-of-range bit {bit}",
                deployment.name()
            ),
            ParamsError::DeploymentBitConflict {
                network,
                first,
                second,
                bit,
            } => write!(
                f,
                "{network} deployments {} and {} share bit {bit} with overlapping windows",
                first.name(),
                second.name()
            ),
            ParamsError::InvalidHex {
                network,
                field,
                error,
            } => write!(f, "{network} {field}: {error}"),
        }
    }
}

impl std::error::Error for ParamsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParamsError::GenesisTarget { error, .. } => Some(error),
            ParamsError::InvalidHex { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<geekd_consensus::UnknownNetwork> for ParamsError {
    fn from(err: geekd_consensus::UnknownNetwork) -> Self {
        ParamsError::UnknownNetwork(err.0)
    }
}

impl ParamsError {
    pub(crate) fn deployment(network: Network, err: DeploymentError) -> Self {
        match err {
            DeploymentError::BitOutOfRange { deployment, bit } => {
                ParamsError::DeploymentBitOutOfRange {
                    network,
                    deployment,
                    bit,
                }
            }
            DeploymentError::BitConflict { first, second, bit } => {
                ParamsError::DeploymentBitConflict {
                    network,
                    first,
                    second,
                    bit,
                }
            }
        }
    }
}
