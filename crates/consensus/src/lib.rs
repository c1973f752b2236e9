//! Consensus parameters, soft-fork deployments, and checkpoints.

pub mod checkpoints;
pub mod deployments;
pub mod hash;
pub mod money;
pub mod network;
pub mod params;

pub use checkpoints::{Checkpoint, CheckpointData};
pub use deployments::{Deployment, DeploymentError, DeploymentPos, Deployments};
pub use hash::{decode_hex, hash256_from_hex, hash256_to_hex, Hash256, HexError};
pub use network::{Base58Prefixes, Base58Type, Network, UnknownNetwork, ALL_NETWORKS};
pub use params::{
    consensus_params, BudgetParams, ConsensusParams, GovernanceParams, MasternodeParams,
};
