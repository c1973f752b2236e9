//! Network parameter sets, genesis construction and network selection.

pub mod config;
pub mod error;
pub mod genesis;
pub mod params;
pub mod registry;

pub use config::{load_conf, network_from_args, parse_conf_bool, ConfigError, NetworkArgs};
pub use error::ParamsError;
pub use genesis::{build_genesis, verify_genesis, GenesisSpec};
pub use params::{chain_params, ChainParams, DnsSeed};
pub use registry::Registry;
