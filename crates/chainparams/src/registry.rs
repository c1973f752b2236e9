//! Owner of all network parameter sets and of the process's network choice.

use geekd_consensus::{hash256_to_hex, Network};
use geekd_log::{log_debug, log_info};

use crate::error::ParamsError;
use crate::params::{chain_params, ChainParams};

/// Holds the verified parameters of every network. Exactly one of them can
/// be selected, once, for the lifetime of the registry.
#[derive(Debug)]
pub struct Registry {
    networks: [ChainParams; 3],
    selected: Option<Network>,
}

impl Registry {
    pub fn new() -> Result<Self, ParamsError> {
        let networks = [
            build(Network::Mainnet)?,
            build(Network::Testnet)?,
            build(Network::Regtest)?,
        ];
        Ok(Self {
            networks,
            selected: None,
        })
    }

    /// Activates the network named `id`. Selecting the already active
    /// network again is a no-op.
    pub fn select_network(&mut self, id: &str) -> Result<&ChainParams, ParamsError> {
        let network: Network = id.parse()?;
        let current = self.selected;
        match current {
            Some(active) if active == network => {}
            Some(active) => {
                return Err(ParamsError::AlreadySelected {
                    active,
                    requested: network,
                })
            }
            None => {
                self.selected = Some(network);
                let params = self.params(network);
                log_info!(
                    "Selected chain {} (genesis {}, port {})",
                    network,
                    hash256_to_hex(&params.genesis_hash()),
                    params.default_port
                );
            }
        }
        Ok(self.params(network))
    }

    /// The selected parameter set.
    ///
    /// # Panics
    ///
    /// Panics if no network has been selected yet; reading parameters before
    /// startup chose a network is a programming error.
    pub fn active(&self) -> &ChainParams {
        match self.try_active() {
            Some(params) => params,
            None => panic!("chain parameters read before a network was selected"),
        }
    }

    pub fn try_active(&self) -> Option<&ChainParams> {
        self.selected.map(|network| self.params(network))
    }

    pub fn selected(&self) -> Option<Network> {
        self.selected
    }

    pub fn params(&self, network: Network) -> &ChainParams {
        &self.networks[network.as_usize()]
    }

    pub fn params_for(&self, id: &str) -> Result<&ChainParams, ParamsError> {
        let network: Network = id.parse()?;
        Ok(self.params(network))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChainParams> {
        self.networks.iter()
    }
}

fn build(network: Network) -> Result<ChainParams, ParamsError> {
    let params = chain_params(network)?;
    log_debug!(
        "Verified {} genesis {} (merkle root {})",
        network,
        hash256_to_hex(&params.genesis_hash()),
        hash256_to_hex(&params.genesis.header.merkle_root)
    );
    Ok(params)
}
