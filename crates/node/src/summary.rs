//! Serializable view of a parameter set for `--print-params`.

use geekd_chainparams::ChainParams;
use geekd_consensus::{hash256_to_hex, Base58Type};
use geekd_pow::block_proof;
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct ParamsSummary {
    pub chain: &'static str,
    pub genesis: GenesisSummary,
    pub message_start: String,
    pub default_port: u16,
    pub bip44_coin_type: u32,
    pub prefixes: PrefixSummary,
    pub dns_seeds: Vec<String>,
    pub checkpoints: Vec<CheckpointSummary>,
    pub deployments: Vec<DeploymentSummary>,
    pub pow_limit: String,
    pub pow_target_spacing: i64,
    pub difficulty_adjustment_interval: i64,
    pub subsidy_halving_interval: i32,
    pub minimum_chain_work: String,
    pub max_tip_age: i64,
    pub require_standard: bool,
    pub mine_blocks_on_demand: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct GenesisSummary {
    pub hash: String,
    pub merkle_root: String,
    pub time: u32,
    pub bits: String,
    pub nonce: u32,
    /// Decimal string; the value can exceed u64.
    pub work: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct PrefixSummary {
    pub pubkey_address: Vec<u8>,
    pub script_address: Vec<u8>,
    pub secret_key: Vec<u8>,
    pub ext_public_key: String,
    pub ext_secret_key: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct CheckpointSummary {
    pub height: i32,
    pub hash: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct DeploymentSummary {
    pub name: &'static str,
    pub bit: u8,
    pub start_time: i64,
    pub timeout: i64,
    pub window_size: u32,
    pub threshold: u32,
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}

impl ParamsSummary {
    pub fn from_params(params: &ChainParams) -> Self {
        let header = &params.genesis.header;
        let consensus = &params.consensus;
        let work = block_proof(header.bits)
            .map(|work| work.to_string())
            .unwrap_or_default();

        Self {
            chain: params.id(),
            genesis: GenesisSummary {
                hash: hash256_to_hex(&params.genesis_hash()),
                merkle_root: hash256_to_hex(&header.merkle_root),
                time: header.time,
                bits: format!("{:08x}", header.bits),
                nonce: header.nonce,
                work,
            },
            message_start: hex(&params.message_start),
            default_port: params.default_port,
            bip44_coin_type: params.bip44_coin_type,
            prefixes: PrefixSummary {
                pubkey_address: params.base58_prefix(Base58Type::PubkeyAddress).to_vec(),
                script_address: params.base58_prefix(Base58Type::ScriptAddress).to_vec(),
                secret_key: params.base58_prefix(Base58Type::SecretKey).to_vec(),
                ext_public_key: hex(params.base58_prefix(Base58Type::ExtPublicKey)),
                ext_secret_key: hex(params.base58_prefix(Base58Type::ExtSecretKey)),
            },
            dns_seeds: params.dns_seeds.iter().map(|seed| seed.host.clone()).collect(),
            checkpoints: params
                .checkpoints
                .checkpoints
                .iter()
                .map(|checkpoint| CheckpointSummary {
                    height: checkpoint.height,
                    hash: hash256_to_hex(&checkpoint.hash),
                })
                .collect(),
            deployments: consensus
                .deployments
                .iter()
                .map(|(pos, deployment)| DeploymentSummary {
                    name: pos.name(),
                    bit: deployment.bit,
                    start_time: deployment.start_time,
                    timeout: deployment.timeout,
                    window_size: deployment.window_size,
                    threshold: deployment.threshold,
                })
                .collect(),
            pow_limit: hash256_to_hex(&consensus.pow_limit),
            pow_target_spacing: consensus.pow_target_spacing,
            difficulty_adjustment_interval: consensus.difficulty_adjustment_interval(),
            subsidy_halving_interval: consensus.subsidy_halving_interval,
            minimum_chain_work: hash256_to_hex(&consensus.minimum_chain_work),
            max_tip_age: params.max_tip_age,
            require_standard: params.require_standard,
            mine_blocks_on_demand: params.mine_blocks_on_demand,
        }
    }
}
