//! Per-network parameter sets.

use std::net::SocketAddr;

use geekd_consensus::{
    consensus_params, decode_hex, hash256_from_hex, Base58Prefixes, Base58Type, Checkpoint,
    CheckpointData, ConsensusParams, Hash256, Network,
};
use geekd_primitives::block::Block;

use crate::error::ParamsError;
use crate::genesis::{
    build_genesis, verify_genesis, GenesisSpec, GENESIS_MERKLE_ROOT, GENESIS_OUTPUT_PUBKEY,
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DnsSeed {
    pub name: String,
    pub host: String,
}

impl DnsSeed {
    fn new(name: &str, host: &str) -> Self {
        Self {
            name: name.to_string(),
            host: host.to_string(),
        }
    }
}

/// Everything the node needs to know about one network. Built once at
/// startup and never mutated.
#[derive(Clone, Debug)]
pub struct ChainParams {
    pub network: Network,
    pub consensus: ConsensusParams,
    pub genesis: Block,
    pub message_start: [u8; 4],
    pub default_port: u16,
    pub alert_pubkey: Option<Vec<u8>>,
    pub spork_pubkey: Option<Vec<u8>>,
    pub base58_prefixes: Base58Prefixes,
    pub bip44_coin_type: u32,
    pub dns_seeds: Vec<DnsSeed>,
    pub fixed_seeds: Vec<SocketAddr>,
    pub checkpoints: CheckpointData,
    pub mining_requires_peers: bool,
    pub default_consistency_checks: bool,
    pub require_standard: bool,
    pub mine_blocks_on_demand: bool,
    pub testnet_to_be_deprecated_field_rpc: bool,
    /// Seconds; a tip older than this means the node is still syncing.
    pub max_tip_age: i64,
    pub delay_get_headers_time: i64,
    pub prune_after_height: u64,
    pub pool_max_transactions: u32,
    /// Seconds a fulfilled network request is remembered.
    pub fulfilled_request_expire_time: i64,
}

impl ChainParams {
    pub fn id(&self) -> &'static str {
        self.network.id()
    }

    pub fn genesis_hash(&self) -> Hash256 {
        self.consensus.hash_genesis_block
    }

    pub fn base58_prefix(&self, kind: Base58Type) -> &'static [u8] {
        self.base58_prefixes.get(kind)
    }
}

const MAIN_PREFIXES: Base58Prefixes = Base58Prefixes {
    pubkey_address: &[38],
    script_address: &[19],
    secret_key: &[204],
    ext_public_key: &[0x04, 0x88, 0xB2, 0x1E],
    ext_secret_key: &[0x04, 0x88, 0xAD, 0xE4],
};

const TEST_PREFIXES: Base58Prefixes = Base58Prefixes {
    pubkey_address: &[66],
    script_address: &[76],
    secret_key: &[239],
    ext_public_key: &[0x04, 0x35, 0x87, 0xCF],
    ext_secret_key: &[0x04, 0x35, 0x83, 0x94],
};

const REGTEST_PREFIXES: Base58Prefixes = Base58Prefixes {
    pubkey_address: &[140],
    script_address: &[19],
    secret_key: &[239],
    ext_public_key: &[0x04, 0x35, 0x87, 0xCF],
    ext_secret_key: &[0x04, 0x35, 0x83, 0x94],
};

const SPORK_PUBKEY: &str = "042946f6119c7257ada82d20c6032a9468e3482d02785a1437e4271bd887b234b2fe1760f9f5a6fcac082d3254f384148a11f28e9a332f7ec0c87d01c477341e0d";

const MAIN_ALERT_PUBKEY: &str = "049a57e861057265b593ab35ab8f6e4862303b086879d6680fd203f69ceab4d0e643a8862b5ae779d8ddf37ccea3c543b8e394aa75e1df2a23eec16475beda7a07";

const TEST_ALERT_PUBKEY: &str = "04ae93efe06fc650fc894bec5d48929878fd7224db7894a6b4f3ef702ae5b38f32538777d64b9139ec547e6aef1cef3329c4174822777382c1baad0541234ab717";

struct GenesisHeader {
    time: u32,
    nonce: u32,
    bits: u32,
}

struct CheckpointTable {
    entries: &'static [(i32, &'static str)],
    last_checkpoint_time: i64,
    transactions_last_checkpoint: i64,
    transactions_per_day: f64,
}

/// Builds and verifies the parameter set for `network`. Fails if the
/// recomputed genesis block or the deployment table disagrees with the
/// hard-coded values.
pub fn chain_params(network: Network) -> Result<ChainParams, ParamsError> {
    let params = match network {
        Network::Mainnet => mainnet_params(),
        Network::Testnet => testnet_params(),
        Network::Regtest => regtest_params(),
    }?;
    params
        .consensus
        .deployments
        .validate()
        .map_err(|err| ParamsError::deployment(network, err))?;
    Ok(params)
}

fn mainnet_params() -> Result<ChainParams, ParamsError> {
    let network = Network::Mainnet;
    let consensus = consensus_params(network);
    let genesis = genesis_block(
        &consensus,
        GenesisHeader {
            time: 1_525_796_559,
            nonce: 617_415,
            bits: 0x1e0ffff0,
        },
    )?;
    let checkpoints = checkpoint_data(
        &consensus,
        CheckpointTable {
            entries: &[
                (
                    20_800,
                    "0000000009aeb38c5be87990fd7f1a38e90a641f61310000ab17fdcb973c86f3",
                ),
                (
                    46_789,
                    "0000000000412e9f847e6f1e331ccb36084946effe35386a4eeee3216d5bf079",
                ),
            ],
            last_checkpoint_time: 1_528_767_182,
            transactions_last_checkpoint: 62_493,
            transactions_per_day: 5_000.0,
        },
    )?;

    let mut dns_seeds = numbered_seeds("geekcash.org", 25);
    dns_seeds.extend(numbered_seeds("geekcash.net", 25));

    Ok(ChainParams {
        network,
        genesis,
        message_start: [0xb8, 0x6c, 0x6b, 0xb8],
        default_port: 6_889,
        alert_pubkey: Some(parse_key(network, "alert pubkey", MAIN_ALERT_PUBKEY)?),
        spork_pubkey: Some(parse_key(network, "spork pubkey", SPORK_PUBKEY)?),
        base58_prefixes: MAIN_PREFIXES,
        bip44_coin_type: 5,
        dns_seeds,
        fixed_seeds: Vec::new(),
        checkpoints,
        mining_requires_peers: true,
        default_consistency_checks: false,
        require_standard: true,
        mine_blocks_on_demand: false,
        testnet_to_be_deprecated_field_rpc: false,
        max_tip_age: 24 * 60 * 60,
        delay_get_headers_time: 24 * 60 * 60,
        prune_after_height: 100_000,
        pool_max_transactions: 3,
        fulfilled_request_expire_time: 60 * 60,
        consensus,
    })
}

fn testnet_params() -> Result<ChainParams, ParamsError> {
    let network = Network::Testnet;
    let consensus = consensus_params(network);
    let genesis = genesis_block(
        &consensus,
        GenesisHeader {
            time: 1_523_521_813,
            nonce: 325_703,
            bits: 0x1e0ffff0,
        },
    )?;
    let checkpoints = checkpoint_data(
        &consensus,
        CheckpointTable {
            entries: &[],
            last_checkpoint_time: i64::from(genesis.header.time),
            transactions_last_checkpoint: 0,
            transactions_per_day: 500.0,
        },
    )?;

    Ok(ChainParams {
        network,
        genesis,
        message_start: [0xce, 0xe2, 0xca, 0xff],
        default_port: 16_889,
        alert_pubkey: Some(parse_key(network, "alert pubkey", TEST_ALERT_PUBKEY)?),
        spork_pubkey: Some(parse_key(network, "spork pubkey", SPORK_PUBKEY)?),
        base58_prefixes: TEST_PREFIXES,
        bip44_coin_type: 1,
        dns_seeds: vec![
            DnsSeed::new("testnet.geekcash.org", "ns01.testnet.geekcash.org"),
            DnsSeed::new("testnet.geekcash.org", "ns02.testnet.geekcash.org"),
        ],
        fixed_seeds: Vec::new(),
        checkpoints,
        mining_requires_peers: true,
        default_consistency_checks: false,
        require_standard: false,
        mine_blocks_on_demand: false,
        testnet_to_be_deprecated_field_rpc: true,
        // Testnet allows mining on top of arbitrarily old blocks.
        max_tip_age: 0x7fff_ffff,
        delay_get_headers_time: 24 * 60 * 60,
        prune_after_height: 1_000,
        pool_max_transactions: 3,
        fulfilled_request_expire_time: 5 * 60,
        consensus,
    })
}

fn regtest_params() -> Result<ChainParams, ParamsError> {
    let network = Network::Regtest;
    let consensus = consensus_params(network);
    let genesis = genesis_block(
        &consensus,
        GenesisHeader {
            time: 1_518_686_868,
            nonce: 1_096_447,
            bits: 0x207fffff,
        },
    )?;
    let checkpoints = checkpoint_data(
        &consensus,
        CheckpointTable {
            entries: &[],
            last_checkpoint_time: 0,
            transactions_last_checkpoint: 0,
            transactions_per_day: 0.0,
        },
    )?;

    Ok(ChainParams {
        network,
        genesis,
        message_start: [0xfc, 0xc1, 0xb7, 0xdc],
        default_port: 19_994,
        alert_pubkey: None,
        spork_pubkey: None,
        base58_prefixes: REGTEST_PREFIXES,
        bip44_coin_type: 1,
        dns_seeds: Vec::new(),
        fixed_seeds: Vec::new(),
        checkpoints,
        mining_requires_peers: false,
        default_consistency_checks: true,
        require_standard: false,
        mine_blocks_on_demand: true,
        testnet_to_be_deprecated_field_rpc: false,
        max_tip_age: 6 * 60 * 60,
        delay_get_headers_time: 0,
        prune_after_height: 1_000,
        pool_max_transactions: 3,
        fulfilled_request_expire_time: 5 * 60,
        consensus,
    })
}

fn genesis_block(consensus: &ConsensusParams, header: GenesisHeader) -> Result<Block, ParamsError> {
    let network = consensus.network;
    let pubkey = parse_key(network, "genesis output pubkey", GENESIS_OUTPUT_PUBKEY)?;
    let spec = GenesisSpec::standard(&pubkey, header.time, header.nonce, header.bits);
    let block = build_genesis(&spec);
    let merkle_root = hash256_from_hex(GENESIS_MERKLE_ROOT).map_err(|error| {
        ParamsError::InvalidHex {
            network,
            field: "genesis merkle root",
            error,
        }
    })?;
    verify_genesis(
        network,
        &block,
        &consensus.hash_genesis_block,
        &merkle_root,
        &consensus.pow_limit,
    )?;
    Ok(block)
}

/// Height 0 always pins the verified genesis hash; later entries come from
/// the table.
fn checkpoint_data(
    consensus: &ConsensusParams,
    table: CheckpointTable,
) -> Result<CheckpointData, ParamsError> {
    let mut data = CheckpointData::parse(
        table.entries,
        table.last_checkpoint_time,
        table.transactions_last_checkpoint,
        table.transactions_per_day,
    )
    .map_err(|error| ParamsError::InvalidHex {
        network: consensus.network,
        field: "checkpoint hash",
        error,
    })?;
    data.checkpoints.insert(
        0,
        Checkpoint {
            height: 0,
            hash: consensus.hash_genesis_block,
        },
    );
    Ok(data)
}

fn parse_key(network: Network, field: &'static str, hex: &str) -> Result<Vec<u8>, ParamsError> {
    decode_hex(hex).map_err(|error| ParamsError::InvalidHex {
        network,
        field,
        error,
    })
}

fn numbered_seeds(domain: &str, count: u32) -> Vec<DnsSeed> {
    (1..=count)
        .map(|index| DnsSeed::new(domain, &format!("ns{index:02}.{domain}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_seeds_are_zero_padded() {
        let seeds = numbered_seeds("geekcash.net", 25);
        assert_eq!(seeds.len(), 25);
        assert_eq!(seeds[0].host, "ns01.geekcash.net");
        assert_eq!(seeds[24].host, "ns25.geekcash.net");
        assert!(seeds.iter().all(|seed| seed.name == "geekcash.net"));
    }

    #[test]
    fn checkpoint_table_starts_at_genesis() {
        let params = chain_params(Network::Mainnet).expect("mainnet");
        let first = params.checkpoints.checkpoints[0];
        assert_eq!(first.height, 0);
        assert_eq!(first.hash, params.genesis.hash());
        assert_eq!(params.checkpoints.total_blocks_estimate(), 46_789);
    }

    #[test]
    fn regtest_has_no_network_keys_or_seeds() {
        let params = chain_params(Network::Regtest).expect("regtest");
        assert!(params.alert_pubkey.is_none());
        assert!(params.spork_pubkey.is_none());
        assert!(params.dns_seeds.is_empty());
        assert!(params.mine_blocks_on_demand);
        assert!(!params.mining_requires_peers);
    }
}
