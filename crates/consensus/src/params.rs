//! Consensus parameter definitions.

use crate::deployments::{Deployment, Deployments};
use crate::hash::{hash256_from_hex, Hash256};
use crate::network::Network;

pub const GENESIS_HASH_MAINNET: &str =
    "000007de1b1fb05d656af7b75b398efff9e9562ab73047750394527f0f239e62";
pub const GENESIS_HASH_TESTNET: &str =
    "0000012534fc6859842d91daca14a8bb8254ae4d061debf3cb5ea8dcbcdbbea9";
pub const GENESIS_HASH_REGTEST: &str =
    "ae02dbb3cfa4ff51e21a6291e3489b8d63c9d5e3353a1fa8dc6bd4381b38e946";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MasternodeParams {
    pub payments_start_block: i32,
    pub payments_increase_block: i32,
    pub payments_increase_period: i32,
    pub minimum_confirmations: i32,
    pub instant_send_keep_lock: i32,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BudgetParams {
    pub payments_start_block: i32,
    pub payments_cycle_blocks: i32,
    pub payments_window_blocks: i32,
    /// Seconds a proposal must exist before it can be funded.
    pub proposal_establishing_time: i64,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GovernanceParams {
    pub superblock_start_block: i32,
    pub superblock_cycle: i32,
    pub min_quorum: i32,
    pub filter_elements: i32,
}

#[derive(Clone, Debug)]
pub struct ConsensusParams {
    pub network: Network,
    pub hash_genesis_block: Hash256,
    pub subsidy_halving_interval: i32,
    pub masternode: MasternodeParams,
    pub budget: BudgetParams,
    pub governance: GovernanceParams,
    pub majority_enforce_block_upgrade: i32,
    pub majority_reject_block_outdated: i32,
    pub majority_window: i32,
    /// -1 when BIP34 is not guaranteed active.
    pub bip34_height: i32,
    pub bip34_hash: Hash256,
    pub pow_limit: Hash256,
    pub pow_target_timespan: i64,
    pub pow_target_spacing: i64,
    pub pow_allow_min_difficulty_blocks: bool,
    pub pow_no_retargeting: bool,
    /// KimotoGravityWell retargeting starts here. A value at or above
    /// `pow_dgw_height` means KGW never runs.
    pub pow_kgw_height: i32,
    /// DarkGravityWave retargeting starts here.
    pub pow_dgw_height: i32,
    pub rule_change_activation_threshold: u32,
    pub miner_confirmation_window: u32,
    pub deployments: Deployments,
    pub minimum_chain_work: Hash256,
    pub default_assume_valid: Hash256,
}

impl ConsensusParams {
    pub fn difficulty_adjustment_interval(&self) -> i64 {
        self.pow_target_timespan / self.pow_target_spacing
    }

    pub fn uses_kgw(&self) -> bool {
        self.pow_kgw_height < self.pow_dgw_height
    }
}

pub fn consensus_params(network: Network) -> ConsensusParams {
    match network {
        Network::Mainnet => mainnet_consensus_params(),
        Network::Testnet => testnet_consensus_params(),
        Network::Regtest => regtest_consensus_params(),
    }
}

fn mainnet_consensus_params() -> ConsensusParams {
    let miner_confirmation_window = 3_600;
    let rule_change_activation_threshold = 3_240; // 90%
    let deployments = Deployments::new([
        Deployment {
            bit: 28,
            start_time: 1_199_145_601, // January 1, 2008
            timeout: 1_230_767_999,    // December 31, 2008
            window_size: miner_confirmation_window,
            threshold: rule_change_activation_threshold,
        },
        // BIP68, BIP112, BIP113
        Deployment {
            bit: 0,
            start_time: 1_486_252_800, // Feb 5th, 2017
            timeout: 1_517_788_800,    // Feb 5th, 2018
            window_size: miner_confirmation_window,
            threshold: rule_change_activation_threshold,
        },
        Deployment {
            bit: 1,
            start_time: 1_508_025_600, // Oct 15th, 2017
            timeout: 1_539_561_600,    // Oct 15th, 2018
            window_size: 4_032,
            threshold: 3_226, // 80% of 4032
        },
    ]);

    ConsensusParams {
        network: Network::Mainnet,
        hash_genesis_block: hash256_from_hex(GENESIS_HASH_MAINNET).expect("mainnet genesis hash"),
        subsidy_halving_interval: 262_800,
        masternode: MasternodeParams {
            payments_start_block: 180_000,
            payments_increase_block: 158_000,
            payments_increase_period: 576 * 30,
            minimum_confirmations: 15,
            instant_send_keep_lock: 24,
        },
        budget: BudgetParams {
            payments_start_block: 300_000,
            payments_cycle_blocks: 43_200,
            payments_window_blocks: 100,
            proposal_establishing_time: 60 * 60 * 24 * 7,
        },
        governance: GovernanceParams {
            superblock_start_block: 614_820,
            superblock_cycle: 43_200,
            min_quorum: 10,
            filter_elements: 20_000,
        },
        majority_enforce_block_upgrade: 750,
        majority_reject_block_outdated: 950,
        majority_window: 1_000,
        bip34_height: 1,
        bip34_hash: hash256_from_hex(GENESIS_HASH_MAINNET).expect("mainnet bip34 hash"),
        pow_limit: hash256_from_hex(
            "00000fffff000000000000000000000000000000000000000000000000000000",
        )
        .expect("mainnet pow limit"),
        pow_target_timespan: 60 * 60,
        pow_target_spacing: 60,
        pow_allow_min_difficulty_blocks: false,
        pow_no_retargeting: false,
        pow_kgw_height: 1,
        pow_dgw_height: 1,
        rule_change_activation_threshold,
        miner_confirmation_window,
        deployments,
        minimum_chain_work: hash256_from_hex(
            "000000000000000000000000000000000000000000000000002c51c8e4beb570",
        )
        .expect("mainnet minimum chain work"),
        default_assume_valid: hash256_from_hex(GENESIS_HASH_MAINNET)
            .expect("mainnet assume valid"),
    }
}

fn testnet_consensus_params() -> ConsensusParams {
    let miner_confirmation_window = 2_016;
    let rule_change_activation_threshold = 1_512; // 75%
    let deployments = Deployments::new([
        Deployment {
            bit: 28,
            start_time: 1_199_145_601, // January 1, 2008
            timeout: 1_230_767_999,    // December 31, 2008
            window_size: miner_confirmation_window,
            threshold: rule_change_activation_threshold,
        },
        Deployment {
            bit: 0,
            start_time: 1_506_556_800, // September 28th, 2017
            timeout: 1_538_092_800,    // September 28th, 2018
            window_size: miner_confirmation_window,
            threshold: rule_change_activation_threshold,
        },
        Deployment {
            bit: 1,
            start_time: 1_505_692_800, // Sep 18th, 2017
            timeout: 1_537_228_800,    // Sep 18th, 2018
            window_size: 100,
            threshold: 50,
        },
    ]);

    ConsensusParams {
        network: Network::Testnet,
        hash_genesis_block: hash256_from_hex(GENESIS_HASH_TESTNET).expect("testnet genesis hash"),
        subsidy_halving_interval: 210_240,
        masternode: MasternodeParams {
            payments_start_block: 4_010,
            payments_increase_block: 4_030,
            payments_increase_period: 10,
            minimum_confirmations: 1,
            instant_send_keep_lock: 6,
        },
        budget: BudgetParams {
            payments_start_block: 4_100,
            payments_cycle_blocks: 50,
            payments_window_blocks: 10,
            proposal_establishing_time: 60 * 20,
        },
        governance: GovernanceParams {
            // Must stay above the budget payments start block.
            superblock_start_block: 4_200,
            superblock_cycle: 24,
            min_quorum: 1,
            filter_elements: 500,
        },
        majority_enforce_block_upgrade: 51,
        majority_reject_block_outdated: 75,
        majority_window: 100,
        bip34_height: 1,
        bip34_hash: hash256_from_hex(GENESIS_HASH_TESTNET).expect("testnet bip34 hash"),
        pow_limit: hash256_from_hex(
            "00000fffff000000000000000000000000000000000000000000000000000000",
        )
        .expect("testnet pow limit"),
        pow_target_timespan: 60 * 60,
        pow_target_spacing: 60,
        pow_allow_min_difficulty_blocks: true,
        pow_no_retargeting: false,
        pow_kgw_height: 4_001,
        pow_dgw_height: 4_001,
        rule_change_activation_threshold,
        miner_confirmation_window,
        deployments,
        minimum_chain_work: hash256_from_hex(
            "0000000000000000000000000000000000000000000000000000000000100010",
        )
        .expect("testnet minimum chain work"),
        default_assume_valid: hash256_from_hex(GENESIS_HASH_TESTNET)
            .expect("testnet assume valid"),
    }
}

fn regtest_consensus_params() -> ConsensusParams {
    let miner_confirmation_window = 144;
    let rule_change_activation_threshold = 108; // 75%
    let always_signaling = |bit| Deployment {
        bit,
        start_time: 0,
        timeout: 999_999_999_999,
        window_size: miner_confirmation_window,
        threshold: rule_change_activation_threshold,
    };
    let deployments =
        Deployments::new([always_signaling(28), always_signaling(0), always_signaling(1)]);

    ConsensusParams {
        network: Network::Regtest,
        hash_genesis_block: hash256_from_hex(GENESIS_HASH_REGTEST).expect("regtest genesis hash"),
        subsidy_halving_interval: 150,
        masternode: MasternodeParams {
            payments_start_block: 240,
            payments_increase_block: 350,
            payments_increase_period: 10,
            minimum_confirmations: 1,
            instant_send_keep_lock: 6,
        },
        budget: BudgetParams {
            payments_start_block: 1_000,
            payments_cycle_blocks: 50,
            payments_window_blocks: 10,
            proposal_establishing_time: 60 * 20,
        },
        governance: GovernanceParams {
            superblock_start_block: 1_500,
            superblock_cycle: 10,
            min_quorum: 1,
            filter_elements: 100,
        },
        majority_enforce_block_upgrade: 750,
        majority_reject_block_outdated: 950,
        majority_window: 1_000,
        bip34_height: -1,
        bip34_hash: [0u8; 32],
        pow_limit: hash256_from_hex(
            "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        )
        .expect("regtest pow limit"),
        pow_target_timespan: 10 * 60,
        pow_target_spacing: 60,
        pow_allow_min_difficulty_blocks: true,
        pow_no_retargeting: true,
        pow_kgw_height: 15_200,
        pow_dgw_height: 34_140,
        rule_change_activation_threshold,
        miner_confirmation_window,
        deployments,
        minimum_chain_work: hash256_from_hex("00").expect("regtest minimum chain work"),
        default_assume_valid: hash256_from_hex("00").expect("regtest assume valid"),
    }
}
