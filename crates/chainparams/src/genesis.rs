//! Genesis block construction and verification.
//!
//! Every network shares the same coinbase: the timestamp headline in the
//! script signature and a single pay-to-pubkey output. Only the header fields
//! differ, so the Merkle root is the same on all three chains.

use geekd_consensus::money::{Amount, COIN};
use geekd_consensus::{Hash256, Network};
use geekd_pow::check_target;
use geekd_primitives::block::{Block, BlockHeader};
use geekd_primitives::script::{pay_to_pubkey, push_data, push_int, push_script_num};
use geekd_primitives::transaction::{Transaction, TxIn, TxOut};

use crate::error::ParamsError;

pub const GENESIS_TIMESTAMP: &str = "GeekCash - Don't work for weekends, work for our goals.";

pub const GENESIS_OUTPUT_PUBKEY: &str = "04716b72451310faf205414ebb80650e286573e6554a290a1280d1955d772c6ea602d033f1f76fbd099bacba8156af85428a0197c0a3d6f0a79f8bb575c4c16751";

pub const GENESIS_REWARD: Amount = 50 * COIN;

pub const GENESIS_MERKLE_ROOT: &str =
    "6d87016979d2f369dcb5fc3a5c284be1a316790cbaabfcce403d24da4b49b210";

/// Leading number pushed into the coinbase script signature: 0x1d00ffff, the
/// compact difficulty-1 target.
const COINBASE_SCRIPT_PREFIX: i64 = 486_604_799;
const COINBASE_SCRIPT_EXTRA: i64 = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenesisSpec {
    pub timestamp: &'static str,
    pub output_script: Vec<u8>,
    pub time: u32,
    pub nonce: u32,
    pub bits: u32,
    pub version: i32,
    pub reward: Amount,
}

impl GenesisSpec {
    /// The shared coinbase with per-network header fields.
    pub fn standard(pubkey: &[u8], time: u32, nonce: u32, bits: u32) -> Self {
        Self {
            timestamp: GENESIS_TIMESTAMP,
            output_script: pay_to_pubkey(pubkey),
            time,
            nonce,
            bits,
            version: 1,
            reward: GENESIS_REWARD,
        }
    }
}

pub fn coinbase_script_sig(timestamp: &str) -> Vec<u8> {
    let mut script = Vec::with_capacity(timestamp.len() + 8);
    push_int(&mut script, COINBASE_SCRIPT_PREFIX);
    push_script_num(&mut script, COINBASE_SCRIPT_EXTRA);
    push_data(&mut script, timestamp.as_bytes());
    script
}

pub fn build_genesis(spec: &GenesisSpec) -> Block {
    let coinbase = Transaction {
        version: 1,
        vin: vec![TxIn::coinbase(coinbase_script_sig(spec.timestamp))],
        vout: vec![TxOut {
            value: spec.reward,
            script_pubkey: spec.output_script.clone(),
        }],
        lock_time: 0,
    };

    let header = BlockHeader {
        version: spec.version,
        prev_block: [0u8; 32],
        merkle_root: coinbase.txid(),
        time: spec.time,
        bits: spec.bits,
        nonce: spec.nonce,
    };

    Block {
        header,
        transactions: vec![coinbase],
    }
}

/// Recomputes the genesis identity from its contents and checks it against
/// the hard-coded values. The header bits must decode to a target within
/// `pow_limit`. The hash itself is not compared to that target: the regtest
/// genesis hash lies above it.
pub fn verify_genesis(
    network: Network,
    block: &Block,
    expected_hash: &Hash256,
    expected_merkle_root: &Hash256,
    pow_limit: &Hash256,
) -> Result<(), ParamsError> {
    let merkle_root = block.compute_merkle_root();
    if merkle_root != block.header.merkle_root || &merkle_root != expected_merkle_root {
        return Err(ParamsError::GenesisMerkleRootMismatch {
            network,
            expected: *expected_merkle_root,
            actual: merkle_root,
        });
    }

    let hash = block.hash();
    if &hash != expected_hash {
        return Err(ParamsError::GenesisHashMismatch {
            network,
            expected: *expected_hash,
            actual: hash,
        });
    }

    check_target(block.header.bits, pow_limit)
        .map(|_| ())
        .map_err(|error| ParamsError::GenesisTarget { network, error })
}
