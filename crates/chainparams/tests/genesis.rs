use geekd_chainparams::genesis::GENESIS_REWARD;
use geekd_chainparams::{chain_params, Registry};
use geekd_consensus::money::COIN;
use geekd_consensus::{hash256_to_hex, Network};

const MERKLE_ROOT: &str = "6d87016979d2f369dcb5fc3a5c284be1a316790cbaabfcce403d24da4b49b210";

const MAINNET_GENESIS: &str = "000007de1b1fb05d656af7b75b398efff9e9562ab73047750394527f0f239e62";
const TESTNET_GENESIS: &str = "0000012534fc6859842d91daca14a8bb8254ae4d061debf3cb5ea8dcbcdbbea9";
const REGTEST_GENESIS: &str = "ae02dbb3cfa4ff51e21a6291e3489b8d63c9d5e3353a1fa8dc6bd4381b38e946";

fn assert_genesis(network: Network, hash: &str, time: u32, nonce: u32, bits: u32) {
    let params = chain_params(network).expect("chain params");
    let header = &params.genesis.header;
    assert_eq!(hash256_to_hex(&params.genesis.hash()), hash, "{network}");
    assert_eq!(hash256_to_hex(&header.merkle_root), MERKLE_ROOT, "{network}");
    assert_eq!(header.time, time, "{network}");
    assert_eq!(header.nonce, nonce, "{network}");
    assert_eq!(header.bits, bits, "{network}");
}

#[test]
fn mainnet_genesis_is_golden() {
    assert_genesis(Network::Mainnet, MAINNET_GENESIS, 1_525_796_559, 617_415, 0x1e0ffff0);
}

#[test]
fn testnet_genesis_is_golden() {
    assert_genesis(Network::Testnet, TESTNET_GENESIS, 1_523_521_813, 325_703, 0x1e0ffff0);
}

#[test]
fn regtest_genesis_is_golden() {
    assert_genesis(Network::Regtest, REGTEST_GENESIS, 1_518_686_868, 1_096_447, 0x207fffff);
}

#[test]
fn regtest_genesis_hash_lies_above_its_target() {
    let params = chain_params(Network::Regtest).expect("regtest");
    let target = "7fffff0000000000000000000000000000000000000000000000000000000000";
    assert!(hash256_to_hex(&params.genesis.hash()).as_str() > target);
}

#[test]
fn genesis_pins_bip34_assume_valid_and_first_checkpoint() {
    for (network, hash) in [
        (Network::Mainnet, MAINNET_GENESIS),
        (Network::Testnet, TESTNET_GENESIS),
    ] {
        let params = chain_params(network).expect("chain params");
        assert_eq!(hash256_to_hex(&params.consensus.bip34_hash), hash, "{network}");
        assert_eq!(
            hash256_to_hex(&params.consensus.default_assume_valid),
            hash,
            "{network}"
        );
        let first = params.checkpoints.lookup(0).expect("genesis checkpoint");
        assert_eq!(hash256_to_hex(first), hash, "{network}");
    }
}

#[test]
fn regtest_genesis_structure() {
    let params = chain_params(Network::Regtest).expect("regtest");
    let genesis = &params.genesis;
    assert_eq!(genesis.header.prev_block, [0u8; 32]);
    assert_eq!(genesis.header.version, 1);
    assert_eq!(genesis.transactions.len(), 1);

    let coinbase = &genesis.transactions[0];
    assert!(coinbase.is_coinbase());
    assert_eq!(coinbase.vin.len(), 1);
    assert_eq!(coinbase.vout.len(), 1);
    assert_eq!(coinbase.vout[0].value, 50 * COIN);
    assert_eq!(coinbase.vout[0].value, GENESIS_REWARD);
    assert_eq!(coinbase.lock_time, 0);
}

#[test]
fn genesis_hash_matches_consensus_record() {
    let registry = Registry::new().expect("registry");
    for params in registry.iter() {
        assert_eq!(params.genesis.hash(), params.consensus.hash_genesis_block);
        assert_eq!(params.genesis.hash(), params.genesis_hash());
    }
}

#[test]
fn genesis_encodes_to_expected_size() {
    let params = chain_params(Network::Mainnet).expect("mainnet");
    // 80-byte header, one-byte tx count, 190-byte coinbase.
    assert_eq!(params.genesis.consensus_encode().len(), 80 + 1 + 190);
}
