use geekd_chainparams::{ParamsError, Registry};
use geekd_consensus::{Base58Type, Network, ALL_NETWORKS};

#[test]
fn active_is_the_same_object_as_params_for() {
    for network in ALL_NETWORKS {
        let mut registry = Registry::new().expect("registry");
        registry.select_network(network.id()).expect("select");
        let active = registry.active();
        let by_id = registry.params_for(network.id()).expect("params_for");
        assert!(std::ptr::eq(active, by_id));
        assert_eq!(active.network, network);
    }
}

#[test]
#[should_panic(expected = "before a network was selected")]
fn active_before_selection_panics() {
    let registry = Registry::new().expect("registry");
    let _ = registry.active();
}

#[test]
fn unknown_network_is_rejected() {
    let registry = Registry::new().expect("registry");
    assert_eq!(
        registry.params_for("mainnetX").unwrap_err(),
        ParamsError::UnknownNetwork("mainnetX".to_string())
    );
    assert_eq!(
        registry.params_for("mainnetX").unwrap_err().to_string(),
        "unknown chain mainnetX"
    );
}

#[test]
fn base58_prefixes_differ_between_main_and_test_networks() {
    let registry = Registry::new().expect("registry");
    let main = registry.params(Network::Mainnet);
    for other in [Network::Testnet, Network::Regtest] {
        let other = registry.params(other);
        assert_ne!(
            main.base58_prefix(Base58Type::PubkeyAddress),
            other.base58_prefix(Base58Type::PubkeyAddress)
        );
        assert_ne!(
            main.base58_prefix(Base58Type::SecretKey),
            other.base58_prefix(Base58Type::SecretKey)
        );
        assert_ne!(
            main.base58_prefix(Base58Type::ExtPublicKey),
            other.base58_prefix(Base58Type::ExtPublicKey)
        );
    }
}

#[test]
fn checkpoints_strictly_increase() {
    let registry = Registry::new().expect("registry");
    for params in registry.iter() {
        let heights: Vec<i32> = params
            .checkpoints
            .checkpoints
            .iter()
            .map(|checkpoint| checkpoint.height)
            .collect();
        assert_eq!(heights.first(), Some(&0), "{}", params.id());
        assert!(
            heights.windows(2).all(|pair| pair[0] < pair[1]),
            "{}: {heights:?}",
            params.id()
        );
    }
}

#[test]
fn deployment_bits_are_distinct_within_each_network() {
    let registry = Registry::new().expect("registry");
    for params in registry.iter() {
        let mut bits: Vec<u8> = params
            .consensus
            .deployments
            .iter()
            .map(|(_, deployment)| deployment.bit)
            .collect();
        bits.sort_unstable();
        bits.dedup();
        assert_eq!(bits.len(), 3, "{}", params.id());
    }
}

#[test]
fn network_identity_fields() {
    let registry = Registry::new().expect("registry");
    let main = registry.params(Network::Mainnet);
    assert_eq!(main.message_start, [0xb8, 0x6c, 0x6b, 0xb8]);
    assert_eq!(main.default_port, 6_889);
    assert_eq!(main.dns_seeds.len(), 50);
    assert!(main.fixed_seeds.is_empty());
    assert_eq!(main.bip44_coin_type, 5);

    let test = registry.params(Network::Testnet);
    assert_eq!(test.default_port, 16_889);
    assert_eq!(test.max_tip_age, 0x7fff_ffff);
    assert_eq!(test.spork_pubkey, main.spork_pubkey);
    assert_ne!(test.alert_pubkey, main.alert_pubkey);

    let regtest = registry.params(Network::Regtest);
    assert_eq!(regtest.message_start, [0xfc, 0xc1, 0xb7, 0xdc]);
    assert_eq!(regtest.default_port, 19_994);
    assert_eq!(regtest.delay_get_headers_time, 0);
}

#[test]
fn params_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<geekd_chainparams::ChainParams>();
    assert_send_sync::<Registry>();
}
