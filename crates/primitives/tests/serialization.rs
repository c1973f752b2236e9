use geekd_consensus::Hash256;
use geekd_primitives::block::{Block, BlockHeader, HEADER_SIZE};
use geekd_primitives::outpoint::OutPoint;
use geekd_primitives::script::{pay_to_pubkey, push_data, push_int, push_script_num, OP_CHECKSIG};
use geekd_primitives::transaction::{Transaction, TxIn, TxOut, SEQUENCE_FINAL};

fn seq_hash(start: u8) -> Hash256 {
    std::array::from_fn(|i| start.wrapping_add(i as u8))
}

fn push_hash_le(buffer: &mut Vec<u8>, start: u8) {
    for byte in 0u8..=0x1f {
        buffer.push(start.wrapping_add(byte));
    }
}

fn coinbase_tx() -> Transaction {
    let mut script_sig = Vec::new();
    push_int(&mut script_sig, 486_604_799);
    push_script_num(&mut script_sig, 4);
    push_data(&mut script_sig, b"stamp");
    Transaction {
        version: 1,
        vin: vec![TxIn::coinbase(script_sig)],
        vout: vec![TxOut {
            value: 50 * 100_000_000,
            script_pubkey: pay_to_pubkey(&[0x04; 65]),
        }],
        lock_time: 0,
    }
}

#[test]
fn serialize_block_header() {
    let header = BlockHeader {
        version: 1,
        prev_block: seq_hash(0x00),
        merkle_root: seq_hash(0x20),
        time: 0x01020304,
        bits: 0x1e0ffff0,
        nonce: 0x0a0b0c0d,
    };

    let encoded = header.consensus_encode();
    let mut expected = Vec::new();
    expected.extend_from_slice(&1i32.to_le_bytes());
    push_hash_le(&mut expected, 0x00);
    push_hash_le(&mut expected, 0x20);
    expected.extend_from_slice(&0x01020304u32.to_le_bytes());
    expected.extend_from_slice(&0x1e0ffff0u32.to_le_bytes());
    expected.extend_from_slice(&0x0a0b0c0du32.to_le_bytes());

    assert_eq!(encoded.len(), HEADER_SIZE);
    assert_eq!(encoded, expected);
}

#[test]
fn header_hash_is_x11_of_encoding() {
    let header = BlockHeader {
        version: 1,
        prev_block: [0u8; 32],
        merkle_root: [0u8; 32],
        time: 0,
        bits: 0x207fffff,
        nonce: 0,
    };
    let mut bumped = header.clone();
    bumped.nonce = 1;
    assert_ne!(header.hash(), bumped.hash());
    assert_eq!(header.hash(), geekd_primitives::x11(&header.consensus_encode()));
}

#[test]
fn serialize_coinbase_transaction() {
    let tx = coinbase_tx();
    let encoded = tx.consensus_encode();

    let mut expected = Vec::new();
    expected.extend_from_slice(&1i32.to_le_bytes());
    expected.push(1);
    expected.extend_from_slice(&[0u8; 32]);
    expected.extend_from_slice(&u32::MAX.to_le_bytes());
    let script_sig = [
        &[0x04, 0xff, 0xff, 0x00, 0x1d][..],
        &[0x01, 0x04][..],
        &[0x05][..],
        &b"stamp"[..],
    ]
    .concat();
    expected.push(script_sig.len() as u8);
    expected.extend_from_slice(&script_sig);
    expected.extend_from_slice(&SEQUENCE_FINAL.to_le_bytes());
    expected.push(1);
    expected.extend_from_slice(&5_000_000_000i64.to_le_bytes());
    expected.push(67);
    expected.push(65);
    expected.extend_from_slice(&[0x04; 65]);
    expected.push(OP_CHECKSIG);
    expected.extend_from_slice(&0u32.to_le_bytes());

    assert_eq!(encoded, expected);
    assert!(tx.is_coinbase());
    assert_eq!(tx.vin[0].prevout, OutPoint::null());
}

#[test]
fn block_encoding_appends_transaction_list() {
    let tx = coinbase_tx();
    let block = Block {
        header: BlockHeader {
            version: 1,
            prev_block: [0u8; 32],
            merkle_root: tx.txid(),
            time: 1,
            bits: 0x207fffff,
            nonce: 2,
        },
        transactions: vec![tx.clone()],
    };

    assert_eq!(block.compute_merkle_root(), block.header.merkle_root);

    let encoded = block.consensus_encode();
    assert_eq!(&encoded[..HEADER_SIZE], block.header.consensus_encode().as_slice());
    assert_eq!(encoded[HEADER_SIZE], 1);
    assert_eq!(&encoded[HEADER_SIZE + 1..], tx.consensus_encode().as_slice());
    assert_ne!(block.hash(), tx.txid());
}
