//! Transaction types and serialization.

use geekd_consensus::money::Amount;
use geekd_consensus::Hash256;

use crate::encoding::{Encodable, Encoder};
use crate::hash::sha256d;
use crate::outpoint::OutPoint;

pub const SEQUENCE_FINAL: u32 = u32::MAX;

#[derive(Clone, Debug, PartialEq)]
pub struct TxIn {
    pub prevout: OutPoint,
    pub script_sig: Vec<u8>,
    pub sequence: u32,
}

impl TxIn {
    pub fn coinbase(script_sig: Vec<u8>) -> Self {
        Self {
            prevout: OutPoint::null(),
            script_sig,
            sequence: SEQUENCE_FINAL,
        }
    }
}

impl Encodable for TxIn {
    fn consensus_encode(&self, encoder: &mut Encoder) {
        self.prevout.consensus_encode(encoder);
        encoder.write_var_bytes(&self.script_sig);
        encoder.write_u32_le(self.sequence);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TxOut {
    pub value: Amount,
    pub script_pubkey: Vec<u8>,
}

impl Encodable for TxOut {
    fn consensus_encode(&self, encoder: &mut Encoder) {
        encoder.write_i64_le(self.value);
        encoder.write_var_bytes(&self.script_pubkey);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    pub version: i32,
    pub vin: Vec<TxIn>,
    pub vout: Vec<TxOut>,
    pub lock_time: u32,
}

impl Transaction {
    pub fn is_coinbase(&self) -> bool {
        self.vin.len() == 1 && self.vin[0].prevout.is_null()
    }

    pub fn value_out(&self) -> Amount {
        self.vout.iter().map(|output| output.value).sum()
    }

    pub fn consensus_encode(&self) -> Vec<u8> {
        let mut encoder = Encoder::new();
        Encodable::consensus_encode(self, &mut encoder);
        encoder.into_inner()
    }

    pub fn txid(&self) -> Hash256 {
        sha256d(&self.consensus_encode())
    }
}

impl Encodable for Transaction {
    fn consensus_encode(&self, encoder: &mut Encoder) {
        encoder.write_i32_le(self.version);
        encoder.write_list(&self.vin);
        encoder.write_list(&self.vout);
        encoder.write_u32_le(self.lock_time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coinbase_input_has_null_prevout() {
        let tx = Transaction {
            version: 1,
            vin: vec![TxIn::coinbase(vec![0x51])],
            vout: vec![TxOut {
                value: 7,
                script_pubkey: vec![0x51],
            }],
            lock_time: 0,
        };
        assert!(tx.is_coinbase());
        assert_eq!(tx.vin[0].sequence, SEQUENCE_FINAL);
        assert_eq!(tx.value_out(), 7);
    }

    #[test]
    fn spending_input_is_not_coinbase() {
        let tx = Transaction {
            version: 1,
            vin: vec![TxIn {
                prevout: OutPoint {
                    hash: [0x01; 32],
                    index: 0,
                },
                script_sig: Vec::new(),
                sequence: SEQUENCE_FINAL,
            }],
            vout: Vec::new(),
            lock_time: 0,
        };
        assert!(!tx.is_coinbase());
    }
}
