//! Block Merkle root over transaction ids.

use geekd_consensus::Hash256;

use crate::hash::sha256d_pair;

/// Computes the root of the binary hash tree over `leaves`, duplicating the
/// last node of any level with an odd count. A single leaf is its own root;
/// an empty list yields the all-zero hash.
pub fn merkle_root(leaves: &[Hash256]) -> Hash256 {
    if leaves.is_empty() {
        return [0u8; 32];
    }

    let mut level = leaves.to_vec();
    while level.len() > 1 {
        let mut next = Vec::with_capacity(level.len().div_ceil(2));
        for pair in level.chunks(2) {
            let left = &pair[0];
            let right = pair.get(1).unwrap_or(left);
            next.push(sha256d_pair(left, right));
        }
        level = next;
    }
    level[0]
}
