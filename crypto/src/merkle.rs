//! Binary merkle roots over 48-byte digests.
//!
//! Odd levels duplicate their last node. A single leaf is its own root and the
//! empty set roots to [`Digest::ZERO`].

use merit_types::{Digest, Element};

use crate::hash::{blake2b_384_multi, hash_element};

pub fn merkle_root(leaves: &[Digest]) -> Digest {
    if leaves.is_empty() {
        return Digest::ZERO;
    }

    let mut level: Vec<Digest> = leaves.to_vec();
    while level.len() > 1 {
        if level.len() % 2 == 1 {
            let last = level[level.len() - 1];
            level.push(last);
        }
        level = level
            .chunks_exact(2)
            .map(|pair| blake2b_384_multi(&[pair[0].as_bytes(), pair[1].as_bytes()]))
            .collect();
    }
    level[0]
}

/// Merkle root of the digests of `elements`, in the given order.
pub fn merkle_root_of_elements(elements: &[Element]) -> Digest {
    let leaves: Vec<Digest> = elements.iter().map(hash_element).collect();
    merkle_root(&leaves)
}
