//! Cryptographic primitives for the merit epoch engine.
//!
//! - **Blake2b-384** for transaction, element and merkle digests
//! - **Merkle roots** over element digests, as carried by block body records
//! - **BLS12-381** (min-pk) deterministic holder keys via `blst`

pub mod hash;
pub mod keys;
pub mod merkle;

pub use hash::{blake2b_384, blake2b_384_multi, hash_element};
pub use keys::{default_miner_key, holder_key_from_seed, KeyError};
pub use merkle::{merkle_root, merkle_root_of_elements};
