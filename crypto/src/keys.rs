//! Deterministic BLS12-381 holder keys.
//!
//! Holders are identified by compressed min-pk public keys (48 bytes). Keys
//! derived here are for fixtures and for the fallback reward-share entry
//! carried by blocks that have no reward routing yet; they are not meant to
//! hold funds.

use blst::min_pk::SecretKey;
use blst::BLST_ERROR;
use merit_types::HolderKey;
use std::sync::OnceLock;
use thiserror::Error;

use crate::hash::blake2b_384;

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("BLS key generation failed: {0:?}")]
    KeyGen(BLST_ERROR),
}

/// Derive a holder key from an arbitrary seed.
///
/// The seed is stretched through Blake2b-384 so that short seeds still meet
/// the 32-byte minimum IKM of `KeyGen`.
pub fn holder_key_from_seed(seed: &[u8]) -> Result<HolderKey, KeyError> {
    let ikm = blake2b_384(seed);
    let secret = SecretKey::key_gen(ikm.as_bytes(), &[]).map_err(KeyError::KeyGen)?;
    Ok(HolderKey::new(secret.sk_to_pk().compress()))
}

/// The fixed key of the default reward-share entry: the key derived from the
/// single zero-byte seed.
///
/// Derivation is `blst` `KeyGen` over `Blake2b-384([0])`. This differs from
/// libraries that seed the secret key directly (e.g. `PrivateKey::from_seed`
/// over `[0]`), so a default block body's miner bytes only match peers that
/// derive the key the same way.
pub fn default_miner_key() -> HolderKey {
    static KEY: OnceLock<HolderKey> = OnceLock::new();
    *KEY.get_or_init(|| {
        // 48 bytes of IKM satisfy KeyGen's only failure condition.
        holder_key_from_seed(&[0]).expect("key_gen accepts 48-byte IKM")
    })
}
