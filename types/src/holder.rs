//! Merit holder identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::hex_bytes;
use crate::TypesError;

/// Width of a holder public key in bytes (compressed BLS12-381 G1 point).
pub const HOLDER_KEY_LEN: usize = 48;

/// A merit holder's public key.
///
/// The engine never interprets the key's internal structure. It is used as a
/// map key, for equality, and as a big-endian unsigned integer when breaking
/// ranking ties, which is exactly the derived `Ord`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HolderKey(#[serde(with = "hex_bytes::serde_hex")] [u8; HOLDER_KEY_LEN]);

impl HolderKey {
    pub fn new(bytes: [u8; HOLDER_KEY_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, TypesError> {
        let arr: [u8; HOLDER_KEY_LEN] =
            bytes
                .try_into()
                .map_err(|_| TypesError::InvalidLength {
                    expected: HOLDER_KEY_LEN,
                    actual: bytes.len(),
                })?;
        Ok(Self(arr))
    }

    pub fn from_hex(s: &str) -> Result<Self, TypesError> {
        hex_bytes::decode(s).map(Self)
    }

    pub fn to_hex(&self) -> String {
        hex_bytes::encode(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8; HOLDER_KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for HolderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HolderKey({}\u{2026})", hex_bytes::encode(&self.0[..4]))
    }
}

impl fmt::Display for HolderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for HolderKey {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}
