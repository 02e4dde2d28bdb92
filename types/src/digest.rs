//! 48-byte Blake2b-384 digests for attested transactions and merkle roots.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::hex_bytes;
use crate::TypesError;

/// Width of a digest in bytes.
pub const DIGEST_LEN: usize = 48;

/// A 48-byte digest.
///
/// Transaction hashes and merkle roots share this representation. Ordering is
/// lexicographic over the bytes, i.e. big-endian numeric order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Digest(#[serde(with = "hex_bytes::serde_hex")] [u8; DIGEST_LEN]);

impl Default for Digest {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Digest {
    pub const ZERO: Self = Self([0u8; DIGEST_LEN]);

    pub fn new(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Build a digest from a slice, failing unless it is exactly 48 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, TypesError> {
        let arr: [u8; DIGEST_LEN] =
            bytes
                .try_into()
                .map_err(|_| TypesError::InvalidLength {
                    expected: DIGEST_LEN,
                    actual: bytes.len(),
                })?;
        Ok(Self(arr))
    }

    /// Parse a hex string in either case.
    pub fn from_hex(s: &str) -> Result<Self, TypesError> {
        hex_bytes::decode(s).map(Self)
    }

    /// Upper-case hex encoding.
    pub fn to_hex(&self) -> String {
        hex_bytes::encode(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; DIGEST_LEN]
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({}\u{2026})", hex_bytes::encode(&self.0[..4]))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Digest {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}
