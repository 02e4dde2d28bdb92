//! Consensus elements as seen by the epoch engine.
//!
//! Elements are owned by the consensus store. The engine only reads them back
//! by `(holder, nonce)` and cares about one kind: verifications, which name the
//! transaction a holder attested.

use serde::{Deserialize, Serialize};

use crate::{Digest, HolderKey};

/// The kind-specific payload of an element.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementKind {
    /// The holder attests that the transaction `hash` is valid.
    Verification { hash: Digest },
    /// The holder votes for a new send difficulty.
    SendDifficulty { difficulty: Digest },
    /// The holder votes for a new data difficulty.
    DataDifficulty { difficulty: Digest },
}

impl ElementKind {
    /// Serialization prefix byte for this kind.
    pub fn prefix(&self) -> u8 {
        match self {
            Self::Verification { .. } => 0,
            Self::SendDifficulty { .. } => 2,
            Self::DataDifficulty { .. } => 3,
        }
    }

    fn payload(&self) -> &Digest {
        match self {
            Self::Verification { hash } => hash,
            Self::SendDifficulty { difficulty } | Self::DataDifficulty { difficulty } => difficulty,
        }
    }
}

/// A holder's consensus element at a given nonce.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub holder: HolderKey,
    pub nonce: u32,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    pub fn new(holder: HolderKey, nonce: u32, kind: ElementKind) -> Self {
        Self {
            holder,
            nonce,
            kind,
        }
    }

    pub fn verification(holder: HolderKey, nonce: u32, hash: Digest) -> Self {
        Self::new(holder, nonce, ElementKind::Verification { hash })
    }

    /// The attested transaction, if this element is a verification.
    pub fn verified_hash(&self) -> Option<&Digest> {
        match &self.kind {
            ElementKind::Verification { hash } => Some(hash),
            _ => None,
        }
    }

    /// Canonical content bytes: `prefix | nonce (u32 BE) | payload`.
    ///
    /// The holder is omitted; it is implied by the chain the element lives in.
    pub fn content_bytes(&self) -> Vec<u8> {
        let payload = self.kind.payload();
        let mut out = Vec::with_capacity(1 + 4 + payload.as_bytes().len());
        out.push(self.kind.prefix());
        out.extend_from_slice(&self.nonce.to_be_bytes());
        out.extend_from_slice(payload.as_bytes());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DIGEST_LEN, HOLDER_KEY_LEN};

    fn holder() -> HolderKey {
        HolderKey::new([9; HOLDER_KEY_LEN])
    }

    #[test]
    fn verified_hash_only_for_verifications() {
        let hash = Digest::new([1; DIGEST_LEN]);
        let v = Element::verification(holder(), 0, hash);
        assert_eq!(v.verified_hash(), Some(&hash));

        let d = Element::new(
            holder(),
            1,
            ElementKind::SendDifficulty {
                difficulty: Digest::new([2; DIGEST_LEN]),
            },
        );
        assert_eq!(d.verified_hash(), None);
    }

    #[test]
    fn content_bytes_layout() {
        let v = Element::verification(holder(), 0x0102_0304, Digest::new([5; DIGEST_LEN]));
        let bytes = v.content_bytes();
        assert_eq!(bytes.len(), 1 + 4 + DIGEST_LEN);
        assert_eq!(bytes[0], 0);
        assert_eq!(&bytes[1..5], &[1, 2, 3, 4]);
        assert!(bytes[5..].iter().all(|b| *b == 5));
    }

    #[test]
    fn json_is_tagged_by_kind() {
        let e = Element::new(
            holder(),
            3,
            ElementKind::DataDifficulty {
                difficulty: Digest::new([0xee; DIGEST_LEN]),
            },
        );
        let value = serde_json::to_value(&e).unwrap();
        assert_eq!(value["kind"], "data_difficulty");
        assert_eq!(value["nonce"], 3);
        let back: Element = serde_json::from_value(value).unwrap();
        assert_eq!(back, e);
    }
}
