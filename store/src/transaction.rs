//! Transaction verification-status trait.

use crate::StoreError;
use merit_types::Digest;

/// Read access to the transaction pool's verification flag.
pub trait TransactionStore {
    /// Whether the transaction has been verified. Unknown transactions are
    /// reported as unverified.
    fn is_verified(&self, hash: &Digest) -> Result<bool, StoreError>;
}
