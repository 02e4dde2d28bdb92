//! Consensus-element lookup trait.

use crate::StoreError;
use merit_types::{Element, HolderKey};

/// Read access to each holder's chain of consensus elements.
///
/// Nonces start at 0 and are dense: a store that returns an element for nonce
/// `n` is expected to hold every nonce below `n` as well.
pub trait ElementStore {
    /// The element a holder created at `nonce`, or `None` if there is none.
    fn element(&self, holder: &HolderKey, nonce: u32) -> Result<Option<Element>, StoreError>;
}
