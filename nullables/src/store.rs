//! Nullable stores: thread-safe in-memory collaborators.

use merit_store::{ElementStore, LiveWeightStore, StoreError, TransactionStore};
use merit_types::{Digest, Element, ElementKind, HolderKey};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// An in-memory consensus-element store with dense per-holder nonces.
#[derive(Default)]
pub struct NullElementStore {
    chains: Mutex<HashMap<HolderKey, Vec<Element>>>,
}

impl NullElementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element to a holder's chain at the next free nonce.
    pub fn push(&self, holder: HolderKey, kind: ElementKind) -> Element {
        let mut chains = lock(&self.chains);
        let chain = chains.entry(holder).or_default();
        let element = Element::new(holder, chain.len() as u32, kind);
        chain.push(element.clone());
        element
    }

    /// Append a verification of `hash` and return its nonce.
    pub fn verify(&self, holder: HolderKey, hash: Digest) -> u32 {
        self.push(holder, ElementKind::Verification { hash }).nonce
    }

    /// Insert an element carrying its own nonce, which must be the holder's
    /// next free nonce.
    pub fn insert(&self, element: Element) -> Result<(), StoreError> {
        let mut chains = lock(&self.chains);
        let chain = chains.entry(element.holder).or_default();
        if element.nonce as usize != chain.len() {
            return Err(StoreError::Corruption(format!(
                "holder {} expected nonce {}, got {}",
                element.holder,
                chain.len(),
                element.nonce
            )));
        }
        chain.push(element);
        Ok(())
    }

    /// The highest nonce stored for a holder.
    pub fn tip(&self, holder: &HolderKey) -> Option<u32> {
        lock(&self.chains)
            .get(holder)
            .and_then(|chain| chain.len().checked_sub(1))
            .map(|n| n as u32)
    }

    /// Elements with nonces in `start..=end`, truncated to what is stored.
    pub fn range(&self, holder: &HolderKey, start: u32, end: u32) -> Vec<Element> {
        lock(&self.chains)
            .get(holder)
            .map(|chain| {
                chain
                    .iter()
                    .filter(|e| e.nonce >= start && e.nonce <= end)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl ElementStore for NullElementStore {
    fn element(&self, holder: &HolderKey, nonce: u32) -> Result<Option<Element>, StoreError> {
        Ok(lock(&self.chains)
            .get(holder)
            .and_then(|chain| chain.get(nonce as usize))
            .cloned())
    }
}

/// An in-memory transaction pool that only tracks verification status.
#[derive(Default)]
pub struct NullTransactions {
    verified: Mutex<HashMap<Digest, bool>>,
}

impl NullTransactions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a transaction with the given status.
    pub fn add(&self, hash: Digest, verified: bool) {
        lock(&self.verified).insert(hash, verified);
    }

    /// Mark a transaction verified, adding it if unknown.
    pub fn mark_verified(&self, hash: Digest) {
        self.add(hash, true);
    }

    pub fn len(&self) -> usize {
        lock(&self.verified).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TransactionStore for NullTransactions {
    fn is_verified(&self, hash: &Digest) -> Result<bool, StoreError> {
        Ok(lock(&self.verified).get(hash).copied().unwrap_or(false))
    }
}

/// An in-memory live-weight ledger.
#[derive(Default)]
pub struct NullLiveWeights {
    weights: Mutex<HashMap<HolderKey, u64>>,
}

impl NullLiveWeights {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, holder: HolderKey, weight: u64) {
        lock(&self.weights).insert(holder, weight);
    }
}

impl LiveWeightStore for NullLiveWeights {
    fn live_weight(&self, holder: &HolderKey) -> Result<u64, StoreError> {
        Ok(lock(&self.weights).get(holder).copied().unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use merit_types::{DIGEST_LEN, HOLDER_KEY_LEN};

    fn holder(n: u8) -> HolderKey {
        HolderKey::new([n; HOLDER_KEY_LEN])
    }

    fn tx(n: u8) -> Digest {
        Digest::new([n; DIGEST_LEN])
    }

    #[test]
    fn push_assigns_dense_nonces() {
        let store = NullElementStore::new();
        assert_eq!(store.verify(holder(1), tx(1)), 0);
        assert_eq!(store.verify(holder(1), tx(2)), 1);
        assert_eq!(store.verify(holder(2), tx(1)), 0);
        assert_eq!(store.tip(&holder(1)), Some(1));
        assert_eq!(store.tip(&holder(3)), None);
    }

    #[test]
    fn element_lookup() {
        let store = NullElementStore::new();
        store.verify(holder(1), tx(7));
        let e = store.element(&holder(1), 0).unwrap().unwrap();
        assert_eq!(e.verified_hash(), Some(&tx(7)));
        assert!(store.element(&holder(1), 1).unwrap().is_none());
        assert!(store.element(&holder(9), 0).unwrap().is_none());
    }

    #[test]
    fn insert_rejects_gaps() {
        let store = NullElementStore::new();
        assert!(store
            .insert(Element::verification(holder(1), 1, tx(1)))
            .is_err());
        assert!(store
            .insert(Element::verification(holder(1), 0, tx(1)))
            .is_ok());
    }

    #[test]
    fn range_is_inclusive() {
        let store = NullElementStore::new();
        for n in 0..5 {
            store.verify(holder(1), tx(n));
        }
        let nonces: Vec<u32> = store.range(&holder(1), 1, 3).iter().map(|e| e.nonce).collect();
        assert_eq!(nonces, vec![1, 2, 3]);
    }

    #[test]
    fn unknown_transactions_are_unverified() {
        let txs = NullTransactions::new();
        txs.add(tx(1), false);
        txs.mark_verified(tx(2));
        assert!(!txs.is_verified(&tx(1)).unwrap());
        assert!(txs.is_verified(&tx(2)).unwrap());
        assert!(!txs.is_verified(&tx(3)).unwrap());
        assert_eq!(txs.len(), 2);
    }

    #[test]
    fn missing_weight_is_zero() {
        let weights = NullLiveWeights::new();
        weights.set(holder(1), 42);
        assert_eq!(weights.live_weight(&holder(1)).unwrap(), 42);
        assert_eq!(weights.live_weight(&holder(2)).unwrap(), 0);
    }
}
