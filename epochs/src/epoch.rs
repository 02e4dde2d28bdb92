//! Epochs and the sliding window of open epochs.
//!
//! An epoch maps each attested transaction to the holders that attested it.
//! The window keeps a fixed number of epochs open. Every block contributes one
//! new epoch and finalizes the oldest; a transaction already tracked by an open
//! epoch keeps collecting attestations there instead of splitting its score
//! across two epochs.

use merit_crypto::merkle_root_of_elements;
use merit_store::ElementStore;
use merit_types::{Digest, Element, HolderKey, MeritParams};
use std::collections::{HashMap, VecDeque};

use crate::block_body::{BlockBody, BlockBodyRecord};
use crate::error::MeritError;
use crate::tips::HolderTipTracker;

/// Attested transaction → holders that attested it, in arrival order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Epoch {
    entries: HashMap<Digest, Vec<HolderKey>>,
}

impl Epoch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `holder` attested `tx`.
    pub fn attest(&mut self, tx: Digest, holder: HolderKey) {
        self.entries.entry(tx).or_default().push(holder);
    }

    /// Append several attesters of `tx` at once.
    pub fn extend(&mut self, tx: Digest, holders: impl IntoIterator<Item = HolderKey>) {
        self.entries.entry(tx).or_default().extend(holders);
    }

    pub fn participants(&self, tx: &Digest) -> Option<&[HolderKey]> {
        self.entries.get(tx).map(Vec::as_slice)
    }

    pub fn contains(&self, tx: &Digest) -> bool {
        self.entries.contains_key(tx)
    }

    pub fn remove(&mut self, tx: &Digest) -> Option<Vec<HolderKey>> {
        self.entries.remove(tx)
    }

    /// Number of distinct transactions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn transactions(&self) -> impl Iterator<Item = &Digest> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Digest, &[HolderKey])> {
        self.entries.iter().map(|(tx, holders)| (tx, holders.as_slice()))
    }
}

/// A validated block body that has not yet been applied to the window.
#[derive(Clone, Debug, Default)]
pub struct PendingEpoch {
    /// Attestations archived by the block, before merging.
    pub epoch: Epoch,
    /// New tip per holder in the block.
    pub tips: Vec<(HolderKey, u32)>,
}

/// The fixed-depth window of open epochs, plus the per-holder tips that
/// decide which elements each new record archives.
#[derive(Clone, Debug)]
pub struct EpochWindow {
    epochs: VecDeque<Epoch>,
    tips: HolderTipTracker,
    verify_merkle: bool,
}

impl EpochWindow {
    /// A window of `depth` empty epochs.
    pub fn new(depth: usize) -> Self {
        Self {
            epochs: (0..depth).map(|_| Epoch::new()).collect(),
            tips: HolderTipTracker::new(),
            verify_merkle: false,
        }
    }

    pub fn with_params(params: &MeritParams) -> Self {
        Self {
            verify_merkle: params.verify_record_merkle,
            ..Self::new(params.epoch_window_depth)
        }
    }

    /// Number of open epochs. Constant for the window's lifetime.
    pub fn depth(&self) -> usize {
        self.epochs.len()
    }

    /// Open epochs, oldest first.
    pub fn open_epochs(&self) -> impl Iterator<Item = &Epoch> {
        self.epochs.iter()
    }

    pub fn tips(&self) -> &HolderTipTracker {
        &self.tips
    }

    /// Walk one record's element range, from the holder's tip through
    /// `record.nonce` inclusive, into `epoch`.
    ///
    /// Only verifications contribute; other kinds are skipped. Nothing in the
    /// window changes.
    pub fn ingest_record<S: ElementStore + ?Sized>(
        &self,
        record: &BlockBodyRecord,
        elements: &S,
        epoch: &mut Epoch,
    ) -> Result<(), MeritError> {
        let holder = record.holder;
        let start = self.tips.get(&holder);
        if record.nonce < start {
            return Err(MeritError::NonceRegression {
                holder,
                tip: start,
                nonce: record.nonce,
            });
        }

        // The tip element is walked again.
        let mut archived: Vec<Element> = Vec::new();
        for nonce in start..=record.nonce {
            let element = elements
                .element(&holder, nonce)?
                .ok_or(MeritError::MissingElement { holder, nonce })?;
            archived.push(element);
        }

        if self.verify_merkle {
            let computed = merkle_root_of_elements(&archived);
            if computed != record.merkle {
                return Err(MeritError::MerkleMismatch {
                    holder,
                    claimed: record.merkle,
                    computed,
                });
            }
        }

        for element in &archived {
            match element.verified_hash() {
                Some(tx) => epoch.attest(*tx, holder),
                None => tracing::trace!(%holder, nonce = element.nonce, "skipping non-verification element"),
            }
        }
        Ok(())
    }

    /// Validate a whole block body and build its epoch without touching the
    /// window. On error nothing has been applied.
    pub fn ingest<S: ElementStore + ?Sized>(
        &self,
        body: &BlockBody,
        elements: &S,
    ) -> Result<PendingEpoch, MeritError> {
        if let Some(holder) = body.find_duplicate_holder() {
            return Err(MeritError::DuplicateHolder { holder });
        }

        let mut pending = PendingEpoch {
            epoch: Epoch::new(),
            tips: Vec::with_capacity(body.records.len()),
        };
        for record in &body.records {
            self.ingest_record(record, elements, &mut pending.epoch)?;
            pending.tips.push((record.holder, record.nonce));
        }
        Ok(pending)
    }

    /// The epoch that [`commit`](Self::commit)ting `pending` would finalize.
    pub fn peek_finalized(&self, pending: &PendingEpoch) -> Epoch {
        let Some(oldest) = self.epochs.front() else {
            return pending.epoch.clone();
        };
        let mut finalized = oldest.clone();
        for (tx, holders) in pending.epoch.iter() {
            if oldest.contains(tx) {
                finalized.extend(*tx, holders.iter().copied());
            }
        }
        finalized
    }

    /// Merge late attestations into the open epoch that already tracks their
    /// transaction, push what remains as the newest epoch and pop the oldest.
    pub fn rotate(&mut self, mut new_epoch: Epoch) -> Epoch {
        let txs: Vec<Digest> = new_epoch.transactions().copied().collect();
        for tx in txs {
            if let Some(open) = self.epochs.iter_mut().find(|e| e.contains(&tx)) {
                if let Some(holders) = new_epoch.remove(&tx) {
                    tracing::debug!(%tx, attesters = holders.len(), "merging late attestation into open epoch");
                    open.extend(tx, holders);
                }
            }
        }

        self.epochs.push_back(new_epoch);
        // The push above guarantees the pop succeeds; a zero-depth window
        // finalizes the epoch it was just given.
        self.epochs.pop_front().unwrap_or_default()
    }

    /// Advance the tips recorded in `pending` and rotate its epoch in.
    pub fn commit(&mut self, pending: PendingEpoch) -> Epoch {
        for (holder, nonce) in pending.tips {
            self.tips.advance(holder, nonce);
        }
        self.rotate(pending.epoch)
    }

    /// Ingest a block body and rotate; returns the finalized epoch.
    pub fn add<S: ElementStore + ?Sized>(
        &mut self,
        body: &BlockBody,
        elements: &S,
    ) -> Result<Epoch, MeritError> {
        let pending = self.ingest(body, elements)?;
        Ok(self.commit(pending))
    }
}

impl Default for EpochWindow {
    fn default() -> Self {
        Self::with_params(&MeritParams::default())
    }
}
