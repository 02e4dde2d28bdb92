//! Last archived nonce per holder.

use merit_types::HolderKey;
use std::collections::HashMap;

/// Tracks, for every holder that has appeared in a block body, the nonce of
/// the last element archived so far.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HolderTipTracker {
    tips: HashMap<HolderKey, u32>,
}

impl HolderTipTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last archived nonce, or 0 for a holder never seen.
    ///
    /// This is also where the holder's next record starts walking, inclusive:
    /// the tip element is walked again.
    pub fn get(&self, holder: &HolderKey) -> u32 {
        self.tips.get(holder).copied().unwrap_or(0)
    }

    /// Set the holder's tip. Callers must not move a tip backwards.
    pub fn advance(&mut self, holder: HolderKey, nonce: u32) {
        self.tips.insert(holder, nonce);
    }

    pub fn contains(&self, holder: &HolderKey) -> bool {
        self.tips.contains_key(holder)
    }

    pub fn len(&self) -> usize {
        self.tips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tips.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HolderKey, &u32)> {
        self.tips.iter()
    }
}
