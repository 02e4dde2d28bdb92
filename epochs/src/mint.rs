//! Mint events produced by scoring.

use merit_types::HolderKey;
use serde::{Deserialize, Serialize};

/// A newly created currency allocation.
///
/// Ids are sequential per [`ScoringEngine`](crate::ScoringEngine) and never reused.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mint {
    pub id: u64,
    pub holder: HolderKey,
    pub amount: u64,
}

impl Mint {
    pub fn new(id: u64, holder: HolderKey, amount: u64) -> Self {
        Self { id, holder, amount }
    }
}
