//! Live merit weight trait.

use crate::StoreError;
use merit_types::HolderKey;

/// Read access to each holder's live weight. Holders without merit weigh 0.
pub trait LiveWeightStore {
    fn live_weight(&self, holder: &HolderKey) -> Result<u64, StoreError>;
}
