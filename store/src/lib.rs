//! Abstract storage traits consumed by the merit epoch engine.
//!
//! The consensus-element store, the transaction pool's verification flag and
//! the live-weight ledger all belong to other subsystems. The engine reads them
//! only through these traits; the `merit-nullables` crate provides in-memory
//! implementations for tests and replay.

pub mod element;
pub mod error;
pub mod live_weight;
pub mod transaction;

pub use element::ElementStore;
pub use error::StoreError;
pub use live_weight::LiveWeightStore;
pub use transaction::TransactionStore;
