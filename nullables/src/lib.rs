//! Nullable infrastructure for deterministic testing.
//!
//! The element store, transaction pool and live-weight ledger are external to
//! the epoch engine and abstracted behind the `merit-store` traits. This crate
//! provides in-memory implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! Usage: hand these to the processor in tests and in vector replay.

pub mod store;

pub use store::{NullElementStore, NullLiveWeights, NullTransactions};
