//! Merit epochs: turning archived verifications into minted rewards.
//!
//! Every block body archives a range of each holder's consensus elements. The
//! verifications among them are grouped by transaction into a new epoch, which
//! joins a fixed-depth window of open epochs. Each block pushes one epoch in
//! and ages the oldest one out; the aged-out epoch is scored:
//!
//! `weighted(h) = verified_attestations(h) × live_weight(h)`
//!
//! The top holders by weighted score split a fixed total of normalized points
//! (1000 by default) exactly, and every non-zero share becomes a [`Mint`].
//!
//! This crate handles:
//! - The [`BlockBody`] binary and JSON encodings
//! - Per-holder archived nonces ([`HolderTipTracker`])
//! - The sliding [`EpochWindow`] with late-attestation merging
//! - Ranking, normalization and minting ([`ScoringEngine`])
//! - The full per-block pipeline ([`MeritProcessor`])

pub mod block_body;
pub mod epoch;
pub mod error;
pub mod mint;
pub mod processor;
pub mod scoring;
pub mod tips;

pub use block_body::{BlockBody, BlockBodyRecord, MinerShare, DEFAULT_MINER_SHARE};
pub use epoch::{Epoch, EpochWindow, PendingEpoch};
pub use error::{BlockBodyError, MeritError};
pub use mint::Mint;
pub use processor::MeritProcessor;
pub use scoring::{Score, ScoringEngine};
pub use tips::HolderTipTracker;
