//! Pre-built [`tracing::Span`] constructors for the block pipeline.
//!
//! Consistent span names and field sets make traces easy to filter and
//! correlate across the ingest, rotate and score phases.

use tracing::{debug_span, info_span, Span};

/// Span covering the full processing of one block body.
pub fn block_process_span(height: u64, records: usize) -> Span {
    info_span!("block_process", height, records)
}

/// Span covering the scoring of one finalized epoch.
pub fn epoch_score_span(transactions: usize) -> Span {
    debug_span!("epoch_score", transactions)
}
