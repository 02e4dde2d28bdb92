//! Errors raised while decoding block bodies and processing blocks.

use merit_store::StoreError;
use merit_types::{Digest, HolderKey, TypesError};
use thiserror::Error;

/// Failures of the BlockBody binary and JSON codecs.
#[derive(Debug, Error)]
pub enum BlockBodyError {
    #[error("truncated block body: {field} needs {needed} bytes, {remaining} remaining")]
    Truncated {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },

    #[error("{0} trailing bytes after block body")]
    TrailingBytes(usize),

    #[error("too many miners: {0} (at most 255 fit the encoding)")]
    TooManyMiners(usize),

    #[error("too many records: {0}")]
    TooManyRecords(usize),

    #[error("malformed block body JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures of the block pipeline.
///
/// The first four variants are protocol violations: the block is malformed or
/// the caller fed blocks out of order. None of them leaves partial state behind.
#[derive(Debug, Error)]
pub enum MeritError {
    #[error("holder {holder} appears more than once in one block body")]
    DuplicateHolder { holder: HolderKey },

    #[error("holder {holder} record nonce {nonce} is below the archived tip {tip}")]
    NonceRegression {
        holder: HolderKey,
        tip: u32,
        nonce: u32,
    },

    #[error("holder {holder} has no element at nonce {nonce}")]
    MissingElement { holder: HolderKey, nonce: u32 },

    #[error("holder {holder} record merkle {claimed} does not match archived elements ({computed})")]
    MerkleMismatch {
        holder: HolderKey,
        claimed: Digest,
        computed: Digest,
    },

    #[error("weighted score overflow for holder {holder}")]
    ScoreOverflow { holder: HolderKey },

    #[error("mint id counter exhausted")]
    MintIdOverflow,

    #[error("invalid parameters: {0}")]
    Params(#[from] TypesError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("block body error: {0}")]
    BlockBody(#[from] BlockBodyError),
}

impl MeritError {
    /// Whether the error means the block itself (or its ordering) is invalid.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            Self::DuplicateHolder { .. }
                | Self::NonceRegression { .. }
                | Self::MissingElement { .. }
                | Self::MerkleMismatch { .. }
        )
    }
}
