//! Offline replay of recorded block bodies through the merit pipeline.
//!
//! A vector file carries everything the pipeline reads from other subsystems
//! (consensus elements, verified transactions, live weights) plus the block
//! bodies to apply. [`ReplayVectors::run`] loads the first three into the
//! in-memory nullable stores and feeds every block to a
//! [`MeritProcessor`](merit_epochs::MeritProcessor).

pub mod config;
pub mod vectors;

pub use config::ReplayConfig;
pub use vectors::{ReplayReport, ReplayVectors};

use merit_epochs::{BlockBodyError, MeritError};
use merit_types::TypesError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid replay vectors: {0}")]
    Vectors(String),

    #[error("malformed replay JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid key: {0}")]
    Key(#[from] TypesError),

    #[error("block body error: {0}")]
    BlockBody(#[from] BlockBodyError),

    #[error("block {index} rejected: {source}")]
    Block {
        index: usize,
        #[source]
        source: MeritError,
    },

    #[error(transparent)]
    Merit(#[from] MeritError),
}
