//! Fundamental types for the merit epoch engine.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! holder keys, 48-byte digests, consensus elements, and scoring parameters.

pub mod digest;
pub mod element;
pub mod error;
pub mod holder;
pub mod params;

mod hex_bytes;

pub use digest::{Digest, DIGEST_LEN};
pub use element::{Element, ElementKind};
pub use error::TypesError;
pub use holder::{HolderKey, HOLDER_KEY_LEN};
pub use params::MeritParams;
