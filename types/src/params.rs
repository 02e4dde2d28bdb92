//! Scoring and window parameters.

use serde::{Deserialize, Serialize};

use crate::TypesError;

/// Parameters of the epoch window and the scoring pass.
///
/// Every field has a default, so a partial TOML table is valid input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeritParams {
    /// Number of epochs held open at rest.
    pub epoch_window_depth: usize,

    /// Ranked holders beyond this many receive nothing.
    pub max_scored_holders: usize,

    /// Normalized scores of one epoch always sum to this value.
    pub normalized_total: u64,

    /// Mint amount per normalized point.
    pub mint_multiplier: u64,

    /// Reject records whose merkle root does not match the archived elements.
    pub verify_record_merkle: bool,
}

impl MeritParams {
    pub fn validate(&self) -> Result<(), TypesError> {
        let nonzero = [
            ("epoch_window_depth", self.epoch_window_depth as u64),
            ("max_scored_holders", self.max_scored_holders as u64),
            ("normalized_total", self.normalized_total),
            ("mint_multiplier", self.mint_multiplier),
        ];
        for (name, value) in nonzero {
            if value == 0 {
                return Err(TypesError::InvalidParam {
                    name,
                    reason: "must be greater than zero".into(),
                });
            }
        }
        Ok(())
    }
}

impl Default for MeritParams {
    fn default() -> Self {
        Self {
            epoch_window_depth: 5,
            max_scored_holders: 100,
            normalized_total: 1000,
            mint_multiplier: 50,
            verify_record_merkle: false,
        }
    }
}
