//! Replay vector files.
//!
//! ```json
//! {
//!   "elements": [{"holder": "..", "nonce": 0, "kind": "verification", "hash": ".."}],
//!   "verified": [".."],
//!   "live": {"<holder hex>": 10},
//!   "blocks": [{"records": [..], "miners": [..]}]
//! }
//! ```
//!
//! Every section is optional.

use merit_epochs::{BlockBody, MeritProcessor, Mint};
use merit_nullables::{NullElementStore, NullLiveWeights, NullTransactions};
use merit_types::{Digest, Element, HolderKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::config::ReplayConfig;
use crate::ReplayError;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ReplayVectors {
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub verified: Vec<Digest>,
    /// Holder hex → live weight. Holders not listed weigh zero.
    #[serde(default)]
    pub live: BTreeMap<String, u64>,
    #[serde(default)]
    pub blocks: Vec<BlockBody>,
}

/// Outcome of a replay run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ReplayReport {
    pub blocks: usize,
    pub rejected: usize,
    pub mints: Vec<Mint>,
    pub next_mint_id: u64,
    /// Pipeline counters at the end of the run.
    pub counters: BTreeMap<&'static str, u64>,
}

impl ReplayReport {
    /// Total amount minted over the run.
    pub fn minted(&self) -> u128 {
        self.mints.iter().map(|m| u128::from(m.amount)).sum()
    }
}

type Stores = (NullElementStore, NullTransactions, NullLiveWeights);

impl ReplayVectors {
    pub fn from_json_str(s: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ReplayError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ReplayError::Vectors(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&content)
    }

    /// Build the in-memory stores the pipeline reads from.
    ///
    /// Elements may be listed in any order, but each holder's nonces must be
    /// dense from 0.
    pub fn stores(&self) -> Result<Stores, ReplayError> {
        let elements = NullElementStore::new();
        let mut ordered: Vec<&Element> = self.elements.iter().collect();
        ordered.sort_by(|a, b| a.holder.cmp(&b.holder).then(a.nonce.cmp(&b.nonce)));
        for element in ordered {
            elements
                .insert(element.clone())
                .map_err(|e| ReplayError::Vectors(e.to_string()))?;
        }

        let transactions = NullTransactions::new();
        for hash in &self.verified {
            transactions.mark_verified(*hash);
        }

        let weights = NullLiveWeights::new();
        for (holder, weight) in &self.live {
            weights.set(HolderKey::from_hex(holder)?, *weight);
        }

        Ok((elements, transactions, weights))
    }

    /// Apply every block in order.
    ///
    /// Rejected blocks are skipped and counted unless `config.fail_fast` is
    /// set, in which case the first rejection ends the run.
    pub fn run(&self, config: &ReplayConfig) -> Result<ReplayReport, ReplayError> {
        let (elements, transactions, weights) = self.stores()?;
        let mut processor = MeritProcessor::new(&config.params)?;
        let mut report = ReplayReport::default();

        for (index, body) in self.blocks.iter().enumerate() {
            match processor.process_block(body, &elements, &transactions, &weights) {
                Ok(mints) => report.mints.extend(mints),
                Err(source) if config.fail_fast => {
                    return Err(ReplayError::Block { index, source });
                }
                Err(_) => report.rejected += 1,
            }
            report.blocks += 1;
        }

        report.next_mint_id = processor.engine().next_mint_id();
        report.counters = processor.stats().snapshot();
        tracing::info!(
            blocks = report.blocks,
            rejected = report.rejected,
            mints = report.mints.len(),
            "replay finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use merit_types::{DIGEST_LEN, HOLDER_KEY_LEN};

    fn holder(n: u8) -> HolderKey {
        HolderKey::new([n; HOLDER_KEY_LEN])
    }

    fn tx(n: u8) -> Digest {
        Digest::new([n; DIGEST_LEN])
    }

    #[test]
    fn empty_document_is_valid() {
        let vectors = ReplayVectors::from_json_str("{}").unwrap();
        let report = vectors.run(&ReplayConfig::default()).unwrap();
        assert_eq!(report.blocks, 0);
        assert!(report.mints.is_empty());
    }

    #[test]
    fn elements_load_in_any_order() {
        let vectors = ReplayVectors {
            elements: vec![
                Element::verification(holder(1), 1, tx(2)),
                Element::verification(holder(2), 0, tx(1)),
                Element::verification(holder(1), 0, tx(1)),
            ],
            ..Default::default()
        };
        let (elements, _, _) = vectors.stores().unwrap();
        assert_eq!(elements.tip(&holder(1)), Some(1));
        assert_eq!(elements.tip(&holder(2)), Some(0));
    }

    #[test]
    fn nonce_gaps_are_rejected() {
        let vectors = ReplayVectors {
            elements: vec![Element::verification(holder(1), 3, tx(1))],
            ..Default::default()
        };
        assert!(matches!(vectors.stores(), Err(ReplayError::Vectors(_))));
    }

    #[test]
    fn bad_live_key_is_rejected() {
        let vectors = ReplayVectors::from_json_str(r#"{"live": {"zz": 1}}"#).unwrap();
        assert!(matches!(vectors.stores(), Err(ReplayError::Key(_))));
    }

    #[test]
    fn fail_fast_stops_at_first_rejection() {
        let duplicate = BlockBody::with_records(vec![
            merit_epochs::BlockBodyRecord::new(holder(1), 0, Digest::ZERO),
            merit_epochs::BlockBodyRecord::new(holder(1), 0, Digest::ZERO),
        ]);
        let vectors = ReplayVectors {
            elements: vec![Element::verification(holder(1), 0, tx(1))],
            blocks: vec![BlockBody::default(), duplicate, BlockBody::default()],
            ..Default::default()
        };

        let report = vectors.run(&ReplayConfig::default()).unwrap();
        assert_eq!(report.blocks, 3);
        assert_eq!(report.rejected, 1);
        assert_eq!(report.counters["rejected_blocks"], 1);
        assert_eq!(report.counters["blocks_processed"], 2);
        assert_eq!(report.counters["epochs_finalized"], 2);

        let config = ReplayConfig {
            fail_fast: true,
            ..Default::default()
        };
        assert!(matches!(
            vectors.run(&config),
            Err(ReplayError::Block { index: 1, .. })
        ));
    }
}
