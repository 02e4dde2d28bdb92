//! The per-block pipeline: ingest, rotate, score.

use merit_store::{ElementStore, LiveWeightStore, TransactionStore};
use merit_types::MeritParams;
use merit_utils::spans::{block_process_span, epoch_score_span};
use merit_utils::StatsCounter;

use crate::block_body::BlockBody;
use crate::epoch::EpochWindow;
use crate::error::MeritError;
use crate::mint::Mint;
use crate::scoring::ScoringEngine;

const BLOCKS_PROCESSED: &str = "blocks_processed";
const EPOCHS_FINALIZED: &str = "epochs_finalized";
const MINTS_EMITTED: &str = "mints_emitted";
const REJECTED_BLOCKS: &str = "rejected_blocks";

/// Owns the epoch window and scoring engine of one chain and feeds every block
/// body through both.
///
/// A block either applies completely or not at all: on error the window, the
/// tips and the mint counter are exactly as before the call.
pub struct MeritProcessor {
    window: EpochWindow,
    engine: ScoringEngine,
    stats: StatsCounter,
    height: u64,
}

impl MeritProcessor {
    pub fn new(params: &MeritParams) -> Result<Self, MeritError> {
        params.validate()?;
        Ok(Self {
            window: EpochWindow::with_params(params),
            engine: ScoringEngine::new(params),
            stats: StatsCounter::new(&[
                BLOCKS_PROCESSED,
                EPOCHS_FINALIZED,
                MINTS_EMITTED,
                REJECTED_BLOCKS,
            ]),
            height: 0,
        })
    }

    /// Apply one block body and return the mints of the epoch it finalizes.
    pub fn process_block<E, T, W>(
        &mut self,
        body: &BlockBody,
        elements: &E,
        transactions: &T,
        weights: &W,
    ) -> Result<Vec<Mint>, MeritError>
    where
        E: ElementStore + ?Sized,
        T: TransactionStore + ?Sized,
        W: LiveWeightStore + ?Sized,
    {
        let span = block_process_span(self.height, body.records.len());
        let _guard = span.enter();

        match self.apply(body, elements, transactions, weights) {
            Ok(mints) => {
                self.height += 1;
                self.stats.increment(BLOCKS_PROCESSED);
                self.stats.add(MINTS_EMITTED, mints.len() as u64);
                tracing::info!(mints = mints.len(), "block processed");
                Ok(mints)
            }
            Err(err) => {
                self.stats.increment(REJECTED_BLOCKS);
                tracing::warn!(
                    error = %err,
                    protocol_violation = err.is_protocol_violation(),
                    "block rejected"
                );
                Err(err)
            }
        }
    }

    fn apply<E, T, W>(
        &mut self,
        body: &BlockBody,
        elements: &E,
        transactions: &T,
        weights: &W,
    ) -> Result<Vec<Mint>, MeritError>
    where
        E: ElementStore + ?Sized,
        T: TransactionStore + ?Sized,
        W: LiveWeightStore + ?Sized,
    {
        let pending = self.window.ingest(body, elements)?;
        let finalized = self.window.peek_finalized(&pending);

        let mut engine = self.engine.clone();
        let mints = {
            let span = epoch_score_span(finalized.len());
            let _guard = span.enter();
            let ranked = engine.rank(transactions, weights, &finalized)?;
            engine.allocate(ranked)?
        };

        self.window.commit(pending);
        self.engine = engine;
        // Every applied block finalizes exactly one epoch, empty or not.
        self.stats.increment(EPOCHS_FINALIZED);
        Ok(mints)
    }

    pub fn window(&self) -> &EpochWindow {
        &self.window
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    pub fn stats(&self) -> &StatsCounter {
        &self.stats
    }

    /// Number of blocks applied so far.
    pub fn height(&self) -> u64 {
        self.height
    }
}
