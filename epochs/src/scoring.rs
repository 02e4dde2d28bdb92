//! Scoring of finalized epochs into mints.
//!
//! A holder earns one point per verified transaction it attested in the epoch,
//! multiplied by its live weight. Holders are ranked by that weighted score
//! (ties broken by the larger key), the ranking is cut to
//! `max_scored_holders`, and the survivors split `normalized_total` points:
//!
//! `normalized(h) = ⌊weighted(h) × normalized_total / Σ weighted⌋`
//!
//! Flooring leaves a small remainder, which goes to the top-ranked holder so
//! that the points always sum to exactly `normalized_total`. Each holder with a
//! non-zero share receives a mint of `normalized × mint_multiplier`.

use merit_store::{LiveWeightStore, TransactionStore};
use merit_types::{HolderKey, MeritParams};
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::epoch::Epoch;
use crate::error::MeritError;
use crate::mint::Mint;

/// A holder's score within one scoring pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Score {
    pub holder: HolderKey,
    pub value: u128,
}

impl Score {
    pub fn new(holder: HolderKey, value: u128) -> Self {
        Self { holder, value }
    }

    /// Ranking order: higher score first, then the numerically larger key.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .value
            .cmp(&self.value)
            .then_with(|| other.holder.cmp(&self.holder))
    }
}

/// Turns finalized epochs into mints and owns the mint-id counter.
///
/// One engine belongs to one block pipeline; ids are never reset for the
/// engine's lifetime.
#[derive(Clone, Debug)]
pub struct ScoringEngine {
    next_mint: u64,
    max_scored_holders: usize,
    normalized_total: u64,
    mint_multiplier: u64,
}

impl ScoringEngine {
    pub fn new(params: &MeritParams) -> Self {
        Self::with_next_mint(params, 0)
    }

    /// Resume an engine whose counter already stands at `next_mint`.
    pub fn with_next_mint(params: &MeritParams, next_mint: u64) -> Self {
        Self {
            next_mint,
            max_scored_holders: params.max_scored_holders,
            normalized_total: params.normalized_total,
            mint_multiplier: params.mint_multiplier,
        }
    }

    /// The id the next emitted mint will carry.
    pub fn next_mint_id(&self) -> u64 {
        self.next_mint
    }

    /// Score a finalized epoch.
    ///
    /// Returns no mints when the epoch has no verified transaction or when the
    /// surviving holders all weigh zero; neither case consumes mint ids.
    pub fn score<T, W>(
        &mut self,
        transactions: &T,
        weights: &W,
        epoch: &Epoch,
    ) -> Result<Vec<Mint>, MeritError>
    where
        T: TransactionStore + ?Sized,
        W: LiveWeightStore + ?Sized,
    {
        let ranked = self.rank(transactions, weights, epoch)?;
        self.allocate(ranked)
    }

    /// Weighted scores of the epoch's holders, ranked and truncated.
    ///
    /// Holders with zero weight stay in the ranking. Participant lists are not
    /// deduplicated: every entry counts.
    pub fn rank<T, W>(
        &self,
        transactions: &T,
        weights: &W,
        epoch: &Epoch,
    ) -> Result<Vec<Score>, MeritError>
    where
        T: TransactionStore + ?Sized,
        W: LiveWeightStore + ?Sized,
    {
        let mut points: HashMap<HolderKey, u64> = HashMap::new();
        let mut verified = 0usize;
        for (tx, holders) in epoch.iter() {
            if !transactions.is_verified(tx)? {
                continue;
            }
            verified += 1;
            for holder in holders {
                *points.entry(*holder).or_insert(0) += 1;
            }
        }

        if verified == 0 {
            tracing::debug!(transactions = epoch.len(), "no verified transactions in epoch");
            return Ok(Vec::new());
        }

        let mut scores = Vec::with_capacity(points.len());
        for (holder, count) in points {
            let weight = weights.live_weight(&holder)?;
            // u64 × u64 always fits in u128.
            scores.push(Score::new(holder, u128::from(count) * u128::from(weight)));
        }
        scores.sort_unstable_by(Score::rank_cmp);

        let holders = scores.len();
        scores.truncate(self.max_scored_holders);
        tracing::debug!(
            transactions = epoch.len(),
            verified,
            holders,
            scored = scores.len(),
            "ranked epoch"
        );
        Ok(scores)
    }

    /// Rescale ranked scores in place so they sum to `normalized_total`.
    ///
    /// Returns `false`, leaving the scores untouched, when their total is
    /// zero.
    pub fn normalize(&self, scores: &mut [Score]) -> Result<bool, MeritError> {
        let mut total: u128 = 0;
        for score in scores.iter() {
            total = total
                .checked_add(score.value)
                .ok_or(MeritError::ScoreOverflow {
                    holder: score.holder,
                })?;
        }
        if total == 0 {
            return Ok(false);
        }

        let target = u128::from(self.normalized_total);
        let mut sum: u128 = 0;
        for score in scores.iter_mut() {
            score.value = score
                .value
                .checked_mul(target)
                .ok_or(MeritError::ScoreOverflow {
                    holder: score.holder,
                })?
                / total;
            sum += score.value;
        }

        // Flooring never overshoots, so the remainder is non-negative.
        if let Some(top) = scores.first_mut() {
            top.value += target - sum;
        }
        Ok(true)
    }

    /// Emit one mint per non-zero normalized score, in order.
    ///
    /// Either every mint is emitted or, on overflow, none is and the counter
    /// does not move.
    pub fn reward(&mut self, scores: &[Score]) -> Result<Vec<Mint>, MeritError> {
        let mut allocations = Vec::with_capacity(scores.len());
        for score in scores.iter().filter(|s| s.value > 0) {
            let amount = u64::try_from(score.value)
                .ok()
                .and_then(|v| v.checked_mul(self.mint_multiplier))
                .ok_or(MeritError::ScoreOverflow {
                    holder: score.holder,
                })?;
            allocations.push((score.holder, amount));
        }

        let end = self
            .next_mint
            .checked_add(allocations.len() as u64)
            .ok_or(MeritError::MintIdOverflow)?;

        let first = self.next_mint;
        let mints: Vec<Mint> = allocations
            .into_iter()
            .zip(first..end)
            .map(|((holder, amount), id)| Mint::new(id, holder, amount))
            .collect();
        self.next_mint = end;

        if !mints.is_empty() {
            tracing::debug!(count = mints.len(), first_id = first, "minted epoch rewards");
        }
        Ok(mints)
    }

    /// Normalize ranked scores and mint them.
    pub fn allocate(&mut self, mut ranked: Vec<Score>) -> Result<Vec<Mint>, MeritError> {
        if ranked.is_empty() {
            return Ok(Vec::new());
        }
        if !self.normalize(&mut ranked)? {
            tracing::debug!(holders = ranked.len(), "epoch has zero weighted score, no mints");
            return Ok(Vec::new());
        }
        self.reward(&ranked)
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(&MeritParams::default())
    }
}
