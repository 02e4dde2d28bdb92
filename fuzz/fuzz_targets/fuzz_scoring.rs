#![no_main]

use libfuzzer_sys::fuzz_target;

use merit_epochs::{Epoch, ScoringEngine};
use merit_nullables::{NullLiveWeights, NullTransactions};
use merit_types::{Digest, HolderKey, DIGEST_LEN, HOLDER_KEY_LEN};

// Score an epoch built from arbitrary (holder, tx, weight) triples. Scoring
// must never panic and a non-empty result always mints the full total.
fuzz_target!(|data: &[u8]| {
    let mut epoch = Epoch::new();
    let transactions = NullTransactions::new();
    let weights = NullLiveWeights::new();

    for chunk in data.chunks_exact(11) {
        let holder = HolderKey::new([chunk[0]; HOLDER_KEY_LEN]);
        let tx = Digest::new([chunk[1]; DIGEST_LEN]);
        let weight = u64::from_be_bytes([
            chunk[3], chunk[4], chunk[5], chunk[6],
            chunk[7], chunk[8], chunk[9], chunk[10],
        ]);
        epoch.attest(tx, holder);
        transactions.add(tx, chunk[2] & 1 == 1);
        weights.set(holder, weight);
    }

    let mut engine = ScoringEngine::default();
    if let Ok(mints) = engine.score(&transactions, &weights, &epoch) {
        if !mints.is_empty() {
            let total: u64 = mints.iter().map(|m| m.amount).sum();
            assert_eq!(total, 1000 * 50);
        }
        assert_eq!(engine.next_mint_id(), mints.len() as u64);
    }
});
