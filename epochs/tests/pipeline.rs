//! End-to-end tests of the block pipeline: element stores → block bodies →
//! epoch window → scoring → mints.

use merit_crypto::holder_key_from_seed;
use merit_epochs::{BlockBody, BlockBodyRecord, MeritError, MeritProcessor, Mint};
use merit_nullables::{NullElementStore, NullLiveWeights, NullTransactions};
use merit_store::StoreError;
use merit_store::TransactionStore;
use merit_types::{Digest, ElementKind, HolderKey, MeritParams, DIGEST_LEN};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn tx(n: u8) -> Digest {
    Digest::new([n; DIGEST_LEN])
}

fn key(seed: &[u8]) -> HolderKey {
    holder_key_from_seed(seed).expect("key from seed")
}

struct Chain {
    elements: NullElementStore,
    txs: NullTransactions,
    live: NullLiveWeights,
    processor: MeritProcessor,
}

impl Chain {
    fn new(params: MeritParams) -> Self {
        Self {
            elements: NullElementStore::new(),
            txs: NullTransactions::new(),
            live: NullLiveWeights::new(),
            processor: MeritProcessor::new(&params).expect("valid params"),
        }
    }

    /// Archive every element currently stored for `holders`, from each
    /// holder's archived tip onwards, with correct merkles.
    fn body_for(&self, holders: &[HolderKey]) -> BlockBody {
        let records = holders
            .iter()
            .filter_map(|h| {
                let tip = self.elements.tip(h)?;
                let start = self.processor.window().tips().get(h);
                let archived = self.elements.range(h, start, tip);
                Some(BlockBodyRecord::for_elements(*h, tip, &archived))
            })
            .collect();
        BlockBody::with_records(records)
    }

    fn process(&mut self, body: &BlockBody) -> Result<Vec<Mint>, MeritError> {
        self.processor
            .process_block(body, &self.elements, &self.txs, &self.live)
    }

    fn empty_block(&mut self) -> Vec<Mint> {
        self.process(&BlockBody::default()).expect("empty block applies")
    }
}

fn depth(n: usize) -> MeritParams {
    MeritParams {
        epoch_window_depth: n,
        verify_record_merkle: true,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn six_holders_share_one_transaction() {
    let mut chain = Chain::new(depth(5));
    let holders: Vec<HolderKey> = (1..=6u8).map(|s| key(&[s])).collect();
    for h in &holders {
        chain.elements.verify(*h, tx(1));
        chain.live.set(*h, 10);
    }
    chain.txs.mark_verified(tx(1));

    let body = chain.body_for(&holders);
    assert!(chain.process(&body).unwrap().is_empty());
    for _ in 0..4 {
        assert!(chain.empty_block().is_empty());
    }
    let mints = chain.empty_block();

    assert_eq!(mints.len(), 6);
    let top = holders.iter().max().copied().unwrap();
    assert_eq!(mints[0].holder, top);
    assert_eq!(mints[0].amount, 8500);
    assert!(mints[1..].iter().all(|m| m.amount == 8300));
    assert_eq!(mints.iter().map(|m| m.amount).sum::<u64>(), 50_000);
    assert_eq!(
        mints.iter().map(|m| m.id).collect::<Vec<_>>(),
        (0..6).collect::<Vec<u64>>()
    );
}

#[test]
fn late_attestation_scores_with_original_epoch() {
    let mut chain = Chain::new(depth(3));
    let early = key(b"early");
    let late = key(b"late");
    chain.live.set(early, 1);
    chain.live.set(late, 3);
    chain.txs.mark_verified(tx(7));

    chain.elements.verify(early, tx(7));
    let body = chain.body_for(&[early]);
    chain.process(&body).unwrap();

    chain.elements.verify(late, tx(7));
    let body = chain.body_for(&[late]);
    chain.process(&body).unwrap();

    // The late attestation was folded into the first epoch, so the second
    // epoch is empty and only one finalization mints.
    assert!(chain.empty_block().is_empty());
    let mints = chain.empty_block();
    assert_eq!(
        mints,
        vec![Mint::new(0, late, 750 * 50), Mint::new(1, early, 250 * 50)]
    );
    assert!(chain.empty_block().is_empty());
    assert!(chain.empty_block().is_empty());
}

#[test]
fn difficulty_elements_advance_tips_without_scoring() {
    let mut chain = Chain::new(depth(1));
    let h = key(b"difficulty");
    chain.live.set(h, 5);
    chain.elements.push(h, ElementKind::SendDifficulty { difficulty: tx(1) });
    chain.elements.push(h, ElementKind::DataDifficulty { difficulty: tx(2) });

    let body = chain.body_for(&[h]);
    chain.process(&body).unwrap();
    assert_eq!(chain.processor.window().tips().get(&h), 1);
    assert!(chain.empty_block().is_empty());
}

#[test]
fn rewalked_tip_verification_scores_again() {
    let mut chain = Chain::new(depth(1));
    let h = key(b"incremental");
    let other = key(b"other");
    chain.live.set(h, 1);
    chain.live.set(other, 1);
    chain.txs.mark_verified(tx(1));
    chain.txs.mark_verified(tx(2));

    chain.elements.verify(h, tx(1));
    chain.elements.verify(other, tx(1));
    let body = chain.body_for(&[h, other]);
    chain.process(&body).unwrap();

    // h's next record walks nonce 0 again, so tx(1) gains a second h entry
    // in the epoch that is finalized by this very block.
    chain.elements.verify(h, tx(2));
    let body = chain.body_for(&[h]);
    assert_eq!(body.records[0].nonce, 1);
    let mints = chain.process(&body).unwrap();
    assert_eq!(
        mints,
        vec![Mint::new(0, h, 667 * 50), Mint::new(1, other, 333 * 50)]
    );

    let mints = chain.empty_block();
    assert_eq!(mints, vec![Mint::new(2, h, 50_000)]);
}

#[test]
fn bad_merkle_is_rejected() {
    let mut chain = Chain::new(depth(2));
    let h = key(b"merkle");
    chain.elements.verify(h, tx(1));

    let body = BlockBody::with_records(vec![BlockBodyRecord::new(h, 0, tx(99))]);
    let err = chain.process(&body).unwrap_err();
    assert!(matches!(err, MeritError::MerkleMismatch { .. }));
    assert!(!chain.processor.window().tips().contains(&h));
}

#[test]
fn body_survives_binary_and_json_transport() {
    let mut chain = Chain::new(depth(2));
    let holders: Vec<HolderKey> = (10..13u8).map(|s| key(&[s])).collect();
    for h in &holders {
        chain.elements.verify(*h, tx(3));
    }
    let body = chain.body_for(&holders);

    let decoded = BlockBody::from_bytes(&body.to_bytes().unwrap()).unwrap();
    let from_json = BlockBody::from_json(&decoded.to_json().unwrap()).unwrap();
    assert_eq!(from_json, body);
    chain.process(&from_json).unwrap();
}

struct FailingTransactions;

impl TransactionStore for FailingTransactions {
    fn is_verified(&self, _hash: &Digest) -> Result<bool, StoreError> {
        Err(StoreError::Backend("unavailable".into()))
    }
}

#[test]
fn store_failure_during_scoring_rejects_block() {
    let params = depth(1);
    let mut processor = MeritProcessor::new(&params).unwrap();
    let elements = NullElementStore::new();
    let live = NullLiveWeights::new();
    let h = key(b"store");
    elements.verify(h, tx(1));

    let body = BlockBody::with_records(vec![BlockBodyRecord::for_elements(
        h,
        0,
        &elements.range(&h, 0, 0),
    )]);
    processor
        .process_block(&body, &elements, &NullTransactions::new(), &live)
        .unwrap();

    let err = processor
        .process_block(&BlockBody::default(), &elements, &FailingTransactions, &live)
        .unwrap_err();
    assert!(matches!(err, MeritError::Store(_)));
    assert!(!err.is_protocol_violation());
    assert_eq!(processor.height(), 1);
    assert!(processor.window().open_epochs().any(|e| e.contains(&tx(1))));
}
