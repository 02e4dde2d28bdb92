//! Block bodies: the archived element ranges and reward shares of one block.
//!
//! Binary layout (all integers big-endian):
//!
//! ```text
//! u32 record_count
//! record_count × { holder (48) | u32 nonce | merkle (48) }
//! u8  miner_count
//! miner_count  × { key (48) | u8 share }
//! ```
//!
//! The JSON form is `{"records": [{"holder", "nonce", "merkle"}], "miners":
//! [{"miner", "amount"}]}` with upper-case hex for byte fields.

use merit_crypto::{default_miner_key, merkle_root_of_elements};
use merit_types::{Digest, Element, HolderKey, DIGEST_LEN, HOLDER_KEY_LEN};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::BlockBodyError;

/// Share given to the fallback miner entry of a default body.
pub const DEFAULT_MINER_SHARE: u8 = 100;

const RECORD_LEN: usize = HOLDER_KEY_LEN + 4 + DIGEST_LEN;
const MINER_LEN: usize = HOLDER_KEY_LEN + 1;

/// "`holder`'s elements from its previously recorded nonce through `nonce`,
/// both inclusive, are archived by this block; those elements root to
/// `merkle`." A holder's first record starts at nonce 0.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockBodyRecord {
    pub holder: HolderKey,
    pub nonce: u32,
    pub merkle: Digest,
}

impl BlockBodyRecord {
    pub fn new(holder: HolderKey, nonce: u32, merkle: Digest) -> Self {
        Self {
            holder,
            nonce,
            merkle,
        }
    }

    /// Build a record archiving `elements`, which must be the holder's
    /// elements from its archived tip (0 for a new holder) through `nonce`,
    /// both inclusive, in order.
    pub fn for_elements(holder: HolderKey, nonce: u32, elements: &[Element]) -> Self {
        Self::new(holder, nonce, merkle_root_of_elements(elements))
    }
}

/// One reward-share entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinerShare {
    #[serde(rename = "miner")]
    pub key: HolderKey,
    #[serde(rename = "amount")]
    pub share: u8,
}

impl MinerShare {
    pub fn new(key: HolderKey, share: u8) -> Self {
        Self { key, share }
    }

    /// `key | share`, as laid out in the binary form.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(MINER_LEN);
        out.extend_from_slice(self.key.as_bytes());
        out.push(self.share);
        out
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockBody {
    pub records: Vec<BlockBodyRecord>,
    pub miners: Vec<MinerShare>,
}

/// No records, and the whole reward routed to the fixed fallback key.
impl Default for BlockBody {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            miners: vec![MinerShare::new(default_miner_key(), DEFAULT_MINER_SHARE)],
        }
    }
}

impl BlockBody {
    pub fn new(records: Vec<BlockBodyRecord>, miners: Vec<MinerShare>) -> Self {
        Self { records, miners }
    }

    /// A body with the given records and the default miner entry.
    pub fn with_records(records: Vec<BlockBodyRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn holders(&self) -> impl Iterator<Item = &HolderKey> {
        self.records.iter().map(|r| &r.holder)
    }

    /// The first holder that has more than one record, if any.
    pub fn find_duplicate_holder(&self) -> Option<HolderKey> {
        let mut seen = HashSet::with_capacity(self.records.len());
        self.holders().find(|h| !seen.insert(**h)).copied()
    }

    /// Each miner entry in its binary form.
    pub fn serialized_miners(&self) -> Vec<Vec<u8>> {
        self.miners.iter().map(MinerShare::to_bytes).collect()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, BlockBodyError> {
        let record_count = u32::try_from(self.records.len())
            .map_err(|_| BlockBodyError::TooManyRecords(self.records.len()))?;
        let miner_count = u8::try_from(self.miners.len())
            .map_err(|_| BlockBodyError::TooManyMiners(self.miners.len()))?;

        let mut out =
            Vec::with_capacity(4 + self.records.len() * RECORD_LEN + 1 + self.miners.len() * MINER_LEN);
        out.extend_from_slice(&record_count.to_be_bytes());
        for record in &self.records {
            out.extend_from_slice(record.holder.as_bytes());
            out.extend_from_slice(&record.nonce.to_be_bytes());
            out.extend_from_slice(record.merkle.as_bytes());
        }
        out.push(miner_count);
        for miner in &self.miners {
            out.extend_from_slice(miner.key.as_bytes());
            out.push(miner.share);
        }
        Ok(out)
    }

    /// Decode the binary form. The buffer must hold exactly one body.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BlockBodyError> {
        let mut reader = Reader::new(bytes);

        let record_count = u32::from_be_bytes(reader.array("record count")?) as usize;
        // Cap the allocation by what the buffer can actually hold.
        let mut records = Vec::with_capacity(record_count.min(reader.remaining() / RECORD_LEN));
        for _ in 0..record_count {
            let holder = HolderKey::new(reader.array("record holder")?);
            let nonce = u32::from_be_bytes(reader.array("record nonce")?);
            let merkle = Digest::new(reader.array("record merkle")?);
            records.push(BlockBodyRecord::new(holder, nonce, merkle));
        }

        let [miner_count] = reader.array::<1>("miner count")?;
        let mut miners = Vec::with_capacity(miner_count as usize);
        for _ in 0..miner_count {
            let key = HolderKey::new(reader.array("miner key")?);
            let [share] = reader.array::<1>("miner share")?;
            miners.push(MinerShare::new(key, share));
        }

        if reader.remaining() > 0 {
            return Err(BlockBodyError::TrailingBytes(reader.remaining()));
        }
        Ok(Self { records, miners })
    }

    pub fn to_json(&self) -> Result<serde_json::Value, BlockBodyError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_string(&self) -> Result<String, BlockBodyError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(value: &serde_json::Value) -> Result<Self, BlockBodyError> {
        Ok(Self::deserialize(value)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self, BlockBodyError> {
        Ok(serde_json::from_str(s)?)
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    fn remaining(&self) -> usize {
        self.bytes.len()
    }

    fn array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N], BlockBodyError> {
        if self.bytes.len() < N {
            return Err(BlockBodyError::Truncated {
                field,
                needed: N,
                remaining: self.bytes.len(),
            });
        }
        let (head, tail) = self.bytes.split_at(N);
        self.bytes = tail;
        let mut out = [0u8; N];
        out.copy_from_slice(head);
        Ok(out)
    }
}
