use crate::core::ProofOfWork;
use crate::error::{LedgerError, Result};
use crate::utils::{canonical_json, sha256_hex, Clock};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const GENESIS_PAYLOAD: &str = "Genesis Block";
pub const GENESIS_PREVIOUS_DIGEST: &str = "0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    index: u64,
    timestamp: i64, // milliseconds since the Unix epoch
    payload: String,
    previous_digest: String,
    nonce: u64,
    digest: String, // cached, recomputed whenever a field changes
}

impl Block {
    pub fn new(
        index: u64,
        payload: impl Into<String>,
        previous_digest: impl Into<String>,
        clock: &dyn Clock,
    ) -> Result<Block> {
        Self::with_nonce(index, payload, previous_digest, 0, clock)
    }

    pub fn with_nonce(
        index: u64,
        payload: impl Into<String>,
        previous_digest: impl Into<String>,
        nonce: u64,
        clock: &dyn Clock,
    ) -> Result<Block> {
        let mut block = Block {
            index,
            timestamp: clock.now()?,
            payload: payload.into(),
            previous_digest: previous_digest.into(),
            nonce,
            digest: String::new(),
        };
        block.digest = block.calculate_digest();
        Ok(block)
    }

    /// The genesis block is never sealed.
    pub fn genesis(clock: &dyn Clock) -> Result<Block> {
        Self::new(0, GENESIS_PAYLOAD, GENESIS_PREVIOUS_DIGEST, clock)
    }

    /// SHA-256 over the canonical JSON of every field except the digest.
    pub fn calculate_digest(&self) -> String {
        let bytes = canonical_json([
            ("index", Value::from(self.index)),
            ("timestamp", Value::from(self.timestamp)),
            ("payload", Value::from(self.payload.as_str())),
            ("previous_digest", Value::from(self.previous_digest.as_str())),
            ("nonce", Value::from(self.nonce)),
        ])
        .expect("Canonical JSON of plain block fields should never fail");
        sha256_hex(&bytes)
    }

    /// Search nonces until the digest has `difficulty` leading zeros.
    ///
    /// There is no iteration bound: a difficulty above the digest length
    /// never returns. Past `u64::MAX` the nonce wraps to 0 and the search
    /// carries on. Returns the number of nonce increments performed.
    pub fn seal(&mut self, difficulty: u32) -> u64 {
        ProofOfWork::new(difficulty).run(self)
    }

    /// Like [`Block::seal`], but gives up after `max_iterations` increments
    /// when a cap is supplied.
    pub fn seal_with_limit(
        &mut self,
        difficulty: u32,
        max_iterations: Option<u64>,
    ) -> Result<u64> {
        match max_iterations {
            Some(max) => ProofOfWork::with_limit(difficulty, max).run_with_limit(self),
            None => Ok(self.seal(difficulty)),
        }
    }

    /// Replace the payload and recompute the digest.
    ///
    /// The block stays self-consistent; the break shows up only in the next
    /// block's `previous_digest`.
    pub fn tamper_payload(&mut self, payload: impl Into<String>) {
        self.payload = payload.into();
        self.digest = self.calculate_digest();
        debug!("Block {} payload replaced, new digest {}", self.index, self.digest);
    }

    /// Fails with `LedgerError::Mining` when the nonce is already `u64::MAX`.
    pub(crate) fn increment_nonce(&mut self) -> Result<()> {
        self.nonce = self.nonce.checked_add(1).ok_or_else(|| {
            LedgerError::Mining(format!("Nonce space exhausted for block {}", self.index))
        })?;
        self.digest = self.calculate_digest();
        Ok(())
    }

    pub(crate) fn restart_nonce(&mut self) {
        self.nonce = 0;
        self.digest = self.calculate_digest();
    }

    /// Overwrite the nonce without recomputing the digest.
    #[cfg(test)]
    pub(crate) fn force_nonce(&mut self, nonce: u64) {
        self.nonce = nonce;
    }

    pub fn is_consistent(&self) -> bool {
        self.digest == self.calculate_digest()
    }

    pub fn get_index(&self) -> u64 {
        self.index
    }

    pub fn get_timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn get_payload(&self) -> &str {
        self.payload.as_str()
    }

    pub fn get_previous_digest(&self) -> &str {
        self.previous_digest.as_str()
    }

    pub fn get_nonce(&self) -> u64 {
        self.nonce
    }

    pub fn get_digest(&self) -> &str {
        self.digest.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{FixedClock, DIGEST_HEX_LEN};

    const TS: i64 = 1_700_000_000_000;

    fn create_test_block(payload: &str) -> Block {
        Block::new(1, payload, "prev", &FixedClock(TS)).unwrap()
    }

    #[test]
    fn test_new_block_has_consistent_digest() {
        let block = create_test_block("Alice pays Bob 10 BTC");

        assert_eq!(block.get_nonce(), 0);
        assert_eq!(block.get_timestamp(), TS);
        assert_eq!(block.get_digest().len(), DIGEST_HEX_LEN);
        assert!(block.is_consistent());
    }

    #[test]
    fn test_digest_is_deterministic() {
        let block = create_test_block("payload");
        assert_eq!(block.calculate_digest(), block.calculate_digest());

        let twin = create_test_block("payload");
        assert_eq!(block.get_digest(), twin.get_digest());
    }

    #[test]
    fn test_digest_covers_every_field() {
        let clock = FixedClock(TS);
        let base = Block::with_nonce(1, "p", "prev", 0, &clock).unwrap();

        let variants = [
            Block::with_nonce(2, "p", "prev", 0, &clock).unwrap(),
            Block::with_nonce(1, "q", "prev", 0, &clock).unwrap(),
            Block::with_nonce(1, "p", "other", 0, &clock).unwrap(),
            Block::with_nonce(1, "p", "prev", 1, &clock).unwrap(),
            Block::with_nonce(1, "p", "prev", 0, &FixedClock(TS + 1)).unwrap(),
        ];
        for variant in &variants {
            assert_ne!(base.get_digest(), variant.get_digest());
        }
    }

    #[test]
    fn test_digest_matches_canonical_form() {
        let block = Block::new(3, "x", "abc", &FixedClock(42)).unwrap();
        let expected = sha256_hex(
            br#"{"index":3,"nonce":0,"payload":"x","previous_digest":"abc","timestamp":42}"#,
        );
        assert_eq!(block.get_digest(), expected);
    }

    #[test]
    fn test_seal_meets_target() {
        for difficulty in 0..=4 {
            let mut block = create_test_block("seal me");
            block.seal(difficulty);

            assert!(ProofOfWork::meets_target(block.get_digest(), difficulty));
            assert!(block.is_consistent());
        }
    }

    #[test]
    fn test_seal_zero_difficulty_keeps_nonce() {
        let mut block = create_test_block("free");
        let before = block.clone();

        assert_eq!(block.seal(0), 0);
        assert_eq!(block, before);
    }

    #[test]
    fn test_seal_with_limit_gives_up() {
        let mut block = create_test_block("never");
        let result = block.seal_with_limit(64, Some(10));

        assert!(matches!(result, Err(LedgerError::Mining(_))));
        assert_eq!(block.get_nonce(), 10);
        assert!(block.is_consistent());
    }

    #[test]
    fn test_seal_with_no_limit_matches_seal() {
        let mut limited = create_test_block("same");
        let mut plain = limited.clone();

        let a = limited.seal_with_limit(2, None).unwrap();
        let b = plain.seal(2);
        assert_eq!(a, b);
        assert_eq!(limited, plain);
    }

    #[test]
    fn test_seal_from_max_nonce_wraps() {
        let mut block = Block::with_nonce(1, "p", "prev", u64::MAX, &FixedClock(1)).unwrap();
        block.seal(1);

        assert!(ProofOfWork::meets_target(block.get_digest(), 1));
        assert!(block.is_consistent());
    }

    #[test]
    fn test_seal_with_limit_from_max_nonce_fails() {
        let mut block = Block::with_nonce(1, "p", "prev", u64::MAX, &FixedClock(1)).unwrap();
        let result = block.seal_with_limit(64, Some(10));

        assert!(matches!(result, Err(LedgerError::Mining(_))));
        assert_eq!(block.get_nonce(), u64::MAX);
        assert!(block.is_consistent());
    }

    #[test]
    fn test_increment_nonce_at_max() {
        let mut block = Block::with_nonce(1, "p", "prev", u64::MAX, &FixedClock(1)).unwrap();
        let before = block.clone();

        assert!(block.increment_nonce().is_err());
        assert_eq!(block, before);
    }

    #[test]
    fn test_tamper_payload_recomputes_digest() {
        let mut block = create_test_block("A pays B 10");
        let original = block.get_digest().to_string();

        block.tamper_payload("A pays B 100");

        assert_eq!(block.get_payload(), "A pays B 100");
        assert_ne!(block.get_digest(), original);
        assert!(block.is_consistent());
    }

    #[test]
    fn test_force_nonce_breaks_consistency() {
        let mut block = create_test_block("p");
        block.force_nonce(99);
        assert!(!block.is_consistent());
    }

    #[test]
    fn test_genesis_block() {
        let genesis = Block::genesis(&FixedClock(TS)).unwrap();
        assert_eq!(genesis.get_index(), 0);
        assert_eq!(genesis.get_payload(), GENESIS_PAYLOAD);
        assert_eq!(genesis.get_previous_digest(), GENESIS_PREVIOUS_DIGEST);
        assert_eq!(genesis.get_nonce(), 0);
    }

    #[test]
    fn test_json_round_trip() {
        let block = create_test_block("json");
        let text = serde_json::to_string(&block).unwrap();
        let back: Block = serde_json::from_str(&text).unwrap();
        assert_eq!(block, back);
        assert!(back.is_consistent());
    }
}
