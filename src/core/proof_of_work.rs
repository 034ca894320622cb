use crate::core::Block;
use crate::error::{LedgerError, Result};
use crate::utils::DIGEST_HEX_LEN;
use log::{debug, info};

/// Largest difficulty a hex SHA-256 digest can satisfy
pub const MAX_DIFFICULTY: u32 = DIGEST_HEX_LEN as u32;

/// Leading-zero nonce search over a block's digest
pub struct ProofOfWork {
    difficulty: u32,
    max_iterations: Option<u64>,
}

impl ProofOfWork {
    pub fn new(difficulty: u32) -> ProofOfWork {
        ProofOfWork {
            difficulty,
            max_iterations: None,
        }
    }

    pub fn with_limit(difficulty: u32, max_iterations: u64) -> ProofOfWork {
        ProofOfWork {
            difficulty,
            max_iterations: Some(max_iterations),
        }
    }

    /// Reject difficulties that are negative or longer than the digest
    pub fn check_difficulty(difficulty: i64) -> Result<u32> {
        if (0..=MAX_DIFFICULTY as i64).contains(&difficulty) {
            Ok(difficulty as u32)
        } else {
            Err(LedgerError::InvalidDifficulty {
                difficulty,
                max: MAX_DIFFICULTY,
            })
        }
    }

    /// True when `digest` starts with at least `difficulty` `'0'` characters
    pub fn meets_target(digest: &str, difficulty: u32) -> bool {
        let difficulty = difficulty as usize;
        digest.len() >= difficulty && digest.bytes().take(difficulty).all(|b| b == b'0')
    }

    /// Content is consistent and the digest meets the target.
    ///
    /// Chain verification does not use this; it is for callers that want to
    /// re-check the work itself.
    pub fn validate(block: &Block, difficulty: u32) -> bool {
        block.is_consistent() && Self::meets_target(block.get_digest(), difficulty)
    }

    pub fn get_difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn get_max_iterations(&self) -> Option<u64> {
        self.max_iterations
    }

    /// Unbounded search. Ignores any configured cap and wraps the nonce
    /// back to 0 once it passes `u64::MAX`.
    pub fn run(&self, block: &mut Block) -> u64 {
        debug!(
            "Mining block {} at difficulty {}",
            block.get_index(),
            self.difficulty
        );
        let mut iterations: u64 = 0;
        while !Self::meets_target(block.get_digest(), self.difficulty) {
            if block.increment_nonce().is_err() {
                debug!("Nonce wrapped for block {}", block.get_index());
                block.restart_nonce();
            }
            iterations = iterations.saturating_add(1);
        }
        iterations
    }

    /// Search that stops with `LedgerError::Mining` once the cap is spent
    /// or the nonce reaches `u64::MAX`.
    pub fn run_with_limit(&self, block: &mut Block) -> Result<u64> {
        let Some(max) = self.max_iterations else {
            return Ok(self.run(block));
        };

        let mut iterations = 0;
        while !Self::meets_target(block.get_digest(), self.difficulty) {
            if iterations >= max {
                info!(
                    "Giving up on block {} after {iterations} iterations",
                    block.get_index()
                );
                return Err(LedgerError::Mining(format!(
                    "No nonce meeting difficulty {} found for block {} within {max} iterations",
                    self.difficulty,
                    block.get_index()
                )));
            }
            block.increment_nonce()?;
            iterations += 1;
        }
        Ok(iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::FixedClock;

    fn create_test_block() -> Block {
        Block::new(1, "pow test", "prev", &FixedClock(1_000)).unwrap()
    }

    #[test]
    fn test_meets_target() {
        assert!(ProofOfWork::meets_target("00ab", 0));
        assert!(ProofOfWork::meets_target("00ab", 2));
        assert!(!ProofOfWork::meets_target("00ab", 3));
        assert!(!ProofOfWork::meets_target("0ab0", 2));
        assert!(!ProofOfWork::meets_target("00", 3));
    }

    #[test]
    fn test_run_finds_valid_nonce() {
        let mut block = create_test_block();
        let pow = ProofOfWork::new(2);
        let iterations = pow.run(&mut block);

        assert_eq!(block.get_nonce(), iterations);
        assert!(ProofOfWork::validate(&block, 2));
    }

    #[test]
    fn test_run_is_reproducible() {
        let mut a = create_test_block();
        let mut b = create_test_block();
        ProofOfWork::new(3).run(&mut a);
        ProofOfWork::new(3).run(&mut b);

        assert_eq!(a.get_nonce(), b.get_nonce());
        assert_eq!(a.get_digest(), b.get_digest());
    }

    #[test]
    fn test_run_with_limit_success() {
        let mut block = create_test_block();
        let iterations = ProofOfWork::with_limit(1, 10_000)
            .run_with_limit(&mut block)
            .unwrap();

        assert!(iterations <= 10_000);
        assert!(ProofOfWork::validate(&block, 1));
    }

    #[test]
    fn test_run_with_limit_exhausted() {
        let mut block = create_test_block();
        let pow = ProofOfWork::with_limit(MAX_DIFFICULTY, 5);

        assert_eq!(pow.get_max_iterations(), Some(5));
        assert!(matches!(
            pow.run_with_limit(&mut block),
            Err(LedgerError::Mining(_))
        ));
        assert_eq!(block.get_nonce(), 5);
    }

    #[test]
    fn test_validate_rejects_inconsistent_block() {
        let mut block = create_test_block();
        ProofOfWork::new(1).run(&mut block);
        block.force_nonce(block.get_nonce() + 1);

        assert!(!ProofOfWork::validate(&block, 1));
    }

    #[test]
    fn test_check_difficulty() {
        assert_eq!(ProofOfWork::check_difficulty(0).unwrap(), 0);
        assert_eq!(ProofOfWork::check_difficulty(64).unwrap(), 64);
        assert_eq!(
            ProofOfWork::check_difficulty(65),
            Err(LedgerError::InvalidDifficulty {
                difficulty: 65,
                max: 64
            })
        );
        assert!(ProofOfWork::check_difficulty(-1).is_err());
    }
}
