// The ledger owns the chain in memory: genesis at index 0, every later block
// sealed under the difficulty fixed at construction.

use crate::config::Config;
use crate::core::{Block, ProofOfWork};
use crate::error::{LedgerError, Result};
use crate::utils::{Clock, SystemClock};
use log::{info, warn};
use std::fmt;

/// What went wrong at the first failing block during verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// Stored digest no longer matches the block's fields
    DigestMismatch { stored: String, computed: String },
    /// `previous_digest` does not match the predecessor's digest
    BrokenLink { expected: String, found: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainViolation {
    pub index: usize,
    pub kind: ViolationKind,
}

impl fmt::Display for ChainViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::DigestMismatch { stored, computed } => write!(
                f,
                "block {} digest mismatch: stored {stored}, computed {computed}",
                self.index
            ),
            ViolationKind::BrokenLink { expected, found } => write!(
                f,
                "block {} broken link: expected previous digest {expected}, found {found}",
                self.index
            ),
        }
    }
}

#[derive(Debug)]
pub struct Ledger {
    blocks: Vec<Block>,
    difficulty: u32,
    max_seal_iterations: Option<u64>, // None searches forever
    clock: Box<dyn Clock>,
}

impl Ledger {
    pub fn new(difficulty: u32) -> Result<Ledger> {
        Self::with_clock(difficulty, Box::new(SystemClock))
    }

    pub fn with_clock(difficulty: u32, clock: Box<dyn Clock>) -> Result<Ledger> {
        Self::with_settings(difficulty, None, clock)
    }

    pub fn with_settings(
        difficulty: u32,
        max_seal_iterations: Option<u64>,
        clock: Box<dyn Clock>,
    ) -> Result<Ledger> {
        let difficulty = ProofOfWork::check_difficulty(i64::from(difficulty))?;
        let genesis = Block::genesis(clock.as_ref())?;
        info!(
            "Created ledger with difficulty {difficulty}, genesis digest {}",
            genesis.get_digest()
        );

        Ok(Ledger {
            blocks: vec![genesis],
            difficulty,
            max_seal_iterations,
            clock,
        })
    }

    pub fn from_config(config: &Config) -> Result<Ledger> {
        Self::with_settings(
            config.get_difficulty()?,
            config.get_max_seal_iterations()?,
            Box::new(SystemClock),
        )
    }

    /// Seal a new block on top of the tip and append it.
    ///
    /// Blocks for the whole nonce search. Only fails when an iteration cap
    /// is configured and exhausted, in which case the chain is unchanged.
    pub fn append(&mut self, payload: impl Into<String>) -> Result<&Block> {
        let index = self.blocks.len() as u64;
        let previous_digest = self.tip().get_digest().to_string();
        let mut block = Block::new(index, payload, previous_digest, self.clock.as_ref())?;

        info!(
            "Starting proof-of-work for block {index} with difficulty {}",
            self.difficulty
        );
        let iterations = block.seal_with_limit(self.difficulty, self.max_seal_iterations)?;
        info!(
            "Proof-of-work completed for block {index} after {iterations} iterations: {}",
            block.get_digest()
        );

        self.blocks.push(block);
        Ok(self.tip())
    }

    pub fn tip(&self) -> &Block {
        self.blocks
            .last()
            .expect("Ledger always holds the genesis block")
    }

    /// Check content and linkage of every block after genesis.
    ///
    /// Proof-of-work is not re-checked.
    pub fn verify(&self) -> bool {
        match self.verify_detailed() {
            Ok(()) => true,
            Err(violation) => {
                warn!("Chain verification failed: {violation}");
                false
            }
        }
    }

    pub fn verify_detailed(&self) -> std::result::Result<(), ChainViolation> {
        for (index, pair) in self.blocks.windows(2).enumerate() {
            let (previous, current) = (&pair[0], &pair[1]);
            let index = index + 1;

            let computed = current.calculate_digest();
            if current.get_digest() != computed {
                return Err(ChainViolation {
                    index,
                    kind: ViolationKind::DigestMismatch {
                        stored: current.get_digest().to_string(),
                        computed,
                    },
                });
            }

            if current.get_previous_digest() != previous.get_digest() {
                return Err(ChainViolation {
                    index,
                    kind: ViolationKind::BrokenLink {
                        expected: previous.get_digest().to_string(),
                        found: current.get_previous_digest().to_string(),
                    },
                });
            }
        }
        Ok(())
    }

    /// Overwrite a block's payload, recomputing only that block's digest.
    ///
    /// Genesis and out-of-range indexes are refused and leave the chain as is.
    pub fn tamper_block(&mut self, index: usize, payload: impl Into<String>) -> Result<()> {
        let len = self.blocks.len();
        if index == 0 || index >= len {
            return Err(LedgerError::TamperRejected { index, len });
        }

        self.blocks[index].tamper_payload(payload);
        warn!("Block {index} has been tampered with");
        Ok(())
    }

    pub fn blocks(&self) -> &[Block] {
        self.blocks.as_slice()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn get_block(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    // Always false, genesis is created with the ledger
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get_difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn get_max_seal_iterations(&self) -> Option<u64> {
        self.max_seal_iterations
    }

    #[cfg(test)]
    pub(crate) fn block_mut(&mut self, index: usize) -> &mut Block {
        &mut self.blocks[index]
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
