//! Core ledger functionality
//!
//! This module contains the blocks, the proof-of-work search that seals
//! them, and the ledger that links and verifies them.

pub mod block;
pub mod ledger;
pub mod proof_of_work;

pub use block::{Block, GENESIS_PAYLOAD, GENESIS_PREVIOUS_DIGEST};
pub use ledger::{ChainViolation, Ledger, ViolationKind};
pub use proof_of_work::{ProofOfWork, MAX_DIFFICULTY};
