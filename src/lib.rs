//! # Sealed Ledger - A Hash-Linked Chain With Proof-of-Work
//!
//! This is my small ledger for studying how a blockchain protects its own
//! history. When I come back to this code, here's what I need to remember:
//!
//! ## What I Built
//! - **Content Addressing**: every block's SHA-256 digest covers its index,
//!   timestamp, payload, previous digest and nonce, serialized as sorted-key JSON
//! - **Proof-of-Work Sealing**: a nonce search for a digest with N leading zeros
//! - **Tamper Detection**: verification recomputes every digest and checks
//!   every link back to genesis
//!
//! ## How I Organized My Code
//! - `core/`: blocks, the proof-of-work search and the ledger itself
//! - `config/`: difficulty and iteration cap from defaults, TOML, env vars
//! - `utils/`: hashing, canonical JSON and the clock abstraction
//! - `cli/`: command-line arguments for the demo binary
//!
//! ## Things That Look Like Bugs But Aren't
//! - The genesis block is never sealed, only the blocks after it.
//! - `Ledger::verify` checks integrity, not work. A block whose digest no
//!   longer meets the difficulty still verifies if it is consistent and linked.
//! - Tampering recomputes the tampered block's digest, so the damage only shows
//!   up in the *next* block's link. Tampering with the tip goes unnoticed.
//!
//! Nothing here is persisted or networked; a `Ledger` lives in memory and is
//! owned by whoever created it.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;

#[cfg(test)]
pub mod testnet;

// Re-export commonly used types for convenience
pub use cli::{Command, Opt, OutputFormat};
pub use config::{Config, GLOBAL_CONFIG};
pub use core::{Block, ChainViolation, Ledger, ProofOfWork, ViolationKind};
pub use error::{LedgerError, Result};
pub use utils::{Clock, FixedClock, SystemClock};
