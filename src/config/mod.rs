//! Configuration management
//!
//! This module handles the ledger settings: the proof-of-work difficulty
//! and the optional cap on nonce search iterations.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `LEDGER_*` environment variables, then command-line flags.

pub mod settings;

pub use settings::{Config, GLOBAL_CONFIG};
