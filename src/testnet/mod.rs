//! Shared helpers for ledger unit tests
//!
//! Ledgers built here use a fixed clock so digests and nonces are
//! reproducible from run to run.

pub mod test_utils;

pub use test_utils::*;
