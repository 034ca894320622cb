//! Utility functions and helpers
//!
//! This module contains hashing, canonical serialization and the clock
//! abstraction used throughout the ledger.

pub mod clock;
pub mod crypto;
pub mod serialization;

pub use clock::{Clock, FixedClock, SystemClock};
pub use crypto::{current_timestamp, sha256_digest, sha256_hex, DIGEST_HEX_LEN};
pub use serialization::{canonical_json, to_pretty_json};
