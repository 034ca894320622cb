//! Time sources used to stamp new blocks

use crate::error::Result;
use crate::utils::current_timestamp;
use std::fmt::Debug;

/// Source of block timestamps in milliseconds since the Unix epoch
pub trait Clock: Debug + Send + Sync {
    fn now(&self) -> Result<i64>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Result<i64> {
        current_timestamp()
    }
}

/// Always returns the same instant, for reproducible digests in tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> Result<i64> {
        Ok(self.0)
    }
}
