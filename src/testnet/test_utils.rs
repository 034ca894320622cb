//! Test utilities for ledger testing

use crate::core::Ledger;
use crate::utils::FixedClock;

/// Timestamp stamped on every block of a test ledger
pub const TEST_TIMESTAMP: i64 = 1_700_000_000_000;

/// Empty ledger (genesis only) with a fixed clock
pub fn create_test_ledger(difficulty: u32) -> Ledger {
    Ledger::with_clock(difficulty, Box::new(FixedClock(TEST_TIMESTAMP)))
        .expect("Test difficulty should be valid")
}

/// Ledger with one sealed block per payload
pub fn create_populated_ledger(difficulty: u32, payloads: &[&str]) -> Ledger {
    let mut ledger = create_test_ledger(difficulty);
    for payload in payloads {
        ledger
            .append(*payload)
            .expect("Append without an iteration cap should not fail");
    }
    ledger
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_ledgers_are_reproducible() {
        let a = create_populated_ledger(1, &["one", "two"]);
        let b = create_populated_ledger(1, &["one", "two"]);
        assert_eq!(a.blocks(), b.blocks());
    }
}
