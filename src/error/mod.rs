//! Error handling for the ledger
//!
//! This module provides the error types for ledger construction, sealing,
//! tampering and configuration.

use std::fmt;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Error types for ledger operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Difficulty is negative or longer than the hex digest
    InvalidDifficulty { difficulty: i64, max: u32 },
    /// Tamper hook refused the index (genesis or out of range)
    TamperRejected { index: usize, len: usize },
    /// Proof-of-work search gave up
    Mining(String),
    /// Configuration errors
    Config(String),
    /// Serialization errors
    Serialization(String),
    /// File I/O errors
    Io(String),
    /// System clock errors
    Clock(String),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::InvalidDifficulty { difficulty, max } => {
                write!(f, "Invalid difficulty {difficulty}: must be between 0 and {max}")
            }
            LedgerError::TamperRejected { index, len } => {
                write!(
                    f,
                    "Tamper rejected: index {index} is not a mutable block (chain length {len})"
                )
            }
            LedgerError::Mining(msg) => write!(f, "Mining error: {msg}"),
            LedgerError::Config(msg) => write!(f, "Configuration error: {msg}"),
            LedgerError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            LedgerError::Io(msg) => write!(f, "I/O error: {msg}"),
            LedgerError::Clock(msg) => write!(f, "Clock error: {msg}"),
        }
    }
}

impl std::error::Error for LedgerError {}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for LedgerError {
    fn from(err: toml::de::Error) -> Self {
        LedgerError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_difficulty_message() {
        let err = LedgerError::InvalidDifficulty {
            difficulty: 65,
            max: 64,
        };
        assert_eq!(
            err.to_string(),
            "Invalid difficulty 65: must be between 0 and 64"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: LedgerError = io.into();
        assert!(matches!(err, LedgerError::Io(_)));
    }
}
