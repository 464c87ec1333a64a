//! Error types for nestkv
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using NestError
pub type Result<T> = std::result::Result<T, NestError>;

/// Unified error type for nestkv operations
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum NestError {
    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    #[error("Key not found")]
    KeyNotFound,

    // -------------------------------------------------------------------------
    // Transaction Errors
    // -------------------------------------------------------------------------
    #[error("No active transaction")]
    NoActiveTransaction,

    #[error("Transaction already committed")]
    AlreadyCommitted,

    #[error("Transaction already rolled back")]
    AlreadyRolledBack,
}
