//! Error types for personkv
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using PersonKvError
pub type Result<T> = std::result::Result<T, PersonKvError>;

/// Unified error type for personkv operations
#[derive(Debug, Error)]
pub enum PersonKvError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Record Errors
    // -------------------------------------------------------------------------
    #[error("Malformed record: expected {expected} bytes, got {available}")]
    MalformedRecord { expected: usize, available: usize },

    #[error("Name too long: {0} bytes (max 255)")]
    NameTooLong(usize),

    #[error("Invalid {field}: expected {expected} bytes, got {actual}")]
    InvalidField {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    // -------------------------------------------------------------------------
    // Input Errors
    // -------------------------------------------------------------------------
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // -------------------------------------------------------------------------
    // Store Errors
    // -------------------------------------------------------------------------
    #[error("Store unavailable at {}: {source}", .path.display())]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
