//! Core error types for vitalog-core.
//!
//! This module defines the error hierarchy using thiserror. Persistence
//! failures always propagate as `Err` -- callers must decide whether to
//! retry or surface them. Expected business outcomes (re-taking a
//! supplement on the same day) are not errors and return sentinel values
//! instead.

use std::path::PathBuf;
use thiserror::Error;

/// Umbrella error type for vitalog-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Ledger-related errors
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Authentication errors
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Quiz session state machine errors
    #[error("Quiz error: {0}")]
    Quiz(#[from] QuizError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Ledger-specific errors.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// A debit would overdraw the coin balance
    #[error("Insufficient coins: tried to spend {requested}, only {available} available")]
    InsufficientCoins { requested: i64, available: i64 },

    /// A debit of zero or negative coins
    #[error("Invalid spend amount: {0}")]
    InvalidAmount(i64),

    /// Underlying storage failure
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Authentication errors (local demo auth).
#[derive(Error, Debug)]
pub enum AuthError {
    /// Email or password was empty
    #[error("Invalid credentials: email and password must not be empty")]
    InvalidCredentials,

    /// Password shorter than the minimum length
    #[error("Password too weak: must be at least 6 characters")]
    WeakPassword,

    /// No active session
    #[error("Not signed in")]
    NotSignedIn,

    /// Underlying storage failure
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Quiz session state machine errors.
///
/// Raised for disallowed transitions; the idempotent repeat-reveal is a
/// no-op, not an error.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum QuizError {
    /// No questions are loaded
    #[error("No quiz session in progress")]
    NotInProgress,

    /// The session already finished
    #[error("Quiz session already completed")]
    SessionCompleted,

    /// Answer selection after the reveal
    #[error("Answer already revealed for this question")]
    AlreadyRevealed,

    /// Reveal or advance without a selected answer
    #[error("No answer selected")]
    NoSelection,

    /// Advance before revealing the answer
    #[error("Answer not revealed yet")]
    NotRevealed,

    /// Going back from the first question
    #[error("Already at the first question")]
    AtFirstQuestion,
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    StorageError::Locked
                } else {
                    StorageError::QueryFailed(err.to_string())
                }
            }
            _ => StorageError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
