//! Error types for the Shift Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while accounting for shifts.

use chrono::NaiveDateTime;
use thiserror::Error;

/// The main error type for the Shift Engine.
///
/// Every fallible operation in the engine returns this error type. None of
/// them are retried internally; the caller decides what the user sees.
///
/// # Example
///
/// ```
/// use shift_engine::error::EngineError;
///
/// let error = EngineError::NoActiveShift {
///     worker_id: "driver_001".to_string(),
/// };
/// assert_eq!(error.to_string(), "No active shift for worker 'driver_001'");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value was out of range.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// The interval ends before it starts or a timestamp could not be parsed.
    #[error("Invalid interval: {message}")]
    InvalidInterval {
        /// A description of what made the interval invalid.
        message: String,
    },

    /// A shift was started while one is already open for the worker.
    #[error("Worker '{worker_id}' already has an active shift started at {started_at}")]
    AlreadyActive {
        /// The worker whose shift is open.
        worker_id: String,
        /// When the open shift started.
        started_at: NaiveDateTime,
    },

    /// A shift was polled or stopped while none is open.
    #[error("No active shift for worker '{worker_id}'")]
    NoActiveShift {
        /// The worker without an open shift.
        worker_id: String,
    },

    /// The persisted marker no longer matches the shift this clock opened.
    #[error(
        "Active shift marker for worker '{worker_id}' changed: expected start {expected}, found {found}"
    )]
    MarkerConflict {
        /// The worker whose marker diverged.
        worker_id: String,
        /// The start time held in memory.
        expected: NaiveDateTime,
        /// The start time found in the store.
        found: NaiveDateTime,
    },

    /// A read or write against the backing store failed.
    #[error("Store unavailable for key '{key}': {message}")]
    StoreUnavailable {
        /// The key being accessed.
        key: String,
        /// A description of the failure.
        message: String,
    },

    /// A stored value could not be decoded.
    #[error("Corrupt record at key '{key}': {message}")]
    CorruptRecord {
        /// The key holding the bad value.
        key: String,
        /// A description of the decode failure.
        message: String,
    },
}

impl EngineError {
    /// Builds an [`EngineError::InvalidInterval`] from any message.
    pub fn invalid_interval(message: impl Into<String>) -> Self {
        EngineError::InvalidInterval {
            message: message.into(),
        }
    }

    /// Builds an [`EngineError::StoreUnavailable`] for a key.
    pub fn store_unavailable(key: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::StoreUnavailable {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
