//! Error types for the tagnotes application.
//!
//! This module defines custom error types that categorize different failures
//! that can occur while managing notes and their persisted state.

use std::io;

use thiserror::Error;

/// The main error type for the tagnotes application.
#[derive(Error, Debug)]
pub enum NoteError {
    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Input rejected at creation or edit time (empty title/content).
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// Note was not found when performing an operation.
    #[error("Note not found: {id}")]
    NotFound { id: String },

    /// Persisted state could not be parsed at restore time.
    #[error("Stored state is corrupt: {message}")]
    CorruptState { message: String },

    /// Audio capture source could not be opened or read.
    #[error("Media access failed: {message}")]
    MediaAccess { message: String },

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// External editor could not be launched or exited abnormally.
    #[error("Editor error: {message}")]
    Editor { message: String },
}
