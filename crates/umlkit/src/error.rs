//! Error types for UMLKit operations.
//!
//! This module provides the main error type [`UmlError`] which wraps
//! the failures that can occur while editing, saving or loading diagrams.

use std::io;

use thiserror::Error;

use umlkit_core::error::ModelError;

/// The main error type for UMLKit operations.
///
/// Model rule violations are carried unchanged in the `Model` variant, so a
/// front end can tell "class not found" from "disk full" without parsing
/// messages.
#[derive(Debug, Error)]
pub enum UmlError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Model(#[from] ModelError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl UmlError {
    /// Create a new `Storage` error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}

impl From<tempfile::PersistError> for UmlError {
    fn from(err: tempfile::PersistError) -> Self {
        Self::Io(err.error)
    }
}
