//! # Theme Error Types
//!
//! This module provides the error types for the theme package engine,
//! replacing stringly errors with specific, context-rich variants.
//!
//! Every variant owns plain data so the error is [Clone]; the loader hands the
//! same result to every caller waiting on one in-flight resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while validating, registering or loading theme packages.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThemeError {
    /// The package failed validation.
    #[error("Invalid theme package configuration: {}", errors.join(", "))]
    Validation {
        /// Every validation error, in the order they were found.
        errors: Vec<String>,
        /// Warnings collected alongside the errors.
        warnings: Vec<String>,
    },

    /// A package with the specified id is not known.
    #[error("Theme package with ID '{id}' not found")]
    NotFound {
        /// The id that was looked up.
        id: String,
    },

    /// A package with the specified id is already registered.
    #[error("Theme package with ID '{id}' already exists")]
    AlreadyExists {
        /// The conflicting id.
        id: String,
    },

    /// The package could not be materialised from its source.
    #[error("Failed to load theme package '{id}': {details}")]
    Resolution {
        /// The id that was being resolved.
        id: String,
        /// What went wrong.
        details: String,
    },

    /// Error parsing a serialised theme package.
    #[error("Failed to parse theme package: {details}")]
    Parse {
        /// Details about the parse error.
        details: String,
    },

    /// Error reading a file.
    #[error("I/O error on {path:?}: {details}")]
    Io {
        /// The path being accessed.
        path: PathBuf,
        /// The rendered I/O error.
        details: String,
    },

    /// Error reading engine configuration.
    #[error("Invalid engine configuration: {details}")]
    Config {
        /// Details about the configuration problem.
        details: String,
    },
}

/// Result type alias for theme operations.
pub type ThemeResult<T> = Result<T, ThemeError>;

impl ThemeError {
    /// Create a validation error from collected messages.
    pub fn validation(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self::Validation { errors, warnings }
    }

    /// Create a not found error.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create an already exists error.
    pub fn already_exists(id: impl Into<String>) -> Self {
        Self::AlreadyExists { id: id.into() }
    }

    /// Create a resolution error.
    pub fn resolution(id: impl Into<String>, details: impl std::fmt::Display) -> Self {
        Self::Resolution {
            id: id.into(),
            details: details.to_string(),
        }
    }

    /// Create a parse error from any displayable error.
    pub fn parse(details: impl std::fmt::Display) -> Self {
        Self::Parse {
            details: details.to_string(),
        }
    }

    /// Create an I/O error for a path.
    pub fn io(path: impl Into<PathBuf>, source: &std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            details: source.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(details: impl std::fmt::Display) -> Self {
        Self::Config {
            details: details.to_string(),
        }
    }

    /// Whether this error means the package id is unknown.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<serde_json::Error> for ThemeError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err)
    }
}

/// Error returned by a registry event listener.
///
/// Listener failures are logged by the registry and never reach the caller of
/// the operation that emitted the event.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ListenerError {
    message: String,
}

impl ListenerError {
    /// Create a listener error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
