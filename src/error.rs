//! Error types for the apex-rotations library
//!
//! This module provides the crate-level error and result types. Module errors
//! ([`RotationError`], [`IoError`]) convert into [`ApexError`] so callers that mix
//! decoding, resolution and validation can use a single `?` chain.

use std::num::ParseFloatError;

use thiserror::Error;

use crate::io::IoError;
use crate::rotation::{RotationError, ValidationIssue};

/// Main result type used throughout the apex-rotations library
pub type ApexResult<T> = Result<T, ApexError>;

/// Main error type for the apex-rotations library
#[derive(Debug, Clone, Error)]
pub enum ApexError {
    /// Rotation construction or conversion errors
    #[error("Rotation error: {0}")]
    Rotation(String),

    /// Text decoding errors
    #[error("IO error: {0}")]
    Io(String),

    /// Input that failed validation and has no repair
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid input parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Logging subscriber could not be installed
    #[error("Logger error: {0}")]
    Logger(String),
}

impl From<ParseFloatError> for ApexError {
    fn from(err: ParseFloatError) -> Self {
        ApexError::InvalidInput(format!("Failed to parse float: {err}"))
    }
}

// Convert module-specific errors to ApexError

impl From<RotationError> for ApexError {
    fn from(err: RotationError) -> Self {
        ApexError::Rotation(err.to_string())
    }
}

impl From<IoError> for ApexError {
    fn from(err: IoError) -> Self {
        ApexError::Io(err.to_string())
    }
}

impl From<ValidationIssue> for ApexError {
    fn from(issue: ValidationIssue) -> Self {
        ApexError::Validation(issue.to_string())
    }
}
