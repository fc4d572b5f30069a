//! Text encodings consumed by the state-persistence layer.
//!
//! - [`chain`]: `x.90_y.-45` step lists
//! - [`mapping`]: `-y.z.-x` signed-axis mappings
//! - [`display`]: fixed-precision rendering of quaternions, Euler angles and matrices

use thiserror::Error;

use crate::rotation::RotationError;

// Module declarations
pub mod chain;
pub mod display;
pub mod mapping;

// Re-exports
pub use chain::{decode_chain, decode_segment, encode_chain};
pub use display::DisplayConfig;
pub use mapping::{decode_mapping, encode_mapping};

/// Errors that can occur while decoding text input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IoError {
    #[error("Parse error in '{input}': {message}")]
    Parse { input: String, message: String },

    #[error("Invalid axis label: '{0}'")]
    InvalidLabel(String),

    #[error("Invalid number for {field}: '{value}'")]
    InvalidNumber { field: String, value: String },

    #[error("Expected {expected} fields, found {found}")]
    MissingFields { expected: usize, found: usize },

    #[error("Mapping '{0}' is not a proper rotation")]
    InvalidMapping(String),

    #[error(transparent)]
    Rotation(#[from] RotationError),
}

/// Parse exactly `expected` comma-separated finite numbers.
///
/// Whitespace around each value is ignored.
pub fn parse_number_list(input: &str, expected: usize, field: &str) -> Result<Vec<f64>, IoError> {
    let parts: Vec<&str> = input.split(',').map(str::trim).collect();
    if parts.len() != expected {
        return Err(IoError::MissingFields {
            expected,
            found: parts.len(),
        });
    }

    parts
        .iter()
        .enumerate()
        .map(|(i, part)| {
            part.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| IoError::InvalidNumber {
                    field: format!("{field}[{i}]"),
                    value: (*part).to_string(),
                })
        })
        .collect()
}
