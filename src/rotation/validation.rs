//! Classification and repair of raw quaternion and matrix input.
//!
//! Validation never fails on a bad rotation: it returns a [`Validation`] describing
//! what is wrong and whether a deterministic [`Repair`] exists. The only error is a
//! non-finite number, which is a contract violation rather than a rotation property.
//!
//! | Issue              | Input      | Repair                |
//! | ------------------ | ---------- | --------------------- |
//! | `ZeroMagnitude`    | quaternion | none                  |
//! | `NotNormalized`    | quaternion | [`Repair::Normalize`] |
//! | `Singular`         | matrix     | none                  |
//! | `ImproperRotation` | matrix     | none                  |
//! | `NotOrthonormal`   | matrix     | [`Repair::Orthonormalize`] |

use std::fmt;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::rotation::tolerance::{
    DEGENERACY_THRESHOLD, NORMALIZATION_TOLERANCE, ORTHONORMALITY_TOLERANCE,
    SINGULARITY_THRESHOLD,
};
use crate::rotation::{Quaternion, RotationError, RotationMatrix};

/// Thresholds used by [`InputValidator`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Quaternion magnitude and column length below which input has no direction
    pub degeneracy_threshold: f64,
    /// Determinant magnitude below which a matrix is singular
    pub singularity_threshold: f64,
    /// Largest accepted `| |q| - 1 |`
    pub normalization_tolerance: f64,
    /// Largest accepted entry of `|R·Rᵀ - I|`
    pub orthonormality_tolerance: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            degeneracy_threshold: DEGENERACY_THRESHOLD,
            singularity_threshold: SINGULARITY_THRESHOLD,
            normalization_tolerance: NORMALIZATION_TOLERANCE,
            orthonormality_tolerance: ORTHONORMALITY_TOLERANCE,
        }
    }
}

impl ValidationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_degeneracy_threshold(mut self, threshold: f64) -> Self {
        self.degeneracy_threshold = threshold;
        self
    }

    pub fn with_singularity_threshold(mut self, threshold: f64) -> Self {
        self.singularity_threshold = threshold;
        self
    }

    pub fn with_normalization_tolerance(mut self, tolerance: f64) -> Self {
        self.normalization_tolerance = tolerance;
        self
    }

    pub fn with_orthonormality_tolerance(mut self, tolerance: f64) -> Self {
        self.orthonormality_tolerance = tolerance;
        self
    }
}

/// Deterministic fix offered for a recoverable issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Repair {
    Normalize,
    Orthonormalize,
}

impl fmt::Display for Repair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Repair::Normalize => f.write_str("normalize"),
            Repair::Orthonormalize => f.write_str("orthonormalize"),
        }
    }
}

/// Reason raw input is not a valid rotation.
#[derive(Debug, Clone, Copy, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum ValidationIssue {
    #[error("Quaternion has zero magnitude ({magnitude:e})")]
    ZeroMagnitude { magnitude: f64 },

    #[error("Quaternion is not normalized (magnitude {magnitude:.6})")]
    NotNormalized { magnitude: f64 },

    #[error("Matrix is singular (determinant {determinant:e})")]
    Singular { determinant: f64 },

    #[error("Matrix is a reflection (determinant {determinant:.6})")]
    ImproperRotation { determinant: f64 },

    #[error("Matrix is not orthonormal (max deviation {max_deviation:.6})")]
    NotOrthonormal { max_deviation: f64 },
}

impl ValidationIssue {
    /// Repair offered for this issue, if any.
    pub fn repair(&self) -> Option<Repair> {
        match self {
            ValidationIssue::NotNormalized { .. } => Some(Repair::Normalize),
            ValidationIssue::NotOrthonormal { .. } => Some(Repair::Orthonormalize),
            ValidationIssue::ZeroMagnitude { .. }
            | ValidationIssue::Singular { .. }
            | ValidationIssue::ImproperRotation { .. } => None,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        self.repair().is_some()
    }
}

/// Outcome of validating raw input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum Validation {
    Valid,
    Invalid(ValidationIssue),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    pub fn issue(&self) -> Option<ValidationIssue> {
        match self {
            Validation::Valid => None,
            Validation::Invalid(issue) => Some(*issue),
        }
    }

    pub fn repair(&self) -> Option<Repair> {
        self.issue().and_then(|issue| issue.repair())
    }
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validation::Valid => f.write_str("valid"),
            Validation::Invalid(issue) => match issue.repair() {
                Some(repair) => write!(f, "invalid: {issue} (repair: {repair})"),
                None => write!(f, "invalid: {issue}"),
            },
        }
    }
}

/// Validator for raw quaternion and matrix input.
#[derive(Debug, Clone, Default)]
pub struct InputValidator {
    config: ValidationConfig,
}

impl InputValidator {
    /// Create a validator with the default thresholds.
    pub fn new() -> Self {
        Self::with_config(ValidationConfig::default())
    }

    pub fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Classify a raw quaternion.
    pub fn validate_quaternion(&self, q: &Quaternion) -> Result<Validation, RotationError> {
        ensure_finite_quaternion(q)?;

        let magnitude = q.magnitude();
        let outcome = if magnitude < self.config.degeneracy_threshold {
            Validation::Invalid(ValidationIssue::ZeroMagnitude { magnitude })
        } else if (magnitude - 1.0).abs() > self.config.normalization_tolerance {
            Validation::Invalid(ValidationIssue::NotNormalized { magnitude })
        } else {
            Validation::Valid
        };

        debug!(magnitude, %outcome, "validated quaternion");
        Ok(outcome)
    }

    /// Classify a raw 3×3 matrix.
    ///
    /// Checks run in order: singular, reflection, then orthonormality.
    pub fn validate_matrix(&self, matrix: &RotationMatrix) -> Result<Validation, RotationError> {
        matrix.ensure_finite()?;

        let determinant = matrix.determinant();
        let outcome = if determinant.abs() < self.config.singularity_threshold {
            Validation::Invalid(ValidationIssue::Singular { determinant })
        } else if determinant < 0.0 {
            Validation::Invalid(ValidationIssue::ImproperRotation { determinant })
        } else {
            let max_deviation = matrix.orthonormality_error();
            if max_deviation > self.config.orthonormality_tolerance {
                Validation::Invalid(ValidationIssue::NotOrthonormal { max_deviation })
            } else {
                Validation::Valid
            }
        };

        debug!(determinant, %outcome, "validated matrix");
        Ok(outcome)
    }

    /// Nearest right-handed orthonormal frame by Gram–Schmidt on the first two
    /// columns.
    ///
    /// The third column is rebuilt as `u0 × u1` and the input's third column is
    /// ignored, so the result always has determinant +1. A degenerate first column
    /// falls back to `(1, 0, 0)`; a second column parallel to the first falls back
    /// to any direction orthogonal to it.
    pub fn orthonormalize_matrix(&self, matrix: &RotationMatrix) -> RotationMatrix {
        let threshold = self.config.degeneracy_threshold;
        let col0 = matrix.column(0);
        let col1 = matrix.column(1);

        let u0 = match col0.try_normalize(threshold) {
            Some(u) => u,
            None => {
                debug!(length = col0.norm(), "degenerate first column, using x axis");
                Vector3::x()
            }
        };

        let u1 = match (col1 - col1.dot(&u0) * u0).try_normalize(threshold) {
            Some(u) => u,
            None => {
                debug!("second column parallel to first, choosing orthogonal direction");
                let helper = if u0.x.abs() < 0.9 {
                    Vector3::x()
                } else {
                    Vector3::y()
                };
                (helper - helper.dot(&u0) * u0).normalize()
            }
        };

        let u2 = u0.cross(&u1);
        RotationMatrix::from_columns(&[u0, u1, u2])
    }

    /// Apply the repair offered for `q`.
    ///
    /// Returns the input unchanged when it is already valid and `None` when the
    /// issue is unrecoverable.
    pub fn repair_quaternion(&self, q: &Quaternion) -> Result<Option<Quaternion>, RotationError> {
        let outcome = self.validate_quaternion(q)?;
        Ok(match outcome {
            Validation::Valid => Some(*q),
            Validation::Invalid(issue) => match issue.repair() {
                Some(Repair::Normalize) => Some(q.normalize()),
                _ => None,
            },
        })
    }

    /// Apply the repair offered for `matrix`.
    ///
    /// Returns the input unchanged when it is already valid and `None` when the
    /// issue is unrecoverable.
    pub fn repair_matrix(
        &self,
        matrix: &RotationMatrix,
    ) -> Result<Option<RotationMatrix>, RotationError> {
        let outcome = self.validate_matrix(matrix)?;
        Ok(match outcome {
            Validation::Valid => Some(*matrix),
            Validation::Invalid(issue) => match issue.repair() {
                Some(Repair::Orthonormalize) => Some(self.orthonormalize_matrix(matrix)),
                _ => None,
            },
        })
    }
}

fn ensure_finite_quaternion(q: &Quaternion) -> Result<(), RotationError> {
    Quaternion::try_new(q.x, q.y, q.z, q.w).map(|_| ())
}
