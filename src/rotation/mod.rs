//! Rotation representations for 3D orientation.
//!
//! This module provides the representations a rotation can be entered or inspected in,
//! and the conversions between them:
//! - **Quaternion**: unit quaternion `(x, y, z, w)`, the internal pivot representation
//! - **Euler angles**: roll/pitch/yaw in degrees (X, Y, Z axes)
//! - **Rotation matrix**: row-major 3×3
//! - **Axis-angle**: axis vector plus angle in degrees
//! - **Chain**: ordered elemental rotations about X, Y or Z, composed in the world frame
//! - **Axis mapping**: signed permutation of the basis axes, updated in exact 90° steps
//!
//! Representation | Storage        | Constraint          | To quaternion
//! -------------- | -------------- | ------------------- | -------------------------------
//! Quaternion     | x, y, z, w     | \|q\| = 1           | normalize
//! Euler          | roll, pitch, yaw (deg) | pitch ∈ [-90, 90] | half-angle products
//! Matrix         | 3×3 row-major  | RRᵀ = I, det = +1   | Shepperd's method
//! Axis-angle     | axis, angle    | \|axis\| > 0        | (axis·sin(θ/2), cos(θ/2))
//! Chain          | [RotationStep] | none                | qₙ ⊗ … ⊗ q₂ ⊗ q₁
//! Axis mapping   | 3 × SignedAxis | proper permutation  | columns → Shepperd
//!
//! Every value here is an immutable snapshot. A [`RotationResult`] is always derived
//! from one canonical [`RotationSource`] and never edited on its own.
//!
//! Quaternion sign is never canonicalized: `q` and `-q` are the same rotation, and
//! which one a conversion returns depends on the branch it takes. Compare rotations
//! with [`Quaternion::is_approx`], [`Quaternion::angular_distance`], or through their
//! matrices.

use thiserror::Error;

pub mod axis_angle;
pub mod chain;
pub mod euler;
pub mod mapping;
pub mod matrix;
pub mod quaternion;
pub mod representation;
pub mod tolerance;
pub mod validation;

pub use axis_angle::{Axis, AxisAngle};
pub use chain::{RotationChain, RotationStep, StepId, compute_chain};
pub use euler::EulerAngles;
pub use mapping::{AxisMapping, SignedAxis};
pub use matrix::RotationMatrix;
pub use quaternion::Quaternion;
pub use representation::{Representation, RotationResult, RotationSource};
pub use validation::{InputValidator, Repair, Validation, ValidationConfig, ValidationIssue};

/// Errors that can occur in rotation operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RotationError {
    /// A non-finite value reached a checked boundary
    #[error("Invalid number for {field}: {value}")]
    InvalidNumber { field: &'static str, value: f64 },

    /// Axis or signed-axis label that is not one of `x`, `y`, `z` (optionally negated)
    #[error("Invalid axis label: '{0}'")]
    InvalidLabel(String),

    /// Step id not present in the chain
    #[error("Unknown rotation step: {0}")]
    UnknownStep(StepId),

    /// Position outside the chain
    #[error("Step index {index} out of range for chain of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Input that cannot describe a rotation at all
    #[error("Invalid rotation element: {0}")]
    InvalidElement(String),
}

/// Reject NaN and infinities at a checked boundary.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64, RotationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RotationError::InvalidNumber { field, value })
    }
}
