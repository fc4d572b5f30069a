//! Numerical tolerances shared by the rotation engine.
//!
//! Every threshold the converters and the validator compare against lives here so
//! that call sites never carry their own literals.

/// Magnitude below which a quaternion, axis vector or matrix column counts as zero.
///
/// Unit-scale inputs carry rounding error around 1e-16, so only input that is
/// genuinely empty reaches the fallback paths (identity rotation, axis `(1, 0, 0)`).
pub const DEGENERACY_THRESHOLD: f64 = 1e-10;

/// Largest accepted `| |q| - 1 |` before a quaternion is reported as not normalized.
///
/// Components typed at four-decimal display precision stay well inside this band.
pub const NORMALIZATION_TOLERANCE: f64 = 0.01;

/// Largest accepted absolute entry of `R·Rᵀ - I` before a matrix is reported as not
/// orthonormal.
///
/// Same band as [`NORMALIZATION_TOLERANCE`]: a matrix re-entered from its four-decimal
/// rendering must still validate.
pub const ORTHONORMALITY_TOLERANCE: f64 = 0.01;

/// Largest `| |q| - 1 |` accepted for a quaternion the engine itself produced.
pub const UNIT_TOLERANCE: f64 = 1e-9;

/// Determinant magnitude below which a matrix is singular.
pub const SINGULARITY_THRESHOLD: f64 = DEGENERACY_THRESHOLD;
