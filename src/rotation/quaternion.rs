//! Quaternion algebra.
//!
//! This module provides the quaternion value type used as the pivot between all
//! rotation representations, stored as `(x, y, z, w)` with `w` the scalar part.
//!
//! Unlike a strictly unit quaternion type, a [`Quaternion`] can hold raw user input
//! of any magnitude so that the validator can classify it. Everything the
//! converters produce is unit length (within 1e-9) unless documented as degenerate.
//!
//! # Composition convention
//!
//! `a.multiply(&b)` is the Hamilton product `a ⊗ b`, meaning "apply `b` first, then
//! `a`". The left operand is the newer, outer rotation.
//!
//! # Examples
//!
//! ```
//! use apex_rotations::rotation::Quaternion;
//!
//! let q = Quaternion::new(0.0, 0.0, 0.0, 2.0);
//! let unit = q.normalize();
//! assert_eq!(unit, Quaternion::identity());
//! ```

use std::f64::consts::PI;
use std::fmt;
use std::ops::Mul;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rotation::tolerance::DEGENERACY_THRESHOLD;
use crate::rotation::{RotationError, ensure_finite};

/// A quaternion `w + xi + yj + zk`.
///
/// `q` and `-q` describe the same rotation (double cover); no operation in this
/// crate picks a preferred sign.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    /// i component
    pub x: f64,
    /// j component
    pub y: f64,
    /// k component
    pub z: f64,
    /// Real (scalar) part
    pub w: f64,
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quaternion(x: {:.4}, y: {:.4}, z: {:.4}, w: {:.4})",
            self.x, self.y, self.z, self.w
        )
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl Quaternion {
    /// Create a quaternion from raw components. No normalization is applied.
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Create a quaternion from raw components, rejecting non-finite values.
    pub fn try_new(x: f64, y: f64, z: f64, w: f64) -> Result<Self, RotationError> {
        Ok(Self {
            x: ensure_finite("quaternion.x", x)?,
            y: ensure_finite("quaternion.y", y)?,
            z: ensure_finite("quaternion.z", z)?,
            w: ensure_finite("quaternion.w", w)?,
        })
    }

    /// The identity rotation `(0, 0, 0, 1)`.
    #[inline]
    pub const fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Sample a rotation uniformly over SO(3) (Shoemake's subgroup algorithm).
    pub fn random() -> Self {
        let u1 = rand::random::<f64>();
        let u2 = rand::random::<f64>() * 2.0 * PI;
        let u3 = rand::random::<f64>() * 2.0 * PI;

        let a = (1.0 - u1).sqrt();
        let b = u1.sqrt();

        Self::new(a * u2.sin(), a * u2.cos(), b * u3.sin(), b * u3.cos()).normalize()
    }

    /// Components as `[x, y, z, w]`.
    #[inline]
    pub fn coords(&self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// True if every component is finite.
    pub fn is_finite(&self) -> bool {
        self.coords().iter().all(|c| c.is_finite())
    }

    /// Squared Euclidean norm of the four components.
    ///
    /// Overflows to infinity for components beyond about 1e154; use
    /// [`Quaternion::magnitude`] when the input is not known to be unit scale.
    #[inline]
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    /// Largest absolute component.
    #[inline]
    fn max_abs_component(&self) -> f64 {
        self.x.abs().max(self.y.abs()).max(self.z.abs()).max(self.w.abs())
    }

    /// Components divided by the largest absolute component, with that divisor.
    ///
    /// The scaled quaternion has its largest component at ±1, so its squared norm
    /// lies in `[1, 4]` and neither overflows nor underflows.
    fn scaled(&self) -> Option<(Self, f64)> {
        let scale = self.max_abs_component();
        if scale == 0.0 || !scale.is_finite() {
            return None;
        }
        let scaled = Self::new(
            self.x / scale,
            self.y / scale,
            self.z / scale,
            self.w / scale,
        );
        Some((scaled, scale))
    }

    /// Euclidean norm of the four components.
    ///
    /// Computed on the scaled components so that large finite input yields a finite
    /// norm whenever the norm itself is representable.
    pub fn magnitude(&self) -> f64 {
        match self.scaled() {
            Some((scaled, scale)) => scale * scaled.magnitude_squared().sqrt(),
            None => self.magnitude_squared().sqrt(),
        }
    }

    /// Return the unit quaternion pointing in the same direction.
    ///
    /// A quaternion with magnitude below [`DEGENERACY_THRESHOLD`] has no direction;
    /// the identity rotation is returned in that case instead of an error.
    pub fn normalize(&self) -> Self {
        let magnitude = self.magnitude();
        if magnitude < DEGENERACY_THRESHOLD {
            debug!(magnitude, "degenerate quaternion normalized to identity");
            return Self::identity();
        }

        let Some((scaled, _)) = self.scaled() else {
            debug!(magnitude, "non-finite quaternion normalized to identity");
            return Self::identity();
        };
        let norm = scaled.magnitude_squared().sqrt();
        Self::new(
            scaled.x / norm,
            scaled.y / norm,
            scaled.z / norm,
            scaled.w / norm,
        )
    }

    /// True if `| |q| - 1 | <= tolerance`.
    pub fn is_unit(&self, tolerance: f64) -> bool {
        (self.magnitude() - 1.0).abs() <= tolerance
    }

    /// Hamilton product `self ⊗ other`: apply `other` first, then `self`.
    ///
    /// The product is returned as computed. For unit inputs it is unit up to
    /// rounding; callers that fold many products normalize once at the end.
    ///
    /// For q1 = w1 + x1*i + y1*j + z1*k and q2 = w2 + x2*i + y2*j + z2*k:
    /// q1 * q2 = (w1*w2 - x1*x2 - y1*y2 - z1*z2) +
    ///           (w1*x2 + x1*w2 + y1*z2 - z1*y2)*i +
    ///           (w1*y2 - x1*z2 + y1*w2 + z1*x2)*j +
    ///           (w1*z2 + x1*y2 - y1*x2 + z1*w2)*k
    pub fn multiply(&self, other: &Self) -> Self {
        let (x1, y1, z1, w1) = (self.x, self.y, self.z, self.w);
        let (x2, y2, z2, w2) = (other.x, other.y, other.z, other.w);

        Self::new(
            w1 * x2 + x1 * w2 + y1 * z2 - z1 * y2,
            w1 * y2 - x1 * z2 + y1 * w2 + z1 * x2,
            w1 * z2 + x1 * y2 - y1 * x2 + z1 * w2,
            w1 * w2 - x1 * x2 - y1 * y2 - z1 * z2,
        )
    }

    /// Conjugate `w - xi - yj - zk`.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Inverse rotation. Equal to the conjugate for unit quaternions.
    #[inline]
    pub fn inverse(&self) -> Self {
        self.conjugate()
    }

    /// Negated quaternion. Same rotation, opposite hemisphere.
    #[inline]
    pub fn negate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }

    /// Four-component dot product.
    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Distance between two quaternions modulo sign: `min(|q - q'|, |q + q'|)`.
    ///
    /// Zero exactly when both describe the same rotation.
    pub fn angular_distance(&self, other: &Self) -> f64 {
        let diff = Self::new(
            self.x - other.x,
            self.y - other.y,
            self.z - other.z,
            self.w - other.w,
        );
        let sum = Self::new(
            self.x + other.x,
            self.y + other.y,
            self.z + other.z,
            self.w + other.w,
        );
        diff.magnitude().min(sum.magnitude())
    }

    /// Check if this describes approximately the same rotation as `other`.
    ///
    /// Accounts for the double cover (q and -q are the same rotation).
    pub fn is_approx(&self, other: &Self, tolerance: f64) -> bool {
        self.angular_distance(other) < tolerance
    }

    /// Rotate a vector by this quaternion.
    ///
    /// Computes `q * v * q⁻¹` with `v` as a pure quaternion, using
    /// `v' = v + w·t + qv × t` where `t = 2·qv × v`.
    pub fn transform_vector(&self, v: &Vector3<f64>) -> Vector3<f64> {
        let qv = Vector3::new(self.x, self.y, self.z);
        let t = 2.0 * qv.cross(v);
        v + self.w * t + qv.cross(&t)
    }
}

impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, rhs: Quaternion) -> Quaternion {
        self.multiply(&rhs)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_1_SQRT_2;

    const TOLERANCE: f64 = 1e-12;

    fn x90() -> Quaternion {
        Quaternion::new(FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2)
    }

    fn y90() -> Quaternion {
        Quaternion::new(0.0, FRAC_1_SQRT_2, 0.0, FRAC_1_SQRT_2)
    }

    #[test]
    fn test_quaternion_identity() {
        let q = Quaternion::identity();
        assert_eq!(q.x, 0.0);
        assert_eq!(q.y, 0.0);
        assert_eq!(q.z, 0.0);
        assert_eq!(q.w, 1.0);
        assert_eq!(Quaternion::default(), q);
    }

    #[test]
    fn test_quaternion_new_keeps_raw_components() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(q.coords(), [1.0, 2.0, 3.0, 4.0]);
        assert!((q.magnitude_squared() - 30.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_quaternion_try_new_rejects_nan() {
        assert!(Quaternion::try_new(0.0, 0.0, 0.0, 1.0).is_ok());
        match Quaternion::try_new(0.0, f64::NAN, 0.0, 1.0) {
            Err(RotationError::InvalidNumber { field, .. }) => assert_eq!(field, "quaternion.y"),
            other => panic!("Expected InvalidNumber, got {other:?}"),
        }
    }

    #[test]
    fn test_quaternion_normalize() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0).normalize();
        let norm = 30.0_f64.sqrt();

        assert!((q.magnitude() - 1.0).abs() < 1e-9);
        assert!((q.x - 1.0 / norm).abs() < TOLERANCE);
        assert!((q.y - 2.0 / norm).abs() < TOLERANCE);
        assert!((q.z - 3.0 / norm).abs() < TOLERANCE);
        assert!((q.w - 4.0 / norm).abs() < TOLERANCE);
    }

    #[test]
    fn test_quaternion_normalize_degenerate_returns_identity() {
        assert_eq!(
            Quaternion::new(0.0, 0.0, 0.0, 0.0).normalize(),
            Quaternion::identity()
        );
        assert_eq!(
            Quaternion::new(1e-11, 0.0, -1e-11, 0.0).normalize(),
            Quaternion::identity()
        );
    }

    #[test]
    fn test_quaternion_normalize_just_above_threshold() {
        let q = Quaternion::new(0.0, 0.0, 1e-9, 0.0).normalize();
        assert!((q.z - 1.0).abs() < TOLERANCE);
        assert!((q.magnitude() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_quaternion_normalize_large_components() {
        let q = Quaternion::new(1e200, 0.0, 0.0, 1e200);
        assert!((q.magnitude() - 2.0_f64.sqrt() * 1e200).abs() < 1e188);

        let unit = q.normalize();
        assert!((unit.magnitude() - 1.0).abs() < 1e-9);
        assert!((unit.x - FRAC_1_SQRT_2).abs() < TOLERANCE);
        assert!((unit.w - FRAC_1_SQRT_2).abs() < TOLERANCE);

        let huge = Quaternion::new(f64::MAX, -f64::MAX, f64::MAX, f64::MAX).normalize();
        assert!((huge.magnitude() - 1.0).abs() < 1e-9);
        assert!((huge.y + 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn test_quaternion_normalize_tiny_components() {
        // Above the degeneracy threshold but with a squared norm near underflow
        let q = Quaternion::new(0.0, 3e-9, 0.0, 4e-9).normalize();
        assert!((q.y - 0.6).abs() < TOLERANCE);
        assert!((q.w - 0.8).abs() < TOLERANCE);
    }

    #[test]
    fn test_quaternion_multiplication_is_hamilton_product() {
        // i * j = k
        let i = Quaternion::new(1.0, 0.0, 0.0, 0.0);
        let j = Quaternion::new(0.0, 1.0, 0.0, 0.0);
        let k = i.multiply(&j);
        assert_eq!(k, Quaternion::new(0.0, 0.0, 1.0, 0.0));

        // j * i = -k
        let minus_k = j.multiply(&i);
        assert_eq!(minus_k, Quaternion::new(0.0, 0.0, -1.0, 0.0));
    }

    #[test]
    fn test_quaternion_multiplication_non_commutative() {
        let xy = x90().multiply(&y90());
        let yx = y90().multiply(&x90());

        assert!((xy.x - 0.5).abs() < TOLERANCE);
        assert!((xy.y - 0.5).abs() < TOLERANCE);
        assert!((xy.z - 0.5).abs() < TOLERANCE);
        assert!((xy.w - 0.5).abs() < TOLERANCE);

        assert!((yx.x - 0.5).abs() < TOLERANCE);
        assert!((yx.y - 0.5).abs() < TOLERANCE);
        assert!((yx.z + 0.5).abs() < TOLERANCE);
        assert!((yx.w - 0.5).abs() < TOLERANCE);

        assert!(!xy.is_approx(&yx, 1e-6));
    }

    #[test]
    fn test_quaternion_mul_operator_matches_multiply() {
        assert_eq!(x90() * y90(), x90().multiply(&y90()));
    }

    #[test]
    fn test_quaternion_conjugate_is_inverse_for_unit_quaternion() {
        let q = Quaternion::new(0.1, -0.4, 0.7, 0.3).normalize();
        let product = q.multiply(&q.inverse());

        assert!((product.w - 1.0).abs() < TOLERANCE);
        assert!(product.x.abs() < TOLERANCE);
        assert!(product.y.abs() < TOLERANCE);
        assert!(product.z.abs() < TOLERANCE);
    }

    #[test]
    fn test_angular_distance_ignores_sign() {
        let q = Quaternion::new(0.2, 0.3, -0.5, 0.8).normalize();
        assert!(q.angular_distance(&q.negate()) < TOLERANCE);
        assert!(q.is_approx(&q.negate(), 1e-9));
        assert!(q.angular_distance(&Quaternion::identity()) > 0.1);
    }

    #[test]
    fn test_transform_vector() {
        // Rotate (1, 0, 0) by 90 degrees about Z: expect (0, 1, 0)
        let q = Quaternion::new(0.0, 0.0, FRAC_1_SQRT_2, FRAC_1_SQRT_2);
        let rotated = q.transform_vector(&Vector3::new(1.0, 0.0, 0.0));

        assert!(rotated.x.abs() < TOLERANCE);
        assert!((rotated.y - 1.0).abs() < TOLERANCE);
        assert!(rotated.z.abs() < TOLERANCE);
    }

    #[test]
    fn test_double_cover_rotates_vectors_identically() {
        let q = Quaternion::new(0.3, -0.1, 0.6, 0.7).normalize();
        let v = Vector3::new(1.0, 2.0, 3.0);
        let a = q.transform_vector(&v);
        let b = q.negate().transform_vector(&v);
        assert!((a - b).norm() < TOLERANCE);
    }

    #[test]
    fn test_quaternion_random_is_unit() {
        for _ in 0..100 {
            let q = Quaternion::random();
            assert!((q.magnitude() - 1.0).abs() < 1e-9);
            assert!(q.is_finite());
        }
    }

    #[test]
    fn test_quaternion_display() {
        let q = Quaternion::identity();
        assert_eq!(
            q.to_string(),
            "Quaternion(x: 0.0000, y: 0.0000, z: 0.0000, w: 1.0000)"
        );
    }
}
