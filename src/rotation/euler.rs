//! Euler angles (roll, pitch, yaw) in degrees.
//!
//! Roll is about X, pitch about Y and yaw about Z. The quaternion built from
//! `(roll, pitch, yaw)` equals the world-frame chain `[x.roll, y.pitch, z.yaw]`,
//! i.e. `q = q_z(yaw) ⊗ q_y(pitch) ⊗ q_x(roll)`.
//!
//! Pitch is reported in `[-90°, 90°]`. At ±90° (gimbal lock) roll and yaw are
//! coupled: only `roll - yaw` (pitch +90°) or `roll + yaw` (pitch -90°) is
//! determined by the rotation. The lock is detected only once `2(wy − zx)` reaches
//! ±1; it is then reported as roll with yaw 0. A pitch entered as exactly ±90° can
//! round to just inside that bound, and its roll and yaw are then dominated by
//! rounding error.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rotation::{Quaternion, RotationError, ensure_finite};

/// Pitch magnitude reported at gimbal lock.
const GIMBAL_LOCK_PITCH_DEG: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EulerAngles {
    /// Rotation around the X axis (degrees)
    pub roll: f64,
    /// Rotation around the Y axis (degrees)
    pub pitch: f64,
    /// Rotation around the Z axis (degrees)
    pub yaw: f64,
}

impl fmt::Display for EulerAngles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Euler(roll: {:.4}°, pitch: {:.4}°, yaw: {:.4}°)",
            self.roll, self.pitch, self.yaw
        )
    }
}

impl EulerAngles {
    pub const fn new(roll: f64, pitch: f64, yaw: f64) -> Self {
        Self { roll, pitch, yaw }
    }

    /// Create Euler angles, rejecting non-finite values.
    pub fn try_new(roll: f64, pitch: f64, yaw: f64) -> Result<Self, RotationError> {
        Ok(Self::new(
            ensure_finite("euler.roll", roll)?,
            ensure_finite("euler.pitch", pitch)?,
            ensure_finite("euler.yaw", yaw)?,
        ))
    }

    pub fn is_finite(&self) -> bool {
        self.roll.is_finite() && self.pitch.is_finite() && self.yaw.is_finite()
    }

    /// True if pitch sits on the ±90° boundary where roll and yaw are coupled.
    pub fn is_gimbal_locked(&self) -> bool {
        self.pitch.abs() >= GIMBAL_LOCK_PITCH_DEG
    }

    /// Convert to a unit quaternion.
    ///
    /// With c/s the cosine/sine of each half angle:
    /// - w = cr·cp·cy + sr·sp·sy
    /// - x = sr·cp·cy − cr·sp·sy
    /// - y = cr·sp·cy + sr·cp·sy
    /// - z = cr·cp·sy − sr·sp·cy
    pub fn to_quaternion(&self) -> Quaternion {
        let (sr, cr) = (self.roll.to_radians() * 0.5).sin_cos();
        let (sp, cp) = (self.pitch.to_radians() * 0.5).sin_cos();
        let (sy, cy) = (self.yaw.to_radians() * 0.5).sin_cos();

        Quaternion::new(
            sr * cp * cy - cr * sp * sy,
            cr * sp * cy + sr * cp * sy,
            cr * cp * sy - sr * sp * cy,
            cr * cp * cy + sr * sp * sy,
        )
        .normalize()
    }
}

impl Quaternion {
    /// Convert to Euler angles in degrees.
    ///
    /// - roll = atan2(2(wx + yz), 1 − 2(x² + y²))
    /// - pitch = asin(2(wy − zx)), clamped to ±90° once the argument reaches ±1
    /// - yaw = atan2(2(wz + xy), 1 − 2(y² + z²))
    ///
    /// When the pitch is clamped the roll and yaw terms are both zero up to
    /// rounding, so the coupled angle is reported entirely as roll and yaw is 0:
    /// roll = 2·atan2(x, w), which equals `roll − yaw` at +90° and `roll + yaw`
    /// at −90°.
    pub fn to_euler_angles(&self) -> EulerAngles {
        let Quaternion { x, y, z, w } = *self;

        // Pitch (y-axis rotation)
        let sinp = 2.0 * (w * y - z * x);
        if sinp.abs() >= 1.0 {
            let roll = wrap_degrees((2.0 * x.atan2(w)).to_degrees());
            return EulerAngles::new(roll, GIMBAL_LOCK_PITCH_DEG.copysign(sinp), 0.0);
        }
        let pitch = sinp.asin().to_degrees();

        // Roll (x-axis rotation)
        let sinr_cosp = 2.0 * (w * x + y * z);
        let cosr_cosp = 1.0 - 2.0 * (x * x + y * y);
        let roll = sinr_cosp.atan2(cosr_cosp);

        // Yaw (z-axis rotation)
        let siny_cosp = 2.0 * (w * z + x * y);
        let cosy_cosp = 1.0 - 2.0 * (y * y + z * z);
        let yaw = siny_cosp.atan2(cosy_cosp);

        EulerAngles::new(roll.to_degrees(), pitch, yaw.to_degrees())
    }
}

/// Wrap an angle into `[-180°, 180°)`.
fn wrap_degrees(angle: f64) -> f64 {
    (angle + 180.0).rem_euclid(360.0) - 180.0
}

impl From<EulerAngles> for Quaternion {
    fn from(euler: EulerAngles) -> Self {
        euler.to_quaternion()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::{Axis, RotationMatrix};
    use std::f64::consts::FRAC_1_SQRT_2;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn test_euler_zero_is_identity() {
        let q = EulerAngles::default().to_quaternion();
        assert_eq!(q, Quaternion::identity());
    }

    #[test]
    fn test_euler_single_axis_matches_elemental() {
        let roll = EulerAngles::new(90.0, 0.0, 0.0).to_quaternion();
        assert!((roll.x - FRAC_1_SQRT_2).abs() < TOLERANCE);
        assert!((roll.w - FRAC_1_SQRT_2).abs() < TOLERANCE);

        let pitch = EulerAngles::new(0.0, 30.0, 0.0).to_quaternion();
        assert!(pitch.is_approx(&Axis::Y.quaternion(30.0), TOLERANCE));

        let yaw = EulerAngles::new(0.0, 0.0, -75.0).to_quaternion();
        assert!(yaw.is_approx(&Axis::Z.quaternion(-75.0), TOLERANCE));
    }

    #[test]
    fn test_euler_formula_signs() {
        // Exact expected components for roll=30, pitch=45, yaw=60
        let (sr, cr) = 15.0_f64.to_radians().sin_cos();
        let (sp, cp) = 22.5_f64.to_radians().sin_cos();
        let (sy, cy) = 30.0_f64.to_radians().sin_cos();

        let q = EulerAngles::new(30.0, 45.0, 60.0).to_quaternion();
        assert!((q.w - (cr * cp * cy + sr * sp * sy)).abs() < 1e-12);
        assert!((q.x - (sr * cp * cy - cr * sp * sy)).abs() < 1e-12);
        assert!((q.y - (cr * sp * cy + sr * cp * sy)).abs() < 1e-12);
        assert!((q.z - (cr * cp * sy - sr * sp * cy)).abs() < 1e-12);
    }

    #[test]
    fn test_euler_equals_world_frame_xyz_composition() {
        let euler = EulerAngles::new(20.0, -35.0, 110.0);
        let composed = Axis::Z
            .quaternion(110.0)
            .multiply(&Axis::Y.quaternion(-35.0))
            .multiply(&Axis::X.quaternion(20.0));
        assert!(euler.to_quaternion().is_approx(&composed, TOLERANCE));
    }

    #[test]
    fn test_euler_angles_roundtrip() {
        let cases = [
            EulerAngles::new(10.0, 20.0, 30.0),
            EulerAngles::new(-170.0, 89.0, 179.0),
            EulerAngles::new(45.0, -89.5, -120.0),
            EulerAngles::new(0.0, 0.0, 0.0),
        ];

        for euler in cases {
            let result = euler.to_quaternion().to_euler_angles();
            assert!(
                (euler.roll - result.roll).abs() < TOLERANCE,
                "Roll mismatch for {euler}: got {result}"
            );
            assert!(
                (euler.pitch - result.pitch).abs() < TOLERANCE,
                "Pitch mismatch for {euler}: got {result}"
            );
            assert!(
                (euler.yaw - result.yaw).abs() < TOLERANCE,
                "Yaw mismatch for {euler}: got {result}"
            );
        }
    }

    #[test]
    fn test_gimbal_lock_positive_pitch_keeps_roll_minus_yaw() {
        let euler = EulerAngles::new(-160.0, 90.0, -170.0);
        let q = euler.to_quaternion();
        let result = q.to_euler_angles();

        assert_eq!(result.pitch, 90.0);
        assert_eq!(result.yaw, 0.0);
        assert!(
            (result.roll - 10.0).abs() < TOLERANCE,
            "roll - yaw should be 10, got {result}"
        );

        let expected = RotationMatrix::from_quaternion(&q);
        let actual = RotationMatrix::from_quaternion(&result.to_quaternion());
        assert!(expected.max_abs_difference(&actual) < TOLERANCE);
    }

    #[test]
    fn test_gimbal_lock_negative_pitch_keeps_roll_plus_yaw() {
        let euler = EulerAngles::new(-40.0, -90.0, 15.0);
        let q = euler.to_quaternion();
        let result = q.to_euler_angles();

        assert_eq!(result.pitch, -90.0);
        assert_eq!(result.yaw, 0.0);
        assert!(
            (result.roll - (-25.0)).abs() < TOLERANCE,
            "roll + yaw should be -25, got {result}"
        );

        let expected = RotationMatrix::from_quaternion(&q);
        let actual = RotationMatrix::from_quaternion(&result.to_quaternion());
        assert!(expected.max_abs_difference(&actual) < TOLERANCE);
    }

    #[test]
    fn test_gimbal_lock_coupled_angle_wraps() {
        // roll - yaw = 350 is reported as -10
        let result = EulerAngles::new(170.0, 90.0, -180.0)
            .to_quaternion()
            .to_euler_angles();
        assert_eq!(result.pitch, 90.0);
        assert!((result.roll - (-10.0)).abs() < TOLERANCE, "got {result}");
    }

    #[test]
    fn test_gimbal_lock_clamp() {
        // 2(wy - zx) slightly above 1 through rounding must clamp, not NaN
        let q = Quaternion::new(0.0, FRAC_1_SQRT_2 + 1e-12, 0.0, FRAC_1_SQRT_2 + 1e-12);
        let euler = q.to_euler_angles();
        assert_eq!(euler.pitch, 90.0);
        assert!(euler.is_gimbal_locked());
        assert!(!euler.roll.is_nan());

        assert_eq!(q.negate().to_euler_angles().pitch, 90.0);

        let q = Quaternion::new(0.0, -(FRAC_1_SQRT_2 + 1e-12), 0.0, FRAC_1_SQRT_2 + 1e-12);
        assert_eq!(q.to_euler_angles().pitch, -90.0);
    }

    #[test]
    fn test_pitch_just_inside_ninety_is_not_locked() {
        // 2(wy - zx) stays below 1 by about 1e-12 here
        let cases = [
            EulerAngles::new(10.0, 89.9999, 30.0),
            EulerAngles::new(10.0, 89.99995, 30.0),
            EulerAngles::new(25.0, -89.9999, -60.0),
        ];

        for euler in cases {
            let q = euler.to_quaternion();
            let result = q.to_euler_angles();
            assert!(!result.is_gimbal_locked(), "{euler} reported as locked: {result}");

            // asin loses digits this close to ±1
            assert!((euler.roll - result.roll).abs() < 1e-7, "{euler} -> {result}");
            assert!((euler.pitch - result.pitch).abs() < 1e-7, "{euler} -> {result}");
            assert!((euler.yaw - result.yaw).abs() < 1e-7, "{euler} -> {result}");

            let expected = RotationMatrix::from_quaternion(&q);
            let actual = RotationMatrix::from_quaternion(&result.to_quaternion());
            assert!(expected.max_abs_difference(&actual) < TOLERANCE);
        }
    }

    #[test]
    fn test_euler_try_new_rejects_nan() {
        assert!(EulerAngles::try_new(0.0, f64::NAN, 0.0).is_err());
        assert_eq!(
            EulerAngles::try_new(1.0, 2.0, 3.0),
            Ok(EulerAngles::new(1.0, 2.0, 3.0))
        );
    }
}
