//! Axis-angle rotations and the elemental basis axes.

use std::fmt;
use std::str::FromStr;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rotation::tolerance::DEGENERACY_THRESHOLD;
use crate::rotation::{Quaternion, RotationError, ensure_finite};

/// One of the three basis axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in X, Y, Z order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Lowercase label used in encodings.
    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }

    /// Position of this axis in `(x, y, z)` ordering.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit vector along this axis.
    pub fn unit_vector(self) -> Vector3<f64> {
        match self {
            Axis::X => Vector3::x(),
            Axis::Y => Vector3::y(),
            Axis::Z => Vector3::z(),
        }
    }

    /// Elemental rotation of `angle_deg` degrees about this axis.
    ///
    /// Places `sin(θ/2)` on the matching vector component and `cos(θ/2)` on `w`.
    pub fn quaternion(self, angle_deg: f64) -> Quaternion {
        let half = angle_deg.to_radians() * 0.5;
        let (s, c) = half.sin_cos();
        match self {
            Axis::X => Quaternion::new(s, 0.0, 0.0, c),
            Axis::Y => Quaternion::new(0.0, s, 0.0, c),
            Axis::Z => Quaternion::new(0.0, 0.0, s, c),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Axis {
    type Err = RotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "x" | "X" => Ok(Axis::X),
            "y" | "Y" => Ok(Axis::Y),
            "z" | "Z" => Ok(Axis::Z),
            other => Err(RotationError::InvalidLabel(other.to_string())),
        }
    }
}

/// Rotation of `angle_deg` degrees about an arbitrary axis.
///
/// The axis does not need to be unit length; it is normalized on conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisAngle {
    /// Rotation axis `[x, y, z]`
    pub axis: [f64; 3],
    /// Rotation angle in degrees
    pub angle_deg: f64,
}

impl fmt::Display for AxisAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AxisAngle(axis: [{:.4}, {:.4}, {:.4}], angle: {:.4}°)",
            self.axis[0], self.axis[1], self.axis[2], self.angle_deg
        )
    }
}

impl AxisAngle {
    pub const fn new(ax: f64, ay: f64, az: f64, angle_deg: f64) -> Self {
        Self {
            axis: [ax, ay, az],
            angle_deg,
        }
    }

    /// Create an axis-angle rotation, rejecting non-finite values.
    pub fn try_new(ax: f64, ay: f64, az: f64, angle_deg: f64) -> Result<Self, RotationError> {
        Ok(Self::new(
            ensure_finite("axis_angle.x", ax)?,
            ensure_finite("axis_angle.y", ay)?,
            ensure_finite("axis_angle.z", az)?,
            ensure_finite("axis_angle.angle", angle_deg)?,
        ))
    }

    pub fn is_finite(&self) -> bool {
        self.axis.iter().all(|c| c.is_finite()) && self.angle_deg.is_finite()
    }

    /// Convert to a unit quaternion.
    ///
    /// An axis shorter than [`DEGENERACY_THRESHOLD`] has no direction and yields the
    /// identity rotation.
    ///
    /// # Formula
    /// q = (u·sin(θ/2), cos(θ/2)) with u the normalized axis
    pub fn to_quaternion(&self) -> Quaternion {
        let axis = Vector3::from(self.axis);
        let length = axis.norm();
        if length < DEGENERACY_THRESHOLD {
            debug!(length, "degenerate rotation axis, using identity");
            return Quaternion::identity();
        }

        let unit = axis / length;
        let half = self.angle_deg.to_radians() * 0.5;
        let (s, c) = half.sin_cos();

        Quaternion::new(unit.x * s, unit.y * s, unit.z * s, c)
    }
}

impl Quaternion {
    /// Convert to axis-angle form with the angle in `[0°, 180°]`.
    ///
    /// The hemisphere with `w >= 0` is used so the shorter rotation is reported.
    /// For the identity rotation, returns axis `(1, 0, 0)` with angle 0.
    pub fn to_axis_angle(&self) -> AxisAngle {
        let q = if self.w < 0.0 { self.negate() } else { *self };

        let sin_half = (q.x * q.x + q.y * q.y + q.z * q.z).sqrt();
        if sin_half < DEGENERACY_THRESHOLD {
            return AxisAngle::new(1.0, 0.0, 0.0, 0.0);
        }

        let angle = 2.0 * sin_half.atan2(q.w);
        AxisAngle::new(
            q.x / sin_half,
            q.y / sin_half,
            q.z / sin_half,
            angle.to_degrees(),
        )
    }
}
