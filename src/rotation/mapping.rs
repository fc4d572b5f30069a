//! Signed axis permutations.
//!
//! An [`AxisMapping`] records, for each original basis axis, the signed axis it now
//! points along. Mappings change only through exact 90° steps applied to the
//! labels, so any sequence of turns lands on one of the 24 proper signed
//! permutations with no floating-point drift.

use std::fmt;
use std::str::FromStr;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::rotation::{Axis, Quaternion, RotationError, RotationMatrix};

/// One of the six directions ±X, ±Y, ±Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignedAxis {
    #[serde(rename = "x")]
    PosX,
    #[serde(rename = "-x")]
    NegX,
    #[serde(rename = "y")]
    PosY,
    #[serde(rename = "-y")]
    NegY,
    #[serde(rename = "z")]
    PosZ,
    #[serde(rename = "-z")]
    NegZ,
}

impl SignedAxis {
    pub fn from_parts(axis: Axis, positive: bool) -> Self {
        match (axis, positive) {
            (Axis::X, true) => SignedAxis::PosX,
            (Axis::X, false) => SignedAxis::NegX,
            (Axis::Y, true) => SignedAxis::PosY,
            (Axis::Y, false) => SignedAxis::NegY,
            (Axis::Z, true) => SignedAxis::PosZ,
            (Axis::Z, false) => SignedAxis::NegZ,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            SignedAxis::PosX | SignedAxis::NegX => Axis::X,
            SignedAxis::PosY | SignedAxis::NegY => Axis::Y,
            SignedAxis::PosZ | SignedAxis::NegZ => Axis::Z,
        }
    }

    pub fn is_positive(self) -> bool {
        matches!(
            self,
            SignedAxis::PosX | SignedAxis::PosY | SignedAxis::PosZ
        )
    }

    pub fn negate(self) -> Self {
        Self::from_parts(self.axis(), !self.is_positive())
    }

    pub fn label(self) -> &'static str {
        match self {
            SignedAxis::PosX => "x",
            SignedAxis::NegX => "-x",
            SignedAxis::PosY => "y",
            SignedAxis::NegY => "-y",
            SignedAxis::PosZ => "z",
            SignedAxis::NegZ => "-z",
        }
    }

    /// Signed unit vector along this direction.
    pub fn unit_vector(self) -> Vector3<f64> {
        let v = self.axis().unit_vector();
        if self.is_positive() { v } else { -v }
    }

    /// Label after a 90° turn about `about`, counter-clockwise when `positive`.
    ///
    /// With `(a, b, c)` cyclic, a positive turn about `a` sends `b → c` and
    /// `c → -b`; a negative turn sends `b → -c` and `c → b`. Labels on `a` itself
    /// are fixed.
    pub fn rotated(self, about: Axis, positive: bool) -> Self {
        let (b, c) = match about {
            Axis::X => (Axis::Y, Axis::Z),
            Axis::Y => (Axis::Z, Axis::X),
            Axis::Z => (Axis::X, Axis::Y),
        };

        let this = self.axis();
        if this == b {
            Self::from_parts(c, self.is_positive() == positive)
        } else if this == c {
            Self::from_parts(b, self.is_positive() != positive)
        } else {
            self
        }
    }
}

impl fmt::Display for SignedAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SignedAxis {
    type Err = RotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (positive, name) = match trimmed.strip_prefix('-') {
            Some(rest) => (false, rest),
            None => (true, trimmed),
        };
        let axis = name
            .parse::<Axis>()
            .map_err(|_| RotationError::InvalidLabel(trimmed.to_string()))?;
        Ok(Self::from_parts(axis, positive))
    }
}

/// Images of the X, Y and Z basis axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxisMapping {
    pub x: SignedAxis,
    pub y: SignedAxis,
    pub z: SignedAxis,
}

impl Default for AxisMapping {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Display for AxisMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AxisMapping(x → {}, y → {}, z → {})",
            self.x, self.y, self.z
        )
    }
}

impl AxisMapping {
    pub const fn new(x: SignedAxis, y: SignedAxis, z: SignedAxis) -> Self {
        Self { x, y, z }
    }

    pub const fn identity() -> Self {
        Self::new(SignedAxis::PosX, SignedAxis::PosY, SignedAxis::PosZ)
    }

    /// Images in `x, y, z` order.
    pub fn images(&self) -> [SignedAxis; 3] {
        [self.x, self.y, self.z]
    }

    /// Image of one original axis.
    pub fn image(&self, axis: Axis) -> SignedAxis {
        self.images()[axis.index()]
    }

    /// Signed permutation matrix whose columns are the images of X, Y and Z.
    pub fn to_matrix(&self) -> RotationMatrix {
        RotationMatrix::from_columns(&[
            self.x.unit_vector(),
            self.y.unit_vector(),
            self.z.unit_vector(),
        ])
    }

    /// Quaternion of the mapping, via Shepperd's method on [`Self::to_matrix`].
    pub fn to_quaternion(&self) -> Quaternion {
        self.to_matrix().to_quaternion()
    }

    /// True if the images use three distinct axes and form a right-handed frame.
    pub fn is_proper(&self) -> bool {
        let distinct = self.x.axis() != self.y.axis()
            && self.y.axis() != self.z.axis()
            && self.x.axis() != self.z.axis();
        distinct && self.to_matrix().determinant() > 0.0
    }

    /// Apply a 90° world-frame turn about `axis` to every image.
    pub fn apply_ninety_degree_step(&self, axis: Axis, positive: bool) -> Self {
        Self::new(
            self.x.rotated(axis, positive),
            self.y.rotated(axis, positive),
            self.z.rotated(axis, positive),
        )
    }
}
