//! Canonical rotation sources and the derived result projection.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rotation::tolerance::UNIT_TOLERANCE;
use crate::rotation::{
    AxisAngle, AxisMapping, EulerAngles, Quaternion, RotationError, RotationMatrix,
    RotationStep, compute_chain, ensure_finite,
};

/// A rotation entered in one of the four numeric representations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Representation {
    Quaternion(Quaternion),
    Euler(EulerAngles),
    Matrix(RotationMatrix),
    AxisAngle(AxisAngle),
}

impl Representation {
    pub fn kind(&self) -> &'static str {
        match self {
            Representation::Quaternion(_) => "quaternion",
            Representation::Euler(_) => "euler",
            Representation::Matrix(_) => "matrix",
            Representation::AxisAngle(_) => "axis_angle",
        }
    }

    /// Reject the first non-finite field.
    pub fn check_finite(&self) -> Result<(), RotationError> {
        match self {
            Representation::Quaternion(q) => Quaternion::try_new(q.x, q.y, q.z, q.w).map(|_| ()),
            Representation::Euler(e) => EulerAngles::try_new(e.roll, e.pitch, e.yaw).map(|_| ()),
            Representation::Matrix(m) => m.ensure_finite(),
            Representation::AxisAngle(a) => {
                AxisAngle::try_new(a.axis[0], a.axis[1], a.axis[2], a.angle_deg).map(|_| ())
            }
        }
    }

    /// Unit quaternion of this representation.
    ///
    /// Raw quaternions are normalized and raw matrices go through Shepperd's method
    /// as entered; run them through the validator first to catch non-rotations.
    pub fn to_quaternion(&self) -> Quaternion {
        match self {
            Representation::Quaternion(q) => q.normalize(),
            Representation::Euler(e) => e.to_quaternion(),
            Representation::Matrix(m) => m.to_quaternion(),
            Representation::AxisAngle(a) => a.to_quaternion(),
        }
    }
}

impl From<Quaternion> for Representation {
    fn from(q: Quaternion) -> Self {
        Representation::Quaternion(q)
    }
}

impl From<EulerAngles> for Representation {
    fn from(e: EulerAngles) -> Self {
        Representation::Euler(e)
    }
}

impl From<RotationMatrix> for Representation {
    fn from(m: RotationMatrix) -> Self {
        Representation::Matrix(m)
    }
}

impl From<AxisAngle> for Representation {
    fn from(a: AxisAngle) -> Self {
        Representation::AxisAngle(a)
    }
}

/// Quaternion, Euler and matrix views of one rotation.
///
/// Always derived from a quaternion; never edited independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationResult {
    pub quaternion: Quaternion,
    pub euler: EulerAngles,
    pub matrix: RotationMatrix,
}

impl RotationResult {
    pub fn from_quaternion(quaternion: Quaternion) -> Self {
        Self {
            quaternion,
            euler: quaternion.to_euler_angles(),
            matrix: quaternion.to_rotation_matrix(),
        }
    }

    pub fn identity() -> Self {
        Self::from_quaternion(Quaternion::identity())
    }

    pub fn axis_angle(&self) -> AxisAngle {
        self.quaternion.to_axis_angle()
    }
}

impl Default for RotationResult {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Display for RotationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.quaternion)?;
        writeln!(f, "{}", self.euler)?;
        write!(f, "{}", self.matrix)
    }
}

/// The single source of truth a [`RotationResult`] is derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", content = "value", rename_all = "snake_case")]
pub enum RotationSource {
    Chain(Vec<RotationStep>),
    Mapping(AxisMapping),
    Raw(Representation),
}

impl RotationSource {
    /// Derive the result. Calling twice on the same source gives the same result.
    pub fn resolve(&self) -> Result<RotationResult, RotationError> {
        let quaternion = match self {
            RotationSource::Chain(steps) => {
                for step in steps {
                    ensure_finite("step.angle", step.angle_deg)?;
                }
                compute_chain(steps)
            }
            RotationSource::Mapping(mapping) => {
                if !mapping.is_proper() {
                    return Err(RotationError::InvalidElement(format!(
                        "{mapping} is not a proper rotation"
                    )));
                }
                mapping.to_quaternion()
            }
            RotationSource::Raw(representation) => {
                representation.check_finite()?;
                representation.to_quaternion()
            }
        };

        if !quaternion.is_finite() || !quaternion.is_unit(UNIT_TOLERANCE) {
            return Err(RotationError::InvalidElement(format!(
                "{} source produced a non-unit quaternion {quaternion}",
                self.kind()
            )));
        }

        debug!(source = self.kind(), %quaternion, "resolved rotation");
        Ok(RotationResult::from_quaternion(quaternion))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RotationSource::Chain(_) => "chain",
            RotationSource::Mapping(_) => "mapping",
            RotationSource::Raw(representation) => representation.kind(),
        }
    }
}
