//! Rotation representation and conversion engine.
//!
//! Build a rotation from a chain of elemental turns, a signed axis mapping, or raw
//! quaternion / Euler / matrix / axis-angle input, and inspect it in every other
//! representation.
//!
//! ```
//! use apex_rotations::io::decode_chain;
//! use apex_rotations::rotation::{RotationResult, RotationSource};
//!
//! let chain = decode_chain("x.90_z.45");
//! let result: RotationResult = RotationSource::Chain(chain.into_steps()).resolve()?;
//! assert!((result.quaternion.magnitude() - 1.0).abs() < 1e-9);
//! # Ok::<(), apex_rotations::rotation::RotationError>(())
//! ```

pub mod error;
pub mod io;
pub mod logger;
pub mod rotation;

pub use error::{ApexError, ApexResult};
pub use logger::{init_logger, init_logger_with_level};
pub use rotation::{
    Axis, AxisAngle, AxisMapping, EulerAngles, InputValidator, Quaternion, RotationChain,
    RotationError, RotationMatrix, RotationResult, RotationSource, RotationStep, SignedAxis,
    Validation, ValidationIssue,
};
