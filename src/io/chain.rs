//! Chain encoding: `<axis>.<angleDeg>` segments joined by `_`.
//!
//! ```text
//! x.90_y.-45_z.22.5
//! ```
//!
//! Decoding is lenient: a malformed segment is logged and skipped, and the rest of
//! the chain is kept.

use tracing::warn;

use crate::io::IoError;
use crate::rotation::{Axis, RotationChain, RotationStep};

const SEGMENT_SEPARATOR: char = '_';
const FIELD_SEPARATOR: char = '.';

/// Encode steps in order. Angles use the shortest text that parses back exactly.
pub fn encode_chain(steps: &[RotationStep]) -> String {
    steps
        .iter()
        .map(|step| format!("{}{FIELD_SEPARATOR}{}", step.axis, step.angle_deg))
        .collect::<Vec<_>>()
        .join(&SEGMENT_SEPARATOR.to_string())
}

/// Decode one `<axis>.<angleDeg>` segment.
pub fn decode_segment(segment: &str) -> Result<(Axis, f64), IoError> {
    let (label, angle) =
        segment
            .trim()
            .split_once(FIELD_SEPARATOR)
            .ok_or_else(|| IoError::Parse {
                input: segment.to_string(),
                message: "expected <axis>.<angle>".to_string(),
            })?;

    let axis = label
        .parse::<Axis>()
        .map_err(|_| IoError::InvalidLabel(label.to_string()))?;

    let angle_deg = angle
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| IoError::InvalidNumber {
            field: "angle".to_string(),
            value: angle.to_string(),
        })?;

    Ok((axis, angle_deg))
}

/// Decode a chain, skipping malformed segments.
///
/// Step ids are allocated by the returned chain in segment order.
pub fn decode_chain(input: &str) -> RotationChain {
    let mut chain = RotationChain::new();

    for segment in input
        .split(SEGMENT_SEPARATOR)
        .filter(|s| !s.trim().is_empty())
    {
        match decode_segment(segment) {
            Ok((axis, angle_deg)) => {
                if let Err(e) = chain.push(axis, angle_deg) {
                    warn!(segment, error = %e, "skipping chain segment");
                }
            }
            Err(e) => warn!(segment, error = %e, "skipping chain segment"),
        }
    }

    chain
}
