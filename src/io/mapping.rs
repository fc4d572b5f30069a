//! Mapping encoding: three `.`-separated signed-axis labels in `x, y, z` order.
//!
//! `-y.z.-x` means X → −Y, Y → Z, Z → −X.

use crate::io::IoError;
use crate::rotation::{AxisMapping, SignedAxis};

const SEPARATOR: &str = ".";

pub fn encode_mapping(mapping: &AxisMapping) -> String {
    mapping
        .images()
        .iter()
        .map(|image| image.label())
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Decode a mapping and check that it is a proper rotation.
pub fn decode_mapping(input: &str) -> Result<AxisMapping, IoError> {
    let labels: Vec<&str> = input.trim().split(SEPARATOR).collect();
    let [x, y, z] = labels.as_slice() else {
        return Err(IoError::MissingFields {
            expected: 3,
            found: labels.len(),
        });
    };

    let parse = |label: &str| {
        label
            .parse::<SignedAxis>()
            .map_err(|_| IoError::InvalidLabel(label.to_string()))
    };
    let mapping = AxisMapping::new(parse(*x)?, parse(*y)?, parse(*z)?);

    if !mapping.is_proper() {
        return Err(IoError::InvalidMapping(input.to_string()));
    }
    Ok(mapping)
}
