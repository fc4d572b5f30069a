//! Fixed-precision text rendering.
//!
//! Rendering never feeds back into computation; values keep full precision
//! internally. A value that rounds to zero is shown without a sign.

use crate::rotation::{AxisAngle, EulerAngles, Quaternion, RotationMatrix, RotationResult};

/// Digits after the decimal point used by default.
pub const DEFAULT_PRECISION: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    pub precision: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

impl DisplayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Render one value, mapping `-0.0000` to `0.0000`.
    pub fn format_value(&self, value: f64) -> String {
        let text = format!("{:.*}", self.precision, value);
        match text.strip_prefix('-') {
            Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
            _ => text,
        }
    }

    fn join(&self, values: &[f64]) -> String {
        values
            .iter()
            .map(|v| self.format_value(*v))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn format_quaternion(&self, q: &Quaternion) -> String {
        format!(
            "x: {}, y: {}, z: {}, w: {}",
            self.format_value(q.x),
            self.format_value(q.y),
            self.format_value(q.z),
            self.format_value(q.w)
        )
    }

    pub fn format_euler(&self, e: &EulerAngles) -> String {
        format!(
            "roll: {}°, pitch: {}°, yaw: {}°",
            self.format_value(e.roll),
            self.format_value(e.pitch),
            self.format_value(e.yaw)
        )
    }

    pub fn format_axis_angle(&self, a: &AxisAngle) -> String {
        format!(
            "axis: [{}], angle: {}°",
            self.join(&a.axis),
            self.format_value(a.angle_deg)
        )
    }

    /// One bracketed row per line.
    pub fn format_matrix(&self, m: &RotationMatrix) -> String {
        m.rows()
            .iter()
            .map(|row| format!("[{}]", self.join(row)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn format_result(&self, result: &RotationResult) -> String {
        let matrix = self
            .format_matrix(&result.matrix)
            .lines()
            .map(|line| format!("  {line}"))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "quaternion: {}\neuler:      {}\naxis-angle: {}\nmatrix:\n{}",
            self.format_quaternion(&result.quaternion),
            self.format_euler(&result.euler),
            self.format_axis_angle(&result.axis_angle()),
            matrix
        )
    }
}
