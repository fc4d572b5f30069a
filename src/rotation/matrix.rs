//! 3×3 rotation matrices.
//!
//! A [`RotationMatrix`] is a row-major 3×3 matrix backed by nalgebra's `Matrix3`.
//! It may hold raw user input that is not a rotation at all; whether it is a proper
//! rotation (orthonormal, det = +1) is a property checked by
//! [`InputValidator::validate_matrix`](crate::rotation::InputValidator::validate_matrix).

use std::fmt;
use std::ops::Index;

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::rotation::{Quaternion, RotationError, ensure_finite};

/// Field names for row-major entries, used in error reports.
const ENTRY_NAMES: [[&str; 3]; 3] = [
    ["matrix.m00", "matrix.m01", "matrix.m02"],
    ["matrix.m10", "matrix.m11", "matrix.m12"],
    ["matrix.m20", "matrix.m21", "matrix.m22"],
];

/// Row-major 3×3 matrix. Serialized as `[[row0], [row1], [row2]]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[[f64; 3]; 3]", into = "[[f64; 3]; 3]")]
pub struct RotationMatrix {
    data: Matrix3<f64>,
}

impl fmt::Display for RotationMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.data;
        write!(
            f,
            "RotationMatrix([{:.4}, {:.4}, {:.4}], [{:.4}, {:.4}, {:.4}], [{:.4}, {:.4}, {:.4}])",
            m[(0, 0)],
            m[(0, 1)],
            m[(0, 2)],
            m[(1, 0)],
            m[(1, 1)],
            m[(1, 2)],
            m[(2, 0)],
            m[(2, 1)],
            m[(2, 2)]
        )
    }
}

impl Default for RotationMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Index<(usize, usize)> for RotationMatrix {
    type Output = f64;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.data[(row, col)]
    }
}

impl From<[[f64; 3]; 3]> for RotationMatrix {
    fn from(rows: [[f64; 3]; 3]) -> Self {
        Self::from_rows(rows)
    }
}

impl From<RotationMatrix> for [[f64; 3]; 3] {
    fn from(matrix: RotationMatrix) -> Self {
        matrix.rows()
    }
}

impl RotationMatrix {
    pub fn identity() -> Self {
        Self {
            data: Matrix3::identity(),
        }
    }

    pub fn from_matrix3(data: Matrix3<f64>) -> Self {
        Self { data }
    }

    /// Build from row-major rows.
    pub fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        let [r0, r1, r2] = rows;
        Self {
            data: Matrix3::new(
                r0[0], r0[1], r0[2], //
                r1[0], r1[1], r1[2], //
                r2[0], r2[1], r2[2],
            ),
        }
    }

    /// Build from row-major rows, rejecting non-finite entries.
    pub fn try_from_rows(rows: [[f64; 3]; 3]) -> Result<Self, RotationError> {
        let matrix = Self::from_rows(rows);
        matrix.ensure_finite()?;
        Ok(matrix)
    }

    /// Build from three column vectors.
    pub fn from_columns(columns: &[Vector3<f64>; 3]) -> Self {
        Self {
            data: Matrix3::from_columns(columns),
        }
    }

    /// Row-major entries.
    pub fn rows(&self) -> [[f64; 3]; 3] {
        let m = &self.data;
        [
            [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
            [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
            [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
        ]
    }

    pub fn as_matrix3(&self) -> &Matrix3<f64> {
        &self.data
    }

    pub fn column(&self, index: usize) -> Vector3<f64> {
        self.data.column(index).into_owned()
    }

    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    /// Reject the first non-finite entry, in row-major order.
    pub fn ensure_finite(&self) -> Result<(), RotationError> {
        for (r, row) in self.rows().iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                ensure_finite(ENTRY_NAMES[r][c], value)?;
            }
        }
        Ok(())
    }

    /// Determinant by cofactor expansion along the first row.
    pub fn determinant(&self) -> f64 {
        let m = &self.data;
        m[(0, 0)] * (m[(1, 1)] * m[(2, 2)] - m[(1, 2)] * m[(2, 1)])
            - m[(0, 1)] * (m[(1, 0)] * m[(2, 2)] - m[(1, 2)] * m[(2, 0)])
            + m[(0, 2)] * (m[(1, 0)] * m[(2, 1)] - m[(1, 1)] * m[(2, 0)])
    }

    pub fn transpose(&self) -> Self {
        Self {
            data: self.data.transpose(),
        }
    }

    /// Matrix product `self · other`.
    pub fn multiply(&self, other: &Self) -> Self {
        Self {
            data: self.data * other.data,
        }
    }

    /// Largest absolute entry of `R·Rᵀ − I`.
    pub fn orthonormality_error(&self) -> f64 {
        let product = self.data * self.data.transpose();
        (product - Matrix3::identity()).amax()
    }

    /// Largest absolute entry-wise difference to `other`.
    pub fn max_abs_difference(&self, other: &Self) -> f64 {
        (self.data - other.data).amax()
    }

    /// Apply the matrix to a vector.
    pub fn transform_vector(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.data * v
    }

    /// Closed-form rotation matrix of a quaternion.
    ///
    /// ```text
    /// [ 1−2(y²+z²)   2(xy−wz)     2(xz+wy)   ]
    /// [ 2(xy+wz)     1−2(x²+z²)   2(yz−wx)   ]
    /// [ 2(xz−wy)     2(yz+wx)     1−2(x²+y²) ]
    /// ```
    pub fn from_quaternion(q: &Quaternion) -> Self {
        let Quaternion { x, y, z, w } = *q;

        let xx = x * x;
        let yy = y * y;
        let zz = z * z;
        let xy = x * y;
        let xz = x * z;
        let yz = y * z;
        let wx = w * x;
        let wy = w * y;
        let wz = w * z;

        Self::from_rows([
            [1.0 - 2.0 * (yy + zz), 2.0 * (xy - wz), 2.0 * (xz + wy)],
            [2.0 * (xy + wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz - wx)],
            [2.0 * (xz - wy), 2.0 * (yz + wx), 1.0 - 2.0 * (xx + yy)],
        ])
    }

    /// Extract a unit quaternion using Shepperd's method.
    ///
    /// The branch is chosen by the dominant term: the trace if positive, otherwise
    /// the largest diagonal entry. The sign of the result is whatever the chosen
    /// branch produces and is not canonicalized.
    ///
    /// The matrix is assumed to be a proper rotation; validate raw input first.
    pub fn to_quaternion(&self) -> Quaternion {
        let m = &self.data;
        let trace = m[(0, 0)] + m[(1, 1)] + m[(2, 2)];

        let q = if trace > 0.0 {
            trace!(trace, "shepperd branch: trace");
            let s = 0.5 / (trace + 1.0).sqrt(); // s = 1/(4w)
            Quaternion::new(
                (m[(2, 1)] - m[(1, 2)]) * s,
                (m[(0, 2)] - m[(2, 0)]) * s,
                (m[(1, 0)] - m[(0, 1)]) * s,
                0.25 / s,
            )
        } else if m[(0, 0)] > m[(1, 1)] && m[(0, 0)] > m[(2, 2)] {
            trace!(trace, "shepperd branch: m00");
            let s = 2.0 * (1.0 + m[(0, 0)] - m[(1, 1)] - m[(2, 2)]).sqrt(); // s = 4x
            Quaternion::new(
                0.25 * s,
                (m[(0, 1)] + m[(1, 0)]) / s,
                (m[(0, 2)] + m[(2, 0)]) / s,
                (m[(2, 1)] - m[(1, 2)]) / s,
            )
        } else if m[(1, 1)] > m[(2, 2)] {
            trace!(trace, "shepperd branch: m11");
            let s = 2.0 * (1.0 + m[(1, 1)] - m[(0, 0)] - m[(2, 2)]).sqrt(); // s = 4y
            Quaternion::new(
                (m[(0, 1)] + m[(1, 0)]) / s,
                0.25 * s,
                (m[(1, 2)] + m[(2, 1)]) / s,
                (m[(0, 2)] - m[(2, 0)]) / s,
            )
        } else {
            trace!(trace, "shepperd branch: m22");
            let s = 2.0 * (1.0 + m[(2, 2)] - m[(0, 0)] - m[(1, 1)]).sqrt(); // s = 4z
            Quaternion::new(
                (m[(0, 2)] + m[(2, 0)]) / s,
                (m[(1, 2)] + m[(2, 1)]) / s,
                0.25 * s,
                (m[(1, 0)] - m[(0, 1)]) / s,
            )
        };

        q.normalize()
    }
}

impl Quaternion {
    /// Rotation matrix of this quaternion. See [`RotationMatrix::from_quaternion`].
    pub fn to_rotation_matrix(&self) -> RotationMatrix {
        RotationMatrix::from_quaternion(self)
    }
}
