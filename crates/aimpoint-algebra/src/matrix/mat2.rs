//! 2x2 matrix (double precision).

use crate::Point2D;
use std::ops::Deref;

/// 2x2 matrix (double precision).
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(transparent)]
pub struct Mat2F64(pub glam::DMat2);

impl Mat2F64 {
    /// Create a new matrix from column vectors.
    #[inline]
    pub fn from_cols(x_axis: Point2D, y_axis: Point2D) -> Self {
        Self(glam::DMat2::from_cols(x_axis.into(), y_axis.into()))
    }

    /// Create a new matrix from row-major entries `[[m00, m01], [m10, m11]]`.
    #[inline]
    pub fn from_rows(rows: [[f64; 2]; 2]) -> Self {
        Self::from_cols(
            Point2D::new(rows[0][0], rows[1][0]),
            Point2D::new(rows[0][1], rows[1][1]),
        )
    }

    /// Identity matrix.
    pub const IDENTITY: Self = Self(glam::DMat2::IDENTITY);

    /// Solve `self * x = rhs` with Cramer's rule.
    ///
    /// Returns `None` when the determinant is exactly zero or its magnitude is
    /// below `det_floor`. Pass `0.0` to reject only exact singularity.
    pub fn solve(&self, rhs: Point2D, det_floor: f64) -> Option<Point2D> {
        let (a, c) = (self.x_axis.x, self.x_axis.y);
        let (b, d) = (self.y_axis.x, self.y_axis.y);

        let det = a * d - b * c;
        if det == 0.0 || det.abs() < det_floor {
            return None;
        }

        Some(Point2D::new(
            (rhs.x * d - b * rhs.y) / det,
            (a * rhs.y - c * rhs.x) / det,
        ))
    }
}

impl Deref for Mat2F64 {
    type Target = glam::DMat2;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// Matrix-vector multiplication
impl std::ops::Mul<Point2D> for Mat2F64 {
    type Output = Point2D;

    #[inline]
    fn mul(self, rhs: Point2D) -> Self::Output {
        Point2D::from(self.0 * glam::DVec2::from(rhs))
    }
}
