//! 2D point (double precision).

use serde::{Deserialize, Serialize};

/// 2D point or displacement vector (double precision).
///
/// The same type is used for image pixels, screen pixels and normalized
/// coordinates; the caller keeps track of which space a value lives in.
/// Arithmetic goes through `glam::DVec2`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    /// The x component.
    pub x: f64,
    /// The y component.
    pub y: f64,
}

impl Point2D {
    /// Zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point from its components.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Create a point from an array.
    #[inline]
    pub fn from_array(arr: [f64; 2]) -> Self {
        let [x, y] = arr;
        Self { x, y }
    }

    /// Convert the point to an array.
    #[inline]
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Euclidean length (magnitude) of the vector.
    #[inline]
    pub fn length(self) -> f64 {
        glam::DVec2::from(self).length()
    }

    /// Dot product between two vectors.
    #[inline]
    pub fn dot(self, rhs: Self) -> f64 {
        glam::DVec2::from(self).dot(rhs.into())
    }

    /// Euclidean distance between two points.
    #[inline]
    pub fn distance(self, rhs: Self) -> f64 {
        glam::DVec2::from(self).distance(rhs.into())
    }

    /// Midpoint between two points.
    #[inline]
    pub fn midpoint(self, rhs: Self) -> Self {
        (self + rhs) * 0.5
    }

    /// Unit vector in the same direction.
    ///
    /// Returns [`Point2D::ZERO`] when the length is zero.
    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            return Self::ZERO;
        }
        self * (1.0 / len)
    }

    /// Returns `true` if either component is NaN.
    #[inline]
    pub fn is_nan(self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }
}

impl From<glam::DVec2> for Point2D {
    #[inline]
    fn from(v: glam::DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Point2D> for glam::DVec2 {
    #[inline]
    fn from(p: Point2D) -> Self {
        glam::DVec2::new(p.x, p.y)
    }
}

impl From<[f64; 2]> for Point2D {
    #[inline]
    fn from(arr: [f64; 2]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Point2D> for [f64; 2] {
    #[inline]
    fn from(p: Point2D) -> Self {
        p.to_array()
    }
}

impl std::ops::Add for Point2D {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::from(glam::DVec2::from(self) + glam::DVec2::from(rhs))
    }
}

impl std::ops::Sub for Point2D {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::from(glam::DVec2::from(self) - glam::DVec2::from(rhs))
    }
}

impl std::ops::Mul<f64> for Point2D {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self::Output {
        Self::from(glam::DVec2::from(self) * rhs)
    }
}

impl std::ops::Mul<Point2D> for f64 {
    type Output = Point2D;

    #[inline]
    fn mul(self, rhs: Point2D) -> Self::Output {
        Point2D::from(self * glam::DVec2::from(rhs))
    }
}

impl std::ops::Div<f64> for Point2D {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f64) -> Self::Output {
        Self::from(glam::DVec2::from(self) / rhs)
    }
}

impl std::ops::Neg for Point2D {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self::from(-glam::DVec2::from(self))
    }
}

impl std::ops::AddAssign for Point2D {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}
