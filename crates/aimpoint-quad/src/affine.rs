use aimpoint_algebra::{Mat2F64, Point2D};
use serde::{Deserialize, Serialize};

/// Parameters for the live affine mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AffineParams {
    /// Value substituted for a NaN output component.
    pub nan_fallback: f64,
}

impl Default for AffineParams {
    fn default() -> Self {
        Self { nan_fallback: 0.5 }
    }
}

/// Expresses `target` in the affine frame spanned by the quad corners.
///
/// The basis is `a = P1 - P0`, `b = P3 - P0`, and `(u, v)` is the least squares
/// solution of `target - P0 = u * a + v * b` through the normal equations.
/// `P0` maps to `(0, 0)`, `P1` to `(1, 0)` and `P3` to `(0, 1)`. `P2` only maps
/// to `(1, 1)` when the quad is a parallelogram; it does not enter the solve.
///
/// # Arguments
///
/// * `corners` - The quad corners in winding order.
/// * `target` - The point to localize, in the same space as the corners.
///
/// # Returns
///
/// The `(u, v)` coordinate, or `(0, 0)` when `a` and `b` are colinear or zero.
pub fn affine_uv(corners: &[Point2D; 4], target: Point2D) -> Point2D {
    let a = corners[1] - corners[0];
    let b = corners[3] - corners[0];
    let c = target - corners[0];

    let ab = a.dot(b);
    let normal = Mat2F64::from_rows([[a.dot(a), ab], [ab, b.dot(b)]]);

    match normal.solve(Point2D::new(a.dot(c), b.dot(c)), 0.0) {
        Some(uv) => uv,
        None => {
            log::debug!("degenerate affine basis: a={a:?}, b={b:?}");
            Point2D::ZERO
        }
    }
}

/// Localizes the center of a `width` x `height` viewport inside the quad.
///
/// NaN is propagated when `width` or `height` is NaN; see [`calc_sanitized`].
pub fn calc(corners: &[Point2D; 4], width: f64, height: f64) -> Point2D {
    affine_uv(corners, Point2D::new(width / 2.0, height / 2.0))
}

/// Replaces each NaN component of `uv` with `fallback`.
pub fn sanitize_uv(uv: Point2D, fallback: f64) -> Point2D {
    let fix = |value: f64| if value.is_nan() { fallback } else { value };
    Point2D::new(fix(uv.x), fix(uv.y))
}

/// [`calc`] followed by [`sanitize_uv`] with [`AffineParams::nan_fallback`].
pub fn calc_sanitized(
    corners: &[Point2D; 4],
    width: f64,
    height: f64,
    params: &AffineParams,
) -> Point2D {
    sanitize_uv(calc(corners, width, height), params.nan_fallback)
}
