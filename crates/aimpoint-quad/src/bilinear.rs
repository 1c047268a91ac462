use aimpoint_algebra::{Mat2F64, Point2D};
use serde::{Deserialize, Serialize};

/// Calibration target corners in normalized screen space.
///
/// A centered square inset in `[0, 1]^2`, in TL, TR, BR, BL order.
pub const NOMINAL_TARGETS: [Point2D; 4] = [
    Point2D::new(0.25, 0.25),
    Point2D::new(0.75, 0.25),
    Point2D::new(0.75, 0.75),
    Point2D::new(0.25, 0.75),
];

/// Stopping rules for the Newton-Raphson inverse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewtonCriteria {
    /// Maximum number of Newton updates.
    pub max_iterations: usize,
    /// Absolute per-axis residual below which the solve has converged.
    pub tolerance: f64,
    /// Jacobian determinant magnitude below which iteration stops.
    pub det_floor: f64,
}

impl Default for NewtonCriteria {
    fn default() -> Self {
        Self {
            max_iterations: 20,
            tolerance: 1e-10,
            det_floor: 1e-12,
        }
    }
}

/// Parameters for mapping a raw position through a user's calibration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationParams {
    /// Normalized positions of the four calibration targets.
    pub targets: [Point2D; 4],
    /// Stopping rules for the inverse solve.
    pub newton: NewtonCriteria,
}

impl Default for CalibrationParams {
    fn default() -> Self {
        Self {
            targets: NOMINAL_TARGETS,
            newton: NewtonCriteria::default(),
        }
    }
}

/// Result of [`bilinear_inverse`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BilinearInverse {
    /// Best `(u, v)` estimate. Not clamped to `[0, 1]`.
    pub uv: Point2D,
    /// Number of Newton updates applied.
    pub num_iterations: usize,
    /// Whether the residual dropped below the tolerance.
    ///
    /// Informational only: `uv` is usable either way.
    pub converged: bool,
}

/// Evaluates the bilinear patch spanned by `corners` at `uv`.
///
/// `(1-u)(1-v) C0 + u(1-v) C1 + uv C2 + (1-u)v C3`
pub fn bilinear(corners: &[Point2D; 4], uv: Point2D) -> Point2D {
    let (u, v) = (uv.x, uv.y);
    corners[0] * ((1.0 - u) * (1.0 - v))
        + corners[1] * (u * (1.0 - v))
        + corners[2] * (u * v)
        + corners[3] * ((1.0 - u) * v)
}

/// Jacobian of [`bilinear`] with respect to `(u, v)`.
///
/// The first column is the derivative along `u`, the second along `v`.
pub fn bilinear_jacobian(corners: &[Point2D; 4], uv: Point2D) -> Mat2F64 {
    let (u, v) = (uv.x, uv.y);
    let d_du = (corners[1] - corners[0]) * (1.0 - v) + (corners[2] - corners[3]) * v;
    let d_dv = (corners[3] - corners[0]) * (1.0 - u) + (corners[2] - corners[1]) * u;
    Mat2F64::from_cols(d_du, d_dv)
}

/// Finds `(u, v)` such that `bilinear(corners, (u, v)) == raw`.
///
/// Newton-Raphson starting from `(0.5, 0.5)`. Iteration stops when both
/// residual components are below [`NewtonCriteria::tolerance`], when the
/// Jacobian determinant falls below [`NewtonCriteria::det_floor`], or after
/// [`NewtonCriteria::max_iterations`] updates. In every case the last iterate
/// is returned; points outside the quad extrapolate outside `[0, 1]`.
///
/// # Arguments
///
/// * `corners` - The patch corners in winding order.
/// * `raw` - The point to invert, in the same space as the corners.
/// * `criteria` - Stopping rules.
pub fn bilinear_inverse(
    corners: &[Point2D; 4],
    raw: Point2D,
    criteria: &NewtonCriteria,
) -> BilinearInverse {
    let mut result = BilinearInverse {
        uv: Point2D::new(0.5, 0.5),
        num_iterations: 0,
        converged: false,
    };

    let within_tolerance =
        |f: Point2D| f.x.abs() < criteria.tolerance && f.y.abs() < criteria.tolerance;

    for i in 0..criteria.max_iterations {
        let residual = bilinear(corners, result.uv) - raw;
        log::trace!("newton iteration {i}: uv={:?} residual={residual:?}", result.uv);

        if within_tolerance(residual) {
            result.converged = true;
            return result;
        }

        let jacobian = bilinear_jacobian(corners, result.uv);
        let Some(step) = jacobian.solve(-residual, criteria.det_floor) else {
            log::debug!(
                "newton stopped on near singular jacobian at iteration {i}, uv={:?}",
                result.uv
            );
            return result;
        };

        result.uv += step;
        result.num_iterations += 1;
    }

    result.converged = within_tolerance(bilinear(corners, result.uv) - raw);
    if !result.converged {
        log::debug!(
            "newton hit the iteration cap ({}) without converging, uv={:?}",
            criteria.max_iterations,
            result.uv
        );
    }

    result
}

/// Maps a raw position through a user's calibration quad.
///
/// The raw position is located inside the calibration quad with
/// [`bilinear_inverse`] and the resulting `(u, v)` is evaluated on the
/// target square from [`CalibrationParams::targets`].
///
/// # Arguments
///
/// * `calibration` - Raw positions captured while aiming at the four targets.
/// * `raw` - The current raw position.
/// * `params` - Target corners and solver criteria.
///
/// # Returns
///
/// The calibrated normalized position. Extrapolated outside the target square
/// for raw points outside the calibration quad.
pub fn calibrate(calibration: &[Point2D; 4], raw: Point2D, params: &CalibrationParams) -> Point2D {
    let inverse = bilinear_inverse(calibration, raw, &params.newton);
    bilinear(&params.targets, inverse.uv)
}
