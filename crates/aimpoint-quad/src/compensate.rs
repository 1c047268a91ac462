use aimpoint_algebra::Point2D;
use serde::{Deserialize, Serialize};

use crate::MarkerObservation;

/// Parameters for occluded corner reconstruction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompensationParams {
    /// Minimum distance between two detected markers for them to be treated
    /// as a diagonal pair, in the units of the marker positions.
    pub diagonal_threshold: f64,
}

impl Default for CompensationParams {
    fn default() -> Self {
        Self {
            diagonal_threshold: 100.0,
        }
    }
}

/// How the corners returned by [`compensate_detailed`] were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconstruction {
    /// All four markers were detected; positions are passed through.
    Complete,
    /// One marker was missing and was rebuilt from the diagonal-sum identity.
    OneMissing {
        /// Index of the rebuilt corner.
        index: usize,
    },
    /// Two diagonal markers were detected; an axis-aligned square was synthesized.
    DiagonalPair,
    /// Nothing could be rebuilt; positions are passed through as reported.
    Unreconstructed {
        /// Number of detected markers.
        detected: usize,
    },
}

/// Returns the number of detected markers in a frame.
pub fn detected_count(markers: &[MarkerObservation; 4]) -> usize {
    markers.iter().filter(|m| m.detected).count()
}

/// Rebuilds the corner at `missing` from the other three.
///
/// For a parallelogram the diagonals share a midpoint, so
/// `P[i] + P[i+2] == P[i+1] + P[i+3]` (indices mod 4).
///
/// # Arguments
///
/// * `corners` - The quad corners in winding order. The value at `missing` is ignored.
/// * `missing` - Index of the corner to rebuild, in `0..4`.
///
/// # Returns
///
/// The reconstructed corner position.
pub fn reconstruct_corner(corners: &[Point2D; 4], missing: usize) -> Point2D {
    let next = corners[(missing + 1) % 4];
    let opposite = corners[(missing + 2) % 4];
    let prev = corners[(missing + 3) % 4];
    next + prev - opposite
}

/// Synthesizes an axis-aligned square around the midpoint of a diagonal pair.
///
/// The square's half side is a quarter of the pair separation. Corners come
/// back in top-left, top-right, bottom-right, bottom-left order.
pub fn square_from_diagonal(p0: Point2D, p1: Point2D) -> [Point2D; 4] {
    let center = p0.midpoint(p1);
    let offset = p0.distance(p1) / 4.0;

    [
        center + Point2D::new(-offset, -offset),
        center + Point2D::new(offset, -offset),
        center + Point2D::new(offset, offset),
        center + Point2D::new(-offset, offset),
    ]
}

/// Produces four quad corners from a partially detected marker set.
///
/// Same as [`compensate`] but also reports which rule produced the result.
pub fn compensate_detailed(
    markers: &[MarkerObservation; 4],
    params: &CompensationParams,
) -> ([Point2D; 4], Reconstruction) {
    let mut corners = markers.map(|m| m.position);
    let detected = detected_count(markers);

    match detected {
        4 => (corners, Reconstruction::Complete),
        3 => match markers.iter().position(|m| !m.detected) {
            Some(index) => {
                corners[index] = reconstruct_corner(&corners, index);
                (corners, Reconstruction::OneMissing { index })
            }
            None => (corners, Reconstruction::Complete),
        },
        2 => {
            let mut found = markers.iter().filter(|m| m.detected).map(|m| m.position);
            match (found.next(), found.next()) {
                (Some(p0), Some(p1)) if p0.distance(p1) > params.diagonal_threshold => {
                    (square_from_diagonal(p0, p1), Reconstruction::DiagonalPair)
                }
                _ => (corners, Reconstruction::Unreconstructed { detected }),
            }
        }
        _ => (corners, Reconstruction::Unreconstructed { detected }),
    }
}

/// Produces four quad corners from a partially detected marker set.
///
/// * 4 detected: passed through unchanged.
/// * 3 detected: the missing corner is rebuilt with [`reconstruct_corner`].
/// * 2 detected: if they are farther apart than
///   [`CompensationParams::diagonal_threshold`] they are taken as a diagonal
///   pair and all four corners are replaced by [`square_from_diagonal`];
///   otherwise positions are passed through.
/// * 0 or 1 detected: positions are passed through.
///
/// Undetected markers that are passed through keep whatever position they
/// carry. Callers should treat fewer than two detections as tracking lost.
///
/// # Arguments
///
/// * `markers` - The four observations in winding order.
/// * `params` - Reconstruction parameters.
///
/// # Returns
///
/// The four corner positions in the same order as `markers`.
pub fn compensate(markers: &[MarkerObservation; 4], params: &CompensationParams) -> [Point2D; 4] {
    let (corners, reconstruction) = compensate_detailed(markers, params);
    log::trace!("compensate: {reconstruction:?}");
    corners
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn parallelogram() -> [Point2D; 4] {
        [
            Point2D::new(120.0, 80.0),
            Point2D::new(520.0, 110.0),
            Point2D::new(560.0, 400.0),
            Point2D::new(160.0, 370.0),
        ]
    }

    fn observe(corners: &[Point2D; 4], detected: [bool; 4]) -> [MarkerObservation; 4] {
        std::array::from_fn(|i| MarkerObservation {
            position: if detected[i] { corners[i] } else { Point2D::ZERO },
            detected: detected[i],
        })
    }

    #[test]
    fn test_all_detected_is_identity() {
        let corners = parallelogram();
        let markers = observe(&corners, [true; 4]);
        let (out, reconstruction) = compensate_detailed(&markers, &CompensationParams::default());
        assert_eq!(out, corners);
        assert_eq!(reconstruction, Reconstruction::Complete);
    }

    #[test]
    fn test_one_missing_each_corner() {
        let corners = parallelogram();
        for missing in 0..4 {
            let mut detected = [true; 4];
            detected[missing] = false;
            let markers = observe(&corners, detected);

            let (out, reconstruction) =
                compensate_detailed(&markers, &CompensationParams::default());
            assert_eq!(reconstruction, Reconstruction::OneMissing { index: missing });
            for (got, expected) in out.iter().zip(corners.iter()) {
                assert_relative_eq!(got.x, expected.x, epsilon = 1e-9);
                assert_relative_eq!(got.y, expected.y, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_one_missing_ignores_stale_value() {
        let corners = parallelogram();
        let mut markers = observe(&corners, [true, true, false, true]);
        markers[2].position = Point2D::new(-999.0, 999.0);
        let out = compensate(&markers, &CompensationParams::default());
        assert_relative_eq!(out[2].x, corners[2].x, epsilon = 1e-9);
        assert_relative_eq!(out[2].y, corners[2].y, epsilon = 1e-9);
    }

    #[test]
    fn test_diagonal_pair_synthesizes_square() {
        let markers = [
            MarkerObservation::detected(100.0, 100.0),
            MarkerObservation::lost(),
            MarkerObservation::detected(300.0, 300.0),
            MarkerObservation::lost(),
        ];
        let (out, reconstruction) = compensate_detailed(&markers, &CompensationParams::default());
        assert_eq!(reconstruction, Reconstruction::DiagonalPair);

        // separation 200*sqrt(2), offset a quarter of that around (200, 200)
        let offset = 200.0 * 2f64.sqrt() / 4.0;
        let expected = [
            Point2D::new(200.0 - offset, 200.0 - offset),
            Point2D::new(200.0 + offset, 200.0 - offset),
            Point2D::new(200.0 + offset, 200.0 + offset),
            Point2D::new(200.0 - offset, 200.0 + offset),
        ];
        for (got, expected) in out.iter().zip(expected.iter()) {
            assert_relative_eq!(got.x, expected.x, epsilon = 1e-9);
            assert_relative_eq!(got.y, expected.y, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_anti_diagonal_pair_synthesizes_square() {
        let markers = [
            MarkerObservation::lost(),
            MarkerObservation::detected(300.0, 100.0),
            MarkerObservation::lost(),
            MarkerObservation::detected(100.0, 300.0),
        ];
        let (out, reconstruction) = compensate_detailed(&markers, &CompensationParams::default());
        assert_eq!(reconstruction, Reconstruction::DiagonalPair);

        let offset = 200.0 * 2f64.sqrt() / 4.0;
        assert_relative_eq!(out[0].x, 200.0 - offset, epsilon = 1e-9);
        assert_relative_eq!(out[0].y, 200.0 - offset, epsilon = 1e-9);
        assert_relative_eq!(out[2].x, 200.0 + offset, epsilon = 1e-9);
        assert_relative_eq!(out[2].y, 200.0 + offset, epsilon = 1e-9);
    }

    #[test]
    fn test_pair_at_threshold_is_left_alone() {
        let markers = [
            MarkerObservation::detected(100.0, 100.0),
            MarkerObservation::lost(),
            MarkerObservation::detected(200.0, 100.0),
            MarkerObservation::lost(),
        ];
        let params = CompensationParams::default();
        assert_eq!(markers[0].position.distance(markers[2].position), 100.0);

        let (out, reconstruction) = compensate_detailed(&markers, &params);
        assert_eq!(reconstruction, Reconstruction::Unreconstructed { detected: 2 });
        assert_eq!(out[2], Point2D::new(200.0, 100.0));

        let params = CompensationParams {
            diagonal_threshold: 99.999,
        };
        let (_, reconstruction) = compensate_detailed(&markers, &params);
        assert_eq!(reconstruction, Reconstruction::DiagonalPair);
    }

    #[test]
    fn test_adjacent_pair_below_threshold_is_left_alone() {
        let stale = Point2D::new(7.0, 9.0);
        let markers = [
            MarkerObservation::detected(100.0, 100.0),
            MarkerObservation::detected(160.0, 100.0),
            MarkerObservation::stale(stale),
            MarkerObservation::lost(),
        ];
        let (out, reconstruction) = compensate_detailed(&markers, &CompensationParams::default());
        assert_eq!(reconstruction, Reconstruction::Unreconstructed { detected: 2 });
        assert_eq!(out[0], Point2D::new(100.0, 100.0));
        assert_eq!(out[1], Point2D::new(160.0, 100.0));
        assert_eq!(out[2], stale);
        assert_eq!(out[3], Point2D::ZERO);
    }

    #[test]
    fn test_threshold_is_configurable() {
        let markers = [
            MarkerObservation::detected(100.0, 100.0),
            MarkerObservation::detected(160.0, 100.0),
            MarkerObservation::lost(),
            MarkerObservation::lost(),
        ];
        let params = CompensationParams {
            diagonal_threshold: 50.0,
        };
        let (_, reconstruction) = compensate_detailed(&markers, &params);
        assert_eq!(reconstruction, Reconstruction::DiagonalPair);
    }

    #[test]
    fn test_too_few_detected_passes_through() {
        let stale = [
            Point2D::new(1.0, 2.0),
            Point2D::new(3.0, 4.0),
            Point2D::new(5.0, 6.0),
            Point2D::new(7.0, 8.0),
        ];
        let mut markers = stale.map(MarkerObservation::stale);
        assert_eq!(compensate(&markers, &CompensationParams::default()), stale);

        markers[1].detected = true;
        let (out, reconstruction) = compensate_detailed(&markers, &CompensationParams::default());
        assert_eq!(out, stale);
        assert_eq!(reconstruction, Reconstruction::Unreconstructed { detected: 1 });
    }

    #[test]
    fn test_params_from_partial_json() -> Result<(), serde_json::Error> {
        let params: CompensationParams = serde_json::from_str("{}")?;
        assert_eq!(params, CompensationParams::default());
        let params: CompensationParams = serde_json::from_str(r#"{"diagonal_threshold": 42.0}"#)?;
        assert_eq!(params.diagonal_threshold, 42.0);
        Ok(())
    }
}
