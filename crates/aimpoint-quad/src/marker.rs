use aimpoint_algebra::Point2D;
use serde::{Deserialize, Serialize};

/// A single marker as reported by the detector for one frame.
///
/// Four of these make up a frame, indexed in the fixed physical corner order
/// (top-left, top-right, bottom-right, bottom-left).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkerObservation {
    /// Image-space position. Stale or zero when the marker is not detected.
    #[serde(flatten)]
    pub position: Point2D,
    /// Whether the detector found the marker in this frame.
    pub detected: bool,
}

impl MarkerObservation {
    /// Creates an observation for a detected marker.
    pub fn detected(x: f64, y: f64) -> Self {
        Self {
            position: Point2D::new(x, y),
            detected: true,
        }
    }

    /// Creates an observation for a marker that was not detected, at the origin.
    pub fn lost() -> Self {
        Self::default()
    }

    /// Creates an observation for a marker that was not detected but still
    /// carries its last known position.
    pub fn stale(position: Point2D) -> Self {
        Self {
            position,
            detected: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_json_shape() -> Result<(), serde_json::Error> {
        let marker: MarkerObservation =
            serde_json::from_str(r#"{"x": 12.5, "y": -3.0, "detected": true}"#)?;
        assert_eq!(marker, MarkerObservation::detected(12.5, -3.0));

        let json = serde_json::to_string(&MarkerObservation::lost())?;
        assert_eq!(json, r#"{"x":0.0,"y":0.0,"detected":false}"#);
        Ok(())
    }
}
