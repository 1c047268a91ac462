use aimpoint_algebra::Point2D;
use serde::{Deserialize, Serialize};

/// Maps calibrated normalized positions to screen pixels.
///
/// The on-screen markers occupy a `marker_size` square at each corner, so the
/// normalized range spans the screen minus one marker, offset by half a marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenMapper {
    /// Screen width in pixels.
    pub width: f64,
    /// Screen height in pixels.
    pub height: f64,
    /// Side of the square markers drawn at the screen corners, in pixels.
    pub marker_size: f64,
}

impl ScreenMapper {
    /// Default marker side, in pixels.
    pub const DEFAULT_MARKER_SIZE: f64 = 200.0;

    /// Creates a mapper for a `width` x `height` screen with the default marker size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            marker_size: Self::DEFAULT_MARKER_SIZE,
        }
    }

    /// Screen pixel position of a normalized position, without bounds checks.
    pub fn to_pixels(&self, pos: Point2D) -> Point2D {
        let half = self.marker_size / 2.0;
        Point2D::new(
            pos.x * (self.width - self.marker_size) + half,
            pos.y * (self.height - self.marker_size) + half,
        )
    }

    /// Screen pixel position of a normalized position.
    ///
    /// Returns `None` if the position falls outside the screen.
    pub fn map(&self, pos: Point2D) -> Option<Point2D> {
        let p = self.to_pixels(pos);
        let inside = (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y);
        inside.then_some(p)
    }
}
