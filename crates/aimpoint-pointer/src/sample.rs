use aimpoint_algebra::Point2D;
use serde::{Deserialize, Serialize};

/// A pointer position produced for one frame of one device.
///
/// Serialized as `{"id", "name", "x", "y", "fire"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    /// Device identifier.
    pub id: String,
    /// Display name of the player holding the device.
    pub name: String,
    /// Normalized x, nominally in `[0, 1]`.
    pub x: f64,
    /// Normalized y, nominally in `[0, 1]`.
    pub y: f64,
    /// Whether the trigger was pulled on this frame.
    #[serde(default)]
    pub fire: bool,
}

impl PointerSample {
    /// The normalized position as a point.
    #[inline]
    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

/// Size of the viewport whose center is localized in the marker quad.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Creates a new viewport size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
