//! Vector types module.
//!
//! - Point2D: 2D point / vector (double precision)

mod point2d;

pub use point2d::Point2D;
