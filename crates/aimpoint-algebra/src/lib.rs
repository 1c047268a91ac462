#![deny(missing_docs)]
//! Algebraic primitives for aimpoint.
//!
//! This crate provides:
//! - [`Point2D`]: a double precision 2D point/vector backed by `glam::DVec2`
//! - [`Mat2F64`]: a 2x2 matrix with an explicit Cramer solve

mod matrix;
mod vector;

pub use matrix::Mat2F64;
pub use vector::Point2D;

// Re-export the glam types backing the primitives.
pub use glam::{DMat2, DVec2};
