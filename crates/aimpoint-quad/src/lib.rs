#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Aimpoint Quad
//!
//! Geometry core that turns four fiducial marker positions into a pointer
//! coordinate. All functions are pure and total: degenerate input falls back
//! to a defined value instead of returning an error.
//!
//! ## Example: live tracking
//!
//! ```rust
//! use aimpoint_quad::{affine::{calc_sanitized, AffineParams}, compensate::{compensate, CompensationParams}, MarkerObservation};
//!
//! let markers = [
//!     MarkerObservation::detected(0.0, 0.0),
//!     MarkerObservation::detected(200.0, 0.0),
//!     MarkerObservation::lost(),
//!     MarkerObservation::detected(0.0, 100.0),
//! ];
//!
//! let corners = compensate(&markers, &CompensationParams::default());
//! let uv = calc_sanitized(&corners, 200.0, 100.0, &AffineParams::default());
//! assert!((uv.x - 0.5).abs() < 1e-12 && (uv.y - 0.5).abs() < 1e-12);
//! ```
//!
//! ## Example: per-user calibration
//!
//! ```rust
//! use aimpoint_algebra::Point2D;
//! use aimpoint_quad::bilinear::{calibrate, CalibrationParams};
//!
//! let calibration = [
//!     Point2D::new(0.0, 0.0),
//!     Point2D::new(100.0, 0.0),
//!     Point2D::new(100.0, 100.0),
//!     Point2D::new(0.0, 100.0),
//! ];
//! let pos = calibrate(&calibration, Point2D::new(50.0, 50.0), &CalibrationParams::default());
//! assert_eq!(pos, Point2D::new(0.5, 0.5));
//! ```

/// Affine (barycentric) solver for the live screen-space mapping.
pub mod affine;

/// Bilinear patch evaluation and its Newton-Raphson inverse.
pub mod bilinear;

/// Reconstruction of occluded marker corners.
pub mod compensate;

mod marker;
pub use marker::MarkerObservation;

/// Nominal calibration target corners in normalized space, in TL, TR, BR, BL order.
pub use bilinear::NOMINAL_TARGETS;
