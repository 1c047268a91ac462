#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Aimpoint Pointer
//!
//! The layers around the geometry core:
//!
//! - [`Tracker`]: per-frame pipeline from four marker observations to a
//!   [`PointerSample`], delivered through a [`SampleSink`].
//! - [`CalibrationSession`] and [`CalibrationRound`]: capture of the four
//!   per-user calibration points, for one player or several at once.
//! - [`ScreenMapper`]: calibrated normalized position to screen pixels.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::mpsc;
//! use aimpoint_pointer::{Tracker, TrackerConfig, Viewport};
//! use aimpoint_quad::MarkerObservation;
//!
//! let (tx, rx) = mpsc::channel();
//! let mut tracker = Tracker::new("device-1", "Alice", TrackerConfig::default());
//!
//! let markers = [
//!     MarkerObservation::detected(0.0, 0.0),
//!     MarkerObservation::detected(640.0, 0.0),
//!     MarkerObservation::detected(640.0, 480.0),
//!     MarkerObservation::detected(0.0, 480.0),
//! ];
//! tracker.publish(&markers, Viewport::new(640.0, 480.0), false, &mut tx.clone())?;
//!
//! let sample = rx.recv()?;
//! assert_eq!((sample.x, sample.y), (0.5, 0.5));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Calibration capture for one player and for a round of players.
pub mod calibration;

/// Pipeline configuration and loading.
pub mod config;

/// Error types for the pointer layers.
pub mod error;

/// Pointer sample record and viewport size.
pub mod sample;

/// Mapping from calibrated positions to screen pixels.
pub mod screen;

/// Destinations for pointer samples.
pub mod sink;

/// Per-frame tracking pipeline.
pub mod tracker;

pub use calibration::{CalibrationPrompt, CalibrationRound, CalibrationSession, RoundEvent};
pub use config::PipelineConfig;
pub use error::PointerError;
pub use sample::{PointerSample, Viewport};
pub use screen::ScreenMapper;
pub use sink::SampleSink;
pub use tracker::{Tracker, TrackerConfig};
