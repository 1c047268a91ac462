//! Aimpoint: turns the four fiducial markers seen by a handheld pointing
//! device into a normalized pointer coordinate, with occlusion compensation
//! and per-user calibration.

#[doc(inline)]
pub use aimpoint_algebra as algebra;

#[doc(inline)]
pub use aimpoint_quad as quad;

#[doc(inline)]
pub use aimpoint_pointer as pointer;
