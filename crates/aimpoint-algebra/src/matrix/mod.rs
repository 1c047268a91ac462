//! Matrix types module.
//!
//! - Mat2F64: 2x2 matrix (double precision)

mod mat2;

pub use mat2::Mat2F64;
