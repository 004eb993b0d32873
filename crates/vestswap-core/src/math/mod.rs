//! # Mathematical Functions
//!
//! Checked integer arithmetic, wide mul-div and price conversion.

pub mod big_int;
pub mod pricing;
pub mod safe_math;

// Re-export commonly used functions
pub use big_int::*;
pub use pricing::*;
pub use safe_math::*;
