//! Mathematical functions module
//!
//! Number-format conversions used when reading Touchstone data.

pub mod conversions;

pub use conversions::*;
