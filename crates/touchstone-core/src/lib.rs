//! touchstone-core: Touchstone network-parameter file parser
//!
//! Reads Touchstone 1.1 text into per-parameter series of complex points.
//!
//! ## Modules
//!
//! - `frequency` - Frequency units of the option line
//! - `math` - Number-format conversions (MA, DB, RI)
//! - `datapoint` - Single complex measurement at one frequency
//! - `touchstone` - Option line and data parser

pub mod constants;
pub mod datapoint;
pub mod frequency;
pub mod math;
pub mod touchstone;

pub use datapoint::Datapoint;
pub use touchstone::{Options, Touchstone, TouchstoneError};
