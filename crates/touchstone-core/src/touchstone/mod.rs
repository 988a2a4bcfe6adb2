//! Touchstone file input
//!
//! Reading of Touchstone v1.1 (.s1p / .s2p) files.

pub mod options;
pub mod parser;

pub use options::{Options, ParameterType, SParamFormat, TokenCursor};
pub use parser::{Touchstone, TouchstoneError};
