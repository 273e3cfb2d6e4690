//! Expression evaluation for calc-rs.
//!
//! [`evaluator`] reduces a tree to a value against a variable store, and
//! [`release`] walks a tree once per distinct node the way bulk
//! deallocation would.

pub mod evaluator;
pub mod release;

pub use evaluator::{Evaluator, apply_binary, apply_unary, approx_equal};
pub use release::{ReleaseReport, release};
