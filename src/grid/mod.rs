//! Curve and heatmap evaluation
//!
//! Runs the pricing engine over an ordered spot sequence (curve mode) or over
//! the full cross product of spot and strike sequences (grid mode), collecting
//! results indexed exactly like the inputs.

pub mod axis;
pub mod evaluator;
pub mod types;

pub use axis::*;
pub use evaluator::*;
pub use types::*;
