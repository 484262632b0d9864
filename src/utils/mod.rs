//! Index arithmetic, shapes and ranges.

pub mod indexer;
pub mod range;
pub mod shape;

pub use range::Range;
pub use shape::{Axis, Shape, Transpose};
