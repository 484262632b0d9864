//! matkit: column-major matrices over five element kinds
//!
//! This crate provides a single generic `Matrix<T>` over boolean, 32-bit integer,
//! 64-bit integer, double and complex elements, backed by dense arrays, hash maps,
//! bitsets or a stored diagonal. Views, strided slices and cross-kind adapters share
//! storage with the matrix they come from. Multiplication of array-based double
//! matrices is delegated to faer.

pub mod backend;
pub mod config;
pub mod core;
pub mod error;
pub mod matrix;
pub mod routines;
pub mod storage;
pub mod utils;

// Re-exports for convenience
pub use backend::{DenseMultiply, FaerGemm, ReferenceGemm};
pub use config::MultiplyOptions;
pub use crate::core::traits::{Element, Numeric};
pub use crate::core::value::{ElementKind, Value};
pub use error::{MatError, Result, ViewViolation};
pub use matrix::arith::ElementwiseOp;
pub use matrix::{Backing, Matrix, MatrixFlags};
pub use utils::{Axis, Range, Shape, Transpose};

pub use num_complex::Complex64;
