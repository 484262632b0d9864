use thiserror::Error;

use crate::utils::shape::Shape;

// Unified error type for matkit

/// Structural operations a view, diagonal or frozen storage refuses.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewViolation {
    #[error("an offset window cannot be reshaped")]
    Reshape,
    #[error("off-diagonal entry ({row}, {column}) is not writable")]
    DiagonalWrite { row: usize, column: usize },
    #[error("storage is frozen")]
    Frozen,
    #[error("matrix is read-only")]
    ReadOnly,
    #[error("diagonal view is only available on diagonal matrices")]
    DiagonalView,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatError {
    #[error("non-conformant shapes: {lhs} and {rhs}")]
    NonConformant { lhs: Shape, rhs: Shape },
    #[error("size mismatch: expected {expected}, found {found}")]
    SizeMismatch { expected: usize, found: usize },
    #[error("index {index} out of bounds for extent {extent}")]
    IndexOutOfRange { index: usize, extent: usize },
    #[error("unsupported view operation: {0}")]
    UnsupportedView(#[from] ViewViolation),
    #[error("arithmetic error: {0}")]
    Arithmetic(&'static str),
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("shape {rows}x{columns} overflows the addressable size")]
    ShapeOverflow { rows: usize, columns: usize },
}

impl MatError {
    /// Shorthand for a shape conformance failure.
    pub fn non_conformant(lhs: Shape, rhs: Shape) -> Self {
        MatError::NonConformant { lhs, rhs }
    }
}

pub type Result<T> = std::result::Result<T, MatError>;
