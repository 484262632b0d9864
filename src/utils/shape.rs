//! Matrix shape and the two axis/transpose selectors shared across the crate.

use std::fmt;

use crate::error::{MatError, Result};

/// Row and column extents of a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub rows: usize,
    pub columns: usize,
}

impl Shape {
    /// Build a shape, rejecting extents whose product overflows.
    pub fn new(rows: usize, columns: usize) -> Result<Self> {
        rows.checked_mul(columns)
            .ok_or(MatError::ShapeOverflow { rows, columns })?;
        Ok(Shape { rows, columns })
    }

    /// Total number of elements. Cannot overflow for a shape built by `new`.
    pub fn size(&self) -> usize {
        self.rows * self.columns
    }

    pub fn transposed(&self) -> Shape {
        Shape { rows: self.columns, columns: self.rows }
    }

    /// A single row or a single column.
    pub fn is_vector(&self) -> bool {
        self.rows == 1 || self.columns == 1
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.columns
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}

/// Direction along which a vector is broadcast or a slice is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Operate on rows: a broadcast vector has one entry per column.
    Row,
    /// Operate on columns: a broadcast vector has one entry per row.
    Column,
}

/// Whether an operand of a multiplication is read as its transpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transpose {
    #[default]
    No,
    Yes,
}

impl Transpose {
    pub fn is_transpose(&self) -> bool {
        matches!(self, Transpose::Yes)
    }

    /// Call exactly one of the arguments depending on the flag and return the result.
    pub fn call<F, G, T>(&self, if_no: F, if_yes: G) -> T
    where
        F: FnOnce() -> T,
        G: FnOnce() -> T,
    {
        match self {
            Transpose::No => if_no(),
            Transpose::Yes => if_yes(),
        }
    }

    /// Effective `(rows, columns)` of an operand of physical shape `shape`.
    pub fn apply(&self, shape: Shape) -> Shape {
        match self {
            Transpose::No => shape,
            Transpose::Yes => shape.transposed(),
        }
    }
}
