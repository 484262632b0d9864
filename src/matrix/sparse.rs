//! Sparse matrices: hash-backed numeric storage and bitset-backed booleans.
//!
//! Both behave exactly like dense matrices through `get`/`set`; only the footprint
//! differs. Unwritten cells read as zero.

use crate::core::traits::Element;
use crate::error::Result;
use crate::matrix::{Backing, Matrix, Source};
use crate::storage::{BitStorage, HashStorage, SharedStorage, Storage};
use crate::utils::shape::Shape;

impl<T: Element> Matrix<T> {
    /// An empty hash-backed matrix.
    pub fn hashed(rows: usize, columns: usize) -> Result<Self> {
        let shape = Shape::new(rows, columns)?;
        let storage = Storage::Hash(HashStorage::new(T::KIND, rows, shape.size()));
        Ok(Matrix::from_source(shape, Source::Owned(SharedStorage::new(storage))))
    }

    pub(crate) fn sparse_bits(rows: usize, columns: usize) -> Result<Self> {
        let shape = Shape::new(rows, columns)?;
        let storage = Storage::Bits(BitStorage::new(shape.size()));
        Ok(Matrix::from_source(shape, Source::Owned(SharedStorage::new(storage))))
    }

    pub fn is_sparse(&self) -> bool {
        matches!(self.backing(), Backing::Hash | Backing::Bits)
    }

    /// Cells physically held by the root storage.
    pub fn stored_entries(&self) -> usize {
        match self.source.root() {
            Source::Owned(storage) | Source::Diagonal(storage) => storage.stored_entries(),
            _ => 0,
        }
    }
}

impl Matrix<bool> {
    /// An all-`false` matrix over a bitset.
    pub fn bits(rows: usize, columns: usize) -> Result<Self> {
        Matrix::sparse_bits(rows, columns)
    }
}
