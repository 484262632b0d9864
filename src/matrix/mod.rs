//! The matrix contract: one generic `Matrix<T>` over a closed set of data sources.
//!
//! Every matrix is column-major with `linear(i, j) = i + j * rows`. A matrix either
//! owns a storage handle (dense, sparse, diagonal), reads through another matrix's
//! source (windows, strided slices, flat slices) or reads a computed sequence. Adapters
//! are the same source read as a different element kind, so every access resolves to
//! one storage cell and one coercion.

pub mod adapter;
pub mod arith;
pub mod dense;
pub mod diagonal;
pub mod logical;
pub mod mmul;
pub mod ops;
pub mod sparse;
pub mod view;

use std::fmt;
use std::marker::PhantomData;

use bitflags::bitflags;

use crate::core::traits::Element;
use crate::core::value::{ElementKind, Value};
use crate::error::{MatError, Result, ViewViolation};
use crate::storage::{SharedStorage, Storage};
use crate::utils::indexer::{column_major, compute_linear_index, decompose, slice_index};
use crate::utils::range::Range;
use crate::utils::shape::Shape;

bitflags! {
    /// Capabilities of a matrix handle.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct MatrixFlags: u8 {
        const VIEW        = 0b0000_0001;
        const ADAPTER     = 0b0000_0010;
        const ARRAY_BASED = 0b0000_0100;
        const SPARSE      = 0b0000_1000;
        const DIAGONAL    = 0b0001_0000;
        const FROZEN      = 0b0010_0000;
        const READ_ONLY   = 0b0100_0000;
    }
}

/// The container at the root of a matrix's source chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backing {
    Array,
    Hash,
    Bits,
    Diagonal,
    Sequence,
}

/// Where the elements of a matrix come from.
#[derive(Debug, Clone)]
pub(crate) enum Source {
    /// Linear index equals storage index.
    Owned(SharedStorage),
    /// Stored diagonal; everything else reads as zero.
    Diagonal(SharedStorage),
    /// Rectangular window at an offset into the parent.
    Window {
        parent: Box<Source>,
        parent_shape: Shape,
        row_offset: usize,
        col_offset: usize,
    },
    /// Rows and columns picked by two strided ranges.
    Strided {
        parent: Box<Source>,
        parent_shape: Shape,
        rows: Range,
        cols: Range,
    },
    /// Linear positions picked by one strided range.
    Flat {
        parent: Box<Source>,
        parent_shape: Shape,
        range: Range,
    },
    /// The elements of a range, read-only.
    Sequence(Range),
}

/// A resolved linear index.
pub(crate) enum Location<'a> {
    Stored(&'a SharedStorage, usize),
    OffDiagonal { row: usize, column: usize },
    Constant(Value),
}

impl Source {
    /// Resolve `index` of a matrix shaped `shape` reading from this source.
    ///
    /// Geometry is validated when views are built, so only corrupted ranges can fail.
    pub(crate) fn locate(&self, shape: Shape, index: usize) -> Result<Location<'_>> {
        match self {
            Source::Owned(storage) => Ok(Location::Stored(storage, index)),
            Source::Diagonal(storage) => {
                let (row, column) = decompose(index, shape.rows);
                if row == column {
                    Ok(Location::Stored(storage, row))
                } else {
                    Ok(Location::OffDiagonal { row, column })
                }
            }
            Source::Window { parent, parent_shape, row_offset, col_offset } => {
                let parent_index = compute_linear_index(
                    index,
                    shape.rows,
                    *col_offset,
                    *row_offset,
                    parent_shape.rows,
                    parent_shape.columns,
                )?;
                parent.locate(*parent_shape, parent_index)
            }
            Source::Strided { parent, parent_shape, rows, cols } => {
                // decompose by the slice's own row count so reshapes keep linear order
                let (row, col) = decompose(index, rows.len().max(1));
                let parent_row = slice_index(rows.start(), rows.step(), row, parent_shape.rows)?;
                let parent_col =
                    slice_index(cols.start(), cols.step(), col, parent_shape.columns)?;
                parent.locate(*parent_shape, parent_row + parent_col * parent_shape.rows)
            }
            Source::Flat { parent, parent_shape, range } => {
                let position = slice_index(range.start(), range.step(), index, parent_shape.size())?;
                parent.locate(*parent_shape, position)
            }
            Source::Sequence(range) => Ok(Location::Constant(Value::Long(range.get(index)? as i64))),
        }
    }

    /// The same chain with every storage handle frozen.
    pub(crate) fn frozen(&self) -> Source {
        match self {
            Source::Owned(storage) => Source::Owned(storage.frozen()),
            Source::Diagonal(storage) => Source::Diagonal(storage.frozen()),
            Source::Window { parent, parent_shape, row_offset, col_offset } => Source::Window {
                parent: Box::new(parent.frozen()),
                parent_shape: *parent_shape,
                row_offset: *row_offset,
                col_offset: *col_offset,
            },
            Source::Strided { parent, parent_shape, rows, cols } => Source::Strided {
                parent: Box::new(parent.frozen()),
                parent_shape: *parent_shape,
                rows: *rows,
                cols: *cols,
            },
            Source::Flat { parent, parent_shape, range } => Source::Flat {
                parent: Box::new(parent.frozen()),
                parent_shape: *parent_shape,
                range: *range,
            },
            Source::Sequence(range) => Source::Sequence(*range),
        }
    }

    /// The source at the end of the chain.
    pub(crate) fn root(&self) -> &Source {
        match self {
            Source::Window { parent, .. }
            | Source::Strided { parent, .. }
            | Source::Flat { parent, .. } => parent.root(),
            root => root,
        }
    }

    /// The storage handle at the end of the chain, whether stored densely or as a diagonal.
    pub(crate) fn root_storage(&self) -> Option<&SharedStorage> {
        match self.root() {
            Source::Owned(storage) | Source::Diagonal(storage) => Some(storage),
            _ => None,
        }
    }

    pub(crate) fn is_view(&self) -> bool {
        matches!(self, Source::Window { .. } | Source::Strided { .. } | Source::Flat { .. })
    }
}

/// A column-major `rows x columns` matrix of `T`.
///
/// Cloning a matrix clones its handle: both clones see the same cells. Use
/// [`Matrix::copy`] for independent data.
pub struct Matrix<T: Element> {
    shape: Shape,
    source: Source,
    _kind: PhantomData<T>,
}

impl<T: Element> Clone for Matrix<T> {
    fn clone(&self) -> Self {
        Matrix::from_source(self.shape, self.source.clone())
    }
}

impl<T: Element> Matrix<T> {
    pub(crate) fn from_source(shape: Shape, source: Source) -> Self {
        Matrix { shape, source, _kind: PhantomData }
    }

    pub fn rows(&self) -> usize {
        self.shape.rows
    }

    pub fn columns(&self) -> usize {
        self.shape.columns
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn size(&self) -> usize {
        self.shape.size()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn is_vector(&self) -> bool {
        self.shape.is_vector()
    }

    pub fn is_square(&self) -> bool {
        self.shape.is_square()
    }

    /// Element at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        let index = column_major(row, col, self.rows(), self.columns())?;
        self.read(index)
    }

    /// Overwrite the element at `(row, col)`; the write reaches the owning storage.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        let index = column_major(row, col, self.rows(), self.columns())?;
        self.write(index, value)
    }

    /// Element at column-major position `index`.
    pub fn get_linear(&self, index: usize) -> Result<T> {
        self.check_linear(index)?;
        self.read(index)
    }

    pub fn set_linear(&mut self, index: usize, value: T) -> Result<()> {
        self.check_linear(index)?;
        self.write(index, value)
    }

    fn check_linear(&self, index: usize) -> Result<()> {
        if index < self.size() {
            Ok(())
        } else {
            Err(MatError::IndexOutOfRange { index, extent: self.size() })
        }
    }

    /// Read an index already known to be in bounds.
    pub(crate) fn read(&self, index: usize) -> Result<T> {
        match self.source.locate(self.shape, index)? {
            Location::Stored(storage, at) => storage.get_value(at).map(T::from_value),
            Location::OffDiagonal { .. } => Ok(T::ZERO),
            Location::Constant(value) => Ok(T::from_value(value)),
        }
    }

    /// Write an index already known to be in bounds.
    pub(crate) fn write(&self, index: usize, value: T) -> Result<()> {
        match self.source.locate(self.shape, index)? {
            Location::Stored(storage, at) => storage.set_value(at, value.into_value()),
            Location::OffDiagonal { row, column } => {
                Err(ViewViolation::DiagonalWrite { row, column }.into())
            }
            Location::Constant(_) => Err(ViewViolation::ReadOnly.into()),
        }
    }

    /// The storage handle this matrix owns directly, if any.
    pub(crate) fn owned_storage(&self) -> Option<&SharedStorage> {
        match &self.source {
            Source::Owned(storage) => Some(storage),
            _ => None,
        }
    }

    /// The kind the root container stores natively.
    pub fn native_kind(&self) -> ElementKind {
        match self.source.root() {
            Source::Owned(storage) | Source::Diagonal(storage) => storage.native_kind(),
            _ => ElementKind::Int,
        }
    }

    pub fn backing(&self) -> Backing {
        match self.source.root() {
            Source::Owned(storage) => storage.with(|s| match s {
                Storage::Array(_) => Backing::Array,
                Storage::Hash(_) => Backing::Hash,
                Storage::Bits(_) => Backing::Bits,
            }),
            Source::Diagonal(_) => Backing::Diagonal,
            _ => Backing::Sequence,
        }
    }

    /// Whether the elements sit in one native buffer of `T`, laid out exactly as this
    /// matrix's column-major order.
    pub fn is_array_based(&self) -> bool {
        self.owned_storage()
            .is_some_and(|s| s.is_array_based() && s.native_kind() == T::KIND)
    }

    pub fn is_view(&self) -> bool {
        self.source.is_view()
    }

    pub fn flags(&self) -> MatrixFlags {
        let mut flags = MatrixFlags::empty();
        flags.set(MatrixFlags::VIEW, self.is_view());
        flags.set(MatrixFlags::ADAPTER, self.native_kind() != T::KIND);
        flags.set(MatrixFlags::ARRAY_BASED, self.is_array_based());
        let backing = self.backing();
        flags.set(MatrixFlags::SPARSE, matches!(backing, Backing::Hash | Backing::Bits));
        flags.set(MatrixFlags::DIAGONAL, backing == Backing::Diagonal);
        let frozen = self.source.root_storage().is_some_and(SharedStorage::is_frozen);
        flags.set(MatrixFlags::FROZEN, frozen);
        flags.set(MatrixFlags::READ_ONLY, frozen || backing == Backing::Sequence);
        flags
    }

    /// A handle onto the same cells that refuses every write.
    pub fn frozen(&self) -> Matrix<T> {
        Matrix::from_source(self.shape, self.source.frozen())
    }

    /// Whether both matrices read from the same root storage.
    pub fn shares_storage_with<U: Element>(&self, other: &Matrix<U>) -> bool {
        match (self.source.root_storage(), other.source.root_storage()) {
            (Some(a), Some(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// An independent matrix with the same elements.
    ///
    /// Dense, sparse and diagonal matrices keep their backing; views and adapters
    /// materialize into a dense matrix of `T`.
    pub fn copy(&self) -> Result<Matrix<T>> {
        if self.native_kind() == T::KIND {
            match &self.source {
                Source::Owned(storage) => {
                    return Ok(Matrix::from_source(self.shape, Source::Owned(storage.copy())));
                }
                Source::Diagonal(storage) => {
                    return Ok(Matrix::from_source(self.shape, Source::Diagonal(storage.copy())));
                }
                _ => {}
            }
        }
        self.to_dense()
    }

    /// Materialize into a fresh dense matrix of `T`.
    pub fn to_dense(&self) -> Result<Matrix<T>> {
        if self.is_view() {
            tracing::debug!(shape = %self.shape, "materializing view");
        }
        Matrix::from_column_major(self.rows(), self.columns(), self.to_vec()?)
    }

    /// An empty matrix of the given shape backed like this one.
    pub fn new_empty_like(&self, rows: usize, columns: usize) -> Result<Matrix<T>> {
        if !self.is_view() && self.native_kind() == T::KIND {
            match self.backing() {
                Backing::Hash => return Matrix::hashed(rows, columns),
                Backing::Bits => return Matrix::sparse_bits(rows, columns),
                _ => {}
            }
        }
        Matrix::zeros(rows, columns)
    }

    /// The same elements in a `rows x columns` shape, in the same column-major order.
    ///
    /// Owned storage is shared with the result. Offset windows cannot be reshaped;
    /// flat slices, diagonals and sequences are copied first.
    pub fn reshape(&self, rows: usize, columns: usize) -> Result<Matrix<T>> {
        let shape = Shape::new(rows, columns)?;
        if shape.size() != self.size() {
            return Err(MatError::SizeMismatch { expected: self.size(), found: shape.size() });
        }
        match &self.source {
            Source::Owned(_) | Source::Strided { .. } => {
                Ok(Matrix::from_source(shape, self.source.clone()))
            }
            Source::Window { .. } => Err(ViewViolation::Reshape.into()),
            Source::Diagonal(_) | Source::Flat { .. } | Source::Sequence(_) => {
                tracing::debug!(from = %self.shape, to = %shape, "reshape materializes a copy");
                let dense = self.to_dense()?;
                Ok(Matrix::from_source(shape, dense.source))
            }
        }
    }

    /// A new matrix with rows and columns swapped.
    pub fn transpose(&self) -> Result<Matrix<T>> {
        if let (Source::Diagonal(storage), true) = (&self.source, self.native_kind() == T::KIND) {
            return Ok(Matrix::from_source(self.shape.transposed(), Source::Diagonal(storage.copy())));
        }
        let mut out = self.new_empty_like(self.columns(), self.rows())?;
        for j in 0..self.columns() {
            for i in 0..self.rows() {
                let value = self.get(i, j)?;
                // the output starts out zeroed; skipping keeps sparse outputs sparse
                if value != T::ZERO {
                    out.set(j, i, value)?;
                }
            }
        }
        Ok(out)
    }

    /// All elements in column-major order.
    pub fn to_vec(&self) -> Result<Vec<T>> {
        (0..self.size()).map(|i| self.read(i)).collect()
    }

    /// Rows as vectors.
    pub fn to_rows(&self) -> Result<Vec<Vec<T>>> {
        (0..self.rows())
            .map(|i| (0..self.columns()).map(|j| self.get(i, j)).collect())
            .collect()
    }

    /// Iterate elements in column-major order.
    pub fn iter(&self) -> impl Iterator<Item = Result<T>> + '_ {
        (0..self.size()).map(move |i| self.read(i))
    }

    /// Element-wise equality of shape and values, regardless of backing.
    pub fn equals<U: Element>(&self, other: &Matrix<U>) -> Result<bool> {
        if self.shape != other.shape {
            return Ok(false);
        }
        for i in 0..self.size() {
            if self.read(i)?.into_value() != other.read(i)?.into_value().coerce(T::KIND) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl<T: Element> fmt::Debug for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix")
            .field("kind", &T::KIND)
            .field("shape", &self.shape)
            .field("backing", &self.backing())
            .field("flags", &self.flags())
            .finish()
    }
}
