//! Zero-copy views: windows, strided slices and flat slices.
//!
//! A view keeps a clone of its parent's source plus the geometry needed to map its own
//! indexes into the parent. Reads and writes go straight through, so views of the same
//! parent alias each other. The geometry is checked once, here.

use crate::core::traits::Element;
use crate::error::{MatError, Result, ViewViolation};
use crate::matrix::{Matrix, Source};
use crate::storage::SharedStorage;
use crate::utils::range::Range;
use crate::utils::shape::{Axis, Shape};

fn end_within(offset: usize, extent: usize, limit: usize) -> Result<()> {
    match offset.checked_add(extent) {
        Some(end) if end <= limit => Ok(()),
        _ => Err(MatError::IndexOutOfRange { index: offset.saturating_add(extent), extent: limit }),
    }
}

impl<T: Element> Matrix<T> {
    /// The `rows x columns` window whose top-left corner is `(row_offset, col_offset)`.
    pub fn view(&self, row_offset: usize, col_offset: usize, rows: usize, columns: usize) -> Result<Matrix<T>> {
        end_within(row_offset, rows, self.rows())?;
        end_within(col_offset, columns, self.columns())?;
        let source = Source::Window {
            parent: Box::new(self.source.clone()),
            parent_shape: self.shape,
            row_offset,
            col_offset,
        };
        Ok(Matrix::from_source(Shape::new(rows, columns)?, source))
    }

    /// Row `i` as a `1 x columns` view.
    pub fn row_view(&self, i: usize) -> Result<Matrix<T>> {
        self.view(i, 0, 1, self.columns())
    }

    /// Column `j` as a `rows x 1` view.
    pub fn column_view(&self, j: usize) -> Result<Matrix<T>> {
        self.view(0, j, self.rows(), 1)
    }

    /// The stored diagonal of a diagonal matrix as an `n x 1` view.
    pub fn diagonal_view(&self) -> Result<Matrix<T>> {
        match &self.source {
            Source::Diagonal(storage) => {
                let source = Source::Owned(SharedStorage::clone(storage));
                Ok(Matrix::from_source(Shape::new(storage.len(), 1)?, source))
            }
            _ => Err(ViewViolation::DiagonalView.into()),
        }
    }

    /// Linear positions `range[0], range[1], ...` as a `n x 1` view.
    pub fn slice(&self, range: Range) -> Result<Matrix<T>> {
        range.check_within(self.size())?;
        let source = Source::Flat {
            parent: Box::new(self.source.clone()),
            parent_shape: self.shape,
            range,
        };
        Ok(Matrix::from_source(Shape::new(range.len(), 1)?, source))
    }

    /// The rows in `rows` crossed with the columns in `columns`.
    pub fn slice_2d(&self, rows: Range, columns: Range) -> Result<Matrix<T>> {
        rows.check_within(self.rows())?;
        columns.check_within(self.columns())?;
        let source = Source::Strided {
            parent: Box::new(self.source.clone()),
            parent_shape: self.shape,
            rows,
            cols: columns,
        };
        Ok(Matrix::from_source(Shape::new(rows.len(), columns.len())?, source))
    }

    /// Every column of the rows in `range` (`Axis::Row`) or every row of the columns in
    /// `range` (`Axis::Column`).
    pub fn slice_axis(&self, range: Range, axis: Axis) -> Result<Matrix<T>> {
        match axis {
            Axis::Row => self.slice_2d(range, Range::to(self.columns())),
            Axis::Column => self.slice_2d(Range::to(self.rows()), range),
        }
    }
}

impl Range {
    /// The elements of this range as a read-only `1 x n` matrix.
    pub fn to_matrix(&self) -> Matrix<i32> {
        let shape = Shape { rows: 1, columns: self.len() };
        Matrix::from_source(shape, Source::Sequence(*self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::MatrixFlags;

    fn grid() -> Matrix<i32> {
        // 4x3, element (i, j) = 10 * i + j
        Matrix::from_fn(4, 3, |i, j| (10 * i + j) as i32).unwrap()
    }

    #[test]
    fn window_reads_and_writes_through() {
        let m = grid();
        let mut w = m.view(1, 1, 2, 2).unwrap();
        assert_eq!(w.to_vec().unwrap(), vec![11, 21, 12, 22]);
        w.set(1, 0, -1).unwrap();
        assert_eq!(m.get(2, 1).unwrap(), -1);
        assert!(m.view(3, 0, 2, 1).is_err());
        assert_eq!(w.reshape(1, 4).unwrap_err(), MatError::UnsupportedView(ViewViolation::Reshape));
    }

    #[test]
    fn nested_windows_compose() {
        let m = grid();
        let inner = m.view(1, 0, 3, 3).unwrap().view(1, 1, 2, 2).unwrap();
        assert_eq!(inner.get(0, 0).unwrap(), 21);
        assert_eq!(inner.get(1, 1).unwrap(), 32);
    }

    #[test]
    fn sibling_views_alias() {
        let m = grid();
        let mut row = m.row_view(2).unwrap();
        let col = m.column_view(1).unwrap();
        row.set(0, 1, 99).unwrap();
        assert_eq!(col.get(2, 0).unwrap(), 99);
    }

    #[test]
    fn strided_slice_and_reshape() {
        let m = grid();
        let s = m.slice_2d(Range::new(0, 4, 2).unwrap(), Range::new(2, -1, -2).unwrap()).unwrap();
        assert_eq!(s.to_rows().unwrap(), vec![vec![2, 0], vec![22, 20]]);
        let r = s.reshape(1, 4).unwrap();
        assert_eq!(r.to_vec().unwrap(), s.to_vec().unwrap());
        assert!(m.slice_2d(Range::to(5), Range::to(1)).is_err());
    }

    #[test]
    fn flat_slice_and_reshape_copy() {
        let m = grid();
        let s = m.slice(Range::new(1, 12, 4).unwrap()).unwrap();
        assert_eq!(s.to_vec().unwrap(), vec![10, 11, 12]);
        let r = s.reshape(1, 3).unwrap();
        assert!(!r.is_view());
        assert_eq!(r.to_vec().unwrap(), vec![10, 11, 12]);
    }

    #[test]
    fn range_matrix_is_read_only() {
        let mut r = Range::new(2, 11, 3).unwrap().to_matrix();
        assert_eq!(r.to_vec().unwrap(), vec![2, 5, 8]);
        assert_eq!(r.set(0, 0, 1), Err(MatError::UnsupportedView(ViewViolation::ReadOnly)));
        assert!(r.flags().contains(MatrixFlags::READ_ONLY));
        assert_eq!(r.as_double_matrix().get(0, 2).unwrap(), 8.0);
    }

    #[test]
    fn slice_axis_selects_whole_rows() {
        let m = grid();
        let rows = m.slice_axis(Range::span(1, 3).unwrap(), Axis::Row).unwrap();
        assert_eq!(rows.shape(), Shape { rows: 2, columns: 3 });
        assert_eq!(rows.get(1, 2).unwrap(), 22);
    }
}
