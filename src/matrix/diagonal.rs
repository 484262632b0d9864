//! Diagonal matrices.
//!
//! Only `min(rows, columns)` values are stored. Off-diagonal cells read as zero and
//! refuse writes. Element-wise transforms on a diagonal touch the stored values only.

use crate::core::traits::{Element, Numeric};
use crate::error::{MatError, Result};
use crate::matrix::{Matrix, Source};
use crate::storage::{ArrayStorage, SharedStorage};
use crate::utils::shape::Shape;

impl<T: Element> Matrix<T> {
    /// A `rows x columns` diagonal matrix; `values` holds `min(rows, columns)` entries.
    pub fn diagonal(rows: usize, columns: usize, values: Vec<T>) -> Result<Self> {
        let shape = Shape::new(rows, columns)?;
        let n = rows.min(columns);
        if values.len() != n {
            return Err(MatError::SizeMismatch { expected: n, found: values.len() });
        }
        let storage = ArrayStorage::from_values(T::KIND, values.into_iter().map(T::into_value));
        Ok(Matrix::from_source(shape, Source::Diagonal(SharedStorage::array(storage))))
    }

    /// The `n x n` identity.
    pub fn identity(n: usize) -> Result<Self> {
        Matrix::diagonal(n, n, vec![T::ONE; n])
    }

    /// Whether this handle owns a diagonal storage directly.
    pub fn is_diagonal(&self) -> bool {
        matches!(self.source, Source::Diagonal(_))
    }

    pub(crate) fn diagonal_storage(&self) -> Option<&SharedStorage> {
        match &self.source {
            Source::Diagonal(storage) => Some(storage),
            _ => None,
        }
    }

    /// Length of the main diagonal.
    pub fn diagonal_size(&self) -> usize {
        self.rows().min(self.columns())
    }

    /// Element `(i, i)`.
    pub fn diagonal_value(&self, i: usize) -> Result<T> {
        self.get(i, i)
    }

    pub fn set_diagonal_value(&mut self, i: usize, value: T) -> Result<()> {
        self.set(i, i, value)
    }
}

/// Apply `f` to each stored diagonal value, passing its position.
pub(crate) fn update_diagonal<T: Element>(
    storage: &SharedStorage,
    mut f: impl FnMut(usize, T) -> Result<T>,
) -> Result<()> {
    for i in 0..storage.len() {
        let value = T::from_value(storage.get_value(i)?);
        storage.set_value(i, f(i, value)?.into_value())?;
    }
    Ok(())
}

impl<T: Numeric> Matrix<T> {
    /// `self * other` for a diagonal `self`: row `i` of `other` scaled by `values[i]`.
    pub(crate) fn diagonal_mmul(&self, storage: &SharedStorage, other: &Matrix<T>) -> Result<Matrix<T>> {
        let mut out = Matrix::zeros(self.rows(), other.columns())?;
        let n = storage.len().min(other.rows());
        for row in 0..n {
            let d = T::from_value(storage.get_value(row)?);
            for col in 0..other.columns() {
                out.set(row, col, other.get(row, col)?.times(d))?;
            }
        }
        Ok(out)
    }

    /// `self * other` for a diagonal `other`: column `j` of `self` scaled by `values[j]`.
    pub(crate) fn mmul_diagonal(&self, other: &Matrix<T>, storage: &SharedStorage) -> Result<Matrix<T>> {
        let mut out = Matrix::zeros(self.rows(), other.columns())?;
        let n = storage.len().min(self.columns());
        for col in 0..n {
            let d = T::from_value(storage.get_value(col)?);
            for row in 0..self.rows() {
                out.set(row, col, self.get(row, col)?.times(d))?;
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ViewViolation;
    use crate::matrix::{Backing, MatrixFlags};

    #[test]
    fn off_diagonal_reads_zero_and_rejects_writes() {
        let mut d = Matrix::diagonal(3, 4, vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(d.get(1, 1).unwrap(), 2.0);
        assert_eq!(d.get(1, 3).unwrap(), 0.0);
        assert_eq!(
            d.set(0, 2, 1.0),
            Err(MatError::UnsupportedView(ViewViolation::DiagonalWrite { row: 0, column: 2 }))
        );
        d.set_diagonal_value(2, 9.0).unwrap();
        assert_eq!(d.get(2, 2).unwrap(), 9.0);
        assert!(d.flags().contains(MatrixFlags::DIAGONAL));
    }

    #[test]
    fn wrong_value_count_is_rejected() {
        assert_eq!(
            Matrix::diagonal(2, 5, vec![1, 2, 3]).unwrap_err(),
            MatError::SizeMismatch { expected: 2, found: 3 }
        );
    }

    #[test]
    fn transpose_and_copy_stay_diagonal() {
        let d = Matrix::diagonal(2, 3, vec![4i64, 5]).unwrap();
        let t = d.transpose().unwrap();
        assert_eq!(t.backing(), Backing::Diagonal);
        assert_eq!(t.shape(), Shape { rows: 3, columns: 2 });
        assert_eq!(t.get(1, 1).unwrap(), 5);
        let mut c = d.copy().unwrap();
        c.set(0, 0, 0).unwrap();
        assert_eq!(d.get(0, 0).unwrap(), 4);
        assert_eq!(c.backing(), Backing::Diagonal);
    }

    #[test]
    fn diagonal_view_writes_the_diagonal() {
        let d = Matrix::<i32>::identity(3).unwrap();
        let mut v = d.diagonal_view().unwrap();
        v.set(2, 0, 7).unwrap();
        assert_eq!(d.get(2, 2).unwrap(), 7);
        let dense = Matrix::<i32>::zeros(2, 2).unwrap();
        assert_eq!(
            dense.diagonal_view().unwrap_err(),
            MatError::UnsupportedView(ViewViolation::DiagonalView)
        );
    }

    #[test]
    fn reshape_materializes() {
        let d = Matrix::diagonal(2, 2, vec![1.0, 2.0]).unwrap();
        let r = d.reshape(1, 4).unwrap();
        assert_eq!(r.backing(), Backing::Array);
        assert_eq!(r.to_vec().unwrap(), vec![1.0, 0.0, 0.0, 2.0]);
    }
}
