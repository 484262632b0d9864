//! Dense constructors: matrices over a flat native array.

use crate::core::traits::Element;
use crate::error::{MatError, Result};
use crate::matrix::{Matrix, Source};
use crate::storage::{ArrayStorage, SharedStorage};
use crate::utils::shape::Shape;

impl<T: Element> Matrix<T> {
    /// A `rows x columns` matrix of zeros (`false` for booleans).
    pub fn zeros(rows: usize, columns: usize) -> Result<Self> {
        let shape = Shape::new(rows, columns)?;
        let storage = ArrayStorage::zeros(T::KIND, shape.size());
        Ok(Matrix::from_source(shape, Source::Owned(SharedStorage::array(storage))))
    }

    /// A matrix filled with `value`.
    pub fn filled(rows: usize, columns: usize, value: T) -> Result<Self> {
        let shape = Shape::new(rows, columns)?;
        Matrix::from_column_major(rows, columns, vec![value; shape.size()])
    }

    /// Wrap column-major `data`; its length must be `rows * columns`.
    pub fn from_column_major(rows: usize, columns: usize, data: Vec<T>) -> Result<Self> {
        let shape = Shape::new(rows, columns)?;
        if data.len() != shape.size() {
            return Err(MatError::SizeMismatch { expected: shape.size(), found: data.len() });
        }
        let storage = ArrayStorage::from_values(T::KIND, data.into_iter().map(T::into_value));
        Ok(Matrix::from_source(shape, Source::Owned(SharedStorage::array(storage))))
    }

    /// Build from a slice of equally long rows.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let columns = rows.first().map_or(0, |r| r.as_ref().len());
        if let Some(ragged) = rows.iter().find(|r| r.as_ref().len() != columns) {
            return Err(MatError::SizeMismatch { expected: columns, found: ragged.as_ref().len() });
        }
        Matrix::from_fn(rows.len(), columns, |i, j| rows[i].as_ref()[j])
    }

    /// Element `(i, j)` is `f(i, j)`.
    pub fn from_fn(rows: usize, columns: usize, mut f: impl FnMut(usize, usize) -> T) -> Result<Self> {
        let shape = Shape::new(rows, columns)?;
        let mut data = Vec::with_capacity(shape.size());
        for j in 0..columns {
            for i in 0..rows {
                data.push(f(i, j));
            }
        }
        Matrix::from_column_major(rows, columns, data)
    }

    /// A `n x 1` matrix.
    pub fn column_vector(data: Vec<T>) -> Result<Self> {
        Matrix::from_column_major(data.len(), 1, data)
    }

    /// A `1 x n` matrix.
    pub fn row_vector(data: Vec<T>) -> Result<Self> {
        Matrix::from_column_major(1, data.len(), data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Backing;
    use num_complex::Complex64;

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Matrix::<i32>::from_rows(&[vec![1, 2], vec![3]]).unwrap_err();
        assert_eq!(err, MatError::SizeMismatch { expected: 2, found: 1 });
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert!(Matrix::<f64>::from_column_major(2, 2, vec![1.0; 3]).is_err());
        assert!(Matrix::<f64>::zeros(usize::MAX, 2).is_err());
    }

    #[test]
    fn every_kind_builds_dense() {
        let b = Matrix::filled(2, 2, true).unwrap();
        let z = Matrix::filled(1, 3, Complex64::new(0.0, 1.0)).unwrap();
        let l = Matrix::<i64>::from_fn(2, 3, |i, j| (i * 10 + j) as i64).unwrap();
        assert_eq!(b.backing(), Backing::Array);
        assert!(b.get(1, 1).unwrap());
        assert_eq!(z.get(0, 2).unwrap().im, 1.0);
        assert_eq!(l.get(1, 2).unwrap(), 12);
        assert!(l.is_array_based());
        assert_eq!(Matrix::column_vector(vec![1, 2, 3]).unwrap().shape(), Shape { rows: 3, columns: 1 });
    }
}
