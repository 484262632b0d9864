//! Assignment, mapping, reduction, comparison and selection.
//!
//! Everything here is written against `get`/`set` and the shape, so it works on every
//! backing, view and adapter alike. Diagonal matrices are the exception for `assign`
//! and `mapi`, which only touch the stored diagonal.

use std::cmp::Ordering;

use crate::core::traits::Element;
use crate::error::{MatError, Result};
use crate::matrix::Matrix;
use crate::matrix::diagonal::update_diagonal;
use crate::utils::shape::Axis;

/// Map a linear index of a `rows`-tall matrix to the vector position it broadcasts
/// from, after checking the vector length against `axis`.
pub(crate) fn broadcast<T: Element, U: Element>(
    target: &Matrix<T>,
    vector: &Matrix<U>,
    axis: Axis,
) -> Result<impl Fn(usize) -> usize + use<T, U>> {
    let rows = target.rows();
    let expected = match axis {
        Axis::Column => rows,
        Axis::Row => target.columns(),
    };
    if vector.size() != expected {
        return Err(MatError::SizeMismatch { expected, found: vector.size() });
    }
    Ok(move |i: usize| match axis {
        Axis::Column => i % rows,
        Axis::Row => i / rows,
    })
}

impl<T: Element> Matrix<T> {
    /// Rewrite every element in place: element `i` becomes `f(i, old)`.
    pub(crate) fn update(&mut self, mut f: impl FnMut(usize, T) -> Result<T>) -> Result<()> {
        for i in 0..self.size() {
            let value = f(i, self.read(i)?)?;
            self.write(i, value)?;
        }
        Ok(())
    }

    pub(crate) fn check_same_shape<U: Element>(&self, other: &Matrix<U>) -> Result<()> {
        if self.shape() == other.shape() {
            Ok(())
        } else {
            Err(MatError::non_conformant(self.shape(), other.shape()))
        }
    }

    /// Set every element to `value`.
    pub fn assign(&mut self, value: T) -> Result<()> {
        if let Some(storage) = self.diagonal_storage() {
            return update_diagonal(storage, |_, _| Ok(value));
        }
        self.update(|_, _| Ok(value))
    }

    /// Set every element from `supplier`, in column-major order. A diagonal draws one
    /// value per stored diagonal entry.
    pub fn assign_with(&mut self, mut supplier: impl FnMut() -> T) -> Result<()> {
        if let Some(storage) = self.diagonal_storage() {
            return update_diagonal(storage, |_, _| Ok(supplier()));
        }
        self.update(|_, _| Ok(supplier()))
    }

    /// Copy `other` element by element.
    pub fn assign_matrix(&mut self, other: &Matrix<T>) -> Result<()> {
        self.assign_matrix_with(other, |v| v)
    }

    /// `self[i] = f(other[i])`, converting between kinds if needed.
    pub fn assign_matrix_with<U: Element>(&mut self, other: &Matrix<U>, mut f: impl FnMut(U) -> T) -> Result<()> {
        self.check_same_shape(other)?;
        self.update(|i, _| Ok(f(other.read(i)?)))
    }

    /// `self[i] = f(self[i], other[i])`.
    pub fn combine_assign<U: Element>(&mut self, other: &Matrix<U>, mut f: impl FnMut(T, U) -> T) -> Result<()> {
        self.check_same_shape(other)?;
        self.update(|i, v| Ok(f(v, other.read(i)?)))
    }

    /// Broadcast `vector` over every column (`Axis::Column`) or row (`Axis::Row`).
    pub fn assign_vector(&mut self, vector: &Matrix<T>, axis: Axis) -> Result<()> {
        self.assign_vector_with(vector, axis, |_, v| v)
    }

    /// `self[i] = f(self[i], v)` where `v` is the broadcast vector element.
    pub fn assign_vector_with(
        &mut self,
        vector: &Matrix<T>,
        axis: Axis,
        mut f: impl FnMut(T, T) -> T,
    ) -> Result<()> {
        let at = broadcast(self, vector, axis)?;
        self.update(|i, v| Ok(f(v, vector.read(at(i))?)))
    }

    /// A transformed copy.
    pub fn map(&self, f: impl FnMut(T) -> T) -> Result<Matrix<T>> {
        let mut out = self.copy()?;
        out.mapi(f)?;
        Ok(out)
    }

    /// Transform every element in place.
    pub fn mapi(&mut self, mut f: impl FnMut(T) -> T) -> Result<()> {
        if let Some(storage) = self.diagonal_storage() {
            return update_diagonal(storage, |_, v| Ok(f(v)));
        }
        self.update(|_, v| Ok(f(v)))
    }

    /// A dense matrix of another kind holding `f` of every element.
    pub fn map_to<U: Element>(&self, mut f: impl FnMut(T) -> U) -> Result<Matrix<U>> {
        let data = self.iter().map(|v| v.map(&mut f)).collect::<Result<Vec<_>>>()?;
        Matrix::from_column_major(self.rows(), self.columns(), data)
    }

    /// Fold `map(x)` over every element with `combine`, starting from `identity`.
    pub fn reduce(&self, identity: T, mut combine: impl FnMut(T, T) -> T, mut map: impl FnMut(T) -> T) -> Result<T> {
        let mut acc = identity;
        for value in self.iter() {
            acc = combine(acc, map(value?));
        }
        Ok(acc)
    }

    /// A `rows x 1` matrix of `f` applied to each row.
    pub fn reduce_rows(&self, mut f: impl FnMut(Matrix<T>) -> Result<T>) -> Result<Matrix<T>> {
        let values = (0..self.rows())
            .map(|i| self.row_view(i).and_then(&mut f))
            .collect::<Result<Vec<_>>>()?;
        Matrix::column_vector(values)
    }

    /// A `1 x columns` matrix of `f` applied to each column.
    pub fn reduce_columns(&self, mut f: impl FnMut(Matrix<T>) -> Result<T>) -> Result<Matrix<T>> {
        let values = (0..self.columns())
            .map(|j| self.column_view(j).and_then(&mut f))
            .collect::<Result<Vec<_>>>()?;
        Matrix::row_vector(values)
    }

    pub fn for_each(&self, mut f: impl FnMut(T)) -> Result<()> {
        for value in self.iter() {
            f(value?);
        }
        Ok(())
    }

    /// The elements matching `pred`, as a column vector.
    pub fn filter(&self, mut pred: impl FnMut(T) -> bool) -> Result<Matrix<T>> {
        let mut kept = Vec::new();
        for value in self.iter() {
            let value = value?;
            if pred(value) {
                kept.push(value);
            }
        }
        Matrix::column_vector(kept)
    }

    /// Element-wise `pred` as a boolean matrix.
    pub fn satisfies(&self, pred: impl FnMut(T) -> bool) -> Result<Matrix<bool>> {
        self.map_to(pred)
    }

    /// Element-wise `pred(self[i], other[i])` as a boolean matrix.
    pub fn satisfies_matrix<U: Element>(
        &self,
        other: &Matrix<U>,
        mut pred: impl FnMut(T, U) -> bool,
    ) -> Result<Matrix<bool>> {
        self.check_same_shape(other)?;
        let mut out = Matrix::<bool>::zeros(self.rows(), self.columns())?;
        out.update(|i, _| Ok(pred(self.read(i)?, other.read(i)?)))?;
        Ok(out)
    }

    fn compare_scalar(&self, value: T, want: impl Fn(Option<Ordering>) -> bool) -> Result<Matrix<bool>> {
        self.satisfies(|v| want(v.compare(&value)))
    }

    fn compare_matrix(&self, other: &Matrix<T>, want: impl Fn(Option<Ordering>) -> bool) -> Result<Matrix<bool>> {
        self.satisfies_matrix(other, |a, b| want(a.compare(&b)))
    }

    pub fn lt(&self, value: T) -> Result<Matrix<bool>> {
        self.compare_scalar(value, |o| o == Some(Ordering::Less))
    }

    pub fn le(&self, value: T) -> Result<Matrix<bool>> {
        self.compare_scalar(value, |o| matches!(o, Some(Ordering::Less | Ordering::Equal)))
    }

    pub fn gt(&self, value: T) -> Result<Matrix<bool>> {
        self.compare_scalar(value, |o| o == Some(Ordering::Greater))
    }

    pub fn ge(&self, value: T) -> Result<Matrix<bool>> {
        self.compare_scalar(value, |o| matches!(o, Some(Ordering::Greater | Ordering::Equal)))
    }

    pub fn eq_to(&self, value: T) -> Result<Matrix<bool>> {
        self.satisfies(|v| v == value)
    }

    pub fn lt_matrix(&self, other: &Matrix<T>) -> Result<Matrix<bool>> {
        self.compare_matrix(other, |o| o == Some(Ordering::Less))
    }

    pub fn le_matrix(&self, other: &Matrix<T>) -> Result<Matrix<bool>> {
        self.compare_matrix(other, |o| matches!(o, Some(Ordering::Less | Ordering::Equal)))
    }

    pub fn gt_matrix(&self, other: &Matrix<T>) -> Result<Matrix<bool>> {
        self.compare_matrix(other, |o| o == Some(Ordering::Greater))
    }

    pub fn ge_matrix(&self, other: &Matrix<T>) -> Result<Matrix<bool>> {
        self.compare_matrix(other, |o| matches!(o, Some(Ordering::Greater | Ordering::Equal)))
    }

    pub fn eq_matrix(&self, other: &Matrix<T>) -> Result<Matrix<bool>> {
        self.satisfies_matrix(other, |a, b| a == b)
    }

    /// The elements at the given linear positions, as a column vector.
    pub fn select(&self, indexes: &[usize]) -> Result<Matrix<T>> {
        let values = indexes.iter().map(|&i| self.get_linear(i)).collect::<Result<Vec<_>>>()?;
        Matrix::column_vector(values)
    }

    /// The listed rows (`Axis::Row`) or columns (`Axis::Column`), in the given order.
    pub fn select_axis(&self, indexes: &[usize], axis: Axis) -> Result<Matrix<T>> {
        match axis {
            Axis::Row => {
                let out = self.new_empty_like(indexes.len(), self.columns())?;
                for (to, &from) in indexes.iter().enumerate() {
                    out.row_view(to)?.assign_matrix(&self.row_view(from)?)?;
                }
                Ok(out)
            }
            Axis::Column => {
                let out = self.new_empty_like(self.rows(), indexes.len())?;
                for (to, &from) in indexes.iter().enumerate() {
                    out.column_view(to)?.assign_matrix(&self.column_view(from)?)?;
                }
                Ok(out)
            }
        }
    }

    /// The elements where `mask` is `true`, in column-major order, as a column vector.
    pub fn select_mask(&self, mask: &Matrix<bool>) -> Result<Matrix<T>> {
        self.check_same_shape(mask)?;
        let mut kept = Vec::new();
        for i in 0..self.size() {
            if mask.read(i)? {
                kept.push(self.read(i)?);
            }
        }
        Matrix::column_vector(kept)
    }

    /// The rows (`Axis::Row`) or columns (`Axis::Column`) whose mask entry is `true`.
    pub fn select_mask_axis(&self, mask: &Matrix<bool>, axis: Axis) -> Result<Matrix<T>> {
        let expected = match axis {
            Axis::Row => self.rows(),
            Axis::Column => self.columns(),
        };
        if mask.size() != expected {
            return Err(MatError::SizeMismatch { expected, found: mask.size() });
        }
        let mut picked = Vec::new();
        for i in 0..mask.size() {
            if mask.read(i)? {
                picked.push(i);
            }
        }
        self.select_axis(&picked, axis)
    }

    /// Overwrite row `i` with the elements of `vector`.
    pub fn set_row(&mut self, i: usize, vector: &Matrix<T>) -> Result<()> {
        if vector.size() != self.columns() {
            return Err(MatError::SizeMismatch { expected: self.columns(), found: vector.size() });
        }
        for j in 0..self.columns() {
            self.set(i, j, vector.read(j)?)?;
        }
        Ok(())
    }

    /// Overwrite column `j` with the elements of `vector`.
    pub fn set_column(&mut self, j: usize, vector: &Matrix<T>) -> Result<()> {
        if vector.size() != self.rows() {
            return Err(MatError::SizeMismatch { expected: self.rows(), found: vector.size() });
        }
        for i in 0..self.rows() {
            self.set(i, j, vector.read(i)?)?;
        }
        Ok(())
    }

    /// Exchange the elements at linear positions `a` and `b`.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        let first = self.get_linear(a)?;
        let second = self.get_linear(b)?;
        self.write(a, second)?;
        self.write(b, first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::shape::Shape;

    fn sample() -> Matrix<i64> {
        Matrix::from_rows(&[vec![1, 2, 3], vec![4, 5, 6]]).unwrap()
    }

    #[test]
    fn column_broadcast_repeats_across_columns() {
        let mut m = Matrix::<i64>::zeros(2, 3).unwrap();
        m.assign_vector(&Matrix::column_vector(vec![7, 8]).unwrap(), Axis::Column).unwrap();
        assert_eq!(m.to_rows().unwrap(), vec![vec![7, 7, 7], vec![8, 8, 8]]);
        m.assign_vector(&Matrix::row_vector(vec![1, 2, 3]).unwrap(), Axis::Row).unwrap();
        assert_eq!(m.to_rows().unwrap(), vec![vec![1, 2, 3], vec![1, 2, 3]]);
        let err = m.assign_vector(&Matrix::row_vector(vec![1, 2, 3]).unwrap(), Axis::Column);
        assert_eq!(err, Err(MatError::SizeMismatch { expected: 2, found: 3 }));
    }

    #[test]
    fn reduce_with_map() {
        let m = Matrix::filled(3, 3, 3.0).unwrap();
        assert_eq!(m.reduce(0.0, |a, b| a + b, |v| v * 2.0).unwrap(), 54.0);
        let rows = Matrix::filled(4, 3, 3.0)
            .unwrap()
            .reduce_rows(|row| row.reduce(0.0, |a, b| a + b, |v| v))
            .unwrap();
        assert_eq!(rows.shape(), Shape { rows: 4, columns: 1 });
        assert_eq!(rows.to_vec().unwrap(), vec![9.0; 4]);
        let cols = sample().reduce_columns(|c| c.reduce(0, |a, b| a + b, |v| v)).unwrap();
        assert_eq!(cols.to_vec().unwrap(), vec![5, 7, 9]);
    }

    #[test]
    fn comparisons_produce_boolean_matrices() {
        let m = sample();
        assert_eq!(m.ge(3).unwrap().to_vec().unwrap(), vec![false, true, false, true, true, true]);
        assert_eq!(m.eq_to(5).unwrap().to_vec().unwrap().iter().filter(|b| **b).count(), 1);
        let other = Matrix::filled(2, 3, 3).unwrap();
        assert!(m.lt_matrix(&other).unwrap().get(0, 1).unwrap());
        assert!(m.lt_matrix(&Matrix::zeros(3, 2).unwrap()).is_err());
    }

    #[test]
    fn map_is_pure_and_mapi_is_not() {
        let mut m = sample();
        let doubled = m.map(|v| v * 2).unwrap();
        assert_eq!(m.get(1, 2).unwrap(), 6);
        assert_eq!(doubled.get(1, 2).unwrap(), 12);
        m.mapi(|v| -v).unwrap();
        assert_eq!(m.get(0, 0).unwrap(), -1);
        let halves = m.map_to(|v| v as f64 / 2.0).unwrap();
        assert_eq!(halves.get(0, 0).unwrap(), -0.5);
    }

    #[test]
    fn diagonal_assign_touches_only_the_diagonal() {
        let mut d = Matrix::<f64>::identity(3).unwrap();
        d.assign(4.0).unwrap();
        d.mapi(|v| v + 1.0).unwrap();
        assert_eq!(d.get(1, 1).unwrap(), 5.0);
        assert_eq!(d.get(0, 1).unwrap(), 0.0);

        let mut next = 0.0;
        d.assign_with(|| {
            next += 1.0;
            next
        })
        .unwrap();
        assert_eq!(d.to_rows().unwrap(), vec![vec![1.0, 0.0, 0.0], vec![0.0, 2.0, 0.0], vec![0.0, 0.0, 3.0]]);
    }

    #[test]
    fn selection() {
        let m = sample();
        assert_eq!(m.select(&[5, 0]).unwrap().to_vec().unwrap(), vec![6, 1]);
        let cols = m.select_axis(&[2, 0], Axis::Column).unwrap();
        assert_eq!(cols.to_rows().unwrap(), vec![vec![3, 1], vec![6, 4]]);
        let mask = m.gt(3).unwrap();
        assert_eq!(m.select_mask(&mask).unwrap().to_vec().unwrap(), vec![4, 5, 6]);
        let rows = m
            .select_mask_axis(&Matrix::column_vector(vec![false, true]).unwrap(), Axis::Row)
            .unwrap();
        assert_eq!(rows.to_rows().unwrap(), vec![vec![4, 5, 6]]);
        assert!(m.select(&[6]).is_err());
    }

    #[test]
    fn set_row_column_and_swap() {
        let mut m = sample();
        m.set_row(0, &Matrix::row_vector(vec![9, 9, 9]).unwrap()).unwrap();
        m.set_column(2, &Matrix::column_vector(vec![0, 0]).unwrap()).unwrap();
        m.swap(0, 1).unwrap();
        assert_eq!(m.to_rows().unwrap(), vec![vec![4, 9, 0], vec![9, 5, 0]]);
        assert!(m.set_row(1, &Matrix::row_vector(vec![1]).unwrap()).is_err());
    }

    #[test]
    fn filter_and_satisfies() {
        let m = Matrix::row_vector(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(m.filter(|v| v > 3.0).unwrap().to_vec().unwrap(), vec![4.0, 5.0, 6.0]);
        let zero = Matrix::<f64>::zeros(3, 3).unwrap();
        let three = Matrix::filled(3, 3, 3.0).unwrap();
        let all = zero.satisfies_matrix(&three, |a, b| a < b).unwrap();
        assert!(all.iter().all(|v| v.unwrap()));
    }
}
