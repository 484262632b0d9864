//! Matrix multiplication.
//!
//! `mmul_scaled(alpha, ta, other, beta, tb)` computes `(alpha * op(self)) * (beta * op(other))`
//! where `op` transposes its operand when the flag says so. Transposed operands are
//! never materialized: the generic loop reads them in row-major order instead.
//!
//! Dispatch, in order:
//! 1. a diagonal operand uses an O(rows * columns) scaling loop;
//! 2. two array-based operands of a kind with a native kernel go to the backend;
//! 3. everything else runs the generic triple loop.

use crate::backend::{DenseMultiply, FaerGemm};
use crate::config::options::MultiplyOptions;
use crate::core::traits::Numeric;
use crate::error::{MatError, Result};
use crate::matrix::Matrix;
use crate::utils::indexer::{column_major, row_major};
use crate::utils::shape::{Shape, Transpose};

#[inline]
fn operand_index(trans: Transpose, row: usize, col: usize, rows: usize, cols: usize) -> Result<usize> {
    trans.call(
        || column_major(row, col, rows, cols),
        || row_major(row, col, rows, cols),
    )
}

impl<T: Numeric> Matrix<T> {
    /// `self * other`.
    pub fn mmul(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        self.mmul_scaled(T::ONE, Transpose::No, other, T::ONE, Transpose::No)
    }

    /// `op(self) * op(other)`.
    pub fn mmul_transposed(&self, trans_a: Transpose, other: &Matrix<T>, trans_b: Transpose) -> Result<Matrix<T>> {
        self.mmul_scaled(T::ONE, trans_a, other, T::ONE, trans_b)
    }

    /// `(alpha * op(self)) * (beta * op(other))` with the default options.
    pub fn mmul_scaled(
        &self,
        alpha: T,
        trans_a: Transpose,
        other: &Matrix<T>,
        beta: T,
        trans_b: Transpose,
    ) -> Result<Matrix<T>> {
        self.mmul_with(&MultiplyOptions::default(), alpha, trans_a, other, beta, trans_b)
    }

    /// Multiply with explicit dispatch options, accelerating through faer.
    pub fn mmul_with(
        &self,
        options: &MultiplyOptions,
        alpha: T,
        trans_a: Transpose,
        other: &Matrix<T>,
        beta: T,
        trans_b: Transpose,
    ) -> Result<Matrix<T>> {
        let faer = FaerGemm::with_parallelism(options.parallel);
        let backend: &dyn DenseMultiply = &faer;
        self.multiply(Some((backend, options)), alpha, trans_a, other, beta, trans_b)
    }

    /// Multiply, sending array-based operands to `backend`.
    pub fn mmul_with_backend(
        &self,
        backend: &dyn DenseMultiply,
        alpha: T,
        trans_a: Transpose,
        other: &Matrix<T>,
        beta: T,
        trans_b: Transpose,
    ) -> Result<Matrix<T>> {
        let options = MultiplyOptions::default();
        self.multiply(Some((backend, &options)), alpha, trans_a, other, beta, trans_b)
    }

    /// Multiply with the generic loop only.
    pub fn mmul_generic(
        &self,
        alpha: T,
        trans_a: Transpose,
        other: &Matrix<T>,
        beta: T,
        trans_b: Transpose,
    ) -> Result<Matrix<T>> {
        self.multiply(None, alpha, trans_a, other, beta, trans_b)
    }

    fn multiply(
        &self,
        backend: Option<(&dyn DenseMultiply, &MultiplyOptions)>,
        alpha: T,
        trans_a: Transpose,
        other: &Matrix<T>,
        beta: T,
        trans_b: Transpose,
    ) -> Result<Matrix<T>> {
        let a = trans_a.apply(self.shape());
        let b = trans_b.apply(other.shape());
        if a.columns != b.rows {
            return Err(MatError::non_conformant(a, b));
        }
        let (m, n, k) = (a.rows, b.columns, a.columns);
        let out_shape = Shape::new(m, n)?;
        let scale = alpha.times(beta);

        if !trans_a.is_transpose() && !trans_b.is_transpose() {
            let scaled = if let Some(storage) = self.diagonal_storage() {
                Some(self.diagonal_mmul(storage, other)?)
            } else if let Some(storage) = other.diagonal_storage() {
                Some(self.mmul_diagonal(other, storage)?)
            } else {
                None
            };
            if let Some(mut out) = scaled {
                tracing::trace!(m, n, k, "diagonal multiply");
                if scale != T::ONE {
                    out.mul_scalari(scale)?;
                }
                return Ok(out);
            }
        }

        if let Some((backend, options)) = backend {
            let empty = m == 0 || n == 0 || k == 0;
            if !empty && options.accelerates(m, n, k) && self.is_array_based() && other.is_array_based() {
                let lhs = self.to_vec()?;
                let rhs = other.to_vec()?;
                let lda = self.rows().max(1);
                let ldb = other.rows().max(1);
                if let Some(c) = T::native_gemm(backend, trans_a, trans_b, m, n, k, scale, &lhs, lda, &rhs, ldb) {
                    tracing::trace!(m, n, k, kind = %T::KIND, "native multiply");
                    return Matrix::from_column_major(m, n, c);
                }
            }
        }

        tracing::trace!(m, n, k, kind = %T::KIND, "generic multiply");
        let mut data = Vec::with_capacity(out_shape.size());
        for col in 0..n {
            for row in 0..m {
                let mut sum = T::ZERO;
                for p in 0..k {
                    let lhs = self.read(operand_index(trans_a, row, p, m, k)?)?;
                    let rhs = other.read(operand_index(trans_b, p, col, k, n)?)?;
                    sum = sum.plus(alpha.times(lhs).times(beta.times(rhs)));
                }
                data.push(sum);
            }
        }
        Matrix::from_column_major(m, n, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ReferenceGemm;
    use approx::assert_abs_diff_eq;

    fn a() -> Matrix<f64> {
        Matrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap()
    }

    fn b() -> Matrix<f64> {
        Matrix::from_rows(&[vec![7.0, 8.0], vec![9.0, 10.0], vec![11.0, 12.0]]).unwrap()
    }

    #[test]
    fn accelerated_product() {
        let c = a().mmul(&b()).unwrap();
        assert_eq!(c.to_vec().unwrap(), vec![58.0, 139.0, 64.0, 154.0]);
    }

    #[test]
    fn generic_product_matches() {
        let c = a().mmul_generic(1.0, Transpose::No, &b(), 1.0, Transpose::No).unwrap();
        assert_eq!(c.to_vec().unwrap(), vec![58.0, 139.0, 64.0, 154.0]);
        let ints = a().as_int_matrix().mmul(&b().as_int_matrix()).unwrap();
        assert_eq!(ints.to_vec().unwrap(), vec![58, 139, 64, 154]);
    }

    #[test]
    fn transposed_operands() {
        // A^T * A is 3x3
        let ata = a().mmul_transposed(Transpose::Yes, &a(), Transpose::No).unwrap();
        assert_eq!(ata.shape(), Shape { rows: 3, columns: 3 });
        assert_abs_diff_eq!(ata.get(0, 0).unwrap(), 17.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ata.get(2, 1).unwrap(), 3.0 * 2.0 + 6.0 * 5.0, epsilon = 1e-12);
        let generic = a().mmul_generic(1.0, Transpose::Yes, &a(), 1.0, Transpose::No).unwrap();
        assert_eq!(generic.to_vec().unwrap(), ata.to_vec().unwrap());
    }

    #[test]
    fn scale_multiplies_through() {
        let c = a()
            .mmul_with_backend(&ReferenceGemm, 2.0, Transpose::No, &b(), 0.5, Transpose::No)
            .unwrap();
        assert_eq!(c.get(1, 1).unwrap(), 154.0);
        let g = a().mmul_generic(2.0, Transpose::No, &b(), 3.0, Transpose::No).unwrap();
        assert_eq!(g.get(0, 0).unwrap(), 6.0 * 58.0);
    }

    #[test]
    fn non_conformant_shapes() {
        let err = a().mmul(&a()).unwrap_err();
        assert_eq!(
            err,
            MatError::NonConformant { lhs: Shape { rows: 2, columns: 3 }, rhs: Shape { rows: 2, columns: 3 } }
        );
    }

    #[test]
    fn diagonal_operands() {
        let d = Matrix::diagonal(2, 2, vec![2.0, -1.0]).unwrap();
        let left = d.mmul(&a()).unwrap();
        assert_eq!(left.to_rows().unwrap(), vec![vec![2.0, 4.0, 6.0], vec![-4.0, -5.0, -6.0]]);
        let e = Matrix::diagonal(3, 3, vec![1.0, 0.0, 2.0]).unwrap();
        let right = a().mmul(&e).unwrap();
        assert_eq!(right.to_rows().unwrap(), vec![vec![1.0, 0.0, 6.0], vec![4.0, 0.0, 12.0]]);
        let dense = d.to_dense().unwrap().mmul(&a()).unwrap();
        assert_eq!(dense.to_vec().unwrap(), left.to_vec().unwrap());
    }

    #[test]
    fn views_use_the_generic_path() {
        let big = Matrix::from_fn(4, 4, |i, j| (i * 4 + j) as f64).unwrap();
        let v = big.view(1, 1, 2, 3).unwrap();
        let c = v.mmul(&b()).unwrap();
        let dense = v.to_dense().unwrap().mmul(&b()).unwrap();
        assert_eq!(c.to_vec().unwrap(), dense.to_vec().unwrap());
    }
}
