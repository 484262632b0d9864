//! BLAS-style routines over matrices.
//!
//! Vectors are any matrix read in column-major order; only their size matters.
//! `gemm` and `gemv` go through [`Matrix::mmul_scaled`], so array-based `f64` operands
//! reach the dense backend.

use crate::core::traits::Numeric;
use crate::error::{MatError, Result};
use crate::matrix::Matrix;
use crate::matrix::arith::ElementwiseOp;
use crate::utils::shape::Transpose;

fn check_size<T: Numeric, U: Numeric>(x: &Matrix<T>, y: &Matrix<U>) -> Result<()> {
    if x.size() == y.size() {
        Ok(())
    } else {
        Err(MatError::SizeMismatch { expected: x.size(), found: y.size() })
    }
}

/// `sum(x[i] * y[i])`.
pub fn dot<T: Numeric>(x: &Matrix<T>, y: &Matrix<T>) -> Result<T> {
    check_size(x, y)?;
    let mut sum = T::ZERO;
    for i in 0..x.size() {
        sum = sum.plus(x.get_linear(i)?.times(y.get_linear(i)?));
    }
    Ok(sum)
}

/// Sum of magnitudes.
pub fn asum<T: Numeric>(x: &Matrix<T>) -> Result<f64> {
    x.iter().map(|v| v.map(T::magnitude)).sum()
}

/// Euclidean norm.
pub fn nrm2<T: Numeric>(x: &Matrix<T>) -> Result<f64> {
    let squares: f64 = x.iter().map(|v| v.map(|v| v.magnitude().powi(2))).sum::<Result<f64>>()?;
    Ok(squares.sqrt())
}

/// Position of the first element with the largest magnitude.
pub fn iamax<T: Numeric>(x: &Matrix<T>) -> Result<usize> {
    if x.is_empty() {
        return Err(MatError::InvalidArgument("iamax of an empty matrix"));
    }
    let mut best = 0;
    let mut max = x.get_linear(0)?.magnitude();
    for i in 1..x.size() {
        let m = x.get_linear(i)?.magnitude();
        if m > max {
            best = i;
            max = m;
        }
    }
    Ok(best)
}

/// `x = alpha * x`.
pub fn scal<T: Numeric>(alpha: T, x: &mut Matrix<T>) -> Result<()> {
    if alpha == T::ONE {
        return Ok(());
    }
    x.mul_scalari(alpha)
}

/// `y = alpha * x + y`.
pub fn axpy<T: Numeric>(alpha: T, x: &Matrix<T>, y: &mut Matrix<T>) -> Result<()> {
    check_size(x, y)?;
    if alpha == T::ZERO {
        return Ok(());
    }
    for i in 0..x.size() {
        let value = alpha.times(x.get_linear(i)?).plus(y.get_linear(i)?);
        y.set_linear(i, value)?;
    }
    Ok(())
}

/// Sum of the main diagonal.
pub fn trace<T: Numeric>(x: &Matrix<T>) -> Result<T> {
    let mut sum = T::ZERO;
    for i in 0..x.diagonal_size() {
        sum = sum.plus(x.diagonal_value(i)?);
    }
    Ok(sum)
}

/// `y = alpha * op(a) * x + beta * y`.
pub fn gemv<T: Numeric>(
    trans_a: Transpose,
    alpha: T,
    a: &Matrix<T>,
    x: &Matrix<T>,
    beta: T,
    y: &mut Matrix<T>,
) -> Result<()> {
    let op = trans_a.apply(a.shape());
    if x.size() != op.columns {
        return Err(MatError::SizeMismatch { expected: op.columns, found: x.size() });
    }
    if y.size() != op.rows {
        return Err(MatError::SizeMismatch { expected: op.rows, found: y.size() });
    }
    let column = Matrix::column_vector(x.to_vec()?)?;
    let product = a.mmul_scaled(alpha, trans_a, &column, T::ONE, Transpose::No)?;
    for i in 0..y.size() {
        let value = beta.times(y.get_linear(i)?).plus(product.get_linear(i)?);
        y.set_linear(i, value)?;
    }
    Ok(())
}

/// `c = alpha * op(a) * op(b) + beta * c`.
pub fn gemm<T: Numeric>(
    trans_a: Transpose,
    trans_b: Transpose,
    alpha: T,
    a: &Matrix<T>,
    b: &Matrix<T>,
    beta: T,
    c: &mut Matrix<T>,
) -> Result<()> {
    let product = a.mmul_scaled(alpha, trans_a, b, T::ONE, trans_b)?;
    c.apply_matrix(beta, ElementwiseOp::Add, &product, T::ONE)
}

/// Rank-one update `a = alpha * x * y^T + a`.
pub fn ger<T: Numeric>(alpha: T, x: &Matrix<T>, y: &Matrix<T>, a: &mut Matrix<T>) -> Result<()> {
    if !x.is_vector() || !y.is_vector() {
        return Err(MatError::InvalidArgument("ger operands must be vectors"));
    }
    if x.size() != a.rows() {
        return Err(MatError::SizeMismatch { expected: a.rows(), found: x.size() });
    }
    if y.size() != a.columns() {
        return Err(MatError::SizeMismatch { expected: a.columns(), found: y.size() });
    }
    for j in 0..y.size() {
        let yj = alpha.times(y.get_linear(j)?);
        for i in 0..x.size() {
            let value = x.get_linear(i)?.times(yj).plus(a.get(i, j)?);
            a.set(i, j, value)?;
        }
    }
    Ok(())
}
