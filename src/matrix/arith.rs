//! Element-wise arithmetic for numeric matrices.
//!
//! Every operation comes in a pure form returning a new matrix and an in-place form
//! (suffix `i`) mutating the receiver. The pure form copies the receiver and runs the
//! in-place form on the copy. Operands are matrices of equal shape, scalars, or vectors
//! broadcast along an axis. Scaled forms compute `(alpha * self) op (beta * other)`.

use crate::core::traits::Numeric;
use crate::error::Result;
use crate::matrix::Matrix;
use crate::matrix::diagonal::update_diagonal;
use crate::matrix::ops::broadcast;
use crate::utils::shape::Axis;

/// A binary element-wise operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementwiseOp {
    Add,
    Sub,
    /// `other - self`
    ReverseSub,
    Mul,
    Div,
    /// `other / self`
    ReverseDiv,
}

impl ElementwiseOp {
    pub fn apply<T: Numeric>(self, lhs: T, rhs: T) -> Result<T> {
        match self {
            ElementwiseOp::Add => Ok(lhs.plus(rhs)),
            ElementwiseOp::Sub => Ok(lhs.minus(rhs)),
            ElementwiseOp::ReverseSub => Ok(rhs.minus(lhs)),
            ElementwiseOp::Mul => Ok(lhs.times(rhs)),
            ElementwiseOp::Div => lhs.divide(rhs),
            ElementwiseOp::ReverseDiv => rhs.divide(lhs),
        }
    }

    /// Whether `0 op x` is `0` for every `x`, so a diagonal stays diagonal.
    fn keeps_zero(self) -> bool {
        matches!(self, ElementwiseOp::Mul | ElementwiseOp::Div)
    }
}

impl<T: Numeric> Matrix<T> {
    /// A writable copy able to hold a result that may be non-zero anywhere.
    fn working_copy(&self) -> Result<Matrix<T>> {
        if self.is_diagonal() {
            self.to_dense()
        } else {
            self.copy()
        }
    }

    /// `self[i] = (alpha * self[i]) op (beta * other[i])`.
    pub fn apply_matrix(&mut self, alpha: T, op: ElementwiseOp, other: &Matrix<T>, beta: T) -> Result<()> {
        self.check_same_shape(other)?;
        self.update(|i, v| op.apply(alpha.times(v), beta.times(other.read(i)?)))
    }

    /// `self[i] = self[i] op scalar`. Multiplying or dividing a diagonal touches only
    /// the stored diagonal.
    pub fn apply_scalar(&mut self, op: ElementwiseOp, scalar: T) -> Result<()> {
        if let (Some(storage), true) = (self.diagonal_storage(), op.keeps_zero()) {
            return update_diagonal(storage, |_, v| op.apply(v, scalar));
        }
        self.update(|_, v| op.apply(v, scalar))
    }

    /// `self[i] = (alpha * self[i]) op (beta * v)` with `v` broadcast along `axis`.
    pub fn apply_vector(
        &mut self,
        alpha: T,
        op: ElementwiseOp,
        vector: &Matrix<T>,
        beta: T,
        axis: Axis,
    ) -> Result<()> {
        let at = broadcast(self, vector, axis)?;
        self.update(|i, v| op.apply(alpha.times(v), beta.times(vector.read(at(i))?)))
    }

    /// Flip the sign of every element.
    pub fn negatei(&mut self) -> Result<()> {
        if let Some(storage) = self.diagonal_storage() {
            return update_diagonal(storage, |_, v: T| Ok(v.negated()));
        }
        self.update(|_, v| Ok(v.negated()))
    }

    pub fn negate(&self) -> Result<Matrix<T>> {
        let mut out = self.copy()?;
        out.negatei()?;
        Ok(out)
    }

    /// Sum of all elements.
    pub fn sum(&self) -> Result<T> {
        self.reduce(T::ZERO, T::plus, |v| v)
    }
}

macro_rules! elementwise {
    ($(
        $op:ident:
        $pure:ident, $inplace:ident,
        $scaled:ident, $scaledi:ident,
        $scalar:ident, $scalari:ident,
        $vector:ident, $vectori:ident,
        $vector_scaled:ident, $vector_scaledi:ident;
    )*) => {
        #[allow(clippy::should_implement_trait)]
        impl<T: Numeric> Matrix<T> {
            $(
                pub fn $inplace(&mut self, other: &Matrix<T>) -> Result<()> {
                    self.apply_matrix(T::ONE, ElementwiseOp::$op, other, T::ONE)
                }

                pub fn $pure(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
                    let mut out = self.working_copy()?;
                    out.$inplace(other)?;
                    Ok(out)
                }

                pub fn $scaledi(&mut self, alpha: T, other: &Matrix<T>, beta: T) -> Result<()> {
                    self.apply_matrix(alpha, ElementwiseOp::$op, other, beta)
                }

                pub fn $scaled(&self, alpha: T, other: &Matrix<T>, beta: T) -> Result<Matrix<T>> {
                    let mut out = self.working_copy()?;
                    out.$scaledi(alpha, other, beta)?;
                    Ok(out)
                }

                pub fn $scalari(&mut self, scalar: T) -> Result<()> {
                    self.apply_scalar(ElementwiseOp::$op, scalar)
                }

                pub fn $scalar(&self, scalar: T) -> Result<Matrix<T>> {
                    let mut out = if ElementwiseOp::$op.keeps_zero() {
                        self.copy()?
                    } else {
                        self.working_copy()?
                    };
                    out.$scalari(scalar)?;
                    Ok(out)
                }

                pub fn $vectori(&mut self, vector: &Matrix<T>, axis: Axis) -> Result<()> {
                    self.apply_vector(T::ONE, ElementwiseOp::$op, vector, T::ONE, axis)
                }

                pub fn $vector(&self, vector: &Matrix<T>, axis: Axis) -> Result<Matrix<T>> {
                    let mut out = self.working_copy()?;
                    out.$vectori(vector, axis)?;
                    Ok(out)
                }

                pub fn $vector_scaledi(&mut self, alpha: T, vector: &Matrix<T>, beta: T, axis: Axis) -> Result<()> {
                    self.apply_vector(alpha, ElementwiseOp::$op, vector, beta, axis)
                }

                pub fn $vector_scaled(&self, alpha: T, vector: &Matrix<T>, beta: T, axis: Axis) -> Result<Matrix<T>> {
                    let mut out = self.working_copy()?;
                    out.$vector_scaledi(alpha, vector, beta, axis)?;
                    Ok(out)
                }
            )*
        }
    };
}

elementwise! {
    Add: add, addi, add_scaled, add_scaledi, add_scalar, add_scalari,
        add_vector, add_vectori, add_vector_scaled, add_vector_scaledi;
    Sub: sub, subi, sub_scaled, sub_scaledi, sub_scalar, sub_scalari,
        sub_vector, sub_vectori, sub_vector_scaled, sub_vector_scaledi;
    ReverseSub: rsub, rsubi, rsub_scaled, rsub_scaledi, rsub_scalar, rsub_scalari,
        rsub_vector, rsub_vectori, rsub_vector_scaled, rsub_vector_scaledi;
    Mul: mul, muli, mul_scaled, mul_scaledi, mul_scalar, mul_scalari,
        mul_vector, mul_vectori, mul_vector_scaled, mul_vector_scaledi;
    Div: div, divi, div_scaled, div_scaledi, div_scalar, div_scalari,
        div_vector, div_vectori, div_vector_scaled, div_vector_scaledi;
    ReverseDiv: rdiv, rdivi, rdiv_scaled, rdiv_scaledi, rdiv_scalar, rdiv_scalari,
        rdiv_vector, rdiv_vectori, rdiv_vector_scaled, rdiv_vector_scaledi;
}
