//! Element traits: the per-kind operator table.
//!
//! `Element` covers all five kinds and carries the coercion hooks. `Numeric` adds the
//! arithmetic the typed operations need; integer kinds wrap on overflow and refuse
//! division by zero, floating kinds follow IEEE-754.

use std::cmp::Ordering;
use std::fmt::Debug;

use num_complex::Complex64;
use num_traits::Zero;

use crate::backend::DenseMultiply;
use crate::core::value::{ElementKind, Value};
use crate::error::{MatError, Result};
use crate::utils::shape::Transpose;

mod private {
    pub trait Sealed {}
    impl Sealed for bool {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
    impl Sealed for f64 {}
    impl Sealed for num_complex::Complex64 {}
}

/// A matrix element kind.
pub trait Element: Copy + PartialEq + Debug + 'static + private::Sealed {
    const KIND: ElementKind;
    /// Additive identity (`false` for booleans); the implicit value of sparse cells.
    const ZERO: Self;
    const ONE: Self;

    /// Read `value` as this kind.
    fn from_value(value: Value) -> Self;
    fn into_value(self) -> Value;

    /// Ordering used by the comparison operations. Complex elements compare by their
    /// real part, the same projection used when reading them as doubles.
    fn compare(&self, other: &Self) -> Option<Ordering>;
}

/// Arithmetic over int, long, double and complex elements.
pub trait Numeric: Element {
    fn plus(self, rhs: Self) -> Self;
    fn minus(self, rhs: Self) -> Self;
    fn times(self, rhs: Self) -> Self;
    fn divide(self, rhs: Self) -> Result<Self>;
    fn negated(self) -> Self;
    /// Absolute value (modulus for complex elements) as a double.
    fn magnitude(self) -> f64;

    /// Multiply through a native dense kernel, if this kind has one.
    ///
    /// `a` and `b` are column-major with leading dimensions `lda` / `ldb`; the result is
    /// the column-major `m x n` buffer of `alpha * op(a) * op(b)`.
    #[allow(clippy::too_many_arguments)]
    fn native_gemm(
        _backend: &dyn DenseMultiply,
        _trans_a: Transpose,
        _trans_b: Transpose,
        _m: usize,
        _n: usize,
        _k: usize,
        _alpha: Self,
        _a: &[Self],
        _lda: usize,
        _b: &[Self],
        _ldb: usize,
    ) -> Option<Vec<Self>> {
        None
    }
}

impl Element for bool {
    const KIND: ElementKind = ElementKind::Bool;
    const ZERO: Self = false;
    const ONE: Self = true;

    fn from_value(value: Value) -> Self {
        value.to_bool()
    }
    fn into_value(self) -> Value {
        Value::Bool(self)
    }
    fn compare(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

macro_rules! integer_element {
    ($t:ty, $kind:ident, $variant:ident, $to:ident) => {
        impl Element for $t {
            const KIND: ElementKind = ElementKind::$kind;
            const ZERO: Self = 0;
            const ONE: Self = 1;

            fn from_value(value: Value) -> Self {
                value.$to()
            }
            fn into_value(self) -> Value {
                Value::$variant(self)
            }
            fn compare(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Numeric for $t {
            fn plus(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }
            fn minus(self, rhs: Self) -> Self {
                self.wrapping_sub(rhs)
            }
            fn times(self, rhs: Self) -> Self {
                self.wrapping_mul(rhs)
            }
            fn divide(self, rhs: Self) -> Result<Self> {
                if rhs.is_zero() {
                    Err(MatError::Arithmetic("integer division by zero"))
                } else {
                    Ok(self.wrapping_div(rhs))
                }
            }
            fn negated(self) -> Self {
                self.wrapping_neg()
            }
            fn magnitude(self) -> f64 {
                (self as f64).abs()
            }
        }
    };
}

integer_element!(i32, Int, Int, to_int);
integer_element!(i64, Long, Long, to_long);

impl Element for f64 {
    const KIND: ElementKind = ElementKind::Double;
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    fn from_value(value: Value) -> Self {
        value.to_double()
    }
    fn into_value(self) -> Value {
        Value::Double(self)
    }
    fn compare(&self, other: &Self) -> Option<Ordering> {
        self.partial_cmp(other)
    }
}

impl Numeric for f64 {
    fn plus(self, rhs: Self) -> Self {
        self + rhs
    }
    fn minus(self, rhs: Self) -> Self {
        self - rhs
    }
    fn times(self, rhs: Self) -> Self {
        self * rhs
    }
    fn divide(self, rhs: Self) -> Result<Self> {
        Ok(self / rhs)
    }
    fn negated(self) -> Self {
        -self
    }
    fn magnitude(self) -> f64 {
        self.abs()
    }

    fn native_gemm(
        backend: &dyn DenseMultiply,
        trans_a: Transpose,
        trans_b: Transpose,
        m: usize,
        n: usize,
        k: usize,
        alpha: Self,
        a: &[Self],
        lda: usize,
        b: &[Self],
        ldb: usize,
    ) -> Option<Vec<Self>> {
        let mut c = vec![0.0; m * n];
        backend.dgemm(trans_a, trans_b, m, n, k, alpha, a, lda, b, ldb, 0.0, &mut c, m.max(1));
        Some(c)
    }
}

impl Element for Complex64 {
    const KIND: ElementKind = ElementKind::Complex;
    const ZERO: Self = Complex64::new(0.0, 0.0);
    const ONE: Self = Complex64::new(1.0, 0.0);

    fn from_value(value: Value) -> Self {
        value.to_complex()
    }
    fn into_value(self) -> Value {
        Value::Complex(self)
    }
    fn compare(&self, other: &Self) -> Option<Ordering> {
        self.re.partial_cmp(&other.re)
    }
}

impl Numeric for Complex64 {
    fn plus(self, rhs: Self) -> Self {
        self + rhs
    }
    fn minus(self, rhs: Self) -> Self {
        self - rhs
    }
    fn times(self, rhs: Self) -> Self {
        self * rhs
    }
    fn divide(self, rhs: Self) -> Result<Self> {
        Ok(self / rhs)
    }
    fn negated(self) -> Self {
        -self
    }
    fn magnitude(self) -> f64 {
        self.norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_division_by_zero_fails() {
        assert_eq!(7i32.divide(0), Err(MatError::Arithmetic("integer division by zero")));
        assert_eq!(7i64.divide(2).unwrap(), 3);
        assert!(1.0f64.divide(0.0).unwrap().is_infinite());
    }

    #[test]
    fn integer_arithmetic_wraps() {
        assert_eq!(i32::MAX.plus(1), i32::MIN);
        assert_eq!(i32::MIN.negated(), i32::MIN);
        assert_eq!(i32::MIN.divide(-1).unwrap(), i32::MIN);
    }

    #[test]
    fn complex_orders_by_real_part() {
        let a = Complex64::new(1.0, 100.0);
        let b = Complex64::new(2.0, -100.0);
        assert_eq!(a.compare(&b), Some(Ordering::Less));
        assert_eq!(Complex64::new(3.0, 4.0).magnitude(), 5.0);
    }
}
