//! Cross-kind adapters.
//!
//! An adapter is a `Matrix<U>` reading the same source as a `Matrix<T>`. Every access
//! coerces between the storage's native kind and `U`, so an adapter of an adapter is
//! just another adapter of the underlying storage.

use num_complex::Complex64;

use crate::core::traits::Element;
use crate::matrix::Matrix;

impl<T: Element> Matrix<T> {
    /// This matrix read and written as `U`.
    pub fn as_kind<U: Element>(&self) -> Matrix<U> {
        Matrix::from_source(self.shape, self.source.clone())
    }

    pub fn as_bool_matrix(&self) -> Matrix<bool> {
        self.as_kind()
    }

    pub fn as_int_matrix(&self) -> Matrix<i32> {
        self.as_kind()
    }

    pub fn as_long_matrix(&self) -> Matrix<i64> {
        self.as_kind()
    }

    pub fn as_double_matrix(&self) -> Matrix<f64> {
        self.as_kind()
    }

    pub fn as_complex_matrix(&self) -> Matrix<Complex64> {
        self.as_kind()
    }

    /// Whether `T` differs from the kind the storage holds natively.
    pub fn is_adapter(&self) -> bool {
        self.native_kind() != T::KIND
    }
}
