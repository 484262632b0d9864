//! Conversions between `Matrix<f64>` and faer's dense matrices.
//!
//! Both sides are column-major, so a conversion is a single element-wise copy. The
//! resulting matrix is always independent of its source.

use faer::{Mat, MatRef};

use crate::error::Result;
use crate::matrix::Matrix;

impl Matrix<f64> {
    /// Copy a faer matrix into a dense matrix.
    pub fn from_faer(mat: MatRef<'_, f64>) -> Result<Self> {
        Matrix::from_fn(mat.nrows(), mat.ncols(), |i, j| mat[(i, j)])
    }

    /// Copy into an owned faer matrix. Views, sparse and diagonal matrices are
    /// materialized.
    pub fn to_faer(&self) -> Result<Mat<f64>> {
        let data = self.to_vec()?;
        let rows = self.rows();
        Ok(Mat::from_fn(rows, self.columns(), |i, j| data[i + j * rows]))
    }
}
