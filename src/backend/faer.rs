use faer::mat::{MatMut, MatRef};
use faer::{Accum, Par, Scale};

use super::DenseMultiply;
use crate::utils::shape::Transpose;

/// [`DenseMultiply`] on top of `faer::linalg::matmul::matmul`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FaerGemm {
    parallel: bool,
}

impl FaerGemm {
    /// A backend that lets faer split work across the rayon pool.
    ///
    /// Without the `rayon` feature this is the same as `FaerGemm::default()`.
    pub fn parallel() -> Self {
        FaerGemm { parallel: true }
    }

    pub fn with_parallelism(parallel: bool) -> Self {
        FaerGemm { parallel }
    }

    fn par(&self) -> Par {
        #[cfg(feature = "rayon")]
        {
            if self.parallel {
                return Par::rayon(num_cpus::get());
            }
        }
        Par::Seq
    }
}

fn operand<'a>(
    buf: &'a [f64],
    trans: Transpose,
    rows: usize,
    cols: usize,
    ld: usize,
) -> MatRef<'a, f64> {
    // `rows x cols` is the logical shape; the stored buffer is its transpose when `trans`.
    trans.call(
        || MatRef::from_column_major_slice_with_stride(buf, rows, cols, ld),
        || MatRef::from_column_major_slice_with_stride(buf, cols, rows, ld).transpose(),
    )
}

impl DenseMultiply for FaerGemm {
    fn dgemm(
        &self,
        trans_a: Transpose,
        trans_b: Transpose,
        m: usize,
        n: usize,
        k: usize,
        alpha: f64,
        a: &[f64],
        lda: usize,
        b: &[f64],
        ldb: usize,
        beta: f64,
        c: &mut [f64],
        ldc: usize,
    ) {
        if m == 0 || n == 0 {
            return;
        }
        tracing::trace!(m, n, k, parallel = self.parallel, "faer dgemm");
        let a = operand(a, trans_a, m, k, lda);
        let b = operand(b, trans_b, k, n, ldb);
        let mut c = MatMut::from_column_major_slice_with_stride_mut(c, m, n, ldc);

        // faer has no arbitrary output scaling; fold `beta` in before accumulating.
        let accum = if beta == 0.0 {
            Accum::Replace
        } else {
            if beta != 1.0 {
                c *= Scale(beta);
            }
            Accum::Add
        };
        faer::linalg::matmul::matmul(c, accum, a, b, alpha, self.par());
    }
}
