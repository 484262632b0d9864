//! Dense-multiply backends.
//!
//! A backend multiplies flat column-major buffers, BLAS `dgemm` style:
//!
//! ```ignore
//! c = alpha * op(a) * op(b) + beta * c
//! ```
//!
//! where `op(x)` is `x` or its transpose depending on the transpose flag. `m x k` is the
//! shape of `op(a)`, `k x n` the shape of `op(b)` and `m x n` the shape of `c`. Leading
//! dimensions are the physical row counts of the stored (non-transposed) buffers.
//!
//! Matrices only reach a backend when both operands are array based; everything else
//! goes through the generic triple loop in [`crate::matrix::mmul`].

mod faer;
pub use self::faer::FaerGemm;

use crate::utils::shape::Transpose;

/// A native dense multiplication kernel over column-major `f64` buffers.
pub trait DenseMultiply {
    /// Compute `c = alpha * op(a) * op(b) + beta * c`.
    ///
    /// # Panics
    ///
    /// Implementations may panic if a buffer is shorter than its shape and leading
    /// dimension require.
    #[allow(clippy::too_many_arguments)]
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
    );
}

/// Straightforward loop implementation of [`DenseMultiply`].
///
/// Used to cross-check faster kernels; columns of `c` are computed in parallel when the
/// `rayon` feature is enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceGemm;

#[inline]
fn at(buf: &[f64], ld: usize, trans: Transpose, row: usize, col: usize) -> f64 {
    match trans {
        Transpose::No => buf[row + col * ld],
        Transpose::Yes => buf[col + row * ld],
    }
}

impl DenseMultiply for ReferenceGemm {
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
        assert!(ldc >= m, "leading dimension {} of c is smaller than {} rows", ldc, m);
        let column = |j: usize, out: &mut [f64]| {
            for (i, cij) in out.iter_mut().take(m).enumerate() {
                let mut sum = 0.0;
                for p in 0..k {
                    sum += at(a, lda, trans_a, i, p) * at(b, ldb, trans_b, p, j);
                }
                *cij = if beta == 0.0 { alpha * sum } else { alpha * sum + beta * *cij };
            }
        };
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            c.par_chunks_mut(ldc).take(n).enumerate().for_each(|(j, out)| column(j, out));
        }
        #[cfg(not(feature = "rayon"))]
        {
            c.chunks_mut(ldc).take(n).enumerate().for_each(|(j, out)| column(j, out));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // A = [[1,2,3],[4,5,6]] and B = [[7,8],[9,10],[11,12]], column-major.
    const A: [f64; 6] = [1.0, 4.0, 2.0, 5.0, 3.0, 6.0];
    const B: [f64; 6] = [7.0, 9.0, 11.0, 8.0, 10.0, 12.0];

    fn check_backend(backend: &dyn DenseMultiply) {
        let mut c = vec![0.0; 4];
        backend.dgemm(Transpose::No, Transpose::No, 2, 2, 3, 1.0, &A, 2, &B, 3, 0.0, &mut c, 2);
        assert_eq!(c, vec![58.0, 139.0, 64.0, 154.0]);

        // op(A) = A^T is 3x2, op(A) * A is 3x3
        let mut ata = vec![0.0; 9];
        backend.dgemm(Transpose::Yes, Transpose::No, 3, 3, 2, 1.0, &A, 2, &A, 2, 0.0, &mut ata, 3);
        assert_abs_diff_eq!(ata[0], 17.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ata[8], 45.0, epsilon = 1e-12);

        // beta accumulates into the existing contents
        let mut acc = vec![1.0; 4];
        backend.dgemm(Transpose::No, Transpose::No, 2, 2, 3, 2.0, &A, 2, &B, 3, 3.0, &mut acc, 2);
        assert_abs_diff_eq!(acc[0], 2.0 * 58.0 + 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(acc[3], 2.0 * 154.0 + 3.0, epsilon = 1e-12);
    }

    #[test]
    fn reference_backend_multiplies() {
        check_backend(&ReferenceGemm);
    }

    #[test]
    fn faer_backend_multiplies() {
        check_backend(&FaerGemm::default());
        check_backend(&FaerGemm::parallel());
    }
}
