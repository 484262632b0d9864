//! Options controlling how matrix multiplication is dispatched.
//!
//! `MultiplyOptions` decides whether array-based operands are handed to the dense
//! backend and whether that backend may use the rayon pool. Small products can stay on
//! the generic loop by raising `min_accelerated_size`.

/// Multiplication dispatch settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiplyOptions {
    /// Hand array-based operands to the dense backend.
    pub accelerate: bool,

    /// Let the backend split work across threads (needs the `rayon` feature).
    pub parallel: bool,

    /// Smallest `m * n * k` sent to the backend.
    pub min_accelerated_size: usize,
}

impl Default for MultiplyOptions {
    fn default() -> Self {
        MultiplyOptions {
            accelerate: true,
            parallel: false,
            min_accelerated_size: 0,
        }
    }
}

impl MultiplyOptions {
    /// Always use the generic loop.
    pub fn generic() -> Self {
        MultiplyOptions { accelerate: false, ..Default::default() }
    }

    /// Accelerated and parallel.
    pub fn parallel() -> Self {
        MultiplyOptions { parallel: true, ..Default::default() }
    }

    /// Whether an `m x k` by `k x n` product should go to the backend.
    pub fn accelerates(&self, m: usize, n: usize, k: usize) -> bool {
        self.accelerate && m.saturating_mul(n).saturating_mul(k) >= self.min_accelerated_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_gates_acceleration() {
        let opts = MultiplyOptions { min_accelerated_size: 64, ..Default::default() };
        assert!(!opts.accelerates(3, 3, 3));
        assert!(opts.accelerates(4, 4, 4));
        assert!(!MultiplyOptions::generic().accelerates(100, 100, 100));
        assert!(MultiplyOptions::default().accelerates(0, 0, 0));
    }
}
