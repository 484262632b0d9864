//! Property tests: sparse storage behaves exactly like dense storage.
//!
//! The same sequence of writes is applied to a dense, a hash-backed and (for booleans)
//! a bitset-backed matrix; every read must agree afterwards.

use matkit::{Backing, Matrix};
use proptest::prelude::*;

fn writes() -> impl Strategy<Value = (usize, usize, Vec<(usize, i64)>)> {
    (1usize..12, 1usize..12).prop_flat_map(|(rows, cols)| {
        let cells = rows * cols;
        (
            Just(rows),
            Just(cols),
            prop::collection::vec((0..cells, -5i64..5), 0..40),
        )
    })
}

proptest! {
    #[test]
    fn hash_matches_dense((rows, cols, ops) in writes()) {
        let mut dense = Matrix::<i64>::zeros(rows, cols).unwrap();
        let mut sparse = Matrix::<i64>::hashed(rows, cols).unwrap();
        for &(index, value) in &ops {
            dense.set_linear(index, value).unwrap();
            sparse.set_linear(index, value).unwrap();
        }
        prop_assert!(sparse.equals(&dense).unwrap());
        for i in 0..rows {
            for j in 0..cols {
                prop_assert_eq!(sparse.get(i, j).unwrap(), dense.get(i, j).unwrap());
            }
        }
        prop_assert!(sparse.transpose().unwrap().equals(&dense.transpose().unwrap()).unwrap());
        prop_assert_eq!(sparse.transpose().unwrap().backing(), Backing::Hash);
        let ones = Matrix::filled(cols, 2, 1i64).unwrap();
        prop_assert!(sparse.mmul(&ones).unwrap().equals(&dense.mmul(&ones).unwrap()).unwrap());
    }

    #[test]
    fn bits_match_dense((rows, cols, ops) in writes()) {
        let mut dense = Matrix::<bool>::zeros(rows, cols).unwrap();
        let mut bits = Matrix::bits(rows, cols).unwrap();
        for &(index, value) in &ops {
            dense.set_linear(index, value > 0).unwrap();
            bits.set_linear(index, value > 0).unwrap();
        }
        prop_assert!(bits.equals(&dense).unwrap());
        prop_assert_eq!(bits.stored_entries(), dense.count_true().unwrap());
        prop_assert!(bits.not().unwrap().equals(&dense.not().unwrap()).unwrap());
    }

    #[test]
    fn sparse_views_match_dense((rows, cols, ops) in writes(), r0 in 0usize..12, c0 in 0usize..12) {
        let mut dense = Matrix::<f64>::zeros(rows, cols).unwrap();
        let mut sparse = Matrix::<f64>::hashed(rows, cols).unwrap();
        for &(index, value) in &ops {
            dense.set_linear(index, value as f64).unwrap();
            sparse.set_linear(index, value as f64).unwrap();
        }
        let (r0, c0) = (r0 % rows, c0 % cols);
        let dv = dense.view(r0, c0, rows - r0, cols - c0).unwrap();
        let sv = sparse.view(r0, c0, rows - r0, cols - c0).unwrap();
        prop_assert!(sv.equals(&dv).unwrap());
        prop_assert_eq!(sv.sum().unwrap(), dv.sum().unwrap());
    }
}
