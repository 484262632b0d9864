//! Pure column-major index arithmetic.
//!
//! Every matrix in the crate stores its elements in column-major order, so the linear
//! index of `(i, j)` is `i + j * rows`. The rectangular view transform lives here as
//! well, since its correctness is what keeps nested windows addressing the right cells.

use crate::error::{MatError, Result};

#[inline]
fn check(index: usize, extent: usize) -> Result<()> {
    if index < extent {
        Ok(())
    } else {
        Err(MatError::IndexOutOfRange { index, extent })
    }
}

/// Linear index of `(row, col)` in a column-major `rows x cols` layout.
#[inline]
pub fn column_major(row: usize, col: usize, rows: usize, cols: usize) -> Result<usize> {
    check(row, rows)?;
    check(col, cols)?;
    Ok(row + col * rows)
}

/// Linear index of `(row, col)` in a row-major `rows x cols` layout.
///
/// Reading a column-major buffer through this formula treats it as its own transpose,
/// which is how multiplication avoids materializing transposed operands.
#[inline]
pub fn row_major(row: usize, col: usize, rows: usize, cols: usize) -> Result<usize> {
    check(row, rows)?;
    check(col, cols)?;
    Ok(row * cols + col)
}

/// Split a column-major linear index into `(row, col)`.
#[inline]
pub fn decompose(index: usize, rows: usize) -> (usize, usize) {
    (index % rows, index / rows)
}

/// Position `start + index * step`, validated to lie in `[0, extent)`.
pub fn slice_index(start: isize, step: isize, index: usize, extent: usize) -> Result<usize> {
    let offset = (index as isize)
        .checked_mul(step)
        .and_then(|o| o.checked_add(start))
        .ok_or(MatError::IndexOutOfRange { index, extent })?;
    if offset < 0 {
        return Err(MatError::IndexOutOfRange { index, extent });
    }
    let position = offset as usize;
    check(position, extent)?;
    Ok(position)
}

/// Translate a linear index local to a `view_rows`-tall window into the linear index of
/// the parent it was cut from.
pub fn compute_linear_index(
    index: usize,
    view_rows: usize,
    col_offset: usize,
    row_offset: usize,
    parent_rows: usize,
    parent_cols: usize,
) -> Result<usize> {
    let (row, col) = decompose(index, view_rows);
    column_major(row + row_offset, col + col_offset, parent_rows, parent_cols)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn column_and_row_major_agree_on_transpose() {
        // element (1, 2) of a 2x3 matrix sits where (2, 1) of its 3x2 transpose would
        // in row-major order
        assert_eq!(column_major(1, 2, 2, 3).unwrap(), 5);
        assert_eq!(row_major(2, 1, 3, 2).unwrap(), 5);
    }

    #[test]
    fn zero_index_is_valid() {
        assert_eq!(column_major(0, 0, 1, 1).unwrap(), 0);
        assert_eq!(slice_index(0, 3, 0, 1).unwrap(), 0);
    }

    #[test]
    fn out_of_bounds_is_reported() {
        assert_eq!(
            column_major(2, 0, 2, 2),
            Err(MatError::IndexOutOfRange { index: 2, extent: 2 })
        );
        assert!(slice_index(0, 2, 3, 6).is_err());
        assert!(slice_index(4, -2, 3, 6).is_err());
        assert_eq!(slice_index(4, -2, 2, 6).unwrap(), 0);
    }

    #[test]
    fn window_index_maps_into_parent() {
        // 2x2 window at (1, 1) of a 4x3 parent; local index 3 is (1, 1) -> parent (2, 2)
        assert_eq!(compute_linear_index(3, 2, 1, 1, 4, 3).unwrap(), 2 + 2 * 4);
        assert_eq!(compute_linear_index(0, 2, 1, 1, 4, 3).unwrap(), 1 + 4);
    }

    proptest! {
        #[test]
        fn decomposition_inverts_column_major(rows in 1usize..40, cols in 1usize..40, seed in any::<u64>()) {
            let i = (seed as usize) % rows;
            let j = (seed as usize / 7) % cols;
            let idx = column_major(i, j, rows, cols).unwrap();
            prop_assert_eq!(decompose(idx, rows), (i, j));
            prop_assert_eq!(column_major(idx % rows, idx / rows, rows, cols).unwrap(), idx);
        }

        #[test]
        fn window_transform_is_a_bijection(
            pr in 1usize..20, pc in 1usize..20, a in any::<u32>(), b in any::<u32>(),
        ) {
            let r0 = a as usize % pr;
            let c0 = b as usize % pc;
            let h = 1 + (a as usize / 31) % (pr - r0);
            let w = 1 + (b as usize / 31) % (pc - c0);
            let mut seen = std::collections::HashSet::new();
            for local in 0..h * w {
                let parent = compute_linear_index(local, h, c0, r0, pr, pc).unwrap();
                let (pi, pj) = decompose(parent, pr);
                prop_assert_eq!((pi - r0) + (pj - c0) * h, local);
                prop_assert!(seen.insert(parent));
            }
        }
    }
}
