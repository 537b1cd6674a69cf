//! Interpolation, coarse → fine.
//!
//! Coincident points copy the coarse value, points between two coarse points on an axis take
//! their average, and cell centres take the average of the four surrounding coarse points.
//! Coarse boundary values (zero) take part at the edges.

use crate::core::grid::Grid;

/// Bilinear interpolation of `coarse` onto a grid with `target` intervals.
///
/// # Panics
/// Panics if `target != 2 * coarse.intervals()`.
pub fn prolong_2d(coarse: &Grid, target: usize) -> Grid {
    let nc = coarse.intervals();
    assert_eq!(target, 2 * nc, "prolongation target must have twice the coarse intervals");
    let mut fine = Grid::zeros(target);
    let side_f = fine.side();

    let fill_row = |i: usize, row: &mut [f64]| {
        if i == 0 || i == target {
            return;
        }
        let (i0, i1) = (i / 2, (i + 1) / 2);
        for j in 1..target {
            let (j0, j1) = (j / 2, (j + 1) / 2);
            row[j] = 0.25
                * (coarse[(i0, j0)] + coarse[(i0, j1)] + coarse[(i1, j0)] + coarse[(i1, j1)]);
        }
    };

    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        fine.values_mut()
            .par_chunks_mut(side_f)
            .enumerate()
            .for_each(|(i, row)| fill_row(i, row));
    }
    #[cfg(not(feature = "rayon"))]
    {
        for (i, row) in fine.values_mut().chunks_mut(side_f).enumerate() {
            fill_row(i, row);
        }
    }
    fine
}

/// Linear interpolation of `mc` interior unknowns onto `m = 2·mc + 1` unknowns.
///
/// # Panics
/// Panics if `m != 2 * coarse.len() + 1`.
pub fn prolong_1d(coarse: &[f64], m: usize) -> Vec<f64> {
    assert_eq!(m, 2 * coarse.len() + 1, "prolongation target must be 2·mc + 1");
    // coarse index k sits at fine index 2k + 1; indices outside are the zero boundary
    let at = |k: isize| -> f64 {
        if k < 0 || k as usize >= coarse.len() { 0.0 } else { coarse[k as usize] }
    };
    (0..m)
        .map(|i| {
            if i % 2 == 1 {
                at((i as isize - 1) / 2)
            } else {
                let k = i as isize / 2;
                0.5 * (at(k - 1) + at(k))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::restriction::restriction_matrix;

    #[test]
    fn coincident_and_midpoints() {
        let mut coarse = Grid::zeros(2);
        coarse[(1, 1)] = 4.0;
        let fine = prolong_2d(&coarse, 4);
        assert_eq!(fine[(2, 2)], 4.0);
        assert_eq!(fine[(1, 2)], 2.0);
        assert_eq!(fine[(2, 3)], 2.0);
        assert_eq!(fine[(1, 1)], 1.0);
        assert_eq!(fine[(3, 3)], 1.0);
        assert_eq!(fine[(0, 2)], 0.0);
    }

    #[test]
    fn linear_function_reproduced_in_interior() {
        // the zero boundary breaks linearity next to the edges
        let coarse = Grid::from_interior_fn(8, |x, y| x + 2.0 * y);
        let fine = prolong_2d(&coarse, 16);
        let h = fine.h();
        for i in 2..14 {
            for j in 2..14 {
                let exact = j as f64 * h + 2.0 * i as f64 * h;
                assert!((fine[(i, j)] - exact).abs() < 1e-14, "({i},{j})");
            }
        }
    }

    #[test]
    fn vector_prolongation_is_twice_restriction_transpose() {
        let coarse = vec![1.0, -2.0, 0.5];
        let fine = prolong_1d(&coarse, 7);
        let r = restriction_matrix(7);
        for i in 0..7 {
            let expected: f64 = (0..3).map(|k| 2.0 * r[(k, i)] * coarse[k]).sum();
            assert!((fine[i] - expected).abs() < 1e-15);
        }
    }
}
