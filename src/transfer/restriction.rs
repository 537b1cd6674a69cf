//! Full-weighting restriction, fine → coarse.
//!
//! 2D weights are `1/4` at the centre, `1/8` on the axis neighbours and `1/16` on the corners;
//! in 1D they are `[1/4, 1/2, 1/4]`. Both stencils sum to one.

use crate::core::grid::Grid;
use faer::Mat;

/// Restrict a grid with `n` intervals (`n` even) onto a grid with `n/2` intervals.
///
/// Coarse point `(I, J)` aggregates the 3×3 fine neighbourhood centred at `(2I, 2J)`.
///
/// # Panics
/// Panics if `n` is odd.
pub fn restrict_2d(fine: &Grid) -> Grid {
    let nf = fine.intervals();
    assert!(nf % 2 == 0, "cannot restrict a grid with an odd number of intervals ({nf})");
    let nc = nf / 2;
    let mut coarse = Grid::zeros(nc);
    let side_c = coarse.side();

    let fill_row = |ic: usize, row: &mut [f64]| {
        if ic == 0 || ic == nc {
            return;
        }
        let i = 2 * ic;
        for jc in 1..nc {
            let j = 2 * jc;
            let center = fine[(i, j)];
            let axis = fine[(i - 1, j)] + fine[(i + 1, j)] + fine[(i, j - 1)] + fine[(i, j + 1)];
            let corners = fine[(i - 1, j - 1)]
                + fine[(i - 1, j + 1)]
                + fine[(i + 1, j - 1)]
                + fine[(i + 1, j + 1)];
            row[jc] = 0.25 * center + 0.125 * axis + 0.0625 * corners;
        }
    };

    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        coarse
            .values_mut()
            .par_chunks_mut(side_c)
            .enumerate()
            .for_each(|(ic, row)| fill_row(ic, row));
    }
    #[cfg(not(feature = "rayon"))]
    {
        for (ic, row) in coarse.values_mut().chunks_mut(side_c).enumerate() {
            fill_row(ic, row);
        }
    }
    coarse
}

/// Restrict a vector of `m = 2·mc + 1` interior unknowns onto `mc` unknowns.
///
/// # Panics
/// Panics if `m` is even.
pub fn restrict_1d(fine: &[f64]) -> Vec<f64> {
    let m = fine.len();
    assert!(m % 2 == 1, "cannot restrict a vector of even length ({m})");
    (0..m / 2)
        .map(|k| 0.25 * fine[2 * k] + 0.5 * fine[2 * k + 1] + 0.25 * fine[2 * k + 2])
        .collect()
}

/// The matrix form of [`restrict_1d`]: an `(m-1)/2 × m` matrix with rows `[1/4, 1/2, 1/4]`
/// shifted by two columns per row.
///
/// # Panics
/// Panics if `m` is even.
pub fn restriction_matrix(m: usize) -> Mat<f64> {
    assert!(m % 2 == 1, "restriction needs an odd fine size ({m})");
    Mat::from_fn(m / 2, m, |k, j| match j as isize - 2 * k as isize {
        0 | 2 => 0.25,
        1 => 0.5,
        _ => 0.0,
    })
}
