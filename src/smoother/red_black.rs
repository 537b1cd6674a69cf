//! Red-black Gauss–Seidel for the 5-point Poisson stencil.
//!
//! Interior points are split by the parity of `i + j`. A sweep first updates every red point
//! from its (black) neighbours, then every black point from the freshly updated red ones.
//! Points of one colour only read the other colour, so each half sweep is computed from a
//! snapshot and the rows are filled independently (in parallel with the `rayon` feature).

use crate::core::grid::Grid;
use crate::operator::stencil::residual_norm;

/// Colour of the points with `i + j` even.
pub const RED: usize = 0;
/// Colour of the points with `i + j` odd.
pub const BLACK: usize = 1;

/// Relax all interior points of one colour:
/// `u[i,j] ← (u[i-1,j] + u[i+1,j] + u[i,j-1] + u[i,j+1] + h²·f[i,j]) / 4`.
pub fn relax_color(f: &Grid, u: &mut Grid, h: f64, color: usize) {
    let mut scratch = Vec::new();
    relax_color_with(f, u, h, color, &mut scratch);
}

/// [`relax_color`] reading its snapshot of `u` from `scratch`, which is resized as needed
/// and can be reused across sweeps.
pub fn relax_color_with(f: &Grid, u: &mut Grid, h: f64, color: usize, scratch: &mut Vec<f64>) {
    let n = u.intervals();
    let side = u.side();
    let h2 = h * h;
    scratch.clear();
    scratch.extend_from_slice(u.values());
    let snapshot = scratch.as_slice();
    let rhs = f.values();

    let update_row = |i: usize, row: &mut [f64]| {
        if i == 0 || i == n {
            return;
        }
        // first column j ≥ 1 with (i + j) % 2 == color
        let start = 1 + (i + 1 + color) % 2;
        let base = i * side;
        for j in (start..n).step_by(2) {
            let id = base + j;
            let neighbours =
                snapshot[id - 1] + snapshot[id + 1] + snapshot[id - side] + snapshot[id + side];
            row[j] = 0.25 * (neighbours + h2 * rhs[id]);
        }
    };

    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        u.values_mut()
            .par_chunks_mut(side)
            .enumerate()
            .for_each(|(i, row)| update_row(i, row));
    }
    #[cfg(not(feature = "rayon"))]
    {
        for (i, row) in u.values_mut().chunks_mut(side).enumerate() {
            update_row(i, row);
        }
    }
}

/// Run up to `max_iter` red-black sweeps on `u` for right-hand side `f` at spacing `h`.
///
/// With `tol = Some(t)` the interior residual norm is checked before the first sweep and after
/// every sweep, stopping as soon as it is `≤ t`. Returns the number of sweeps performed.
///
/// # Panics
/// Panics if `f` and `u` have different shapes.
pub fn red_black_gauss_seidel(
    f: &Grid,
    u: &mut Grid,
    h: f64,
    max_iter: usize,
    tol: Option<f64>,
) -> usize {
    assert_eq!(f.intervals(), u.intervals(), "rhs and solution have different shapes");
    let converged = |u: &Grid| tol.is_some_and(|t| residual_norm(f, u, h) <= t);
    if converged(&*u) {
        return 0;
    }
    let mut scratch = Vec::with_capacity(u.values().len());
    for sweep in 1..=max_iter {
        relax_color_with(f, u, h, RED, &mut scratch);
        relax_color_with(f, u, h, BLACK, &mut scratch);
        if converged(&*u) {
            return sweep;
        }
    }
    max_iter
}
