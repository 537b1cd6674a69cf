//! Matrix-free 5-point Poisson operator.
//!
//! `(A u)[i,j] = (4 u[i,j] - u[i-1,j] - u[i+1,j] - u[i,j-1] - u[i,j+1]) / h²` on interior points.
//! The red-black smoother relaxes exactly this stencil, so residuals computed here vanish at
//! the smoother's fixed point.

use crate::core::grid::Grid;

fn map_interior<F>(u: &Grid, point: F) -> Grid
where
    F: Fn(usize, usize) -> f64 + Send + Sync,
{
    let n = u.intervals();
    let mut out = Grid::zeros(n);
    let side = out.side();
    let fill_row = |i: usize, row: &mut [f64]| {
        if i == 0 || i == n {
            return;
        }
        for (j, v) in row.iter_mut().enumerate().take(n).skip(1) {
            *v = point(i, j);
        }
    };

    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        out.values_mut()
            .par_chunks_mut(side)
            .enumerate()
            .for_each(|(i, row)| fill_row(i, row));
    }
    #[cfg(not(feature = "rayon"))]
    {
        for (i, row) in out.values_mut().chunks_mut(side).enumerate() {
            fill_row(i, row);
        }
    }
    out
}

#[inline]
fn laplacian(u: &Grid, i: usize, j: usize, inv_h2: f64) -> f64 {
    (4.0 * u[(i, j)] - u[(i - 1, j)] - u[(i + 1, j)] - u[(i, j - 1)] - u[(i, j + 1)]) * inv_h2
}

/// Apply the discrete operator to `u` at spacing `h`. Boundary entries of the result are zero.
pub fn apply_poisson(u: &Grid, h: f64) -> Grid {
    let inv_h2 = 1.0 / (h * h);
    map_interior(u, |i, j| laplacian(u, i, j, inv_h2))
}

/// Defect `f - A u` at spacing `h`, zero on the boundary.
///
/// # Panics
/// Panics if `f` and `u` have different shapes.
pub fn residual(f: &Grid, u: &Grid, h: f64) -> Grid {
    assert_eq!(f.intervals(), u.intervals(), "rhs and solution have different shapes");
    let inv_h2 = 1.0 / (h * h);
    map_interior(u, |i, j| f[(i, j)] - laplacian(u, i, j, inv_h2))
}

/// Euclidean norm of the interior defect.
pub fn residual_norm(f: &Grid, u: &Grid, h: f64) -> f64 {
    residual(f, u, h).interior_norm()
}
