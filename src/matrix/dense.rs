//! Dense Poisson matrices on top of Faer.
//!
//! Both discretizations are left unscaled (no `1/h²` factor), matching right-hand sides that
//! already carry the `h²` weight.

use faer::Mat;

/// `m × m` tridiagonal matrix with `[-1, 2, -1]`, the 1D Laplacian on `m` interior points.
pub fn poisson_1d(m: usize) -> Mat<f64> {
    Mat::from_fn(m, m, |i, j| {
        if i == j {
            2.0
        } else if i.abs_diff(j) == 1 {
            -1.0
        } else {
            0.0
        }
    })
}

/// `m² × m²` 5-point Laplacian on an `m × m` interior, unknowns ordered row by row.
///
/// Diagonal blocks are tridiagonal `[-1, 4, -1]`, off-diagonal blocks are `-I`.
pub fn poisson_2d(m: usize) -> Mat<f64> {
    let size = m * m;
    Mat::from_fn(size, size, |p, q| {
        let (pi, pj) = (p / m, p % m);
        let (qi, qj) = (q / m, q % m);
        if p == q {
            4.0
        } else if (pi == qi && pj.abs_diff(qj) == 1) || (pj == qj && pi.abs_diff(qi) == 1) {
            -1.0
        } else {
            0.0
        }
    })
}
