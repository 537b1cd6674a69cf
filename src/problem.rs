//! Canonical test problems with known analytic solutions.
//!
//! - 1D: `-u'' = π² sin(πx)` on `(0, 1)`, `u = sin(πx)`. Fields hold the `n - 1` interior
//!   unknowns and the source is scaled by `h²`, matching the unscaled [`poisson_1d`] matrix.
//! - 2D: `-Δu = 2π² sin(πx) sin(πy)` on the unit square, `u = sin(πx) sin(πy)`, as grids for
//!   the stencil solver.
//!
//! Both use a zero initial guess and homogeneous Dirichlet boundaries.
//!
//! [`poisson_1d`]: crate::matrix::dense::poisson_1d

use std::f64::consts::PI;

use crate::core::grid::Grid;
use crate::error::MgError;

/// Initial guess, source term and analytic solution of a test problem.
#[derive(Clone, Debug, PartialEq)]
pub enum Problem {
    OneD { u0: Vec<f64>, f: Vec<f64>, exact: Vec<f64> },
    TwoD { u0: Grid, f: Grid, exact: Grid },
}

impl Problem {
    /// Problem of dimension `dim` discretized with `n` intervals per axis.
    pub fn generate(dim: usize, n: usize) -> Result<Self, MgError> {
        if n < 2 {
            return Err(MgError::Configuration(format!(
                "a test problem needs at least 2 intervals, got {n}"
            )));
        }
        match dim {
            1 => Ok(Self::one_d(n)),
            2 => Ok(Self::two_d(n)),
            _ => Err(MgError::Configuration(format!("{dim} is not a supported dimension"))),
        }
    }

    fn one_d(n: usize) -> Self {
        let h = 1.0 / n as f64;
        let exact: Vec<f64> = (1..n).map(|i| (PI * i as f64 * h).sin()).collect();
        let f = exact.iter().map(|s| h * h * PI * PI * s).collect();
        Self::OneD { u0: vec![0.0; n - 1], f, exact }
    }

    fn two_d(n: usize) -> Self {
        let exact = Grid::from_interior_fn(n, |x, y| (PI * x).sin() * (PI * y).sin());
        let f = Grid::from_interior_fn(n, |x, y| 2.0 * PI * PI * (PI * x).sin() * (PI * y).sin());
        Self::TwoD { u0: Grid::zeros(n), f, exact }
    }

    pub fn dim(&self) -> usize {
        match self {
            Self::OneD { .. } => 1,
            Self::TwoD { .. } => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes_follow_dimension() {
        match Problem::generate(1, 8).unwrap() {
            Problem::OneD { u0, f, exact } => {
                assert_eq!((u0.len(), f.len(), exact.len()), (7, 7, 7));
                assert!((exact[3] - 1.0).abs() < 1e-15);
            }
            p => panic!("expected a 1D problem, got dim {}", p.dim()),
        }
        match Problem::generate(2, 8).unwrap() {
            Problem::TwoD { u0, f, exact } => {
                assert_eq!(u0.intervals(), 8);
                assert_eq!(f.intervals(), 8);
                assert!((exact[(4, 4)] - 1.0).abs() < 1e-15);
                assert_eq!(exact[(0, 4)], 0.0);
            }
            p => panic!("expected a 2D problem, got dim {}", p.dim()),
        }
    }

    #[test]
    fn invalid_requests() {
        assert!(matches!(Problem::generate(3, 8), Err(MgError::Configuration(_))));
        assert!(matches!(Problem::generate(0, 8), Err(MgError::Configuration(_))));
        assert!(matches!(Problem::generate(2, 1), Err(MgError::Configuration(_))));
    }
}
