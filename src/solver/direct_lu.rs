//! Direct dense solve with Faer's full-pivoting LU.
//!
//! Used for the terminal level of the operator cycle. A singular or badly conditioned operator
//! is reported as [`MgError::Numerical`] instead of returning whatever the factorization
//! produced: the solution must be finite and reproduce the right-hand side to a relative
//! accuracy of [`RESIDUAL_CHECK`].
//!
//! # References
//! - Faer documentation: https://github.com/sarah-ek/faer-rs
//! - Golub & Van Loan, Matrix Computations

use crate::core::traits::{InnerProduct, MatVec};
use crate::error::MgError;
use faer::linalg::solvers::{FullPivLu, SolveCore};
use faer::{Conj, Mat, MatMut};

/// Relative residual accepted from a direct solve.
pub const RESIDUAL_CHECK: f64 = 1e-8;

/// LU solver with the factorization cached for repeated right-hand sides.
pub struct LuSolver {
    a: Mat<f64>,
    factor: FullPivLu<f64>,
    a_norm: f64,
}

impl LuSolver {
    /// Factor a square matrix.
    pub fn new(a: Mat<f64>) -> Result<Self, MgError> {
        if a.nrows() != a.ncols() {
            return Err(MgError::Configuration(format!(
                "direct solve needs a square operator, got {}x{}",
                a.nrows(),
                a.ncols()
            )));
        }
        let factor = FullPivLu::new(a.as_ref());
        let a_norm = (0..a.ncols())
            .flat_map(|j| (0..a.nrows()).map(move |i| (i, j)))
            .map(|(i, j)| a[(i, j)] * a[(i, j)])
            .sum::<f64>()
            .sqrt();
        Ok(Self { a, factor, a_norm })
    }

    pub fn nrows(&self) -> usize {
        self.a.nrows()
    }

    /// Solve `A x = b`.
    pub fn solve(&self, b: &[f64]) -> Result<Vec<f64>, MgError> {
        let n = self.a.nrows();
        if b.len() != n {
            return Err(MgError::ShapeMismatch { expected: n, found: b.len() });
        }
        let mut x = b.to_vec();
        let x_mat = MatMut::from_column_major_slice_mut(&mut x, n, 1);
        self.factor.solve_in_place_with_conj(Conj::No, x_mat);

        if let Some(i) = x.iter().position(|v| !v.is_finite()) {
            return Err(MgError::Numerical(format!(
                "singular operator of size {n}: LU solve produced a non-finite entry at row {i}"
            )));
        }

        let ip = ();
        let mut ax = vec![0.0; n];
        self.a.matvec(&x, &mut ax);
        let r: Vec<f64> = b.iter().zip(&ax).map(|(bi, axi)| bi - axi).collect();
        let r_norm = ip.norm(&r);
        let scale = self.a_norm * ip.norm(&x) + ip.norm(&b.to_vec());
        if r_norm > RESIDUAL_CHECK * scale {
            return Err(MgError::Numerical(format!(
                "ill-conditioned operator of size {n}: direct solve residual {r_norm:.3e} (scale {scale:.3e})"
            )));
        }
        Ok(x)
    }
}

/// One-shot `A x = b`.
pub fn lu_solve(a: &Mat<f64>, b: &[f64]) -> Result<Vec<f64>, MgError> {
    LuSolver::new(a.clone())?.solve(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lu_solver_solves_dense_system() {
        // 3x3 system: [[2,1,1],[1,3,2],[1,0,0]] x = [4,5,6]
        // True solution: [6,15,-23]
        let a = Mat::from_fn(3, 3, |i, j| match (i, j) {
            (0, 0) => 2.0, (0, 1) => 1.0, (0, 2) => 1.0,
            (1, 0) => 1.0, (1, 1) => 3.0, (1, 2) => 2.0,
            (2, 0) => 1.0,
            _ => 0.0,
        });
        let x = lu_solve(&a, &[4.0, 5.0, 6.0]).unwrap();
        let expected = [6.0, 15.0, -23.0];
        for (xi, ei) in x.iter().zip(expected.iter()) {
            assert!((xi - ei).abs() < 1e-10, "xi = {}, expected = {}", xi, ei);
        }
    }

    #[test]
    fn singular_matrix_is_reported() {
        let a = Mat::<f64>::zeros(3, 3);
        let err = lu_solve(&a, &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, MgError::Numerical(_)));

        let rank_one = Mat::from_fn(2, 2, |_, _| 1.0);
        assert!(matches!(lu_solve(&rank_one, &[1.0, 0.0]), Err(MgError::Numerical(_))));
    }

    #[test]
    fn rejects_rectangular_and_wrong_rhs() {
        assert!(LuSolver::new(Mat::<f64>::zeros(2, 3)).is_err());
        let lu = LuSolver::new(Mat::<f64>::identity(2, 2)).unwrap();
        assert_eq!(lu.solve(&[1.0]).unwrap_err(), MgError::ShapeMismatch { expected: 2, found: 1 });
    }
}
