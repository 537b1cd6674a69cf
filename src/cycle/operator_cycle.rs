//! Cycle for an explicit square operator.
//!
//! The hierarchy `{A_l}` is derived once from the fine operator by weighted restriction and
//! is read-only afterwards. Smoothing is natural-order Gauss–Seidel with `A_l`, the defect is
//! `f - A_l u`, and the coarsest level is solved with LU.

use crate::core::traits::{InnerProduct, MatVec};
use crate::cycle::Cycle;
use crate::error::MgError;
use crate::operator::coarsening::OperatorHierarchy;
use crate::smoother::gauss_seidel::GaussSeidel;
use crate::solver::direct_lu::LuSolver;
use faer::Mat;

pub struct OperatorCycle {
    hierarchy: OperatorHierarchy,
    // smoothers[l - 2] belongs to level l ≥ 2; level 1 is only ever solved directly
    smoothers: Vec<GaussSeidel<f64>>,
    coarse: LuSolver,
    smoothing_tol: Option<f64>,
}

impl OperatorCycle {
    /// Build `levels` operators from `a` and prepare smoothers and the coarse factorization.
    ///
    /// Fails with [`MgError::ZeroPivot`] if a smoothed level has a zero diagonal entry.
    pub fn new(a: Mat<f64>, levels: usize) -> Result<Self, MgError> {
        let hierarchy = OperatorHierarchy::build(a, levels)?;
        let smoothers = (2..=levels)
            .map(|l| GaussSeidel::setup(hierarchy.get(l)))
            .collect::<Result<Vec<_>, _>>()?;
        let coarse = LuSolver::new(hierarchy.get(1).clone())?;
        Ok(Self { hierarchy, smoothers, coarse, smoothing_tol: None })
    }

    /// Stop pre/post smoothing once the defect norm is `≤ tol`.
    pub fn with_smoothing_tol(mut self, tol: Option<f64>) -> Self {
        self.smoothing_tol = tol;
        self
    }

    pub fn hierarchy(&self) -> &OperatorHierarchy {
        &self.hierarchy
    }

    fn relax(
        &self,
        level: usize,
        f: &Vec<f64>,
        u: &mut Vec<f64>,
        sweeps: usize,
    ) -> Result<(), MgError> {
        let a = self.hierarchy.get(level);
        let fresh;
        let gs = match level.checked_sub(2).and_then(|k| self.smoothers.get(k)) {
            Some(gs) => gs,
            None => {
                fresh = GaussSeidel::setup(a)?;
                &fresh
            }
        };
        match self.smoothing_tol {
            None => gs.sweep(a, f, u, sweeps),
            Some(tol) => {
                let ip = ();
                for _ in 0..sweeps {
                    if ip.norm(&self.defect(level, f, u)) <= tol {
                        break;
                    }
                    gs.sweep(a, f, u, 1);
                }
            }
        }
        Ok(())
    }

    fn defect(&self, level: usize, f: &Vec<f64>, u: &Vec<f64>) -> Vec<f64> {
        let a = self.hierarchy.get(level);
        let mut au = vec![0.0; a.nrows()];
        a.matvec(u, &mut au);
        f.iter().zip(&au).map(|(fi, ai)| fi - ai).collect()
    }

    fn check_len(&self, level: usize, v: &[f64]) -> Result<(), MgError> {
        let n = self.hierarchy.get(level).nrows();
        if v.len() != n {
            return Err(MgError::ShapeMismatch { expected: n, found: v.len() });
        }
        Ok(())
    }
}

impl Cycle for OperatorCycle {
    type Field = Vec<f64>;

    fn presmooth(
        &self,
        level: usize,
        f: &Vec<f64>,
        u: &mut Vec<f64>,
        _h: f64,
        sweeps: usize,
    ) -> Result<(), MgError> {
        self.check_len(level, f)?;
        self.check_len(level, u)?;
        self.relax(level, f, u, sweeps)
    }

    fn postsmooth(
        &self,
        level: usize,
        f: &Vec<f64>,
        u: &mut Vec<f64>,
        _h: f64,
        sweeps: usize,
    ) -> Result<(), MgError> {
        self.check_len(level, f)?;
        self.check_len(level, u)?;
        self.relax(level, f, u, sweeps)
    }

    fn residual(&self, level: usize, f: &Vec<f64>, u: &Vec<f64>, _h: f64) -> Vec<f64> {
        self.defect(level, f, u)
    }

    fn solve(&self, level: usize, f: &Vec<f64>, u: &mut Vec<f64>, _h: f64) -> Result<(), MgError> {
        self.check_len(level, u)?;
        *u = if level == 1 {
            self.coarse.solve(f)?
        } else {
            LuSolver::new(self.hierarchy.get(level).clone())?.solve(f)?
        };
        Ok(())
    }

    fn residual_norm(&self, level: usize, f: &Vec<f64>, u: &Vec<f64>, h: f64) -> f64 {
        let ip = ();
        ip.norm(&self.residual(level, f, u, h))
    }

    fn levels(&self) -> Option<usize> {
        Some(self.hierarchy.levels())
    }

    fn check_shape(&self, level: usize, v: &Vec<f64>) -> Result<(), MgError> {
        if level == 0 || level > self.hierarchy.levels() {
            return Err(MgError::Configuration(format!(
                "level {level} outside the {}-level hierarchy",
                self.hierarchy.levels()
            )));
        }
        self.check_len(level, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::dense::poisson_1d;

    #[test]
    fn direct_solve_on_single_level() {
        let ops = OperatorCycle::new(poisson_1d(5), 1).unwrap();
        let f = vec![1.0; 5];
        let mut u = vec![0.0; 5];
        ops.solve(1, &f, &mut u, 1.0 / 6.0).unwrap();
        assert!(ops.residual_norm(1, &f, &u, 1.0 / 6.0) < 1e-12);
    }

    #[test]
    fn zero_diagonal_on_smoothed_level_fails_setup() {
        let mut a = poisson_1d(7);
        a[(3, 3)] = 0.0;
        assert!(matches!(OperatorCycle::new(a, 2), Err(MgError::ZeroPivot(3))));
    }

    #[test]
    fn wrong_length_is_a_shape_mismatch() {
        let ops = OperatorCycle::new(poisson_1d(7), 2).unwrap();
        let mut u = vec![0.0; 5];
        let err = ops.presmooth(2, &vec![0.0; 5], &mut u, 0.125, 1).unwrap_err();
        assert_eq!(err, MgError::ShapeMismatch { expected: 7, found: 5 });
        assert!(matches!(ops.check_shape(3, &vec![0.0; 7]), Err(MgError::Configuration(_))));
        assert_eq!(ops.levels(), Some(2));
    }

    #[test]
    fn smoothing_stops_at_tolerance() {
        let f = vec![1.0; 7];
        let loose = OperatorCycle::new(poisson_1d(7), 2).unwrap().with_smoothing_tol(Some(1e3));
        let mut u = vec![0.0; 7];
        loose.presmooth(2, &f, &mut u, 0.125, 4).unwrap();
        assert!(u.iter().all(|v| *v == 0.0));

        let tight = OperatorCycle::new(poisson_1d(7), 2).unwrap().with_smoothing_tol(Some(0.0));
        let plain = OperatorCycle::new(poisson_1d(7), 2).unwrap();
        let (mut u_tight, mut u_plain) = (vec![0.0; 7], vec![0.0; 7]);
        tight.presmooth(2, &f, &mut u_tight, 0.125, 3).unwrap();
        plain.presmooth(2, &f, &mut u_plain, 0.125, 3).unwrap();
        assert_eq!(u_tight, u_plain);
    }
}
