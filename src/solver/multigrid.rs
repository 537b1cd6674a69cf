//! Outer multigrid iteration.
//!
//! Repeats full cycles until the finest-level defect norm drops below `eps · n²`, or the cycle
//! budget runs out. Running out of cycles is not an error: the stats come back with
//! `converged == false` and the last iterate is kept.

use crate::config::CycleOptions;
use crate::core::grid::Grid;
use crate::core::traits::Field;
use crate::cycle::{Cycle, CycleEngine, OperatorCycle, StencilCycle};
use crate::error::MgError;
use crate::utils::convergence::{Convergence, SolveStats};
use faer::Mat;

/// A solve session: one right-hand side, one set of options, one cycle variant.
///
/// Solving takes `&mut self`, so a solver instance drives at most one solve at a time.
#[derive(Clone)]
pub struct MultigridSolver<C: Cycle> {
    engine: CycleEngine<C>,
    f: C::Field,
    conv: Convergence<f64>,
}

impl<C: Cycle> MultigridSolver<C> {
    /// Validate `options` against the shape of `f` and set up the session.
    pub fn new(ops: C, f: C::Field, options: CycleOptions) -> Result<Self, MgError> {
        options.validate()?;
        options.check_levels(f.intervals())?;
        let conv = Convergence::scaled(options.eps, f.intervals(), options.max_cycles);
        let levels = options.levels;
        let engine = CycleEngine::new(ops, options)?;
        engine.ops().check_shape(levels, &f)?;
        Ok(Self { engine, f, conv })
    }

    pub fn rhs(&self) -> &C::Field {
        &self.f
    }

    pub fn options(&self) -> &CycleOptions {
        self.engine.options()
    }

    pub fn engine(&self) -> &CycleEngine<C> {
        &self.engine
    }

    /// Absolute tolerance the defect norm is compared against (`eps · n²`).
    pub fn tolerance(&self) -> f64 {
        self.conv.tol
    }

    /// Finest-level defect norm of `u`.
    pub fn norm(&self, u: &C::Field) -> f64 {
        self.engine.residual_norm(&self.f, u)
    }

    /// Apply a single full cycle to `u`.
    pub fn cycle(&mut self, u: &mut C::Field) -> Result<(), MgError> {
        self.engine.cycle(&self.f, u)
    }

    /// Cycle until convergence or until the budget is exhausted.
    pub fn solve(&mut self, u: &mut C::Field) -> Result<SolveStats<f64>, MgError> {
        if u.intervals() != self.f.intervals() {
            return Err(MgError::ShapeMismatch {
                expected: self.f.intervals(),
                found: u.intervals(),
            });
        }
        let mut history = Vec::with_capacity(self.conv.max_iters);
        let mut norm = self.norm(u);
        let mut converged = norm <= self.conv.tol;
        let mut iterations = 0;

        for i in 1..=self.conv.max_iters {
            if converged {
                break;
            }
            self.engine.cycle(&self.f, u)?;
            norm = self.norm(u);
            history.push(norm);
            iterations = i;
            log::debug!("residual has an L2 norm of {norm:.4e} after {i} cycles");
            let (stop, ok) = self.conv.check(norm, i);
            converged = ok;
            if stop {
                break;
            }
        }

        if converged {
            log::info!("converged after {iterations} cycles with residual {norm:.4e}");
        } else {
            log::warn!(
                "no convergence after {iterations} cycles: residual {norm:.4e} > {:.4e}",
                self.conv.tol
            );
        }
        Ok(SolveStats { iterations, final_residual: norm, converged, history })
    }
}

impl MultigridSolver<StencilCycle> {
    /// Structured Poisson solver for right-hand side `f`.
    pub fn poisson(f: Grid, options: CycleOptions) -> Result<Self, MgError> {
        let ops = StencilCycle::new(&options);
        Self::new(ops, f, options)
    }
}

impl MultigridSolver<OperatorCycle> {
    /// Solver for `A u = f` with an explicit operator; the level hierarchy is built here.
    pub fn general(a: Mat<f64>, f: Vec<f64>, options: CycleOptions) -> Result<Self, MgError> {
        options.validate()?;
        options.check_levels(f.intervals())?;
        if a.nrows() != f.len() {
            return Err(MgError::ShapeMismatch { expected: a.nrows(), found: f.len() });
        }
        let ops =
            OperatorCycle::new(a, options.levels)?.with_smoothing_tol(options.smoothing_tol);
        Self::new(ops, f, options)
    }
}

/// Solve the 5-point Poisson problem `A u = f` starting from `u`.
pub fn poisson_multigrid(
    f: Grid,
    mut u: Grid,
    options: CycleOptions,
) -> Result<(Grid, SolveStats<f64>), MgError> {
    let mut solver = MultigridSolver::poisson(f, options)?;
    let stats = solver.solve(&mut u)?;
    Ok((u, stats))
}

/// Solve `A u = f` for an explicit operator starting from `u`.
pub fn general_multigrid(
    a: Mat<f64>,
    f: Vec<f64>,
    mut u: Vec<f64>,
    options: CycleOptions,
) -> Result<(Vec<f64>, SolveStats<f64>), MgError> {
    let mut solver = MultigridSolver::general(a, f, options)?;
    let stats = solver.solve(&mut u)?;
    Ok((u, stats))
}
