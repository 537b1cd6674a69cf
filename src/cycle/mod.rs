//! The recursive multigrid cycle.
//!
//! [`CycleEngine`] owns the control flow shared by every variant:
//!
//! ```text
//! presmooth(v1) → r = f - A u → restrict r → e = 0, mu × cycle(r, e, l-1, 2h)
//!              → prolong e → u += e → postsmooth(v2)
//! ```
//!
//! and hands the level-specific work to a [`Cycle`] implementation:
//! - [`StencilCycle`]: structured grids, red-black smoothing, matrix-free Poisson stencil.
//! - [`OperatorCycle`]: explicit matrices coarsened once at construction, Gauss–Seidel
//!   smoothing and an LU solve on the coarsest level.
//!
//! The level is an explicit argument of every call; nothing is mutated during recursion, and
//! the coarse residual and correction of each frame are owned by that frame. Level count and
//! shapes are checked on entry to [`CycleEngine::cycle`], before any smoothing.

pub mod operator_cycle;
pub mod stencil_cycle;

pub use operator_cycle::OperatorCycle;
pub use stencil_cycle::StencilCycle;

use crate::config::CycleOptions;
use crate::core::traits::Field;
use crate::error::MgError;

/// Level-specific operations of a multigrid cycle. Levels are 1-based, level 1 is the coarsest.
pub trait Cycle {
    type Field: Field;

    /// `sweeps` smoothing steps on `u` before the coarse-grid correction.
    fn presmooth(
        &self,
        level: usize,
        f: &Self::Field,
        u: &mut Self::Field,
        h: f64,
        sweeps: usize,
    ) -> Result<(), MgError>;

    /// `sweeps` smoothing steps on `u` after the coarse-grid correction.
    fn postsmooth(
        &self,
        level: usize,
        f: &Self::Field,
        u: &mut Self::Field,
        h: f64,
        sweeps: usize,
    ) -> Result<(), MgError>;

    /// Defect `f - A_l u`.
    fn residual(&self, level: usize, f: &Self::Field, u: &Self::Field, h: f64) -> Self::Field;

    /// (Near-)exact solve on a terminal level, overwriting `u`.
    fn solve(
        &self,
        level: usize,
        f: &Self::Field,
        u: &mut Self::Field,
        h: f64,
    ) -> Result<(), MgError>;

    /// Norm of the defect used by the outer convergence test.
    fn residual_norm(&self, level: usize, f: &Self::Field, u: &Self::Field, h: f64) -> f64;

    /// Number of levels fixed at construction, if any.
    fn levels(&self) -> Option<usize> {
        None
    }

    /// Check that `v` fits the operator of `level`.
    fn check_shape(&self, _level: usize, _v: &Self::Field) -> Result<(), MgError> {
        Ok(())
    }
}

/// Recursive driver of a single cycle.
#[derive(Debug, Clone)]
pub struct CycleEngine<C> {
    ops: C,
    options: CycleOptions,
}

impl<C: Cycle> CycleEngine<C> {
    /// Fails with [`MgError::Configuration`] if `ops` was built for a different level count.
    pub fn new(ops: C, options: CycleOptions) -> Result<Self, MgError> {
        options.validate()?;
        if let Some(built) = ops.levels() {
            if built != options.levels {
                return Err(MgError::Configuration(format!(
                    "cycle was built for {built} levels but {} were requested",
                    options.levels
                )));
            }
        }
        Ok(Self { ops, options })
    }

    pub fn ops(&self) -> &C {
        &self.ops
    }

    pub fn options(&self) -> &CycleOptions {
        &self.options
    }

    /// Check `f` and `u` against the level count and the finest operator without touching `u`.
    pub fn check(&self, f: &C::Field, u: &C::Field) -> Result<(), MgError> {
        if f.intervals() != u.intervals() {
            return Err(MgError::ShapeMismatch { expected: u.intervals(), found: f.intervals() });
        }
        self.options.check_levels(u.intervals())?;
        self.ops.check_shape(self.options.levels, u)
    }

    /// One full cycle from the finest level at `h = 1/n`.
    pub fn cycle(&self, f: &C::Field, u: &mut C::Field) -> Result<(), MgError> {
        self.check(f, u)?;
        let h = 1.0 / u.intervals() as f64;
        self.do_cycle(f, u, self.options.levels, h)
    }

    /// Defect norm on the finest level.
    pub fn residual_norm(&self, f: &C::Field, u: &C::Field) -> f64 {
        let h = 1.0 / u.intervals() as f64;
        self.ops.residual_norm(self.options.levels, f, u, h)
    }

    /// Cycle on level `level` at spacing `h`, improving `u` in place.
    pub fn do_cycle(
        &self,
        f: &C::Field,
        u: &mut C::Field,
        level: usize,
        h: f64,
    ) -> Result<(), MgError> {
        if f.intervals() != u.intervals() {
            return Err(MgError::ShapeMismatch { expected: u.intervals(), found: f.intervals() });
        }
        self.ops.check_shape(level, u)?;

        if level <= 1 || u.interior_len() <= 1 {
            log::trace!("terminal solve on level {level} ({} unknowns)", u.interior_len());
            return self.ops.solve(level, f, u, h);
        }

        let n = u.intervals();
        if n % 2 != 0 {
            return Err(MgError::Configuration(format!(
                "level {level} has {n} intervals and cannot be coarsened"
            )));
        }

        self.ops.presmooth(level, f, u, h, self.options.v1)?;

        let r = self.ops.residual(level, f, u, h);
        let r = r.restrict();

        let e = self.compute_correction(&r, level - 1, 2.0 * h)?;

        if 2 * e.intervals() != n {
            return Err(MgError::ShapeMismatch { expected: n, found: 2 * e.intervals() });
        }
        let e = e.prolong(n);
        u.add_assign(&e);

        self.ops.postsmooth(level, f, u, h, self.options.v2)
    }

    /// `mu` recursive cycles on the coarse defect equation, starting from a zero correction.
    fn compute_correction(&self, r: &C::Field, level: usize, h: f64) -> Result<C::Field, MgError> {
        let mut e = r.zeros_like();
        for _ in 0..self.options.mu {
            self.do_cycle(r, &mut e, level, h)?;
        }
        Ok(e)
    }
}
