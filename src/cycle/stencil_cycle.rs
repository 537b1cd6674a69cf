//! Cycle for the structured Poisson problem.

use crate::config::CycleOptions;
use crate::core::grid::Grid;
use crate::cycle::Cycle;
use crate::error::MgError;
use crate::operator::stencil;
use crate::smoother::red_black_gauss_seidel;

/// Red-black smoothing with the matrix-free 5-point stencil on every level. The terminal
/// level is solved by red-black sweeps until the defect is below `coarse_tol · min(r0, 1)`,
/// `r0` being the defect on entry.
#[derive(Debug, Clone)]
pub struct StencilCycle {
    smoothing_tol: Option<f64>,
    coarse_tol: f64,
    coarse_max_iter: usize,
}

impl StencilCycle {
    pub fn new(options: &CycleOptions) -> Self {
        Self {
            smoothing_tol: options.smoothing_tol,
            coarse_tol: options.coarse_tol,
            coarse_max_iter: options.coarse_max_iter,
        }
    }
}

impl Default for StencilCycle {
    fn default() -> Self {
        Self::new(&CycleOptions::default())
    }
}

impl Cycle for StencilCycle {
    type Field = Grid;

    fn presmooth(
        &self,
        _level: usize,
        f: &Grid,
        u: &mut Grid,
        h: f64,
        sweeps: usize,
    ) -> Result<(), MgError> {
        red_black_gauss_seidel(f, u, h, sweeps, self.smoothing_tol);
        Ok(())
    }

    fn postsmooth(
        &self,
        _level: usize,
        f: &Grid,
        u: &mut Grid,
        h: f64,
        sweeps: usize,
    ) -> Result<(), MgError> {
        red_black_gauss_seidel(f, u, h, sweeps, self.smoothing_tol);
        Ok(())
    }

    fn residual(&self, _level: usize, f: &Grid, u: &Grid, h: f64) -> Grid {
        stencil::residual(f, u, h)
    }

    fn solve(&self, level: usize, f: &Grid, u: &mut Grid, h: f64) -> Result<(), MgError> {
        let r0 = stencil::residual_norm(f, u, h);
        let target = self.coarse_tol * r0.min(1.0);
        let sweeps = red_black_gauss_seidel(f, u, h, self.coarse_max_iter, Some(target));
        if sweeps == self.coarse_max_iter {
            let r = stencil::residual_norm(f, u, h);
            if r > target {
                log::debug!(
                    "terminal solve on level {level} stopped at {r:.3e} after {sweeps} sweeps (target {target:.3e})"
                );
            }
        }
        Ok(())
    }

    fn residual_norm(&self, _level: usize, f: &Grid, u: &Grid, h: f64) -> f64 {
        stencil::residual_norm(f, u, h)
    }
}
