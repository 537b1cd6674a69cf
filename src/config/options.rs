//! Cycle and driver options.
//!
//! `CycleOptions` collects the hyperparameters of one solve session: smoothing sweep counts,
//! the cycle index `mu`, the number of levels, and the outer stopping rule. The options are
//! immutable once a solver has been built from them.

use crate::error::MgError;

/// Multigrid parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleOptions {
    /// Presmoothing sweeps `v1`
    pub v1: usize,

    /// Postsmoothing sweeps `v2`
    pub v2: usize,

    /// Recursive coarse-grid calls per level (1 = V-cycle, 2 = W-cycle)
    pub mu: usize,

    /// Number of grid levels, including the finest
    pub levels: usize,

    /// Outer tolerance, scaled by `n²` before comparison with the residual norm
    pub eps: f64,

    /// Outer cycle budget
    pub max_cycles: usize,

    /// Optional residual tolerance for pre/post smoothing
    pub smoothing_tol: Option<f64>,

    /// Terminal-solve tolerance, relative to the coarsest residual on entry and never looser
    /// than the absolute value itself
    pub coarse_tol: f64,

    /// Sweep budget of the terminal solve on structured grids
    pub coarse_max_iter: usize,
}

impl Default for CycleOptions {
    fn default() -> Self {
        Self {
            v1: 2,
            v2: 2,
            mu: 1,
            levels: 1,
            eps: 1e-6,
            max_cycles: 10,
            smoothing_tol: None,
            coarse_tol: 1e-3,
            coarse_max_iter: 5_000,
        }
    }
}

impl CycleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_smoothing(mut self, v1: usize, v2: usize) -> Self {
        self.v1 = v1;
        self.v2 = v2;
        self
    }

    /// `mu = 1` is a V-cycle, `mu = 2` a W-cycle.
    pub fn with_mu(mut self, mu: usize) -> Self {
        self.mu = mu;
        self
    }

    pub fn with_levels(mut self, levels: usize) -> Self {
        self.levels = levels;
        self
    }

    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    pub fn with_max_cycles(mut self, max_cycles: usize) -> Self {
        self.max_cycles = max_cycles;
        self
    }

    pub fn with_smoothing_tol(mut self, tol: Option<f64>) -> Self {
        self.smoothing_tol = tol;
        self
    }

    pub fn with_coarse_solve(mut self, tol: f64, max_iter: usize) -> Self {
        self.coarse_tol = tol;
        self.coarse_max_iter = max_iter;
        self
    }

    /// Reject parameter combinations that cannot describe a cycle.
    pub fn validate(&self) -> Result<(), MgError> {
        if self.mu == 0 {
            return Err(MgError::Configuration("mu must be at least 1".into()));
        }
        if self.levels == 0 {
            return Err(MgError::Configuration("level count must be at least 1".into()));
        }
        if !(self.eps.is_finite() && self.eps > 0.0) {
            return Err(MgError::Configuration(format!("eps must be positive, got {}", self.eps)));
        }
        if !(self.coarse_tol.is_finite() && self.coarse_tol > 0.0) {
            return Err(MgError::Configuration(format!(
                "coarse tolerance must be positive, got {}",
                self.coarse_tol
            )));
        }
        if let Some(t) = self.smoothing_tol {
            if t.is_nan() || t < 0.0 {
                return Err(MgError::Configuration(format!(
                    "smoothing tolerance must be non-negative, got {t}"
                )));
            }
        }
        Ok(())
    }

    /// Check that a grid with `n` intervals supports `levels` levels: `log2(n) ≥ levels`, and
    /// `n` stays even down to the coarsest level.
    pub fn check_levels(&self, n: usize) -> Result<(), MgError> {
        if n == 0 {
            return Err(MgError::Configuration("grid must have at least one interval".into()));
        }
        if (n as f64).log2() < self.levels as f64 {
            return Err(MgError::Configuration(format!(
                "{} levels requested but log2({n}) = {:.3}",
                self.levels,
                (n as f64).log2()
            )));
        }
        let halvings = self.levels.saturating_sub(1);
        let factor = 1usize << halvings;
        if n % factor != 0 {
            return Err(MgError::Configuration(format!(
                "{n} intervals cannot be halved {halvings} times"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(CycleOptions::default().validate().is_ok());
    }

    #[test]
    fn level_checks() {
        let opts = CycleOptions::new().with_levels(5);
        assert!(opts.check_levels(64).is_ok());
        assert!(opts.check_levels(32).is_ok());
        assert!(opts.check_levels(16).is_err());
        // log2(40) ≈ 5.32, but 40 → 20 → 10 → 5 cannot be halved a fourth time
        assert!(opts.check_levels(40).is_err());
        assert!(opts.with_levels(6).check_levels(96).is_ok());
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(CycleOptions::new().with_mu(0).validate().is_err());
        assert!(CycleOptions::new().with_levels(0).validate().is_err());
        assert!(CycleOptions::new().with_eps(-1.0).validate().is_err());
        assert!(CycleOptions::new().with_smoothing_tol(Some(f64::NAN)).validate().is_err());
    }
}
