//! Convergence tracking & tolerance checks for the outer multigrid loop.

/// Stopping criteria: absolute tolerance on the residual norm and an iteration budget.
#[derive(Clone, Debug)]
pub struct Convergence<T> {
    pub tol: T,
    pub max_iters: usize,
}

/// Outcome of a solve. `converged == false` means the budget ran out; the solution is still
/// the last iterate.
#[derive(Clone, Debug)]
pub struct SolveStats<T> {
    pub iterations: usize,
    pub final_residual: T,
    pub converged: bool,
    /// Residual norm after each iteration
    pub history: Vec<T>,
}

impl<T: Copy + num_traits::Float> Convergence<T> {
    /// Tolerance scaled by `n²` for a grid with `n` intervals.
    pub fn scaled(eps: T, n: usize, max_iters: usize) -> Self {
        let n = <T as num_traits::NumCast>::from(n).unwrap_or_else(T::infinity);
        Self { tol: eps * n * n, max_iters }
    }

    /// Returns `(should_stop, converged)` given the current `res_norm` after iteration `i`.
    pub fn check(&self, res_norm: T, i: usize) -> (bool, bool) {
        let converged = res_norm <= self.tol;
        (converged || i >= self.max_iters, converged)
    }
}
