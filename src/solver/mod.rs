//! Solve drivers: the outer multigrid iteration and the dense direct solve it bottoms out in.

pub mod direct_lu;
pub mod multigrid;

pub use direct_lu::{LuSolver, lu_solve};
pub use multigrid::{MultigridSolver, general_multigrid, poisson_multigrid};
