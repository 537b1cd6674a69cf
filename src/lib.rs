//! gmg: geometric multigrid over Faer
//!
//! V- and W-cycle multigrid for the 2D Poisson problem on structured grids (matrix-free
//! 5-point stencil, red-black Gauss–Seidel) and for explicit operators coarsened by weighted
//! restriction, with an outer iteration that stops on a scaled residual norm.

pub mod config;
pub mod core;
pub mod cycle;
pub mod error;
pub mod matrix;
pub mod operator;
pub mod problem;
pub mod smoother;
pub mod solver;
pub mod transfer;
pub mod utils;

// Re-exports for convenience
pub use config::*;
pub use crate::core::*;
pub use cycle::*;
pub use error::*;
pub use matrix::*;
pub use operator::*;
pub use problem::Problem;
pub use smoother::*;
pub use solver::*;
pub use transfer::*;
pub use utils::*;
