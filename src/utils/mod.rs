//! Utilities shared by the drivers.

pub mod convergence;
pub use convergence::{Convergence, SolveStats};
