//! Discrete operators: the matrix-free Poisson stencil and coarsening of explicit matrices.

pub mod coarsening;
pub mod stencil;

pub use coarsening::{OperatorHierarchy, weighted_restriction};
pub use stencil::{apply_poisson, residual, residual_norm};
