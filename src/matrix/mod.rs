//! Matrix module: named dense discretizations.

pub mod dense;
pub use dense::{poisson_1d, poisson_2d};
