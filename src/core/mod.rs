//! Core types: grids and the traits shared by smoothers, transfers and the cycle.

pub mod grid;
pub mod traits;
pub mod wrappers;

pub use grid::Grid;
pub use traits::{Field, Indexing, InnerProduct, MatVec};
