//! Configuration for multigrid solves.

pub mod options;
pub use options::CycleOptions;
