//! Grid transfer operators: full-weighting restriction and bilinear prolongation.
//!
//! The routines assume exact coarsening by a factor of two and panic otherwise. Shape
//! agreement between cooperating fields is checked by the cycle engine before they are called.

pub mod prolongation;
pub mod restriction;

pub use prolongation::{prolong_1d, prolong_2d};
pub use restriction::{restrict_1d, restrict_2d, restriction_matrix};
