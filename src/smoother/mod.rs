//! Smoothers: local relaxation that damps the high-frequency part of the error.
//!
//! - [`red_black`]: red-black Gauss–Seidel on structured grids (5-point Poisson stencil).
//! - [`gauss_seidel`]: natural-order Gauss–Seidel on an explicit square operator.

pub mod gauss_seidel;
pub mod red_black;

pub use gauss_seidel::{GaussSeidel, gauss_seidel};
pub use red_black::{BLACK, RED, red_black_gauss_seidel, relax_color, relax_color_with};
