//! Square structured grids with a Dirichlet boundary.
//!
//! A grid with `n` intervals stores `(n + 1) × (n + 1)` values in row-major order, boundary
//! rows and columns included. The spacing is `h = 1/n` and the interior is `(n - 1) × (n - 1)`.
//! Boundary values are zero and no routine in this crate writes them.

use std::ops::{Index, IndexMut};

use crate::core::traits::Field;
use crate::error::MgError;
use crate::transfer::{prolongation, restriction};

#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    n: usize,
    values: Vec<f64>,
}

impl Grid {
    /// Zero grid with `n` intervals per axis.
    ///
    /// # Panics
    /// Panics if `n == 0`.
    pub fn zeros(n: usize) -> Self {
        assert!(n > 0, "a grid needs at least one interval");
        Self { n, values: vec![0.0; (n + 1) * (n + 1)] }
    }

    /// Grid whose interior point `(i, j)` holds `f(x, y)` with `x = j·h`, `y = i·h`.
    /// The boundary stays zero.
    pub fn from_interior_fn<F>(n: usize, f: F) -> Self
    where
        F: Fn(f64, f64) -> f64,
    {
        let mut grid = Self::zeros(n);
        let h = grid.h();
        for i in 1..n {
            for j in 1..n {
                grid[(i, j)] = f(j as f64 * h, i as f64 * h);
            }
        }
        grid
    }

    /// Wrap row-major storage of length `(n + 1)²`.
    pub fn from_vec(n: usize, values: Vec<f64>) -> Result<Self, MgError> {
        if n == 0 {
            return Err(MgError::Configuration("grid must have at least one interval".into()));
        }
        let side = n + 1;
        if values.len() != side * side {
            return Err(MgError::ShapeMismatch { expected: side * side, found: values.len() });
        }
        Ok(Self { n, values })
    }

    pub fn intervals(&self) -> usize {
        self.n
    }

    /// Number of stored points along one axis (`n + 1`).
    pub fn side(&self) -> usize {
        self.n + 1
    }

    pub fn h(&self) -> f64 {
        1.0 / self.n as f64
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }

    /// Iterate over interior values, row by row.
    pub fn interior(&self) -> impl Iterator<Item = f64> + '_ {
        let side = self.side();
        self.values
            .chunks(side)
            .skip(1)
            .take(self.n.saturating_sub(1))
            .flat_map(move |row| row[1..side - 1].iter().copied())
    }

    /// Euclidean norm over the interior.
    pub fn interior_norm(&self) -> f64 {
        self.interior().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Largest pointwise difference to `other` over the interior.
    ///
    /// # Panics
    /// Panics if the grids have different shapes.
    pub fn max_abs_diff(&self, other: &Grid) -> f64 {
        assert_eq!(self.n, other.n, "grids have different shapes");
        self.interior()
            .zip(other.interior())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.values[i * (self.n + 1) + j]
    }
}

impl IndexMut<(usize, usize)> for Grid {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        &mut self.values[i * (self.n + 1) + j]
    }
}

impl Field for Grid {
    fn intervals(&self) -> usize {
        self.n
    }

    fn interior_len(&self) -> usize {
        let m = self.n.saturating_sub(1);
        m * m
    }

    fn zeros_like(&self) -> Self {
        Self::zeros(self.n)
    }

    fn restrict(&self) -> Self {
        restriction::restrict_2d(self)
    }

    fn prolong(&self, target_intervals: usize) -> Self {
        prolongation::prolong_2d(self, target_intervals)
    }

    fn add_assign(&mut self, other: &Self) {
        assert_eq!(self.n, other.n, "grids have different shapes");
        // boundaries of both are zero, so a flat sum keeps them zero
        for (a, b) in self.values.iter_mut().zip(&other.values) {
            *a += *b;
        }
    }
}

/// Operator-mode fields: interior unknowns only, `n = len + 1`.
impl Field for Vec<f64> {
    fn intervals(&self) -> usize {
        self.len() + 1
    }

    fn interior_len(&self) -> usize {
        self.len()
    }

    fn zeros_like(&self) -> Self {
        vec![0.0; self.len()]
    }

    fn restrict(&self) -> Self {
        restriction::restrict_1d(self)
    }

    fn prolong(&self, target_intervals: usize) -> Self {
        prolongation::prolong_1d(self, target_intervals - 1)
    }

    fn add_assign(&mut self, other: &Self) {
        assert_eq!(self.len(), other.len(), "vectors have different lengths");
        for (a, b) in self.iter_mut().zip(other) {
            *a += *b;
        }
    }
}
