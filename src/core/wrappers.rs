//! Wrappers for faer dense matrices and plain vectors.
//!
//! Implements the core traits for `faer::Mat` and `Vec<T>` so the operator path of the cycle
//! and the generic smoother can work on them directly. With the `rayon` feature the
//! matrix-vector product and the reductions split rows across threads.

use crate::core::traits::{Indexing, InnerProduct, MatVec};
use faer::Mat;
use num_traits::Float;

/// Computes `y = A * x` for a dense `faer::Mat`.
impl<T: Float + Send + Sync> MatVec<Vec<T>> for Mat<T> {
    fn matvec(&self, x: &Vec<T>, y: &mut Vec<T>) {
        assert_eq!(self.nrows(), y.len(), "Output vector y has incorrect length");
        assert_eq!(self.ncols(), x.len(), "Input vector x has incorrect length");
        let row = |i: usize| {
            (0..self.ncols()).fold(T::zero(), |acc, j| acc + self[(i, j)] * x[j])
        };
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            y.par_iter_mut().enumerate().for_each(|(i, yi)| *yi = row(i));
        }
        #[cfg(not(feature = "rayon"))]
        {
            for (i, yi) in y.iter_mut().enumerate() {
                *yi = row(i);
            }
        }
    }
}

/// Inner product and norm for vectors.
impl<T: Float + From<f64> + Send + Sync> InnerProduct<Vec<T>> for () {
    type Scalar = T;

    fn dot(&self, x: &Vec<T>, y: &Vec<T>) -> T {
        assert_eq!(x.len(), y.len(), "Vectors must have the same length");
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            x.par_iter()
                .zip(y.par_iter())
                .map(|(xi, yi)| *xi * *yi)
                .reduce(|| T::zero(), |acc, v| acc + v)
        }
        #[cfg(not(feature = "rayon"))]
        {
            x.iter()
                .zip(y.iter())
                .map(|(xi, yi)| *xi * *yi)
                .fold(T::zero(), |acc, v| acc + v)
        }
    }

    fn norm(&self, x: &Vec<T>) -> T {
        self.dot(x, x).sqrt()
    }
}

impl<T> Indexing for Vec<T> {
    fn nrows(&self) -> usize {
        self.len()
    }
}

impl<T> Indexing for Mat<T> {
    fn nrows(&self) -> usize {
        self.nrows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faer::mat;

    #[test]
    fn matvec_small() {
        let a = mat![[2.0, -1.0], [-1.0, 2.0]];
        let x = vec![1.0, 3.0];
        let mut y = vec![0.0; 2];
        a.matvec(&x, &mut y);
        assert_eq!(y, vec![-1.0, 5.0]);
    }

    #[test]
    fn norm_matches_manual() {
        let ip = ();
        let x = vec![3.0_f64, 4.0];
        assert_eq!(ip.norm(&x), 5.0);
        assert_eq!(ip.dot(&x, &vec![1.0, 1.0]), 7.0);
    }
}
