//! Natural-order Gauss–Seidel for an explicit square operator.

use std::fmt;
use std::ops::Index;

use crate::core::traits::Indexing;
use crate::error::MgError;
use num_traits::Float;

/// Gauss–Seidel relaxation with the inverse diagonal cached at setup.
#[derive(Debug, Clone)]
pub struct GaussSeidel<T> {
    inv_diag: Vec<T>,
}

impl<T: Float> GaussSeidel<T> {
    /// Cache `1 / A[i,i]`; fails with [`MgError::ZeroPivot`] on the first zero diagonal entry.
    pub fn setup<M>(a: &M) -> Result<Self, MgError>
    where
        M: Index<(usize, usize), Output = T> + Indexing,
    {
        let n = a.nrows();
        let mut inv_diag = Vec::with_capacity(n);
        for i in 0..n {
            let aii = a[(i, i)];
            if aii == T::zero() {
                return Err(MgError::ZeroPivot(i));
            }
            inv_diag.push(T::one() / aii);
        }
        Ok(Self { inv_diag })
    }

    pub fn len(&self) -> usize {
        self.inv_diag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inv_diag.is_empty()
    }

    /// `its` forward sweeps of `u[i] ← (f[i] - Σ_{j≠i} A[i,j]·u[j]) / A[i,i]`, in place.
    ///
    /// # Panics
    /// Panics if `a`, `f` and `u` disagree in size with the operator used at setup.
    pub fn sweep<M>(&self, a: &M, f: &[T], u: &mut [T], its: usize)
    where
        M: Index<(usize, usize), Output = T> + Indexing,
    {
        let n = self.inv_diag.len();
        assert_eq!(a.nrows(), n, "operator changed size since setup");
        assert_eq!(f.len(), n, "rhs has incorrect length");
        assert_eq!(u.len(), n, "solution has incorrect length");
        for _ in 0..its {
            for i in 0..n {
                let mut sigma = T::zero();
                for j in 0..n {
                    if j != i {
                        sigma = sigma + a[(i, j)] * u[j];
                    }
                }
                u[i] = (f[i] - sigma) * self.inv_diag[i];
            }
        }
    }
}

impl<T> fmt::Display for GaussSeidel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GaussSeidel(n={})", self.inv_diag.len())
    }
}

/// One-shot relaxation: setup on `a`, then `max_iter` sweeps on `u`.
pub fn gauss_seidel<M, T>(a: &M, f: &[T], u: &mut [T], max_iter: usize) -> Result<(), MgError>
where
    M: Index<(usize, usize), Output = T> + Indexing,
    T: Float,
{
    GaussSeidel::setup(a)?.sweep(a, f, u, max_iter);
    Ok(())
}
