//! Operator coarsening for the explicit-matrix path.
//!
//! The coarse operator is the fine matrix restricted along both axes with the full-weighting
//! stencil, `R·A·Rᵗ`, scaled by the interpolation weight `2` so that it equals `R·A·P` for the
//! linear interpolation `P = 2Rᵗ` used to bring corrections back up.

use crate::error::MgError;
use crate::transfer::restriction::restriction_matrix;
use faer::Mat;

/// Interpolation weight relating 1D linear interpolation to the restriction transpose.
const INTERPOLATION_WEIGHT: f64 = 2.0;

/// Coarsen a square `m × m` operator (`m` odd, `m ≥ 3`) to `(m-1)/2 × (m-1)/2`.
pub fn weighted_restriction(a: &Mat<f64>) -> Result<Mat<f64>, MgError> {
    let m = a.nrows();
    if a.ncols() != m {
        return Err(MgError::Configuration(format!(
            "operator must be square, got {}x{}",
            m,
            a.ncols()
        )));
    }
    if m < 3 || m % 2 == 0 {
        return Err(MgError::Configuration(format!(
            "operator of size {m} cannot be coarsened (need 2·mc + 1 with mc ≥ 1)"
        )));
    }
    let r = restriction_matrix(m);
    let rt = r.transpose().to_owned();
    let mut coarse = &(&r * a) * &rt;
    for j in 0..coarse.ncols() {
        for i in 0..coarse.nrows() {
            coarse[(i, j)] *= INTERPOLATION_WEIGHT;
        }
    }
    Ok(coarse)
}

/// Write-once hierarchy `{A_l}` for levels `1..=levels`; level `levels` is the fine operator.
#[derive(Debug, Clone)]
pub struct OperatorHierarchy {
    // index 0 is the coarsest level
    operators: Vec<Mat<f64>>,
}

impl OperatorHierarchy {
    /// Derive `levels - 1` coarser operators from `fine`, top level downward.
    pub fn build(fine: Mat<f64>, levels: usize) -> Result<Self, MgError> {
        if levels == 0 {
            return Err(MgError::Configuration("level count must be at least 1".into()));
        }
        let mut operators = Vec::with_capacity(levels);
        let mut current = fine;
        for _ in 1..levels {
            let coarse = weighted_restriction(&current)?;
            operators.push(current);
            current = coarse;
        }
        operators.push(current);
        operators.reverse();
        log::debug!(
            "built operator hierarchy: {:?}",
            operators.iter().map(|a| a.nrows()).collect::<Vec<_>>()
        );
        Ok(Self { operators })
    }

    /// Number of levels.
    pub fn levels(&self) -> usize {
        self.operators.len()
    }

    /// Operator of level `l` (1-based, `l = levels()` is the finest).
    ///
    /// # Panics
    /// Panics if `l` is outside `1..=levels()`.
    pub fn get(&self, l: usize) -> &Mat<f64> {
        assert!(l >= 1 && l <= self.operators.len(), "level {l} out of range");
        &self.operators[l - 1]
    }

    pub fn finest(&self) -> &Mat<f64> {
        self.get(self.levels())
    }
}
