//! Core traits for gmg: linear algebra on vectors and the field capability the cycle needs.

/// Matrix–vector product: y ← A x.
pub trait MatVec<V> {
    /// Compute y = A · x.
    fn matvec(&self, x: &V, y: &mut V);
}

/// Inner products & norms.
pub trait InnerProduct<V> {
    /// Associated scalar type.
    type Scalar: Copy + PartialOrd + From<f64>;
    /// Compute dot(x, y).
    fn dot(&self, x: &V, y: &V) -> Self::Scalar;
    /// Compute ‖x‖₂.
    fn norm(&self, x: &V) -> Self::Scalar;
}

/// Uniform indexing into vectors and matrices.
pub trait Indexing {
    /// Number of rows (or length for a vector).
    fn nrows(&self) -> usize;
}

/// A discrete field living on one level of a grid hierarchy.
///
/// Implemented by [`Grid`](crate::core::grid::Grid) for the structured Poisson path and by
/// `Vec<f64>` (interior unknowns only) for the operator path. The shape of a field is fully
/// described by its interval count `n`, so two fields are compatible iff their `intervals()`
/// agree.
pub trait Field: Clone + Send + Sync {
    /// Number of mesh intervals `n` along one axis; the spacing is `1/n`.
    fn intervals(&self) -> usize;

    /// Total number of interior unknowns.
    fn interior_len(&self) -> usize;

    /// A zero field with the same shape.
    fn zeros_like(&self) -> Self;

    /// Full-weighting restriction onto the next coarser level (`n → n/2`).
    fn restrict(&self) -> Self;

    /// Interpolation onto a finer level with `target_intervals` intervals.
    ///
    /// `target_intervals` must equal `2 * self.intervals()`.
    fn prolong(&self, target_intervals: usize) -> Self;

    /// `self ← self + other` over the interior.
    fn add_assign(&mut self, other: &Self);
}
