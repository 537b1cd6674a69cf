use thiserror::Error;

// Unified error type for gmg

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MgError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch { expected: usize, found: usize },
    #[error("zero pivot at row {0}")]
    ZeroPivot(usize),
    #[error("numerical failure: {0}")]
    Numerical(String),
}
