//! Error types for dtype handling

use crate::dtype::{Casting, DType};
use thiserror::Error;

/// Main error type for dtype normalization, casting and configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DTypeError {
    /// The string does not name a dtype known to the backend
    #[error("unknown dtype: {0}")]
    UnknownDType(String),

    /// Only float32 and float64 can act as the default dtype
    #[error("only float32 and float64 are allowed as default dtype, got {0}")]
    InvalidDefaultDType(DType),

    /// The casting rule forbids the conversion
    #[error("cannot cast from {from} to {to} under '{rule}' casting")]
    Cast {
        from: DType,
        to: DType,
        rule: Casting,
    },

    /// The backend cannot produce this dtype
    #[error("dtype {dtype} is not supported by the {backend} backend")]
    UnsupportedDType { backend: &'static str, dtype: DType },

    /// Element count does not match the requested shape
    #[error("shape error: {0}")]
    Shape(String),

    /// An environment variable holds an unusable value
    #[error("invalid value for {var}: {message}")]
    InvalidEnv { var: &'static str, message: String },
}

impl From<ndarray::ShapeError> for DTypeError {
    fn from(err: ndarray::ShapeError) -> Self {
        DTypeError::Shape(err.to_string())
    }
}

/// Result alias used across the crate
pub type Result<T, E = DTypeError> = std::result::Result<T, E>;
