//! geomdtype: default dtypes and dtype coercion for a numeric backend
//!
//! The crate gives a numeric backend a single place to decide element types:
//! which dtype a value has, what the default floating and complex dtypes are,
//! and how function outputs are cast to follow their inputs or the defaults.
//!
//! # Architecture
//!
//! - **dtype**: `DType`, kinds, canonical names and casting rules
//! - **array**: `NdArray`, a runtime-typed array over `ndarray`, and the
//!   dtype predicates
//! - **cast**: dtype conversion of `NdArray`
//! - **config**: `DTypeConfig` and the shared `DTypeContext`
//! - **coerce**: wrapper factories, generic over a `DTypeBackend`
//! - **backend**: the `DTypeBackend` trait and its ndarray binding
//!
//! # Example
//! ```
//! use geomdtype::prelude::*;
//! use geomdtype::backend::ndarray as nd;
//!
//! let ctx = DTypeContext::default();
//! let zeros = nd::add_default_dtype_by_casting(&ctx, |len: usize| {
//!     Ok(NdArray::from_slice(&vec![0.0f64; len]))
//! });
//!
//! nd::set_default_dtype(&ctx, "float32").unwrap();
//! assert_eq!(zeros(3, None).unwrap().dtype(), DType::Float32);
//! assert_eq!(zeros(3, Some(DType::Int8)).unwrap().dtype(), DType::Int8);
//! ```

// ============================================================================
// Core Modules
// ============================================================================

pub mod array;
pub mod backend;
pub mod cast;
pub mod coerce;
pub mod config;
pub mod dtype;
pub mod error;

// ============================================================================
// Re-exports
// ============================================================================

pub use array::{is_bool, is_complex, is_floating, Element, HasDType, NdArray, Operand, Scalar};
pub use backend::{DTypeBackend, DTypeLike, NdarrayBackend};
pub use cast::{cast, cast_with};
pub use config::{DTypeConfig, DTypeContext, DefaultTarget};
pub use dtype::{Casting, DType, DTypeKind};
pub use error::{DTypeError, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module with commonly used types and traits
pub mod prelude {
    pub use crate::array::{HasDType, NdArray, Operand};
    pub use crate::backend::{DTypeBackend, NdarrayBackend};
    pub use crate::config::{DTypeContext, DefaultTarget};
    pub use crate::dtype::{Casting, DType, DTypeKind};
    pub use crate::error::{DTypeError, Result};
}
