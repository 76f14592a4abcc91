//! Backend seam for dtype coercion
//!
//! The wrappers in [`crate::coerce`] are written once against
//! [`DTypeBackend`]. A backend supplies its array type, its cast primitive
//! and its dtype spelling; the predicates come from [`HasDType`].

use crate::array::{HasDType, Scalar};
use crate::dtype::DType;
use crate::error::Result;

pub mod ndarray;

pub use self::ndarray::NdarrayBackend;

/// Primitives a numeric backend provides to the coercion layer
pub trait DTypeBackend {
    /// Array type the backend operates on
    type Array: HasDType + Clone;

    /// Backend name used in error messages
    const NAME: &'static str;

    /// Convert `array` to `dtype`
    fn cast(array: &Self::Array, dtype: DType) -> Result<Self::Array>;

    /// Parse a backend dtype spelling into a `DType`
    fn as_dtype(value: &str) -> Result<DType>;

    /// Canonical backend name of `dtype`; inverse of [`DTypeBackend::as_dtype`]
    fn dtype_as_str(dtype: DType) -> &'static str;

    /// Complex dtypes the backend can produce by casting
    fn complex_dtypes() -> &'static [DType];

    /// 0-d array holding `value` as `dtype`
    fn scalar(value: Scalar, dtype: DType) -> Result<Self::Array>;
}

/// Values accepted wherever a dtype is expected: a `DType` or a name
pub trait DTypeLike {
    fn to_dtype<B: DTypeBackend>(&self) -> Result<DType>;
}

impl DTypeLike for DType {
    fn to_dtype<B: DTypeBackend>(&self) -> Result<DType> {
        Ok(*self)
    }
}

impl DTypeLike for str {
    fn to_dtype<B: DTypeBackend>(&self) -> Result<DType> {
        B::as_dtype(self)
    }
}

impl DTypeLike for String {
    fn to_dtype<B: DTypeBackend>(&self) -> Result<DType> {
        B::as_dtype(self)
    }
}

impl<T: DTypeLike + ?Sized> DTypeLike for &T {
    fn to_dtype<B: DTypeBackend>(&self) -> Result<DType> {
        (**self).to_dtype::<B>()
    }
}
