//! This module binds the dtype layer to `ndarray`-backed arrays.
//!
//! It exposes the dtype predicates, `as_dtype`/`dtype_as_str` with the
//! numpy-style dtype spellings, and every coercion wrapper from
//! [`crate::coerce`] specialised to [`NdArray`].
use crate::array::{HasDType, NdArray, Operand, Scalar};
use crate::backend::{DTypeBackend, DTypeLike};
use crate::coerce;
use crate::config::{DTypeContext, DefaultTarget};
use crate::dtype::DType;
use crate::error::Result;

/// Complex dtypes the ndarray backend can produce
pub const COMPLEX_DTYPES: [DType; 2] = [DType::Complex64, DType::Complex128];

/// Marker type implementing [`DTypeBackend`] for [`NdArray`]
#[derive(Debug, Clone, Copy, Default)]
pub struct NdarrayBackend;

impl DTypeBackend for NdarrayBackend {
    type Array = NdArray;

    const NAME: &'static str = "ndarray";

    fn cast(array: &NdArray, dtype: DType) -> Result<NdArray> {
        crate::cast::cast(array, dtype)
    }

    fn as_dtype(value: &str) -> Result<DType> {
        let canonical = match value {
            "?" | "b1" | "bool_" => "bool",
            "i1" | "byte" => "int8",
            "i2" | "short" => "int16",
            "i4" | "intc" => "int32",
            "i8" | "int" | "int_" | "long" | "longlong" => "int64",
            "u1" | "ubyte" => "uint8",
            "u2" | "ushort" => "uint16",
            "u4" | "uintc" => "uint32",
            "u8" | "uint" | "ulonglong" => "uint64",
            "f4" | "single" => "float32",
            "f8" | "float" | "double" | "float_" => "float64",
            "c8" | "csingle" => "complex64",
            "c16" | "complex" | "cdouble" | "complex_" => "complex128",
            other => other,
        };
        canonical.parse()
    }

    fn dtype_as_str(dtype: DType) -> &'static str {
        dtype.name()
    }

    fn complex_dtypes() -> &'static [DType] {
        &COMPLEX_DTYPES
    }

    fn scalar(value: Scalar, dtype: DType) -> Result<NdArray> {
        Ok(NdArray::scalar(value, dtype))
    }
}

// ============================================================================
// Predicates and normalization
// ============================================================================

pub fn is_floating(x: &NdArray) -> bool {
    crate::array::is_floating(x)
}

pub fn is_complex(x: &NdArray) -> bool {
    crate::array::is_complex(x)
}

pub fn is_bool(x: &NdArray) -> bool {
    crate::array::is_bool(x)
}

/// Transform a dtype name (or a `DType`) into a `DType`.
pub fn as_dtype<V: DTypeLike>(value: V) -> Result<DType> {
    value.to_dtype::<NdarrayBackend>()
}

pub fn dtype_as_str(dtype: DType) -> &'static str {
    NdarrayBackend::dtype_as_str(dtype)
}

pub fn cast(array: &NdArray, dtype: DType) -> Result<NdArray> {
    NdarrayBackend::cast(array, dtype)
}

// ============================================================================
// Bound wrappers
// ============================================================================

pub fn set_default_dtype<V: DTypeLike>(ctx: &DTypeContext, value: V) -> Result<DType> {
    coerce::set_default_dtype::<NdarrayBackend, V>(ctx, value)
}

pub fn with_default_dtype<A, R, F>(
    ctx: &DTypeContext,
    target: DefaultTarget,
    func: F,
) -> impl Fn(A, Option<DType>) -> R
where
    F: Fn(A, DType) -> R,
{
    coerce::with_default_dtype(ctx, target, func)
}

pub fn add_default_dtype_by_casting<A, F>(
    ctx: &DTypeContext,
    func: F,
) -> impl Fn(A, Option<DType>) -> Result<NdArray>
where
    F: Fn(A) -> Result<NdArray>,
{
    coerce::add_default_dtype_by_casting::<NdarrayBackend, A, F>(ctx, func)
}

pub fn cast_out_from_dtype<A, F>(
    ctx: &DTypeContext,
    dtypes: &[DType],
    func: F,
) -> impl Fn(A) -> Result<NdArray>
where
    F: Fn(A) -> Result<NdArray>,
{
    coerce::cast_out_from_dtype::<NdarrayBackend, A, F>(ctx, dtypes, func)
}

pub fn cast_fout_to_input_dtype<A, F>(func: F) -> impl Fn(&NdArray, A) -> Result<NdArray>
where
    F: Fn(&NdArray, A) -> Result<NdArray>,
{
    coerce::cast_fout_to_input_dtype::<NdarrayBackend, A, F>(func)
}

pub fn cast_out_to_input_dtype<A, F>(func: F) -> impl Fn(&NdArray, A) -> Result<NdArray>
where
    F: Fn(&NdArray, A) -> Result<NdArray>,
{
    coerce::cast_out_to_input_dtype::<NdarrayBackend, A, F>(func)
}

pub fn allow_complex_dtype<A, F>(func: F) -> impl Fn(A, Option<DType>) -> Result<NdArray>
where
    F: Fn(A, Option<DType>) -> Result<NdArray>,
{
    coerce::allow_complex_dtype::<NdarrayBackend, A, F>(func)
}

pub fn box_unary_scalar<R, F>(ctx: &DTypeContext, func: F) -> impl Fn(Operand<NdArray>) -> Result<R>
where
    F: Fn(NdArray) -> Result<R>,
{
    coerce::box_unary_scalar::<NdarrayBackend, R, F>(ctx, func)
}

pub fn box_binary_scalar<R, F>(
    ctx: &DTypeContext,
    func: F,
) -> impl Fn(Operand<NdArray>, Operand<NdArray>) -> Result<R>
where
    F: Fn(NdArray, NdArray) -> Result<R>,
{
    coerce::box_binary_scalar::<NdarrayBackend, R, F>(ctx, func)
}

impl NdArray {
    /// Dtype name as spelled by the ndarray backend
    pub fn dtype_name(&self) -> &'static str {
        dtype_as_str(self.dtype())
    }
}
