//! Backend-agnostic dtype coercion wrappers
//!
//! Each factory takes a function and returns a closure that calls it and
//! adjusts dtypes around the call. The factories are generic over a
//! [`DTypeBackend`]; `backend::ndarray` binds them to `NdArray`.
//!
//! Wrappers that consult a default dtype capture a clone of a
//! [`DTypeContext`] and read it on every call.
//!
//! Extra arguments of the wrapped function travel as a single generic `A`
//! (use a tuple for several, `()` for none).

use crate::array::{is_complex, is_floating, HasDType, Operand, Scalar};
use crate::backend::{DTypeBackend, DTypeLike};
use crate::config::{DTypeContext, DefaultTarget};
use crate::dtype::DType;
use crate::error::{DTypeError, Result};
use log::debug;

// ============================================================================
// Default dtype
// ============================================================================

/// Normalize `value` with the backend and make it the default dtype.
///
/// Only float32 and float64 are accepted; the complex default follows.
pub fn set_default_dtype<B, V>(ctx: &DTypeContext, value: V) -> Result<DType>
where
    B: DTypeBackend,
    V: DTypeLike,
{
    ctx.set_default_dtype(value.to_dtype::<B>()?)
}

/// Resolve a missing dtype argument against the context at call time.
///
/// Replaces rewriting default arguments whenever the default changes: the
/// wrapped function always receives a concrete dtype.
pub fn with_default_dtype<A, R, F>(
    ctx: &DTypeContext,
    target: DefaultTarget,
    func: F,
) -> impl Fn(A, Option<DType>) -> R
where
    F: Fn(A, DType) -> R,
{
    let ctx = ctx.clone();
    move |args: A, dtype: Option<DType>| func(args, ctx.resolve(dtype, target))
}

/// Cast the output to the requested dtype, or to the default dtype if none.
pub fn add_default_dtype_by_casting<B, A, F>(
    ctx: &DTypeContext,
    func: F,
) -> impl Fn(A, Option<DType>) -> Result<B::Array>
where
    B: DTypeBackend,
    F: Fn(A) -> Result<B::Array>,
{
    let ctx = ctx.clone();
    move |args: A, dtype: Option<DType>| {
        let target = ctx.resolve(dtype, DefaultTarget::Real);
        let out = func(args)?;
        cast_if_needed::<B>(out, target)
    }
}

/// Cast output whose dtype is one of `dtypes` to the current default.
///
/// Floating output goes to the default dtype, complex output to the default
/// complex dtype. Useful for functions that always answer in float64.
pub fn cast_out_from_dtype<B, A, F>(
    ctx: &DTypeContext,
    dtypes: &[DType],
    func: F,
) -> impl Fn(A) -> Result<B::Array>
where
    B: DTypeBackend,
    F: Fn(A) -> Result<B::Array>,
{
    let ctx = ctx.clone();
    let dtypes = dtypes.to_vec();
    move |args: A| {
        let out = func(args)?;
        if !dtypes.contains(&out.dtype()) {
            return Ok(out);
        }
        if is_floating(&out) {
            let target = ctx.get_default_dtype();
            cast_if_needed::<B>(out, target)
        } else if is_complex(&out) {
            let target = ctx.get_default_cdtype();
            cast_if_needed::<B>(out, target)
        } else {
            Ok(out)
        }
    }
}

// ============================================================================
// Input-driven casts
// ============================================================================

/// Cast floating output back to the dtype of a floating input.
///
/// Unlike the geomstats decorator of the same name, a floating result of a
/// non-floating input is returned as is instead of being cast to the input
/// dtype.
pub fn cast_fout_to_input_dtype<B, A, F>(func: F) -> impl Fn(&B::Array, A) -> Result<B::Array>
where
    B: DTypeBackend,
    F: Fn(&B::Array, A) -> Result<B::Array>,
{
    move |x: &B::Array, args: A| {
        let out = func(x, args)?;
        if is_floating(&out) && is_floating(x) {
            cast_if_needed::<B>(out, x.dtype())
        } else {
            Ok(out)
        }
    }
}

/// Cast floating or complex output to match the input's precision.
///
/// Float output follows a float input, or the real counterpart of a complex
/// input. Complex output follows a complex input, or the complex counterpart
/// of a float input. Other combinations are returned untouched.
pub fn cast_out_to_input_dtype<B, A, F>(func: F) -> impl Fn(&B::Array, A) -> Result<B::Array>
where
    B: DTypeBackend,
    F: Fn(&B::Array, A) -> Result<B::Array>,
{
    move |x: &B::Array, args: A| {
        let out = func(x, args)?;
        match input_matched_dtype::<B>(x.dtype(), out.dtype())? {
            Some(target) => cast_if_needed::<B>(out, target),
            None => Ok(out),
        }
    }
}

fn input_matched_dtype<B: DTypeBackend>(input: DType, out: DType) -> Result<Option<DType>> {
    if input == out {
        return Ok(None);
    }
    let target = match (out.is_float(), out.is_complex()) {
        (true, _) if input.is_float() || input.is_complex() => input.real_counterpart(),
        (_, true) if input.is_float() || input.is_complex() => input.complex_counterpart(),
        _ => None,
    };
    match target {
        Some(dtype) if dtype.is_complex() => Ok(Some(supported_complex::<B>(dtype)?)),
        other => Ok(other),
    }
}

// ============================================================================
// Complex support
// ============================================================================

/// Let a real-only function produce complex output.
///
/// A complex dtype runs `func` at the real dtype of the same precision and
/// casts the result up, so precision is never lowered. Complex dtypes the
/// backend does not list are rejected. Real or missing dtypes pass through.
pub fn allow_complex_dtype<B, A, F>(func: F) -> impl Fn(A, Option<DType>) -> Result<B::Array>
where
    B: DTypeBackend,
    F: Fn(A, Option<DType>) -> Result<B::Array>,
{
    move |args: A, dtype: Option<DType>| match dtype {
        Some(cdtype) if cdtype.is_complex() => {
            let cdtype = supported_complex::<B>(cdtype)?;
            let out = func(args, cdtype.real_counterpart())?;
            cast_if_needed::<B>(out, cdtype)
        }
        _ => func(args, dtype),
    }
}

fn supported_complex<B: DTypeBackend>(dtype: DType) -> Result<DType> {
    if B::complex_dtypes().contains(&dtype) {
        Ok(dtype)
    } else {
        Err(DTypeError::UnsupportedDType {
            backend: B::NAME,
            dtype,
        })
    }
}

// ============================================================================
// Scalar boxing
// ============================================================================

/// Box a bare scalar operand before calling a unary function.
///
/// Floats become 0-d arrays of the current default dtype, ints 0-d int64.
pub fn box_unary_scalar<B, R, F>(
    ctx: &DTypeContext,
    func: F,
) -> impl Fn(Operand<B::Array>) -> Result<R>
where
    B: DTypeBackend,
    F: Fn(B::Array) -> Result<R>,
{
    let ctx = ctx.clone();
    move |x: Operand<B::Array>| func(box_operand::<B>(&ctx, x)?)
}

/// Box bare scalar operands before calling a binary function.
pub fn box_binary_scalar<B, R, F>(
    ctx: &DTypeContext,
    func: F,
) -> impl Fn(Operand<B::Array>, Operand<B::Array>) -> Result<R>
where
    B: DTypeBackend,
    F: Fn(B::Array, B::Array) -> Result<R>,
{
    let ctx = ctx.clone();
    move |x1: Operand<B::Array>, x2: Operand<B::Array>| {
        func(box_operand::<B>(&ctx, x1)?, box_operand::<B>(&ctx, x2)?)
    }
}

fn box_operand<B: DTypeBackend>(
    ctx: &DTypeContext,
    operand: Operand<B::Array>,
) -> Result<B::Array> {
    match operand {
        Operand::Float(value) => B::scalar(Scalar::Float(value), ctx.get_default_dtype()),
        Operand::Int(value) => B::scalar(Scalar::Int(value.into()), DType::Int64),
        Operand::Array(array) => Ok(array),
    }
}

fn cast_if_needed<B: DTypeBackend>(out: B::Array, target: DType) -> Result<B::Array> {
    let from = out.dtype();
    if from == target {
        return Ok(out);
    }
    debug!("{} backend: casting output {from} -> {target}", B::NAME);
    B::cast(&out, target)
}
