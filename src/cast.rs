//! Casting between dtypes
//!
//! `cast` follows unsafe casting semantics: integers wrap, floats truncate
//! toward zero (saturating at the integer bounds), and complex-to-real drops
//! the imaginary part. `cast_with` checks a `Casting` rule first.

use crate::array::{with_array, Element, HasDType, NdArray};
use crate::dtype::{Casting, DType};
use crate::error::{DTypeError, Result};
use log::{debug, warn};
use ndarray::ArrayD;
use num_complex::Complex;

/// Cast `array` to `dtype` under unsafe casting.
///
/// Casting to the array's own dtype returns a clone.
pub fn cast(array: &NdArray, dtype: DType) -> Result<NdArray> {
    cast_with(array, dtype, Casting::Unsafe)
}

/// Cast `array` to `dtype`, failing if `rule` forbids the conversion.
pub fn cast_with(array: &NdArray, dtype: DType, rule: Casting) -> Result<NdArray> {
    let from = array.dtype();
    if from == dtype {
        return Ok(array.clone());
    }
    if !from.can_cast(dtype, rule) {
        return Err(DTypeError::Cast {
            from,
            to: dtype,
            rule,
        });
    }
    if from.is_complex() && !dtype.is_complex() && has_imaginary_part(array) {
        warn!("casting {from} to {dtype} discards the imaginary part");
    }
    debug!("cast {from} -> {dtype} ({} elements)", array.len());
    Ok(with_array!(array, a => convert_into(a, dtype)))
}

fn has_imaginary_part(array: &NdArray) -> bool {
    match array {
        NdArray::Complex64(a) => a.iter().any(|c| c.im != 0.0),
        NdArray::Complex128(a) => a.iter().any(|c| c.im != 0.0),
        _ => false,
    }
}

fn convert<S: Element, T: Element>(src: &ArrayD<S>) -> ArrayD<T> {
    src.mapv(|v| T::from_scalar(v.to_scalar()))
}

fn convert_into<S: Element>(src: &ArrayD<S>, dtype: DType) -> NdArray {
    match dtype {
        DType::Bool => NdArray::Bool(convert(src)),
        DType::Int8 => NdArray::Int8(convert(src)),
        DType::Int16 => NdArray::Int16(convert(src)),
        DType::Int32 => NdArray::Int32(convert(src)),
        DType::Int64 => NdArray::Int64(convert(src)),
        DType::UInt8 => NdArray::UInt8(convert(src)),
        DType::UInt16 => NdArray::UInt16(convert(src)),
        DType::UInt32 => NdArray::UInt32(convert(src)),
        DType::UInt64 => NdArray::UInt64(convert(src)),
        DType::Float32 => NdArray::Float32(convert(src)),
        DType::Float64 => NdArray::Float64(convert(src)),
        DType::Complex64 => NdArray::Complex64(convert::<S, Complex<f32>>(src)),
        DType::Complex128 => NdArray::Complex128(convert::<S, Complex<f64>>(src)),
    }
}
