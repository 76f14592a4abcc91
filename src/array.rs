//! Dynamically typed arrays backed by `ndarray`
//!
//! `NdArray` holds one `ndarray::ArrayD` per supported dtype so the dtype of
//! a value is known at runtime, the same way the numeric backend sees it.

use crate::dtype::{DType, DTypeKind};
use crate::error::Result;
use ndarray::{Array1, ArrayD, IxDyn};
use num_complex::Complex;

// ============================================================================
// HasDType - dtype inspection
// ============================================================================

/// Anything that exposes an element dtype
pub trait HasDType {
    fn dtype(&self) -> DType;
}

impl HasDType for DType {
    fn dtype(&self) -> DType {
        *self
    }
}

impl<T: HasDType + ?Sized> HasDType for &T {
    fn dtype(&self) -> DType {
        (**self).dtype()
    }
}

/// True iff `x` has a floating point dtype
pub fn is_floating<T: HasDType + ?Sized>(x: &T) -> bool {
    x.dtype().kind() == DTypeKind::Float
}

/// True iff `x` has a complex dtype
pub fn is_complex<T: HasDType + ?Sized>(x: &T) -> bool {
    x.dtype().kind() == DTypeKind::Complex
}

/// True iff `x` has a boolean dtype
pub fn is_bool<T: HasDType + ?Sized>(x: &T) -> bool {
    x.dtype().kind() == DTypeKind::Bool
}

// ============================================================================
// Element - scalar element types
// ============================================================================

/// Widest representation of an element, used as the pivot for casts
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int(i128),
    Float(f64),
    Complex(Complex<f64>),
}

/// Scalar types that can be stored in an `NdArray`
pub trait Element: Copy + 'static {
    const DTYPE: DType;

    fn to_scalar(self) -> Scalar;

    fn from_scalar(value: Scalar) -> Self;

    fn wrap(array: ArrayD<Self>) -> NdArray;

    fn downcast(array: &NdArray) -> Option<&ArrayD<Self>>;
}

macro_rules! impl_element {
    ($ty:ty, $variant:ident, $to:expr, $from:expr) => {
        impl Element for $ty {
            const DTYPE: DType = DType::$variant;

            fn to_scalar(self) -> Scalar {
                $to(self)
            }

            fn from_scalar(value: Scalar) -> Self {
                $from(value)
            }

            fn wrap(array: ArrayD<Self>) -> NdArray {
                NdArray::$variant(array)
            }

            fn downcast(array: &NdArray) -> Option<&ArrayD<Self>> {
                match array {
                    NdArray::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

macro_rules! impl_int_element {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl_element!(
                $ty,
                $variant,
                |v: $ty| Scalar::Int(v as i128),
                |s: Scalar| match s {
                    Scalar::Bool(b) => b as $ty,
                    Scalar::Int(i) => i as $ty,
                    Scalar::Float(f) => f as $ty,
                    Scalar::Complex(c) => c.re as $ty,
                }
            );
        )*
    };
}

macro_rules! impl_float_element {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl_element!(
                $ty,
                $variant,
                |v: $ty| Scalar::Float(v as f64),
                |s: Scalar| match s {
                    Scalar::Bool(b) => if b { 1.0 } else { 0.0 },
                    Scalar::Int(i) => i as $ty,
                    Scalar::Float(f) => f as $ty,
                    Scalar::Complex(c) => c.re as $ty,
                }
            );
        )*
    };
}

macro_rules! impl_complex_element {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl_element!(
                Complex<$ty>,
                $variant,
                |v: Complex<$ty>| Scalar::Complex(Complex::new(v.re as f64, v.im as f64)),
                |s: Scalar| match s {
                    Scalar::Bool(b) => Complex::new(if b { 1.0 } else { 0.0 }, 0.0),
                    Scalar::Int(i) => Complex::new(i as $ty, 0.0),
                    Scalar::Float(f) => Complex::new(f as $ty, 0.0),
                    Scalar::Complex(c) => Complex::new(c.re as $ty, c.im as $ty),
                }
            );
        )*
    };
}

impl_element!(bool, Bool, Scalar::Bool, |s: Scalar| match s {
    Scalar::Bool(b) => b,
    Scalar::Int(i) => i != 0,
    Scalar::Float(f) => f != 0.0,
    Scalar::Complex(c) => c.re != 0.0 || c.im != 0.0,
});

impl_int_element!(
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
);

impl_float_element!(f32 => Float32, f64 => Float64);

impl_complex_element!(f32 => Complex64, f64 => Complex128);

// ============================================================================
// NdArray - runtime-typed array
// ============================================================================

/// N-dimensional array whose element dtype is chosen at runtime
#[derive(Debug, Clone, PartialEq)]
pub enum NdArray {
    Bool(ArrayD<bool>),
    Int8(ArrayD<i8>),
    Int16(ArrayD<i16>),
    Int32(ArrayD<i32>),
    Int64(ArrayD<i64>),
    UInt8(ArrayD<u8>),
    UInt16(ArrayD<u16>),
    UInt32(ArrayD<u32>),
    UInt64(ArrayD<u64>),
    Float32(ArrayD<f32>),
    Float64(ArrayD<f64>),
    Complex64(ArrayD<Complex<f32>>),
    Complex128(ArrayD<Complex<f64>>),
}

/// Apply the same expression to whichever `ArrayD` an `NdArray` holds
macro_rules! with_array {
    ($array:expr, $inner:ident => $body:expr) => {
        match $array {
            NdArray::Bool($inner) => $body,
            NdArray::Int8($inner) => $body,
            NdArray::Int16($inner) => $body,
            NdArray::Int32($inner) => $body,
            NdArray::Int64($inner) => $body,
            NdArray::UInt8($inner) => $body,
            NdArray::UInt16($inner) => $body,
            NdArray::UInt32($inner) => $body,
            NdArray::UInt64($inner) => $body,
            NdArray::Float32($inner) => $body,
            NdArray::Float64($inner) => $body,
            NdArray::Complex64($inner) => $body,
            NdArray::Complex128($inner) => $body,
        }
    };
}

pub(crate) use with_array;

impl NdArray {
    /// Build an array from a flat buffer, validating it against `shape`
    pub fn from_shape_vec<T: Element>(shape: &[usize], data: Vec<T>) -> Result<Self> {
        let array = ArrayD::from_shape_vec(IxDyn(shape), data)?;
        Ok(T::wrap(array))
    }

    /// 1-D array from a slice
    pub fn from_slice<T: Element>(data: &[T]) -> Self {
        T::wrap(Array1::from(data.to_vec()).into_dyn())
    }

    /// 0-d array holding `value` converted to `dtype`
    pub fn scalar(value: Scalar, dtype: DType) -> Self {
        fn fill<T: Element>(value: Scalar) -> NdArray {
            T::wrap(ArrayD::from_elem(IxDyn(&[]), T::from_scalar(value)))
        }
        match dtype {
            DType::Bool => fill::<bool>(value),
            DType::Int8 => fill::<i8>(value),
            DType::Int16 => fill::<i16>(value),
            DType::Int32 => fill::<i32>(value),
            DType::Int64 => fill::<i64>(value),
            DType::UInt8 => fill::<u8>(value),
            DType::UInt16 => fill::<u16>(value),
            DType::UInt32 => fill::<u32>(value),
            DType::UInt64 => fill::<u64>(value),
            DType::Float32 => fill::<f32>(value),
            DType::Float64 => fill::<f64>(value),
            DType::Complex64 => fill::<Complex<f32>>(value),
            DType::Complex128 => fill::<Complex<f64>>(value),
        }
    }

    pub fn shape(&self) -> &[usize] {
        with_array!(self, a => a.shape())
    }

    pub fn ndim(&self) -> usize {
        with_array!(self, a => a.ndim())
    }

    pub fn len(&self) -> usize {
        with_array!(self, a => a.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the typed storage if the dtype matches `T`
    pub fn as_array<T: Element>(&self) -> Option<&ArrayD<T>> {
        T::downcast(self)
    }

    /// Elements in logical order if the dtype matches `T`
    pub fn to_vec<T: Element>(&self) -> Option<Vec<T>> {
        self.as_array::<T>().map(|a| a.iter().copied().collect())
    }
}

impl HasDType for NdArray {
    fn dtype(&self) -> DType {
        match self {
            NdArray::Bool(_) => DType::Bool,
            NdArray::Int8(_) => DType::Int8,
            NdArray::Int16(_) => DType::Int16,
            NdArray::Int32(_) => DType::Int32,
            NdArray::Int64(_) => DType::Int64,
            NdArray::UInt8(_) => DType::UInt8,
            NdArray::UInt16(_) => DType::UInt16,
            NdArray::UInt32(_) => DType::UInt32,
            NdArray::UInt64(_) => DType::UInt64,
            NdArray::Float32(_) => DType::Float32,
            NdArray::Float64(_) => DType::Float64,
            NdArray::Complex64(_) => DType::Complex64,
            NdArray::Complex128(_) => DType::Complex128,
        }
    }
}

impl<T: Element> From<ArrayD<T>> for NdArray {
    fn from(array: ArrayD<T>) -> Self {
        T::wrap(array)
    }
}

// ============================================================================
// Operand - scalar-or-array function input
// ============================================================================

/// Function input that may still be a bare scalar
///
/// A bare `Float` reports float64 through [`HasDType`] whatever the context
/// default is; the scalar boxing wrappers in [`crate::coerce`] build it with
/// the current default dtype instead. Box before inspecting the dtype when
/// the two must agree.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand<A> {
    Float(f64),
    Int(i64),
    Array(A),
}

impl<A: HasDType> HasDType for Operand<A> {
    fn dtype(&self) -> DType {
        match self {
            Operand::Float(_) => DType::Float64,
            Operand::Int(_) => DType::Int64,
            Operand::Array(array) => array.dtype(),
        }
    }
}

impl<A> From<f64> for Operand<A> {
    fn from(value: f64) -> Self {
        Operand::Float(value)
    }
}

impl<A> From<i64> for Operand<A> {
    fn from(value: i64) -> Self {
        Operand::Int(value)
    }
}

impl From<NdArray> for Operand<NdArray> {
    fn from(array: NdArray) -> Self {
        Operand::Array(array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_shape_vec() {
        let array = NdArray::from_shape_vec(&[2, 3], vec![1.0f32; 6]).unwrap();
        assert_eq!(array.dtype(), DType::Float32);
        assert_eq!(array.shape(), &[2, 3]);
        assert_eq!(array.len(), 6);
        assert_eq!(array.ndim(), 2);
    }

    #[test]
    fn test_from_shape_vec_mismatch() {
        let err = NdArray::from_shape_vec(&[2, 2], vec![1i32, 2, 3]).unwrap_err();
        assert!(matches!(err, crate::error::DTypeError::Shape(_)));
    }

    #[test]
    fn test_scalar_is_zero_dimensional() {
        let array = NdArray::scalar(Scalar::Float(2.5), DType::Float32);
        assert_eq!(array.dtype(), DType::Float32);
        assert_eq!(array.ndim(), 0);
        assert_eq!(array.to_vec::<f32>(), Some(vec![2.5]));
    }

    #[test]
    fn test_typed_access() {
        let array = NdArray::from_slice(&[1i64, 2, 3]);
        assert_eq!(array.dtype(), <i64 as Element>::DTYPE);
        assert_eq!(array.to_vec::<i64>(), Some(vec![1, 2, 3]));
        assert!(array.as_array::<f64>().is_none());
    }

    #[test]
    fn test_operand_dtype() {
        let array: Operand<NdArray> = NdArray::from_slice(&[true, false]).into();
        assert_eq!(array.dtype(), DType::Bool);
        assert_eq!(Operand::<NdArray>::from(1.0).dtype(), DType::Float64);
        assert_eq!(Operand::<NdArray>::from(3i64).dtype(), DType::Int64);
    }

    #[test]
    fn test_element_scalar_conversions() {
        assert_eq!(u8::from_scalar(Scalar::Int(300)), 44);
        assert_eq!(i32::from_scalar(Scalar::Float(-2.7)), -2);
        assert!(bool::from_scalar(Scalar::Complex(Complex::new(0.0, 1.0))));
        assert_eq!(
            Complex::<f32>::from_scalar(Scalar::Float(1.5)),
            Complex::new(1.5f32, 0.0)
        );
    }
}
