mod common;

use geomdtype::backend::ndarray as nd;
use geomdtype::coerce;
use geomdtype::prelude::*;
use geomdtype::{DTypeConfig, Scalar};
use num_complex::Complex;
use rstest::rstest;

fn linspace(n: usize, dtype: Option<DType>) -> Result<NdArray> {
    let values: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let out = NdArray::from_slice(&values);
    match dtype {
        Some(dtype) => nd::cast(&out, dtype),
        None => Ok(out),
    }
}

#[test]
fn test_set_default_dtype_reaches_existing_wrappers() {
    common::setup();
    let ctx = DTypeContext::default();
    let ones = nd::add_default_dtype_by_casting(&ctx, |n: usize| {
        Ok(NdArray::from_slice(&vec![1.0f64; n]))
    });

    assert_eq!(ones(2, None).unwrap().dtype(), DType::Float64);
    assert_eq!(nd::set_default_dtype(&ctx, "float32"), Ok(DType::Float32));
    assert_eq!(ones(2, None).unwrap().dtype(), DType::Float32);
    assert_eq!(ones(2, Some(DType::Int16)).unwrap().dtype(), DType::Int16);
}

#[rstest]
#[case("int32")]
#[case("complex64")]
#[case("bool")]
fn test_set_default_dtype_rejects_non_float(#[case] name: &str) {
    let ctx = DTypeContext::default();
    let err = nd::set_default_dtype(&ctx, name).unwrap_err();
    assert!(matches!(err, DTypeError::InvalidDefaultDType(_)));
    assert_eq!(ctx.get_default_dtype(), DType::Float64);
}

#[test]
fn test_set_default_dtype_unknown_name() {
    let ctx = DTypeContext::default();
    assert_eq!(
        nd::set_default_dtype(&ctx, "half"),
        Err(DTypeError::UnknownDType("half".to_string()))
    );
}

#[rstest]
#[case(DType::Float32, DType::Float32)]
#[case(DType::Float64, DType::Float64)]
#[case(DType::Int32, DType::Float64)]
fn test_cast_fout_to_input_dtype(#[case] input: DType, #[case] expected: DType) {
    let mean = nd::cast_fout_to_input_dtype(common::float64_mean);
    let x = nd::cast(&NdArray::from_slice(&[1.0f64, 2.0, 4.0]), input).unwrap();
    let out = mean(&x, ()).unwrap();
    assert_eq!(out.dtype(), expected);
}

#[test]
fn test_cast_fout_keeps_values() {
    let mean = nd::cast_fout_to_input_dtype(common::float64_mean);
    let x = NdArray::from_slice(&[1.0f32, 2.0]);
    let out = mean(&x, ()).unwrap();
    assert_eq!(out.to_vec::<f32>(), Some(vec![1.5]));
}

type Op = fn(&NdArray, ()) -> Result<NdArray>;

fn to_complex128(x: &NdArray, _: ()) -> Result<NdArray> {
    nd::cast(x, DType::Complex128)
}

fn to_float64(x: &NdArray, _: ()) -> Result<NdArray> {
    nd::cast(x, DType::Float64)
}

#[rstest]
#[case(DType::Float32, to_float64 as Op, DType::Float32)]
#[case(DType::Complex64, to_float64 as Op, DType::Float32)]
#[case(DType::Float32, to_complex128 as Op, DType::Complex64)]
#[case(DType::Complex64, to_complex128 as Op, DType::Complex64)]
#[case(DType::Float64, to_complex128 as Op, DType::Complex128)]
#[case(DType::Int64, to_float64 as Op, DType::Float64)]
#[case(DType::Bool, to_complex128 as Op, DType::Complex128)]
fn test_cast_out_to_input_dtype(
    #[case] input: DType,
    #[case] func: Op,
    #[case] expected: DType,
) {
    let wrapped = nd::cast_out_to_input_dtype(func);
    let x = NdArray::scalar(Scalar::Float(0.5), input);
    assert_eq!(wrapped(&x, ()).unwrap().dtype(), expected);
}

#[test]
fn test_cast_out_from_dtype_follows_default() {
    let ctx = DTypeContext::default();
    let solve = nd::cast_out_from_dtype(&ctx, &[DType::Float64, DType::Complex128], |c: bool| {
        if c {
            Ok(NdArray::from_slice(&[Complex::new(1.0f64, 2.0)]))
        } else {
            Ok(NdArray::from_slice(&[1.0f64]))
        }
    });

    assert_eq!(solve(false).unwrap().dtype(), DType::Float64);
    ctx.set_default_dtype(DType::Float32).unwrap();
    assert_eq!(solve(false).unwrap().dtype(), DType::Float32);
    assert_eq!(
        solve(true).unwrap().to_vec::<Complex<f32>>(),
        Some(vec![Complex::new(1.0f32, 2.0)])
    );
}

#[test]
fn test_cast_out_from_dtype_ignores_unlisted() {
    let ctx = DTypeContext::new(DTypeConfig::new(DType::Float32).unwrap());
    let identity = nd::cast_out_from_dtype(&ctx, &[DType::Float64], |x: NdArray| Ok(x));
    let x = NdArray::from_slice(&[1i32, 2]);
    assert_eq!(identity(x.clone()).unwrap(), x);
}

#[rstest]
#[case(None, DType::Float64)]
#[case(Some(DType::Float32), DType::Float32)]
#[case(Some(DType::Complex64), DType::Complex64)]
#[case(Some(DType::Complex128), DType::Complex128)]
fn test_allow_complex_dtype(#[case] requested: Option<DType>, #[case] expected: DType) {
    let wrapped = nd::allow_complex_dtype(linspace);
    let out = wrapped(4, requested).unwrap();
    assert_eq!(out.dtype(), expected);
    assert_eq!(out.len(), 4);
}

#[test]
fn test_allow_complex_dtype_keeps_precision() {
    let seen = std::cell::Cell::new(None);
    let wrapped = nd::allow_complex_dtype(|n: usize, dtype: Option<DType>| {
        seen.set(dtype);
        linspace(n, dtype)
    });
    wrapped(2, Some(DType::Complex128)).unwrap();
    assert_eq!(seen.get(), Some(DType::Float64));
    wrapped(2, Some(DType::Complex64)).unwrap();
    assert_eq!(seen.get(), Some(DType::Float32));
}

/// Backend that can only produce complex128
struct DoubleComplexOnly;

impl DTypeBackend for DoubleComplexOnly {
    type Array = NdArray;

    const NAME: &'static str = "double-complex-only";

    fn cast(array: &NdArray, dtype: DType) -> Result<NdArray> {
        nd::cast(array, dtype)
    }

    fn as_dtype(value: &str) -> Result<DType> {
        NdarrayBackend::as_dtype(value)
    }

    fn dtype_as_str(dtype: DType) -> &'static str {
        dtype.name()
    }

    fn complex_dtypes() -> &'static [DType] {
        &[DType::Complex128]
    }

    fn scalar(value: Scalar, dtype: DType) -> Result<NdArray> {
        NdarrayBackend::scalar(value, dtype)
    }
}

#[test]
fn test_allow_complex_dtype_rejects_unlisted_complex() {
    let wrapped = coerce::allow_complex_dtype::<DoubleComplexOnly, _, _>(linspace);
    assert_eq!(
        wrapped(3, Some(DType::Complex64)),
        Err(DTypeError::UnsupportedDType {
            backend: "double-complex-only",
            dtype: DType::Complex64,
        })
    );
    assert_eq!(
        wrapped(3, Some(DType::Complex128)).unwrap().dtype(),
        DType::Complex128
    );
}

#[test]
fn test_cast_out_to_input_dtype_rejects_unlisted_complex() {
    let wrapped = coerce::cast_out_to_input_dtype::<DoubleComplexOnly, _, _>(to_complex128);

    let x = NdArray::from_slice(&[0.5f32]);
    assert_eq!(
        wrapped(&x, ()),
        Err(DTypeError::UnsupportedDType {
            backend: "double-complex-only",
            dtype: DType::Complex64,
        })
    );

    let x = NdArray::from_slice(&[0.5f64]);
    assert_eq!(wrapped(&x, ()).unwrap().dtype(), DType::Complex128);
}

#[test]
fn test_with_default_dtype_resolves_at_call_time() {
    let ctx = DTypeContext::default();
    let eye = nd::with_default_dtype(&ctx, DefaultTarget::Complex, |n: usize, dtype: DType| {
        (n, dtype)
    });
    assert_eq!(eye(3, None), (3, DType::Complex128));
    ctx.set_default_dtype(DType::Float32).unwrap();
    assert_eq!(eye(3, None), (3, DType::Complex64));
    assert_eq!(eye(3, Some(DType::Float64)), (3, DType::Float64));
}

#[test]
fn test_box_unary_scalar() {
    let ctx = DTypeContext::new(DTypeConfig::new(DType::Float32).unwrap());
    let dtype_of = nd::box_unary_scalar(&ctx, |x: NdArray| Ok(x.dtype()));
    assert_eq!(dtype_of(Operand::Float(1.0)).unwrap(), DType::Float32);
    assert_eq!(dtype_of(Operand::Int(1)).unwrap(), DType::Int64);
    let array = NdArray::from_slice(&[1u8]);
    assert_eq!(dtype_of(Operand::Array(array)).unwrap(), DType::UInt8);
}

#[test]
fn test_bare_float_dtype_differs_from_boxed() {
    let ctx = DTypeContext::new(DTypeConfig::new(DType::Float32).unwrap());
    let bare: Operand<NdArray> = Operand::Float(2.0);
    assert_eq!(bare.dtype(), DType::Float64);

    let dtype_of = nd::box_unary_scalar(&ctx, |x: NdArray| Ok(x.dtype()));
    assert_eq!(dtype_of(bare).unwrap(), DType::Float32);
}

#[test]
fn test_box_binary_scalar() {
    let ctx = DTypeContext::default();
    let add = nd::box_binary_scalar(&ctx, |a: NdArray, b: NdArray| {
        let a = nd::cast(&a, DType::Float64)?.to_vec::<f64>().unwrap_or_default();
        let b = nd::cast(&b, DType::Float64)?.to_vec::<f64>().unwrap_or_default();
        Ok(a.iter().zip(&b).map(|(x, y)| x + y).collect::<Vec<_>>())
    });
    let sum = add(Operand::Float(0.25), Operand::Int(2)).unwrap();
    assert!(common::vec_approx_eq(&sum, &[2.25]));
}

#[test]
fn test_wrapped_errors_propagate() {
    let failing = nd::cast_out_to_input_dtype(|_: &NdArray, _: ()| {
        Err(DTypeError::Shape("bad input".to_string()))
    });
    let x = NdArray::from_slice(&[1.0f32]);
    assert_eq!(
        failing(&x, ()),
        Err(DTypeError::Shape("bad input".to_string()))
    );
}
