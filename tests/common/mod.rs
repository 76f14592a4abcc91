//! Common test utilities for the dtype integration tests

#![allow(dead_code)]

use geomdtype::NdArray;

pub const EPSILON: f64 = 1e-6;

pub fn setup() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

pub fn vec_approx_eq(a: &[f64], b: &[f64]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).all(|(x, y)| approx_eq(*x, *y))
}

/// Stand-in for a routine that always answers in float64
pub fn float64_mean(x: &NdArray, _: ()) -> geomdtype::Result<NdArray> {
    let values = geomdtype::cast(x, geomdtype::DType::Float64)?
        .to_vec::<f64>()
        .unwrap_or_default();
    let mean = values.iter().sum::<f64>() / values.len().max(1) as f64;
    Ok(NdArray::from_slice(&[mean]))
}
