//! Utility functions for CWT
//!
//! Kernel reshaping helpers and scalogram post-processing.

use ndarray::{Array1, Array2, ArrayView1, Zip};
use num_complex::Complex64;

/// Reverse a 1-D array in time
pub fn reverse<T: Clone>(arr: &ArrayView1<T>) -> Array1<T> {
    arr.iter().rev().cloned().collect()
}

/// Split a complex sequence into (real, imaginary) component arrays
pub fn split_complex(arr: &ArrayView1<Complex64>) -> (Array1<f64>, Array1<f64>) {
    (arr.mapv(|c| c.re), arr.mapv(|c| c.im))
}

/// Recombine component arrays into one complex sequence
///
/// Both arrays must have the same length.
pub fn combine_complex(re: &ArrayView1<f64>, im: &ArrayView1<f64>) -> Array1<Complex64> {
    Zip::from(re).and(im).map_collect(|&r, &i| Complex64::new(r, i))
}

/// Coefficient magnitudes |c|
pub fn magnitude(cwtmat: &Array2<Complex64>) -> Array2<f64> {
    cwtmat.mapv(|c| c.norm())
}

/// Coefficient power |c|^2
pub fn power(cwtmat: &Array2<Complex64>) -> Array2<f64> {
    cwtmat.mapv(|c| c.norm_sqr())
}

/// Convert complex CWT coefficients to dB scale
///
/// dB = 20 * log10(abs(cwt_coef) + epsilon)
pub fn to_db(cwtmat: &Array2<Complex64>, epsilon: f64) -> Array2<f64> {
    cwtmat.mapv(|c| 20.0 * (c.norm() + epsilon).log10())
}
