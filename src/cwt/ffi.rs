//! Python FFI bindings for CWT
//!
//! Provides Python-callable functions using PyO3.

use num_complex::Complex64;
use numpy::{IntoPyArray, PyArray2, PyReadonlyArray1};
use pyo3::prelude::*;

use super::core::{cwt, CwtOptions};
use super::wavelets::Wavelet;
use crate::convolve::ConvolveMethod;

fn parse_method(method: &str) -> PyResult<ConvolveMethod> {
    match method.to_ascii_lowercase().as_str() {
        "auto" => Ok(ConvolveMethod::Auto),
        "direct" => Ok(ConvolveMethod::Direct),
        "fft" => Ok(ConvolveMethod::Fft),
        _ => Err(pyo3::exceptions::PyValueError::new_err(format!(
            "Invalid method: {} (expected 'auto', 'direct' or 'fft')",
            method
        ))),
    }
}

/// Python-callable CWT function
///
/// # Arguments
/// * `signal` - Input signal (1D numpy array)
/// * `widths` - Positive integer widths, one output row each
/// * `wavelet` - "ricker", "morlet" or "paul" (default: "ricker")
/// * `param` - Ignored for ricker, omega0 for morlet, order for paul
/// * `method` - Convolution method: "auto", "direct" or "fft"
/// * `parallel` - Compute scales in parallel (default: true)
///
/// # Returns
/// Complex coefficients, shape (len(widths), len(signal))
///
/// # Example (Python)
/// ```python
/// import _rust_spectral
/// import numpy as np
///
/// signal = np.sin(np.linspace(0, 10, 100))
/// coefs = _rust_spectral.cwt_py(signal, [1, 2, 4, 8], "morlet", 5.0)
/// ```
#[pyfunction]
#[pyo3(signature = (signal, widths, wavelet="ricker", param=0.0, method="auto", parallel=true))]
pub fn cwt_py<'py>(
    py: Python<'py>,
    signal: PyReadonlyArray1<f64>,
    widths: Vec<usize>,
    wavelet: &str,
    param: f64,
    method: &str,
    parallel: bool,
) -> PyResult<Bound<'py, PyArray2<Complex64>>> {
    let wavelet = Wavelet::from_name(wavelet, param)
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))?;
    let options = CwtOptions {
        method: parse_method(method)?,
        parallel,
    };

    let coefs = cwt(&signal.as_array(), &widths, wavelet, &options)
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(format!("CWT error: {}", e)))?;

    Ok(coefs.into_pyarray(py))
}
