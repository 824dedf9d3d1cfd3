//! Python FFI bindings for spectral resampling
//!
//! Provides Python-callable functions using PyO3.

use numpy::{IntoPyArray, PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;

use super::core::{resample, resample_batch};

/// Resample a signal to `target_samples` samples in the Fourier domain
///
/// # Arguments
/// * `signal` - Input signal (1D numpy array, at least one sample)
/// * `target_samples` - Output length (>= 1)
///
/// # Example (Python)
/// ```python
/// import _rust_spectral
/// import numpy as np
///
/// x = np.sin(np.linspace(0, 2 * np.pi, 128, endpoint=False))
/// y = _rust_spectral.resample_py(x, 256)
/// ```
#[pyfunction]
pub fn resample_py<'py>(
    py: Python<'py>,
    signal: PyReadonlyArray1<f64>,
    target_samples: usize,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let out = resample(&signal.as_array(), target_samples)
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(format!("resample error: {}", e)))?;

    Ok(out.into_pyarray(py))
}

/// Resample many signals to the same length (Rayon parallel)
///
/// # Returns
/// List of resampled arrays, in input order
#[pyfunction]
pub fn resample_batch_py<'py>(
    py: Python<'py>,
    signals: Vec<PyReadonlyArray1<f64>>,
    target_samples: usize,
) -> PyResult<Vec<Bound<'py, PyArray1<f64>>>> {
    // Copy out of numpy before handing the data to worker threads
    let owned: Vec<_> = signals.iter().map(|s| s.as_array().to_owned()).collect();

    let results = resample_batch(&owned, target_samples)
        .map_err(|e| pyo3::exceptions::PyValueError::new_err(format!("resample error: {}", e)))?;

    Ok(results.into_iter().map(|r| r.into_pyarray(py)).collect())
}
