//! # Rust Spectral - Fourier resampling and continuous wavelet transforms
//!
//! This library provides two frequency-domain transforms:
//! - [`resample`]: band-limited resampling of a real signal to any length by
//!   resizing its spectrum
//! - [`cwt`]: continuous wavelet transform against Ricker, Morlet and Paul
//!   kernels
//!
//! With the `python` feature the crate also builds the `_rust_spectral`
//! extension module.

pub mod fft;
pub mod convolve;
pub mod resample;
pub mod cwt;

pub use cwt::{cwt_by_name, ContinuousWavelet, CwtError, CwtOptions, Wavelet, WaveletFamily};
pub use resample::{resample_batch, FastResample, ResampleError};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module definition
#[cfg(feature = "python")]
#[pymodule]
fn _rust_spectral(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Resampling
    m.add_function(wrap_pyfunction!(resample::resample_py, m)?)?;
    m.add_function(wrap_pyfunction!(resample::resample_batch_py, m)?)?;

    // CWT
    m.add_function(wrap_pyfunction!(cwt::cwt_py, m)?)?;

    Ok(())
}
