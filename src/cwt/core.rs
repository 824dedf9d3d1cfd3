//! Core CWT algorithm implementation
//!
//! Convolves the signal against one scaled mother-wavelet kernel per width
//! and stacks the results into a (num_scales, signal_length) scalogram.

use ndarray::{Array1, Array2, ArrayView1};
use num_complex::Complex64;
use rayon::prelude::*;

use super::utils::{combine_complex, reverse, split_complex};
use super::wavelets::{morlet_complex, ricker, PaulKernel, Wavelet, WaveletFamily};
use crate::convolve::{convolve, fft_conv_size, ConvolveError, ConvolveMethod, ConvolveMode};
use crate::fft::{build_plan_cache, FftPlanCache};

/// CWT errors
#[derive(Debug, thiserror::Error)]
pub enum CwtError {
    #[error("Unknown wavelet family: '{0}' (expected 'ricker', 'morlet' or 'paul')")]
    UnknownWavelet(String),

    #[error("Signal is empty")]
    EmptySignal,

    #[error("Invalid scale at index {index}: {value} (widths must be positive)")]
    InvalidScale { index: usize, value: usize },

    #[error("Invalid parameter: {name} = {value}")]
    InvalidParameter { name: String, value: String },

    #[error("Convolution failed: {0}")]
    Convolution(#[from] ConvolveError),
}

/// CWT computation options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CwtOptions {
    /// How each kernel is convolved against the signal
    pub method: ConvolveMethod,
    /// Compute rows in parallel across scales (rayon)
    pub parallel: bool,
}

impl Default for CwtOptions {
    fn default() -> Self {
        Self {
            method: ConvolveMethod::Auto,
            parallel: true,
        }
    }
}

/// Convolve a real signal with a complex kernel, one component at a time
fn convolve_components(
    signal: &ArrayView1<f64>,
    kernel: &ArrayView1<Complex64>,
    method: ConvolveMethod,
    fft_cache: Option<&FftPlanCache>,
) -> Result<Array1<Complex64>, CwtError> {
    let (kernel_re, kernel_im) = split_complex(kernel);
    let re = convolve(signal, &kernel_re.view(), ConvolveMode::Same, method, fft_cache)?;
    let im = convolve(signal, &kernel_im.view(), ConvolveMode::Same, method, fft_cache)?;
    Ok(combine_complex(&re.view(), &im.view()))
}

/// A wavelet with every width-independent factor already evaluated
#[derive(Debug, Clone, Copy)]
enum PreparedWavelet {
    Ricker,
    Morlet { omega0: f64 },
    Paul(PaulKernel),
}

impl PreparedWavelet {
    fn new(wavelet: Wavelet) -> Result<Self, CwtError> {
        Ok(match wavelet {
            Wavelet::Ricker => PreparedWavelet::Ricker,
            Wavelet::Morlet { omega0 } => PreparedWavelet::Morlet { omega0 },
            Wavelet::Paul { order } => PreparedWavelet::Paul(PaulKernel::new(order)?),
        })
    }

    fn row(
        &self,
        signal: &ArrayView1<f64>,
        width: usize,
        kernel_len: usize,
        method: ConvolveMethod,
        fft_cache: Option<&FftPlanCache>,
    ) -> Result<Array1<Complex64>, CwtError> {
        let w = width as f64;

        match self {
            PreparedWavelet::Ricker => {
                let kernel = reverse(&ricker(kernel_len, w).view());
                let row = convolve(signal, &kernel.view(), ConvolveMode::Same, method, fft_cache)?;
                Ok(row.mapv(|x| Complex64::new(x, 0.0)))
            }
            PreparedWavelet::Morlet { omega0 } => {
                let kernel = morlet_complex(kernel_len, *omega0, w).mapv(|c| c.conj());
                let kernel = reverse(&kernel.view());
                convolve_components(signal, &kernel.view(), method, fft_cache)
            }
            PreparedWavelet::Paul(paul) => {
                // Causal kernel: applied as generated, only normalised
                let norm = (1.0 / w).sqrt();
                let kernel = paul.sample(width, w).mapv(|c| c * norm);
                convolve_components(signal, &kernel.view(), method, fft_cache)
            }
        }
    }
}

/// Compute CWT for a single width
///
/// # Arguments
/// * `signal` - Input signal
/// * `width` - Current width (scale), must be positive
/// * `wavelet` - Mother wavelet with resolved shape parameter
/// * `method` - Convolution method
/// * `fft_cache` - Pre-computed FFT plans (optional, for performance)
///
/// # Algorithm
/// - Ricker: real kernel, reversed, convolved, promoted to complex
/// - Morlet: kernel conjugated and reversed, components convolved separately
/// - Paul: kernel scaled by sqrt(1/width), components convolved separately
///
/// The returned row always has the signal's length.
pub fn cwt_single_scale(
    signal: &ArrayView1<f64>,
    width: usize,
    wavelet: Wavelet,
    method: ConvolveMethod,
    fft_cache: Option<&FftPlanCache>,
) -> Result<Array1<Complex64>, CwtError> {
    let kernel_len = wavelet.kernel_len(width, signal.len());
    PreparedWavelet::new(wavelet)?.row(signal, width, kernel_len, method, fft_cache)
}

fn validate(signal: &ArrayView1<f64>, widths: &[usize]) -> Result<(), CwtError> {
    if signal.is_empty() {
        return Err(CwtError::EmptySignal);
    }
    if let Some(index) = widths.iter().position(|&w| w == 0) {
        return Err(CwtError::InvalidScale { index, value: 0 });
    }
    Ok(())
}

/// Plan every FFT size the FFT-convolved rows will need.
fn plan_cache_for(
    signal_len: usize,
    widths: &[usize],
    wavelet: Wavelet,
    method: ConvolveMethod,
) -> Option<FftPlanCache> {
    let sizes: Vec<usize> = widths
        .iter()
        .map(|&w| wavelet.kernel_len(w, signal_len))
        .filter(|&len| method.resolve(signal_len, len) == ConvolveMethod::Fft)
        .map(|len| fft_conv_size(signal_len, len))
        .collect();

    if sizes.is_empty() {
        None
    } else {
        Some(build_plan_cache(sizes))
    }
}

/// Compute the CWT for multiple widths
///
/// Rows correspond 1:1 and in order to `widths`. Each row is independent, so
/// with `options.parallel` they are computed on the rayon pool.
///
/// # Returns
/// 2D array of shape (num_widths, signal_length) containing CWT coefficients
///
/// # Errors
/// Fails before any numeric work on an empty signal or a zero width; a
/// failure for any single width fails the whole call.
pub fn cwt(
    signal: &ArrayView1<f64>,
    widths: &[usize],
    wavelet: Wavelet,
    options: &CwtOptions,
) -> Result<Array2<Complex64>, CwtError> {
    validate(signal, widths)?;
    let prepared = PreparedWavelet::new(wavelet)?;

    let n = signal.len();
    let n_scales = widths.len();
    let fft_cache = plan_cache_for(n, widths, wavelet, options.method);

    log::debug!(
        "cwt: {} widths x {} samples, wavelet={:?}, method={:?}, cached fft sizes={}",
        n_scales,
        n,
        wavelet,
        options.method,
        fft_cache.as_ref().map_or(0, |cache| cache.len())
    );

    let row = |i: usize, width: usize| {
        log::trace!("cwt: width {} ({}/{})", width, i + 1, n_scales);
        let kernel_len = wavelet.kernel_len(width, n);
        prepared.row(signal, width, kernel_len, options.method, fft_cache.as_ref())
    };

    // Both collects keep input order
    let rows: Vec<Array1<Complex64>> = if options.parallel {
        widths
            .par_iter()
            .enumerate()
            .map(|(i, &w)| row(i, w))
            .collect::<Result<Vec<_>, CwtError>>()?
    } else {
        widths
            .iter()
            .enumerate()
            .map(|(i, &w)| row(i, w))
            .collect::<Result<Vec<_>, CwtError>>()?
    };

    let mut result = Array2::zeros((n_scales, n));
    for (i, r) in rows.iter().enumerate() {
        result.row_mut(i).assign(r);
    }

    Ok(result)
}

/// CWT by family name and untyped shape parameter
///
/// `shape_parameter` is ignored for "ricker", `omega0` for "morlet" and the
/// integer order for "paul". Unknown names fail before any computation.
pub fn cwt_by_name(
    signal: &ArrayView1<f64>,
    widths: &[usize],
    family: &str,
    shape_parameter: f64,
) -> Result<Array2<Complex64>, CwtError> {
    let wavelet = Wavelet::from_name(family, shape_parameter)?;
    cwt(signal, widths, wavelet, &CwtOptions::default())
}

/// A signal together with the widths it is analysed at
#[derive(Debug, Clone)]
pub struct ContinuousWavelet {
    signal: Array1<f64>,
    widths: Vec<usize>,
}

impl ContinuousWavelet {
    pub fn new(signal: Array1<f64>, widths: Vec<usize>) -> Self {
        Self { signal, widths }
    }

    pub fn signal(&self) -> &Array1<f64> {
        &self.signal
    }

    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    /// Transform with the given family and shape parameter
    pub fn cwt(&self, family: WaveletFamily, shape_parameter: f64) -> Result<Array2<Complex64>, CwtError> {
        let wavelet = Wavelet::from_family(family, shape_parameter)?;
        self.cwt_with(wavelet, &CwtOptions::default())
    }

    pub fn cwt_with(&self, wavelet: Wavelet, options: &CwtOptions) -> Result<Array2<Complex64>, CwtError> {
        cwt(&self.signal.view(), &self.widths, wavelet, options)
    }
}
