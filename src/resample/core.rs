//! Spectral (Fourier) resampling
//!
//! Re-sizes the full DFT of a real signal to the target length, keeping the
//! spectrum Hermitian, and transforms back. Equivalent to band-limited
//! interpolation of a periodic signal.

use ndarray::{s, Array1, ArrayView1};
use num_complex::Complex64;
use rayon::prelude::*;

use crate::fft::{fft, ifft, real_to_complex};

/// Resampling errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResampleError {
    #[error("Cannot resample an empty signal")]
    EmptySignal,

    #[error("Invalid target length: {0} (must be at least 1)")]
    InvalidTargetLength(usize),
}

/// Re-size a full spectrum of length N to `target` bins
///
/// With `N' = min(target, N)`, the lowest `ceil(N'/2)` bins are copied to
/// the start and the highest `floor(N'/2)` bins to the end; the middle stays
/// zero. For even `N'` the Nyquist bin is fixed up:
/// - downsampling: the dropped positive-frequency bin `N'/2` is folded into
///   the new Nyquist bin
/// - oversampling: the source Nyquist bin is halved once and placed at both
///   `N'/2` and `target - N'/2`
///
/// An empty spectrum resizes to `target` zero bins.
pub fn resize_spectrum(spectrum: &ArrayView1<Complex64>, target: usize) -> Array1<Complex64> {
    let n = spectrum.len();
    let kept = target.min(n);
    if kept == 0 {
        return Array1::zeros(target);
    }
    let low = kept.div_ceil(2);
    let high = kept / 2;

    let mut resized = Array1::<Complex64>::zeros(target);
    resized.slice_mut(s![..low]).assign(&spectrum.slice(s![..low]));
    resized
        .slice_mut(s![target - high..])
        .assign(&spectrum.slice(s![n - high..]));

    if kept % 2 == 0 {
        let nyquist = kept / 2;
        if kept < n {
            resized[nyquist] += spectrum[nyquist];
        } else if kept < target {
            let mirror = target - nyquist;
            let half = resized[mirror] / 2.0;
            resized[mirror] = half;
            resized[nyquist] = half;
        }
    }

    resized
}

/// Fourier resampler over a fixed input signal
#[derive(Debug, Clone)]
pub struct FastResample {
    signal: Array1<f64>,
}

impl FastResample {
    /// Copy the signal; it must hold at least one sample.
    pub fn new(signal: &ArrayView1<f64>) -> Result<Self, ResampleError> {
        if signal.is_empty() {
            return Err(ResampleError::EmptySignal);
        }
        Ok(Self {
            signal: signal.to_owned(),
        })
    }

    /// Number of samples in the input signal
    pub fn signal_len(&self) -> usize {
        self.signal.len()
    }

    /// Resample to exactly `target_samples` samples
    ///
    /// # Algorithm
    /// 1. Full forward FFT of the signal (length N)
    /// 2. Re-size the spectrum to M bins (see [`resize_spectrum`])
    /// 3. Inverse FFT of size M (normalised by 1/M)
    /// 4. Scale the real part by M/N
    pub fn resample(&self, target_samples: usize) -> Result<Array1<f64>, ResampleError> {
        if target_samples == 0 {
            return Err(ResampleError::InvalidTargetLength(target_samples));
        }
        let n = self.signal.len();

        log::debug!("resample: {} -> {} samples", n, target_samples);

        let spectrum = fft(&real_to_complex(&self.signal.view()).view(), None);
        let resized = resize_spectrum(&spectrum.view(), target_samples);
        let time = ifft(&resized.view(), None);

        let scale = target_samples as f64 / n as f64;
        Ok(time.mapv(|c| c.re * scale))
    }
}

/// Resample `signal` to `target_samples` samples
///
/// # Example
/// ```
/// use ndarray::Array1;
/// use rust_spectral::resample::resample;
///
/// let signal = Array1::from_vec(vec![0.0, 1.0, 0.0, -1.0]);
/// let up = resample(&signal.view(), 8).unwrap();
/// assert_eq!(up.len(), 8);
/// assert!((up[2] - 1.0).abs() < 1e-12);
/// ```
pub fn resample(signal: &ArrayView1<f64>, target_samples: usize) -> Result<Array1<f64>, ResampleError> {
    FastResample::new(signal)?.resample(target_samples)
}

/// Resample independent signals in parallel (rayon)
///
/// Output order follows input order; any invalid signal fails the batch.
pub fn resample_batch(
    signals: &[Array1<f64>],
    target_samples: usize,
) -> Result<Vec<Array1<f64>>, ResampleError> {
    if target_samples == 0 {
        return Err(ResampleError::InvalidTargetLength(target_samples));
    }

    log::debug!("resample_batch: {} signals -> {} samples", signals.len(), target_samples);

    signals
        .par_iter()
        .map(|signal| resample(&signal.view(), target_samples))
        .collect()
}
