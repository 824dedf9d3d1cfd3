//! Linear convolution of real sequences
//!
//! Supports numpy/scipy style output modes and either direct or
//! FFT-based evaluation.

use ndarray::{s, Array1, ArrayView1};
use num_complex::Complex64;

use crate::fft::{fft, ifft, next_fast_len, FftPlanCache};

/// Below this operand length direct evaluation beats the FFT round trip.
const AUTO_FFT_THRESHOLD: usize = 64;

/// Convolution errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvolveError {
    #[error("Cannot convolve empty input (signal length {signal}, kernel length {kernel})")]
    EmptyInput { signal: usize, kernel: usize },
}

/// Output length convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConvolveMode {
    /// Every point of overlap: `n + m - 1` samples
    Full,
    /// Same length as the signal, kernel centred
    #[default]
    Same,
    /// Only points where the operands overlap completely
    Valid,
}

/// Convolution evaluation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConvolveMethod {
    /// Direct summation, O(n * m)
    Direct,
    /// Zero-padded FFT multiplication
    Fft,
    /// FFT when both operands are long, direct otherwise
    #[default]
    Auto,
}

impl ConvolveMethod {
    /// Resolve `Auto` for the given operand lengths.
    pub fn resolve(self, signal_len: usize, kernel_len: usize) -> ConvolveMethod {
        match self {
            ConvolveMethod::Auto if signal_len.min(kernel_len) > AUTO_FFT_THRESHOLD => {
                ConvolveMethod::Fft
            }
            ConvolveMethod::Auto => ConvolveMethod::Direct,
            other => other,
        }
    }
}

/// FFT size used for a full linear convolution of the given lengths.
pub fn fft_conv_size(signal_len: usize, kernel_len: usize) -> usize {
    next_fast_len(signal_len + kernel_len - 1)
}

/// Offset and length of the requested mode inside the full convolution.
fn mode_window(mode: ConvolveMode, n: usize, m: usize) -> (usize, usize) {
    match mode {
        ConvolveMode::Full => (0, n + m - 1),
        ConvolveMode::Same => ((m - 1) / 2, n),
        ConvolveMode::Valid => (n.min(m) - 1, n.max(m) - n.min(m) + 1),
    }
}

/// Convolve `signal` with `kernel`.
///
/// # Arguments
/// * `signal` - Input sequence (length n)
/// * `kernel` - Kernel (length m), applied without reversal
/// * `mode` - Output window, see [`ConvolveMode`]
/// * `method` - Evaluation strategy
/// * `fft_cache` - Pre-computed FFT plans (optional)
///
/// In `Same` mode the output always has length n, also when the kernel is
/// longer than the signal.
pub fn convolve(
    signal: &ArrayView1<f64>,
    kernel: &ArrayView1<f64>,
    mode: ConvolveMode,
    method: ConvolveMethod,
    fft_cache: Option<&FftPlanCache>,
) -> Result<Array1<f64>, ConvolveError> {
    let n = signal.len();
    let m = kernel.len();
    if n == 0 || m == 0 {
        return Err(ConvolveError::EmptyInput { signal: n, kernel: m });
    }

    let (start, len) = mode_window(mode, n, m);

    let out = match method.resolve(n, m) {
        ConvolveMethod::Fft => {
            let full = convolve_fft(signal, kernel, fft_cache);
            full.slice(s![start..start + len]).to_owned()
        }
        _ => convolve_direct(signal, kernel, start, len),
    };

    Ok(out)
}

/// Direct convolution restricted to `start..start + len` of the full output.
fn convolve_direct(
    signal: &ArrayView1<f64>,
    kernel: &ArrayView1<f64>,
    start: usize,
    len: usize,
) -> Array1<f64> {
    let n = signal.len();
    let m = kernel.len();
    let mut result = Array1::zeros(len);

    for (out, i) in result.iter_mut().zip(start..start + len) {
        // Only kernel taps with 0 <= i - j < n contribute
        let j_lo = i.saturating_sub(n - 1);
        let j_hi = i.min(m - 1);
        let mut sum = 0.0;
        for j in j_lo..=j_hi {
            sum += signal[i - j] * kernel[j];
        }
        *out = sum;
    }

    result
}

/// Full linear convolution via FFT.
fn convolve_fft(
    signal: &ArrayView1<f64>,
    kernel: &ArrayView1<f64>,
    fft_cache: Option<&FftPlanCache>,
) -> Array1<f64> {
    let conv_len = signal.len() + kernel.len() - 1;
    let fft_size = fft_conv_size(signal.len(), kernel.len());

    let mut signal_padded = Array1::<Complex64>::zeros(fft_size);
    for (dst, &x) in signal_padded.iter_mut().zip(signal.iter()) {
        *dst = Complex64::new(x, 0.0);
    }
    let mut kernel_padded = Array1::<Complex64>::zeros(fft_size);
    for (dst, &x) in kernel_padded.iter_mut().zip(kernel.iter()) {
        *dst = Complex64::new(x, 0.0);
    }

    let signal_hat = fft(&signal_padded.view(), fft_cache);
    let kernel_hat = fft(&kernel_padded.view(), fft_cache);
    let product = &signal_hat * &kernel_hat;

    let time = ifft(&product.view(), fft_cache);
    time.iter().take(conv_len).map(|c| c.re).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::arr1;

    fn conv(signal: &[f64], kernel: &[f64], mode: ConvolveMode, method: ConvolveMethod) -> Vec<f64> {
        let signal = arr1(signal);
        let kernel = arr1(kernel);
        convolve(&signal.view(), &kernel.view(), mode, method, None)
            .unwrap()
            .to_vec()
    }

    #[test]
    fn test_full_mode() {
        let out = conv(&[1.0, 2.0, 3.0], &[0.0, 1.0, 0.5], ConvolveMode::Full, ConvolveMethod::Direct);
        assert_eq!(out, vec![0.0, 1.0, 2.5, 4.0, 1.5]);
    }

    #[test]
    fn test_same_mode_matches_numpy() {
        // numpy.convolve([1, 2, 3], [0, 1, 0.5], 'same') == [1, 2.5, 4]
        let out = conv(&[1.0, 2.0, 3.0], &[0.0, 1.0, 0.5], ConvolveMode::Same, ConvolveMethod::Direct);
        assert_eq!(out, vec![1.0, 2.5, 4.0]);
    }

    #[test]
    fn test_same_mode_even_kernel() {
        // full = [1, 3, 5, 7, 4], centred window starts at (2 - 1) / 2 = 0
        let out = conv(&[1.0, 2.0, 3.0, 4.0], &[1.0, 1.0], ConvolveMode::Same, ConvolveMethod::Direct);
        assert_eq!(out, vec![1.0, 3.0, 5.0, 7.0]);
    }

    #[test]
    fn test_same_mode_kernel_longer_than_signal() {
        let out = conv(&[1.0, 2.0], &[1.0, 0.0, 0.0, 0.0, 1.0], ConvolveMode::Same, ConvolveMethod::Direct);
        // full = [1, 2, 0, 0, 1, 2], window starts at 2
        assert_eq!(out, vec![0.0, 0.0]);
    }

    #[test]
    fn test_valid_mode() {
        let out = conv(&[1.0, 2.0, 3.0, 4.0], &[1.0, -1.0], ConvolveMode::Valid, ConvolveMethod::Direct);
        assert_eq!(out, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_fft_matches_direct() {
        let signal: Vec<f64> = (0..200).map(|i| ((i as f64) * 0.37).sin() + 0.1 * i as f64).collect();
        let kernel: Vec<f64> = (0..81).map(|i| (-((i as f64 - 40.0) / 12.0).powi(2)).exp()).collect();

        for mode in [ConvolveMode::Full, ConvolveMode::Same, ConvolveMode::Valid] {
            let direct = conv(&signal, &kernel, mode, ConvolveMethod::Direct);
            let fast = conv(&signal, &kernel, mode, ConvolveMethod::Fft);
            assert_eq!(direct.len(), fast.len());
            for (a, b) in direct.iter().zip(fast.iter()) {
                assert_abs_diff_eq!(a, b, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_auto_resolution() {
        assert_eq!(ConvolveMethod::Auto.resolve(1000, 10), ConvolveMethod::Direct);
        assert_eq!(ConvolveMethod::Auto.resolve(1000, 100), ConvolveMethod::Fft);
        assert_eq!(ConvolveMethod::Direct.resolve(1000, 100), ConvolveMethod::Direct);
    }

    #[test]
    fn test_empty_input() {
        let empty = Array1::<f64>::zeros(0);
        let kernel = arr1(&[1.0]);
        let err = convolve(&empty.view(), &kernel.view(), ConvolveMode::Same, ConvolveMethod::Auto, None)
            .unwrap_err();
        assert_eq!(err, ConvolveError::EmptyInput { signal: 0, kernel: 1 });
    }
}
