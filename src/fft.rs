//! FFT helpers shared by the resampler and the convolution operator
//!
//! Thin wrappers over `rustfft` plus a read-only plan cache that can be
//! shared across threads.

use ndarray::{Array1, ArrayView1};
use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use std::collections::HashMap;
use std::sync::Arc;

/// FFT plan cache: size -> (forward, inverse)
///
/// Arc allows zero-cost sharing across rayon workers.
pub type FftPlanCache = Arc<HashMap<usize, (Arc<dyn Fft<f64>>, Arc<dyn Fft<f64>>)>>;

/// Plan forward and inverse transforms for every requested size.
pub fn build_plan_cache<I>(sizes: I) -> FftPlanCache
where
    I: IntoIterator<Item = usize>,
{
    let mut planner = FftPlanner::new();
    let mut cache = HashMap::new();
    for size in sizes {
        cache.entry(size).or_insert_with(|| {
            (
                planner.plan_fft_forward(size),
                planner.plan_fft_inverse(size),
            )
        });
    }
    Arc::new(cache)
}

fn forward_plan(n: usize, fft_cache: Option<&FftPlanCache>) -> Arc<dyn Fft<f64>> {
    match fft_cache.and_then(|cache| cache.get(&n)) {
        Some((plan, _)) => Arc::clone(plan),
        // Size not cached (or no cache): plan on demand
        None => FftPlanner::new().plan_fft_forward(n),
    }
}

fn inverse_plan(n: usize, fft_cache: Option<&FftPlanCache>) -> Arc<dyn Fft<f64>> {
    match fft_cache.and_then(|cache| cache.get(&n)) {
        Some((_, plan)) => Arc::clone(plan),
        None => FftPlanner::new().plan_fft_inverse(n),
    }
}

/// Promote a real signal to complex with zero imaginary part.
pub fn real_to_complex(signal: &ArrayView1<f64>) -> Array1<Complex64> {
    signal.mapv(|x| Complex64::new(x, 0.0))
}

/// Forward FFT (unnormalised).
///
/// Returns the full spectrum, not the conjugate-reduced half.
pub fn fft(input: &ArrayView1<Complex64>, fft_cache: Option<&FftPlanCache>) -> Array1<Complex64> {
    let mut buffer = input.to_vec();
    if !buffer.is_empty() {
        forward_plan(buffer.len(), fft_cache).process(&mut buffer);
    }
    Array1::from_vec(buffer)
}

/// Inverse FFT, normalised by `1/n` so that `ifft(fft(x)) == x`.
pub fn ifft(input: &ArrayView1<Complex64>, fft_cache: Option<&FftPlanCache>) -> Array1<Complex64> {
    let n = input.len();
    let mut buffer = input.to_vec();
    if n == 0 {
        return Array1::from_vec(buffer);
    }
    inverse_plan(n, fft_cache).process(&mut buffer);

    let norm = 1.0 / n as f64;
    for x in &mut buffer {
        *x *= norm;
    }

    Array1::from_vec(buffer)
}

/// Compute next power of 2 (for FFT convolution sizes)
pub fn next_fast_len(n: usize) -> usize {
    n.max(1).next_power_of_two()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_next_fast_len() {
        assert_eq!(next_fast_len(0), 1);
        assert_eq!(next_fast_len(1), 1);
        assert_eq!(next_fast_len(100), 128);
        assert_eq!(next_fast_len(128), 128);
        assert_eq!(next_fast_len(129), 256);
    }

    #[test]
    fn test_fft_ifft_inverse() {
        let input = Array1::from_vec(vec![
            Complex64::new(1.0, 0.0),
            Complex64::new(2.0, 0.0),
            Complex64::new(3.0, 0.0),
            Complex64::new(4.0, 0.0),
        ]);

        let freq = fft(&input.view(), None);
        let reconstructed = ifft(&freq.view(), None);

        for i in 0..input.len() {
            assert_relative_eq!(reconstructed[i].re, input[i].re, epsilon = 1e-10);
            assert_relative_eq!(reconstructed[i].im, input[i].im, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_real_spectrum_is_hermitian() {
        let signal = Array1::from_vec(vec![0.5, -1.0, 2.0, 3.5, -0.25, 1.0, 0.0]);
        let spectrum = fft(&real_to_complex(&signal.view()).view(), None);
        let n = spectrum.len();
        for k in 1..n {
            assert_relative_eq!(spectrum[k].re, spectrum[n - k].re, epsilon = 1e-10);
            assert_relative_eq!(spectrum[k].im, -spectrum[n - k].im, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_cached_plans_match_on_demand() {
        let cache = build_plan_cache([8, 8, 16]);
        assert_eq!(cache.len(), 2);

        let input: Array1<Complex64> = (0..8).map(|i| Complex64::new(i as f64, 0.5)).collect();
        let cached = fft(&input.view(), Some(&cache));
        let fresh = fft(&input.view(), None);
        for (a, b) in cached.iter().zip(fresh.iter()) {
            assert_relative_eq!(a.re, b.re, epsilon = 1e-12);
            assert_relative_eq!(a.im, b.im, epsilon = 1e-12);
        }
    }
}
