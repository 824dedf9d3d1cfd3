//! End-to-end checks across the public API

use approx::assert_abs_diff_eq;
use ndarray::Array1;
use rust_spectral::cwt::{cwt, cwt_by_name, CwtError, CwtOptions, Wavelet};
use rust_spectral::resample::resample;
use rust_spectral::{ContinuousWavelet, FastResample, WaveletFamily};
use std::f64::consts::PI;

fn sine(n: usize, cycles: f64) -> Array1<f64> {
    Array1::from_shape_fn(n, |i| (2.0 * PI * cycles * i as f64 / n as f64).sin())
}

#[test]
fn resample_sine_up_and_back() {
    let signal = sine(128, 3.0);
    let up = resample(&signal.view(), 256).unwrap();
    assert_eq!(up.len(), 256);

    // Upsampled samples at even positions are the originals
    for i in 0..128 {
        assert_abs_diff_eq!(up[2 * i], signal[i], epsilon = 1e-9);
    }

    let back = FastResample::new(&up.view()).unwrap().resample(128).unwrap();
    let err: f64 = back
        .iter()
        .zip(signal.iter())
        .map(|(a, b)| (a - b).powi(2))
        .sum::<f64>()
        / 128.0;
    assert!(err.sqrt() < 0.01 / 2f64.sqrt());
}

#[test]
fn cwt_of_resampled_signal_keeps_shape() {
    // Upsample, then analyse: widths scale with the new rate
    let signal = sine(100, 4.0);
    let up = resample(&signal.view(), 200).unwrap();
    for family in ["ricker", "morlet", "paul"] {
        let param = if family == "paul" { 4.0 } else { 5.0 };
        let coefs = cwt_by_name(&up.view(), &[2, 4, 8], family, param).unwrap();
        assert_eq!(coefs.shape(), &[3, 200]);
    }
}

#[test]
fn morlet_energy_peaks_near_matching_width() {
    // omega0 / (2 pi width) cycles per sample matches the tone at width = 16
    let n = 512;
    let omega0 = 6.0;
    let width = 16.0;
    let freq = omega0 / (2.0 * PI * width);
    let signal = Array1::from_shape_fn(n, |i| (2.0 * PI * freq * i as f64).cos());

    let widths: Vec<usize> = vec![4, 8, 16, 32, 64];
    let coefs = cwt(&signal.view(), &widths, Wavelet::Morlet { omega0 }, &CwtOptions::default()).unwrap();

    let energy: Vec<f64> = (0..widths.len())
        .map(|i| coefs.row(i).slice(ndarray::s![128..384]).iter().map(|c| c.norm_sqr()).sum())
        .collect();
    let best = energy
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
        .map(|(i, _)| widths[i])
        .unwrap();
    assert_eq!(best, 16);
}

#[test]
fn unknown_family_fails_without_output() {
    let signal = sine(64, 2.0);
    match cwt_by_name(&signal.view(), &[1, 2, 3], "gaussian", 1.0) {
        Err(CwtError::UnknownWavelet(name)) => assert_eq!(name, "gaussian"),
        other => panic!("expected UnknownWavelet, got {:?}", other),
    }
}

#[test]
fn struct_interface_matches_free_function() {
    let signal = sine(80, 5.0);
    let transform = ContinuousWavelet::new(signal.clone(), vec![3, 1, 6]);
    let a = transform.cwt(WaveletFamily::Paul, 2.0).unwrap();
    let b = cwt(&signal.view(), &[3, 1, 6], Wavelet::Paul { order: 2 }, &CwtOptions::default()).unwrap();
    assert_eq!(a, b);
}
