//! # CWT (Continuous Wavelet Transform) Module
//!
//! Scalograms against Ricker, Morlet and Paul mother wavelets, computed by
//! "same"-mode convolution of the signal with one kernel per width.

pub mod wavelets;
pub mod utils;
pub mod core;
#[cfg(feature = "python")]
pub mod ffi;

// Re-export main types and functions
pub use self::core::{cwt, cwt_by_name, cwt_single_scale, ContinuousWavelet, CwtError, CwtOptions};
pub use wavelets::{PaulKernel, Wavelet, WaveletFamily, MAX_PAUL_ORDER};
#[cfg(feature = "python")]
pub use ffi::cwt_py;
