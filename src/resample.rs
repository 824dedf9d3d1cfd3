//! Spectral resampling module - re-exports from submodules

mod core;
#[cfg(feature = "python")]
mod ffi;

pub use self::core::*;
#[cfg(feature = "python")]
pub use ffi::{resample_batch_py, resample_py};
