//! Wavelet kernel generation
//!
//! Ricker (real), Morlet and Paul (complex) kernels sampled on an integer
//! grid centred on the middle of the kernel.

use ndarray::Array1;
use num_complex::Complex64;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use super::core::CwtError;

/// Highest accepted Paul order. Beyond this the kernel underflows to zero
/// everywhere except a few samples around the centre.
pub const MAX_PAUL_ORDER: u32 = 128;

/// Supported mother wavelet families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaveletFamily {
    Ricker,
    Morlet,
    Paul,
}

impl WaveletFamily {
    pub fn name(self) -> &'static str {
        match self {
            WaveletFamily::Ricker => "ricker",
            WaveletFamily::Morlet => "morlet",
            WaveletFamily::Paul => "paul",
        }
    }
}

impl fmt::Display for WaveletFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WaveletFamily {
    type Err = CwtError;

    /// Parse a family name ("ricker", "morlet" or "paul", any case)
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "ricker" => Ok(WaveletFamily::Ricker),
            "morlet" => Ok(WaveletFamily::Morlet),
            "paul" => Ok(WaveletFamily::Paul),
            _ => Err(CwtError::UnknownWavelet(name.to_string())),
        }
    }
}

/// A wavelet family together with its resolved shape parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Wavelet {
    /// Mexican hat, no shape parameter
    Ricker,
    /// Complex Morlet with angular frequency `omega0`
    Morlet { omega0: f64 },
    /// Complex Paul wavelet of integer `order`
    Paul { order: u32 },
}

impl Wavelet {
    /// Resolve a family and its untyped shape parameter.
    ///
    /// The parameter is ignored for Ricker, read as `omega0` for Morlet and
    /// as an integer order in `1..=MAX_PAUL_ORDER` for Paul.
    pub fn from_family(family: WaveletFamily, shape_parameter: f64) -> Result<Self, CwtError> {
        match family {
            WaveletFamily::Ricker => Ok(Wavelet::Ricker),
            WaveletFamily::Morlet => {
                if !shape_parameter.is_finite() {
                    return Err(CwtError::InvalidParameter {
                        name: "omega0".to_string(),
                        value: shape_parameter.to_string(),
                    });
                }
                Ok(Wavelet::Morlet { omega0: shape_parameter })
            }
            WaveletFamily::Paul => {
                let valid = shape_parameter.is_finite()
                    && shape_parameter >= 1.0
                    && shape_parameter.fract() == 0.0
                    && shape_parameter <= MAX_PAUL_ORDER as f64;
                if !valid {
                    return Err(CwtError::InvalidParameter {
                        name: "order".to_string(),
                        value: shape_parameter.to_string(),
                    });
                }
                Ok(Wavelet::Paul { order: shape_parameter as u32 })
            }
        }
    }

    /// Parse from a family name plus shape parameter (e.g. `("morlet", 5.0)`)
    pub fn from_name(name: &str, shape_parameter: f64) -> Result<Self, CwtError> {
        Self::from_family(name.parse()?, shape_parameter)
    }

    pub fn family(&self) -> WaveletFamily {
        match self {
            Wavelet::Ricker => WaveletFamily::Ricker,
            Wavelet::Morlet { .. } => WaveletFamily::Morlet,
            Wavelet::Paul { .. } => WaveletFamily::Paul,
        }
    }

    /// Kernel length used for `width` against a signal of `signal_len` samples
    pub fn kernel_len(&self, width: usize, signal_len: usize) -> usize {
        match self {
            Wavelet::Ricker | Wavelet::Morlet { .. } => (10 * width).min(signal_len),
            Wavelet::Paul { .. } => paul_len(width),
        }
    }
}

/// Sample offsets from the kernel centre: `k - (points - 1) / 2`
fn centred_grid(points: usize) -> impl Iterator<Item = f64> {
    let centre = (points as f64 - 1.0) / 2.0;
    (0..points).map(move |k| k as f64 - centre)
}

/// Generate a Ricker (Mexican hat) wavelet
///
/// # Formula
/// ```text
/// A = 2 / (sqrt(3a) * pi^(1/4))
/// psi(x) = A * (1 - x^2/a^2) * exp(-x^2 / (2a^2))
/// ```
/// with `x` centred on the middle sample.
///
/// # References
/// - scipy.signal.ricker
pub fn ricker(points: usize, a: f64) -> Array1<f64> {
    let amp = 2.0 / ((3.0 * a).sqrt() * PI.powf(0.25));
    let wsq = a * a;

    centred_grid(points)
        .map(|x| {
            let xsq = x * x;
            amp * (1.0 - xsq / wsq) * (-xsq / (2.0 * wsq)).exp()
        })
        .collect()
}

/// Generate a complex Morlet wavelet for CWT
///
/// # Formula
/// ```text
/// x = (k - (points-1)/2) / s
/// psi(x) = sqrt(1/s) * pi^(-1/4) * exp(i*omega0*x) * exp(-x^2/2)
/// ```
///
/// # References
/// - scipy.signal.morlet2
pub fn morlet_complex(points: usize, omega0: f64, width: f64) -> Array1<Complex64> {
    let norm = (1.0 / width).sqrt() * PI.powf(-0.25);

    centred_grid(points)
        .map(|k| {
            let x = k / width;
            let envelope = (-0.5 * x * x).exp() * norm;
            Complex64::from_polar(envelope, omega0 * x)
        })
        .collect()
}

/// Number of samples in a Paul kernel of the given width
pub fn paul_len(width: usize) -> usize {
    10 * width
}

/// Paul normalisation constant `2^m * m! / sqrt(pi * (2m)!)`, evaluated in
/// log space so large orders do not overflow.
fn paul_norm(order: u32) -> f64 {
    let ln_factorial = |n: u64| (2..=n).map(|k| (k as f64).ln()).sum::<f64>();
    let m = u64::from(order);
    let ln_c = m as f64 * 2f64.ln() + ln_factorial(m) - 0.5 * (PI.ln() + ln_factorial(2 * m));
    ln_c.exp()
}

/// Paul wavelet of a fixed order with its constant factor `i^m * C_m`
/// computed once, so kernels for many scales share it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaulKernel {
    order: u32,
    coeff: Complex64,
}

impl PaulKernel {
    /// Fails unless `1 <= order <= MAX_PAUL_ORDER`
    pub fn new(order: u32) -> Result<Self, CwtError> {
        if order == 0 || order > MAX_PAUL_ORDER {
            return Err(CwtError::InvalidParameter {
                name: "order".to_string(),
                value: order.to_string(),
            });
        }
        Ok(Self {
            order,
            coeff: Complex64::i().powu(order) * paul_norm(order),
        })
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    /// Sample `10 * width` points with the time grid divided by `scale`
    pub fn sample(&self, width: usize, scale: f64) -> Array1<Complex64> {
        let exponent = self.order + 1;
        centred_grid(paul_len(width))
            .map(|k| {
                let t = k / scale;
                self.coeff * Complex64::new(1.0, -t).inv().powu(exponent)
            })
            .collect()
    }
}

/// Generate a complex Paul wavelet
///
/// # Arguments
/// * `order` - Wavelet order m, `1..=MAX_PAUL_ORDER`
/// * `width` - Determines the support: `10 * width` samples
/// * `scale` - Dilation applied to the time grid
///
/// # Formula
/// ```text
/// t = (k - (L-1)/2) / scale
/// psi(t) = 2^m * i^m * m! / sqrt(pi * (2m)!) * (1 - i*t)^-(m+1)
/// ```
///
/// # Errors
/// `InvalidParameter` when the order is out of range.
pub fn paul_complex(order: u32, width: usize, scale: f64) -> Result<Array1<Complex64>, CwtError> {
    Ok(PaulKernel::new(order)?.sample(width, scale))
}
