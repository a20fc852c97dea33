//! Standard normal distribution functions.
//!
//! The CDF is evaluated through the complementary error function,
//! `Φ(x) = ½·erfc(−x/√2)`, which keeps full relative precision in the lower
//! tail where `1 − Φ(|x|)` would cancel.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use statrs::function::erf::erfc;

/// Standard normal cumulative distribution function Φ(x).
///
/// NaN in, NaN out.
#[inline]
pub fn norm_cdf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    0.5 * erfc(-x * FRAC_1_SQRT_2)
}

/// Standard normal probability density function φ(x).
#[inline]
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}
