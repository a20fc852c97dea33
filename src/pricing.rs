//! Black-Scholes-Merton closed-form pricing of European options.
//!
//! # Formula
//! ```text
//! d1 = (ln(F/K) + σ²T/2) / (σ·√T),  F = S·e^(rT)
//! d2 = d1 − σ·√T
//! C  = S·Φ(d1) − K·e^(−rT)·Φ(d2)
//! P  = K·e^(−rT)·Φ(−d2) − S·Φ(−d1)
//! ```
//!
//! # Degenerate inputs
//! When the total volatility σ·√T falls below [`MIN_TOTAL_VOL`] (including
//! `T = 0` and `σ = 0`) the lognormal distribution collapses to a point and
//! d1/d2 are undefined. The price is then the deterministic payoff
//! `max(ω(S − K·e^(−rT)), 0)`, which at `T = 0` is the plain intrinsic value.

use crate::conventions::{deterministic_value, discount_factor, forward_price, log_moneyness};
use crate::error;
use crate::math::norm_cdf;
use crate::types::{OptionParameters, OptionType};

/// Total volatility σ·√T below which the closed form is bypassed.
pub const MIN_TOTAL_VOL: f64 = 1e-12;

/// Intermediate terms of the closed-form formula, shared with the Greeks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Terms {
    pub d1: f64,
    pub d2: f64,
    /// √T.
    pub sqrt_t: f64,
    /// e^(−rT).
    pub discount: f64,
}

/// Compute `d1`, `d2`, `√T`, and the discount factor.
///
/// Returns `None` in the degenerate regime `σ·√T < MIN_TOTAL_VOL`, where the
/// closed form does not apply.
pub fn terms(params: &OptionParameters) -> Option<Terms> {
    let sqrt_t = params.expiry().sqrt();
    let vol = params.vol();
    let total_vol = vol * sqrt_t;
    if total_vol < MIN_TOTAL_VOL {
        return None;
    }
    let forward = forward_price(params.spot(), params.rate(), params.expiry());
    let d1 = (0.5 * total_vol * total_vol - log_moneyness(params.strike(), forward)) / total_vol;
    Some(Terms {
        d1,
        d2: d1 - total_vol,
        sqrt_t,
        discount: discount_factor(params.rate(), params.expiry()),
    })
}

/// Price a European option under Black-Scholes-Merton.
///
/// The result is always finite and non-negative for valid parameters.
///
/// # Errors
/// Never fails for a constructed [`OptionParameters`]; the `Result` keeps the
/// signature uniform with the rest of the crate's entry points.
///
/// # Examples
/// ```
/// use bsm_pricer::{price, OptionParameters, OptionType};
///
/// let call = OptionParameters::new(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.2)?;
/// let value = price(&call)?;
/// assert!((value - 10.4506).abs() < 1e-4);
/// # Ok::<(), bsm_pricer::PricingError>(())
/// ```
pub fn price(params: &OptionParameters) -> error::Result<f64> {
    Ok(price_unchecked(params))
}

/// Infallible pricing core, used in hot loops (grid, solver).
pub(crate) fn price_unchecked(params: &OptionParameters) -> f64 {
    let Some(t) = terms(params) else {
        return deterministic_value(
            params.option_type(),
            params.spot(),
            params.strike(),
            params.rate(),
            params.expiry(),
        );
    };
    let spot = params.spot();
    let pv_strike = params.strike() * t.discount;
    let value = match params.option_type() {
        OptionType::Call => spot * norm_cdf(t.d1) - pv_strike * norm_cdf(t.d2),
        OptionType::Put => pv_strike * norm_cdf(-t.d2) - spot * norm_cdf(-t.d1),
    };
    value.max(0.0)
}
