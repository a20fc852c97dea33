//! Analytic Black-Scholes-Merton Greeks.
//!
//! Every sensitivity is the exact partial derivative of [`crate::pricing::price`],
//! evaluated on the same [`Terms`] the price uses.
//!
//! # Units
//! Raw units throughout: Vega per 1.00 change in σ, Rho per 1.00 change in r,
//! Theta per year. [`Greeks::to_market_units`] converts to per-vol-point,
//! per-rate-point, and per-calendar-day figures.
//!
//! # Degenerate inputs
//! - **Expired (`T = 0`)**: all five Greeks are defined as `0.0`. The option
//!   has no time value left to be sensitive to; the formulas are singular here
//!   and are never evaluated.
//! - **Zero total volatility (`T > 0`, σ·√T < [`MIN_TOTAL_VOL`])**: the price
//!   is the deterministic `max(ω(S − K·e^(−rT)), 0)` and the Greeks are its
//!   derivatives. In the money (strictly): Delta = ω, Theta = −ω·r·K·e^(−rT),
//!   Rho = ω·K·T·e^(−rT). Otherwise zero. Gamma and Vega are always zero.

use serde::{Deserialize, Serialize};

use crate::conventions::{DAYS_PER_YEAR, PERCENT, discount_factor};
use crate::error;
use crate::math::{norm_cdf, norm_pdf};
use crate::pricing::{MIN_TOTAL_VOL, Terms, terms};
use crate::types::{OptionParameters, OptionType};

/// The five first- and second-order sensitivities of an option price.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Greeks {
    /// ∂V/∂S.
    pub delta: f64,
    /// ∂²V/∂S².
    pub gamma: f64,
    /// Time decay −∂V/∂T, per year.
    pub theta: f64,
    /// ∂V/∂σ, per 1.00 change in volatility.
    pub vega: f64,
    /// ∂V/∂r, per 1.00 change in the rate.
    pub rho: f64,
}

impl Greeks {
    /// Convert to display units: Theta per calendar day, Vega per 1 vol
    /// point, Rho per 1% rate move. Delta and Gamma are unchanged.
    ///
    /// # Examples
    /// ```
    /// use bsm_pricer::{greeks, OptionParameters, OptionType};
    ///
    /// let p = OptionParameters::new(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.2)?;
    /// let g = greeks(&p)?;
    /// let m = g.to_market_units();
    /// assert!((m.vega - g.vega / 100.0).abs() < 1e-15);
    /// # Ok::<(), bsm_pricer::PricingError>(())
    /// ```
    pub fn to_market_units(&self) -> Greeks {
        Greeks {
            delta: self.delta,
            gamma: self.gamma,
            theta: self.theta / DAYS_PER_YEAR,
            vega: self.vega / PERCENT,
            rho: self.rho / PERCENT,
        }
    }
}

/// Compute all five Greeks in one pass.
///
/// # Errors
/// Never fails for a constructed [`OptionParameters`].
///
/// # Examples
/// ```
/// use bsm_pricer::{greeks, OptionParameters, OptionType};
///
/// let p = OptionParameters::new(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.2)?;
/// let g = greeks(&p)?;
/// assert!((g.delta - 0.6368).abs() < 1e-4);
/// assert!((g.vega - 37.524).abs() < 1e-3);
/// # Ok::<(), bsm_pricer::PricingError>(())
/// ```
pub fn greeks(params: &OptionParameters) -> error::Result<Greeks> {
    Ok(greeks_unchecked(params))
}

pub(crate) fn greeks_unchecked(params: &OptionParameters) -> Greeks {
    if params.expiry() <= 0.0 {
        return Greeks::default();
    }
    match terms(params) {
        Some(t) => Greeks {
            delta: delta_from(params, &t),
            gamma: gamma_from(params, &t),
            theta: theta_from(params, &t),
            vega: vega_from(params, &t),
            rho: rho_from(params, &t),
        },
        None => deterministic_greeks(params),
    }
}

/// ∂V/∂S.
pub fn delta(params: &OptionParameters) -> f64 {
    greek(params, delta_from, |g| g.delta)
}

/// ∂²V/∂S², identical for calls and puts.
pub fn gamma(params: &OptionParameters) -> f64 {
    greek(params, gamma_from, |g| g.gamma)
}

/// Time decay −∂V/∂T, per year.
pub fn theta(params: &OptionParameters) -> f64 {
    greek(params, theta_from, |g| g.theta)
}

/// ∂V/∂σ per 1.00 change in σ, identical for calls and puts.
pub fn vega(params: &OptionParameters) -> f64 {
    greek(params, vega_from, |g| g.vega)
}

/// ∂V/∂r per 1.00 change in r.
pub fn rho(params: &OptionParameters) -> f64 {
    greek(params, rho_from, |g| g.rho)
}

fn greek(
    params: &OptionParameters,
    analytic: fn(&OptionParameters, &Terms) -> f64,
    degenerate: fn(&Greeks) -> f64,
) -> f64 {
    if params.expiry() <= 0.0 {
        return 0.0;
    }
    match terms(params) {
        Some(t) => analytic(params, &t),
        None => degenerate(&deterministic_greeks(params)),
    }
}

fn delta_from(params: &OptionParameters, t: &Terms) -> f64 {
    match params.option_type() {
        OptionType::Call => norm_cdf(t.d1),
        OptionType::Put => norm_cdf(t.d1) - 1.0,
    }
}

fn gamma_from(params: &OptionParameters, t: &Terms) -> f64 {
    norm_pdf(t.d1) / (params.spot() * params.vol() * t.sqrt_t)
}

fn vega_from(params: &OptionParameters, t: &Terms) -> f64 {
    params.spot() * norm_pdf(t.d1) * t.sqrt_t
}

fn theta_from(params: &OptionParameters, t: &Terms) -> f64 {
    let decay = -params.spot() * norm_pdf(t.d1) * params.vol() / (2.0 * t.sqrt_t);
    let carry = params.rate() * params.strike() * t.discount;
    match params.option_type() {
        OptionType::Call => decay - carry * norm_cdf(t.d2),
        OptionType::Put => decay + carry * norm_cdf(-t.d2),
    }
}

fn rho_from(params: &OptionParameters, t: &Terms) -> f64 {
    let kt_df = params.strike() * params.expiry() * t.discount;
    match params.option_type() {
        OptionType::Call => kt_df * norm_cdf(t.d2),
        OptionType::Put => -kt_df * norm_cdf(-t.d2),
    }
}

/// Derivatives of the zero-volatility price `max(ω(S − K·e^(−rT)), 0)`.
fn deterministic_greeks(params: &OptionParameters) -> Greeks {
    debug_assert!(params.total_vol() < MIN_TOTAL_VOL);
    let omega = params.option_type().sign();
    let pv_strike = params.strike() * discount_factor(params.rate(), params.expiry());
    if omega * (params.spot() - pv_strike) <= 0.0 {
        return Greeks::default();
    }
    Greeks {
        delta: omega,
        gamma: 0.0,
        theta: -omega * params.rate() * pv_strike,
        vega: 0.0,
        rho: omega * params.expiry() * pv_strike,
    }
}
