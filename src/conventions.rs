//! Market conventions shared by the pricing, Greeks, and solver modules.
//!
//! Discounting is continuous compounding at the risk-free rate. Greeks are
//! computed in raw units (per 1.00 change in the input); [`DAYS_PER_YEAR`]
//! and [`PERCENT`] convert them to the usual display units.

use crate::types::OptionType;

/// Calendar days per year used for per-day theta.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Scale between a unit change and a one-point (1%) change.
pub const PERCENT: f64 = 100.0;

/// Discount factor e^(−rT).
pub fn discount_factor(rate: f64, expiry: f64) -> f64 {
    (-rate * expiry).exp()
}

/// Compute forward price from spot: F = S · exp(r · T).
pub fn forward_price(spot: f64, rate: f64, expiry: f64) -> f64 {
    spot * (rate * expiry).exp()
}

/// Convert a strike to log-moneyness: k = ln(K / F).
pub fn log_moneyness(strike: f64, forward: f64) -> f64 {
    (strike / forward).ln()
}

/// Undiscounted payoff on immediate exercise: max(ω(S − K), 0).
pub fn intrinsic_value(option_type: OptionType, spot: f64, strike: f64) -> f64 {
    match option_type {
        OptionType::Call => (spot - strike).max(0.0),
        OptionType::Put => (strike - spot).max(0.0),
    }
}

/// Zero-volatility price: the payoff against the discounted strike,
/// max(ω(S − K·e^(−rT)), 0). Equals [`intrinsic_value`] at `T = 0`.
pub fn deterministic_value(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    expiry: f64,
) -> f64 {
    let pv_strike = strike * discount_factor(rate, expiry);
    intrinsic_value(option_type, spot, pv_strike)
}

/// No-arbitrage price bounds `(lower, upper)` for a European option.
///
/// - Call: `(max(S − K·e^(−rT), 0), S)`
/// - Put: `(max(K·e^(−rT) − S, 0), K·e^(−rT))`
///
/// At `T = 0` the option is worth exactly its intrinsic value, so both
/// bounds collapse to it.
pub fn price_bounds(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    expiry: f64,
) -> (f64, f64) {
    let lower = deterministic_value(option_type, spot, strike, rate, expiry);
    if expiry <= 0.0 {
        return (lower, lower);
    }
    let upper = match option_type {
        OptionType::Call => spot,
        OptionType::Put => strike * discount_factor(rate, expiry),
    };
    (lower, upper)
}
