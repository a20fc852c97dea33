//! Checks shared by the validated constructors.
//!
//! A value must pass `is_finite()` before its sign is tested, so NaN and
//! ±Inf are always rejected and never fall through a comparison.

use crate::conventions::{discount_factor, forward_price};
use crate::error::{PricingError, Result};

fn reject(name: &str, requirement: &str, value: f64) -> PricingError {
    PricingError::InvalidInput {
        message: format!("{name} must be {requirement}, got {value}"),
    }
}

/// Spot, strike, observed prices, tolerances.
pub(crate) fn validate_positive(value: f64, name: &str) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(reject(name, "positive and finite", value))
    }
}

/// Expiry and volatility, where zero is a valid degenerate input.
pub(crate) fn validate_non_negative(value: f64, name: &str) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(reject(name, "non-negative and finite", value))
    }
}

/// Rates, which may be zero or negative.
pub(crate) fn validate_finite(value: f64, name: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(reject(name, "finite", value))
    }
}

/// `min <= max` for a closed range.
pub(crate) fn validate_range(min: f64, max: f64, name: &str) -> Result<()> {
    if min > max {
        return Err(PricingError::InvalidInput {
            message: format!("{name} range is inverted: min {min} > max {max}"),
        });
    }
    Ok(())
}

/// Reject a rate and expiry whose growth factor overflows `f64`.
///
/// The forward S·e^(rT), the discounted strike K·e^(−rT), and the carry
/// terms r·K·e^(−rT) and T·K·e^(−rT) of Theta and Rho must all be finite.
pub(crate) fn validate_discounting(spot: f64, strike: f64, rate: f64, expiry: f64) -> Result<()> {
    let forward = forward_price(spot, rate, expiry);
    let pv_strike = strike * discount_factor(rate, expiry);
    let representable = [forward, pv_strike, rate * pv_strike, expiry * pv_strike]
        .iter()
        .all(|v| v.is_finite());
    if !representable {
        return Err(PricingError::InvalidInput {
            message: format!(
                "rate {rate} over expiry {expiry} overflows discounting \
                 (forward {forward}, discounted strike {pv_strike})"
            ),
        });
    }
    Ok(())
}
