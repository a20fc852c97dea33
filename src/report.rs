//! One-call valuation summary: price, Greeks, and implied volatility
//! round-trip for a single option.
//!
//! The implied volatility is recovered from the exact, unrounded model
//! price. Display rounding belongs to the caller.

use serde::{Deserialize, Serialize};

use crate::conventions::price_bounds;
use crate::error::{self, PricingError};
use crate::greeks::{Greeks, greeks};
use crate::implied::{BlackImpliedVol, ImpliedVol, ImpliedVolQuery};
use crate::pricing::price;
use crate::types::OptionParameters;

/// Everything a pricing form displays for one option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionReport {
    pub params: OptionParameters,
    pub price: f64,
    /// Raw units; see [`Greeks::to_market_units`].
    pub greeks: Greeks,
    /// Volatility recovered from `price`, or the solver's reason for not
    /// recovering one. A price with no volatility information (expired,
    /// zero vol, or vega-free extremes) yields
    /// [`PricingError::OutOfBoundsPrice`].
    pub implied_vol: Result<ImpliedVol, PricingError>,
}

impl OptionReport {
    /// Value `params` with the default solver.
    ///
    /// # Errors
    /// Propagates [`PricingError::InvalidInput`] only. A failed implied
    /// volatility inversion is stored in `implied_vol` instead.
    ///
    /// # Examples
    /// ```
    /// use bsm_pricer::report::OptionReport;
    /// use bsm_pricer::{OptionParameters, OptionType};
    ///
    /// let p = OptionParameters::new(OptionType::Put, 100.0, 100.0, 1.0, 0.05, 0.2)?;
    /// let report = OptionReport::compute(&p)?;
    /// assert!((report.price - 5.5735).abs() < 1e-4);
    /// assert!((report.implied_vol?.vol.0 - 0.2).abs() < 1e-8);
    /// # Ok::<(), bsm_pricer::PricingError>(())
    /// ```
    pub fn compute(params: &OptionParameters) -> error::Result<Self> {
        Self::compute_with(params, &BlackImpliedVol::new())
    }

    /// Value `params`, inverting the price with `solver`.
    ///
    /// # Errors
    /// See [`OptionReport::compute`].
    pub fn compute_with(params: &OptionParameters, solver: &BlackImpliedVol) -> error::Result<Self> {
        let value = price(params)?;
        let sensitivities = greeks(params)?;
        let implied_vol = if value > 0.0 {
            let query = ImpliedVolQuery::from_params(value, params)?;
            solver.solve(&query)
        } else {
            let (lower, upper) = price_bounds(
                params.option_type(),
                params.spot(),
                params.strike(),
                params.rate(),
                params.expiry(),
            );
            Err(PricingError::OutOfBoundsPrice {
                price: value,
                lower,
                upper,
            })
        };

        #[cfg(feature = "logging")]
        if let Err(err) = &implied_vol {
            tracing::debug!(error = %err, "implied volatility unavailable for report");
        }

        Ok(Self {
            params: *params,
            price: value,
            greeks: sensitivities,
            implied_vol,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::implied::SolverConfig;
    use crate::types::OptionType;
    use approx::assert_abs_diff_eq;

    #[test]
    fn atm_call_report() {
        let p = OptionParameters::new(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
        let r = OptionReport::compute(&p).unwrap();
        assert_abs_diff_eq!(r.price, 10.450_583_572_185_565, epsilon = 1e-9);
        assert_abs_diff_eq!(r.greeks.delta, 0.636_830_651_175_619, epsilon = 1e-9);
        let iv = r.implied_vol.unwrap();
        assert_abs_diff_eq!(iv.vol.0, 0.2, epsilon = 1e-8);
        assert_eq!(r.params, p);
    }

    #[test]
    fn expired_option_reports_out_of_bounds() {
        let p = OptionParameters::new(OptionType::Call, 110.0, 100.0, 0.0, 0.05, 0.2).unwrap();
        let r = OptionReport::compute(&p).unwrap();
        assert_eq!(r.price, 10.0);
        assert_eq!(r.greeks, Greeks::default());
        match r.implied_vol {
            Err(PricingError::OutOfBoundsPrice { price, lower, upper }) => {
                assert_eq!(price, 10.0);
                assert_eq!(lower, 10.0);
                assert_eq!(upper, 10.0);
            }
            other => panic!("expected OutOfBoundsPrice, got {other:?}"),
        }
    }

    #[test]
    fn worthless_option_reports_zero_price_bound() {
        let p = OptionParameters::new(OptionType::Put, 110.0, 100.0, 0.0, 0.05, 0.2).unwrap();
        let r = OptionReport::compute(&p).unwrap();
        assert_eq!(r.price, 0.0);
        assert!(matches!(
            r.implied_vol,
            Err(PricingError::OutOfBoundsPrice { price, .. }) if price == 0.0
        ));
    }

    #[test]
    fn solver_failure_is_kept_in_report() {
        let solver = BlackImpliedVol::with_config(SolverConfig {
            max_newton_iterations: 0,
            max_bisection_iterations: 4,
            ..SolverConfig::default()
        });
        let p = OptionParameters::new(OptionType::Call, 100.0, 105.0, 0.5, 0.03, 0.3).unwrap();
        let r = OptionReport::compute_with(&p, &solver).unwrap();
        assert!(r.price > 0.0);
        match r.implied_vol {
            Err(PricingError::NonConvergence { iterations, .. }) => assert_eq!(iterations, 4),
            other => panic!("expected NonConvergence, got {other:?}"),
        }
    }

    #[test]
    fn report_serializes() {
        let p = OptionParameters::new(OptionType::Put, 95.0, 100.0, 0.5, 0.02, 0.3).unwrap();
        let r = OptionReport::compute(&p).unwrap();
        let json = serde_json::to_string(&r).unwrap();
        let r2: OptionReport = serde_json::from_str(&json).unwrap();
        assert_eq!(r, r2);
    }

    #[test]
    fn report_with_error_serializes() {
        let p = OptionParameters::new(OptionType::Call, 110.0, 100.0, 0.0, 0.05, 0.2).unwrap();
        let r = OptionReport::compute(&p).unwrap();
        let json = serde_json::to_string(&r).unwrap();
        let r2: OptionReport = serde_json::from_str(&json).unwrap();
        assert_eq!(r, r2);
    }
}
