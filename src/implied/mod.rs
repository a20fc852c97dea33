//! Implied volatility extraction from option prices.
//!
//! [`BlackImpliedVol`] inverts the Black-Scholes-Merton price: Newton-Raphson
//! on Vega, falling back to bisection over a fixed volatility bracket when
//! Vega vanishes or a Newton step leaves the bracket. An estimate is only
//! ever returned once a tolerance is met; otherwise the solver reports
//! [`PricingError::NonConvergence`](crate::PricingError::NonConvergence).

pub mod black;

pub use black::BlackImpliedVol;

use serde::{Deserialize, Serialize};

use crate::error::{self, PricingError};
use crate::types::{OptionParameters, OptionType, Vol};
use crate::validate::validate_positive;

/// Observed option price plus the market parameters needed to invert it.
///
/// # Examples
/// ```
/// use bsm_pricer::{implied_volatility, ImpliedVolQuery, OptionType};
///
/// let query = ImpliedVolQuery::new(10.450_583_572_185_565, OptionType::Call, 100.0, 100.0, 1.0, 0.05)?;
/// let iv = implied_volatility(&query)?;
/// assert!((iv.vol.0 - 0.2).abs() < 1e-8);
/// # Ok::<(), bsm_pricer::PricingError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ImpliedVolQueryRaw", into = "ImpliedVolQueryRaw")]
pub struct ImpliedVolQuery {
    observed_price: f64,
    /// Market parameters with `vol = 0` as a placeholder for the unknown.
    params: OptionParameters,
}

#[derive(Serialize, Deserialize)]
struct ImpliedVolQueryRaw {
    observed_price: f64,
    option_type: OptionType,
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
}

impl TryFrom<ImpliedVolQueryRaw> for ImpliedVolQuery {
    type Error = PricingError;
    fn try_from(raw: ImpliedVolQueryRaw) -> Result<Self, Self::Error> {
        Self::new(
            raw.observed_price,
            raw.option_type,
            raw.spot,
            raw.strike,
            raw.expiry,
            raw.rate,
        )
    }
}

impl From<ImpliedVolQuery> for ImpliedVolQueryRaw {
    fn from(q: ImpliedVolQuery) -> Self {
        Self {
            observed_price: q.observed_price,
            option_type: q.params.option_type(),
            spot: q.params.spot(),
            strike: q.params.strike(),
            expiry: q.params.expiry(),
            rate: q.params.rate(),
        }
    }
}

impl ImpliedVolQuery {
    /// Create a validated query.
    ///
    /// # Errors
    /// Returns [`PricingError::InvalidInput`] if `observed_price`, `spot`, or
    /// `strike` is not positive, `expiry` is negative, or any value is NaN/Inf.
    pub fn new(
        observed_price: f64,
        option_type: OptionType,
        spot: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
    ) -> error::Result<Self> {
        validate_positive(observed_price, "observed price")?;
        let params = OptionParameters::new(option_type, spot, strike, expiry, rate, 0.0)?;
        Ok(Self {
            observed_price,
            params,
        })
    }

    /// Build a query from full option parameters, ignoring their volatility.
    ///
    /// # Errors
    /// Returns [`PricingError::InvalidInput`] if `observed_price` is not
    /// positive and finite.
    pub fn from_params(observed_price: f64, params: &OptionParameters) -> error::Result<Self> {
        validate_positive(observed_price, "observed price")?;
        Ok(Self {
            observed_price,
            params: params.with_vol(0.0)?,
        })
    }

    pub fn observed_price(&self) -> f64 {
        self.observed_price
    }

    pub fn option_type(&self) -> OptionType {
        self.params.option_type()
    }

    pub fn spot(&self) -> f64 {
        self.params.spot()
    }

    pub fn strike(&self) -> f64 {
        self.params.strike()
    }

    pub fn expiry(&self) -> f64 {
        self.params.expiry()
    }

    pub fn rate(&self) -> f64 {
        self.params.rate()
    }

    /// Market parameters priced at `vol`.
    pub(crate) fn params_at(&self, vol: f64) -> OptionParameters {
        self.params.with_vol_unchecked(vol)
    }
}

/// Which method produced the converged estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SolverMethod {
    /// Newton-Raphson on Vega converged directly.
    Newton,
    /// Newton was abandoned (vanishing Vega or a step outside the bracket)
    /// and bisection converged.
    Bisection,
}

/// A converged implied volatility estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpliedVol {
    pub vol: Vol,
    /// Newton steps plus bisection halvings.
    pub iterations: usize,
    /// `|model price − observed price|` at `vol`.
    pub residual: f64,
    pub method: SolverMethod,
}

/// Tolerances, caps, and bracket for [`BlackImpliedVol`].
///
/// # Examples
/// ```
/// use bsm_pricer::implied::SolverConfig;
///
/// let config = SolverConfig {
///     price_tolerance: 1e-10,
///     ..SolverConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Converged when `|price(σ) − observed| < price_tolerance`.
    pub price_tolerance: f64,
    /// Converged when a Newton step or the bisection bracket is narrower
    /// than this.
    pub vol_tolerance: f64,
    /// Newton iterations before falling back to bisection.
    pub max_newton_iterations: usize,
    /// Bisection halvings before reporting non-convergence.
    pub max_bisection_iterations: usize,
    /// Vega below which Newton steps are considered unstable.
    pub vega_floor: f64,
    /// Lower edge of the volatility bracket.
    pub min_vol: f64,
    /// Upper edge of the volatility bracket.
    pub max_vol: f64,
    /// Newton seed used when the Corrado-Miller estimate is unavailable.
    pub initial_vol: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            price_tolerance: 1e-8,
            vol_tolerance: 1e-10,
            max_newton_iterations: 100,
            max_bisection_iterations: 200,
            vega_floor: 1e-10,
            min_vol: 1e-6,
            max_vol: 5.0,
            initial_vol: 0.2,
        }
    }
}

impl SolverConfig {
    /// Check that tolerances are positive and the bracket is well formed.
    ///
    /// # Errors
    /// Returns [`PricingError::InvalidInput`] describing the first bad field.
    pub fn validate(&self) -> error::Result<()> {
        validate_positive(self.price_tolerance, "price_tolerance")?;
        validate_positive(self.vol_tolerance, "vol_tolerance")?;
        validate_positive(self.vega_floor, "vega_floor")?;
        validate_positive(self.min_vol, "min_vol")?;
        validate_positive(self.max_vol, "max_vol")?;
        validate_positive(self.initial_vol, "initial_vol")?;
        if self.min_vol >= self.max_vol {
            return Err(PricingError::InvalidInput {
                message: format!(
                    "min_vol ({}) must be below max_vol ({})",
                    self.min_vol, self.max_vol
                ),
            });
        }
        if self.max_bisection_iterations == 0 {
            return Err(PricingError::InvalidInput {
                message: "max_bisection_iterations must be at least 1".into(),
            });
        }
        Ok(())
    }
}

/// Implied volatility with the default [`SolverConfig`].
///
/// # Errors
/// - [`PricingError::OutOfBoundsPrice`] if no volatility in the bracket
///   reproduces the price (checked before iterating).
/// - [`PricingError::NonConvergence`] if bisection exhausts its cap.
pub fn implied_volatility(query: &ImpliedVolQuery) -> error::Result<ImpliedVol> {
    BlackImpliedVol::new().solve(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_accessors() {
        let q = ImpliedVolQuery::new(5.0, OptionType::Put, 100.0, 95.0, 0.5, 0.01).unwrap();
        assert_eq!(q.observed_price(), 5.0);
        assert_eq!(q.option_type(), OptionType::Put);
        assert_eq!(q.spot(), 100.0);
        assert_eq!(q.strike(), 95.0);
        assert_eq!(q.expiry(), 0.5);
        assert_eq!(q.rate(), 0.01);
    }

    #[test]
    fn query_rejects_invalid_input() {
        assert!(ImpliedVolQuery::new(0.0, OptionType::Call, 100.0, 100.0, 1.0, 0.05).is_err());
        assert!(ImpliedVolQuery::new(-1.0, OptionType::Call, 100.0, 100.0, 1.0, 0.05).is_err());
        assert!(ImpliedVolQuery::new(f64::NAN, OptionType::Call, 100.0, 100.0, 1.0, 0.05).is_err());
        assert!(ImpliedVolQuery::new(5.0, OptionType::Call, 0.0, 100.0, 1.0, 0.05).is_err());
        assert!(ImpliedVolQuery::new(5.0, OptionType::Call, 100.0, 100.0, -1.0, 0.05).is_err());
    }

    #[test]
    fn query_from_params_keeps_market_fields() {
        let p = OptionParameters::new(OptionType::Call, 101.0, 99.0, 0.3, 0.02, 0.45).unwrap();
        let q = ImpliedVolQuery::from_params(7.5, &p).unwrap();
        assert_eq!(q.spot(), 101.0);
        assert_eq!(q.strike(), 99.0);
        assert_eq!(q.expiry(), 0.3);
        assert_eq!(q.rate(), 0.02);
        assert_eq!(q.option_type(), OptionType::Call);
        assert!(ImpliedVolQuery::from_params(0.0, &p).is_err());
    }

    #[test]
    fn query_serde_round_trip() {
        let q = ImpliedVolQuery::new(5.0, OptionType::Put, 100.0, 95.0, 0.5, 0.01).unwrap();
        let json = serde_json::to_string(&q).unwrap();
        let q2: ImpliedVolQuery = serde_json::from_str(&json).unwrap();
        assert_eq!(q.observed_price(), q2.observed_price());
        assert_eq!(q.strike(), q2.strike());
        assert_eq!(q.option_type(), q2.option_type());
    }

    #[test]
    fn query_serde_rejects_zero_price() {
        let json = r#"{"observed_price":0.0,"option_type":"Call","spot":100.0,"strike":100.0,"expiry":1.0,"rate":0.05}"#;
        assert!(serde_json::from_str::<ImpliedVolQuery>(json).is_err());
    }

    #[test]
    fn default_config_is_valid() {
        let c = SolverConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.max_newton_iterations, 100);
        assert_eq!(c.min_vol, 1e-6);
        assert_eq!(c.max_vol, 5.0);
    }

    #[test]
    fn config_rejects_bad_fields() {
        let inverted = SolverConfig {
            min_vol: 2.0,
            max_vol: 1.0,
            ..SolverConfig::default()
        };
        assert!(inverted.validate().is_err());

        let zero_tol = SolverConfig {
            price_tolerance: 0.0,
            ..SolverConfig::default()
        };
        assert!(zero_tol.validate().is_err());

        let no_bisection = SolverConfig {
            max_bisection_iterations: 0,
            ..SolverConfig::default()
        };
        assert!(no_bisection.validate().is_err());
    }
}
