//! Core domain types for option valuation.
//!
//! # Newtype Strategy
//!
//! Implied volatility is returned as [`Vol`] so a solver result can't be
//! silently confused with a price or a residual. Inputs stay bare `f64` and
//! are collected into the validated [`OptionParameters`] value.
//!
//! # Why no `Eq` or `Ord`?
//! These types wrap `f64`, which does not implement `Eq` or `Ord` because `NaN`
//! breaks total ordering. We derive `PartialEq` and `PartialOrd` only.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{self, PricingError};
use crate::validate::{
    validate_discounting, validate_finite, validate_non_negative, validate_positive,
};

/// Volatility `σ`, measured as annualized standard deviation.
///
/// A vol of 0.20 represents 20% annualized volatility.
///
/// # Examples
/// ```
/// use bsm_pricer::types::Vol;
/// let vol = Vol(0.20);
/// assert_eq!(vol.0, 0.20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Vol(pub f64);

/// Option type: call or put.
///
/// Parsed once at the API boundary; the pricing formulas only ever match on
/// the two variants.
///
/// # Examples
/// ```
/// use bsm_pricer::OptionType;
///
/// let call: OptionType = "c".parse()?;
/// assert_eq!(call, OptionType::Call);
/// assert_eq!("Put".parse::<OptionType>()?, OptionType::Put);
/// # Ok::<(), bsm_pricer::PricingError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    /// Right to buy at strike price.
    Call,
    /// Right to sell at strike price.
    Put,
}

impl OptionType {
    /// Payoff sign ω: +1 for calls, −1 for puts.
    pub fn sign(self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }
}

impl FromStr for OptionType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "call" => Ok(OptionType::Call),
            "p" | "put" => Ok(OptionType::Put),
            other => Err(PricingError::InvalidInput {
                message: format!("option type must be one of c, p, call, put; got {other:?}"),
            }),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => f.write_str("call"),
            OptionType::Put => f.write_str("put"),
        }
    }
}

/// Market and contract parameters of a European option.
///
/// Invariants (checked by [`OptionParameters::new`] and on deserialization):
/// `spot > 0`, `strike > 0`, `expiry ≥ 0`, `vol ≥ 0`, `rate` finite.
/// `expiry = 0` and `vol = 0` are valid degenerate inputs.
///
/// # Examples
/// ```
/// use bsm_pricer::{OptionParameters, OptionType};
///
/// let params = OptionParameters::new(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.2)?;
/// assert_eq!(params.strike(), 100.0);
/// assert!(OptionParameters::new(OptionType::Call, -1.0, 100.0, 1.0, 0.05, 0.2).is_err());
/// # Ok::<(), bsm_pricer::PricingError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OptionParametersRaw", into = "OptionParametersRaw")]
pub struct OptionParameters {
    option_type: OptionType,
    spot: f64,
    strike: f64,
    /// Time to maturity in years.
    expiry: f64,
    /// Continuously compounded risk-free rate.
    rate: f64,
    vol: f64,
}

#[derive(Serialize, Deserialize)]
struct OptionParametersRaw {
    option_type: OptionType,
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    vol: f64,
}

impl TryFrom<OptionParametersRaw> for OptionParameters {
    type Error = PricingError;
    fn try_from(raw: OptionParametersRaw) -> Result<Self, Self::Error> {
        Self::new(
            raw.option_type,
            raw.spot,
            raw.strike,
            raw.expiry,
            raw.rate,
            raw.vol,
        )
    }
}

impl From<OptionParameters> for OptionParametersRaw {
    fn from(p: OptionParameters) -> Self {
        Self {
            option_type: p.option_type,
            spot: p.spot,
            strike: p.strike,
            expiry: p.expiry,
            rate: p.rate,
            vol: p.vol,
        }
    }
}

impl OptionParameters {
    /// Create validated option parameters.
    ///
    /// # Errors
    /// Returns [`PricingError::InvalidInput`] if `spot` or `strike` is not
    /// positive, `expiry` or `vol` is negative, any value is NaN/Inf, or
    /// `|r·T|` is so large that e^(±rT) scaled by the spot or strike
    /// overflows `f64`.
    pub fn new(
        option_type: OptionType,
        spot: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
        vol: f64,
    ) -> error::Result<Self> {
        validate_positive(spot, "spot")?;
        validate_positive(strike, "strike")?;
        validate_non_negative(expiry, "expiry")?;
        validate_finite(rate, "rate")?;
        validate_non_negative(vol, "vol")?;
        validate_discounting(spot, strike, rate, expiry)?;
        Ok(Self {
            option_type,
            spot,
            strike,
            expiry,
            rate,
            vol,
        })
    }

    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    pub fn spot(&self) -> f64 {
        self.spot
    }

    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Time to maturity in years.
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn vol(&self) -> f64 {
        self.vol
    }

    /// Copy with a different option type. Always valid.
    pub fn with_option_type(mut self, option_type: OptionType) -> Self {
        self.option_type = option_type;
        self
    }

    /// Copy with a different volatility.
    ///
    /// # Errors
    /// Returns [`PricingError::InvalidInput`] if `vol` is negative or not finite.
    pub fn with_vol(mut self, vol: f64) -> error::Result<Self> {
        self.vol = validate_non_negative(vol, "vol")?;
        Ok(self)
    }

    /// Copy with a different spot.
    ///
    /// # Errors
    /// Returns [`PricingError::InvalidInput`] if `spot` is not positive and
    /// finite, or the forward overflows.
    pub fn with_spot(mut self, spot: f64) -> error::Result<Self> {
        self.spot = validate_positive(spot, "spot")?;
        validate_discounting(self.spot, self.strike, self.rate, self.expiry)?;
        Ok(self)
    }

    /// Copy with a different time to maturity.
    ///
    /// # Errors
    /// Returns [`PricingError::InvalidInput`] if `expiry` is negative or not
    /// finite, or discounting over it overflows.
    pub fn with_expiry(mut self, expiry: f64) -> error::Result<Self> {
        self.expiry = validate_non_negative(expiry, "expiry")?;
        validate_discounting(self.spot, self.strike, self.rate, self.expiry)?;
        Ok(self)
    }

    /// Copy with a different risk-free rate.
    ///
    /// # Errors
    /// Returns [`PricingError::InvalidInput`] if `rate` is not finite, or
    /// discounting at it overflows.
    pub fn with_rate(mut self, rate: f64) -> error::Result<Self> {
        self.rate = validate_finite(rate, "rate")?;
        validate_discounting(self.spot, self.strike, self.rate, self.expiry)?;
        Ok(self)
    }

    /// Copy with a different volatility, for callers that already hold a
    /// bracketed, finite, non-negative value.
    pub(crate) fn with_vol_unchecked(mut self, vol: f64) -> Self {
        debug_assert!(vol.is_finite() && vol >= 0.0);
        self.vol = vol;
        self
    }

    /// Total volatility σ·√T.
    pub fn total_vol(&self) -> f64 {
        self.vol * self.expiry.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atm() -> OptionParameters {
        OptionParameters::new(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.2).unwrap()
    }

    #[test]
    fn new_valid_params() {
        let p = atm();
        assert_eq!(p.option_type(), OptionType::Call);
        assert_eq!(p.spot(), 100.0);
        assert_eq!(p.strike(), 100.0);
        assert_eq!(p.expiry(), 1.0);
        assert_eq!(p.rate(), 0.05);
        assert_eq!(p.vol(), 0.2);
    }

    #[test]
    fn degenerate_expiry_and_vol_accepted() {
        assert!(OptionParameters::new(OptionType::Put, 100.0, 90.0, 0.0, 0.05, 0.2).is_ok());
        assert!(OptionParameters::new(OptionType::Put, 100.0, 90.0, 1.0, 0.05, 0.0).is_ok());
    }

    #[test]
    fn negative_rate_accepted() {
        assert!(OptionParameters::new(OptionType::Call, 100.0, 90.0, 1.0, -0.01, 0.2).is_ok());
    }

    #[test]
    fn rejects_invalid_fields() {
        let t = OptionType::Call;
        assert!(OptionParameters::new(t, 0.0, 100.0, 1.0, 0.05, 0.2).is_err());
        assert!(OptionParameters::new(t, 100.0, -5.0, 1.0, 0.05, 0.2).is_err());
        assert!(OptionParameters::new(t, 100.0, 100.0, -0.1, 0.05, 0.2).is_err());
        assert!(OptionParameters::new(t, 100.0, 100.0, 1.0, f64::NAN, 0.2).is_err());
        assert!(OptionParameters::new(t, 100.0, 100.0, 1.0, 0.05, -0.2).is_err());
        assert!(OptionParameters::new(t, 100.0, 100.0, f64::INFINITY, 0.05, 0.2).is_err());
    }

    #[test]
    fn with_methods_revalidate() {
        let p = atm();
        assert_eq!(p.with_vol(0.3).unwrap().vol(), 0.3);
        assert!(p.with_vol(-0.3).is_err());
        assert!(p.with_spot(0.0).is_err());
        assert!(p.with_expiry(f64::NAN).is_err());
        assert!(p.with_rate(f64::INFINITY).is_err());
        assert_eq!(p.with_option_type(OptionType::Put).option_type(), OptionType::Put);
    }

    #[test]
    fn total_vol() {
        let p = atm().with_expiry(0.25).unwrap();
        assert!((p.total_vol() - 0.1).abs() < 1e-15);
    }

    #[test]
    fn option_type_parsing() {
        assert_eq!("c".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!("CALL".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!(" p ".parse::<OptionType>().unwrap(), OptionType::Put);
        assert_eq!("put".parse::<OptionType>().unwrap(), OptionType::Put);
        assert!("straddle".parse::<OptionType>().is_err());
        assert!("".parse::<OptionType>().is_err());
    }

    #[test]
    fn option_type_display_round_trips() {
        for t in [OptionType::Call, OptionType::Put] {
            assert_eq!(t.to_string().parse::<OptionType>().unwrap(), t);
        }
    }

    #[test]
    fn option_type_sign() {
        assert_eq!(OptionType::Call.sign(), 1.0);
        assert_eq!(OptionType::Put.sign(), -1.0);
    }

    #[test]
    fn serde_round_trip() {
        let p = atm();
        let json = serde_json::to_string(&p).unwrap();
        let p2: OptionParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(p, p2);
    }

    #[test]
    fn serde_rejects_negative_spot() {
        let json = r#"{"option_type":"Call","spot":-100.0,"strike":100.0,"expiry":1.0,"rate":0.05,"vol":0.2}"#;
        assert!(serde_json::from_str::<OptionParameters>(json).is_err());
    }

    #[test]
    fn serde_rejects_negative_vol() {
        let json = r#"{"option_type":"Put","spot":100.0,"strike":100.0,"expiry":1.0,"rate":0.05,"vol":-0.2}"#;
        assert!(serde_json::from_str::<OptionParameters>(json).is_err());
    }

    #[test]
    fn overflowing_discounting_is_rejected() {
        let r = OptionParameters::new(OptionType::Put, 100.0, 100.0, 1.0, -800.0, 0.2);
        assert!(matches!(r, Err(PricingError::InvalidInput { .. })));
        assert!(atm().with_rate(-800.0).is_err());
        assert!(atm().with_rate(-8.0).unwrap().with_expiry(100.0).is_err());
        assert!(atm().with_rate(800.0).is_err());
    }

    #[test]
    fn serde_rejects_overflowing_rate() {
        let json = r#"{"option_type":"Call","spot":100.0,"strike":100.0,"expiry":1.0,"rate":-800.0,"vol":0.2}"#;
        assert!(serde_json::from_str::<OptionParameters>(json).is_err());
    }

    #[test]
    fn types_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<OptionParameters>();
        assert_send_sync::<OptionType>();
        assert_send_sync::<Vol>();
    }
}
