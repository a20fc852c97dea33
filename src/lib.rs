//! # bsm-pricer
//!
//! Black-Scholes-Merton valuation of European options: closed-form prices,
//! analytic Greeks, implied volatility, and spot × volatility price grids.
//!
//! ## Architecture
//!
//! - **`math`** — Standard normal CDF and PDF
//! - **`pricing`** — Closed-form call/put prices and the shared d1/d2 terms
//! - **`greeks`** — Delta, Gamma, Theta, Vega, Rho as exact derivatives of the price
//! - **`implied`** — Implied volatility (Newton-Raphson on Vega, bisection fallback)
//! - **`grid`** — Price matrices over spot and volatility ranges
//! - **`report`** — Price, Greeks, and implied volatility in one call
//!
//! ## Design
//!
//! - **Validated inputs, bare `f64` outputs.** [`OptionParameters`] and
//!   [`ImpliedVolQuery`] can only be built through validating constructors
//!   (also on deserialization), so the formulas never see a negative spot or
//!   a NaN rate. Implied volatility comes back as the [`Vol`] newtype.
//! - **Degenerate inputs are limits, not errors.** Zero expiry or zero
//!   volatility price at the deterministic payoff; Greeks follow documented
//!   conventions (see [`greeks`](mod@greeks)).
//! - **No panics.** Every fallible operation returns [`Result`]. Library code
//!   never calls `unwrap()` or `expect()`.
//! - **No silent estimates.** The solver returns a volatility only once a
//!   tolerance is met; otherwise [`PricingError::NonConvergence`].
//! - **Pure and thread-safe.** No global state or caches. Grid rows are
//!   evaluated in parallel with rayon under the `parallel` feature.
//!
//! ## Example
//!
//! ```
//! use bsm_pricer::{greeks, implied_volatility, price, ImpliedVolQuery, OptionParameters, OptionType};
//!
//! let call = OptionParameters::new(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.2)?;
//! let value = price(&call)?;
//! let g = greeks(&call)?;
//! assert!((value - 10.45).abs() < 0.01);
//! assert!((g.rho - 53.23).abs() < 0.01);
//!
//! let query = ImpliedVolQuery::from_params(value, &call)?;
//! let iv = implied_volatility(&query)?;
//! assert!((iv.vol.0 - 0.2).abs() < 1e-8);
//! # Ok::<(), bsm_pricer::PricingError>(())
//! ```

pub mod conventions;
pub mod error;
pub mod greeks;
pub mod grid;
pub mod implied;
pub mod math;
mod optim;
pub mod pricing;
pub mod report;
pub mod types;
mod validate;

#[doc(inline)]
pub use error::{PricingError, Result};
#[doc(inline)]
pub use greeks::{Greeks, greeks};
#[doc(inline)]
pub use grid::{GridSpec, PriceGrid, evaluate_grid};
#[doc(inline)]
pub use implied::{ImpliedVol, ImpliedVolQuery, SolverConfig, SolverMethod, implied_volatility};
#[doc(inline)]
pub use pricing::price;
#[doc(inline)]
pub use types::{OptionParameters, OptionType, Vol};
