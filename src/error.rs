//! Error types for the bsm-pricer library.
//!
//! All fallible operations return `Result<T, PricingError>` rather than panicking.
//! Degenerate but valid inputs (zero expiry, zero volatility) are not errors:
//! they resolve to defined limiting values.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience type alias for results in this crate.
pub type Result<T> = std::result::Result<T, PricingError>;

/// Errors that can occur during pricing, Greeks evaluation, and implied
/// volatility inversion.
///
/// Serializable so that diagnostics can travel inside a
/// [`report::OptionReport`](crate::report::OptionReport).
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PricingError {
    /// Input data is invalid (e.g., non-positive spot, negative vol, NaN rate).
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// Observed price lies outside the range attainable by the model, so no
    /// implied volatility exists for it.
    #[error("price {price} out of bounds: attainable range is ({lower}, {upper})")]
    OutOfBoundsPrice {
        price: f64,
        /// Lowest attainable price (exclusive).
        lower: f64,
        /// Highest attainable price (exclusive).
        upper: f64,
    },

    /// The implied volatility solver exhausted its iteration budget.
    ///
    /// `last_estimate` is reported for diagnostics only and must not be used
    /// as a volatility.
    #[error(
        "implied volatility did not converge after {iterations} iterations \
         (last estimate {last_estimate}, residual {residual:e})"
    )]
    NonConvergence {
        iterations: usize,
        last_estimate: f64,
        /// `|model price − observed price|` at `last_estimate`.
        residual: f64,
    },
}
