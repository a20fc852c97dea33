//! Black-Scholes-Merton implied volatility via safeguarded Newton-Raphson.
//!
//! The solver keeps a bracket `[lo, hi]` that always contains the root
//! (the price is strictly increasing in σ). Newton steps use Vega as the
//! derivative and tighten the bracket as they go; when Vega drops below the
//! floor, a step would leave the bracket, or the Newton budget runs out,
//! the remaining bracket is bisected.
//!
//! # References
//! - Corrado, C. & Miller, T. "A note on a simple, accurate formula to compute
//!   implied standard deviations" (1996), used for the initial guess.

use std::f64::consts::PI;

use crate::conventions::{discount_factor, price_bounds};
use crate::error::{self, PricingError};
use crate::greeks::vega;
use crate::implied::{ImpliedVol, ImpliedVolQuery, SolverConfig, SolverMethod};
use crate::optim::{BisectionConfig, bisect_increasing};
use crate::pricing::price_unchecked;
use crate::types::{OptionType, Vol};

/// Black-Scholes-Merton implied volatility calculator.
///
/// # Examples
/// ```
/// use bsm_pricer::implied::{BlackImpliedVol, SolverConfig, SolverMethod};
/// use bsm_pricer::{ImpliedVolQuery, OptionType};
///
/// let solver = BlackImpliedVol::with_config(SolverConfig {
///     price_tolerance: 1e-10,
///     ..SolverConfig::default()
/// });
/// let query = ImpliedVolQuery::new(5.573_526_022_256_971, OptionType::Put, 100.0, 100.0, 1.0, 0.05)?;
/// let iv = solver.solve(&query)?;
/// assert!((iv.vol.0 - 0.2).abs() < 1e-9);
/// assert_eq!(iv.method, SolverMethod::Newton);
/// # Ok::<(), bsm_pricer::PricingError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct BlackImpliedVol {
    config: SolverConfig,
}

impl BlackImpliedVol {
    /// Solver with the default [`SolverConfig`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Solver with a custom configuration (validated on each solve).
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Recover the volatility that reproduces `query.observed_price()`.
    ///
    /// # Errors
    /// - [`PricingError::InvalidInput`] if the configuration is invalid.
    /// - [`PricingError::OutOfBoundsPrice`] if the price lies outside the
    ///   no-arbitrage bounds or outside `[price(min_vol), price(max_vol)]`.
    ///   No iteration is attempted. An expired option (`T = 0`) carries no
    ///   volatility information and always lands here.
    /// - [`PricingError::NonConvergence`] if bisection exhausts its cap.
    pub fn solve(&self, query: &ImpliedVolQuery) -> error::Result<ImpliedVol> {
        let config = &self.config;
        config.validate()?;

        let target = query.observed_price();
        let (lower, upper) = price_bounds(
            query.option_type(),
            query.spot(),
            query.strike(),
            query.rate(),
            query.expiry(),
        );
        if !(target > lower && target < upper) {
            return Err(PricingError::OutOfBoundsPrice {
                price: target,
                lower,
                upper,
            });
        }

        let objective = |vol: f64| price_unchecked(&query.params_at(vol)) - target;

        // The bracket edges bound what the solver can reach.
        let f_min = objective(config.min_vol);
        let f_max = objective(config.max_vol);
        if f_min > 0.0 || f_max < 0.0 {
            return Err(PricingError::OutOfBoundsPrice {
                price: target,
                lower: f_min + target,
                upper: f_max + target,
            });
        }

        let mut lo = config.min_vol;
        let mut hi = config.max_vol;
        let mut sigma = self.initial_guess(query).clamp(lo, hi);
        let mut steps = 0;

        while steps < config.max_newton_iterations {
            steps += 1;
            let params = query.params_at(sigma);
            let diff = price_unchecked(&params) - target;
            if diff.abs() < config.price_tolerance {
                return Ok(self.converged(sigma, steps, diff.abs(), SolverMethod::Newton));
            }
            if diff > 0.0 {
                hi = sigma;
            } else {
                lo = sigma;
            }

            let v = vega(&params);
            if v < config.vega_floor {
                #[cfg(feature = "logging")]
                tracing::debug!(sigma, vega = v, steps, "vega below floor, switching to bisection");
                break;
            }

            let next = sigma - diff / v;
            if !(next > lo && next < hi) {
                #[cfg(feature = "logging")]
                tracing::debug!(sigma, next, lo, hi, "newton step left bracket, switching to bisection");
                break;
            }
            if (next - sigma).abs() < config.vol_tolerance {
                let residual = objective(next).abs();
                return Ok(self.converged(next, steps, residual, SolverMethod::Newton));
            }
            sigma = next;
        }

        let result = bisect_increasing(
            objective,
            lo,
            hi,
            &BisectionConfig {
                max_iter: config.max_bisection_iterations,
                f_tol: config.price_tolerance,
                x_tol: config.vol_tolerance,
            },
        );
        let iterations = steps + result.iterations;
        if result.converged {
            return Ok(self.converged(
                result.x,
                iterations,
                result.fx.abs(),
                SolverMethod::Bisection,
            ));
        }

        #[cfg(feature = "logging")]
        tracing::warn!(
            iterations,
            last_estimate = result.x,
            residual = result.fx.abs(),
            "implied volatility did not converge"
        );
        Err(PricingError::NonConvergence {
            iterations,
            last_estimate: result.x,
            residual: result.fx.abs(),
        })
    }

    fn converged(
        &self,
        vol: f64,
        iterations: usize,
        residual: f64,
        method: SolverMethod,
    ) -> ImpliedVol {
        #[cfg(feature = "logging")]
        tracing::debug!(vol, iterations, residual, ?method, "implied volatility converged");
        ImpliedVol {
            vol: Vol(vol),
            iterations,
            residual,
            method,
        }
    }

    /// Corrado-Miller estimate, in spot terms with the discounted strike
    /// X = K·e^(−rT) and the call-equivalent price C:
    ///
    /// ```text
    /// σ₀ = √(2π/T) / (S + X) · [C − (S − X)/2 + √((C − (S − X)/2)² − (S − X)²/π)]
    /// ```
    ///
    /// Falls back to `initial_vol` when the square root is imaginary.
    fn initial_guess(&self, query: &ImpliedVolQuery) -> f64 {
        let spot = query.spot();
        let expiry = query.expiry();
        let pv_strike = query.strike() * discount_factor(query.rate(), expiry);
        let call = match query.option_type() {
            OptionType::Call => query.observed_price(),
            OptionType::Put => query.observed_price() + spot - pv_strike,
        };
        let gap = spot - pv_strike;
        let centered = call - 0.5 * gap;
        let disc = centered * centered - gap * gap / PI;
        if disc < 0.0 {
            return self.config.initial_vol;
        }
        let guess = (2.0 * PI / expiry).sqrt() / (spot + pv_strike) * (centered + disc.sqrt());
        if guess.is_finite() && guess > 0.0 {
            guess
        } else {
            self.config.initial_vol
        }
    }
}
