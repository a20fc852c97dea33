//! Internal root-finding utilities for the implied volatility solver.

/// Configuration for bracketed bisection.
pub(crate) struct BisectionConfig {
    /// Maximum number of halvings.
    pub max_iter: usize,
    /// Convergence threshold on |f(x)|.
    pub f_tol: f64,
    /// Convergence threshold on the bracket width.
    pub x_tol: f64,
}

/// Result of a bisection run.
#[derive(Debug)]
pub(crate) struct BisectionResult {
    /// Final estimate (midpoint of the last bracket).
    pub x: f64,
    /// Objective value at `x`.
    pub fx: f64,
    /// Number of halvings performed.
    pub iterations: usize,
    /// Whether either tolerance was met before the iteration cap.
    pub converged: bool,
}

/// Find a root of a non-decreasing `objective` inside `[lo, hi]`.
///
/// The caller guarantees `objective(lo) ≤ 0 ≤ objective(hi)`. The bracket
/// is halved until `|f(mid)| < f_tol`, the width drops below `x_tol`, or
/// `max_iter` is reached (reported as `converged = false`).
pub(crate) fn bisect_increasing<F>(
    objective: F,
    mut lo: f64,
    mut hi: f64,
    config: &BisectionConfig,
) -> BisectionResult
where
    F: Fn(f64) -> f64,
{
    let mut mid = lo.midpoint(hi);
    let mut f_mid = objective(mid);

    for i in 1..=config.max_iter {
        if f_mid.abs() < config.f_tol || hi - lo < config.x_tol {
            return BisectionResult {
                x: mid,
                fx: f_mid,
                iterations: i - 1,
                converged: true,
            };
        }

        if f_mid > 0.0 {
            hi = mid;
        } else {
            lo = mid;
        }
        mid = lo.midpoint(hi);
        f_mid = objective(mid);
    }

    let converged = f_mid.abs() < config.f_tol || hi - lo < config.x_tol;
    BisectionResult {
        x: mid,
        fx: f_mid,
        iterations: config.max_iter,
        converged,
    }
}
