//! Extract implied volatility from option prices.
//!
//! Shows how to:
//!   - Invert an exact model price
//!   - See the effect of feeding in a price rounded to cents
//!   - Handle out-of-bounds prices and solver failures
//!
//! Run with: `cargo run --example implied_vol`

use bsm_pricer::implied::BlackImpliedVol;
use bsm_pricer::{
    ImpliedVolQuery, OptionParameters, OptionType, PricingError, SolverConfig, implied_volatility,
    price,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let params = OptionParameters::new(OptionType::Call, 100.0, 105.0, 0.5, 0.03, 0.25)?;
    let exact = price(&params)?;

    // ---------------------------------------------------------------
    // 1. Exact round-trip
    // ---------------------------------------------------------------

    let iv = implied_volatility(&ImpliedVolQuery::from_params(exact, &params)?)?;
    println!("Exact price round-trip");
    println!("  Price:       {exact:.12}");
    println!("  Input vol:   {:.12}", params.vol());
    println!("  Implied vol: {:.12}", iv.vol.0);
    println!("  Method: {:?}, iterations: {}, residual: {:.2e}", iv.method, iv.iterations, iv.residual);

    // ---------------------------------------------------------------
    // 2. Rounded price: the solver inverts what it is given
    // ---------------------------------------------------------------

    let rounded = (exact * 100.0).round() / 100.0;
    let iv_rounded = implied_volatility(&ImpliedVolQuery::from_params(rounded, &params)?)?;
    println!("\nRounded price ({rounded:.2})");
    println!("  Implied vol: {:.12}", iv_rounded.vol.0);
    println!("  Shift from input: {:+.2e}", iv_rounded.vol.0 - params.vol());

    // ---------------------------------------------------------------
    // 3. Failure modes
    // ---------------------------------------------------------------

    println!("\nFailure modes");
    let near_spot = ImpliedVolQuery::new(99.9, OptionType::Call, 100.0, 100.0, 1e-3, 0.05)?;
    match implied_volatility(&near_spot) {
        Err(PricingError::OutOfBoundsPrice { price, lower, upper }) => {
            println!("  {price} with T=1e-3: attainable range ({lower:.6}, {upper:.6})");
        }
        other => println!("  unexpected: {other:?}"),
    }

    let starved = BlackImpliedVol::with_config(SolverConfig {
        max_newton_iterations: 0,
        max_bisection_iterations: 8,
        ..SolverConfig::default()
    });
    match starved.solve(&ImpliedVolQuery::from_params(exact, &params)?) {
        Err(err @ PricingError::NonConvergence { .. }) => println!("  {err}"),
        other => println!("  unexpected: {other:?}"),
    }

    Ok(())
}
