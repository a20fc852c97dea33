//! Price a call and a put, then print the Greeks and implied volatility.
//!
//! Shows how to:
//!   - Parse an option type from a short code
//!   - Price both sides of the same contract
//!   - Convert Greeks to display units
//!   - Build a full [`OptionReport`] in one call
//!
//! Run with: `cargo run --example pricing_report`

use bsm_pricer::report::OptionReport;
use bsm_pricer::{OptionParameters, OptionType, price};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let spot = 100.0;
    let strike = 100.0;
    let expiry = 1.0; // years
    let rate = 0.05;
    let vol = 0.2;

    // ---------------------------------------------------------------
    // 1. Call and put prices
    // ---------------------------------------------------------------

    let call = OptionParameters::new("c".parse()?, spot, strike, expiry, rate, vol)?;
    let put = call.with_option_type(OptionType::Put);

    println!("Call Option Price: {:.2}", price(&call)?);
    println!("Put Option Price: {:.2}", price(&put)?);

    // ---------------------------------------------------------------
    // 2. Greeks and implied volatility per side
    // ---------------------------------------------------------------

    for params in [call, put] {
        let report = OptionReport::compute(&params)?;
        let raw = report.greeks;
        let shown = raw.to_market_units();

        println!("\n{} (S={spot}, K={strike}, T={expiry}y, r={rate}, σ={vol})", params.option_type());
        println!("  Price: {:.6}", report.price);
        println!("  Delta: {:>10.6}", shown.delta);
        println!("  Gamma: {:>10.6}", shown.gamma);
        println!("  Theta: {:>10.6} per day   ({:.6} per year)", shown.theta, raw.theta);
        println!("  Vega:  {:>10.6} per 1%    ({:.6} per 1.00)", shown.vega, raw.vega);
        println!("  Rho:   {:>10.6} per 1%    ({:.6} per 1.00)", shown.rho, raw.rho);
        match report.implied_vol {
            Ok(iv) => println!(
                "  Implied vol: {:.10} ({:?}, {} iterations)",
                iv.vol.0, iv.method, iv.iterations
            ),
            Err(err) => println!("  Implied vol: n/a ({err})"),
        }
    }

    Ok(())
}
