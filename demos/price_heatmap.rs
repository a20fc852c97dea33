//! Print call and put price tables over a spot × volatility grid.
//!
//! Rows are volatilities, columns are spot prices, the same layout a
//! heatmap would use.
//!
//! Run with: `cargo run --example price_heatmap`

use bsm_pricer::{GridSpec, OptionParameters, OptionType, PriceGrid, evaluate_grid};

fn print_table(grid: &PriceGrid, option_type: OptionType) {
    println!("\n{option_type} prices (rows: volatility, columns: spot)");
    print!("{:>6}", "");
    for spot in grid.spots() {
        print!("{spot:>8.2}");
    }
    println!();
    for (vol, row) in grid.vols().iter().zip(grid.matrix(option_type)) {
        print!("{vol:>6.2}");
        for value in row {
            print!("{value:>8.2}");
        }
        println!();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base = OptionParameters::new(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.2)?;
    let spec = GridSpec::new(80.0, 120.0, 0.1, 0.4, 10)?;

    let grid = evaluate_grid(&spec, &base)?;
    println!(
        "K={}, T={}y, r={}: {}×{} grid",
        base.strike(),
        base.expiry(),
        base.rate(),
        spec.size(),
        spec.size()
    );
    print_table(&grid, OptionType::Call);
    print_table(&grid, OptionType::Put);

    Ok(())
}
