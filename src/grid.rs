//! Spot × volatility price grids for heatmap-style visualization.
//!
//! ```
//! use bsm_pricer::{evaluate_grid, GridSpec, OptionParameters, OptionType};
//!
//! let base = OptionParameters::new(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.2)?;
//! let spec = GridSpec::new(80.0, 120.0, 0.1, 0.4, 10)?;
//! let grid = evaluate_grid(&spec, &base)?;
//!
//! assert_eq!(grid.spots().len(), 10);
//! assert_eq!(grid.calls().len(), 10); // one row per volatility
//! assert!(grid.get(OptionType::Put, 0, 0).is_some());
//! # Ok::<(), bsm_pricer::PricingError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{self, PricingError};
use crate::pricing::price_unchecked;
use crate::types::{OptionParameters, OptionType};
use crate::validate::{validate_non_negative, validate_positive, validate_range};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Axis ranges and resolution of a price grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridSpecRaw", into = "GridSpecRaw")]
pub struct GridSpec {
    min_spot: f64,
    max_spot: f64,
    min_vol: f64,
    max_vol: f64,
    /// Points per axis.
    size: usize,
}

#[derive(Serialize, Deserialize)]
struct GridSpecRaw {
    min_spot: f64,
    max_spot: f64,
    min_vol: f64,
    max_vol: f64,
    size: usize,
}

impl TryFrom<GridSpecRaw> for GridSpec {
    type Error = PricingError;
    fn try_from(raw: GridSpecRaw) -> Result<Self, Self::Error> {
        Self::new(raw.min_spot, raw.max_spot, raw.min_vol, raw.max_vol, raw.size)
    }
}

impl From<GridSpec> for GridSpecRaw {
    fn from(g: GridSpec) -> Self {
        Self {
            min_spot: g.min_spot,
            max_spot: g.max_spot,
            min_vol: g.min_vol,
            max_vol: g.max_vol,
            size: g.size,
        }
    }
}

impl GridSpec {
    /// Create a validated grid specification.
    ///
    /// # Errors
    /// Returns [`PricingError::InvalidInput`] if a spot bound is not positive,
    /// a vol bound is negative, a range is inverted, or `size` is zero.
    pub fn new(
        min_spot: f64,
        max_spot: f64,
        min_vol: f64,
        max_vol: f64,
        size: usize,
    ) -> error::Result<Self> {
        validate_positive(min_spot, "min_spot")?;
        validate_positive(max_spot, "max_spot")?;
        validate_non_negative(min_vol, "min_vol")?;
        validate_non_negative(max_vol, "max_vol")?;
        validate_range(min_spot, max_spot, "spot")?;
        validate_range(min_vol, max_vol, "vol")?;
        if size == 0 {
            return Err(PricingError::InvalidInput {
                message: "grid size must be at least 1".into(),
            });
        }
        Ok(Self {
            min_spot,
            max_spot,
            min_vol,
            max_vol,
            size,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Spot axis, `size` evenly spaced points from `min_spot` to `max_spot`.
    pub fn spots(&self) -> Vec<f64> {
        linspace(self.min_spot, self.max_spot, self.size)
    }

    /// Volatility axis, `size` evenly spaced points from `min_vol` to `max_vol`.
    pub fn vols(&self) -> Vec<f64> {
        linspace(self.min_vol, self.max_vol, self.size)
    }
}

/// `n` evenly spaced points over `[start, end]`, both ends included.
/// A single point is placed at `start`.
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![start];
    }
    let step = (end - start) / (n - 1) as f64;
    (0..n)
        .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
        .collect()
}

/// Call and put prices over a spot × volatility grid.
///
/// Matrices are row-major and indexed `[vol_index][spot_index]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceGrid {
    spots: Vec<f64>,
    vols: Vec<f64>,
    calls: Vec<Vec<f64>>,
    puts: Vec<Vec<f64>>,
}

impl PriceGrid {
    pub fn spots(&self) -> &[f64] {
        &self.spots
    }

    pub fn vols(&self) -> &[f64] {
        &self.vols
    }

    pub fn calls(&self) -> &[Vec<f64>] {
        &self.calls
    }

    pub fn puts(&self) -> &[Vec<f64>] {
        &self.puts
    }

    /// Price matrix for one option type.
    pub fn matrix(&self, option_type: OptionType) -> &[Vec<f64>] {
        match option_type {
            OptionType::Call => &self.calls,
            OptionType::Put => &self.puts,
        }
    }

    /// Price at `(vol_index, spot_index)`, or `None` if out of range.
    pub fn get(&self, option_type: OptionType, vol_index: usize, spot_index: usize) -> Option<f64> {
        self.matrix(option_type)
            .get(vol_index)
            .and_then(|row| row.get(spot_index))
            .copied()
    }
}

/// Price calls and puts at every (spot, vol) point of `spec`.
///
/// Strike, expiry, and rate come from `base`; its spot, volatility, and
/// option type are ignored. With the `parallel` feature, rows are evaluated
/// concurrently; every cell is independent.
///
/// # Errors
/// Returns [`PricingError::InvalidInput`] if a cell's spot makes the
/// forward S·e^(rT) overflow; cell parameters are re-validated and the
/// first rejection is propagated.
pub fn evaluate_grid(spec: &GridSpec, base: &OptionParameters) -> error::Result<PriceGrid> {
    #[cfg(feature = "logging")]
    tracing::debug!(
        size = spec.size,
        strike = base.strike(),
        expiry = base.expiry(),
        "grid evaluation started"
    );

    let spots = spec.spots();
    let vols = spec.vols();

    let call_base = base.with_option_type(OptionType::Call);
    let row = |&vol: &f64| -> error::Result<(Vec<f64>, Vec<f64>)> {
        let mut calls = Vec::with_capacity(spots.len());
        let mut puts = Vec::with_capacity(spots.len());
        for &spot in &spots {
            let call = call_base.with_spot(spot)?.with_vol(vol)?;
            calls.push(price_unchecked(&call));
            puts.push(price_unchecked(&call.with_option_type(OptionType::Put)));
        }
        Ok((calls, puts))
    };

    #[cfg(feature = "parallel")]
    let rows: Vec<(Vec<f64>, Vec<f64>)> = vols
        .par_iter()
        .map(row)
        .collect::<error::Result<Vec<_>>>()?;
    #[cfg(not(feature = "parallel"))]
    let rows: Vec<(Vec<f64>, Vec<f64>)> = vols
        .iter()
        .map(row)
        .collect::<error::Result<Vec<_>>>()?;

    let (calls, puts): (Vec<Vec<f64>>, Vec<Vec<f64>>) = rows.into_iter().unzip();

    #[cfg(feature = "logging")]
    tracing::debug!(cells = spots.len() * vols.len(), "grid evaluation complete");

    Ok(PriceGrid {
        spots,
        vols,
        calls,
        puts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::price;
    use approx::assert_abs_diff_eq;

    fn base() -> OptionParameters {
        OptionParameters::new(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.2).unwrap()
    }

    #[test]
    fn linspace_endpoints() {
        let v = linspace(80.0, 120.0, 5);
        assert_eq!(v, vec![80.0, 90.0, 100.0, 110.0, 120.0]);
        assert_eq!(linspace(0.1, 0.4, 1), vec![0.1]);
        assert_eq!(*linspace(0.1, 0.4, 10).last().unwrap(), 0.4);
    }

    #[test]
    fn spec_rejects_invalid_ranges() {
        assert!(GridSpec::new(0.0, 120.0, 0.1, 0.4, 10).is_err());
        assert!(GridSpec::new(120.0, 80.0, 0.1, 0.4, 10).is_err());
        assert!(GridSpec::new(80.0, 120.0, 0.4, 0.1, 10).is_err());
        assert!(GridSpec::new(80.0, 120.0, -0.1, 0.4, 10).is_err());
        assert!(GridSpec::new(80.0, 120.0, 0.1, f64::NAN, 10).is_err());
        assert!(GridSpec::new(80.0, 120.0, 0.1, 0.4, 0).is_err());
    }

    #[test]
    fn grid_shape_and_axes() {
        let spec = GridSpec::new(80.0, 120.0, 0.1, 0.4, 10).unwrap();
        let grid = evaluate_grid(&spec, &base()).unwrap();
        assert_eq!(grid.spots().len(), 10);
        assert_eq!(grid.vols().len(), 10);
        assert_eq!(grid.calls().len(), 10);
        assert_eq!(grid.puts().len(), 10);
        assert!(grid.calls().iter().all(|row| row.len() == 10));
        assert_eq!(grid.spots()[0], 80.0);
        assert_eq!(grid.spots()[9], 120.0);
        assert_eq!(grid.vols()[0], 0.1);
        assert_eq!(grid.vols()[9], 0.4);
    }

    #[test]
    fn cells_match_direct_pricing() {
        let spec = GridSpec::new(80.0, 120.0, 0.1, 0.4, 7).unwrap();
        let grid = evaluate_grid(&spec, &base()).unwrap();
        for (i, &vol) in grid.vols().iter().enumerate() {
            for (j, &spot) in grid.spots().iter().enumerate() {
                let call = OptionParameters::new(OptionType::Call, spot, 100.0, 1.0, 0.05, vol).unwrap();
                let put = call.with_option_type(OptionType::Put);
                assert_eq!(grid.get(OptionType::Call, i, j), Some(price(&call).unwrap()));
                assert_eq!(grid.get(OptionType::Put, i, j), Some(price(&put).unwrap()));
            }
        }
    }

    #[test]
    fn rows_increase_in_spot_for_calls() {
        let spec = GridSpec::new(80.0, 120.0, 0.1, 0.4, 10).unwrap();
        let grid = evaluate_grid(&spec, &base()).unwrap();
        for row in grid.calls() {
            assert!(row.windows(2).all(|w| w[0] <= w[1]));
        }
        for row in grid.puts() {
            assert!(row.windows(2).all(|w| w[0] >= w[1]));
        }
    }

    #[test]
    fn zero_vol_row_is_deterministic() {
        let spec = GridSpec::new(90.0, 110.0, 0.0, 0.3, 3).unwrap();
        let grid = evaluate_grid(&spec, &base()).unwrap();
        let pv_k = 100.0 * (-0.05_f64).exp();
        assert_abs_diff_eq!(grid.calls()[0][2], 110.0 - pv_k, epsilon = 1e-12);
        assert_eq!(grid.puts()[0][2], 0.0);
    }

    #[test]
    fn single_point_grid() {
        let spec = GridSpec::new(100.0, 100.0, 0.2, 0.2, 1).unwrap();
        let grid = evaluate_grid(&spec, &base()).unwrap();
        assert_abs_diff_eq!(grid.calls()[0][0], 10.450_583_572_185_565, epsilon = 1e-9);
        assert_eq!(grid.get(OptionType::Call, 1, 0), None);
        assert_eq!(grid.get(OptionType::Call, 0, 1), None);
    }

    #[test]
    fn matrix_selects_option_type() {
        let spec = GridSpec::new(90.0, 110.0, 0.1, 0.3, 2).unwrap();
        let grid = evaluate_grid(&spec, &base()).unwrap();
        assert_eq!(grid.matrix(OptionType::Call), grid.calls());
        assert_eq!(grid.matrix(OptionType::Put), grid.puts());
    }

    #[test]
    fn spec_serde_validates() {
        let spec = GridSpec::new(80.0, 120.0, 0.1, 0.4, 10).unwrap();
        let json = serde_json::to_string(&spec).unwrap();
        let spec2: GridSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(spec, spec2);
        let bad = r#"{"min_spot":80.0,"max_spot":120.0,"min_vol":0.1,"max_vol":0.4,"size":0}"#;
        assert!(serde_json::from_str::<GridSpec>(bad).is_err());
    }
}
