// src/analytics/capital.rs

//! Working capital traps: products that tie up a lot of cash for a long
//! time between receipt and sale.

use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Median};

const MAX_PLAUSIBLE_DAYS: f64 = 365.0;
const DAYS_FACTOR: f64 = 1.5;
const CAPITAL_FACTOR: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapitalInput {
    pub id: String,
    pub description: String,
    pub avg_days_to_sell: f64,
    /// Average outlay per purchase line (price * quantity).
    pub capital_tied_up: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapitalTrapReport {
    /// Rows that passed the data-quality filter.
    pub points: Vec<CapitalInput>,
    pub median_days_to_sell: f64,
    pub median_capital_tied_up: f64,
    /// Subset of `points` in the far top-right quadrant, slowest first.
    pub traps: Vec<CapitalInput>,
}

/// Median of `values`, 0 when empty.
fn median(values: Vec<f64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    Data::new(values).median()
}

/// Drops implausible rows, computes both medians and flags traps.
///
/// Negative or zero days to sell (sold before received) and anything beyond
/// a year come from ingest errors and are discarded. A trap sells slower
/// than 1.5x the median and ties up more than 2x the median capital.
pub fn capital_traps(inputs: &[CapitalInput]) -> CapitalTrapReport {
    let points: Vec<CapitalInput> = inputs
        .iter()
        .filter(|p| p.avg_days_to_sell > 0.0 && p.avg_days_to_sell < MAX_PLAUSIBLE_DAYS)
        .filter(|p| p.capital_tied_up.is_finite())
        .cloned()
        .collect();

    let median_days = median(points.iter().map(|p| p.avg_days_to_sell).collect());
    let median_capital = median(points.iter().map(|p| p.capital_tied_up).collect());

    let mut traps: Vec<CapitalInput> = points
        .iter()
        .filter(|p| {
            p.avg_days_to_sell > median_days * DAYS_FACTOR
                && p.capital_tied_up > median_capital * CAPITAL_FACTOR
        })
        .cloned()
        .collect();
    traps.sort_by(|a, b| b.avg_days_to_sell.total_cmp(&a.avg_days_to_sell));

    CapitalTrapReport {
        points,
        median_days_to_sell: median_days,
        median_capital_tied_up: median_capital,
        traps,
    }
}
