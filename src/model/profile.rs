// src/model/profile.rs

use crate::error::RecordError;
use crate::simulation::config::OptimizerConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Per-product aggregates as they come out of the aggregation layer.
///
/// Every aggregate that can be missing in the source data is an `Option`.
/// `sanitize` turns this into a `ProductDemandProfile` the formulas accept.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawProductAggregate {
    pub id: String,
    #[serde(default)]
    pub description: String,
    pub annual_demand: Option<f64>,
    pub demand_std_dev: Option<f64>,
    pub avg_lead_time_days: Option<f64>,
    pub lead_time_std_dev: Option<f64>,
    pub unit_cost: Option<f64>,
    pub current_on_hand: Option<f64>,
}

/// Sanitized demand / lead-time profile for one product.
///
/// All fields are finite and non-negative, `unit_cost` is strictly positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDemandProfile {
    pub id: String,
    pub description: String,
    pub annual_demand: f64,
    pub avg_daily_demand: f64,
    pub demand_std_dev: f64,
    pub avg_lead_time_days: f64,
    pub lead_time_std_dev: f64,
    pub unit_cost: f64,
    pub current_on_hand: u64,
}

/// Treats `None` and NaN the same way: as missing.
fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, RecordError> {
    if !value.is_finite() || value < 0.0 {
        return Err(RecordError::invalid(
            field,
            format!("must be a non-negative number, got {value}"),
        ));
    }
    Ok(value)
}

impl RawProductAggregate {
    /// Validates the record and fills missing aggregates with defaults.
    ///
    /// Missing demand, demand std dev and on-hand become 0. Missing lead time
    /// falls back to the configured defaults. A missing or non-positive unit
    /// cost rejects the record: holding cost is undefined without it.
    pub fn sanitize(&self, config: &OptimizerConfig) -> Result<ProductDemandProfile, RecordError> {
        if self.id.trim().is_empty() {
            return Err(RecordError::invalid("id", "product identifier is empty"));
        }

        let unit_cost = match present(self.unit_cost) {
            Some(cost) if cost.is_finite() && cost > 0.0 => cost,
            Some(cost) => {
                return Err(RecordError::invalid(
                    "unit_cost",
                    format!("must be positive, got {cost}"),
                ))
            }
            None => return Err(RecordError::invalid("unit_cost", "no purchase cost recorded")),
        };

        let annual_demand = non_negative("annual_demand", present(self.annual_demand).unwrap_or(0.0))?;
        let demand_std_dev =
            non_negative("demand_std_dev", present(self.demand_std_dev).unwrap_or(0.0))?;

        let (avg_lead_time_days, lead_time_std_dev) = match present(self.avg_lead_time_days) {
            Some(mean) => (
                non_negative("avg_lead_time_days", mean)?,
                non_negative("lead_time_std_dev", present(self.lead_time_std_dev).unwrap_or(0.0))?,
            ),
            None => {
                debug!(id = %self.id, "no lead-time observations, using configured defaults");
                (config.default_lead_time_days, config.default_lead_time_std_dev)
            }
        };

        let on_hand = non_negative("current_on_hand", present(self.current_on_hand).unwrap_or(0.0))?;

        Ok(ProductDemandProfile {
            id: self.id.clone(),
            description: self.description.clone(),
            annual_demand,
            avg_daily_demand: annual_demand / config.observation_days,
            demand_std_dev,
            avg_lead_time_days,
            lead_time_std_dev,
            unit_cost,
            current_on_hand: on_hand.floor() as u64,
        })
    }
}
