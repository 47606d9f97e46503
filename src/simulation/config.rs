// src/simulation/config.rs

//! Policy constants for the optimizer.
//!
//! Loaded in layers:
//! 1. Default values in code
//! 2. An optional TOML file
//! 3. Environment variable overrides with the `INVOPT_` prefix

use crate::error::{OptimizerError, OptimizerResult};
use config::{Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Days of average demand held as buffer by the fixed-days policy.
    pub safety_stock_days: f64,
    /// Fixed cost of placing one replenishment order.
    pub order_cost: f64,
    /// Annual holding cost as a fraction of unit cost (EOQ).
    pub holding_cost_rate: f64,
    /// Target probability of not stocking out during lead time, in (0, 1).
    pub service_level: f64,
    /// Factor applied to the lead-time std dev by the shock simulator.
    pub lead_time_variance_multiplier: f64,
    /// Flat holding cost per extra unit of shock safety stock.
    pub flat_holding_cost_per_unit: f64,

    // Fallbacks for products without lead-time observations
    pub default_lead_time_days: f64,
    pub default_lead_time_std_dev: f64,

    pub observation_days: f64,
    pub alert_limit: usize,
    pub margin_bleeder_limit: usize,
    /// Sales at or below this price are treated as promotional and skipped.
    pub min_sales_price: f64,

    // Monte Carlo check of the reorder alerts
    pub service_check_trials: usize,
    pub service_check_seed: u64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            safety_stock_days: 14.0,
            order_cost: 45.0,
            holding_cost_rate: 0.20,
            service_level: 0.95,
            lead_time_variance_multiplier: 1.5,
            flat_holding_cost_per_unit: 2.50,
            default_lead_time_days: 14.0,
            default_lead_time_std_dev: 2.0,
            observation_days: 365.0,
            alert_limit: 50,
            margin_bleeder_limit: 10,
            min_sales_price: 1.0,
            service_check_trials: 1_000,
            service_check_seed: 42,
        }
    }
}

impl OptimizerConfig {
    /// Loads defaults, then `path` (if given, it must exist), then
    /// `INVOPT_*` environment variables, and validates the result.
    pub fn load(path: Option<&Path>) -> OptimizerResult<Self> {
        Self::load_with_env(path, None)
    }

    /// Same as [`OptimizerConfig::load`], reading the overrides from `env`
    /// instead of the process environment when it is `Some`.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> OptimizerResult<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        let settings = builder
            .add_source(
                Environment::with_prefix("INVOPT")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects constants the formulas are undefined for. Values are never
    /// clamped.
    pub fn validate(&self) -> OptimizerResult<()> {
        if !(self.service_level > 0.0 && self.service_level < 1.0) {
            return Err(OptimizerError::Config(format!(
                "service_level must lie strictly between 0 and 1, got {}",
                self.service_level
            )));
        }
        if !self.lead_time_variance_multiplier.is_finite() || self.lead_time_variance_multiplier < 0.0 {
            return Err(OptimizerError::Config(format!(
                "lead_time_variance_multiplier must be a non-negative number, got {}",
                self.lead_time_variance_multiplier
            )));
        }
        if !(self.observation_days > 0.0) {
            return Err(OptimizerError::Config(format!(
                "observation_days must be positive, got {}",
                self.observation_days
            )));
        }

        let non_negative = [
            ("safety_stock_days", self.safety_stock_days),
            ("order_cost", self.order_cost),
            ("holding_cost_rate", self.holding_cost_rate),
            ("flat_holding_cost_per_unit", self.flat_holding_cost_per_unit),
            ("default_lead_time_days", self.default_lead_time_days),
            ("default_lead_time_std_dev", self.default_lead_time_std_dev),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(OptimizerError::Config(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}
