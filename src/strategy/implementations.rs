// src/strategy/implementations.rs

use crate::error::RecordError;
use crate::model::profile::ProductDemandProfile;
use crate::simulation::config::OptimizerConfig;
use crate::strategy::optimization::{
    dynamic_reorder_point, fixed_days_reorder_point, fixed_days_safety_stock,
    probabilistic_safety_stock, service_level_z_score,
};
use crate::strategy::traits::{ReorderLevels, SafetyStockPolicy};

// =========================================================================
// 1. Fixed-Days Buffer
// =========================================================================

/// The "basic" policy behind the reorder-alert view.
///
/// Holds a fixed number of days of average demand as buffer and ignores
/// variability entirely.
/// Formula: ROP = ceil(d * L + d * safety_stock_days)
#[derive(Debug, Clone)]
pub struct FixedDaysBuffer {
    safety_stock_days: f64,
}

impl FixedDaysBuffer {
    pub fn new(safety_stock_days: f64) -> Self {
        Self { safety_stock_days }
    }

    pub fn from_config(config: &OptimizerConfig) -> Self {
        Self::new(config.safety_stock_days)
    }
}

impl SafetyStockPolicy for FixedDaysBuffer {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn reorder_levels(&self, profile: &ProductDemandProfile) -> Result<ReorderLevels, RecordError> {
        Ok(ReorderLevels {
            safety_stock: fixed_days_safety_stock(profile.avg_daily_demand, self.safety_stock_days),
            reorder_point: fixed_days_reorder_point(
                profile.avg_daily_demand,
                profile.avg_lead_time_days,
                self.safety_stock_days,
            ),
        })
    }
}

// =========================================================================
// 2. Service-Level Buffer (probabilistic)
// =========================================================================

/// Safety stock sized to hit a target service level when both daily demand
/// and lead time are random.
///
/// SS = ceil(z * sqrt(mu_L * sigma_d^2 + mu_d^2 * sigma_L^2))
/// ROP = ceil(mu_d * mu_L + SS)
#[derive(Debug, Clone)]
pub struct ServiceLevelBuffer {
    service_level: f64,
    z_score: f64,
}

impl ServiceLevelBuffer {
    /// Fails when `service_level` is outside the open interval (0, 1).
    pub fn new(service_level: f64) -> Result<Self, RecordError> {
        let z_score = service_level_z_score(service_level)?;
        Ok(Self {
            service_level,
            z_score,
        })
    }

    pub fn from_config(config: &OptimizerConfig) -> Result<Self, RecordError> {
        Self::new(config.service_level)
    }

    pub fn service_level(&self) -> f64 {
        self.service_level
    }

    pub fn z_score(&self) -> f64 {
        self.z_score
    }

    /// Safety stock for explicit demand / lead-time spreads. The shock
    /// simulator calls this with a scaled lead-time std dev.
    pub fn safety_stock_for(&self, profile: &ProductDemandProfile, lead_time_std_dev: f64) -> u64 {
        probabilistic_safety_stock(
            self.z_score,
            profile.avg_daily_demand,
            profile.demand_std_dev,
            profile.avg_lead_time_days,
            lead_time_std_dev,
        )
    }
}

impl SafetyStockPolicy for ServiceLevelBuffer {
    fn name(&self) -> &'static str {
        "service"
    }

    fn reorder_levels(&self, profile: &ProductDemandProfile) -> Result<ReorderLevels, RecordError> {
        let safety_stock = self.safety_stock_for(profile, profile.lead_time_std_dev);
        Ok(ReorderLevels {
            safety_stock,
            reorder_point: dynamic_reorder_point(
                profile.avg_daily_demand,
                profile.avg_lead_time_days,
                safety_stock,
            ),
        })
    }
}

/// Builds a boxed policy from its command-line name.
pub fn policy_by_name(
    name: &str,
    config: &OptimizerConfig,
) -> Result<Box<dyn SafetyStockPolicy>, RecordError> {
    match name {
        "fixed" => Ok(Box::new(FixedDaysBuffer::from_config(config))),
        "service" => Ok(Box::new(ServiceLevelBuffer::from_config(config)?)),
        other => Err(RecordError::invalid(
            "policy",
            format!("unknown policy '{other}', expected 'fixed' or 'service'"),
        )),
    }
}
