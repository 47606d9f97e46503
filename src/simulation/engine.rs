// src/simulation/engine.rs

use crate::error::{OptimizerResult, RecordError};
use crate::model::profile::{ProductDemandProfile, RawProductAggregate};
use crate::model::result::{BatchReport, OptimizationResult, RejectedRecord, ReorderAction};
use crate::simulation::config::OptimizerConfig;
use crate::strategy::implementations::ServiceLevelBuffer;
use crate::strategy::optimization::economic_order_quantity;
use crate::strategy::shock::LeadTimeShock;
use crate::strategy::traits::SafetyStockPolicy;
use tracing::{debug, info, warn};

/// Runs the inventory formulas over a batch of products.
///
/// Every product is processed independently: a record that fails
/// validation or computation lands in `BatchReport::rejected` and the rest
/// of the batch carries on.
#[derive(Debug)]
pub struct InventoryOptimizer {
    config: OptimizerConfig,

    // Reorder-point strategy, interchangeable
    policy: Box<dyn SafetyStockPolicy>,

    // Baseline for the shock simulation, always probabilistic
    service_buffer: ServiceLevelBuffer,
    shock: LeadTimeShock,
}

impl InventoryOptimizer {
    /// Uses the service-level policy for reorder points.
    pub fn new(config: OptimizerConfig) -> OptimizerResult<Self> {
        config.validate()?;
        let policy = Box::new(ServiceLevelBuffer::from_config(&config)?);
        Self::with_policy(config, policy)
    }

    pub fn with_policy(
        config: OptimizerConfig,
        policy: Box<dyn SafetyStockPolicy>,
    ) -> OptimizerResult<Self> {
        config.validate()?;
        let service_buffer = ServiceLevelBuffer::from_config(&config)?;
        let shock = LeadTimeShock::new(
            config.lead_time_variance_multiplier,
            config.flat_holding_cost_per_unit,
        )?;
        debug!(
            policy = policy.name(),
            service_level = service_buffer.service_level(),
            z_score = service_buffer.z_score(),
            "optimizer configured"
        );
        Ok(Self {
            config,
            policy,
            service_buffer,
            shock,
        })
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Validation pass: splits raw aggregates into sanitized profiles and
    /// rejected records before any formula runs.
    pub fn validate(
        &self,
        records: &[RawProductAggregate],
    ) -> (Vec<ProductDemandProfile>, Vec<RejectedRecord>) {
        let mut profiles = Vec::with_capacity(records.len());
        let mut rejected = Vec::new();

        for record in records {
            match record.sanitize(&self.config) {
                Ok(profile) => profiles.push(profile),
                Err(error) => {
                    warn!(id = %record.id, %error, "rejecting product record");
                    rejected.push(RejectedRecord {
                        id: record.id.clone(),
                        error,
                    });
                }
            }
        }
        (profiles, rejected)
    }

    /// Computes all outputs for one sanitized profile.
    pub fn optimize(&self, profile: &ProductDemandProfile) -> Result<OptimizationResult, RecordError> {
        let levels = self.policy.reorder_levels(profile)?;
        let eoq = economic_order_quantity(
            profile.annual_demand,
            self.config.order_cost,
            profile.unit_cost,
            self.config.holding_cost_rate,
        )?;
        let shock = self.shock.simulate(&self.service_buffer, profile);

        debug!(
            id = %profile.id,
            safety_stock = levels.safety_stock,
            reorder_point = levels.reorder_point,
            eoq,
            "optimized product"
        );

        Ok(OptimizationResult {
            id: profile.id.clone(),
            description: profile.description.clone(),
            current_on_hand: profile.current_on_hand,
            avg_daily_demand: profile.avg_daily_demand,
            safety_stock: levels.safety_stock,
            reorder_point: levels.reorder_point,
            eoq,
            action: ReorderAction::from_levels(profile.current_on_hand, levels.reorder_point),
            shock,
        })
    }

    /// Validates and optimizes a whole batch of raw aggregates.
    pub fn run(&self, records: &[RawProductAggregate]) -> BatchReport {
        let (profiles, rejected) = self.validate(records);
        self.optimize_batch(&profiles, rejected)
    }

    /// Optimizes profiles that already went through [`Self::validate`],
    /// appending computation failures to `rejected`.
    pub fn optimize_batch(
        &self,
        profiles: &[ProductDemandProfile],
        mut rejected: Vec<RejectedRecord>,
    ) -> BatchReport {
        let mut results = Vec::with_capacity(profiles.len());

        for profile in profiles {
            match self.optimize(profile) {
                Ok(result) => results.push(result),
                Err(error) => {
                    warn!(id = %profile.id, %error, "skipping product");
                    rejected.push(RejectedRecord {
                        id: profile.id.clone(),
                        error,
                    });
                }
            }
        }

        let report = BatchReport { results, rejected };
        info!(
            policy = self.policy.name(),
            total = report.total(),
            optimized = report.results.len(),
            rejected = report.rejected.len(),
            "optimizer batch complete"
        );
        report
    }

    /// Products that must be reordered now, busiest first, capped at
    /// `alert_limit`.
    pub fn reorder_alerts(&self, report: &BatchReport) -> Vec<OptimizationResult> {
        reorder_alerts(&report.results, self.config.alert_limit)
    }
}

/// Keeps `ReorderNow` rows sorted by average daily demand (descending,
/// stable) and truncates to `limit`.
pub fn reorder_alerts(results: &[OptimizationResult], limit: usize) -> Vec<OptimizationResult> {
    let mut alerts: Vec<OptimizationResult> = results
        .iter()
        .filter(|r| r.action == ReorderAction::ReorderNow)
        .cloned()
        .collect();
    alerts.sort_by(|a, b| b.avg_daily_demand.total_cmp(&a.avg_daily_demand));
    alerts.truncate(limit);
    alerts
}
