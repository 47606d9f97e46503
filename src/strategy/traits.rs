// src/strategy/traits.rs

use crate::error::RecordError;
use crate::model::profile::ProductDemandProfile;
use std::fmt::Debug;

/// Buffer stock and reorder point produced by a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderLevels {
    pub safety_stock: u64,
    pub reorder_point: u64,
}

/// Decides how much buffer a product carries and when to reorder it.
///
/// Policies are stateless: the same profile always yields the same levels.
/// We require `Send` + `Sync` so a policy can be shared between callers.
pub trait SafetyStockPolicy: Debug + Send + Sync {
    /// Short name used in logs and on the command line.
    fn name(&self) -> &'static str;

    /// Computes safety stock and reorder point for one product.
    ///
    /// # Arguments
    /// * `profile` - Sanitized demand and lead-time aggregates.
    fn reorder_levels(&self, profile: &ProductDemandProfile) -> Result<ReorderLevels, RecordError>;
}
