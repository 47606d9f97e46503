//! Inventory analytics core.
//!
//! Turns retail purchase / sales history into per-product demand profiles and
//! computes reorder points, economic order quantities, probabilistic safety
//! stock and its sensitivity to lead-time shocks, next to the revenue (ABC),
//! margin-leakage and working-capital reports of the dashboard.

pub mod aggregation;
pub mod analytics;
pub mod cli;
pub mod error;
pub mod io;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use error::{OptimizerError, OptimizerResult, RecordError};
pub use model::profile::{ProductDemandProfile, RawProductAggregate};
pub use model::result::{BatchReport, OptimizationResult, ReorderAction};
pub use simulation::config::OptimizerConfig;
pub use simulation::engine::InventoryOptimizer;
