// src/io/reporting.rs

use crate::error::OptimizerResult;
use crate::model::result::{OptimizationResult, RejectedRecord};
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// One flat row per optimized product, as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationRow {
    pub id: String,
    pub description: String,
    pub current_on_hand: u64,
    pub avg_daily_demand: f64,
    pub safety_stock: u64,
    pub reorder_point: u64,
    pub eoq: u64,
    pub action_required: String,
    pub shock_safety_stock: u64,
    pub additional_units_needed: u64,
    pub additional_capital_tied_up: f64,
}

impl From<&OptimizationResult> for OptimizationRow {
    fn from(result: &OptimizationResult) -> Self {
        Self {
            id: result.id.clone(),
            description: result.description.clone(),
            current_on_hand: result.current_on_hand,
            avg_daily_demand: result.avg_daily_demand,
            safety_stock: result.safety_stock,
            reorder_point: result.reorder_point,
            eoq: result.eoq,
            action_required: result.action.to_string(),
            shock_safety_stock: result.shock.shock_safety_stock,
            additional_units_needed: result.shock.additional_units_needed,
            additional_capital_tied_up: result.shock.additional_capital_tied_up,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRow {
    pub id: String,
    pub reason: String,
}

impl From<&RejectedRecord> for RejectedRow {
    fn from(record: &RejectedRecord) -> Self {
        Self {
            id: record.id.clone(),
            reason: record.error.to_string(),
        }
    }
}

pub fn optimization_rows(results: &[OptimizationResult]) -> Vec<OptimizationRow> {
    results.iter().map(OptimizationRow::from).collect()
}

pub fn rejected_rows(rejected: &[RejectedRecord]) -> Vec<RejectedRow> {
    rejected.iter().map(RejectedRow::from).collect()
}

/// Writes serializable rows to a CSV file with a header line.
///
/// # Arguments
/// * `file_path` - The path to save the file (e.g., "reports/optimization.csv").
/// * `rows` - The records to write, one line each.
pub fn write_csv<T: Serialize>(file_path: &Path, rows: &[T]) -> OptimizerResult<()> {
    let mut wtr = csv::Writer::from_path(file_path)?;

    for row in rows {
        wtr.serialize(row)?;
    }

    // Flush the buffer to ensure all data is written
    wtr.flush()?;

    info!(path = %file_path.display(), rows = rows.len(), "report written");
    Ok(())
}
