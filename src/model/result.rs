// src/model/result.rs

use crate::error::RecordError;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReorderAction {
    ReorderNow,
    StockAdequate,
}

impl ReorderAction {
    /// `ReorderNow` iff stock on hand is strictly below the reorder point.
    pub fn from_levels(current_on_hand: u64, reorder_point: u64) -> Self {
        if current_on_hand < reorder_point {
            ReorderAction::ReorderNow
        } else {
            ReorderAction::StockAdequate
        }
    }
}

impl fmt::Display for ReorderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReorderAction::ReorderNow => write!(f, "Reorder Now"),
            ReorderAction::StockAdequate => write!(f, "Stock Adequate"),
        }
    }
}

/// Baseline vs shocked safety stock for one product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShockOutcome {
    pub safety_stock: u64,
    pub shock_safety_stock: u64,
    pub additional_units_needed: u64,
    pub additional_capital_tied_up: f64,
}

/// Everything the optimizer derives for a single product.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult {
    // Display fields
    pub id: String,
    pub description: String,
    pub current_on_hand: u64,
    pub avg_daily_demand: f64,

    pub safety_stock: u64,
    pub reorder_point: u64,
    pub eoq: u64,
    pub action: ReorderAction,
    pub shock: ShockOutcome,
}

/// A product that was dropped from the batch and why.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRecord {
    pub id: String,
    pub error: RecordError,
}

/// Output of one optimizer run: partial results are always returned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub results: Vec<OptimizationResult>,
    pub rejected: Vec<RejectedRecord>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.results.len() + self.rejected.len()
    }
}
