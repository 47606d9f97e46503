// src/analytics/margin.rs

use serde::{Deserialize, Serialize};

/// Per-product price and hidden-cost averages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginInput {
    pub id: String,
    pub description: String,
    pub avg_sales_price: f64,
    pub avg_excise_tax: f64,
    pub avg_purchase_price: f64,
    /// Freight is billed per purchase order; this is the per-unit share.
    pub avg_freight_per_unit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarginRow {
    pub id: String,
    pub description: String,
    pub avg_sales_price: f64,
    pub gross_margin: f64,
    pub true_margin: f64,
}

impl MarginInput {
    /// Sales price minus purchase price.
    pub fn gross_margin(&self) -> f64 {
        self.avg_sales_price - self.avg_purchase_price
    }

    /// Gross margin after excise tax and freight.
    pub fn true_margin(&self) -> f64 {
        self.gross_margin() - self.avg_excise_tax - self.avg_freight_per_unit
    }
}

/// The `limit` products with the lowest true margin, lowest first.
///
/// Products priced at or below `min_sales_price` are promotional and left
/// out, as are rows whose margin is not a number.
pub fn margin_bleeders(inputs: &[MarginInput], min_sales_price: f64, limit: usize) -> Vec<MarginRow> {
    let mut rows: Vec<MarginRow> = inputs
        .iter()
        .filter(|input| input.avg_sales_price > min_sales_price)
        .map(|input| MarginRow {
            id: input.id.clone(),
            description: input.description.clone(),
            avg_sales_price: input.avg_sales_price,
            gross_margin: input.gross_margin(),
            true_margin: input.true_margin(),
        })
        .filter(|row| !row.true_margin.is_nan())
        .collect();

    rows.sort_by(|a, b| a.true_margin.total_cmp(&b.true_margin));
    rows.truncate(limit);
    rows
}
