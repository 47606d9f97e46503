// src/io/transactions.rs

//! Raw retail history as exported from the store system.

use crate::error::OptimizerResult;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SalesRecord {
    pub brand: String,
    #[serde(default)]
    pub description: String,
    pub sales_quantity: f64,
    #[serde(default)]
    pub sales_dollars: f64,
    #[serde(default)]
    pub sales_price: f64,
    pub sales_date: Option<NaiveDate>,
    #[serde(default)]
    pub excise_tax: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PurchaseRecord {
    #[serde(rename = "Brand")]
    pub brand: String,
    #[serde(rename = "PONumber")]
    pub po_number: String,
    #[serde(rename = "PODate")]
    pub po_date: Option<NaiveDate>,
    #[serde(rename = "ReceivingDate")]
    pub receiving_date: Option<NaiveDate>,
    #[serde(rename = "PurchasePrice")]
    pub purchase_price: f64,
    #[serde(rename = "Quantity")]
    pub quantity: f64,
}

/// Purchase-order level invoice, where freight is billed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InvoiceRecord {
    #[serde(rename = "PONumber")]
    pub po_number: String,
    #[serde(rename = "Quantity")]
    pub quantity: f64,
    #[serde(rename = "Freight")]
    pub freight: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InventoryRecord {
    #[serde(rename = "Brand")]
    pub brand: String,
    #[serde(rename = "onHand")]
    pub on_hand: f64,
}

/// All raw tables needed to build product profiles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionHistory {
    pub sales: Vec<SalesRecord>,
    pub purchases: Vec<PurchaseRecord>,
    pub invoices: Vec<InvoiceRecord>,
    pub ending_inventory: Vec<InventoryRecord>,
}

/// Deserializes every row of a headed CSV stream.
pub fn read_records<T: DeserializeOwned, R: Read>(reader: R) -> OptimizerResult<Vec<T>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut records = Vec::new();
    for row in rdr.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

fn read_file<T: DeserializeOwned>(path: &Path) -> OptimizerResult<Vec<T>> {
    let file = std::fs::File::open(path)?;
    let records = read_records(file)?;
    info!(path = %path.display(), rows = records.len(), "loaded csv");
    Ok(records)
}

impl TransactionHistory {
    pub fn load(
        sales: &Path,
        purchases: &Path,
        invoices: &Path,
        ending_inventory: &Path,
    ) -> OptimizerResult<Self> {
        Ok(Self {
            sales: read_file(sales)?,
            purchases: read_file(purchases)?,
            invoices: read_file(invoices)?,
            ending_inventory: read_file(ending_inventory)?,
        })
    }
}
