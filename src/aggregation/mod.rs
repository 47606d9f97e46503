// src/aggregation/mod.rs

//! Group-by layer between raw retail history and the optimizer.
//!
//! Produces per-brand aggregates with `None` wherever the history has no
//! observation; defaults are applied later by `RawProductAggregate::sanitize`.

pub mod stats;

use crate::analytics::capital::CapitalInput;
use crate::analytics::margin::MarginInput;
use crate::io::transactions::{PurchaseRecord, SalesRecord, TransactionHistory};
use crate::model::profile::RawProductAggregate;
use chrono::{Datelike, NaiveDate};
use stats::{mean, sample_std_dev, windowed_daily_std_dev};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Every per-brand input the reports need, ordered by brand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedHistory {
    pub profiles: Vec<RawProductAggregate>,
    /// Total sales dollars per brand, input of the ABC classifier.
    pub revenues: Vec<(String, f64)>,
    pub margins: Vec<MarginInput>,
    pub capital: Vec<CapitalInput>,
}

#[derive(Default)]
struct BrandSales<'a> {
    description: &'a str,
    quantity: f64,
    dollars: f64,
    daily: BTreeMap<NaiveDate, f64>,
    prices: Vec<f64>,
    excise: Vec<f64>,
    sale_days: Vec<f64>,
}

fn group_sales(sales: &[SalesRecord]) -> BTreeMap<&str, BrandSales<'_>> {
    let mut brands: BTreeMap<&str, BrandSales<'_>> = BTreeMap::new();
    for sale in sales {
        let entry = brands.entry(sale.brand.as_str()).or_default();
        if sale.description.as_str() > entry.description {
            entry.description = sale.description.as_str();
        }
        entry.quantity += sale.sales_quantity;
        entry.dollars += sale.sales_dollars;
        entry.prices.push(sale.sales_price);
        entry.excise.push(sale.excise_tax);
        if let Some(date) = sale.sales_date {
            *entry.daily.entry(date).or_insert(0.0) += sale.sales_quantity;
            entry.sale_days.push(date.num_days_from_ce() as f64);
        }
    }
    brands
}

fn group_purchases(purchases: &[PurchaseRecord]) -> HashMap<&str, Vec<&PurchaseRecord>> {
    let mut brands: HashMap<&str, Vec<&PurchaseRecord>> = HashMap::new();
    for purchase in purchases {
        brands.entry(purchase.brand.as_str()).or_default().push(purchase);
    }
    brands
}

/// Whole days between order and receipt, for purchases where both dates
/// are known and the receipt does not precede the order.
fn lead_times(purchases: &[&PurchaseRecord]) -> Vec<f64> {
    purchases
        .iter()
        .filter_map(|p| match (p.po_date, p.receiving_date) {
            (Some(ordered), Some(received)) if received >= ordered => {
                Some((received - ordered).num_days() as f64)
            }
            _ => None,
        })
        .collect()
}

/// Builds all per-brand aggregates from raw history.
///
/// # Arguments
/// * `history` - Raw sales, purchase, invoice and inventory rows.
/// * `observation_days` - Length of the sales window; daily demand and its
///   spread are measured over this many days.
pub fn aggregate(history: &TransactionHistory, observation_days: f64) -> AggregatedHistory {
    let window = observation_days.round().max(0.0) as usize;
    let sales = group_sales(&history.sales);
    let purchases = group_purchases(&history.purchases);

    let mut on_hand: HashMap<&str, f64> = HashMap::new();
    for row in &history.ending_inventory {
        *on_hand.entry(row.brand.as_str()).or_insert(0.0) += row.on_hand;
    }

    // Freight is billed per PO: spread it over the PO's quantity
    let mut po_totals: HashMap<&str, (f64, f64)> = HashMap::new();
    for invoice in &history.invoices {
        let totals = po_totals.entry(invoice.po_number.as_str()).or_insert((0.0, 0.0));
        totals.0 += invoice.freight;
        totals.1 += invoice.quantity;
    }
    let freight_per_unit: HashMap<&str, f64> = po_totals
        .into_iter()
        .filter(|(_, (_, quantity))| *quantity != 0.0)
        .map(|(po, (freight, quantity))| (po, freight / quantity))
        .collect();

    let mut out = AggregatedHistory::default();
    let no_purchases = Vec::new();

    for (brand, sold) in &sales {
        let bought = purchases.get(brand).unwrap_or(&no_purchases);

        let daily: Vec<f64> = sold.daily.values().copied().collect();
        let lead = lead_times(bought);
        let prices: Vec<f64> = bought.iter().map(|p| p.purchase_price).collect();
        if lead.is_empty() {
            debug!(brand, "no lead-time observations");
        }

        out.profiles.push(RawProductAggregate {
            id: brand.to_string(),
            description: sold.description.to_string(),
            annual_demand: Some(sold.quantity),
            demand_std_dev: Some(windowed_daily_std_dev(&daily, window)),
            avg_lead_time_days: mean(&lead),
            lead_time_std_dev: sample_std_dev(&lead),
            unit_cost: mean(&prices),
            current_on_hand: on_hand.get(brand).copied(),
        });
        out.revenues.push((brand.to_string(), sold.dollars));

        if bought.is_empty() {
            continue;
        }

        let freights: Vec<f64> = bought
            .iter()
            .filter_map(|p| freight_per_unit.get(p.po_number.as_str()).copied())
            .collect();
        out.margins.push(MarginInput {
            id: brand.to_string(),
            description: sold.description.to_string(),
            avg_sales_price: mean(&sold.prices).unwrap_or(0.0),
            avg_excise_tax: mean(&sold.excise).unwrap_or(0.0),
            avg_purchase_price: mean(&prices).unwrap_or(0.0),
            avg_freight_per_unit: mean(&freights).unwrap_or(0.0),
        });

        let received: Vec<&PurchaseRecord> =
            bought.iter().copied().filter(|p| p.receiving_date.is_some()).collect();
        let receipt_days: Vec<f64> = received
            .iter()
            .filter_map(|p| p.receiving_date)
            .map(|d| d.num_days_from_ce() as f64)
            .collect();
        let outlays: Vec<f64> = received.iter().map(|p| p.purchase_price * p.quantity).collect();

        if let (Some(sold_at), Some(received_at), Some(capital)) =
            (mean(&sold.sale_days), mean(&receipt_days), mean(&outlays))
        {
            out.capital.push(CapitalInput {
                id: brand.to_string(),
                description: sold.description.to_string(),
                avg_days_to_sell: sold_at - received_at,
                capital_tied_up: capital,
            });
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::transactions::{InventoryRecord, InvoiceRecord};

    fn date(day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2016, 1, day)
    }

    fn sale(brand: &str, qty: f64, price: f64, day: u32) -> SalesRecord {
        SalesRecord {
            brand: brand.to_string(),
            description: format!("Brand {brand}"),
            sales_quantity: qty,
            sales_dollars: qty * price,
            sales_price: price,
            sales_date: date(day),
            excise_tax: 0.5,
        }
    }

    fn purchase(brand: &str, po: &str, ordered: u32, received: Option<u32>, price: f64) -> PurchaseRecord {
        PurchaseRecord {
            brand: brand.to_string(),
            po_number: po.to_string(),
            po_date: date(ordered),
            receiving_date: received.and_then(date),
            purchase_price: price,
            quantity: 10.0,
        }
    }

    fn history() -> TransactionHistory {
        TransactionHistory {
            sales: vec![
                sale("A", 4.0, 10.0, 20),
                sale("A", 2.0, 10.0, 20),
                sale("A", 6.0, 12.0, 25),
                sale("B", 1.0, 30.0, 28),
            ],
            purchases: vec![
                purchase("A", "1", 1, Some(8), 6.0),
                purchase("A", "2", 3, Some(14), 8.0),
                purchase("A", "3", 5, Some(2), 7.0),
                purchase("A", "4", 5, None, 7.0),
                purchase("Z", "5", 1, Some(2), 1.0),
            ],
            invoices: vec![
                InvoiceRecord { po_number: "1".to_string(), quantity: 10.0, freight: 5.0 },
                InvoiceRecord { po_number: "2".to_string(), quantity: 0.0, freight: 3.0 },
            ],
            ending_inventory: vec![
                InventoryRecord { brand: "A".to_string(), on_hand: 7.0 },
                InventoryRecord { brand: "A".to_string(), on_hand: 3.0 },
            ],
        }
    }

    #[test]
    fn profiles_follow_sales_brands() {
        let agg = aggregate(&history(), 10.0);
        let ids: Vec<&str> = agg.profiles.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);

        let a = &agg.profiles[0];
        assert_eq!(a.annual_demand, Some(12.0));
        assert_eq!(a.current_on_hand, Some(10.0));
        assert_eq!(a.unit_cost, Some(7.0));
        // receipts on day 8 and 14 only; PO 3 arrived "before" it was placed
        assert_eq!(a.avg_lead_time_days, Some(9.0));
        assert!((a.lead_time_std_dev.unwrap() - 8f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn daily_spread_counts_idle_days() {
        let agg = aggregate(&history(), 10.0);
        // daily totals [6, 6] padded to 10 days
        let expected = windowed_daily_std_dev(&[6.0, 6.0], 10);
        assert_eq!(agg.profiles[0].demand_std_dev, Some(expected));
    }

    #[test]
    fn brand_without_purchases_has_no_cost_or_lead_time() {
        let agg = aggregate(&history(), 365.0);
        let b = &agg.profiles[1];
        assert_eq!(b.unit_cost, None);
        assert_eq!(b.avg_lead_time_days, None);
        assert_eq!(b.current_on_hand, None);
        assert!(agg.margins.iter().all(|m| m.id != "B"));
    }

    #[test]
    fn freight_is_spread_per_unit() {
        let agg = aggregate(&history(), 365.0);
        let a = &agg.margins[0];
        // only PO 1 has a usable freight rate (PO 2 has zero quantity)
        assert_eq!(a.avg_freight_per_unit, 0.5);
        assert_eq!(a.avg_excise_tax, 0.5);
    }

    #[test]
    fn revenue_and_capital_inputs() {
        let agg = aggregate(&history(), 365.0);
        assert_eq!(agg.revenues, vec![("A".to_string(), 132.0), ("B".to_string(), 30.0)]);

        let a = &agg.capital[0];
        // sold on days 20, 20, 25; received on days 8, 14, 2
        let expected = (20.0 + 20.0 + 25.0) / 3.0 - (8.0 + 14.0 + 2.0) / 3.0;
        assert!((a.avg_days_to_sell - expected).abs() < 1e-9);
        assert_eq!(a.capital_tied_up, 70.0);
    }
}
