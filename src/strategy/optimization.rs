// src/strategy/optimization.rs

//! Closed-form inventory formulas.
//!
//! Reorder point (fixed-days and service-level variants), economic order
//! quantity and the z-score lookup behind the probabilistic safety stock.
//! Every quantity that ends up as a stock level is rounded up: truncation
//! would under-stock.

use crate::error::RecordError;
use statrs::distribution::{ContinuousCDF, Normal};

/// Rounds a non-negative quantity up to whole units.
///
/// Negative and NaN values are treated as 0 before the ceiling.
fn ceil_units(value: f64) -> u64 {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        value.ceil() as u64
    }
}

/// Z-score for a one-sided service level (inverse standard normal CDF).
///
/// The quantile is undefined at 0 and 1, so the level must lie strictly
/// between them. It is rejected, never clamped.
pub fn service_level_z_score(service_level: f64) -> Result<f64, RecordError> {
    if !(service_level > 0.0 && service_level < 1.0) {
        return Err(RecordError::invalid(
            "service_level",
            format!("must lie strictly between 0 and 1, got {service_level}"),
        ));
    }
    let standard = Normal::new(0.0, 1.0)
        .map_err(|e| RecordError::degenerate(format!("standard normal: {e}")))?;
    Ok(standard.inverse_cdf(service_level))
}

/// Expected demand over the replenishment lead time.
pub fn lead_time_demand(avg_daily_demand: f64, avg_lead_time_days: f64) -> f64 {
    avg_daily_demand * avg_lead_time_days
}

/// Reorder point with a fixed-days safety buffer (no variance term).
///
/// ROP = ceil(d * L + d * safety_stock_days)
pub fn fixed_days_reorder_point(
    avg_daily_demand: f64,
    avg_lead_time_days: f64,
    safety_stock_days: f64,
) -> u64 {
    let safety_stock_units = avg_daily_demand * safety_stock_days;
    ceil_units(lead_time_demand(avg_daily_demand, avg_lead_time_days) + safety_stock_units)
}

/// Fixed-days buffer in whole units.
pub fn fixed_days_safety_stock(avg_daily_demand: f64, safety_stock_days: f64) -> u64 {
    ceil_units(avg_daily_demand * safety_stock_days)
}

/// Variance of demand during lead time when daily demand and lead time are
/// independent random variables.
///
/// Var = mu_L * sigma_d^2 + mu_d^2 * sigma_L^2
pub fn lead_time_demand_variance(
    avg_daily_demand: f64,
    demand_std_dev: f64,
    avg_lead_time_days: f64,
    lead_time_std_dev: f64,
) -> f64 {
    avg_lead_time_days * demand_std_dev.powi(2)
        + avg_daily_demand.powi(2) * lead_time_std_dev.powi(2)
}

/// Safety stock for a z-score under combined demand and lead-time
/// uncertainty: ceil(z * sqrt(Var)), never negative.
pub fn probabilistic_safety_stock(
    z_score: f64,
    avg_daily_demand: f64,
    demand_std_dev: f64,
    avg_lead_time_days: f64,
    lead_time_std_dev: f64,
) -> u64 {
    let variance = lead_time_demand_variance(
        avg_daily_demand,
        demand_std_dev,
        avg_lead_time_days,
        lead_time_std_dev,
    );
    // sqrt of a negative variance is NaN, which ceil_units maps to 0
    ceil_units(z_score * variance.sqrt())
}

/// ROP = ceil(mu_d * mu_L + safety_stock)
pub fn dynamic_reorder_point(avg_daily_demand: f64, avg_lead_time_days: f64, safety_stock: u64) -> u64 {
    ceil_units(lead_time_demand(avg_daily_demand, avg_lead_time_days) + safety_stock as f64)
}

/// Economic Order Quantity.
///
/// # Formula
/// EOQ = ceil(sqrt(2 * D * S / h)), with h = unit_cost * holding_cost_rate
///
/// # Arguments
/// * `annual_demand` - D, units sold over the observation year.
/// * `order_cost` - S, fixed cost per order.
/// * `unit_cost` - purchase cost per unit.
/// * `holding_cost_rate` - annual holding cost as a fraction of unit cost.
///
/// # Errors
/// `NumericDegenerate` when the holding cost per unit is not strictly
/// positive, `InvalidInput` for negative demand or order cost.
pub fn economic_order_quantity(
    annual_demand: f64,
    order_cost: f64,
    unit_cost: f64,
    holding_cost_rate: f64,
) -> Result<u64, RecordError> {
    if !annual_demand.is_finite() || annual_demand < 0.0 {
        return Err(RecordError::invalid(
            "annual_demand",
            format!("must be a non-negative number, got {annual_demand}"),
        ));
    }
    if !order_cost.is_finite() || order_cost < 0.0 {
        return Err(RecordError::invalid(
            "order_cost",
            format!("must be a non-negative number, got {order_cost}"),
        ));
    }

    let holding_cost = unit_cost * holding_cost_rate;
    if !holding_cost.is_finite() || holding_cost <= 0.0 {
        return Err(RecordError::degenerate(format!(
            "holding cost per unit must be positive, got {holding_cost}"
        )));
    }

    if annual_demand == 0.0 {
        return Ok(0);
    }

    let eoq = ((2.0 * annual_demand * order_cost) / holding_cost).sqrt();
    if !eoq.is_finite() {
        return Err(RecordError::degenerate(format!("EOQ is not finite: {eoq}")));
    }
    Ok(ceil_units(eoq))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn z_score_for_common_service_levels() {
        assert!((service_level_z_score(0.95).unwrap() - 1.6449).abs() < 1e-3);
        assert!((service_level_z_score(0.99).unwrap() - 2.3263).abs() < 1e-3);
        assert!(service_level_z_score(0.5).unwrap().abs() < 1e-9);
    }

    #[test]
    fn z_score_rejects_boundaries() {
        for level in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            assert!(matches!(
                service_level_z_score(level),
                Err(RecordError::InvalidInput { field: "service_level", .. })
            ));
        }
    }

    #[test]
    fn fixed_days_reorder_point_rounds_up() {
        // 2.5/day * 14 days + 2.5 * 14 buffer = 70
        assert_eq!(fixed_days_reorder_point(2.5, 14.0, 14.0), 70);
        // 0.1/day * 10 + 0.1 * 14 = 2.4 -> 3
        assert_eq!(fixed_days_reorder_point(0.1, 10.0, 14.0), 3);
    }

    #[test]
    fn zero_demand_gives_zero_reorder_point() {
        assert_eq!(fixed_days_reorder_point(0.0, 30.0, 14.0), 0);
        assert_eq!(dynamic_reorder_point(0.0, 30.0, 0), 0);
    }

    #[test]
    fn probabilistic_scenario() {
        let z = service_level_z_score(0.95).unwrap();
        assert_eq!(lead_time_demand_variance(10.0, 2.0, 14.0, 3.0), 956.0);

        let safety_stock = probabilistic_safety_stock(z, 10.0, 2.0, 14.0, 3.0);
        assert_eq!(safety_stock, 51);
        assert_eq!(dynamic_reorder_point(10.0, 14.0, safety_stock), 191);
    }

    #[test]
    fn deterministic_system_needs_no_buffer() {
        let z = service_level_z_score(0.99).unwrap();
        assert_eq!(probabilistic_safety_stock(z, 250.0, 0.0, 21.0, 0.0), 0);
    }

    #[test]
    fn low_service_level_never_goes_negative() {
        // z < 0 below the median
        let z = service_level_z_score(0.2).unwrap();
        assert_eq!(probabilistic_safety_stock(z, 10.0, 2.0, 14.0, 3.0), 0);
    }

    #[test]
    fn eoq_scenario() {
        assert_eq!(economic_order_quantity(3650.0, 45.0, 10.0, 0.20).unwrap(), 406);
    }

    #[test]
    fn eoq_zero_demand() {
        assert_eq!(economic_order_quantity(0.0, 45.0, 10.0, 0.20).unwrap(), 0);
    }

    #[test]
    fn eoq_without_holding_cost_is_degenerate() {
        assert!(matches!(
            economic_order_quantity(100.0, 45.0, 0.0, 0.20),
            Err(RecordError::NumericDegenerate { .. })
        ));
        assert!(matches!(
            economic_order_quantity(100.0, 45.0, 10.0, 0.0),
            Err(RecordError::NumericDegenerate { .. })
        ));
    }
}
