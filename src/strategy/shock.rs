// src/strategy/shock.rs

//! What-if simulation: how much extra buffer (and capital) a product needs
//! when supplier lead times become more erratic.

use crate::error::RecordError;
use crate::model::profile::ProductDemandProfile;
use crate::model::result::ShockOutcome;
use crate::strategy::implementations::ServiceLevelBuffer;

/// Parameters of a lead-time variability shock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeadTimeShock {
    /// Factor applied to the lead-time std dev (1.5 = +50%).
    pub multiplier: f64,
    /// Flat holding cost charged per additional unit.
    pub holding_cost_per_unit: f64,
}

impl LeadTimeShock {
    pub fn new(multiplier: f64, holding_cost_per_unit: f64) -> Result<Self, RecordError> {
        if !multiplier.is_finite() || multiplier < 0.0 {
            return Err(RecordError::invalid(
                "lead_time_variance_multiplier",
                format!("must be a non-negative number, got {multiplier}"),
            ));
        }
        if !holding_cost_per_unit.is_finite() || holding_cost_per_unit < 0.0 {
            return Err(RecordError::invalid(
                "flat_holding_cost_per_unit",
                format!("must be a non-negative number, got {holding_cost_per_unit}"),
            ));
        }
        Ok(Self {
            multiplier,
            holding_cost_per_unit,
        })
    }

    /// Recomputes the probabilistic safety stock with the shocked lead-time
    /// std dev. The demand variance term is left unchanged.
    pub fn simulate(&self, buffer: &ServiceLevelBuffer, profile: &ProductDemandProfile) -> ShockOutcome {
        let safety_stock = buffer.safety_stock_for(profile, profile.lead_time_std_dev);
        let shocked_std_dev = profile.lead_time_std_dev * self.multiplier;
        let shock_safety_stock = buffer.safety_stock_for(profile, shocked_std_dev);

        let additional_units_needed = shock_safety_stock.saturating_sub(safety_stock);
        ShockOutcome {
            safety_stock,
            shock_safety_stock,
            additional_units_needed,
            additional_capital_tied_up: additional_units_needed as f64 * self.holding_cost_per_unit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn profile(demand_std_dev: f64, lead_time_std_dev: f64) -> ProductDemandProfile {
        ProductDemandProfile {
            id: "7".to_string(),
            description: "Shock Test Cabernet".to_string(),
            annual_demand: 3650.0,
            avg_daily_demand: 10.0,
            demand_std_dev,
            avg_lead_time_days: 14.0,
            lead_time_std_dev,
            unit_cost: 12.0,
            current_on_hand: 40,
        }
    }

    #[test]
    fn fifty_percent_shock_on_reference_profile() {
        let buffer = ServiceLevelBuffer::new(0.95).unwrap();
        let shock = LeadTimeShock::new(1.5, 2.5).unwrap();
        let outcome = shock.simulate(&buffer, &profile(2.0, 3.0));

        // Var = 14*4 + 100*20.25 = 2081, z*sqrt = 75.04 -> 76
        assert_eq!(outcome.safety_stock, 51);
        assert_eq!(outcome.shock_safety_stock, 76);
        assert_eq!(outcome.additional_units_needed, 25);
        assert!((outcome.additional_capital_tied_up - 62.5).abs() < 1e-9);
    }

    #[test]
    fn no_lead_time_spread_means_no_shock() {
        let buffer = ServiceLevelBuffer::new(0.95).unwrap();
        let shock = LeadTimeShock::new(3.0, 2.5).unwrap();
        let outcome = shock.simulate(&buffer, &profile(2.0, 0.0));
        assert_eq!(outcome.additional_units_needed, 0);
        assert_eq!(outcome.additional_capital_tied_up, 0.0);
    }

    #[test]
    fn multiplier_below_one_never_reports_negative_units() {
        let buffer = ServiceLevelBuffer::new(0.95).unwrap();
        let shock = LeadTimeShock::new(0.5, 2.5).unwrap();
        let outcome = shock.simulate(&buffer, &profile(2.0, 3.0));
        assert!(outcome.shock_safety_stock <= outcome.safety_stock);
        assert_eq!(outcome.additional_units_needed, 0);
    }

    #[test]
    fn invalid_multiplier_is_rejected() {
        assert!(LeadTimeShock::new(-1.0, 2.5).is_err());
        assert!(LeadTimeShock::new(f64::INFINITY, 2.5).is_err());
    }

    proptest! {
        /// A multiplier of at least one never shrinks the buffer, and a
        /// bigger multiplier never needs less.
        #[test]
        fn prop_shock_is_monotone(
            demand_sd in 0.0f64..50.0,
            lead_sd in 0.0f64..20.0,
            m1 in 1.0f64..4.0,
            step in 0.0f64..4.0,
        ) {
            let buffer = ServiceLevelBuffer::new(0.95).unwrap();
            let p = profile(demand_sd, lead_sd);
            let low = LeadTimeShock::new(m1, 2.5).unwrap().simulate(&buffer, &p);
            let high = LeadTimeShock::new(m1 + step, 2.5).unwrap().simulate(&buffer, &p);
            prop_assert!(low.shock_safety_stock >= low.safety_stock);
            prop_assert!(high.shock_safety_stock >= low.shock_safety_stock);
        }
    }
}
