use inventory_optimizer::{InventoryOptimizer, OptimizerConfig, RawProductAggregate};
use proptest::prelude::*;

fn record(
    annual_demand: f64,
    demand_std_dev: f64,
    lead_time: f64,
    lead_time_std_dev: f64,
    unit_cost: f64,
    on_hand: f64,
) -> RawProductAggregate {
    RawProductAggregate {
        id: "p".to_string(),
        description: String::new(),
        annual_demand: Some(annual_demand),
        demand_std_dev: Some(demand_std_dev),
        avg_lead_time_days: Some(lead_time),
        lead_time_std_dev: Some(lead_time_std_dev),
        unit_cost: Some(unit_cost),
        current_on_hand: Some(on_hand),
    }
}

proptest! {
    /// Valid profiles always optimize, and shock never needs fewer units.
    #[test]
    fn prop_valid_profiles_always_optimize(
        annual_demand in 0.0f64..100_000.0,
        demand_sd in 0.0f64..100.0,
        lead_time in 0.0f64..120.0,
        lead_sd in 0.0f64..30.0,
        unit_cost in 0.01f64..1_000.0,
        on_hand in 0.0f64..10_000.0,
    ) {
        let optimizer = InventoryOptimizer::new(OptimizerConfig::default()).unwrap();
        let report = optimizer.run(&[record(annual_demand, demand_sd, lead_time, lead_sd, unit_cost, on_hand)]);
        prop_assert!(report.rejected.is_empty());

        let result = &report.results[0];
        prop_assert!(result.reorder_point >= result.safety_stock);
        prop_assert!(result.shock.shock_safety_stock >= result.shock.safety_stock);
        prop_assert_eq!(result.shock.safety_stock, result.safety_stock);
    }

    /// Longer average lead time never lowers the reorder point.
    #[test]
    fn prop_reorder_point_grows_with_lead_time(
        annual_demand in 0.0f64..100_000.0,
        demand_sd in 0.0f64..100.0,
        lead_time in 0.0f64..120.0,
        extra in 0.0f64..60.0,
        lead_sd in 0.0f64..30.0,
    ) {
        let optimizer = InventoryOptimizer::new(OptimizerConfig::default()).unwrap();
        let report = optimizer.run(&[
            record(annual_demand, demand_sd, lead_time, lead_sd, 5.0, 0.0),
            record(annual_demand, demand_sd, lead_time + extra, lead_sd, 5.0, 0.0),
        ]);
        prop_assert!(report.results[1].reorder_point >= report.results[0].reorder_point);
    }
}
