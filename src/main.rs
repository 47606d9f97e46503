use anyhow::Context;
use inventory_optimizer::aggregation::{self, AggregatedHistory};
use inventory_optimizer::analytics::{abc, capital, margin};
use inventory_optimizer::cli::{Args, Input, USAGE};
use inventory_optimizer::io::transactions::TransactionHistory;
use inventory_optimizer::io::{profiles, reporting};
use inventory_optimizer::model::result::BatchReport;
use inventory_optimizer::simulation::monte_carlo::estimate_service_level;
use inventory_optimizer::strategy::implementations::policy_by_name;
use inventory_optimizer::{
    InventoryOptimizer, OptimizationResult, OptimizerConfig, ProductDemandProfile,
};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Serialize)]
struct ServiceCheckRow {
    id: String,
    safety_stock: u64,
    trials: usize,
    fill_probability: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inventory_optimizer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 1. ARGUMENTS & CONFIGURATION
    let args = match Args::parse_from(std::env::args()) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}\n\n{USAGE}");
            std::process::exit(2);
        }
    };
    let config = OptimizerConfig::load(args.config_path.as_deref())?;
    let policy = policy_by_name(&args.policy, &config)?;
    let optimizer = InventoryOptimizer::with_policy(config.clone(), policy)?;
    tracing::info!(policy = optimizer.policy_name(), "starting inventory optimizer");

    // 2. LOAD AGGREGATES
    let history = match &args.input {
        Input::Profiles(path) => AggregatedHistory {
            profiles: profiles::read_profiles(path)?,
            ..AggregatedHistory::default()
        },
        Input::History {
            sales,
            purchases,
            invoices,
            inventory,
        } => {
            let raw = TransactionHistory::load(sales, purchases, invoices, inventory)?;
            aggregation::aggregate(&raw, config.observation_days)
        }
    };

    // 3. VALIDATE & OPTIMIZE
    let (sanitized, rejected) = optimizer.validate(&history.profiles);
    let report = optimizer.optimize_batch(&sanitized, rejected);
    let alerts = optimizer.reorder_alerts(&report);

    // 4. EXPORT REPORTS
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;
    let out = |name: &str| args.out_dir.join(name);

    reporting::write_csv(&out("optimization.csv"), &reporting::optimization_rows(&report.results))?;
    reporting::write_csv(&out("reorder_alerts.csv"), &reporting::optimization_rows(&alerts))?;
    reporting::write_csv(&out("rejected.csv"), &reporting::rejected_rows(&report.rejected))?;
    write_service_check(&out("service_check.csv"), &optimizer, &sanitized, &alerts)?;

    let abc_summary = if history.revenues.is_empty() {
        Vec::new()
    } else {
        let summary = abc::summarize(&abc::classify(&history.revenues));
        reporting::write_csv(&out("abc_summary.csv"), &summary)?;
        summary
    };

    if matches!(args.input, Input::History { .. }) {
        let bleeders = margin::margin_bleeders(
            &history.margins,
            config.min_sales_price,
            config.margin_bleeder_limit,
        );
        reporting::write_csv(&out("margin_bleeders.csv"), &bleeders)?;

        let traps = capital::capital_traps(&history.capital);
        reporting::write_csv(&out("capital_traps.csv"), &traps.traps)?;
    }

    // 5. SUMMARY
    print_summary(&report, alerts.len(), &abc_summary);
    Ok(())
}

/// Monte Carlo fill rate of every alerted product's safety stock.
fn write_service_check(
    path: &Path,
    optimizer: &InventoryOptimizer,
    profiles: &[ProductDemandProfile],
    alerts: &[OptimizationResult],
) -> anyhow::Result<()> {
    let config = optimizer.config();
    let by_id: HashMap<&str, _> = profiles.iter().map(|p| (p.id.as_str(), p)).collect();

    let mut rows = Vec::with_capacity(alerts.len());
    for alert in alerts {
        let Some(profile) = by_id.get(alert.id.as_str()) else {
            continue;
        };
        match estimate_service_level(
            profile,
            alert.safety_stock,
            config.service_check_trials,
            config.service_check_seed,
        ) {
            Ok(estimate) => rows.push(ServiceCheckRow {
                id: alert.id.clone(),
                safety_stock: alert.safety_stock,
                trials: estimate.trials,
                fill_probability: estimate.fill_probability,
            }),
            Err(error) => tracing::warn!(id = %alert.id, %error, "service check skipped"),
        }
    }
    reporting::write_csv(path, &rows)?;
    Ok(())
}

fn print_summary(report: &BatchReport, alert_count: usize, abc_summary: &[abc::AbcSummary]) {
    println!("\n=== Inventory Optimization ===");
    println!("Products optimized: {}", report.results.len());
    println!("Products rejected:  {}", report.rejected.len());
    println!("Reorder alerts:     {}", alert_count);

    let extra_capital: f64 = report
        .results
        .iter()
        .map(|r| r.shock.additional_capital_tied_up)
        .sum();
    println!("Capital at risk under lead-time shock: ${:.2}", extra_capital);

    if !abc_summary.is_empty() {
        println!("\n=== ABC Summary ===");
        for row in abc_summary {
            println!(
                "{}: {} brands, ${:.2}",
                row.category, row.entity_count, row.total_revenue
            );
        }
    }
}
