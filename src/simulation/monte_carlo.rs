// src/simulation/monte_carlo.rs

use crate::error::RecordError;
use crate::model::profile::ProductDemandProfile;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal, StandardNormal};

/// Empirical check of a safety stock against simulated replenishment cycles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceLevelEstimate {
    pub trials: usize,
    pub cycles_without_stockout: usize,
    /// Fraction of cycles where lead-time demand stayed within the reorder
    /// point.
    pub fill_probability: f64,
}

/// Estimates the probability of not stocking out during lead time.
///
/// Each trial draws a lead time L from Normal(mu_L, sigma_L), then the
/// demand over those L days in one draw from Normal(mu_d * L, sigma_d * sqrt(L)),
/// so a trial costs the same for any lead time. Negative draws are clamped
/// to 0 (lead time and demand cannot be negative). A trial succeeds when
/// that demand does not exceed `mu_d * mu_L + safety_stock`.
///
/// The same `seed` always gives the same estimate.
///
/// # Arguments
/// * `profile` - Sanitized demand / lead-time profile.
/// * `safety_stock` - Buffer under test.
/// * `trials` - Number of simulated cycles (must be > 0).
/// * `seed` - RNG seed.
pub fn estimate_service_level(
    profile: &ProductDemandProfile,
    safety_stock: u64,
    trials: usize,
    seed: u64,
) -> Result<ServiceLevelEstimate, RecordError> {
    if trials == 0 {
        return Err(RecordError::invalid("trials", "at least one trial is required"));
    }

    let lead_time = Normal::new(profile.avg_lead_time_days, profile.lead_time_std_dev)
        .map_err(|e| RecordError::invalid("lead_time_std_dev", e.to_string()))?;
    if !profile.demand_std_dev.is_finite() || profile.demand_std_dev < 0.0 {
        return Err(RecordError::invalid(
            "demand_std_dev",
            format!("cannot sample demand with std dev {}", profile.demand_std_dev),
        ));
    }

    let threshold = profile.avg_daily_demand * profile.avg_lead_time_days + safety_stock as f64;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut cycles_without_stockout = 0;

    for _ in 0..trials {
        let days = lead_time.sample(&mut rng).max(0.0);
        let z: f64 = StandardNormal.sample(&mut rng);
        let demand = (profile.avg_daily_demand * days
            + profile.demand_std_dev * days.sqrt() * z)
            .max(0.0);
        // Tolerance absorbs float noise when the system is deterministic
        if demand <= threshold + 1e-9 {
            cycles_without_stockout += 1;
        }
    }

    Ok(ServiceLevelEstimate {
        trials,
        cycles_without_stockout,
        fill_probability: cycles_without_stockout as f64 / trials as f64,
    })
}
