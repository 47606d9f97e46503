// src/io/profiles.rs

use crate::error::OptimizerResult;
use crate::io::transactions::read_records;
use crate::model::profile::RawProductAggregate;
use std::path::Path;
use tracing::info;

/// Reads pre-aggregated product profiles. Empty cells are read as missing
/// aggregates.
///
/// Expected header:
/// `id,description,annual_demand,demand_std_dev,avg_lead_time_days,lead_time_std_dev,unit_cost,current_on_hand`
pub fn read_profiles(file_path: &Path) -> OptimizerResult<Vec<RawProductAggregate>> {
    let file = std::fs::File::open(file_path)?;
    let profiles: Vec<RawProductAggregate> = read_records(file)?;
    info!(path = %file_path.display(), rows = profiles.len(), "loaded product profiles");
    Ok(profiles)
}
