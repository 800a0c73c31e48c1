//! One-parameter sweeps over a scenario
//!
//! Every value in the sweep is solved independently. A value that fails validation
//! or has no valid equilibrium becomes a failed row carrying the error text, and
//! the remaining values are still solved.

use crate::config::SweepFile;
use crate::{MarketSimulation, Result, SimulationResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// One row of `sweep.csv`; outcome columns are empty for failed points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepRow {
    pub parameter: String,
    pub value: f64,
    pub ok: bool,
    pub baseline_price: Option<f64>,
    pub baseline_quantity: Option<f64>,
    pub post_price: Option<f64>,
    pub post_quantity: Option<f64>,
    pub consumer_surplus: Option<f64>,
    pub producer_surplus: Option<f64>,
    pub shortage_kind: Option<String>,
    pub shortage_magnitude: Option<f64>,
    pub control_binding: Option<bool>,
    pub error: Option<String>,
}

impl SweepRow {
    pub fn from_outcome(parameter: &str, value: f64, outcome: &Result<SimulationResult>) -> Self {
        match outcome {
            Ok(result) => SweepRow {
                parameter: parameter.to_string(),
                value,
                ok: true,
                baseline_price: Some(result.baseline.price),
                baseline_quantity: Some(result.baseline.quantity),
                post_price: result.post_intervention.map(|p| p.price),
                post_quantity: result.post_intervention.map(|p| p.quantity),
                consumer_surplus: Some(result.surplus.consumer_surplus),
                producer_surplus: Some(result.surplus.producer_surplus),
                shortage_kind: result.shortage.map(|s| s.kind.to_string()),
                shortage_magnitude: result.shortage.map(|s| s.magnitude),
                control_binding: result.control_is_binding(),
                error: None,
            },
            Err(e) => SweepRow {
                parameter: parameter.to_string(),
                value,
                ok: false,
                baseline_price: None,
                baseline_quantity: None,
                post_price: None,
                post_quantity: None,
                consumer_surplus: None,
                producer_surplus: None,
                shortage_kind: None,
                shortage_magnitude: None,
                control_binding: None,
                error: Some(e.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSummary {
    pub experiment: String,
    pub description: String,
    pub parameter: String,
    pub num_points: usize,
    pub successful_points: usize,
    pub failed_points: usize,
    pub timestamp: String,
    pub rows: Vec<SweepRow>,
}

impl SweepSummary {
    pub fn new(sweep: &SweepFile, rows: Vec<SweepRow>) -> Self {
        let successful_points = rows.iter().filter(|r| r.ok).count();
        SweepSummary {
            experiment: sweep.experiment.name.clone(),
            description: sweep.experiment.description.clone(),
            parameter: sweep.sweep.parameter.name().to_string(),
            num_points: rows.len(),
            successful_points,
            failed_points: rows.len() - successful_points,
            timestamp: chrono::Utc::now().to_rfc3339(),
            rows,
        }
    }
}

/// Solve the base scenario with the swept parameter set to `value`
pub fn solve_point(sweep: &SweepFile, value: f64) -> Result<SimulationResult> {
    let scenario = sweep.scenario_at(value)?;
    let params = scenario.parameters()?;
    let control = scenario.price_control()?;
    MarketSimulation::new(params, control).run()
}

/// Solve every value in order, one row per value
pub fn run_sweep(sweep: &SweepFile) -> Vec<SweepRow> {
    let parameter = sweep.sweep.parameter.name();
    sweep
        .sweep
        .values
        .iter()
        .map(|&value| {
            let outcome = solve_point(sweep, value);
            if let Err(e) = &outcome {
                warn!(parameter, value, error = %e, "sweep point failed");
            }
            SweepRow::from_outcome(parameter, value, &outcome)
        })
        .collect()
}

pub fn write_rows_csv<P: AsRef<Path>>(path: P, rows: &[SweepRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write all sweep outputs to a directory
///
/// Creates:
/// - sweep.csv
/// - sweep_summary.json
pub fn write_all<P: AsRef<Path>>(dir: P, summary: &SweepSummary) -> Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    write_rows_csv(dir.join("sweep.csv"), &summary.rows)?;
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(dir.join("sweep_summary.json"), json)?;

    info!(
        dir = %dir.display(),
        points = summary.num_points,
        failed = summary.failed_points,
        "sweep written"
    );
    Ok(())
}
