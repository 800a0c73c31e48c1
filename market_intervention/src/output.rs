//! Export of run results
//!
//! A run can be saved as a JSON summary (parameters, equilibria, surpluses, gap) and
//! a CSV of the sampled curves, for plotting or checking elsewhere.

use crate::chart::{price_grid, ChartStyle};
use crate::equilibrium::{shifted_supply_quantity, EquilibriumPoint};
use crate::shortage::ShortageResult;
use crate::surplus::SurplusResult;
use crate::{MarketParameters, PriceControl, Result, SimulationResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level container for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub metadata: RunMetadata,
    pub params: MarketParameters,
    pub net_intervention: f64,
    pub price_control: PriceControl,
    pub baseline: EquilibriumPoint,
    pub post_intervention: Option<EquilibriumPoint>,
    pub surplus: SurplusResult,
    pub total_surplus: f64,
    pub shortage: Option<ShortageResult>,
    pub control_binding: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    pub version: String,
    pub timestamp: String,
}

/// One row of `curves.csv`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurvePoint {
    pub price: f64,
    pub demand_quantity: f64,
    pub supply_quantity: f64,
    /// Empty when there is no tax or subsidy
    pub shifted_supply_quantity: Option<f64>,
}

impl SimulationOutput {
    pub fn from_result(result: &SimulationResult) -> Self {
        SimulationOutput {
            metadata: RunMetadata {
                version: env!("CARGO_PKG_VERSION").to_string(),
                timestamp: chrono::Utc::now().to_rfc3339(),
            },
            params: result.params,
            net_intervention: result.params.net_intervention(),
            price_control: result.price_control,
            baseline: result.baseline,
            post_intervention: result.post_intervention,
            surplus: result.surplus,
            total_surplus: result.surplus.total(),
            shortage: result.shortage,
            control_binding: result.control_is_binding(),
        }
    }

    pub fn write_summary_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Sample the demand, supply and shifted supply curves on the chart's price grid
pub fn curve_points(result: &SimulationResult, style: &ChartStyle) -> Vec<CurvePoint> {
    let demand = result.params.demand;
    let supply = result.params.supply;
    let net = result.params.net_intervention();
    let shifted = result.post_intervention.is_some();

    price_grid(result, style)
        .into_iter()
        .map(|price| CurvePoint {
            price,
            demand_quantity: demand.demand_quantity(price),
            supply_quantity: supply.supply_quantity(price),
            shifted_supply_quantity: shifted
                .then(|| shifted_supply_quantity(&supply, price, net)),
        })
        .collect()
}

pub fn write_curves_csv<P: AsRef<Path>>(
    path: P,
    result: &SimulationResult,
    style: &ChartStyle,
) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for point in curve_points(result, style) {
        wtr.serialize(point)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write all outputs to a directory
///
/// Creates:
/// - summary.json
/// - curves.csv
pub fn write_all<P: AsRef<Path>>(
    dir: P,
    result: &SimulationResult,
    style: &ChartStyle,
) -> Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    SimulationOutput::from_result(result).write_summary_json(dir.join("summary.json"))?;
    write_curves_csv(dir.join("curves.csv"), result, style)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LinearCurve, MarketSimulation};

    fn run(tax: f64, control: PriceControl) -> SimulationResult {
        let params = MarketParameters::new(
            LinearCurve::new(100.0, 2.0),
            LinearCurve::new(10.0, 1.5),
            tax,
            0.0,
        )
        .unwrap();
        MarketSimulation::new(params, control).run().unwrap()
    }

    #[test]
    fn test_output_fields() {
        let result = run(5.0, PriceControl::Ceiling(20.0));
        let output = SimulationOutput::from_result(&result);

        assert_eq!(output.net_intervention, 5.0);
        assert_eq!(output.control_binding, Some(true));
        assert_eq!(output.total_surplus, result.surplus.total());
        assert!(output.post_intervention.is_some());
        assert!(!output.metadata.timestamp.is_empty());
    }

    #[test]
    fn test_summary_json_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        let result = run(0.0, PriceControl::Floor(30.0));
        SimulationOutput::from_result(&result)
            .write_summary_json(&path)
            .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["price_control"]["kind"], "floor");
        assert_eq!(value["price_control"]["price"], 30.0);
        assert_eq!(value["shortage"]["kind"], "excess_supply");
        assert!(value["post_intervention"].is_null());
    }

    #[test]
    fn test_curve_points_without_intervention() {
        let result = run(0.0, PriceControl::None);
        let points = curve_points(&result, &ChartStyle::default());
        assert_eq!(points.len(), 500);
        assert!(points.iter().all(|p| p.shifted_supply_quantity.is_none()));
        assert_eq!(points[0].demand_quantity, 100.0);
        assert_eq!(points[0].supply_quantity, 10.0);
    }

    #[test]
    fn test_write_all() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(5.0, PriceControl::None);
        write_all(dir.path().join("run"), &result, &ChartStyle::default()).unwrap();

        let csv_text = std::fs::read_to_string(dir.path().join("run/curves.csv")).unwrap();
        let mut lines = csv_text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "price,demand_quantity,supply_quantity,shifted_supply_quantity"
        );
        // Shifted supply at P = 0: 10 + 1.5 × (0 - 5)
        assert_eq!(lines.next().unwrap(), "0.0,100.0,10.0,2.5");
        assert_eq!(csv_text.lines().count(), 501);
        assert!(dir.path().join("run/summary.json").exists());
    }
}
