//! TOML scenario files
//!
//! ```toml
//! [market]
//! demand_intercept = 100.0
//! demand_slope = 2.0
//! supply_intercept = 10.0
//! supply_slope = 1.5
//!
//! [intervention]
//! tax = 5.0
//! subsidy = 0.0
//!
//! [price_control]
//! kind = "ceiling"   # ceiling / floor / none (최고 / 최저 also accepted)
//! price = 20.0
//!
//! [chart]
//! labels = "korean"
//! ```
//!
//! Only `[market]` is required.

use crate::chart::{ChartStyle, LabelLanguage};
use crate::{ControlKind, LinearCurve, MarketError, MarketParameters, PriceControl, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioFile {
    pub market: MarketSection,
    #[serde(default)]
    pub intervention: InterventionSection,
    pub price_control: Option<PriceControlSection>,
    pub chart: Option<ChartSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSection {
    pub demand_intercept: f64,
    pub demand_slope: f64,
    pub supply_intercept: f64,
    pub supply_slope: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterventionSection {
    #[serde(default)]
    pub tax: f64,
    #[serde(default)]
    pub subsidy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceControlSection {
    /// Free text, normalised the same way as the interactive prompt
    pub kind: String,
    pub price: Option<f64>,
}

/// Overrides applied on top of the language preset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSection {
    pub labels: Option<LabelLanguage>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub font_family: Option<String>,
    pub unicode_minus: Option<bool>,
    pub title: Option<String>,
}

impl ScenarioFile {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn parameters(&self) -> Result<MarketParameters> {
        MarketParameters::new(
            LinearCurve::new(self.market.demand_intercept, self.market.demand_slope),
            LinearCurve::new(self.market.supply_intercept, self.market.supply_slope),
            self.intervention.tax,
            self.intervention.subsidy,
        )
    }

    /// Resolve the control section; a ceiling or floor without a price is an error
    pub fn price_control(&self) -> Result<PriceControl> {
        let Some(section) = &self.price_control else {
            return Ok(PriceControl::None);
        };

        let kind = ControlKind::from_token(&section.kind);
        let control = match (kind, section.price) {
            (ControlKind::None, _) => PriceControl::None,
            (kind, Some(price)) => kind.with_price(price),
            (kind, None) => {
                return Err(MarketError::InvalidIntervention(format!(
                    "price {} needs a price",
                    kind
                )))
            }
        };
        control.validate()?;
        Ok(control)
    }

    pub fn chart_style(&self) -> ChartStyle {
        let overrides = self.chart.clone().unwrap_or_default();
        let mut style =
            ChartStyle::for_language(overrides.labels.unwrap_or(LabelLanguage::English));

        if let Some(width) = overrides.width {
            style.width = width;
        }
        if let Some(height) = overrides.height {
            style.height = height;
        }
        if let Some(font_family) = overrides.font_family {
            style.font_family = font_family;
        }
        if let Some(unicode_minus) = overrides.unicode_minus {
            style.unicode_minus = unicode_minus;
        }
        if let Some(title) = overrides.title {
            style.labels.title = title;
        }
        style
    }
}

/// Scenario plus a one-parameter sweep, read by the `run_sweep` binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepFile {
    pub experiment: ExperimentSection,
    #[serde(flatten)]
    pub scenario: ScenarioFile,
    pub sweep: SweepSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentSection {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSection {
    pub parameter: SweepParameter,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepParameter {
    Tax,
    Subsidy,
    ControlPrice,
    DemandIntercept,
    DemandSlope,
    SupplyIntercept,
    SupplySlope,
}

impl SweepParameter {
    pub fn name(&self) -> &'static str {
        match self {
            SweepParameter::Tax => "tax",
            SweepParameter::Subsidy => "subsidy",
            SweepParameter::ControlPrice => "control_price",
            SweepParameter::DemandIntercept => "demand_intercept",
            SweepParameter::DemandSlope => "demand_slope",
            SweepParameter::SupplyIntercept => "supply_intercept",
            SweepParameter::SupplySlope => "supply_slope",
        }
    }

    /// Overwrite the swept field in `scenario` before validation
    pub fn apply(&self, scenario: &mut ScenarioFile, value: f64) -> Result<()> {
        match self {
            SweepParameter::Tax => scenario.intervention.tax = value,
            SweepParameter::Subsidy => scenario.intervention.subsidy = value,
            SweepParameter::DemandIntercept => scenario.market.demand_intercept = value,
            SweepParameter::DemandSlope => scenario.market.demand_slope = value,
            SweepParameter::SupplyIntercept => scenario.market.supply_intercept = value,
            SweepParameter::SupplySlope => scenario.market.supply_slope = value,
            SweepParameter::ControlPrice => match scenario.price_control.as_mut() {
                Some(section) if ControlKind::from_token(&section.kind).needs_price() => {
                    section.price = Some(value)
                }
                _ => {
                    return Err(MarketError::InvalidIntervention(
                        "sweeping control_price needs a ceiling or floor in [price_control]"
                            .to_string(),
                    ))
                }
            },
        }
        Ok(())
    }
}

impl SweepFile {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// The base scenario with the swept parameter set to `value`
    pub fn scenario_at(&self, value: f64) -> Result<ScenarioFile> {
        let mut scenario = self.scenario.clone();
        self.sweep.parameter.apply(&mut scenario, value)?;
        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
[market]
demand_intercept = 100.0
demand_slope = 2.0
supply_intercept = 10.0
supply_slope = 1.5

[intervention]
tax = 5.0

[price_control]
kind = "Ceiling"
price = 20.0

[chart]
labels = "korean"
width = 800
"#;

    #[test]
    fn test_full_scenario() {
        let scenario = ScenarioFile::from_toml_str(FULL).unwrap();
        let params = scenario.parameters().unwrap();
        assert_eq!(params.demand, LinearCurve::new(100.0, 2.0));
        assert_eq!(params.tax, 5.0);
        assert_eq!(params.subsidy, 0.0);
        assert_eq!(scenario.price_control().unwrap(), PriceControl::Ceiling(20.0));

        let style = scenario.chart_style();
        assert_eq!(style.width, 800);
        assert_eq!(style.height, 600);
        assert_eq!(style.font_family, "Malgun Gothic");
        assert_eq!(style.labels.demand, "수요곡선");
    }

    #[test]
    fn test_minimal_scenario() {
        let scenario = ScenarioFile::from_toml_str(
            r#"
[market]
demand_intercept = 50
demand_slope = 1
supply_intercept = -5
supply_slope = 2
"#,
        )
        .unwrap();

        let params = scenario.parameters().unwrap();
        assert!(!params.has_intervention());
        assert_eq!(params.supply.intercept, -5.0);
        assert_eq!(scenario.price_control().unwrap(), PriceControl::None);
        assert_eq!(scenario.chart_style(), ChartStyle::english());
    }

    #[test]
    fn test_control_without_price_rejected() {
        let scenario = ScenarioFile::from_toml_str(
            r#"
[market]
demand_intercept = 100.0
demand_slope = 2.0
supply_intercept = 10.0
supply_slope = 1.5

[price_control]
kind = "floor"
"#,
        )
        .unwrap();
        assert!(matches!(
            scenario.price_control(),
            Err(MarketError::InvalidIntervention(_))
        ));
    }

    #[test]
    fn test_unknown_control_kind_ignored() {
        let scenario = ScenarioFile::from_toml_str(
            r#"
[market]
demand_intercept = 100.0
demand_slope = 2.0
supply_intercept = 10.0
supply_slope = 1.5

[price_control]
kind = "rationing"
price = 12.0
"#,
        )
        .unwrap();
        assert_eq!(scenario.price_control().unwrap(), PriceControl::None);
    }

    #[test]
    fn test_missing_market_section_is_toml_error() {
        let err = ScenarioFile::from_toml_str("[intervention]\ntax = 1.0\n").unwrap_err();
        assert!(matches!(err, MarketError::Toml(_)));
    }

    #[test]
    fn test_invalid_values_surface_on_parameters() {
        let scenario = ScenarioFile::from_toml_str(
            r#"
[market]
demand_intercept = 100.0
demand_slope = 2.0
supply_intercept = 10.0
supply_slope = 0.0
"#,
        )
        .unwrap();
        assert!(matches!(
            scenario.parameters(),
            Err(MarketError::InvalidCurve { curve: "supply", .. })
        ));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scenario.toml");
        std::fs::write(&path, FULL).unwrap();
        let scenario = ScenarioFile::from_path(&path).unwrap();
        assert_eq!(scenario.intervention.tax, 5.0);

        let missing = ScenarioFile::from_path(dir.path().join("absent.toml"));
        assert!(matches!(missing, Err(MarketError::Io(_))));
    }

    const SWEEP: &str = r#"
[experiment]
name = "tax_sweep"
description = "Rising tax on the textbook market"

[market]
demand_intercept = 100.0
demand_slope = 2.0
supply_intercept = 10.0
supply_slope = 1.5

[price_control]
kind = "ceiling"
price = 20.0

[sweep]
parameter = "tax"
values = [0, 2.5, 5.0]
"#;

    #[test]
    fn test_sweep_file() {
        let sweep = SweepFile::from_toml_str(SWEEP).unwrap();
        assert_eq!(sweep.experiment.name, "tax_sweep");
        assert_eq!(sweep.sweep.parameter, SweepParameter::Tax);
        assert_eq!(sweep.sweep.values, vec![0.0, 2.5, 5.0]);

        let at_five = sweep.scenario_at(5.0).unwrap();
        assert_eq!(at_five.parameters().unwrap().tax, 5.0);
        // Base scenario untouched
        assert_eq!(sweep.scenario.intervention.tax, 0.0);
    }

    #[test]
    fn test_sweep_control_price() {
        let mut sweep = SweepFile::from_toml_str(SWEEP).unwrap();
        sweep.sweep.parameter = SweepParameter::ControlPrice;
        let scenario = sweep.scenario_at(15.0).unwrap();
        assert_eq!(scenario.price_control().unwrap(), PriceControl::Ceiling(15.0));

        sweep.scenario.price_control = None;
        assert!(matches!(
            sweep.scenario_at(15.0),
            Err(MarketError::InvalidIntervention(_))
        ));
    }

    #[test]
    fn test_sweep_unknown_parameter_rejected() {
        let text = SWEEP.replace("parameter = \"tax\"", "parameter = \"elasticity\"");
        assert!(matches!(
            SweepFile::from_toml_str(&text),
            Err(MarketError::Toml(_))
        ));
    }

    #[test]
    fn test_sweep_parameter_names() {
        assert_eq!(SweepParameter::SupplySlope.name(), "supply_slope");
        assert_eq!(SweepParameter::ControlPrice.name(), "control_price");
    }
}
