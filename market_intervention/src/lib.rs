//! Linear Market Equilibrium with Government Intervention
//!
//! Closed-form model of a single market with linear demand and supply curves,
//! used to show how a per-unit tax or subsidy and a price ceiling or floor change
//! the market outcome.
//!
//! Components:
//! - equilibrium: market-clearing price and quantity, optionally under a supply shift
//! - surplus: consumer and producer surplus triangles
//! - shortage: excess demand / excess supply at a controlled price
//! - simulation: composes the above into one run
//! - chart: builds a chart description and renders it (SVG)
//! - sweep: one parameter stepped through a list of values
//! - input / config / output: prompt, scenario-file and export boundaries
//!
//! Demand is `Q = a - b·P` and supply is `Q = c + d·P` with `b, d > 0`.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod chart;
pub mod config;
pub mod equilibrium;
pub mod error;
pub mod input;
pub mod output;
pub mod shortage;
pub mod simulation;
pub mod surplus;
pub mod sweep;

pub use equilibrium::EquilibriumPoint;
pub use error::{MarketError, Result};
pub use shortage::{ShortageKind, ShortageResult};
pub use simulation::{MarketSimulation, SimulationResult};
pub use surplus::SurplusResult;

/// A straight-line schedule `intercept ± slope·P`.
///
/// The same record describes both sides of the market; the sign of the slope term
/// depends on whether it is read as demand or supply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearCurve {
    pub intercept: f64,
    pub slope: f64,
}

impl LinearCurve {
    pub fn new(intercept: f64, slope: f64) -> Self {
        LinearCurve { intercept, slope }
    }

    /// Quantity demanded at `price`: `a - b·P`
    pub fn demand_quantity(&self, price: f64) -> f64 {
        self.intercept - self.slope * price
    }

    /// Quantity supplied at `price`: `c + d·P`
    pub fn supply_quantity(&self, price: f64) -> f64 {
        self.intercept + self.slope * price
    }

    /// Price at which demand falls to zero (`a / b`)
    pub fn choke_price(&self) -> f64 {
        self.intercept / self.slope
    }

    /// Lowest price at which anything is supplied (`-c / d`)
    ///
    /// Negative when the supply intercept is positive.
    pub fn reservation_price(&self) -> f64 {
        -self.intercept / self.slope
    }
}

/// Validated inputs for one market run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketParameters {
    pub demand: LinearCurve,
    pub supply: LinearCurve,
    /// Per-unit tax paid by sellers
    pub tax: f64,
    /// Per-unit subsidy received by sellers
    pub subsidy: f64,
}

impl MarketParameters {
    /// Build parameters from raw scalars, rejecting anything the closed-form
    /// solution cannot handle.
    pub fn new(demand: LinearCurve, supply: LinearCurve, tax: f64, subsidy: f64) -> Result<Self> {
        let params = MarketParameters {
            demand,
            supply,
            tax,
            subsidy,
        };
        params.validate()?;
        Ok(params)
    }

    /// Parameters with no tax or subsidy
    pub fn without_intervention(demand: LinearCurve, supply: LinearCurve) -> Result<Self> {
        Self::new(demand, supply, 0.0, 0.0)
    }

    pub fn validate(&self) -> Result<()> {
        check_curve("demand", &self.demand)?;
        check_curve("supply", &self.supply)?;
        if self.demand.intercept <= 0.0 {
            return Err(MarketError::InvalidCurve {
                curve: "demand",
                reason: format!("intercept must be positive, got {}", self.demand.intercept),
            });
        }

        for (name, value) in [("tax", self.tax), ("subsidy", self.subsidy)] {
            if !value.is_finite() || value < 0.0 {
                return Err(MarketError::InvalidIntervention(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Tax minus subsidy; only this difference moves the equilibrium
    pub fn net_intervention(&self) -> f64 {
        self.tax - self.subsidy
    }

    /// True when either a tax or a subsidy was entered, even if they cancel out
    pub fn has_intervention(&self) -> bool {
        self.tax != 0.0 || self.subsidy != 0.0
    }
}

fn check_curve(curve: &'static str, line: &LinearCurve) -> Result<()> {
    if !line.intercept.is_finite() || !line.slope.is_finite() {
        return Err(MarketError::InvalidCurve {
            curve,
            reason: "coefficients must be finite".to_string(),
        });
    }
    if line.slope <= 0.0 {
        return Err(MarketError::InvalidCurve {
            curve,
            reason: format!("slope must be positive, got {}", line.slope),
        });
    }
    Ok(())
}

/// Kind of price control requested, before a price is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    Ceiling,
    Floor,
    None,
}

impl ControlKind {
    /// Normalise free-text input.
    ///
    /// Accepts `ceiling`/`최고` and `floor`/`최저` in any case; anything else means
    /// no control rather than an error.
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_lowercase().as_str() {
            "ceiling" | "최고" => ControlKind::Ceiling,
            "floor" | "최저" => ControlKind::Floor,
            _ => ControlKind::None,
        }
    }

    pub fn needs_price(&self) -> bool {
        !matches!(self, ControlKind::None)
    }

    /// Attach a price; `None` ignores it
    pub fn with_price(self, price: f64) -> PriceControl {
        match self {
            ControlKind::Ceiling => PriceControl::Ceiling(price),
            ControlKind::Floor => PriceControl::Floor(price),
            ControlKind::None => PriceControl::None,
        }
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlKind::Ceiling => write!(f, "ceiling"),
            ControlKind::Floor => write!(f, "floor"),
            ControlKind::None => write!(f, "none"),
        }
    }
}

/// Government price control
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "price", rename_all = "snake_case")]
pub enum PriceControl {
    #[default]
    None,
    /// Maximum legal price
    Ceiling(f64),
    /// Minimum legal price
    Floor(f64),
}

impl PriceControl {
    pub fn kind(&self) -> ControlKind {
        match self {
            PriceControl::None => ControlKind::None,
            PriceControl::Ceiling(_) => ControlKind::Ceiling,
            PriceControl::Floor(_) => ControlKind::Floor,
        }
    }

    /// Controlled price, if any
    pub fn price(&self) -> Option<f64> {
        match *self {
            PriceControl::None => None,
            PriceControl::Ceiling(p) | PriceControl::Floor(p) => Some(p),
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self.price() {
            Some(p) if !p.is_finite() => Err(MarketError::InvalidIntervention(format!(
                "{} price must be finite, got {}",
                self.kind(),
                p
            ))),
            _ => Ok(()),
        }
    }

    /// A ceiling below or a floor above the free-market price actually restricts trade
    pub fn is_binding(&self, equilibrium: &EquilibriumPoint) -> bool {
        match *self {
            PriceControl::None => false,
            PriceControl::Ceiling(p) => p < equilibrium.price,
            PriceControl::Floor(p) => p > equilibrium.price,
        }
    }
}
