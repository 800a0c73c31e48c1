//! One run of the market model
//!
//! Order of work:
//! 1. Baseline equilibrium (no intervention)
//! 2. Post-intervention equilibrium, only if a tax or subsidy was entered
//! 3. Surplus triangles at the baseline point on the original curves
//! 4. Shortage/glut at the controlled price, only if a control was set
//!
//! Nothing is retained between runs; drawing is left to a [`Renderer`].

use crate::chart::{ChartSpec, ChartStyle, Renderer};
use crate::equilibrium::{self, EquilibriumPoint};
use crate::shortage::{self, ShortageResult};
use crate::surplus::SurplusResult;
use crate::{MarketParameters, PriceControl, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Relative quantity gap at or below which a control price reads as balanced
pub const DEFAULT_BALANCE_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct MarketSimulation {
    pub params: MarketParameters,
    pub price_control: PriceControl,
    pub balance_tolerance: f64,
}

/// Numbers produced by a run, ready for printing, export or drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub params: MarketParameters,
    pub price_control: PriceControl,
    pub baseline: EquilibriumPoint,
    /// Present only when a tax or subsidy was entered
    pub post_intervention: Option<EquilibriumPoint>,
    /// Measured at the baseline equilibrium
    pub surplus: SurplusResult,
    /// Present only when a price control was set
    pub shortage: Option<ShortageResult>,
}

impl MarketSimulation {
    pub fn new(params: MarketParameters, price_control: PriceControl) -> Self {
        MarketSimulation {
            params,
            price_control,
            balance_tolerance: DEFAULT_BALANCE_TOLERANCE,
        }
    }

    /// Use exact comparison (`0.0`) or a looser band when classifying the gap.
    /// Negative values are clamped to zero.
    pub fn with_balance_tolerance(mut self, tolerance: f64) -> Self {
        self.balance_tolerance = tolerance.max(0.0);
        self
    }

    pub fn run(&self) -> Result<SimulationResult> {
        self.params.validate()?;
        self.price_control.validate()?;

        let demand = &self.params.demand;
        let supply = &self.params.supply;

        let baseline = equilibrium::solve(demand, supply, 0.0).ensure_feasible("baseline")?;
        info!(
            price = baseline.price,
            quantity = baseline.quantity,
            "baseline equilibrium"
        );

        let post_intervention = if self.params.has_intervention() {
            let net = self.params.net_intervention();
            let point =
                equilibrium::solve(demand, supply, net).ensure_feasible("post-intervention")?;
            info!(
                net_intervention = net,
                price = point.price,
                quantity = point.quantity,
                "post-intervention equilibrium"
            );
            Some(point)
        } else {
            debug!("no tax or subsidy, skipping post-intervention equilibrium");
            None
        };

        let surplus = SurplusResult::at(demand, supply, &baseline);
        info!(
            consumer = surplus.consumer_surplus,
            producer = surplus.producer_surplus,
            "surplus at baseline equilibrium"
        );

        let shortage = self.price_control.price().map(|price| {
            let gap =
                shortage::classify_with_tolerance(demand, supply, price, self.balance_tolerance);
            info!(
                control = %self.price_control.kind(),
                price,
                kind = %gap.kind,
                magnitude = gap.magnitude,
                binding = self.price_control.is_binding(&baseline),
                "price control gap"
            );
            gap
        });

        Ok(SimulationResult {
            params: self.params,
            price_control: self.price_control,
            baseline,
            post_intervention,
            surplus,
            shortage,
        })
    }

    /// Run, then hand the chart to `renderer`
    pub fn run_and_render<R: Renderer>(
        &self,
        renderer: &mut R,
        style: &ChartStyle,
    ) -> Result<SimulationResult> {
        let result = self.run()?;
        let chart = ChartSpec::from_result(&result, style);
        renderer.render(&chart, style)?;
        Ok(result)
    }
}

impl SimulationResult {
    /// Equilibrium the market settles at after any tax or subsidy
    pub fn effective_equilibrium(&self) -> EquilibriumPoint {
        self.post_intervention.unwrap_or(self.baseline)
    }

    /// Whether the price control restricts trade relative to the free market
    pub fn control_is_binding(&self) -> Option<bool> {
        match self.price_control {
            PriceControl::None => None,
            control => Some(control.is_binding(&self.baseline)),
        }
    }

    pub fn print_summary(&self) {
        let p = &self.params;
        println!("\n=== Market Summary ===\n");
        println!(
            "Demand:  Q = {:.3} - {:.3}·P",
            p.demand.intercept, p.demand.slope
        );
        println!(
            "Supply:  Q = {:.3} + {:.3}·P",
            p.supply.intercept, p.supply.slope
        );
        println!(
            "Tax: {:.3}  Subsidy: {:.3}  Net: {:.3}",
            p.tax,
            p.subsidy,
            p.net_intervention()
        );

        println!("\n{:<28} {:>12} {:>12}", "Equilibrium", "Price", "Quantity");
        println!("{:-<28} {:->12} {:->12}", "", "", "");
        println!(
            "{:<28} {:>12.3} {:>12.3}",
            "Baseline", self.baseline.price, self.baseline.quantity
        );
        if let Some(post) = &self.post_intervention {
            println!(
                "{:<28} {:>12.3} {:>12.3}",
                "After tax/subsidy", post.price, post.quantity
            );
        }

        println!("\nSurplus (baseline equilibrium):");
        println!("  Consumer: {:.3}", self.surplus.consumer_surplus);
        println!("  Producer: {:.3}", self.surplus.producer_surplus);
        println!("  Total:    {:.3}", self.surplus.total());

        if let (Some(price), Some(gap)) = (self.price_control.price(), &self.shortage) {
            println!("\nPrice {} at {}:", self.price_control.kind(), price);
            println!("  Quantity demanded: {:.3}", gap.quantity_demanded);
            println!("  Quantity supplied: {:.3}", gap.quantity_supplied);
            println!("  {}: {:.3}", gap.kind, gap.magnitude);
            if self.control_is_binding() == Some(false) {
                println!("  (control does not bind at the free-market price)");
            }
        }
    }
}
