//! Consumer and producer surplus for linear curves
//!
//! Both surpluses are right triangles with base `Q*` along the price axis:
//! consumer surplus between the demand choke price `a/b` and `P*`, producer
//! surplus between `P*` and the supply reservation price `-c/d`.
//!
//! The triangles are always taken on the original (unshifted) curves. When a tax
//! or subsidy is present the caller decides which equilibrium point to pass in.

use crate::{EquilibriumPoint, LinearCurve};
use serde::{Deserialize, Serialize};

/// Consumer surplus `0.5 · Q* · (a/b - P*)`
pub fn consumer_surplus(demand: &LinearCurve, equilibrium: &EquilibriumPoint) -> f64 {
    0.5 * equilibrium.quantity * (demand.choke_price() - equilibrium.price)
}

/// Producer surplus `0.5 · Q* · (P* + c/d)`
pub fn producer_surplus(supply: &LinearCurve, equilibrium: &EquilibriumPoint) -> f64 {
    0.5 * equilibrium.quantity * (equilibrium.price - supply.reservation_price())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurplusResult {
    pub consumer_surplus: f64,
    pub producer_surplus: f64,
}

impl SurplusResult {
    /// Surplus of both sides at `equilibrium` on the given curves
    pub fn at(demand: &LinearCurve, supply: &LinearCurve, equilibrium: &EquilibriumPoint) -> Self {
        SurplusResult {
            consumer_surplus: consumer_surplus(demand, equilibrium),
            producer_surplus: producer_surplus(supply, equilibrium),
        }
    }

    /// Consumer plus producer surplus
    pub fn total(&self) -> f64 {
        self.consumer_surplus + self.producer_surplus
    }

    /// Negative values mean the point lies outside one of the curves' valid range
    pub fn is_valid(&self) -> bool {
        self.consumer_surplus >= 0.0 && self.producer_surplus >= 0.0
    }
}
