//! Excess demand / excess supply at a controlled price
//!
//! The gap is measured on the original supply curve, independently of any tax or
//! subsidy, and whether or not the control actually binds.

use crate::LinearCurve;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortageKind {
    /// Buyers want more than sellers offer (shortage)
    ExcessDemand,
    /// Sellers offer more than buyers want (glut)
    ExcessSupply,
    Balanced,
}

impl fmt::Display for ShortageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShortageKind::ExcessDemand => write!(f, "Excess demand"),
            ShortageKind::ExcessSupply => write!(f, "Excess supply"),
            ShortageKind::Balanced => write!(f, "Balanced"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShortageResult {
    pub kind: ShortageKind,
    /// Absolute quantity gap, zero when balanced
    pub magnitude: f64,
    pub quantity_demanded: f64,
    pub quantity_supplied: f64,
}

/// Classify the market at `controlled_price` by exact comparison of quantities
///
/// # Examples
///
/// ```
/// use market_intervention::LinearCurve;
/// use market_intervention::shortage::{classify, ShortageKind};
///
/// let demand = LinearCurve::new(100.0, 2.0);
/// let supply = LinearCurve::new(10.0, 1.5);
///
/// // Ceiling at 20: 60 demanded, 40 supplied
/// let gap = classify(&demand, &supply, 20.0);
/// assert_eq!(gap.kind, ShortageKind::ExcessDemand);
/// assert_eq!(gap.magnitude, 20.0);
/// ```
pub fn classify(demand: &LinearCurve, supply: &LinearCurve, controlled_price: f64) -> ShortageResult {
    classify_with_tolerance(demand, supply, controlled_price, 0.0)
}

/// As [`classify`], but gaps within `tolerance` of the larger quantity count as
/// balanced.
///
/// The band is relative: `tolerance · max(|Qd|, |Qs|, 1)`. Negative tolerances
/// are treated as zero.
pub fn classify_with_tolerance(
    demand: &LinearCurve,
    supply: &LinearCurve,
    controlled_price: f64,
    tolerance: f64,
) -> ShortageResult {
    let quantity_demanded = demand.demand_quantity(controlled_price);
    let quantity_supplied = supply.supply_quantity(controlled_price);
    let gap = quantity_demanded - quantity_supplied;
    let scale = quantity_demanded
        .abs()
        .max(quantity_supplied.abs())
        .max(1.0);
    let band = tolerance.max(0.0) * scale;

    let (kind, magnitude) = if gap.abs() <= band {
        (ShortageKind::Balanced, 0.0)
    } else if gap > 0.0 {
        (ShortageKind::ExcessDemand, gap)
    } else {
        (ShortageKind::ExcessSupply, -gap)
    };

    ShortageResult {
        kind,
        magnitude,
        quantity_demanded,
        quantity_supplied,
    }
}
