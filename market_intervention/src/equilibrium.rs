//! Market-clearing price and quantity for linear curves
//!
//! A per-unit tax `t` (or subsidy, as a negative net value) moves the supply curve
//! up by `t`: sellers need `P - t` in hand, so effective supply is `c + d·(P - t)`.
//! Setting `a - b·P = c + d·(P - t)` gives
//!
//! ```text
//! P* = (a - c + d·t) / (b + d)
//! Q* = a - b·P*
//! ```

use crate::{LinearCurve, MarketError, Result};
use serde::{Deserialize, Serialize};

/// Price/quantity pair where quantity demanded equals quantity supplied
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquilibriumPoint {
    pub price: f64,
    pub quantity: f64,
}

impl EquilibriumPoint {
    /// Both coordinates finite and in the positive quadrant
    pub fn is_feasible(&self) -> bool {
        self.price.is_finite()
            && self.quantity.is_finite()
            && self.price >= 0.0
            && self.quantity >= 0.0
    }

    /// Reject points off the positive quadrant, tagging the error with `stage`
    pub fn ensure_feasible(self, stage: &'static str) -> Result<Self> {
        if self.is_feasible() {
            Ok(self)
        } else {
            Err(MarketError::DegenerateEquilibrium {
                stage,
                price: self.price,
                quantity: self.quantity,
            })
        }
    }
}

/// Solve for equilibrium with the supply curve shifted by `net_intervention`
/// (tax minus subsidy). Zero gives the undistorted market.
///
/// # Examples
///
/// ```
/// use market_intervention::LinearCurve;
/// use market_intervention::equilibrium::solve;
///
/// let demand = LinearCurve::new(100.0, 2.0);
/// let supply = LinearCurve::new(10.0, 1.5);
///
/// let eq = solve(&demand, &supply, 0.0);
/// assert!((eq.price - 90.0 / 3.5).abs() < 1e-10);
/// assert!((eq.quantity - demand.demand_quantity(eq.price)).abs() < 1e-10);
/// ```
pub fn solve(demand: &LinearCurve, supply: &LinearCurve, net_intervention: f64) -> EquilibriumPoint {
    let price = (demand.intercept - supply.intercept + supply.slope * net_intervention)
        / (demand.slope + supply.slope);
    let quantity = demand.demand_quantity(price);
    EquilibriumPoint { price, quantity }
}

/// Quantity on the shifted supply curve `c + d·(P - net)`
pub fn shifted_supply_quantity(supply: &LinearCurve, price: f64, net_intervention: f64) -> f64 {
    supply.supply_quantity(price - net_intervention)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn textbook() -> (LinearCurve, LinearCurve) {
        (LinearCurve::new(100.0, 2.0), LinearCurve::new(10.0, 1.5))
    }

    #[test]
    fn test_baseline_equilibrium() {
        let (demand, supply) = textbook();
        let eq = solve(&demand, &supply, 0.0);

        // (100 - 10) / 3.5
        assert_relative_eq!(eq.price, 25.714285714285715, epsilon = 1e-9);
        assert_relative_eq!(eq.quantity, 48.57142857142857, epsilon = 1e-9);
    }

    #[test]
    fn test_curves_intersect_at_solution() {
        let cases = [
            (100.0, 2.0, 10.0, 1.5),
            (50.0, 0.5, -5.0, 2.0),
            (12.0, 3.0, 0.0, 0.25),
            (1000.0, 7.5, 40.0, 11.0),
        ];

        for (a, b, c, d) in cases {
            let demand = LinearCurve::new(a, b);
            let supply = LinearCurve::new(c, d);
            let eq = solve(&demand, &supply, 0.0);

            assert_relative_eq!(eq.quantity, a - b * eq.price, epsilon = 1e-9);
            assert_relative_eq!(eq.quantity, c + d * eq.price, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_tax_raises_price_and_lowers_quantity() {
        let (demand, supply) = textbook();
        let eq = solve(&demand, &supply, 5.0);

        // (100 - 10 + 1.5 × 5) / 3.5
        assert_relative_eq!(eq.price, 27.857142857142858, epsilon = 1e-9);
        assert_relative_eq!(eq.quantity, 44.285714285714285, epsilon = 1e-9);

        // Buyers pay P*, sellers keep P* - t, and the shifted curve clears
        assert_relative_eq!(
            eq.quantity,
            shifted_supply_quantity(&supply, eq.price, 5.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_subsidy_lowers_price() {
        let (demand, supply) = textbook();
        let base = solve(&demand, &supply, 0.0);
        let subsidised = solve(&demand, &supply, -4.0);

        assert!(subsidised.price < base.price);
        assert!(subsidised.quantity > base.quantity);
    }

    #[test]
    fn test_zero_net_matches_baseline() {
        let (demand, supply) = textbook();
        let tax = 3.0;
        let subsidy = 3.0;
        assert_eq!(solve(&demand, &supply, tax - subsidy), solve(&demand, &supply, 0.0));
    }

    #[test]
    fn test_feasibility() {
        let (demand, supply) = textbook();
        assert!(solve(&demand, &supply, 0.0).is_feasible());

        // A tax large enough to push the market off the positive quadrant
        let eq = solve(&demand, &supply, 80.0);
        assert!(eq.quantity < 0.0);
        let err = eq.ensure_feasible("post-intervention").unwrap_err();
        assert!(matches!(
            err,
            MarketError::DegenerateEquilibrium {
                stage: "post-intervention",
                ..
            }
        ));
    }
}
