use approx::{assert_abs_diff_eq, assert_relative_eq};
use market_intervention::chart::{render_svg, ChartSpec, ChartStyle};
use market_intervention::config::{ScenarioFile, SweepFile};
use market_intervention::equilibrium::solve;
use market_intervention::shortage::classify;
use market_intervention::surplus::{consumer_surplus, producer_surplus};
use market_intervention::sweep::{self, SweepSummary};
use market_intervention::{
    LinearCurve, MarketParameters, MarketSimulation, PriceControl, ShortageKind,
    SimulationResult,
};
use std::path::PathBuf;

/// Helper to run the textbook market (a=100, b=2, c=10, d=1.5)
fn run_textbook(tax: f64, subsidy: f64, control: PriceControl) -> SimulationResult {
    let params = MarketParameters::new(
        LinearCurve::new(100.0, 2.0),
        LinearCurve::new(10.0, 1.5),
        tax,
        subsidy,
    )
    .expect("textbook parameters are valid");
    MarketSimulation::new(params, control)
        .run()
        .expect("textbook market has an interior equilibrium")
}

fn scenario_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(name)
}

#[test]
fn test_scenario_1_free_market() {
    let result = run_textbook(0.0, 0.0, PriceControl::None);

    assert_relative_eq!(result.baseline.price, 25.7142857, epsilon = 1e-6);
    assert_relative_eq!(result.baseline.quantity, 48.5714286, epsilon = 1e-6);
    assert!(result.post_intervention.is_none());
}

#[test]
fn test_scenario_2_tax_of_five() {
    let result = run_textbook(5.0, 0.0, PriceControl::None);
    let post = result.post_intervention.expect("tax produces a second equilibrium");

    assert_relative_eq!(post.price, 27.857142, epsilon = 1e-6);
    assert_relative_eq!(post.quantity, 44.285714, epsilon = 1e-6);

    // Buyers bear 2.14 of the 5.00 tax: d / (b + d) = 1.5 / 3.5
    assert_relative_eq!(
        post.price - result.baseline.price,
        5.0 * 1.5 / 3.5,
        epsilon = 1e-9
    );
}

#[test]
fn test_scenario_3_ceiling_at_20() {
    let result = run_textbook(0.0, 0.0, PriceControl::Ceiling(20.0));
    let gap = result.shortage.expect("ceiling is classified");

    assert_eq!(gap.quantity_demanded, 60.0);
    assert_eq!(gap.quantity_supplied, 40.0);
    assert_eq!(gap.kind, ShortageKind::ExcessDemand);
    assert_eq!(gap.magnitude, 20.0);
}

#[test]
fn test_scenario_4_floor_at_30() {
    let result = run_textbook(0.0, 0.0, PriceControl::Floor(30.0));
    let gap = result.shortage.expect("floor is classified");

    assert_eq!(gap.quantity_demanded, 40.0);
    assert_eq!(gap.quantity_supplied, 55.0);
    assert_eq!(gap.kind, ShortageKind::ExcessSupply);
    assert_eq!(gap.magnitude, 15.0);
}

#[test]
fn test_scenario_5_ceiling_at_equilibrium() {
    let p_eq = solve(&LinearCurve::new(100.0, 2.0), &LinearCurve::new(10.0, 1.5), 0.0).price;
    let result = run_textbook(0.0, 0.0, PriceControl::Ceiling(p_eq));
    let gap = result.shortage.unwrap();

    assert_eq!(gap.kind, ShortageKind::Balanced);
    assert_abs_diff_eq!(gap.magnitude, 0.0, epsilon = 1e-9);
    assert_eq!(result.control_is_binding(), Some(false));
}

#[test]
fn test_equal_tax_and_subsidy_match_free_market() {
    let offset = run_textbook(4.0, 4.0, PriceControl::None);
    let free = run_textbook(0.0, 0.0, PriceControl::None);

    assert_eq!(offset.post_intervention, Some(free.baseline));
    assert_eq!(offset.surplus, free.surplus);
}

#[test]
fn test_curves_intersect_across_parameter_grid() {
    for a in [20.0, 100.0, 500.0] {
        for b in [0.5, 2.0, 8.0] {
            for c in [-10.0, 0.0, 15.0] {
                for d in [0.25, 1.5, 6.0] {
                    let demand = LinearCurve::new(a, b);
                    let supply = LinearCurve::new(c, d);
                    let eq = solve(&demand, &supply, 0.0);
                    assert_relative_eq!(
                        demand.demand_quantity(eq.price),
                        supply.supply_quantity(eq.price),
                        epsilon = 1e-9,
                        max_relative = 1e-12
                    );
                }
            }
        }
    }
}

#[test]
fn test_surplus_non_negative_for_feasible_markets() {
    for (a, b, c, d) in [
        (100.0, 2.0, 10.0, 1.5),
        (60.0, 1.0, -10.0, 2.0),
        (30.0, 0.5, 0.0, 3.0),
    ] {
        let demand = LinearCurve::new(a, b);
        let supply = LinearCurve::new(c, d);
        let eq = solve(&demand, &supply, 0.0);
        assert!(eq.is_feasible());
        assert!(consumer_surplus(&demand, &eq) >= 0.0);
        assert!(producer_surplus(&supply, &eq) >= 0.0);
    }
}

#[test]
fn test_classification_flips_when_roles_swap() {
    let demand = LinearCurve::new(100.0, 2.0);
    let supply = LinearCurve::new(10.0, 1.5);
    let as_demand = LinearCurve::new(supply.intercept, -supply.slope);
    let as_supply = LinearCurve::new(demand.intercept, -demand.slope);

    let original = classify(&demand, &supply, 20.0);
    let swapped = classify(&as_demand, &as_supply, 20.0);
    assert_eq!(original.kind, ShortageKind::ExcessDemand);
    assert_eq!(swapped.kind, ShortageKind::ExcessSupply);
    assert_eq!(original.magnitude, swapped.magnitude);
}

#[test]
fn test_degenerate_tax_aborts_before_rendering() {
    let params = MarketParameters::new(
        LinearCurve::new(100.0, 2.0),
        LinearCurve::new(10.0, 1.5),
        80.0,
        0.0,
    )
    .unwrap();
    let err = MarketSimulation::new(params, PriceControl::None)
        .run()
        .unwrap_err();
    assert!(err.to_string().contains("post-intervention"));
}

#[test]
fn test_bundled_scenarios_load_and_solve() {
    for name in [
        "textbook_tax.toml",
        "rent_ceiling_korean.toml",
        "minimum_wage_floor.toml",
    ] {
        let scenario = ScenarioFile::from_path(scenario_path(name))
            .unwrap_or_else(|e| panic!("{} failed to load: {}", name, e));
        let params = scenario.parameters().unwrap();
        let control = scenario.price_control().unwrap();
        let result = MarketSimulation::new(params, control).run().unwrap();

        let style = scenario.chart_style();
        let svg = render_svg(&ChartSpec::from_result(&result, &style), &style);
        assert!(svg.contains(&style.labels.title));
    }
}

#[test]
fn test_korean_ceiling_scenario() {
    let scenario = ScenarioFile::from_path(scenario_path("rent_ceiling_korean.toml")).unwrap();
    assert_eq!(scenario.price_control().unwrap(), PriceControl::Ceiling(20.0));

    let result = MarketSimulation::new(
        scenario.parameters().unwrap(),
        scenario.price_control().unwrap(),
    )
    .run()
    .unwrap();
    let style = scenario.chart_style();
    let chart = ChartSpec::from_result(&result, &style);
    assert_eq!(chart.control.unwrap().annotation, "초과 수요: 20.0");
    assert_eq!(style, ChartStyle::korean());
}

#[test]
fn test_floor_scenario_with_subsidy() {
    let scenario = ScenarioFile::from_path(scenario_path("minimum_wage_floor.toml")).unwrap();
    let result = MarketSimulation::new(
        scenario.parameters().unwrap(),
        scenario.price_control().unwrap(),
    )
    .run()
    .unwrap();

    // 120 - 3P = -20 + 4P -> P = 20, Q = 60
    assert_relative_eq!(result.baseline.price, 20.0, epsilon = 1e-9);
    assert_relative_eq!(result.baseline.quantity, 60.0, epsilon = 1e-9);

    let post = result.post_intervention.unwrap();
    assert!(post.price < result.baseline.price);

    // Producer triangle is measured from the positive minimum supply price of 5
    assert_relative_eq!(result.surplus.producer_surplus, 0.5 * 60.0 * 15.0, epsilon = 1e-9);

    let gap = result.shortage.unwrap();
    assert_eq!(gap.kind, ShortageKind::ExcessSupply);
    assert_relative_eq!(gap.magnitude, 42.0, epsilon = 1e-9);
}

#[test]
fn test_tax_sweep_file_points() {
    let sweep_file = SweepFile::from_path(scenario_path("tax_sweep.toml")).unwrap();
    let rows = sweep::run_sweep(&sweep_file);
    assert_eq!(rows.len(), sweep_file.sweep.values.len());

    // Taxes of 60 and 80 push quantity below zero
    let failed: Vec<f64> = rows.iter().filter(|r| !r.ok).map(|r| r.value).collect();
    assert_eq!(failed, vec![60.0, 80.0]);
    assert!(rows
        .iter()
        .filter(|r| !r.ok)
        .all(|r| r.baseline_price.is_none() && r.error.is_some()));

    // Ceiling of 20 stays binding for every tax that solves
    assert!(rows
        .iter()
        .filter(|r| r.ok)
        .all(|r| r.control_binding == Some(true)));

    let dir = tempfile::tempdir().unwrap();
    let summary = SweepSummary::new(&sweep_file, rows);
    sweep::write_all(dir.path(), &summary).unwrap();
    let csv_text = std::fs::read_to_string(dir.path().join("sweep.csv")).unwrap();
    assert_eq!(csv_text.lines().count(), 1 + sweep_file.sweep.values.len());
    assert!(dir.path().join("sweep_summary.json").exists());
}
