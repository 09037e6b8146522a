//! Cash point and cash flow valuation against published reference values,
//! plus root-finding properties.

use accrue_core::types::{Compounding, Date, Frequency, Period};
use accrue_flows::{CashFlow, CashPoint, IrrConfig};
use approx::assert_abs_diff_eq;
use proptest::prelude::*;
use serde::Deserialize;
use std::fs;

/// Path to the shared reference data
const REFERENCE_FILE: &str = "../../tests/fixtures/reference_values.json";

#[derive(Debug, Deserialize)]
struct Reference {
    cash_points: CashPoints,
}

#[derive(Debug, Deserialize)]
struct CashPoints {
    valuation: Vec<ValuationCase>,
    cagr: Vec<CagrCase>,
}

#[derive(Debug, Deserialize)]
struct ValuationCase {
    amount: f64,
    date: Date,
    on: Date,
    rate: f64,
    compounding: String,
    expected: f64,
}

#[derive(Debug, Deserialize)]
struct CagrCase {
    compounding: String,
    expected: f64,
}

fn load_reference() -> Reference {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    let path = std::path::Path::new(&manifest_dir).join(REFERENCE_FILE);

    let data = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read reference file at {:?}: {}", path, e));

    serde_json::from_str(&data).unwrap_or_else(|e| panic!("Failed to parse reference JSON: {}", e))
}

fn date(s: &str) -> Date {
    Date::parse(s).unwrap()
}

fn point(amount: f64, on: &str) -> CashPoint {
    CashPoint::on(amount, on).unwrap()
}

/// A project: 10,000 down, two more draws, seventeen monthly 1,000
/// receipts and a final 1,479.33.
fn project_flow() -> CashFlow {
    let mut flow = CashFlow::new();
    let mut on = date("2022-08-14");
    let mut amount = -10_000.0_f64;
    for _ in 0..20 {
        flow.add(CashPoint::new(amount, on).unwrap());
        amount = (amount + 4_700.0).min(1_000.0);
        on = on.add_months(1).unwrap();
    }
    flow.add(point(1_479.33, "2024-09-14"));
    flow
}

/// The project with a 3,000 clean-up cost on the last date, which pushes
/// the return below zero.
fn loss_making_flow() -> CashFlow {
    project_flow().with_point(point(-3_000.0, "2024-09-14"))
}

/// Two draws against twenty monthly 2,000 receipts and a 15,000 sale.
fn rental_flow() -> CashFlow {
    let start = date("2022-01-15");
    let mut flow = CashFlow::new()
        .with_point(CashPoint::new(-40_000.0, start).unwrap())
        .with_point(CashPoint::new(-5_000.0, start.add_months(18).unwrap()).unwrap());
    let first_rent = start.add_months(1).unwrap();
    for k in 0..20 {
        flow.add(CashPoint::new(2_000.0, first_rent.add_months(k).unwrap()).unwrap());
    }
    flow.add(CashPoint::new(15_000.0, first_rent.add_months(21).unwrap()).unwrap());
    flow
}

// =============================================================================
// Cash points
// =============================================================================

#[test]
fn test_cash_point_valuation_reference_values() {
    let reference = load_reference();

    for case in &reference.cash_points.valuation {
        let compounding: Compounding = case.compounding.parse().unwrap();
        let point = CashPoint::new(case.amount, case.date).unwrap();
        let value = point.value_on(case.on, case.rate, compounding);
        assert!(
            (value - case.expected).abs() < 1e-5,
            "{} {} -> {} at {} ({}): expected {}, got {}",
            case.amount,
            case.date,
            case.on,
            case.rate,
            compounding,
            case.expected,
            value
        );
    }
}

#[test]
fn test_cagr_reference_values() {
    let reference = load_reference();
    let from = point(45_000.33, "2022-11-16");
    let to = point(55_102.989_585_6, "2025-01-01");

    for case in &reference.cash_points.cagr {
        let compounding: Compounding = case.compounding.parse().unwrap();
        let rate = to.cagr(&from, compounding);
        assert!(
            (rate - case.expected).abs() < 1e-5,
            "cagr ({}): expected {}, got {}",
            compounding,
            case.expected,
            rate
        );
    }
}

// =============================================================================
// IRR
// =============================================================================

#[test]
fn test_project_irr() {
    let flow = project_flow();
    let config = IrrConfig::default().with_tolerance(1e-5);

    assert_abs_diff_eq!(flow.irr(&config), 0.170_2, epsilon = 1e-4);
    assert_abs_diff_eq!(flow.birr(&config, None).unwrap(), 0.170_2, epsilon = 1e-4);
}

#[test]
fn test_project_irr_by_compounding() {
    let flow = project_flow();
    let cases = [
        (Compounding::Discrete(Frequency::SemiAnnual), 0.163_515),
        (Compounding::Discrete(Frequency::Quarterly), 0.160_302),
        (Compounding::Discrete(Frequency::Monthly), 0.158_209),
        (Compounding::Continuous, 0.157_175),
    ];

    for (compounding, expected) in cases {
        let config = IrrConfig::default().with_compounding(compounding);
        let irr = flow.irr(&config);
        assert!(
            (irr - expected).abs() < 1e-5,
            "{compounding}: expected {expected}, got {irr}"
        );
        let birr = flow.birr(&config, None).unwrap();
        assert!(
            (birr - expected).abs() < 1e-5,
            "{compounding} bisection: expected {expected}, got {birr}"
        );
    }
}

#[test]
fn test_negative_irr() {
    let flow = loss_making_flow();
    let config = IrrConfig::default();

    assert_abs_diff_eq!(flow.irr(&config), -0.034_290_7, epsilon = 1e-5);
    assert_abs_diff_eq!(
        flow.irr(&config.with_guess(-0.5)),
        -0.034_290_7,
        epsilon = 1e-5
    );
    assert_abs_diff_eq!(
        flow.birr(&config, Some((-0.5, -0.02))).unwrap(),
        -0.034_290_7,
        epsilon = 1e-5
    );
}

#[test]
fn test_rental_irr() {
    let flow = rental_flow();
    // The second draw lands on a rent date
    assert_eq!(flow.len(), 22);

    assert_abs_diff_eq!(flow.irr(&IrrConfig::default()), 0.234_078_38, epsilon = 1e-5);

    let simple = IrrConfig::default().with_compounding(Compounding::Simple);
    assert_abs_diff_eq!(flow.irr(&simple), 0.243_32, epsilon = 1e-4);
    assert_abs_diff_eq!(flow.irr(&simple.with_guess(0.5)), 0.243_32, epsilon = 1e-4);
}

/// Every compounding the flows can be valued under.
fn all_compoundings() -> Vec<Compounding> {
    let mut modes: Vec<Compounding> = Frequency::all()
        .iter()
        .map(|f| Compounding::Discrete(*f))
        .collect();
    modes.push(Compounding::Continuous);
    modes.push(Compounding::Simple);
    modes
}

#[test]
fn test_irr_is_a_root() {
    for flow in [project_flow(), loss_making_flow(), rental_flow()] {
        let first = flow.first_date().unwrap();
        for compounding in all_compoundings() {
            for tolerance in [1e-5, 1e-6] {
                let config = IrrConfig::default()
                    .with_tolerance(tolerance)
                    .with_compounding(compounding);
                let irr = flow.irr(&config);
                let npv = flow.value_on(first, irr, compounding);
                assert!(
                    npv.abs() <= tolerance,
                    "{compounding} at {tolerance}: npv at {irr} is {npv}"
                );

                // Bisection alone may stop on bracket width instead
                let birr = flow.birr(&config, None).unwrap();
                assert!(
                    (birr - irr).abs() <= tolerance,
                    "{compounding} at {tolerance}: birr {birr} vs irr {irr}"
                );
            }
        }
    }
}

#[test]
fn test_slow_newton_still_lands_on_the_root() {
    // The discrete rate derivative overstates the slope for n > 1, so Newton
    // creeps and its steps shrink long before the NPV does
    let flow = project_flow();
    let first = flow.first_date().unwrap();
    let cases = [
        (Frequency::Quarterly, 0.160_303_8),
        (Frequency::Monthly, 0.158_208_8),
    ];

    for (frequency, expected) in cases {
        let compounding = Compounding::Discrete(frequency);
        for tolerance in [1e-5, 1e-6] {
            let config = IrrConfig::default()
                .with_tolerance(tolerance)
                .with_compounding(compounding);
            let irr = flow.irr(&config);
            assert_abs_diff_eq!(irr, expected, epsilon = 1e-6);
            assert!(flow.value_on(first, irr, compounding).abs() <= tolerance);
        }
    }
}

#[test]
fn test_far_guess_still_lands_on_the_root() {
    let flow = project_flow();
    let first = flow.first_date().unwrap();
    let config = IrrConfig::default().with_guess(-5.0);

    let irr = flow.irr(&config);
    assert_abs_diff_eq!(irr, 0.170_200_4, epsilon = 1e-6);
    assert!(flow.value_on(first, irr, Compounding::ANNUAL).abs() <= config.tolerance);
}

#[test]
fn test_irr_within_first_year() {
    // Five months of a project started mid-year: barely any money comes back
    let part = project_flow().within(&Period::year(2022).unwrap(), 0.1, Compounding::ANNUAL);
    let irr = part.irr(&IrrConfig::default());
    assert!(irr.is_nan() || (-1.0..-0.99).contains(&irr), "got {irr}");
}

// =============================================================================
// MIRR
// =============================================================================

#[test]
fn test_mirr() {
    let defaults = (accrue_flows::DEFAULT_EARN_RATE, accrue_flows::DEFAULT_BORROW_RATE);
    assert_abs_diff_eq!(
        project_flow().mirr(defaults.0, defaults.1, Compounding::ANNUAL),
        0.103_562_6,
        epsilon = 1e-6
    );
    assert_abs_diff_eq!(
        loss_making_flow().mirr(defaults.0, defaults.1, Compounding::ANNUAL),
        0.022_493,
        epsilon = 1e-6
    );
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_irr_recovers_rate(
        rate in 0.01f64..0.5,
        receipts in prop::collection::vec(100.0f64..5_000.0, 1..10),
        compounding in prop::sample::select(all_compoundings()),
    ) {
        let start = date("2020-01-01");
        let mut flow = CashFlow::new();
        let mut cost = 0.0;
        for (k, amount) in receipts.iter().enumerate() {
            let paid = CashPoint::new(*amount, start.add_years(k as i32 + 1).unwrap()).unwrap();
            cost += paid.value_on(start, rate, compounding);
            flow.add(paid);
        }
        flow.add(CashPoint::new(-cost, start).unwrap());

        let config = IrrConfig::default()
            .with_tolerance(1e-9)
            .with_compounding(compounding);
        let irr = flow.irr(&config);
        prop_assert!((irr - rate).abs() < 1e-6, "{}: rate {} irr {}", compounding, rate, irr);
        let npv = flow.value_on(start, irr, compounding);
        prop_assert!(npv.abs() <= 1e-9, "{}: npv {} at {}", compounding, npv, irr);
    }

    #[test]
    fn prop_one_sided_flow_has_no_irr(
        amounts in prop::collection::vec(1.0f64..1_000.0, 1..12),
        negate in any::<bool>(),
    ) {
        let start = date("2021-03-31");
        let flow: CashFlow = amounts
            .iter()
            .enumerate()
            .map(|(k, a)| {
                let amount = if negate { -a } else { *a };
                CashPoint::new(amount, start.add_months(k as i32).unwrap()).unwrap()
            })
            .collect();
        prop_assert!(flow.irr(&IrrConfig::default()).is_nan());
    }
}
