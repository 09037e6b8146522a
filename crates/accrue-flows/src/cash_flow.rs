//! Streams of dated payments.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use accrue_core::types::{Compounding, Date, Period};
use accrue_math::Evaluation;

use crate::cash_point::CashPoint;

/// Reinvestment rate for the positive amounts in [`CashFlow::mirr`].
pub const DEFAULT_EARN_RATE: f64 = 0.05;

/// Finance rate for the negative amounts in [`CashFlow::mirr`].
pub const DEFAULT_BORROW_RATE: f64 = 0.07;

/// Payments at arbitrary, not necessarily evenly spaced, dates.
///
/// At most one point is kept per date: adding a point on a date already
/// present merges the amounts. Iteration is always in date order.
///
/// # Example
///
/// ```rust
/// use accrue_flows::{CashFlow, CashPoint};
///
/// let mut flow = CashFlow::new();
/// flow.add(CashPoint::on(-1_000.0, "2023-01-01").unwrap())
///     .add(CashPoint::on(600.0, "2024-01-01").unwrap())
///     .add(CashPoint::on(600.0, "2024-01-01").unwrap());
///
/// assert_eq!(flow.len(), 2);
/// assert_eq!(flow.positive_sum(), 1_200.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CashPoint>", into = "Vec<CashPoint>")]
pub struct CashFlow {
    points: BTreeMap<Date, CashPoint>,
}

impl CashFlow {
    /// Creates an empty cash flow.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a point, merging it into any point already on the same date.
    pub fn add(&mut self, point: CashPoint) -> &mut Self {
        self.points
            .entry(point.date())
            .and_modify(|existing| {
                existing.merge(&point);
            })
            .or_insert(point);
        self
    }

    /// Consuming form of [`CashFlow::add`].
    #[must_use]
    pub fn with_point(mut self, point: CashPoint) -> Self {
        self.add(point);
        self
    }

    /// Adds every point of `other` into this flow.
    pub fn merge(&mut self, other: &CashFlow) -> &mut Self {
        for point in other.points() {
            self.add(*point);
        }
        self
    }

    /// Points in date order.
    pub fn points(&self) -> impl Iterator<Item = &CashPoint> + '_ {
        self.points.values()
    }

    /// Amounts in date order.
    pub fn amounts(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.values().map(CashPoint::amount)
    }

    /// Dates in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = Date> + '_ {
        self.points.keys().copied()
    }

    /// Number of distinct payment dates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the flow holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Earliest payment date.
    #[must_use]
    pub fn first_date(&self) -> Option<Date> {
        self.points.keys().next().copied()
    }

    /// Latest payment date.
    #[must_use]
    pub fn last_date(&self) -> Option<Date> {
        self.points.keys().next_back().copied()
    }

    /// Span from first to last payment.
    #[must_use]
    pub fn period(&self) -> Option<Period> {
        Period::new(self.first_date()?, self.last_date()?).ok()
    }

    /// Span of the flow in years of 30-day months; zero when empty.
    #[must_use]
    pub fn years(&self) -> f64 {
        match (self.first_date(), self.last_date()) {
            (Some(first), Some(last)) => last.month_diff(&first) / 12.0,
            _ => 0.0,
        }
    }

    /// Net of all amounts.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.amounts().sum()
    }

    /// Sum of the inflows.
    #[must_use]
    pub fn positive_sum(&self) -> f64 {
        self.amounts().filter(|a| *a > 0.0).sum()
    }

    /// Sum of the outflows, as a negative number.
    #[must_use]
    pub fn negative_sum(&self) -> f64 {
        self.amounts().filter(|a| *a < 0.0).sum()
    }

    /// True if there is at least one inflow and one outflow.
    ///
    /// No rate can zero the value of a flow without both.
    #[must_use]
    pub fn mixed_signs(&self) -> bool {
        self.amounts().any(|a| a > 0.0) && self.amounts().any(|a| a < 0.0)
    }

    /// Net value of the flow on `on` at `rate`.
    #[must_use]
    pub fn evaluate_on(&self, on: Date, rate: f64, compounding: Compounding) -> Evaluation {
        self.points()
            .map(|p| p.evaluate_on(on, rate, compounding))
            .sum()
    }

    /// Like [`CashFlow::evaluate_on`], with `NaN` for non-real results.
    #[must_use]
    pub fn value_on(&self, on: Date, rate: f64, compounding: Compounding) -> f64 {
        self.evaluate_on(on, rate, compounding).value()
    }

    /// Sum of each point's [`CashPoint::derivative_on`].
    #[must_use]
    pub fn derivative_on(&self, on: Date, rate: f64, compounding: Compounding) -> Evaluation {
        self.points()
            .map(|p| p.derivative_on(on, rate, compounding))
            .sum()
    }

    /// Like [`CashFlow::derivative_on`], with `NaN` for non-real results.
    #[must_use]
    pub fn value_on_prime(&self, on: Date, rate: f64, compounding: Compounding) -> f64 {
        self.derivative_on(on, rate, compounding).value()
    }

    /// Net present value as of the first payment date; zero when empty.
    #[must_use]
    pub fn npv(&self, rate: f64, compounding: Compounding) -> f64 {
        self.first_date()
            .map_or(0.0, |first| self.value_on(first, rate, compounding))
    }

    fn filtered(&self, keep: impl Fn(&CashPoint) -> bool) -> CashFlow {
        self.points().filter(|p| keep(p)).copied().collect()
    }

    /// Modified internal rate of return.
    ///
    /// Inflows are carried forward to the last date at `earn_rate`, outflows
    /// discounted to the first date at `borrow_rate`, and the result is the
    /// annual rate linking the two:
    ///
    /// $$MIRR = \left(\frac{FV_{in}}{-PV_{out}}\right)^{1/years} - 1$$
    ///
    /// Zero for an empty flow or one without inflows; `+inf` for a flow
    /// without outflows.
    #[must_use]
    pub fn mirr(&self, earn_rate: f64, borrow_rate: f64, compounding: Compounding) -> f64 {
        let (Some(first), Some(last)) = (self.first_date(), self.last_date()) else {
            return 0.0;
        };
        let inflows = self.filtered(|p| p.amount() > 0.0);
        let outflows = self.filtered(|p| p.amount() < 0.0);
        if inflows.is_empty() {
            return 0.0;
        }
        if outflows.is_empty() {
            return f64::INFINITY;
        }

        let fv = inflows.value_on(last, earn_rate, compounding);
        let pv = -outflows.value_on(first, borrow_rate, compounding);
        (fv / pv).powf(1.0 / self.years()) - 1.0
    }

    /// The part of the flow falling inside `period`.
    ///
    /// Everything paid before the period is rolled forward at `rate` into a
    /// single point on the period's first day; that point is present, with a
    /// zero amount, even when nothing precedes the period. Points after the
    /// period are dropped.
    #[must_use]
    pub fn within(&self, period: &Period, rate: f64, compounding: Compounding) -> CashFlow {
        let start = period.first();
        let carried = self
            .filtered(|p| p.date() < start)
            .value_on(start, rate, compounding);

        let opening = CashPoint::new(carried, start).unwrap_or_else(|_| {
            warn!("earlier payments have no real value on {start} at rate {rate}");
            CashPoint::zero(start)
        });

        let mut flow = CashFlow::new().with_point(opening);
        for point in self.points().filter(|p| period.contains(p.date())) {
            flow.add(*point);
        }
        flow
    }
}

impl FromIterator<CashPoint> for CashFlow {
    fn from_iter<I: IntoIterator<Item = CashPoint>>(iter: I) -> Self {
        let mut flow = CashFlow::new();
        flow.extend(iter);
        flow
    }
}

impl Extend<CashPoint> for CashFlow {
    fn extend<I: IntoIterator<Item = CashPoint>>(&mut self, iter: I) {
        for point in iter {
            self.add(point);
        }
    }
}

impl From<Vec<CashPoint>> for CashFlow {
    fn from(points: Vec<CashPoint>) -> Self {
        points.into_iter().collect()
    }
}

impl From<CashFlow> for Vec<CashPoint> {
    fn from(flow: CashFlow) -> Self {
        flow.points.into_values().collect()
    }
}

impl fmt::Display for CashFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CashFlow[")?;
        for (i, point) in self.points().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{point}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accrue_core::types::Frequency;
    use approx::assert_abs_diff_eq;

    fn pt(amount: f64, date: &str) -> CashPoint {
        CashPoint::on(amount, date).unwrap()
    }

    fn d(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    /// -10000 then -5300, -600 and seventeen 1000s, monthly, then 1479.33.
    fn sample_flow() -> CashFlow {
        let mut flow = CashFlow::new();
        let mut date = d("2022-08-14");
        let mut amount = -10_000.0_f64;
        for _ in 0..20 {
            flow.add(CashPoint::new(amount, date).unwrap());
            amount = (amount + 4_700.0).min(1_000.0);
            date = date.add_months(1).unwrap();
        }
        flow.add(pt(1_479.33, "2024-09-14"));
        flow
    }

    #[test]
    fn test_empty_flow() {
        let flow = CashFlow::new();
        assert!(flow.is_empty());
        assert_eq!(flow.first_date(), None);
        assert_eq!(flow.years(), 0.0);
        assert_eq!(flow.npv(0.1, Compounding::ANNUAL), 0.0);
        assert_eq!(flow.mirr(0.05, 0.07, Compounding::ANNUAL), 0.0);
        assert!(!flow.mixed_signs());
    }

    #[test]
    fn test_add_merges_same_date() {
        let mut flow = CashFlow::new();
        flow.add(pt(100.0, "2024-01-01"))
            .add(pt(-30.0, "2024-01-01"))
            .add(pt(5.0, "2023-01-01"));
        assert_eq!(flow.len(), 2);
        assert_eq!(flow.amounts().collect::<Vec<_>>(), vec![5.0, 70.0]);
        assert_eq!(flow.first_date(), Some(d("2023-01-01")));
    }

    #[test]
    fn test_merge_flows() {
        let mut a: CashFlow = vec![pt(1.0, "2024-01-01"), pt(2.0, "2024-02-01")].into();
        let b = CashFlow::new()
            .with_point(pt(3.0, "2024-02-01"))
            .with_point(pt(4.0, "2024-03-01"));
        a.merge(&b);
        assert_eq!(a.amounts().collect::<Vec<_>>(), vec![1.0, 5.0, 4.0]);
        // Receiver only
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn test_sums_and_span() {
        let flow = sample_flow();
        assert_eq!(flow.len(), 21);
        assert_abs_diff_eq!(flow.sum(), 2_579.33, epsilon = 1e-9);
        assert_abs_diff_eq!(flow.positive_sum(), 18_479.33, epsilon = 1e-9);
        assert_abs_diff_eq!(flow.negative_sum(), -15_900.0, epsilon = 1e-9);
        assert_abs_diff_eq!(flow.years(), 25.0 / 12.0, epsilon = 1e-12);
        assert!(flow.mixed_signs());
        assert_eq!(
            flow.period().unwrap(),
            Period::new(d("2022-08-14"), d("2024-09-14")).unwrap()
        );
    }

    #[test]
    fn test_value_on() {
        let flow = sample_flow();
        let first = flow.first_date().unwrap();
        assert_abs_diff_eq!(
            flow.value_on(first, 0.05, Compounding::ANNUAL),
            1_722.379_16,
            epsilon = 1e-4
        );
        assert_abs_diff_eq!(flow.value_on(first, 0.0, Compounding::ANNUAL), flow.sum(), epsilon = 1e-9);
    }

    #[test]
    fn test_value_complex_propagates() {
        let flow = sample_flow();
        let first = flow.first_date().unwrap();
        assert!(flow.evaluate_on(first, -1.5, Compounding::ANNUAL).is_complex());
        assert!(flow.value_on(first, -1.5, Compounding::ANNUAL).is_nan());
        assert!(flow.value_on_prime(first, -1.5, Compounding::ANNUAL).is_nan());
    }

    #[test]
    fn test_mirr() {
        let flow = sample_flow();
        assert_abs_diff_eq!(
            flow.mirr(DEFAULT_EARN_RATE, DEFAULT_BORROW_RATE, Compounding::ANNUAL),
            0.103_562_6,
            epsilon = 1e-6
        );

        let bad = sample_flow().with_point(pt(-3_000.0, "2024-09-14"));
        assert_abs_diff_eq!(bad.mirr(0.05, 0.07, Compounding::ANNUAL), 0.022_493, epsilon = 1e-6);
    }

    #[test]
    fn test_mirr_one_sided() {
        let inflows: CashFlow = vec![pt(10.0, "2024-01-01"), pt(10.0, "2025-01-01")].into();
        assert_eq!(inflows.mirr(0.05, 0.07, Compounding::ANNUAL), f64::INFINITY);

        let outflows: CashFlow = vec![pt(-10.0, "2024-01-01"), pt(-10.0, "2025-01-01")].into();
        assert_eq!(outflows.mirr(0.05, 0.07, Compounding::ANNUAL), 0.0);
    }

    #[test]
    fn test_within_carries_earlier_points() {
        let flow = sample_flow();
        let part = flow.within(&Period::year(2023).unwrap(), 0.1, Compounding::ANNUAL);
        assert_eq!(part.len(), 13);
        assert_eq!(part.first_date(), Some(d("2023-01-01")));

        let before: CashFlow = flow.points().filter(|p| p.date().year() < 2023).copied().collect();
        let carried = before.value_on(d("2023-01-01"), 0.1, Compounding::ANNUAL);
        assert_abs_diff_eq!(part.amounts().next().unwrap(), carried, epsilon = 1e-9);
        assert_eq!(part.last_date(), Some(d("2023-12-14")));
    }

    #[test]
    fn test_within_always_has_opening_point() {
        let flow = sample_flow();
        let part = flow.within(&Period::year(2022).unwrap(), 0.1, Compounding::ANNUAL);
        assert_eq!(part.first_date(), Some(d("2022-01-01")));
        assert_eq!(part.amounts().next(), Some(0.0));
        assert_eq!(part.len(), 6);
        assert_abs_diff_eq!(
            part.mirr(0.05, 0.07, Compounding::ANNUAL),
            -0.880_851_7,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_within_other_compounding() {
        let flow = sample_flow();
        let quarterly = Compounding::Discrete(Frequency::Quarterly);
        let part = flow.within(&Period::year(2024).unwrap(), 0.08, quarterly);
        assert_eq!(part.last_date(), Some(d("2024-09-14")));
        assert_eq!(part.first_date(), Some(d("2024-01-01")));
    }

    #[test]
    fn test_serde_round_trip_merges() {
        let json = r#"[
            {"date": "2024-01-01", "amount": -100.0},
            {"date": "2024-06-01", "amount": 60.0},
            {"date": "2024-06-01", "amount": 60.0}
        ]"#;
        let flow: CashFlow = serde_json::from_str(json).unwrap();
        assert_eq!(flow.len(), 2);
        let back = serde_json::to_value(&flow).unwrap();
        assert_eq!(back[1]["amount"], 120.0);
    }

    #[test]
    fn test_display() {
        let flow: CashFlow = vec![pt(-1.0, "2024-01-01"), pt(2.5, "2024-02-01")].into();
        assert_eq!(flow.to_string(), "CashFlow[-1.00 @ 2024-01-01, 2.50 @ 2024-02-01]");
    }
}
