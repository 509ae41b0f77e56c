//! Numeric aggregator.
//!
//! # Responsibility
//! - Sum target/actual per month for one numeric indicator.
//! - Apply the configured cutoff policy to cumulative totals and variance.
//! - Keep policy-independent running totals for the chart.
//!
//! # Invariants
//! - `cumulative_variance == cumulative_actual - cumulative_target` exactly.
//! - `variance[m]`, when present, equals `actual[m] - target[m]`.
//! - An indicator without observations yields all-zero rows.

use crate::model::indicator::IndicatorDefinition;
use crate::model::observation::ObservationRecord;
use crate::model::{months, MONTHS_PER_YEAR};
use crate::report::cutoff::CutoffPolicy;
use crate::report::format::round_display;
use serde::{Deserialize, Serialize};

/// Twelve-month target/actual/variance summary for one numeric indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub uid: String,
    pub name: String,
    pub unit: String,
    pub policy: CutoffPolicy,
    pub current_month: u32,
    /// Index `0` is January.
    pub target: [f64; MONTHS_PER_YEAR],
    pub actual: [f64; MONTHS_PER_YEAR],
    /// `None` where the policy hides the month.
    pub variance: [Option<f64>; MONTHS_PER_YEAR],
    pub cumulative_target: f64,
    pub cumulative_actual: f64,
    pub cumulative_variance: f64,
    /// Sum of all twelve month targets, independent of the policy.
    pub yearly_goal: f64,
    /// Running target total through each month, independent of the policy.
    pub running_target: [f64; MONTHS_PER_YEAR],
    pub running_actual: [f64; MONTHS_PER_YEAR],
}

impl NumericSummary {
    pub fn month_target(&self, month: u32) -> Option<f64> {
        month_index(month).map(|index| self.target[index])
    }

    pub fn month_actual(&self, month: u32) -> Option<f64> {
        month_index(month).map(|index| self.actual[index])
    }

    pub fn month_variance(&self, month: u32) -> Option<f64> {
        month_index(month).and_then(|index| self.variance[index])
    }

    /// Months that contributed to the cumulative column.
    pub fn included_months(&self) -> Vec<u32> {
        months()
            .filter(|month| self.policy.includes_in_cumulative(*month, self.current_month))
            .collect()
    }

    /// Rounded cumulative `(target, actual, variance)` for display.
    pub fn rounded_cumulative(&self) -> (i64, i64, i64) {
        (
            round_display(self.cumulative_target),
            round_display(self.cumulative_actual),
            round_display(self.cumulative_variance),
        )
    }
}

/// Builds the summary for `definition` from all observation records; records
/// of other indicators are ignored.
pub fn summarize_numeric(
    definition: &IndicatorDefinition,
    records: &[ObservationRecord],
    policy: CutoffPolicy,
    current_month: u32,
) -> NumericSummary {
    let mut target = [0.0; MONTHS_PER_YEAR];
    let mut actual = [0.0; MONTHS_PER_YEAR];

    for record in records.iter().filter(|record| record.uid == definition.uid) {
        if let Some(index) = record.month.and_then(month_index) {
            target[index] += record.target.as_number();
            actual[index] += record.actual.as_number();
        }
    }

    let mut variance = [None; MONTHS_PER_YEAR];
    let mut running_target = [0.0; MONTHS_PER_YEAR];
    let mut running_actual = [0.0; MONTHS_PER_YEAR];
    let mut cumulative_target = 0.0;
    let mut cumulative_actual = 0.0;
    let mut running = (0.0, 0.0);

    for month in months() {
        let index = (month - 1) as usize;
        running.0 += target[index];
        running.1 += actual[index];
        running_target[index] = running.0;
        running_actual[index] = running.1;

        if policy.includes_in_cumulative(month, current_month) {
            cumulative_target += target[index];
            cumulative_actual += actual[index];
        }
        if policy.shows_variance(month, current_month) {
            variance[index] = Some(actual[index] - target[index]);
        }
    }

    NumericSummary {
        uid: definition.uid.clone(),
        name: definition.name.clone(),
        unit: definition.unit.clone(),
        policy,
        current_month,
        target,
        actual,
        variance,
        cumulative_target,
        cumulative_actual,
        cumulative_variance: cumulative_actual - cumulative_target,
        yearly_goal: target.iter().sum(),
        running_target,
        running_actual,
    }
}

fn month_index(month: u32) -> Option<usize> {
    if (1..=MONTHS_PER_YEAR as u32).contains(&month) {
        Some((month - 1) as usize)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::summarize_numeric;
    use crate::model::indicator::{IndicatorDefinition, IndicatorKind};
    use crate::model::observation::{Cell, ObservationRecord};
    use crate::report::cutoff::CutoffPolicy;

    fn definition() -> IndicatorDefinition {
        IndicatorDefinition::new("A", "판매량", IndicatorKind::Numeric, "톤")
    }

    #[test]
    fn ignores_records_of_other_indicators_and_unknown_months() {
        let records = vec![
            ObservationRecord::numeric("A", 1, 10.0, 12.0),
            ObservationRecord::numeric("B", 1, 500.0, 500.0),
            ObservationRecord {
                uid: "A".to_string(),
                month: None,
                target: Cell::Number(999.0),
                actual: Cell::Number(999.0),
            },
        ];
        let summary = summarize_numeric(&definition(), &records, CutoffPolicy::FullYear, 6);
        assert_eq!(summary.month_target(1), Some(10.0));
        assert_eq!(summary.month_actual(1), Some(12.0));
        assert_eq!(summary.yearly_goal, 10.0);
    }

    #[test]
    fn running_totals_ignore_policy() {
        let records = vec![
            ObservationRecord::numeric("A", 1, 1.0, 2.0),
            ObservationRecord::numeric("A", 12, 3.0, 4.0),
        ];
        let summary =
            summarize_numeric(&definition(), &records, CutoffPolicy::TrailingCutoff, 2);
        assert_eq!(summary.running_target[11], 4.0);
        assert_eq!(summary.running_actual[11], 6.0);
        assert_eq!(summary.cumulative_target, 1.0);
        assert_eq!(summary.included_months(), vec![1]);
    }

    #[test]
    fn out_of_range_month_lookups_return_none() {
        let summary = summarize_numeric(&definition(), &[], CutoffPolicy::FullYear, 1);
        assert_eq!(summary.month_target(0), None);
        assert_eq!(summary.month_actual(13), None);
        assert_eq!(summary.month_variance(13), None);
        assert_eq!(summary.month_variance(1), Some(0.0));
    }
}
