//! Chart series builder for the dual-axis monthly/cumulative chart.

use crate::model::observation::ObservationRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Four aligned series over the months that have data.
///
/// Bars plot `month_target`/`month_actual`; lines plot the cumulative pair on
/// the secondary axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub uid: String,
    pub unit: String,
    /// Distinct months present in the data, ascending.
    pub months: Vec<u32>,
    pub month_target: Vec<f64>,
    pub month_actual: Vec<f64>,
    pub cumulative_target: Vec<f64>,
    pub cumulative_actual: Vec<f64>,
}

impl ChartSeries {
    /// No month in `1..=12` had a record; the chart shows an empty state.
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }
}

/// Groups `uid`'s records by month, sums them and accumulates in month order.
/// Cumulative sums are unconditional; the cutoff policy does not apply here.
pub fn build_series(uid: &str, unit: &str, records: &[ObservationRecord]) -> ChartSeries {
    let mut by_month: BTreeMap<u32, (f64, f64)> = BTreeMap::new();
    for record in records.iter().filter(|record| record.uid == uid) {
        let Some(month) = record.month.filter(|month| (1..=12).contains(month)) else {
            continue;
        };
        let entry = by_month.entry(month).or_insert((0.0, 0.0));
        entry.0 += record.target.as_number();
        entry.1 += record.actual.as_number();
    }

    let mut series = ChartSeries {
        uid: uid.to_string(),
        unit: unit.to_string(),
        months: Vec::with_capacity(by_month.len()),
        month_target: Vec::with_capacity(by_month.len()),
        month_actual: Vec::with_capacity(by_month.len()),
        cumulative_target: Vec::with_capacity(by_month.len()),
        cumulative_actual: Vec::with_capacity(by_month.len()),
    };

    let (mut running_target, mut running_actual) = (0.0, 0.0);
    for (month, (target, actual)) in by_month {
        running_target += target;
        running_actual += actual;
        series.months.push(month);
        series.month_target.push(target);
        series.month_actual.push(actual);
        series.cumulative_target.push(running_target);
        series.cumulative_actual.push(running_actual);
    }

    series
}
