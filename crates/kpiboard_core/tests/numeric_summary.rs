use kpiboard_core::model::indicator::{IndicatorDefinition, IndicatorKind};
use kpiboard_core::model::observation::{Cell, ObservationRecord};
use kpiboard_core::report::format::yearly_goal_label;
use kpiboard_core::report::numeric::summarize_numeric;
use kpiboard_core::report::series::build_series;
use kpiboard_core::report::table::{numeric_table, Tone};
use kpiboard_core::CutoffPolicy;

fn sales() -> IndicatorDefinition {
    IndicatorDefinition::new("A", "해외 매출", IndicatorKind::Numeric, "억원")
}

#[test]
fn trailing_cutoff_cumulates_closed_months_only() {
    let records = vec![
        ObservationRecord::numeric("A", 1, 100.0, 90.0),
        ObservationRecord::numeric("A", 2, 100.0, 110.0),
        ObservationRecord::numeric("A", 3, 100.0, 0.0),
    ];
    let summary = summarize_numeric(&sales(), &records, CutoffPolicy::TrailingCutoff, 3);

    assert_eq!(summary.cumulative_target, 200.0);
    assert_eq!(summary.cumulative_actual, 200.0);
    assert_eq!(summary.cumulative_variance, 0.0);
    assert_eq!(summary.month_variance(1), Some(-10.0));
    assert_eq!(summary.month_variance(2), Some(10.0));
    assert_eq!(summary.month_variance(3), None);
    assert_eq!(summary.included_months(), vec![1, 2]);
}

#[test]
fn duplicate_month_rows_are_summed() {
    let records = vec![
        ObservationRecord::new("A", 4, Cell::Text("10".to_string()), Cell::Missing),
        ObservationRecord::new("A", 4, Cell::Text("20".to_string()), Cell::Number(5.0)),
        ObservationRecord::numeric("B", 4, 999.0, 999.0),
    ];
    let summary = summarize_numeric(&sales(), &records, CutoffPolicy::TrailingCutoff, 12);

    assert_eq!(summary.month_target(4), Some(30.0));
    assert_eq!(summary.month_actual(4), Some(5.0));
    assert_eq!(summary.month_variance(4), Some(-25.0));
}

#[test]
fn malformed_cells_count_as_zero() {
    let records = vec![ObservationRecord::new(
        "A",
        1,
        Cell::Text("n/a".to_string()),
        Cell::Number(f64::NAN),
    )];
    let summary = summarize_numeric(&sales(), &records, CutoffPolicy::FullYear, 1);
    assert_eq!(summary.month_target(1), Some(0.0));
    assert_eq!(summary.month_actual(1), Some(0.0));
}

#[test]
fn cumulative_cutoff_shows_every_variance() {
    let records: Vec<_> = (1..=12)
        .map(|month| ObservationRecord::numeric("A", month, 10.0, 12.0))
        .collect();
    let summary = summarize_numeric(&sales(), &records, CutoffPolicy::CumulativeCutoff, 5);

    assert_eq!(summary.cumulative_target, 40.0);
    assert_eq!(summary.cumulative_actual, 48.0);
    assert!(summary.variance.iter().all(|value| *value == Some(2.0)));
}

#[test]
fn full_year_ignores_request_month() {
    let records = vec![
        ObservationRecord::numeric("A", 1, 100.0, 100.0),
        ObservationRecord::numeric("A", 12, 300.0, 0.0),
    ];
    let summary = summarize_numeric(&sales(), &records, CutoffPolicy::FullYear, 1);

    assert_eq!(summary.cumulative_target, 400.0);
    assert_eq!(summary.cumulative_variance, -300.0);
    assert_eq!(summary.month_variance(12), Some(-300.0));
}

#[test]
fn yearly_goal_is_policy_independent() {
    let records: Vec<_> = (1..=12)
        .map(|month| ObservationRecord::numeric("A", month, 100.0, 0.0))
        .collect();
    for policy in [
        CutoffPolicy::TrailingCutoff,
        CutoffPolicy::CumulativeCutoff,
        CutoffPolicy::FullYear,
    ] {
        let summary = summarize_numeric(&sales(), &records, policy, 6);
        assert_eq!(summary.yearly_goal, 1_200.0);
        assert_eq!(
            yearly_goal_label(summary.yearly_goal, &summary.unit),
            "[연간목표: 1,200억원]"
        );
    }
}

#[test]
fn indicator_without_records_yields_zero_rows() {
    let summary = summarize_numeric(&sales(), &[], CutoffPolicy::TrailingCutoff, 7);
    assert!(summary.target.iter().all(|value| *value == 0.0));
    assert_eq!(summary.cumulative_variance, 0.0);
    assert!(build_series("A", "억원", &[]).is_empty());
}

#[test]
fn numeric_table_rounds_half_to_even_and_tones_variance() {
    let records = vec![
        ObservationRecord::numeric("A", 1, 1_000.0, 1_002.5),
        ObservationRecord::numeric("A", 2, 10.0, 7.0),
    ];
    let summary = summarize_numeric(&sales(), &records, CutoffPolicy::TrailingCutoff, 3);
    let table = numeric_table(&summary);

    assert_eq!(table.columns.len(), 14);
    assert_eq!(table.columns[0], "구분");
    assert_eq!(table.columns[13], "누적");

    let actual = &table.rows[1];
    assert_eq!(actual.cells[1].text, "1,002");

    let variance = &table.rows[2];
    assert_eq!(variance.cells[0].text, "목표比");
    assert_eq!(variance.cells[1].text, "2");
    assert_eq!(variance.cells[1].tone, Tone::Positive);
    assert_eq!(variance.cells[2].tone, Tone::Negative);
    assert!(variance.cells[3].placeholder);
    assert_eq!(variance.cells[13].text, "0");
    assert_eq!(variance.cells[13].tone, Tone::Neutral);
}

#[test]
fn chart_series_accumulates_months_with_data() {
    let records = vec![
        ObservationRecord::numeric("A", 3, 30.0, 20.0),
        ObservationRecord::numeric("A", 1, 10.0, 15.0),
        ObservationRecord::numeric("A", 3, 5.0, 5.0),
    ];
    let series = build_series("A", "억원", &records);

    assert_eq!(series.months, vec![1, 3]);
    assert_eq!(series.month_target, vec![10.0, 35.0]);
    assert_eq!(series.cumulative_target, vec![10.0, 45.0]);
    assert_eq!(series.cumulative_actual, vec![15.0, 40.0]);
}
