use kpiboard_core::model::indicator::{IndicatorDefinition, IndicatorKind};
use kpiboard_core::model::observation::{ObservationRecord, TextValue};
use kpiboard_core::report::table::{textual_horizontal_table, textual_vertical_table};
use kpiboard_core::report::textual::{build_cards, build_timeline, merged_spans};

fn partnership() -> IndicatorDefinition {
    IndicatorDefinition::new("T1", "현지 파트너십", IndicatorKind::Textual, "")
}

fn sample_records() -> Vec<ObservationRecord> {
    vec![
        ObservationRecord::textual("T1", 1, Some("A"), Some("착수")),
        ObservationRecord::textual("T1", 2, Some("A"), None),
        ObservationRecord::textual("T1", 3, Some("B"), Some("완료")),
        ObservationRecord::textual("T2", 4, Some("other"), Some("other")),
    ]
}

#[test]
fn consecutive_equal_targets_merge() {
    let timeline = build_timeline(&partnership(), &sample_records());
    let spans = merged_spans(&timeline);

    assert_eq!(spans[0].start_month, 1);
    assert_eq!(spans[0].len, 2);
    assert_eq!(spans[0].target, TextValue::recorded("A"));
    assert_eq!(spans[1].start_month, 3);
    assert_eq!(spans[1].len, 1);
    assert!(spans[2..].iter().all(|span| span.target.is_absent() && span.len == 1));
}

#[test]
fn every_month_belongs_to_exactly_one_span() {
    let timeline = build_timeline(&partnership(), &sample_records());
    let spans = merged_spans(&timeline);

    for month in 1..=12 {
        let owners = spans.iter().filter(|span| span.contains(month)).count();
        assert_eq!(owners, 1, "month {month}");
    }
    assert_eq!(spans.iter().map(|span| span.len).sum::<u32>(), 12);
}

#[test]
fn equal_targets_separated_by_a_gap_do_not_merge() {
    let records = vec![
        ObservationRecord::textual("T1", 1, Some("A"), None),
        ObservationRecord::textual("T1", 3, Some("A"), None),
    ];
    let spans = merged_spans(&build_timeline(&partnership(), &records));
    assert!(spans.iter().all(|span| span.len == 1));
}

#[test]
fn vertical_table_spans_rows_and_highlights_current_month() {
    let timeline = build_timeline(&partnership(), &sample_records());
    let table = textual_vertical_table(&timeline, 2);

    assert_eq!(table.columns, vec!["월", "목표", "실적"]);
    assert_eq!(table.rows.len(), 12);
    assert_eq!(table.rows[0].cells.len(), 3);
    assert_eq!(table.rows[0].cells[1].row_span, 2);
    assert_eq!(table.rows[1].cells.len(), 2);
    assert!(table.rows[1].cells[1].placeholder);
    assert!(table.rows[1].highlighted);
    assert_eq!(table.rows.iter().filter(|row| row.highlighted).count(), 1);
}

#[test]
fn horizontal_target_row_spans_twelve_columns() {
    let timeline = build_timeline(&partnership(), &sample_records());
    let table = textual_horizontal_table(&timeline);

    assert_eq!(table.columns.len(), 13);
    let target_row = &table.rows[0];
    assert_eq!(target_row.width(), 13);
    assert_eq!(target_row.cells[1].col_span, 2);
    assert_eq!(target_row.cells[1].text, "A");
    let actual_row = &table.rows[1];
    assert_eq!(actual_row.cells.len(), 13);
}

#[test]
fn cards_skip_blank_months_and_mark_current() {
    let timeline = build_timeline(&partnership(), &sample_records());
    let cards = build_cards(&timeline, 3);

    assert_eq!(cards.iter().map(|card| card.month).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(cards[1].actual_display(), "실적 없음");
    assert_eq!(cards[2].chip_label(), "3월 · 현재");
    assert!(!cards[0].is_current);
}

#[test]
fn indicator_without_records_has_no_cards() {
    let timeline = build_timeline(&partnership(), &[]);
    assert_eq!(timeline.entries.len(), 12);
    assert!(build_cards(&timeline, 1).is_empty());
}
