use kpiboard_core::ingest::normalize::normalize_memos;
use kpiboard_core::ingest::trim_columns;
use kpiboard_core::memo::{select_memos, MemoSection};
use kpiboard_core::model::row::RawRow;
use serde_json::json;

fn memo_rows() -> Vec<RawRow> {
    vec![
        RawRow::from_pairs([
            (" 년도", json!(2025)),
            ("월 ", json!(5)),
            ("본부", json!("글로벌전략본부")),
            ("입력자", json!("kim")),
            ("메모", json!("5월 실적 보고\n  다음 달 계획")),
        ]),
        RawRow::from_pairs([
            ("년도", json!("2025")),
            ("월", json!("5")),
            ("본부", json!("재경본부")),
            ("입력자", json!("lee")),
            ("메모", json!("finance")),
        ]),
        RawRow::from_pairs([
            ("년도", json!(2025)),
            ("월", json!("오월")),
            ("본부", json!("글로벌전략본부")),
            ("메모", json!("dropped")),
        ]),
    ]
}

#[test]
fn selects_by_period_and_division_token() {
    let memos = normalize_memos(&trim_columns(&memo_rows()));
    assert_eq!(memos.len(), 2);

    let may = select_memos(&memos, 2025, 5, "글로벌");
    assert_eq!(may.len(), 1);
    assert_eq!(may[0].author, "kim");
    assert_eq!(may[0].text, "5월 실적 보고\n  다음 달 계획");

    assert!(select_memos(&memos, 2025, 6, "글로벌").is_empty());
    assert!(select_memos(&memos, 2024, 5, "글로벌").is_empty());
}

#[test]
fn empty_selection_carries_message() {
    let memos = normalize_memos(&trim_columns(&memo_rows()));
    let selected: Vec<_> = select_memos(&memos, 2025, 6, "글로벌")
        .into_iter()
        .cloned()
        .collect();
    let section = MemoSection::new(2025, 6, selected);
    assert_eq!(section.empty_message(), Some("해당 월의 메모가 없습니다."));
}
