//! Ingestion of raw feed rows into typed records.
//!
//! # Responsibility
//! - Trim column names and coerce cells leniently (`normalize`).
//! - Partition definitions by indicator kind (`classify`).
//!
//! # Invariants
//! - Malformed cells are defaulted, never reported as errors.
//! - Structural problems (results for undefined indicators) are fatal.

pub mod classify;
pub mod normalize;

use crate::model::row::RawRow;

/// Column names used by the targets, results and memo feeds.
pub mod columns {
    pub const UID: &str = "UID";
    pub const GOAL_NAME: &str = "추진 목표";
    pub const KIND: &str = "지표 유형";
    pub const UNIT: &str = "단위";
    pub const MONTH: &str = "월";
    pub const TARGET: &str = "목표";
    pub const ACTUAL: &str = "실적";
    pub const YEAR: &str = "년도";
    pub const DIVISION: &str = "본부";
    pub const AUTHOR: &str = "입력자";
    pub const MEMO: &str = "메모";
}

/// Returns copies of `rows` with surrounding whitespace removed from every
/// column name.
pub fn trim_columns(rows: &[RawRow]) -> Vec<RawRow> {
    rows.iter().map(RawRow::with_trimmed_columns).collect()
}
