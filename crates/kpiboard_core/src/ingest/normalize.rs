//! Record normalizer: raw rows to typed definitions, observations and memos.
//!
//! # Responsibility
//! - Read the three feeds by (trimmed) column name.
//! - Coerce cells with the best-effort policy of the dashboard.
//! - Verify that every observation references a defined indicator.
//!
//! # Invariants
//! - Input rows are expected to have trimmed column names (`trim_columns`).
//! - Rows without a UID (or memo rows without year/month) are skipped.
//! - For duplicate definition UIDs the first row wins.

use crate::ingest::columns;
use crate::model::indicator::{IndicatorDefinition, IndicatorKind, UnrecognizedIndicator};
use crate::model::memo::MemoEntry;
use crate::model::observation::{format_plain_number, Cell, ObservationRecord};
use crate::model::row::RawRow;
use log::{debug, warn};
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Results reference indicators that the targets feed does not define.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataIntegrityError {
    UndefinedUid { uids: Vec<String> },
}

impl Display for DataIntegrityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UndefinedUid { uids } => write!(
                f,
                "data integrity: results reference undefined indicator uid(s): {}",
                uids.join(", ")
            ),
        }
    }
}

impl Error for DataIntegrityError {}

/// Definitions read from the targets feed, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefinitionSet {
    definitions: Vec<IndicatorDefinition>,
    unrecognized: Vec<UnrecognizedIndicator>,
}

impl DefinitionSet {
    /// Builds a set from already-typed definitions. Duplicate UIDs keep the
    /// first entry.
    pub fn from_definitions(definitions: Vec<IndicatorDefinition>) -> Self {
        let mut set = Self::default();
        let mut seen = HashSet::new();
        for definition in definitions {
            if seen.insert(definition.uid.clone()) {
                set.definitions.push(definition);
            }
        }
        set
    }

    /// Definitions with a recognized kind.
    pub fn definitions(&self) -> &[IndicatorDefinition] {
        &self.definitions
    }

    /// Definitions whose kind tag was not recognized.
    pub fn unrecognized(&self) -> &[UnrecognizedIndicator] {
        &self.unrecognized
    }

    pub fn get(&self, uid: &str) -> Option<&IndicatorDefinition> {
        self.definitions.iter().find(|definition| definition.uid == uid)
    }

    /// Whether any definition row exists for `uid`, recognized or not.
    pub fn contains_uid(&self, uid: &str) -> bool {
        self.get(uid).is_some() || self.unrecognized.iter().any(|item| item.uid == uid)
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty() && self.unrecognized.is_empty()
    }

    /// Fails when any observation references a UID with no definition row.
    pub fn check_integrity(&self, records: &[ObservationRecord]) -> Result<(), DataIntegrityError> {
        let undefined: BTreeSet<&str> = records
            .iter()
            .map(|record| record.uid.as_str())
            .filter(|uid| !self.contains_uid(uid))
            .collect();

        if undefined.is_empty() {
            return Ok(());
        }
        Err(DataIntegrityError::UndefinedUid {
            uids: undefined.into_iter().map(str::to_string).collect(),
        })
    }
}

/// Reads the targets feed.
pub fn normalize_definitions(rows: &[RawRow]) -> DefinitionSet {
    let mut set = DefinitionSet::default();
    let mut seen = HashSet::new();

    for (index, row) in rows.iter().enumerate() {
        let Some(uid) = read_uid(row) else {
            debug!("event=definition_skipped module=ingest reason=missing_uid row={index}");
            continue;
        };
        if !seen.insert(uid.clone()) {
            warn!("event=definition_duplicate module=ingest uid={uid} row={index}");
            continue;
        }

        let name = read_text(row, columns::GOAL_NAME).unwrap_or_default();
        let tag = read_text(row, columns::KIND).unwrap_or_default();
        match IndicatorKind::from_tag(&tag) {
            Some(kind) => {
                let unit = read_text(row, columns::UNIT).unwrap_or_default();
                set.definitions
                    .push(IndicatorDefinition::new(uid, name, kind, unit));
            }
            None => set.unrecognized.push(UnrecognizedIndicator { uid, name, tag }),
        }
    }

    set
}

/// Reads the results feed.
pub fn normalize_observations(rows: &[RawRow]) -> Vec<ObservationRecord> {
    rows.iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let Some(uid) = read_uid(row) else {
                debug!("event=observation_skipped module=ingest reason=missing_uid row={index}");
                return None;
            };
            Some(ObservationRecord {
                uid,
                month: row.get(columns::MONTH).and_then(parse_month),
                target: Cell::from_value(row.get(columns::TARGET)),
                actual: Cell::from_value(row.get(columns::ACTUAL)),
            })
        })
        .collect()
}

/// Reads the memo feed.
pub fn normalize_memos(rows: &[RawRow]) -> Vec<MemoEntry> {
    rows.iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let year = row.get(columns::YEAR).and_then(parse_year);
            let month = row.get(columns::MONTH).and_then(parse_month);
            let (Some(year), Some(month)) = (year, month) else {
                debug!("event=memo_skipped module=ingest reason=bad_period row={index}");
                return None;
            };
            Some(MemoEntry {
                year,
                month,
                division: read_text(row, columns::DIVISION).unwrap_or_default(),
                author: read_text(row, columns::AUTHOR).unwrap_or_default(),
                text: read_text(row, columns::MEMO).unwrap_or_default(),
            })
        })
        .collect()
}

/// Parses a month cell; accepts integral numbers and numeric strings in
/// `1..=12`.
pub fn parse_month(value: &Value) -> Option<u32> {
    let month = parse_integral(value)?;
    if (1..=12).contains(&month) {
        Some(month as u32)
    } else {
        None
    }
}

/// Parses a year cell; accepts integral numbers and numeric strings.
pub fn parse_year(value: &Value) -> Option<i32> {
    parse_integral(value).and_then(|year| i32::try_from(year).ok())
}

fn parse_integral(value: &Value) -> Option<i64> {
    let number = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if number.is_finite() && number.fract() == 0.0 {
        Some(number as i64)
    } else {
        None
    }
}

fn read_uid(row: &RawRow) -> Option<String> {
    read_text(row, columns::UID).filter(|uid| !uid.trim().is_empty())
}

fn read_text(row: &RawRow, column: &str) -> Option<String> {
    match row.get(column)? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(match number.as_f64() {
            Some(value) => format_plain_number(value),
            None => number.to_string(),
        }),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
