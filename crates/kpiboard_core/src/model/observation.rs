//! Monthly target/actual observations.
//!
//! # Responsibility
//! - Hold one (indicator, month) data point with kind-agnostic cells.
//! - Provide the lenient numeric and textual views used by the report engine.
//!
//! # Invariants
//! - Numeric views never fail: missing, unparseable or non-finite input is `0`.
//! - Textual views keep "no record" (`Absent`) distinct from a recorded blank.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One sheet cell after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Cell {
    Missing,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Converts a raw JSON cell. `None` and JSON null become `Missing`.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Missing,
            Some(Value::Number(number)) => match number.as_f64() {
                Some(parsed) => Self::Number(parsed),
                None => Self::Text(number.to_string()),
            },
            Some(Value::String(text)) => Self::Text(text.clone()),
            Some(Value::Bool(flag)) => Self::Text(flag.to_string()),
            Some(other) => Self::Text(other.to_string()),
        }
    }

    /// Lenient numeric view.
    pub fn as_number(&self) -> f64 {
        match self {
            Self::Missing => 0.0,
            Self::Number(value) if value.is_finite() => *value,
            Self::Number(_) => 0.0,
            Self::Text(text) => match text.trim().parse::<f64>() {
                Ok(value) if value.is_finite() => value,
                _ => 0.0,
            },
        }
    }

    /// Textual view.
    pub fn as_text(&self) -> TextValue {
        match self {
            Self::Missing => TextValue::Absent,
            Self::Number(value) => TextValue::Recorded(format_plain_number(*value)),
            Self::Text(text) => TextValue::Recorded(text.clone()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// Text cell that distinguishes "no record" from a recorded (possibly empty)
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", content = "text", rename_all = "snake_case")]
pub enum TextValue {
    Absent,
    Recorded(String),
}

impl TextValue {
    pub fn recorded(text: impl Into<String>) -> Self {
        Self::Recorded(text.into())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Absent => None,
            Self::Recorded(text) => Some(text.as_str()),
        }
    }
}

/// One (indicator, month) data point from the results feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub uid: String,
    /// `None` when the month cell was missing or outside `1..=12`.
    pub month: Option<u32>,
    pub target: Cell,
    pub actual: Cell,
}

impl ObservationRecord {
    pub fn new(uid: impl Into<String>, month: u32, target: Cell, actual: Cell) -> Self {
        Self {
            uid: uid.into(),
            month: Some(month),
            target,
            actual,
        }
    }

    /// Shorthand for numeric fixtures.
    pub fn numeric(uid: impl Into<String>, month: u32, target: f64, actual: f64) -> Self {
        Self::new(uid, month, Cell::Number(target), Cell::Number(actual))
    }

    /// Shorthand for textual fixtures; `None` maps to `Cell::Missing`.
    pub fn textual(
        uid: impl Into<String>,
        month: u32,
        target: Option<&str>,
        actual: Option<&str>,
    ) -> Self {
        let to_cell = |value: Option<&str>| match value {
            Some(text) => Cell::Text(text.to_string()),
            None => Cell::Missing,
        };
        Self::new(uid, month, to_cell(target), to_cell(actual))
    }

    pub fn is_in_month(&self, month: u32) -> bool {
        self.month == Some(month)
    }
}

/// Formats a number without a trailing `.0` when it is integral.
pub fn format_plain_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
