//! Indicator (KPI goal) definitions.
//!
//! # Responsibility
//! - Model one tracked goal and its quantitative/qualitative kind.
//! - Map sheet kind tags onto a closed two-variant enum.
//!
//! # Invariants
//! - `uid` is non-empty after normalization.
//! - Tag matching is exact: no trimming and no case folding.

use serde::{Deserialize, Serialize};

/// Sheet tag for quantitative indicators.
pub const KIND_TAG_NUMERIC: &str = "정량";
/// Sheet tag for qualitative indicators.
pub const KIND_TAG_TEXTUAL: &str = "정성";

const KIND_TAG_NUMERIC_ALIAS: &str = "quantitative";
const KIND_TAG_TEXTUAL_ALIAS: &str = "qualitative";

/// Closed indicator kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    /// Tracked as a number per month.
    Numeric,
    /// Tracked as free text per month.
    Textual,
}

impl IndicatorKind {
    /// Parses a kind tag. Returns `None` for anything other than the exact
    /// Korean sheet tags or their English aliases.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            KIND_TAG_NUMERIC | KIND_TAG_NUMERIC_ALIAS => Some(Self::Numeric),
            KIND_TAG_TEXTUAL | KIND_TAG_TEXTUAL_ALIAS => Some(Self::Textual),
            _ => None,
        }
    }

    /// Canonical sheet tag for this kind.
    pub fn as_tag(self) -> &'static str {
        match self {
            Self::Numeric => KIND_TAG_NUMERIC,
            Self::Textual => KIND_TAG_TEXTUAL,
        }
    }
}

/// One tracked goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorDefinition {
    pub uid: String,
    /// Display label (`추진 목표`).
    pub name: String,
    pub kind: IndicatorKind,
    /// Display unit; meaningful for numeric indicators, empty when absent.
    pub unit: String,
}

impl IndicatorDefinition {
    pub fn new(
        uid: impl Into<String>,
        name: impl Into<String>,
        kind: IndicatorKind,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            uid: uid.into(),
            name: name.into(),
            kind,
            unit: unit.into(),
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.kind == IndicatorKind::Numeric
    }
}

/// Definition row whose kind tag matched neither kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnrecognizedIndicator {
    pub uid: String,
    pub name: String,
    /// Raw tag as found in the sheet; empty when the cell was missing.
    pub tag: String,
}
