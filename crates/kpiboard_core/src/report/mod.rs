//! KPI aggregation and presentation engine.
//!
//! # Responsibility
//! - Aggregate numeric observations into monthly/cumulative summaries.
//! - Build textual timelines with merged target spans and card entries.
//! - Derive chart series and structured table models for the renderer.
//!
//! # Invariants
//! - Aggregation uses unrounded sums; rounding happens only for display.
//! - Merged spans are derived from a timeline on demand and never stored.

pub mod cutoff;
pub mod format;
pub mod numeric;
pub mod series;
pub mod table;
pub mod textual;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Reporting year and month a page is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub year: i32,
    /// Current month, `1..=12`.
    pub month: u32,
}

impl ReportPeriod {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}
