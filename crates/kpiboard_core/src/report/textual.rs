//! Textual timeline builder.
//!
//! # Responsibility
//! - Build the 12-month target/actual timeline of one textual indicator.
//! - Group consecutive months with identical targets into merged spans.
//! - Produce card entries for the compact card layout.
//!
//! # Invariants
//! - A timeline always has exactly 12 entries, January first.
//! - Every month belongs to exactly one span; spans are contiguous and
//!   ordered.
//! - An absent target never merges with a neighbour.

use crate::model::indicator::IndicatorDefinition;
use crate::model::observation::{ObservationRecord, TextValue};
use crate::model::months;
use crate::report::format::{
    month_label, CARD_CURRENT_SUFFIX, CARD_NO_ACTUAL, CARD_NO_TARGET, NO_DATA,
};
use serde::{Deserialize, Serialize};

/// One month of a textual indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub month: u32,
    pub target: TextValue,
    pub actual: TextValue,
}

impl TimelineEntry {
    pub fn is_blank(&self) -> bool {
        self.target.is_absent() && self.actual.is_absent()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextualTimeline {
    pub uid: String,
    pub name: String,
    pub entries: Vec<TimelineEntry>,
}

impl TextualTimeline {
    pub fn entry(&self, month: u32) -> Option<&TimelineEntry> {
        self.entries.iter().find(|entry| entry.month == month)
    }
}

/// Run of consecutive months sharing one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSpan {
    pub start_month: u32,
    pub len: u32,
    pub target: TextValue,
}

impl TargetSpan {
    pub fn end_month(&self) -> u32 {
        self.start_month + self.len - 1
    }

    /// Renders as one merged cell.
    pub fn is_merged(&self) -> bool {
        self.len > 1
    }

    pub fn contains(&self, month: u32) -> bool {
        (self.start_month..=self.end_month()).contains(&month)
    }
}

/// Card layout entry; months without any record are not represented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineCard {
    pub month: u32,
    pub target: TextValue,
    pub actual: TextValue,
    pub is_current: bool,
}

impl TimelineCard {
    /// `5월` or `5월 · 현재`.
    pub fn chip_label(&self) -> String {
        let mut label = month_label(self.month);
        if self.is_current {
            label.push_str(CARD_CURRENT_SUFFIX);
        }
        label
    }

    pub fn target_display(&self) -> &str {
        self.target.as_str().unwrap_or(CARD_NO_TARGET)
    }

    pub fn actual_display(&self) -> &str {
        self.actual.as_str().unwrap_or(CARD_NO_ACTUAL)
    }
}

/// Builds the timeline for `definition`; the first record per month wins.
pub fn build_timeline(
    definition: &IndicatorDefinition,
    records: &[ObservationRecord],
) -> TextualTimeline {
    let entries = months()
        .map(|month| {
            let first = records
                .iter()
                .find(|record| record.uid == definition.uid && record.is_in_month(month));
            match first {
                Some(record) => TimelineEntry {
                    month,
                    target: record.target.as_text(),
                    actual: record.actual.as_text(),
                },
                None => TimelineEntry {
                    month,
                    target: TextValue::Absent,
                    actual: TextValue::Absent,
                },
            }
        })
        .collect();

    TextualTimeline {
        uid: definition.uid.clone(),
        name: definition.name.clone(),
        entries,
    }
}

/// Computes maximal runs of consecutive months whose target is present and
/// equal to the run's first target.
pub fn merged_spans(timeline: &TextualTimeline) -> Vec<TargetSpan> {
    let entries = &timeline.entries;
    let mut spans = Vec::new();
    let mut start = 0;

    while start < entries.len() {
        let head = &entries[start];
        let mut end = start + 1;
        if !head.target.is_absent() {
            while end < entries.len()
                && entries[end].month == entries[end - 1].month + 1
                && entries[end].target == head.target
            {
                end += 1;
            }
        }
        spans.push(TargetSpan {
            start_month: head.month,
            len: (end - start) as u32,
            target: head.target.clone(),
        });
        start = end;
    }

    spans
}

/// Card entries in month order, skipping months with neither target nor
/// actual.
pub fn build_cards(timeline: &TextualTimeline, current_month: u32) -> Vec<TimelineCard> {
    timeline
        .entries
        .iter()
        .filter(|entry| !entry.is_blank())
        .map(|entry| TimelineCard {
            month: entry.month,
            target: entry.target.clone(),
            actual: entry.actual.clone(),
            is_current: entry.month == current_month,
        })
        .collect()
}

/// Table text for a value: the recorded string, or the no-data placeholder.
pub fn display_text(value: &TextValue) -> &str {
    value.as_str().unwrap_or(NO_DATA)
}
