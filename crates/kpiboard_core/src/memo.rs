//! Memo selector.
//!
//! Picks the memos of one reporting period for one division. Division labels
//! in the memo sheet are free text, so the division is matched by a
//! case-sensitive substring token rather than by equality.

use crate::model::memo::MemoEntry;
use crate::report::format::EMPTY_MEMOS_MESSAGE;
use serde::{Deserialize, Serialize};

/// Returns entries with exactly `year` and `month` whose division contains
/// `division_token`, in feed order.
pub fn select_memos<'a>(
    entries: &'a [MemoEntry],
    year: i32,
    month: u32,
    division_token: &str,
) -> Vec<&'a MemoEntry> {
    entries
        .iter()
        .filter(|entry| {
            entry.year == year && entry.month == month && entry.division.contains(division_token)
        })
        .collect()
}

/// Memo block of a division page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoSection {
    pub year: i32,
    pub month: u32,
    pub entries: Vec<MemoEntry>,
}

impl MemoSection {
    pub fn new(year: i32, month: u32, entries: Vec<MemoEntry>) -> Self {
        Self {
            year,
            month,
            entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Message to show instead of the list when nothing matched.
    pub fn empty_message(&self) -> Option<&'static str> {
        self.is_empty().then_some(EMPTY_MEMOS_MESSAGE)
    }
}
