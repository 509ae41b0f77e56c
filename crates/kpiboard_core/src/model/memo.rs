//! Monthly free-text memo entries.

use serde::{Deserialize, Serialize};

/// One memo row from the memo feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoEntry {
    pub year: i32,
    pub month: u32,
    /// Free-text division label; matched by substring.
    pub division: String,
    /// Empty when the author cell was missing.
    pub author: String,
    /// Memo body. Line breaks and repeated spaces are preserved as-is.
    pub text: String,
}

impl MemoEntry {
    pub fn new(
        year: i32,
        month: u32,
        division: impl Into<String>,
        author: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            year,
            month,
            division: division.into(),
            author: author.into(),
            text: text.into(),
        }
    }
}
