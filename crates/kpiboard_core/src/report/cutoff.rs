//! Month cutoff policies for cumulative totals.

use serde::{Deserialize, Serialize};

/// Rule deciding which months count toward cumulative totals and which
/// months show a variance.
///
/// `current_month` is the month of the request date; "closed" months are the
/// ones strictly before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutoffPolicy {
    /// Only closed months cumulate; open months have no variance.
    #[default]
    TrailingCutoff,
    /// Only closed months cumulate; every month shows its variance.
    CumulativeCutoff,
    /// All twelve months cumulate and show variance, regardless of date.
    /// Used when forecasts are entered for future months.
    FullYear,
}

impl CutoffPolicy {
    /// Whether `month` contributes to the cumulative column.
    pub fn includes_in_cumulative(self, month: u32, current_month: u32) -> bool {
        match self {
            Self::TrailingCutoff | Self::CumulativeCutoff => month < current_month,
            Self::FullYear => true,
        }
    }

    /// Whether `month` shows a variance value.
    pub fn shows_variance(self, month: u32, current_month: u32) -> bool {
        match self {
            Self::TrailingCutoff => month < current_month,
            Self::CumulativeCutoff | Self::FullYear => true,
        }
    }
}
