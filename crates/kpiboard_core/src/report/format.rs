//! Display labels and number formatting shared by tables and cards.

/// Placeholder for a value with no record.
pub const NO_DATA: &str = "-";

pub const LABEL_CATEGORY: &str = "구분";
pub const LABEL_MONTH: &str = "월";
pub const LABEL_TARGET: &str = "목표";
pub const LABEL_ACTUAL: &str = "실적";
pub const LABEL_VARIANCE: &str = "목표比";
pub const LABEL_CUMULATIVE: &str = "누적";

pub const CARD_NO_TARGET: &str = "목표 없음";
pub const CARD_NO_ACTUAL: &str = "실적 없음";
pub const CARD_CURRENT_SUFFIX: &str = " · 현재";

pub const EMPTY_CARDS_MESSAGE: &str = "표시할 데이터가 없습니다.";
pub const EMPTY_MEMOS_MESSAGE: &str = "해당 월의 메모가 없습니다.";

/// `3` -> `3월`.
pub fn month_label(month: u32) -> String {
    format!("{month}{LABEL_MONTH}")
}

/// Rounds half to even (`2.5` -> `2`).
pub fn round_display(value: f64) -> i64 {
    value.round_ties_even() as i64
}

/// Rounds and groups thousands: `-1234.5` -> `-1,234`.
pub fn format_amount(value: f64) -> String {
    format_thousands(round_display(value))
}

pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        grouped.insert(0, '-');
    }
    grouped
}

/// `[연간목표: 1,200톤]`
pub fn yearly_goal_label(yearly_goal: f64, unit: &str) -> String {
    format!("[연간목표: {}{unit}]", format_thousands(yearly_goal.trunc() as i64))
}

/// `[단위: 톤]`
pub fn unit_label(unit: &str) -> String {
    format!("[단위: {unit}]")
}
