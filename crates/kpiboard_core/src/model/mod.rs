//! Domain model for KPI definitions, monthly observations and memos.
//!
//! # Responsibility
//! - Define the typed records the report engine works on.
//! - Keep raw sheet rows (`RawRow`) separate from validated records.
//!
//! # Invariants
//! - Every record is request-scoped and immutable once normalized.
//! - Months are always in `1..=12` when present.

pub mod indicator;
pub mod memo;
pub mod observation;
pub mod row;

/// Number of months in one reporting year.
pub const MONTHS_PER_YEAR: usize = 12;

/// Iterates reporting months `1..=12` in order.
pub fn months() -> impl Iterator<Item = u32> {
    1..=MONTHS_PER_YEAR as u32
}
