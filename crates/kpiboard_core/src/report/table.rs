//! Structured table model.
//!
//! Tables are rows of cells with explicit row/column span counts, so merge
//! logic stays testable without markup. A renderer walks the model; cells
//! covered by a span are simply omitted from later rows (row spans) or from
//! the same row (column spans).

use crate::model::months;
use crate::report::format::{
    format_amount, month_label, round_display, LABEL_ACTUAL, LABEL_CATEGORY, LABEL_CUMULATIVE,
    LABEL_MONTH, LABEL_TARGET, LABEL_VARIANCE, NO_DATA,
};
use crate::report::numeric::NumericSummary;
use crate::report::textual::{display_text, merged_spans, TextualTimeline};
use serde::{Deserialize, Serialize};

/// Emphasis for a cell value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Neutral,
    /// Above target.
    Positive,
    /// Below target.
    Negative,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    pub text: String,
    pub row_span: u32,
    pub col_span: u32,
    pub tone: Tone,
    /// The cell stands for a missing value (`-`).
    pub placeholder: bool,
}

impl TableCell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            row_span: 1,
            col_span: 1,
            tone: Tone::Neutral,
            placeholder: false,
        }
    }

    pub fn placeholder() -> Self {
        Self {
            placeholder: true,
            ..Self::text(NO_DATA)
        }
    }

    pub fn with_row_span(mut self, rows: u32) -> Self {
        self.row_span = rows.max(1);
        self
    }

    pub fn with_col_span(mut self, columns: u32) -> Self {
        self.col_span = columns.max(1);
        self
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    pub fn is_merged(&self) -> bool {
        self.row_span > 1 || self.col_span > 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
    /// Marks the current-month row.
    pub highlighted: bool,
}

impl TableRow {
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            highlighted: false,
        }
    }

    /// Columns occupied by this row's own cells.
    pub fn width(&self) -> u32 {
        self.cells.iter().map(|cell| cell.col_span).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

/// Column layout used for textual indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextualLayout {
    /// One row per month; merged targets span rows.
    #[default]
    Vertical,
    /// One column per month; merged targets span columns.
    Horizontal,
}

/// `구분 | 1월 .. 12월 | 누적` with target, actual and variance rows.
pub fn numeric_table(summary: &NumericSummary) -> Table {
    let mut columns = vec![LABEL_CATEGORY.to_string()];
    columns.extend(months().map(month_label));
    columns.push(LABEL_CUMULATIVE.to_string());

    let amount_row = |label: &str, values: &[f64], cumulative: f64| {
        let mut cells = vec![TableCell::text(label)];
        cells.extend(values.iter().map(|value| TableCell::text(format_amount(*value))));
        cells.push(TableCell::text(format_amount(cumulative)));
        TableRow::new(cells)
    };

    let mut variance_cells = vec![TableCell::text(LABEL_VARIANCE)];
    variance_cells.extend(summary.variance.iter().map(|value| match value {
        Some(variance) => variance_cell(*variance),
        None => TableCell::placeholder(),
    }));
    variance_cells.push(variance_cell(summary.cumulative_variance));

    Table {
        columns,
        rows: vec![
            amount_row(LABEL_TARGET, &summary.target[..], summary.cumulative_target),
            amount_row(LABEL_ACTUAL, &summary.actual[..], summary.cumulative_actual),
            TableRow::new(variance_cells),
        ],
    }
}

fn variance_cell(variance: f64) -> TableCell {
    let rounded = round_display(variance);
    let tone = match rounded {
        value if value > 0 => Tone::Positive,
        value if value < 0 => Tone::Negative,
        _ => Tone::Neutral,
    };
    TableCell::text(format_amount(variance)).with_tone(tone)
}

/// `월 | 목표 | 실적`, one row per month. The first month of a merged span
/// carries the target cell with `row_span`; the following months omit it.
pub fn textual_vertical_table(timeline: &TextualTimeline, current_month: u32) -> Table {
    let mut rows = Vec::with_capacity(timeline.entries.len());

    for span in merged_spans(timeline) {
        for entry in timeline
            .entries
            .iter()
            .filter(|entry| span.contains(entry.month))
        {
            let mut cells = vec![TableCell::text(month_label(entry.month))];
            if entry.month == span.start_month {
                let target = text_cell(display_text(&span.target), span.target.is_absent());
                cells.push(target.with_row_span(span.len));
            }
            cells.push(text_cell(display_text(&entry.actual), entry.actual.is_absent()));
            rows.push(TableRow {
                cells,
                highlighted: entry.month == current_month,
            });
        }
    }

    Table {
        columns: vec![
            LABEL_MONTH.to_string(),
            LABEL_TARGET.to_string(),
            LABEL_ACTUAL.to_string(),
        ],
        rows,
    }
}

/// `구분 | 1월 .. 12월` with a merged target row and an unmerged actual row.
pub fn textual_horizontal_table(timeline: &TextualTimeline) -> Table {
    let mut columns = vec![LABEL_CATEGORY.to_string()];
    columns.extend(months().map(month_label));

    let mut target_cells = vec![TableCell::text(LABEL_TARGET)];
    target_cells.extend(merged_spans(timeline).into_iter().map(|span| {
        text_cell(display_text(&span.target), span.target.is_absent()).with_col_span(span.len)
    }));

    let mut actual_cells = vec![TableCell::text(LABEL_ACTUAL)];
    actual_cells.extend(
        timeline
            .entries
            .iter()
            .map(|entry| text_cell(display_text(&entry.actual), entry.actual.is_absent())),
    );

    Table {
        columns,
        rows: vec![TableRow::new(target_cells), TableRow::new(actual_cells)],
    }
}

/// Builds the textual table for `layout`.
pub fn textual_table(
    timeline: &TextualTimeline,
    layout: TextualLayout,
    current_month: u32,
) -> Table {
    match layout {
        TextualLayout::Vertical => textual_vertical_table(timeline, current_month),
        TextualLayout::Horizontal => textual_horizontal_table(timeline),
    }
}

fn text_cell(text: &str, absent: bool) -> TableCell {
    if absent {
        TableCell::placeholder()
    } else {
        TableCell::text(text)
    }
}
