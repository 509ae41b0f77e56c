//! HTML fragments for tables, cards and memos.
//!
//! # Invariants
//! - Every piece of feed text is escaped before it reaches markup.
//! - A cell with `row_span`/`col_span > 1` emits the matching attribute;
//!   covered cells are already absent from the model.

use crate::memo::MemoSection;
use crate::report::format::EMPTY_CARDS_MESSAGE;
use crate::report::table::{Table, TableCell, Tone};
use crate::report::textual::TimelineCard;
use std::fmt::Write;

const POSITIVE_COLOR: &str = "blue";
const NEGATIVE_COLOR: &str = "red";

/// Escapes `& < > " '` for element and attribute content.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Escaped text with line breaks turned into `<br>`.
fn multiline(text: &str) -> String {
    escape_html(text).replace('\n', "<br>")
}

pub fn render_table(table: &Table) -> String {
    let mut html = String::from("<table class=\"kpi-table\"><thead><tr>");
    for column in &table.columns {
        let _ = write!(html, "<th>{}</th>", escape_html(column));
    }
    html.push_str("</tr></thead><tbody>");

    for row in &table.rows {
        if row.highlighted {
            html.push_str("<tr class=\"current-month\">");
        } else {
            html.push_str("<tr>");
        }
        for cell in &row.cells {
            render_cell(&mut html, cell);
        }
        html.push_str("</tr>");
    }

    html.push_str("</tbody></table>");
    html
}

fn render_cell(html: &mut String, cell: &TableCell) {
    html.push_str("<td");
    if cell.row_span > 1 {
        let _ = write!(html, " rowspan=\"{}\"", cell.row_span);
    }
    if cell.col_span > 1 {
        let _ = write!(html, " colspan=\"{}\"", cell.col_span);
    }
    if cell.placeholder {
        html.push_str(" class=\"muted\"");
    }
    match cell.tone {
        Tone::Positive => {
            let _ = write!(html, " style=\"color:{POSITIVE_COLOR}\"");
        }
        Tone::Negative => {
            let _ = write!(html, " style=\"color:{NEGATIVE_COLOR}\"");
        }
        Tone::Neutral => {}
    }
    let _ = write!(html, ">{}</td>", multiline(&cell.text));
}

/// Card list, or the empty-state message when no month has a record.
pub fn render_cards(cards: &[TimelineCard]) -> String {
    if cards.is_empty() {
        return format!("<p class=\"muted\">{EMPTY_CARDS_MESSAGE}</p>");
    }

    let mut html = String::from("<div class=\"kpi-cards\">");
    for card in cards {
        let class = if card.is_current {
            "kpi-card current-month"
        } else {
            "kpi-card"
        };
        let _ = write!(
            html,
            "<div class=\"{class}\"><span class=\"chip\">{}</span>\
             <div class=\"target\">{}</div><div class=\"actual\">{}</div></div>",
            escape_html(&card.chip_label()),
            multiline(card.target_display()),
            multiline(card.actual_display()),
        );
    }
    html.push_str("</div>");
    html
}

/// Memo list for one period, or the empty-state message.
pub fn render_memos(section: &MemoSection) -> String {
    if let Some(message) = section.empty_message() {
        return format!("<p class=\"muted\">{message}</p>");
    }

    let mut html = String::from("<ul class=\"kpi-memos\">");
    for entry in &section.entries {
        let _ = write!(
            html,
            "<li><strong>{}</strong><p>{}</p></li>",
            escape_html(&entry.author),
            multiline(&entry.text),
        );
    }
    html.push_str("</ul>");
    html
}
