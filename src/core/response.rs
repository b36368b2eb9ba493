//! Terminal table rendering for menu output
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 1.0.0: Extracted from the per-report formatting in the menu handlers

/// Widest a single cell may render before it is truncated
pub const CELL_LIMIT: usize = 32;

/// Render an optional joined value, blank when the join missed
pub fn blank_or<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Truncate a cell to `CELL_LIMIT` characters, adding ellipsis if needed
///
/// Counts characters rather than bytes so multi-byte names never split.
pub fn truncate_cell(text: &str) -> String {
    if text.chars().count() <= CELL_LIMIT {
        text.to_string()
    } else {
        let kept: String = text.chars().take(CELL_LIMIT - 3).collect();
        format!("{kept}...")
    }
}

/// Render rows as a left-aligned, space-padded table with a header rule
///
/// Rows shorter than the header are padded with blank cells.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            (0..headers.len())
                .map(|i| truncate_cell(row.get(i).map(String::as_str).unwrap_or("")))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&format_line(
        &headers.iter().map(|h| h.to_string()).collect::<Vec<_>>(),
        &widths,
    ));
    out.push_str(&format_line(
        &widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>(),
        &widths,
    ));
    for row in &cells {
        out.push_str(&format_line(row, &widths));
    }
    out
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    format!("{}\n", padded.join("  ").trim_end())
}
