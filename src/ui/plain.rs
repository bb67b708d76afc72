//! Plain-text table for non-interactive runs: same column model as the TUI,
//! image columns print their URI since nothing defers loading on stdout.

use crate::models::country::Country;
use crate::ui::columns::{Cell, COLUMNS};

pub fn render_plain_table(countries: &[Country]) -> String {
    let mut widths: Vec<usize> = COLUMNS.iter().map(|c| c.header.len()).collect();
    let rows: Vec<Vec<String>> = countries
        .iter()
        .map(|country| {
            COLUMNS
                .iter()
                .enumerate()
                .map(|(i, col)| {
                    let value = match &col.cell {
                        Cell::Text(accessor) => accessor(country),
                        Cell::Image(accessor) => accessor(country).to_string(),
                    };
                    widths[i] = widths[i].max(value.chars().count());
                    value
                })
                .collect()
        })
        .collect();

    let mut out = String::new();
    let header: Vec<String> = COLUMNS
        .iter()
        .enumerate()
        .map(|(i, col)| pad(col.header, widths[i]))
        .collect();
    out.push_str(&header.join("  "));
    out.push('\n');

    for row in rows {
        let padded: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, value)| pad(value, widths[i]))
            .collect();
        out.push_str(padded.join("  ").trim_end());
        out.push('\n');
    }

    out
}

fn pad(value: &str, width: usize) -> String {
    let len = value.chars().count();
    let mut padded = value.to_string();
    padded.extend(std::iter::repeat(' ').take(width.saturating_sub(len)));
    padded
}
