// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Rendering of extracted records

use serde::Serialize;

use crate::config::{OutputConfig, OutputFormat};
use crate::error::Result;
use crate::inline::Inline;

/// One reported record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRow<'a> {
    pub content: &'a str,
    pub hash: &'a str,
    pub directive: &'static str,
    pub line: Option<u32>,
    pub position: Option<u32>,
}

impl<'a> OutputRow<'a> {
    /// Build the row for `inline` under `config`
    pub fn new(inline: &'a Inline, config: &OutputConfig) -> Self {
        Self {
            content: if config.full {
                inline.content()
            } else {
                inline.short_content()
            },
            hash: inline.hash(config.algorithm),
            directive: inline.directive().as_str(),
            line: inline.line(),
            position: inline.column(),
        }
    }
}

/// Render `inlines` in the configured format
pub fn render(inlines: &[Inline], config: &OutputConfig) -> Result<String> {
    let rows: Vec<OutputRow<'_>> = inlines.iter().map(|i| OutputRow::new(i, config)).collect();

    match config.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&rows)?),
        OutputFormat::Table => Ok(render_table(&rows)),
        OutputFormat::Plain => Ok(render_plain(&rows)),
    }
}

fn position_cell(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Keep every record on a single row
fn escape_cell(content: &str) -> String {
    content
        .replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

fn render_table(rows: &[OutputRow<'_>]) -> String {
    const HEADERS: [&str; 5] = ["LINE", "POS", "DIRECTIVE", "HASH", "CONTENT"];

    let cells: Vec<[String; 5]> = rows
        .iter()
        .map(|row| {
            [
                position_cell(row.line),
                position_cell(row.position),
                row.directive.to_string(),
                row.hash.to_string(),
                escape_cell(row.content),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |row: [&str; 5]| -> String {
        let mut line = String::new();
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                line.push_str("  ");
            }
            if i == row.len() - 1 {
                line.push_str(cell);
            } else {
                let pad = widths[i].saturating_sub(cell.chars().count());
                line.push_str(cell);
                line.push_str(&" ".repeat(pad));
            }
        }
        line.push('\n');
        line
    };

    let mut out = format_row(HEADERS);
    for row in &cells {
        out.push_str(&format_row([
            row[0].as_str(),
            row[1].as_str(),
            row[2].as_str(),
            row[3].as_str(),
            row[4].as_str(),
        ]));
    }
    out
}

fn render_plain(rows: &[OutputRow<'_>]) -> String {
    rows.iter()
        .map(|row| {
            format!(
                "{} {} {}:{}\n",
                row.hash,
                row.directive,
                position_cell(row.line),
                position_cell(row.position)
            )
        })
        .collect()
}
