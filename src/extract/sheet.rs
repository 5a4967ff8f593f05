use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use super::TextExtractor;
use crate::error::{ProcessError, Result};

/// Spreadsheet (.xlsx) extraction: loads the first sheet and renders it as an
/// aligned text table with the header row and a numeric row index, the way a
/// default tabular-to-string rendering prints a data frame.
pub struct SheetExtractor;

impl TextExtractor for SheetExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let mut workbook =
            open_workbook_auto(path).map_err(|e| ProcessError::parse("xlsx", e))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ProcessError::parse("xlsx", anyhow::anyhow!("workbook has no sheets")))?
            .map_err(|e| ProcessError::parse("xlsx", e))?;

        let mut rows = range.rows().map(|row| {
            row.iter().map(cell_to_string).collect::<Vec<_>>()
        });
        let headers = match rows.next() {
            Some(headers) => headers,
            None => return Ok(String::new()),
        };
        let data: Vec<Vec<String>> = rows.collect();

        Ok(render_table(&headers, &data))
    }
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Error(e) => format!("#ERR:{e:?}"),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Right-aligned columns separated by two spaces, with a row-index column.
fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let index_width = if rows.is_empty() {
        0
    } else {
        (rows.len() - 1).to_string().len()
    };

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i >= widths.len() {
                widths.push(0);
            }
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&" ".repeat(index_width));
    for (header, &width) in headers.iter().zip(&widths) {
        out.push_str("  ");
        out.push_str(&format!("{header:>width$}"));
    }
    for (index, row) in rows.iter().enumerate() {
        out.push('\n');
        out.push_str(&format!("{index:>index_width$}"));
        for (cell, &width) in row.iter().zip(&widths) {
            out.push_str("  ");
            out.push_str(&format!("{cell:>width$}"));
        }
    }
    out
}
