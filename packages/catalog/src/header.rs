//! Curriculum header detection.
//!
//! A grid table is only usable once its header row is found: the row that
//! names the discipline and code columns and carries one year label per
//! remaining column (e.g. `Disciplines | Code | 7C | 6CL | 5C`).

use letzgrade_catalog_models::{GridRow, GridTable, YearLabel};

use crate::rules::CompiledRules;

/// Reasons a table contributes nothing. Both are table-local and never
/// abort the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// None of the leading rows carries every header marker.
    #[error("no header row found in the first {scanned} rows")]
    NoHeaderFound {
        /// Number of rows inspected.
        scanned: usize,
    },

    /// The header row was found but no column maps to a year label.
    #[error("header row {header_row} has no year columns")]
    NoYearColumns {
        /// Index of the header row.
        header_row: usize,
    },
}

/// A located header: its row index and the year carried by each column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch {
    /// Index of the header row within the table.
    pub row: usize,
    /// `(column index, year)` pairs, left to right.
    pub year_columns: Vec<(usize, YearLabel)>,
}

/// Finds the header row of `table` and maps its columns to years.
///
/// # Errors
///
/// * [`TableError::NoHeaderFound`] if none of the first
///   `header_scan_rows` rows contains every header marker.
/// * [`TableError::NoYearColumns`] if the header has no year label in any
///   column from `first_year_column` on.
pub fn locate_header(table: &GridTable, rules: &CompiledRules) -> Result<HeaderMatch, TableError> {
    let scan = rules.rules().header_scan_rows;

    let row = table
        .iter()
        .take(scan)
        .position(|row| is_header_row(row, rules))
        .ok_or(TableError::NoHeaderFound {
            scanned: scan.min(table.len()),
        })?;

    let year_columns: Vec<(usize, YearLabel)> = table[row]
        .iter()
        .enumerate()
        .skip(rules.rules().first_year_column)
        .filter(|(_, cell)| !cell.is_blank())
        .filter_map(|(col, cell)| {
            rules
                .year_pattern()
                .find(cell.text())
                .map(|m| (col, YearLabel::new(m.as_str())))
        })
        .collect();

    if year_columns.is_empty() {
        return Err(TableError::NoYearColumns { header_row: row });
    }

    log::debug!(
        "Header at row {row}: {}",
        year_columns
            .iter()
            .map(|(col, year)| format!("{col}->{year}"))
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(HeaderMatch { row, year_columns })
}

/// Every header marker must appear in at least one cell of the row.
fn is_header_row(row: &GridRow, rules: &CompiledRules) -> bool {
    let lowered: Vec<String> = row.iter().map(|c| c.text().to_lowercase()).collect();
    rules
        .header_markers()
        .iter()
        .all(|marker| lowered.iter().any(|cell| cell.contains(marker.as_str())))
}
