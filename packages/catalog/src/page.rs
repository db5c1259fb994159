//! Per-page extraction.
//!
//! Walks every table of a page: locates the header, skips the legend row,
//! classifies each data row and emits one [`RawCourseEntry`] per course and
//! year in which the course is offered.

use letzgrade_catalog_models::{GridPage, GridTable, RawCourseEntry};

use crate::aggregate::YearMap;
use crate::code::resolve_code;
use crate::coefficient::{CellCoefficient, extract_coefficient};
use crate::header::{TableError, locate_header};
use crate::rows::{RowKind, classify_row, data_start};
use crate::rules::CompiledRules;
use crate::text::normalize_ws;

/// Extracts every table of `page`.
///
/// Pages whose text lacks any page marker yield nothing. Tables that fail
/// header detection are skipped.
#[must_use]
pub fn extract_page(page: &GridPage, rules: &CompiledRules) -> YearMap {
    let mut years = YearMap::default();

    if !rules
        .rules()
        .page_markers
        .iter()
        .all(|marker| page.text.contains(marker.as_str()))
    {
        return years;
    }

    for (idx, table) in page.tables.iter().enumerate() {
        match extract_table(table, rules) {
            Ok(table_years) => years.merge(table_years),
            Err(e) => log::debug!("Skipping table {idx}: {e}"),
        }
    }

    years
}

/// Extracts a single table.
///
/// # Errors
///
/// Returns a [`TableError`] if the table has no usable header. The caller
/// skips such tables.
pub fn extract_table(table: &GridTable, rules: &CompiledRules) -> Result<YearMap, TableError> {
    let header = locate_header(table, rules)?;
    let start = data_start(table, header.row, rules);

    let mut years = YearMap::default();

    for (idx, row) in table.iter().enumerate().skip(start) {
        match classify_row(row, rules) {
            RowKind::Course => {}
            RowKind::Terminator => {
                log::trace!("Row {idx}: terminator, {} rows left", table.len() - idx - 1);
                break;
            }
            kind => {
                log::trace!("Row {idx}: skipping {}", kind.as_ref());
                continue;
            }
        }

        let name = normalize_ws(row[0].text());
        let code = resolve_code(row.get(1), &name, rules);

        for (col, year) in &header.year_columns {
            let Some(cell) = row.get(*col) else {
                continue;
            };
            if let CellCoefficient::Offered(coeff) = extract_coefficient(cell) {
                years.push(
                    year.clone(),
                    RawCourseEntry {
                        code: code.clone(),
                        name: name.clone(),
                        coeff,
                    },
                );
            }
        }
    }

    Ok(years)
}
