//! Row classification for the data region of a grid table.

use letzgrade_catalog_models::{GridRow, GridTable};
use strum_macros::{AsRefStr, Display};

use crate::rules::CompiledRules;
use crate::text::normalize_ws;

/// What a grid row below the header represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum RowKind {
    /// The name cell is empty.
    Blank,
    /// A section container such as "Formation générale".
    SectionHeader,
    /// The name is too short to be a course.
    TooShort,
    /// A totals row. Nothing below it belongs to the table.
    Terminator,
    /// A course row.
    Course,
}

impl RowKind {
    /// Whether the row is skipped without ending the table.
    #[must_use]
    pub const fn is_ignorable(self) -> bool {
        matches!(self, Self::Blank | Self::SectionHeader | Self::TooShort)
    }
}

/// Classifies a row from the data region of a table.
#[must_use]
pub fn classify_row(row: &GridRow, rules: &CompiledRules) -> RowKind {
    let Some(first) = row.first().filter(|cell| !cell.is_blank()) else {
        return RowKind::Blank;
    };

    let name = normalize_ws(first.text());

    if name.to_lowercase().starts_with(rules.terminator_prefix()) {
        return RowKind::Terminator;
    }
    if name.chars().count() < rules.rules().min_name_len {
        return RowKind::TooShort;
    }
    if rules.is_section_header(&name) {
        return RowKind::SectionHeader;
    }

    RowKind::Course
}

/// Finds the column-legend row (e.g. `leç. | coeff.`) below the header.
///
/// Scans every row after `header_row` and returns the first whose joined
/// text contains every label marker.
#[must_use]
pub fn find_label_row(table: &GridTable, header_row: usize, rules: &CompiledRules) -> Option<usize> {
    table
        .iter()
        .enumerate()
        .skip(header_row + 1)
        .find(|(_, row)| {
            let joined = row
                .iter()
                .map(|cell| cell.text())
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase();
            rules
                .label_markers()
                .iter()
                .all(|marker| joined.contains(marker.as_str()))
        })
        .map(|(idx, _)| idx)
}

/// Index of the first data row: right after the label row when the table
/// has one, right after the header otherwise.
#[must_use]
pub fn data_start(table: &GridTable, header_row: usize, rules: &CompiledRules) -> usize {
    find_label_row(table, header_row, rules).map_or(header_row + 1, |label| label + 1)
}
