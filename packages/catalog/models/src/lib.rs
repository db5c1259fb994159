#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Curriculum grid input types and the normalized course catalog format.
//!
//! The input side ([`GridDocument`], [`GridPage`], [`GridTable`],
//! [`TextCell`]) mirrors what an external table-detection step produces for
//! each page of a curriculum document. The output side ([`Document`],
//! [`YearBlock`], [`Course`]) is the versioned catalog consumed downstream.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single table cell as produced by the table detector.
///
/// Absent, empty and whitespace-only cells all count as "no content".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextCell(Option<String>);

impl TextCell {
    /// Creates a cell holding `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(Some(text.into()))
    }

    /// Creates an absent cell.
    #[must_use]
    pub const fn absent() -> Self {
        Self(None)
    }

    /// Raw text of the cell, if any was detected.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Raw text of the cell, or `""` when absent.
    #[must_use]
    pub fn text(&self) -> &str {
        self.0.as_deref().unwrap_or_default()
    }

    /// Whether the cell carries no visible content.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.as_deref().is_none_or(|s| s.trim().is_empty())
    }
}

impl From<&str> for TextCell {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TextCell {
    fn from(value: String) -> Self {
        Self(Some(value))
    }
}

impl From<Option<String>> for TextCell {
    fn from(value: Option<String>) -> Self {
        Self(value)
    }
}

impl From<Option<&str>> for TextCell {
    fn from(value: Option<&str>) -> Self {
        Self(value.map(str::to_owned))
    }
}

/// One grid row, left to right. Column 0 is the course name, column 1 the
/// optional explicit course code.
pub type GridRow = Vec<TextCell>;

/// A detected table: rows top to bottom.
pub type GridTable = Vec<GridRow>;

/// One page of the source document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPage {
    /// Full extracted text of the page, used as a cheap pre-filter.
    #[serde(default)]
    pub text: String,
    /// Tables detected on the page, in reading order.
    #[serde(default)]
    pub tables: Vec<GridTable>,
}

/// Table-detector output for a whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDocument {
    /// Pages in reading order.
    pub pages: Vec<GridPage>,
}

/// A school year / track label such as `6CL` or `5C`.
///
/// Always stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct YearLabel(String);

impl YearLabel {
    /// Creates a label, normalizing it to uppercase.
    #[must_use]
    pub fn new(label: &str) -> Self {
        Self(label.to_uppercase())
    }

    /// The label text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the leading digit, or `0` when the label does not
    /// start with a digit.
    #[must_use]
    pub fn leading_digit(&self) -> u32 {
        self.0
            .chars()
            .next()
            .and_then(|c| c.to_digit(10))
            .unwrap_or(0)
    }
}

impl fmt::Display for YearLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A course as read from a single table row for a single year, before
/// deduplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCourseEntry {
    /// Explicit or synthesized course code.
    pub code: String,
    /// Whitespace-normalized course name.
    pub name: String,
    /// Coefficient for the year, if the cell carried one.
    pub coeff: Option<u32>,
}

/// A course in the final catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course code, unique within its year.
    pub code: String,
    /// Human-readable course name.
    pub name: String,
    /// Coefficient. `None` when the course is not weighted that year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coeff: Option<u32>,
    /// Grouped child courses. Only set on grouping parents, one level deep.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsubjects: Option<Vec<Self>>,
}

impl From<RawCourseEntry> for Course {
    fn from(entry: RawCourseEntry) -> Self {
        Self {
            code: entry.code,
            name: entry.name,
            coeff: entry.coeff,
            subsubjects: None,
        }
    }
}

/// All courses of one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearBlock {
    /// The year label.
    pub year: YearLabel,
    /// Courses in first-seen order.
    pub courses: Vec<Course>,
}

impl YearBlock {
    /// Looks up a top-level course by code.
    #[must_use]
    pub fn course(&self, code: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.code == code)
    }

    /// Sum of the top-level coefficients. Courses without a coefficient
    /// contribute nothing.
    #[must_use]
    pub fn total_coefficient(&self) -> u64 {
        self.courses
            .iter()
            .filter_map(|c| c.coeff)
            .map(u64::from)
            .sum()
    }
}

/// The versioned curriculum catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Catalog version (e.g. `"2025"`).
    pub version: String,
    /// School system identifier (e.g. `"LUX"`).
    pub system: String,
    /// Year blocks, sorted.
    pub years: Vec<YearBlock>,
}

impl Document {
    /// Looks up a year block by label, case-insensitively.
    #[must_use]
    pub fn year(&self, label: &str) -> Option<&YearBlock> {
        self.years
            .iter()
            .find(|y| y.year.as_str().eq_ignore_ascii_case(label))
    }
}
