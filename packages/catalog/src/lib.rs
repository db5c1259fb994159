#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Curriculum grid extraction and course catalog normalization.
//!
//! Official curriculum documents publish, per school year, which courses
//! are taught and with which coefficient, as grid tables spread over
//! several pages. Given the grids detected on each page, this crate builds
//! a versioned [`Document`] of per-year courses:
//!
//! 1. [`page`] locates each table's header ([`header`]), classifies its
//!    rows ([`rows`]) and reads codes ([`code`]) and coefficients
//!    ([`coefficient`]).
//! 2. [`aggregate`] merges pages in reading order.
//! 3. [`dedupe`] and [`group`] clean up each year.
//! 4. [`sort`] and [`assemble`] produce the final document.
//!
//! Every heuristic is data in [`rules::ExtractionRules`].

pub mod aggregate;
pub mod assemble;
pub mod code;
pub mod coefficient;
pub mod dedupe;
pub mod group;
pub mod header;
pub mod output;
pub mod page;
pub mod progress;
pub mod rows;
pub mod rules;
pub mod sort;
pub mod text;

use std::path::{Path, PathBuf};

pub use assemble::build_document;
use letzgrade_catalog_models::{Document, GridDocument};
use output::{CoeffStyle, render_document};
use rules::{CompiledRules, parse_rules_toml};

/// Errors that abort a catalog run.
///
/// Table-level problems are not errors at this level: see
/// [`header::TableError`].
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The input file does not exist.
    #[error("Source not found: {}", .path.display())]
    SourceNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// I/O error (file read/write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or rendering failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The rules TOML is malformed.
    #[error("Invalid rules: {0}")]
    Rules(#[from] toml::de::Error),

    /// A configured pattern is not a valid regex.
    #[error("Invalid rule pattern: {0}")]
    Regex(#[from] regex::Error),
}

fn read_existing(path: &Path) -> Result<String, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Reads the table detector's output for one document.
///
/// # Errors
///
/// * [`CatalogError::SourceNotFound`] if `path` does not exist.
/// * [`CatalogError::Io`] or [`CatalogError::Json`] if it cannot be read
///   or parsed.
pub fn load_grid(path: &Path) -> Result<GridDocument, CatalogError> {
    let grid: GridDocument = serde_json::from_str(&read_existing(path)?)?;
    log::debug!("Loaded {} page(s) from {}", grid.pages.len(), path.display());
    Ok(grid)
}

/// Reads and compiles a rules file.
///
/// # Errors
///
/// Returns [`CatalogError`] if the file is missing, malformed, or holds an
/// invalid pattern.
pub fn load_rules(path: &Path) -> Result<CompiledRules, CatalogError> {
    CompiledRules::compile(parse_rules_toml(&read_existing(path)?)?)
}

/// Reads a previously written catalog.
///
/// # Errors
///
/// Returns [`CatalogError`] if the file is missing or not a catalog.
pub fn load_document(path: &Path) -> Result<Document, CatalogError> {
    Ok(serde_json::from_str(&read_existing(path)?)?)
}

/// Writes `document` as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`CatalogError`] if rendering or writing fails.
pub fn write_document(path: &Path, document: &Document, style: CoeffStyle) -> Result<(), CatalogError> {
    std::fs::write(path, render_document(document, style)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_grid_is_source_not_found() {
        let path = Path::new("/nonexistent/letzgrade/grid.json");
        assert!(matches!(
            load_grid(path),
            Err(CatalogError::SourceNotFound { path: p }) if p == path
        ));
    }

    #[test]
    fn round_trips_through_files() {
        let dir = std::env::temp_dir().join(format!("letzgrade_catalog_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let grid_path = dir.join("grid.json");
        std::fs::write(
            &grid_path,
            serde_json::json!({
                "pages": [{
                    "text": "Disciplines Code",
                    "tables": [[
                        ["Disciplines", "Code", "5C"],
                        ["Mathématiques", "MATH", "4 4"],
                        ["Total", null, null]
                    ]]
                }]
            })
            .to_string(),
        )
        .unwrap();

        let grid = load_grid(&grid_path).unwrap();
        let rules = CompiledRules::default_set().unwrap();
        let doc = build_document(&grid, &rules, "2025", "LUX", &progress::null_progress());

        let out_path = dir.join("classes.json");
        write_document(&out_path, &doc, CoeffStyle::Omit).unwrap();
        assert_eq!(load_document(&out_path).unwrap(), doc);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn loads_rules_from_file() {
        let dir = std::env::temp_dir().join(format!("letzgrade_rules_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("rules.toml");
        std::fs::write(&path, rules::DEFAULT_RULES_TOML.replace("SUBJ", "MISC")).unwrap();

        let compiled = load_rules(&path).unwrap();
        assert_eq!(compiled.rules().fallback_code, "MISC");

        std::fs::remove_dir_all(&dir).ok();
    }
}
