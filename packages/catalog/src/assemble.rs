//! Document assembly: the last stage of the pipeline, plus the end-to-end
//! [`build_document`] entry point.

use std::sync::Arc;

use letzgrade_catalog_models::{Document, GridDocument, YearBlock};

use crate::aggregate::aggregate_pages;
use crate::dedupe::dedupe_year;
use crate::group::group_year;
use crate::progress::ProgressCallback;
use crate::rules::CompiledRules;
use crate::sort::sort_years;

/// Wraps already sorted and grouped year blocks into a [`Document`].
#[must_use]
pub fn assemble_document(version: &str, system: &str, years: Vec<YearBlock>) -> Document {
    Document {
        version: version.to_owned(),
        system: system.to_owned(),
        years,
    }
}

/// Runs the whole pipeline over a detected grid: per-page extraction,
/// aggregation, deduplication, grouping, year sorting and assembly.
#[must_use]
pub fn build_document(
    grid: &GridDocument,
    rules: &CompiledRules,
    version: &str,
    system: &str,
    progress: &Arc<dyn ProgressCallback>,
) -> Document {
    let aggregated = aggregate_pages(&grid.pages, rules, progress);

    let mut years: Vec<YearBlock> = aggregated
        .into_iter()
        .map(|(year, entries)| YearBlock {
            courses: group_year(dedupe_year(entries), rules.groups()),
            year,
        })
        .collect();

    sort_years(&mut years);

    log::info!(
        "Built catalog {system} {version}: {} year block(s), {} course(s)",
        years.len(),
        years.iter().map(|y| y.courses.len()).sum::<usize>()
    );

    assemble_document(version, system, years)
}
