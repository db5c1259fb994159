//! Per-year deduplication by course code.

use std::collections::BTreeSet;

use letzgrade_catalog_models::{Course, RawCourseEntry};

/// Keeps the first entry of every code, in order. Later entries with the
/// same code are dropped even when their name or coefficient differs.
#[must_use]
pub fn dedupe_year(entries: Vec<RawCourseEntry>) -> Vec<Course> {
    let mut seen = BTreeSet::new();
    let mut courses = Vec::with_capacity(entries.len());

    for entry in entries {
        if seen.contains(&entry.code) {
            log::trace!("Dropping repeated code {} ({})", entry.code, entry.name);
            continue;
        }
        seen.insert(entry.code.clone());
        courses.push(Course::from(entry));
    }

    courses
}
