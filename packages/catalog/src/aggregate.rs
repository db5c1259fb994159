//! Cross-page aggregation of raw course entries.

use std::collections::BTreeMap;
use std::sync::Arc;

use letzgrade_catalog_models::{GridPage, RawCourseEntry, YearLabel};

use crate::page::extract_page;
use crate::progress::ProgressCallback;
use crate::rules::CompiledRules;

/// Raw course entries keyed by year, each list in production order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearMap {
    years: BTreeMap<YearLabel, Vec<RawCourseEntry>>,
}

impl YearMap {
    /// Appends an entry to `year`.
    pub fn push(&mut self, year: YearLabel, entry: RawCourseEntry) {
        self.years.entry(year).or_default().push(entry);
    }

    /// Appends every entry of `other` after the entries already held for
    /// the same year.
    pub fn merge(&mut self, other: Self) {
        for (year, entries) in other.years {
            self.years.entry(year).or_default().extend(entries);
        }
    }

    /// Entries for `year`, if any were produced.
    #[must_use]
    pub fn get(&self, year: &YearLabel) -> Option<&[RawCourseEntry]> {
        self.years.get(year).map(Vec::as_slice)
    }

    /// Number of distinct years.
    #[must_use]
    pub fn len(&self) -> usize {
        self.years.len()
    }

    /// Whether no entry was produced at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Total number of entries across all years.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.years.values().map(Vec::len).sum()
    }
}

impl IntoIterator for YearMap {
    type Item = (YearLabel, Vec<RawCourseEntry>);
    type IntoIter = std::collections::btree_map::IntoIter<YearLabel, Vec<RawCourseEntry>>;

    fn into_iter(self) -> Self::IntoIter {
        self.years.into_iter()
    }
}

/// Extracts every page in reading order and merges the results.
#[must_use]
pub fn aggregate_pages(
    pages: &[GridPage],
    rules: &CompiledRules,
    progress: &Arc<dyn ProgressCallback>,
) -> YearMap {
    progress.set_total(pages.len() as u64);

    let mut aggregated = YearMap::default();

    for (idx, page) in pages.iter().enumerate() {
        progress.set_message(format!("page {}/{}", idx + 1, pages.len()));

        let page_map = extract_page(page, rules);
        log::debug!(
            "Page {}: {} entries across {} year(s)",
            idx + 1,
            page_map.entry_count(),
            page_map.len()
        );
        aggregated.merge(page_map);

        progress.inc(1);
    }

    progress.finish(format!(
        "{} pages -- {} entries",
        pages.len(),
        aggregated.entry_count()
    ));

    aggregated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(code: &str) -> RawCourseEntry {
        RawCourseEntry {
            code: code.to_string(),
            name: code.to_string(),
            coeff: None,
        }
    }

    #[test]
    fn merge_appends_in_order() {
        let year = YearLabel::new("5C");
        let mut first = YearMap::default();
        first.push(year.clone(), entry("MATH"));
        let mut second = YearMap::default();
        second.push(year.clone(), entry("FRANC"));
        second.push(YearLabel::new("4C"), entry("PHYSI"));

        first.merge(second);

        let codes: Vec<&str> = first
            .get(&year)
            .unwrap()
            .iter()
            .map(|e| e.code.as_str())
            .collect();
        assert_eq!(codes, vec!["MATH", "FRANC"]);
        assert_eq!(first.len(), 2);
        assert_eq!(first.entry_count(), 3);
    }
}
