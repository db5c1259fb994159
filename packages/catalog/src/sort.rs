//! Year ordering for the final catalog.

use std::cmp::{Ordering, Reverse};

use letzgrade_catalog_models::{YearBlock, YearLabel};

/// Orders years from the highest leading digit down, ties broken by the
/// full label. Labels without a leading digit sort last.
#[must_use]
pub fn year_order(a: &YearLabel, b: &YearLabel) -> Ordering {
    (Reverse(a.leading_digit()), a.as_str()).cmp(&(Reverse(b.leading_digit()), b.as_str()))
}

/// Sorts year blocks with [`year_order`].
pub fn sort_years(years: &mut [YearBlock]) {
    years.sort_by(|a, b| year_order(&a.year, &b.year));
}
