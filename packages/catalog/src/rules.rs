//! Config-driven extraction rules.
//!
//! [`ExtractionRules`] captures every heuristic the extractor relies on
//! (header markers, the year-label pattern, section headers, code stop
//! words, subject grouping) in a serializable config struct so that a new
//! curriculum layout only needs a new TOML file.
//!
//! The default Luxembourg rule set is baked into the binary at compile
//! time via [`include_str!`].

use std::collections::BTreeSet;

use regex::{Regex, RegexBuilder};
use serde::Deserialize;

use crate::CatalogError;

/// Default rule set, embedded at compile time.
pub const DEFAULT_RULES_TOML: &str = include_str!("../rules/luxembourg.toml");

/// All heuristics used to turn a curriculum grid into a catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionRules {
    /// Unique identifier (e.g., `"lux_secondary"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Substrings a page's text must all contain (case-sensitive) before its
    /// tables are inspected.
    pub page_markers: Vec<String>,
    /// Substrings the header row must all contain (case-insensitive, each
    /// in any cell).
    pub header_markers: Vec<String>,
    /// How many leading rows of a table may hold the header.
    #[serde(default = "default_header_scan_rows")]
    pub header_scan_rows: usize,
    /// First column that may carry a year label. Columns before it hold the
    /// course name and code.
    #[serde(default = "default_first_year_column")]
    pub first_year_column: usize,
    /// Substrings identifying the column-legend row under the header.
    pub label_markers: Vec<String>,
    /// Lowercase prefix of the row that closes a table.
    pub terminator_prefix: String,
    /// Course names shorter than this (in characters) are skipped.
    #[serde(default)]
    pub min_name_len: usize,
    /// Pattern matching a year label inside a header cell. Matched
    /// case-insensitively.
    pub year_pattern: String,
    /// Patterns for rows that are section containers rather than courses.
    /// Matched case-insensitively against the normalized first cell.
    #[serde(default)]
    pub section_headers: Vec<String>,
    /// Words ignored when synthesizing a course code.
    #[serde(default)]
    pub stop_words: Vec<String>,
    /// Code used when a synthesized code would be empty.
    pub fallback_code: String,
    /// Parent/child subject groupings, applied in order.
    #[serde(default)]
    pub groups: Vec<GroupRule>,
}

const fn default_header_scan_rows() -> usize {
    4
}

const fn default_first_year_column() -> usize {
    2
}

/// Nests `children` under `parent` wherever both appear in a year.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GroupRule {
    /// Parent course code.
    pub parent: String,
    /// Display name replacing the parent's extracted name.
    #[serde(default)]
    pub name: Option<String>,
    /// Child course codes.
    pub children: Vec<String>,
}

impl GroupRule {
    /// Whether `code` is one of this group's children.
    #[must_use]
    pub fn has_child(&self, code: &str) -> bool {
        code != self.parent && self.children.iter().any(|c| c == code)
    }
}

/// Parses rules from a TOML string.
///
/// # Errors
///
/// Returns [`CatalogError::Rules`] if the TOML is malformed or misses a
/// required field.
pub fn parse_rules_toml(toml_str: &str) -> Result<ExtractionRules, CatalogError> {
    Ok(toml::de::from_str(toml_str)?)
}

/// Returns the embedded default rule set.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed (covered by tests since the
/// file is embedded).
#[must_use]
pub fn default_rules() -> ExtractionRules {
    parse_rules_toml(DEFAULT_RULES_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse luxembourg.toml: {e}"))
}

/// [`ExtractionRules`] with every pattern compiled and every marker
/// case-folded, ready to be threaded through the pipeline.
#[derive(Debug, Clone)]
pub struct CompiledRules {
    rules: ExtractionRules,
    header_markers: Vec<String>,
    label_markers: Vec<String>,
    terminator_prefix: String,
    year_re: Regex,
    section_re: Option<Regex>,
    stop_words: BTreeSet<String>,
}

impl CompiledRules {
    /// Compiles `rules`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Regex`] if the year pattern or a section
    /// header pattern is not a valid regex.
    pub fn compile(rules: ExtractionRules) -> Result<Self, CatalogError> {
        let year_re = RegexBuilder::new(&rules.year_pattern)
            .case_insensitive(true)
            .build()?;

        let section_re = if rules.section_headers.is_empty() {
            None
        } else {
            let joined = rules
                .section_headers
                .iter()
                .map(|p| format!("(?:{p})"))
                .collect::<Vec<_>>()
                .join("|");
            Some(RegexBuilder::new(&joined).case_insensitive(true).build()?)
        };

        let lower = |items: &[String]| -> Vec<String> {
            items.iter().map(|m| m.to_lowercase()).collect()
        };

        Ok(Self {
            header_markers: lower(&rules.header_markers),
            label_markers: lower(&rules.label_markers),
            terminator_prefix: rules.terminator_prefix.to_lowercase(),
            stop_words: rules.stop_words.iter().map(|w| w.to_uppercase()).collect(),
            year_re,
            section_re,
            rules,
        })
    }

    /// Compiles the embedded default rule set.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Regex`] if an embedded pattern is invalid.
    pub fn default_set() -> Result<Self, CatalogError> {
        Self::compile(default_rules())
    }

    /// The source rules.
    #[must_use]
    pub const fn rules(&self) -> &ExtractionRules {
        &self.rules
    }

    /// Lowercased header markers.
    #[must_use]
    pub fn header_markers(&self) -> &[String] {
        &self.header_markers
    }

    /// Lowercased label-row markers.
    #[must_use]
    pub fn label_markers(&self) -> &[String] {
        &self.label_markers
    }

    /// Lowercased terminator prefix.
    #[must_use]
    pub fn terminator_prefix(&self) -> &str {
        &self.terminator_prefix
    }

    /// Compiled year-label pattern.
    #[must_use]
    pub const fn year_pattern(&self) -> &Regex {
        &self.year_re
    }

    /// Whether `name` is a section container row.
    #[must_use]
    pub fn is_section_header(&self, name: &str) -> bool {
        self.section_re.as_ref().is_some_and(|re| re.is_match(name))
    }

    /// Whether `word` (uppercase) is dropped from synthesized codes.
    #[must_use]
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Subject groupings, in application order.
    #[must_use]
    pub fn groups(&self) -> &[GroupRule] {
        &self.rules.groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_rules() {
        let rules = default_rules();
        assert_eq!(rules.id, "lux_secondary");
        assert_eq!(rules.header_scan_rows, 4);
        assert_eq!(rules.first_year_column, 2);
        assert_eq!(rules.groups.len(), 3);
        assert_eq!(rules.fallback_code, "SUBJ");
    }

    #[test]
    fn group_parents_are_unique() {
        let rules = default_rules();
        let mut parents: Vec<&str> = rules.groups.iter().map(|g| g.parent.as_str()).collect();
        parents.sort_unstable();
        parents.dedup();
        assert_eq!(parents.len(), rules.groups.len());
    }

    #[test]
    fn compiles_default_rules() {
        let compiled = CompiledRules::default_set().unwrap();
        assert!(compiled.is_section_header("Formation générale"));
        assert!(compiled.is_section_header("FORMATION GENERALE"));
        assert!(compiled.is_section_header("Cours à options"));
        assert!(compiled.is_section_header("Cours option"));
        assert!(compiled.is_section_header("Groupe d'options A"));
        assert!(compiled.is_section_header("Ateliers"));
        assert!(!compiled.is_section_header("Formation générale et civique"));
        assert!(!compiled.is_section_header("Mathématiques"));
        assert!(compiled.is_stop_word("DES"));
        assert!(!compiled.is_stop_word("MATH"));
    }

    #[test]
    fn year_pattern_is_case_insensitive() {
        let compiled = CompiledRules::default_set().unwrap();
        let re = compiled.year_pattern();
        assert_eq!(re.find("classe 6cl").map(|m| m.as_str()), Some("6cl"));
        assert!(re.find("8C").is_none());
        assert!(re.find("6CLASS").is_none());
    }

    #[test]
    fn rejects_invalid_pattern() {
        let mut rules = default_rules();
        rules.year_pattern = "([1-7".to_string();
        assert!(matches!(
            CompiledRules::compile(rules),
            Err(CatalogError::Regex(_))
        ));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            parse_rules_toml("id = 3"),
            Err(CatalogError::Rules(_))
        ));
    }

    #[test]
    fn group_never_lists_its_parent_as_child() {
        let group = GroupRule {
            parent: "EDART".to_string(),
            name: None,
            children: vec!["EDART".to_string(), "DESSI".to_string()],
        };
        assert!(!group.has_child("EDART"));
        assert!(group.has_child("DESSI"));
    }
}
