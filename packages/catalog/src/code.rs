//! Course code resolution.
//!
//! Grids usually print an explicit code next to each course name. When the
//! code cell is empty, a short code is derived from the name. Derived codes
//! must be stable: the same course recurs on several pages without a code
//! and deduplication relies on it mapping to the same value every time.

use letzgrade_catalog_models::TextCell;

use crate::rules::CompiledRules;
use crate::text::{normalize_ws, strip_diacritics};

/// Length of a synthesized code before the hard cap.
const CODE_LEN: usize = 5;

/// Synthesized codes never exceed this length.
const MAX_CODE_LEN: usize = 6;

/// Returns the explicit code from `code_cell`, or a code synthesized from
/// `name` when the cell is missing or blank.
#[must_use]
pub fn resolve_code(code_cell: Option<&TextCell>, name: &str, rules: &CompiledRules) -> String {
    let explicit = code_cell.map(|cell| normalize_ws(cell.text())).unwrap_or_default();
    if explicit.is_empty() {
        synthesize_code(name, rules)
    } else {
        explicit
    }
}

/// Derives a five-letter code from a course name.
///
/// Diacritics are stripped, the name is uppercased, everything but `A-Z`
/// splits words, stop words are dropped, and each remaining word
/// contributes its first 3 letters (words of up to 4 letters) or first 4
/// letters. The result is cut or `X`-padded to five characters.
#[must_use]
pub fn synthesize_code(name: &str, rules: &CompiledRules) -> String {
    let ascii: String = strip_diacritics(name)
        .to_uppercase()
        .chars()
        .map(|c| if c.is_ascii_uppercase() { c } else { ' ' })
        .collect();

    let mut raw: String = ascii
        .split_whitespace()
        .filter(|word| !rules.is_stop_word(word))
        .map(|word| {
            let take = if word.len() <= 4 { 3 } else { 4 };
            &word[..take.min(word.len())]
        })
        .collect();

    if raw.is_empty() {
        raw.clone_from(&rules.rules().fallback_code);
    }

    let mut code: String = raw.chars().take(CODE_LEN).collect();
    let len = code.chars().count();
    code.extend(std::iter::repeat_n('X', CODE_LEN.saturating_sub(len)));

    code.chars().take(MAX_CODE_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> CompiledRules {
        CompiledRules::default_set().unwrap()
    }

    #[test]
    fn explicit_code_wins() {
        let cell = TextCell::new(" MATH\n");
        assert_eq!(resolve_code(Some(&cell), "Mathématiques", &rules()), "MATH");
    }

    #[test]
    fn blank_or_missing_code_is_synthesized() {
        let rules = rules();
        assert_eq!(resolve_code(Some(&TextCell::absent()), "Mathématiques", &rules), "MATHX");
        assert_eq!(resolve_code(Some(&TextCell::new("  ")), "Mathématiques", &rules), "MATHX");
        assert_eq!(resolve_code(None, "Mathématiques", &rules), "MATHX");
    }

    #[test]
    fn synthesizes_from_french_names() {
        let rules = rules();
        assert_eq!(synthesize_code("Éducation artistique", &rules), "EDUCA");
        assert_eq!(synthesize_code("Langue et littérature françaises", &rules), "LANGL");
        assert_eq!(synthesize_code("Vie et société", &rules), "VIESO");
        assert_eq!(synthesize_code("L'histoire", &rules), "HISTX");
        assert_eq!(synthesize_code("Arts", &rules), "ARTXX");
    }

    #[test]
    fn falls_back_when_nothing_is_left() {
        let rules = rules();
        assert_eq!(synthesize_code("123", &rules), "SUBJX");
        assert_eq!(synthesize_code("de la", &rules), "SUBJX");
    }

    #[test]
    fn synthesis_is_deterministic() {
        let rules = rules();
        let name = "Sciences économiques et sociales";
        assert_eq!(synthesize_code(name, &rules), synthesize_code(name, &rules));
        assert_eq!(synthesize_code(name, &rules).len(), 5);
    }
}
