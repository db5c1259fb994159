//! Coefficient extraction from a single `(course, year)` grid cell.
//!
//! Grid cells stack the weekly lesson count above the coefficient
//! (`"5\n4"`). A cell with a single number only shows lessons, so the
//! course is taught that year but not weighted.

use std::sync::LazyLock;

use letzgrade_catalog_models::TextCell;
use regex::Regex;

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:[.,]\d+)?").unwrap_or_else(|_| unreachable!()));

/// A numeric token that could not be turned into a coefficient.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoefficientError {
    /// The token looked numeric but is not a representable coefficient.
    #[error("malformed numeric token '{0}'")]
    MalformedNumericToken(String),
}

/// Outcome of reading one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellCoefficient {
    /// The cell is empty: the course is not offered that year and produces
    /// no entry.
    NotOffered,
    /// The course is offered, with or without a coefficient.
    Offered(Option<u32>),
}

/// Reads the coefficient of a cell.
///
/// The last of two or more numeric tokens is the coefficient, rounded half
/// to even. Malformed tokens are logged and treated as no coefficient.
#[must_use]
pub fn extract_coefficient(cell: &TextCell) -> CellCoefficient {
    if cell.is_blank() {
        return CellCoefficient::NotOffered;
    }

    let tokens: Vec<&str> = NUMBER_RE.find_iter(cell.text()).map(|m| m.as_str()).collect();

    let [.., _, last] = tokens.as_slice() else {
        return CellCoefficient::Offered(None);
    };

    match parse_coefficient(last) {
        Ok(coeff) => CellCoefficient::Offered(Some(coeff)),
        Err(e) => {
            log::warn!("Ignoring coefficient in cell {:?}: {e}", cell.text());
            CellCoefficient::Offered(None)
        }
    }
}

/// Parses a numeric token (`.` or `,` decimal separator) and rounds it half
/// to even.
///
/// # Errors
///
/// Returns [`CoefficientError::MalformedNumericToken`] if the token does not
/// parse or does not fit a `u32`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn parse_coefficient(token: &str) -> Result<u32, CoefficientError> {
    let value: f64 = token
        .replace(',', ".")
        .parse()
        .map_err(|_| CoefficientError::MalformedNumericToken(token.to_owned()))?;

    let rounded = value.round_ties_even();
    if !rounded.is_finite() || rounded < 0.0 || rounded > f64::from(u32::MAX) {
        return Err(CoefficientError::MalformedNumericToken(token.to_owned()));
    }

    Ok(rounded as u32)
}
