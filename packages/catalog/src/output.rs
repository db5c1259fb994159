//! JSON rendering of the catalog.
//!
//! Absent coefficients are omitted by default. Consumers that expect the
//! key on every course can ask for an explicit `null` instead.

use letzgrade_catalog_models::{Course, Document, YearBlock};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use strum_macros::{AsRefStr, Display, EnumString};

/// How an absent coefficient is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum CoeffStyle {
    /// Leave the `coeff` key out.
    #[default]
    Omit,
    /// Write `"coeff": null`.
    Null,
}

struct Styled<'a, T> {
    value: &'a T,
    style: CoeffStyle,
}

impl<'a, T> Styled<'a, T> {
    const fn new(value: &'a T, style: CoeffStyle) -> Self {
        Self { value, style }
    }
}

fn styled_all<T>(values: &[T], style: CoeffStyle) -> Vec<Styled<'_, T>> {
    values.iter().map(|v| Styled::new(v, style)).collect()
}

impl Serialize for Styled<'_, Document> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Document", 3)?;
        state.serialize_field("version", &self.value.version)?;
        state.serialize_field("system", &self.value.system)?;
        state.serialize_field("years", &styled_all(&self.value.years, self.style))?;
        state.end()
    }
}

impl Serialize for Styled<'_, YearBlock> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("YearBlock", 2)?;
        state.serialize_field("year", &self.value.year)?;
        state.serialize_field("courses", &styled_all(&self.value.courses, self.style))?;
        state.end()
    }
}

impl Serialize for Styled<'_, Course> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let course = self.value;
        let write_coeff = course.coeff.is_some() || self.style == CoeffStyle::Null;
        let len = 2 + usize::from(write_coeff) + usize::from(course.subsubjects.is_some());

        let mut state = serializer.serialize_struct("Course", len)?;
        state.serialize_field("code", &course.code)?;
        state.serialize_field("name", &course.name)?;
        if write_coeff {
            state.serialize_field("coeff", &course.coeff)?;
        } else {
            state.skip_field("coeff")?;
        }
        if let Some(subs) = &course.subsubjects {
            state.serialize_field("subsubjects", &styled_all(subs, self.style))?;
        } else {
            state.skip_field("subsubjects")?;
        }
        state.end()
    }
}

/// Renders `document` as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`serde_json::Error`] if serialization fails.
pub fn render_document(document: &Document, style: CoeffStyle) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Styled::new(document, style))
}

#[cfg(test)]
mod tests {
    use letzgrade_catalog_models::YearLabel;

    use super::*;

    fn document() -> Document {
        Document {
            version: "2025".to_string(),
            system: "LUX".to_string(),
            years: vec![YearBlock {
                year: YearLabel::new("7C"),
                courses: vec![
                    Course {
                        code: "EDART".to_string(),
                        name: "Éducation artistique".to_string(),
                        coeff: Some(2),
                        subsubjects: Some(vec![Course {
                            code: "HISAR".to_string(),
                            name: "Histoire de l'art".to_string(),
                            coeff: None,
                            subsubjects: None,
                        }]),
                    },
                    Course {
                        code: "SPORT".to_string(),
                        name: "Sport".to_string(),
                        coeff: None,
                        subsubjects: None,
                    },
                ],
            }],
        }
    }

    #[test]
    fn omits_absent_coefficients_by_default() {
        let json: serde_json::Value =
            serde_json::from_str(&render_document(&document(), CoeffStyle::Omit).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "version": "2025",
                "system": "LUX",
                "years": [{
                    "year": "7C",
                    "courses": [
                        {
                            "code": "EDART",
                            "name": "Éducation artistique",
                            "coeff": 2,
                            "subsubjects": [{"code": "HISAR", "name": "Histoire de l'art"}]
                        },
                        {"code": "SPORT", "name": "Sport"}
                    ]
                }]
            })
        );
    }

    #[test]
    fn writes_explicit_nulls_on_request() {
        let json: serde_json::Value =
            serde_json::from_str(&render_document(&document(), CoeffStyle::Null).unwrap()).unwrap();
        assert_eq!(json["years"][0]["courses"][1]["coeff"], serde_json::Value::Null);
        assert!(json["years"][0]["courses"][1].get("coeff").is_some());
        assert!(json["years"][0]["courses"][1].get("subsubjects").is_none());
        assert!(
            json["years"][0]["courses"][0]["subsubjects"][0]
                .get("coeff")
                .is_some()
        );
    }

    #[test]
    fn keeps_document_field_order() {
        let rendered = render_document(&document(), CoeffStyle::Omit).unwrap();
        let version = rendered.find("\"version\"").unwrap();
        let system = rendered.find("\"system\"").unwrap();
        let years = rendered.find("\"years\"").unwrap();
        assert!(version < system && system < years);
    }

    #[test]
    fn rendered_catalog_reads_back() {
        let rendered = render_document(&document(), CoeffStyle::Null).unwrap();
        let parsed: Document = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, document());
    }

    #[test]
    fn parses_style_names() {
        assert_eq!("null".parse::<CoeffStyle>().unwrap(), CoeffStyle::Null);
        assert_eq!("omit".parse::<CoeffStyle>().unwrap(), CoeffStyle::Omit);
        assert!("none".parse::<CoeffStyle>().is_err());
    }
}
