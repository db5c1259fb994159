//! Subject grouping.
//!
//! Some subjects are taught as a family (e.g. arts education split into
//! drawing, visual communication and art history). Configured child codes
//! are moved under their parent's `subsubjects` whenever the parent is
//! present in the same year.

use std::collections::BTreeSet;

use letzgrade_catalog_models::Course;

use crate::rules::GroupRule;

/// Applies `groups` to one year's deduplicated course list.
///
/// Parents get their configured display name and a `subsubjects` list
/// (possibly empty) holding their present children in first-seen order.
/// Consumed children are removed from the top level; everything else keeps
/// its order.
#[must_use]
pub fn group_year(mut courses: Vec<Course>, groups: &[GroupRule]) -> Vec<Course> {
    let mut consumed = BTreeSet::new();

    for group in groups {
        let Some(parent_idx) = courses.iter().position(|c| c.code == group.parent) else {
            continue;
        };

        let children: Vec<Course> = courses
            .iter()
            .filter(|c| group.has_child(&c.code))
            .map(|c| Course {
                code: c.code.clone(),
                name: c.name.clone(),
                coeff: c.coeff,
                subsubjects: None,
            })
            .collect();

        consumed.extend(children.iter().map(|c| c.code.clone()));

        let parent = &mut courses[parent_idx];
        if let Some(name) = &group.name {
            parent.name.clone_from(name);
        }
        log::trace!("Grouping {} child(ren) under {}", children.len(), parent.code);
        parent.subsubjects.get_or_insert_with(Vec::new).extend(children);
    }

    courses.retain(|c| !consumed.contains(&c.code));
    courses
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(code: &str, coeff: Option<u32>) -> Course {
        Course {
            code: code.to_string(),
            name: format!("{code} name"),
            coeff,
            subsubjects: None,
        }
    }

    fn groups() -> Vec<GroupRule> {
        vec![GroupRule {
            parent: "EDART".to_string(),
            name: Some("Éducation artistique".to_string()),
            children: vec!["DESSI".to_string(), "HISAR".to_string()],
        }]
    }

    fn codes(courses: &[Course]) -> Vec<&str> {
        courses.iter().map(|c| c.code.as_str()).collect()
    }

    #[test]
    fn nests_children_under_parent() {
        let grouped = group_year(
            vec![
                course("MATH", Some(4)),
                course("HISAR", None),
                course("EDART", Some(2)),
                course("DESSI", Some(1)),
            ],
            &groups(),
        );

        assert_eq!(codes(&grouped), vec!["MATH", "EDART"]);
        let parent = &grouped[1];
        assert_eq!(parent.name, "Éducation artistique");
        assert_eq!(parent.coeff, Some(2));
        let subs = parent.subsubjects.as_deref().unwrap();
        assert_eq!(codes(subs), vec!["HISAR", "DESSI"]);
        assert_eq!(subs[0].coeff, None);
        assert_eq!(subs[1].coeff, Some(1));
        assert!(subs.iter().all(|c| c.subsubjects.is_none()));
    }

    #[test]
    fn parent_without_children_gets_empty_list() {
        let grouped = group_year(vec![course("EDART", Some(2))], &groups());
        assert_eq!(grouped[0].subsubjects, Some(Vec::new()));
    }

    #[test]
    fn children_stay_top_level_without_parent() {
        let grouped = group_year(
            vec![course("DESSI", Some(1)), course("HISAR", None)],
            &groups(),
        );
        assert_eq!(codes(&grouped), vec!["DESSI", "HISAR"]);
        assert!(grouped.iter().all(|c| c.subsubjects.is_none()));
    }

    #[test]
    fn grouped_children_never_appear_top_level() {
        let grouped = group_year(
            vec![
                course("DESSI", Some(1)),
                course("EDART", None),
                course("HISAR", None),
            ],
            &groups(),
        );
        for group in groups() {
            for child in &group.children {
                assert!(!grouped.iter().any(|c| &c.code == child));
            }
        }
    }
}
