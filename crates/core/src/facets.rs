//! Facet option lists for the project filter UI.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::filter::ALL;
use crate::project::Project;

/// A selectable filter option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOption {
    pub value: String,
    pub label: String,
}

impl FacetOption {
    fn all(label: &str) -> Self {
        Self {
            value: ALL.to_string(),
            label: label.to_string(),
        }
    }
}

/// The three facet lists, each headed by its `"all"` option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectFacets {
    pub categories: Vec<FacetOption>,
    pub technologies: Vec<FacetOption>,
    pub skills: Vec<FacetOption>,
}

pub fn derive_facets(projects: &[Project]) -> ProjectFacets {
    ProjectFacets {
        categories: category_options(projects),
        technologies: sorted_options(
            projects.iter().flat_map(|p| p.technologies()),
            "All Technologies",
        ),
        skills: sorted_options(projects.iter().flat_map(|p| p.skills()), "All Skills"),
    }
}

/// Distinct categories in the order they are first seen.
pub fn category_options(projects: &[Project]) -> Vec<FacetOption> {
    let mut seen = HashSet::new();
    let mut options = vec![FacetOption::all("All Categories")];
    for project in projects {
        if seen.insert(project.category.as_str()) {
            options.push(FacetOption {
                value: project.category.clone(),
                label: category_label(&project.category),
            });
        }
    }
    options
}

fn sorted_options<'a>(
    values: impl Iterator<Item = &'a String>,
    all_label: &str,
) -> Vec<FacetOption> {
    let distinct: BTreeSet<&str> = values.map(String::as_str).collect();
    std::iter::once(FacetOption::all(all_label))
        .chain(distinct.into_iter().map(|v| FacetOption {
            value: v.to_string(),
            label: v.to_string(),
        }))
        .collect()
}

/// Human label for a category slug: `"web-development"` -> `"Web Development"`.
pub fn category_label(category: &str) -> String {
    category
        .split(['-', ' '])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
