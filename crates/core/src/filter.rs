//! Project filter engine.
//!
//! Stateless derivation of the visible project list from an immutable source
//! slice and a caller-owned [`FilterState`]. Nothing here mutates the source;
//! results borrow from it.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::de::value::StringDeserializer;
use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::CoreError;
use crate::facets::{derive_facets, ProjectFacets};
use crate::project::{Project, ProjectStatus, ProjectType};

/// Reserved filter value meaning "no constraint on this field".
pub const ALL: &str = "all";

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// A filter field that is either unconstrained (`"all"`) or pinned to one value.
///
/// Serialized as the bare string `"all"` or as the inner value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq> Selection<T> {
    /// Whether `value` satisfies this selection.
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl<T: Serialize> Serialize for Selection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::All => serializer.serialize_str(ALL),
            Self::Only(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Selection<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == ALL {
            return Ok(Self::All);
        }
        let inner: StringDeserializer<D::Error> = raw.into_deserializer();
        T::deserialize(inner).map(Self::Only)
    }
}

// ---------------------------------------------------------------------------
// Sort order
// ---------------------------------------------------------------------------

pub const SORT_RECENT: &str = "recent";
pub const SORT_FEATURED: &str = "featured";
pub const SORT_ALPHABETICAL: &str = "alphabetical";
pub const SORT_DURATION: &str = "duration";

/// All valid sort keys.
pub const VALID_SORT_KEYS: &[&str] = &[SORT_RECENT, SORT_FEATURED, SORT_ALPHABETICAL, SORT_DURATION];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Most recently completed first.
    #[default]
    Recent,
    /// Featured projects first, each group most recent first.
    Featured,
    /// Title ascending.
    Alphabetical,
    /// Longest duration first.
    Duration,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recent => SORT_RECENT,
            Self::Featured => SORT_FEATURED,
            Self::Alphabetical => SORT_ALPHABETICAL,
            Self::Duration => SORT_DURATION,
        }
    }
}

impl FromStr for SortBy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            SORT_RECENT => Ok(Self::Recent),
            SORT_FEATURED => Ok(Self::Featured),
            SORT_ALPHABETICAL => Ok(Self::Alphabetical),
            SORT_DURATION => Ok(Self::Duration),
            other => Err(CoreError::Validation(format!(
                "Unknown sort key: '{other}'. Valid keys: {}",
                VALID_SORT_KEYS.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Filter state
// ---------------------------------------------------------------------------

/// Filter and sort settings owned by the caller.
///
/// `FilterState::default()` is the reset state: every selection `"all"`,
/// sorted by most recent, empty search.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    pub category: Selection<String>,
    pub project_type: Selection<ProjectType>,
    pub status: Selection<ProjectStatus>,
    pub sort_by: SortBy,
    pub search: String,
}

impl FilterState {
    /// Restore every field to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Number of constraining fields that differ from their defaults.
    ///
    /// Sort order is not a filter and is never counted.
    pub fn active_filters_count(&self) -> usize {
        [
            !self.category.is_all(),
            !self.project_type.is_all(),
            !self.status.is_all(),
            !self.search.is_empty(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Case-insensitive substring match across the searchable fields.
///
/// `needle` must already be lowercased. An empty needle matches everything;
/// whitespace is not trimmed and is matched literally.
pub fn matches_search(project: &Project, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let hit = |text: &str| text.to_lowercase().contains(needle);

    hit(&project.title)
        || hit(&project.description)
        || project.technologies().iter().any(|t| hit(t))
        || project.skills().iter().any(|s| hit(s))
        || project.client.as_deref().is_some_and(hit)
        || hit(&project.my_role)
}

/// Whether a project passes every constraint in `state` (sort is ignored).
pub fn matches_filters(project: &Project, state: &FilterState, needle: &str) -> bool {
    state.category.admits(&project.category)
        && state.project_type.admits(&project.project_type)
        && state.status.admits(&project.status)
        && matches_search(project, needle)
}

/// Filter and sort `projects` according to `state`.
pub fn apply_filters<'a>(projects: &'a [Project], state: &FilterState) -> Vec<&'a Project> {
    let needle = state.search.to_lowercase();
    let mut visible: Vec<&Project> = projects
        .iter()
        .filter(|p| matches_filters(p, state, &needle))
        .collect();
    sort_projects(&mut visible, state.sort_by);
    visible
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Sort in place. All orders are stable.
pub fn sort_projects(projects: &mut [&Project], sort_by: SortBy) {
    match sort_by {
        SortBy::Recent => projects.sort_by(|a, b| compare_recent(a, b)),
        SortBy::Featured => projects.sort_by(|a, b| {
            b.featured
                .cmp(&a.featured)
                .then_with(|| compare_recent(a, b))
        }),
        SortBy::Alphabetical => projects.sort_by(|a, b| compare_titles(&a.title, &b.title)),
        SortBy::Duration => projects.sort_by(|a, b| b.duration_days().cmp(&a.duration_days())),
    }
}

/// Most recent completion first; unparseable dates go last.
fn compare_recent(a: &Project, b: &Project) -> Ordering {
    match (a.completed_on(), b.completed_on()) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Title ordering: accent- and case-insensitive first, then case-insensitive,
/// then byte-wise so the order is total.
fn compare_titles(a: &str, b: &str) -> Ordering {
    title_key(a)
        .cmp(&title_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Primary collation key: canonical decomposition with combining marks
/// stripped, lowercased.
fn title_key(title: &str) -> String {
    title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

// ---------------------------------------------------------------------------
// Combined view
// ---------------------------------------------------------------------------

/// Everything a project listing needs for one filter state.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView<'a> {
    pub projects: Vec<&'a Project>,
    pub total: usize,
    pub active_filters: usize,
    pub facets: ProjectFacets,
}

/// Derive the filtered list plus facets for `state`.
///
/// Facets are computed over the full source list, not the filtered subset,
/// so selecting one option never hides the others.
pub fn derive_view<'a>(projects: &'a [Project], state: &FilterState) -> ProjectView<'a> {
    let visible = apply_filters(projects, state);
    ProjectView {
        total: visible.len(),
        projects: visible,
        active_filters: state.active_filters_count(),
        facets: derive_facets(projects),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
