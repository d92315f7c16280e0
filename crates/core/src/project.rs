//! Project records and their enumerated tags.
//!
//! Records are supplied by the surrounding application (see
//! [`crate::catalog`]) and are never mutated once loaded.

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Project type
// ---------------------------------------------------------------------------

pub const PROJECT_TYPE_WEB_APPLICATION: &str = "web-application";
pub const PROJECT_TYPE_MOBILE_APPLICATION: &str = "mobile-application";
pub const PROJECT_TYPE_API_SERVICE: &str = "api-service";
pub const PROJECT_TYPE_DATA_PIPELINE: &str = "data-pipeline";
pub const PROJECT_TYPE_AUTOMATION: &str = "automation";

/// All valid project type values.
pub const VALID_PROJECT_TYPES: &[&str] = &[
    PROJECT_TYPE_WEB_APPLICATION,
    PROJECT_TYPE_MOBILE_APPLICATION,
    PROJECT_TYPE_API_SERVICE,
    PROJECT_TYPE_DATA_PIPELINE,
    PROJECT_TYPE_AUTOMATION,
];

/// Kind of deliverable a project produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    WebApplication,
    MobileApplication,
    ApiService,
    DataPipeline,
    Automation,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WebApplication => PROJECT_TYPE_WEB_APPLICATION,
            Self::MobileApplication => PROJECT_TYPE_MOBILE_APPLICATION,
            Self::ApiService => PROJECT_TYPE_API_SERVICE,
            Self::DataPipeline => PROJECT_TYPE_DATA_PIPELINE,
            Self::Automation => PROJECT_TYPE_AUTOMATION,
        }
    }
}

impl FromStr for ProjectType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            PROJECT_TYPE_WEB_APPLICATION => Ok(Self::WebApplication),
            PROJECT_TYPE_MOBILE_APPLICATION => Ok(Self::MobileApplication),
            PROJECT_TYPE_API_SERVICE => Ok(Self::ApiService),
            PROJECT_TYPE_DATA_PIPELINE => Ok(Self::DataPipeline),
            PROJECT_TYPE_AUTOMATION => Ok(Self::Automation),
            other => Err(CoreError::Validation(format!(
                "Unknown project type: '{other}'. Valid types: {}",
                VALID_PROJECT_TYPES.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Project status
// ---------------------------------------------------------------------------

pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_IN_PROGRESS: &str = "in-progress";

/// All valid project status values.
pub const VALID_STATUSES: &[&str] = &[STATUS_COMPLETED, STATUS_IN_PROGRESS];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Completed,
    InProgress,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => STATUS_COMPLETED,
            Self::InProgress => STATUS_IN_PROGRESS,
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_COMPLETED => Ok(Self::Completed),
            STATUS_IN_PROGRESS => Ok(Self::InProgress),
            other => Err(CoreError::Validation(format!(
                "Unknown project status: '{other}'. Valid statuses: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Project record
// ---------------------------------------------------------------------------

/// A portfolio project as it appears in the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technologies: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    pub project_type: ProjectType,
    pub status: ProjectStatus,
    #[serde(default)]
    pub featured: bool,
    pub completed_date: String,
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    pub my_role: String,
}

impl Project {
    /// Technologies used, empty when the record omits them.
    pub fn technologies(&self) -> &[String] {
        self.technologies.as_deref().unwrap_or_default()
    }

    /// Skills exercised, empty when the record omits them.
    pub fn skills(&self) -> &[String] {
        self.skills.as_deref().unwrap_or_default()
    }

    /// Parsed completion date, or `None` if the string is not a date.
    pub fn completed_on(&self) -> Option<NaiveDate> {
        parse_completed_date(&self.completed_date)
    }

    /// Duration expressed in days. See [`duration_in_days`].
    pub fn duration_days(&self) -> u32 {
        duration_in_days(&self.duration)
    }
}

// ---------------------------------------------------------------------------
// Derived values
// ---------------------------------------------------------------------------

/// Days per unit when converting a duration string.
pub const DAYS_PER_MONTH: u32 = 30;
pub const DAYS_PER_WEEK: u32 = 7;
pub const DAYS_PER_DAY: u32 = 1;

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]+)\s*(month|week|day)s?").expect("valid regex")
});

/// Convert free-text such as `"4 months"` or `"2 weeks"` into days.
///
/// Text without a recognisable `<number> <unit>` pair yields `0`, so entries
/// like `"ongoing"` land at the end of a duration-descending sort.
pub fn duration_in_days(duration: &str) -> u32 {
    let Some(caps) = DURATION_RE.captures(duration) else {
        return 0;
    };
    // Digits only, so a parse failure means overflow.
    let amount: u32 = caps[1].parse().unwrap_or(u32::MAX);
    let per_unit = match caps[2].to_ascii_lowercase().as_str() {
        "month" => DAYS_PER_MONTH,
        "week" => DAYS_PER_WEEK,
        _ => DAYS_PER_DAY,
    };
    amount.saturating_mul(per_unit)
}

/// Parse a completion date in `YYYY-MM-DD`, `YYYY-MM`, or RFC 3339 form.
pub fn parse_completed_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d") {
        return Some(date);
    }
    chrono::DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
