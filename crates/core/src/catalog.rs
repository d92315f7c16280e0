//! Read-only project dataset.
//!
//! The catalog is built once from the JSON dataset the site ships with and
//! shared immutably for the life of the process.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::project::Project;

#[derive(Debug, Clone, Default)]
pub struct ProjectCatalog {
    projects: Vec<Project>,
}

impl ProjectCatalog {
    /// Build a catalog, rejecting blank or duplicate ids.
    pub fn new(projects: Vec<Project>) -> Result<Self, CoreError> {
        let mut seen = HashSet::new();
        for project in &projects {
            if project.id.trim().is_empty() {
                return Err(CoreError::Validation(format!(
                    "Project '{}' has an empty id",
                    project.title
                )));
            }
            if !seen.insert(project.id.as_str()) {
                return Err(CoreError::Validation(format!(
                    "Duplicate project id '{}'",
                    project.id
                )));
            }
        }
        Ok(Self { projects })
    }

    /// Parse a JSON array of project records.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let projects: Vec<Project> = serde_json::from_str(json)
            .map_err(|e| CoreError::Validation(format!("Invalid project dataset: {e}")))?;
        Self::new(projects)
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Look up a project, mapping a miss to [`CoreError::NotFound`].
    pub fn require(&self, id: &str) -> Result<&Project, CoreError> {
        self.get(id).ok_or_else(|| CoreError::NotFound {
            entity: "Project",
            id: id.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
