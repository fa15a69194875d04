//! The per-user project collection.

use crate::document::Project;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Project list errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectError {
    #[error("Project title must not be blank")]
    BlankTitle,
    #[error("Project not found: {0}")]
    NotFound(String),
}

/// Result type for project list operations.
pub type ProjectResult<T> = Result<T, ProjectError>;

/// All projects of one user, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectCollection {
    projects: Vec<Project>,
}

impl ProjectCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter()
    }

    /// Create a project from a title. The title is trimmed and must not be
    /// blank. Returns the new project.
    pub fn create(&mut self, title: &str) -> ProjectResult<&Project> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ProjectError::BlankTitle);
        }
        self.projects.push(Project::new(title));
        let index = self.projects.len() - 1;
        Ok(&self.projects[index])
    }

    /// Delete every project.
    pub fn clear_all(&mut self) {
        self.projects.clear();
    }

    pub fn find(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.id == id)
    }

    /// Look up a project, failing with [`ProjectError::NotFound`].
    pub fn get(&self, id: &str) -> ProjectResult<&Project> {
        self.find(id).ok_or_else(|| ProjectError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_trims_title() {
        let mut projects = ProjectCollection::new();
        let project = projects.create("  Sketch 1  ").unwrap();
        assert_eq!(project.title, "Sketch 1");
        assert_eq!(project.page_count(), 1);
        assert!(project.pages[0].is_empty());
        assert_eq!(projects.len(), 1);
    }

    #[test]
    fn test_create_rejects_blank_title() {
        let mut projects = ProjectCollection::new();
        assert_eq!(projects.create("   "), Err(ProjectError::BlankTitle));
        assert!(projects.is_empty());
    }

    #[test]
    fn test_find_and_clear() {
        let mut projects = ProjectCollection::new();
        let id = projects.create("a").unwrap().id.clone();
        projects.create("b").unwrap();
        assert_eq!(projects.find(&id).map(|p| p.title.as_str()), Some("a"));
        assert!(matches!(projects.get("missing"), Err(ProjectError::NotFound(_))));

        projects.clear_all();
        assert!(projects.is_empty());
        assert!(projects.find(&id).is_none());
    }

    #[test]
    fn test_creation_order_preserved() {
        let mut projects = ProjectCollection::new();
        for title in ["one", "two", "three"] {
            projects.create(title).unwrap();
        }
        let titles: Vec<_> = projects.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["one", "two", "three"]);
    }
}
