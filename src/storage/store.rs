use crate::core::Project;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// The full, unfiltered project collection of a session.
///
/// Never mutated in place: [`replace`](Self::replace) swaps in a new
/// `Arc<[Project]>` and bumps the version that derived views key their
/// caches on.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    projects: Arc<[Project]>,
    version: u64,
    loaded_at: Option<DateTime<Utc>>,
}

impl Default for ProjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectStore {
    pub fn new() -> Self {
        Self {
            projects: Arc::from(Vec::new()),
            version: 0,
            loaded_at: None,
        }
    }

    /// Replace the whole collection, returning the new version
    pub fn replace(&mut self, projects: Vec<Project>, at: DateTime<Utc>) -> u64 {
        self.projects = Arc::from(projects);
        self.version += 1;
        self.loaded_at = Some(at);
        tracing::debug!(version = self.version, count = self.projects.len(), "store replaced");
        self.version
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// `false` until the first load has completed
    pub fn is_loaded(&self) -> bool {
        self.loaded_at.is_some()
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }
}
