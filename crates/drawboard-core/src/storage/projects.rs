//! Per-user project persistence and the stored session record.

use super::{Storage, StorageError, StorageResult};
use crate::projects::ProjectCollection;
use crate::session::Session;

/// Key of the stored session record.
pub const SESSION_KEY: &str = "session";

/// Key of a user's project collection.
pub fn projects_key(username: &str) -> String {
    format!("projects-{username}")
}

/// Reads and writes project collections and the session through a
/// key-value [`Storage`] backend.
pub struct ProjectStore<S: Storage> {
    storage: S,
}

impl<S: Storage> ProjectStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The underlying backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Load a user's projects.
    ///
    /// A missing record is an empty collection. A record that does not
    /// parse is logged and replaced by an empty collection; other storage
    /// errors propagate.
    pub async fn load_projects(&self, username: &str) -> StorageResult<ProjectCollection> {
        let key = projects_key(username);
        let raw = match self.storage.load(&key).await {
            Ok(raw) => raw,
            Err(StorageError::NotFound(_)) => return Ok(ProjectCollection::new()),
            Err(e) => return Err(e),
        };
        match serde_json::from_str(&raw) {
            Ok(projects) => Ok(projects),
            Err(e) => {
                log::warn!("Discarding unreadable projects for {username}: {e}");
                Ok(ProjectCollection::new())
            }
        }
    }

    /// Persist a user's whole collection.
    pub async fn save_projects(
        &self,
        username: &str,
        projects: &ProjectCollection,
    ) -> StorageResult<()> {
        let json = serde_json::to_string(projects)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.save(&projects_key(username), &json).await
    }

    /// Remove a user's persisted collection.
    pub async fn clear_projects(&self, username: &str) -> StorageResult<()> {
        self.storage.delete(&projects_key(username)).await
    }

    /// Load the stored session, defaulting to logged out.
    pub async fn load_session(&self) -> StorageResult<Session> {
        let raw = match self.storage.load(SESSION_KEY).await {
            Ok(raw) => raw,
            Err(StorageError::NotFound(_)) => return Ok(Session::default()),
            Err(e) => return Err(e),
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Ok(session),
            Err(e) => {
                log::warn!("Discarding unreadable session record: {e}");
                Ok(Session::default())
            }
        }
    }

    /// Persist the session.
    pub async fn save_session(&self, session: &Session) -> StorageResult<()> {
        let json = serde_json::to_string(session)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.save(SESSION_KEY, &json).await
    }
}
