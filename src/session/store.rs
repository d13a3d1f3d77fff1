//! Persisted session storage
//!
//! Implements local persistence for the session entries (access token,
//! refresh token, serialized user record) using a JSON file, following
//! the XDG Base Directory Specification.

use crate::{Result, types::UserRecord};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, error, warn};

/// On-disk session contents. The three entries are independently present or
/// absent; there is no schema version and no encryption.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRecord>,

    /// When the file was last written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl StoredSession {
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none() && self.user.is_none()
    }
}

/// Persistence seam for session state. File-backed in production,
/// memory-backed in tests.
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug {
    /// Read the stored session. Missing or unreadable storage reads as empty.
    async fn load(&self) -> Result<StoredSession>;

    /// Replace the stored session
    async fn save(&self, session: &StoredSession) -> Result<()>;

    /// Rewrite only the access token entry, leaving the other two entries
    /// as they are
    async fn set_access_token(&self, token: &str) -> Result<()>;

    /// Remove all three entries
    async fn clear(&self) -> Result<()>;
}

/// File-based session store
#[derive(Debug)]
pub struct FileStore {
    /// Path to the session file
    session_path: PathBuf,
}

impl FileStore {
    /// Create a new file store at the given path
    pub fn new(session_path: PathBuf) -> Self {
        Self { session_path }
    }

    /// Read and parse the session file, treating every failure as an empty
    /// session so a damaged file never blocks startup
    async fn read_session(&self) -> StoredSession {
        if !self.session_path.exists() {
            debug!("Session file does not exist: {:?}", self.session_path);
            return StoredSession::default();
        }

        match fs::read_to_string(&self.session_path).await {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(session) => {
                    debug!("Loaded session from: {:?}", self.session_path);
                    session
                }
                Err(e) => {
                    warn!("Error parsing session file: {}", e);
                    StoredSession::default()
                }
            },
            Err(e) => {
                warn!("Failed to read session file {:?}: {}", self.session_path, e);
                StoredSession::default()
            }
        }
    }

    async fn write_session(&self, session: &StoredSession) -> Result<()> {
        let content = serde_json::to_string_pretty(session)?;

        // Ensure parent directory exists
        if let Some(parent) = self.session_path.parent()
            && let Err(e) = fs::create_dir_all(parent).await
        {
            error!("Failed to create session directory {:?}: {}", parent, e);
            return Err(crate::Error::storage(
                "directory_creation",
                format!("Directory creation failed: {}", e),
            ));
        }

        match fs::write(&self.session_path, content).await {
            Ok(_) => {
                debug!("Session saved to: {:?}", self.session_path);
                Ok(())
            }
            Err(e) => {
                error!(
                    "Failed to write session file {:?}: {}",
                    self.session_path, e
                );
                Err(crate::Error::storage(
                    "file_write",
                    format!("Write failed: {}", e),
                ))
            }
        }
    }
}

#[async_trait]
impl SessionStore for FileStore {
    async fn load(&self) -> Result<StoredSession> {
        Ok(self.read_session().await)
    }

    async fn save(&self, session: &StoredSession) -> Result<()> {
        let mut stamped = session.clone();
        stamped.saved_at = Some(Utc::now());
        self.write_session(&stamped).await
    }

    async fn set_access_token(&self, token: &str) -> Result<()> {
        let mut session = self.read_session().await;
        session.access_token = Some(token.to_string());
        session.saved_at = Some(Utc::now());
        self.write_session(&session).await
    }

    async fn clear(&self) -> Result<()> {
        // Nothing stored means nothing to clear
        if !self.session_path.exists() {
            return Ok(());
        }
        self.write_session(&StoredSession::default()).await
    }
}

/// In-memory session store for tests and ephemeral runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    session: tokio::sync::Mutex<StoredSession>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with an existing session
    pub fn with_session(session: StoredSession) -> Self {
        Self {
            session: tokio::sync::Mutex::new(session),
        }
    }

    /// Current contents, for assertions
    pub async fn snapshot(&self) -> StoredSession {
        self.session.lock().await.clone()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn load(&self) -> Result<StoredSession> {
        Ok(self.session.lock().await.clone())
    }

    async fn save(&self, session: &StoredSession) -> Result<()> {
        let mut guard = self.session.lock().await;
        *guard = session.clone();
        guard.saved_at = Some(Utc::now());
        Ok(())
    }

    async fn set_access_token(&self, token: &str) -> Result<()> {
        let mut guard = self.session.lock().await;
        guard.access_token = Some(token.to_string());
        guard.saved_at = Some(Utc::now());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut guard = self.session.lock().await;
        *guard = StoredSession::default();
        Ok(())
    }
}

/// Get the session file path following the XDG Base Directory Specification
pub fn default_session_path() -> anyhow::Result<PathBuf> {
    let state_dir = if let Ok(xdg_state) = std::env::var("XDG_STATE_HOME") {
        PathBuf::from(xdg_state).join("edlearn")
    } else if let Some(home_dir) = dirs::home_dir() {
        home_dir.join(".local").join("state").join("edlearn")
    } else {
        // Fallback to current directory if home is not available
        warn!("Could not determine home directory, using current directory for session storage");
        std::env::current_dir()?.join(".edlearn")
    };

    Ok(state_dir.join("session.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_session() -> StoredSession {
        StoredSession {
            access_token: Some("acc".to_string()),
            refresh_token: Some("ref".to_string()),
            user: Some(UserRecord::new(1, "ada@example.com").with_name("Ada", "Lovelace")),
            saved_at: None,
        }
    }

    #[tokio::test]
    async fn test_save_and_load_session() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("session.json"));

        store.save(&sample_session()).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.access_token.as_deref(), Some("acc"));
        assert_eq!(loaded.refresh_token.as_deref(), Some("ref"));
        assert_eq!(loaded.user.unwrap().email, "ada@example.com");
        assert!(loaded.saved_at.is_some());
    }

    #[tokio::test]
    async fn test_load_nonexistent_session() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("missing").join("session.json"));

        let loaded = store.load().await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_session_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        tokio::fs::write(&path, "not json at all").await.unwrap();

        let store = FileStore::new(path);
        let loaded = store.load().await.unwrap();

        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_save_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("session.json");
        let store = FileStore::new(path.clone());

        store.save(&sample_session()).await.unwrap();

        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_set_access_token_rewrites_only_that_entry() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("session.json"));
        store.save(&sample_session()).await.unwrap();

        store.set_access_token("fresh").await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.access_token.as_deref(), Some("fresh"));
        assert_eq!(loaded.refresh_token.as_deref(), Some("ref"));
        assert!(loaded.user.is_some());
    }

    #[tokio::test]
    async fn test_clear_empties_all_entries() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("session.json"));
        store.save(&sample_session()).await.unwrap();

        store.clear().await.unwrap();

        let loaded = store.load().await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_clear_without_file_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        let store = FileStore::new(path.clone());

        store.clear().await.unwrap();

        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.load().await.unwrap().is_empty());

        store.save(&sample_session()).await.unwrap();
        assert!(!store.load().await.unwrap().is_empty());

        store.set_access_token("fresh").await.unwrap();
        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.access_token.as_deref(), Some("fresh"));
        assert_eq!(snapshot.refresh_token.as_deref(), Some("ref"));

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_empty());
    }

    #[test]
    fn test_default_session_path_with_xdg() {
        unsafe {
            std::env::set_var("XDG_STATE_HOME", "/tmp/test_state");
        }

        let path = default_session_path().unwrap();

        assert!(path.to_string_lossy().contains("edlearn"));
        assert!(path.to_string_lossy().ends_with("session.json"));

        unsafe {
            std::env::remove_var("XDG_STATE_HOME");
        }
    }
}
