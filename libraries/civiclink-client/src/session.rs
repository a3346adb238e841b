//! Client-held session and its durable storage.
//!
//! A session is the optional bearer token plus the signed-in profile. It is
//! persisted under two independent keys, `token` and `user`, which are
//! written one after the other with no rollback if the second write fails.

use crate::error::{ClientError, Result};
use async_trait::async_trait;
use civiclink_core::Profile;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Storage key for the bearer token
pub const TOKEN_KEY: &str = "token";
/// Storage key for the serialized profile
pub const USER_KEY: &str = "user";

/// Unix mode for keys holding credentials
#[cfg(unix)]
const SECRET_MODE: u32 = 0o600;

/// The signed-in state of the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<Profile>,
}

impl Session {
    /// Session for a freshly authenticated user
    pub fn new(token: Option<String>, user: Profile) -> Self {
        Self {
            token,
            user: Some(user),
        }
    }

    /// Whether a user is signed in.
    ///
    /// The profile is the source of truth: some backends never issue a token.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user_email(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.email.as_str())
    }
}

/// Durable key-value storage for the session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the persisted session; missing keys yield an empty session
    async fn load(&self) -> Result<Session>;

    async fn save_token(&self, token: &str) -> Result<()>;

    async fn remove_token(&self) -> Result<()>;

    async fn save_user(&self, user: &Profile) -> Result<()>;

    /// Remove both keys
    async fn clear(&self) -> Result<()>;
}

/// Decode a stored profile, treating corrupt data as signed out.
fn decode_user(raw: &str) -> Option<Profile> {
    match serde_json::from_str(raw) {
        Ok(user) => Some(user),
        Err(e) => {
            warn!(error = %e, "Discarding unreadable stored profile");
            None
        }
    }
}

fn encode_user(user: &Profile) -> Result<String> {
    serde_json::to_string(user).map_err(|e| ClientError::Session(e.to_string()))
}

// =============================================================================
// File-backed store
// =============================================================================

/// Session store keeping one file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    async fn read_key(&self, key: &str) -> Result<Option<String>> {
        match tokio::fs::read_to_string(self.key_path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ClientError::Session(format!("Failed to read {}: {}", key, e))),
        }
    }

    /// Write a key, keeping the token readable by the owner only.
    async fn write_key(&self, key: &str, value: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ClientError::Session(format!("Failed to create session dir: {}", e)))?;

        let write_error =
            |e: std::io::Error| ClientError::Session(format!("Failed to write {}: {}", key, e));

        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        if key == TOKEN_KEY {
            options.mode(SECRET_MODE);
        }

        let mut file = options.open(self.key_path(key)).await.map_err(write_error)?;

        // A file left by an older run keeps its mode on open
        #[cfg(unix)]
        if key == TOKEN_KEY {
            file.set_permissions(std::fs::Permissions::from_mode(SECRET_MODE))
                .await
                .map_err(write_error)?;
        }

        file.write_all(value.as_bytes()).await.map_err(write_error)?;
        file.flush().await.map_err(write_error)
    }

    async fn remove_key(&self, key: &str) -> Result<()> {
        match tokio::fs::remove_file(self.key_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Session(format!("Failed to remove {}: {}", key, e))),
        }
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Session> {
        let token = self.read_key(TOKEN_KEY).await?.filter(|t| !t.is_empty());
        let user = self
            .read_key(USER_KEY)
            .await?
            .as_deref()
            .and_then(decode_user);

        debug!(
            dir = %self.dir.display(),
            has_token = token.is_some(),
            has_user = user.is_some(),
            "Loaded session"
        );

        Ok(Session { token, user })
    }

    async fn save_token(&self, token: &str) -> Result<()> {
        self.write_key(TOKEN_KEY, token).await
    }

    async fn remove_token(&self) -> Result<()> {
        self.remove_key(TOKEN_KEY).await
    }

    async fn save_user(&self, user: &Profile) -> Result<()> {
        let raw = encode_user(user)?;
        self.write_key(USER_KEY, &raw).await
    }

    async fn clear(&self) -> Result<()> {
        self.remove_key(TOKEN_KEY).await?;
        self.remove_key(USER_KEY).await
    }
}

// =============================================================================
// In-memory store
// =============================================================================

/// Session store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<&'static str, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_entries<T>(&self, f: impl FnOnce(&mut HashMap<&'static str, String>) -> T) -> Result<T> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| ClientError::Session("session store lock poisoned".to_string()))?;
        Ok(f(&mut entries))
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Session> {
        self.with_entries(|entries| Session {
            token: entries.get(TOKEN_KEY).cloned(),
            user: entries.get(USER_KEY).and_then(|raw| decode_user(raw)),
        })
    }

    async fn save_token(&self, token: &str) -> Result<()> {
        self.with_entries(|entries| {
            entries.insert(TOKEN_KEY, token.to_string());
        })
    }

    async fn remove_token(&self) -> Result<()> {
        self.with_entries(|entries| {
            entries.remove(TOKEN_KEY);
        })
    }

    async fn save_user(&self, user: &Profile) -> Result<()> {
        let raw = encode_user(user)?;
        self.with_entries(|entries| {
            entries.insert(USER_KEY, raw);
        })
    }

    async fn clear(&self) -> Result<()> {
        self.with_entries(|entries| entries.clear())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use civiclink_core::UserId;

    fn profile() -> Profile {
        Profile {
            id: UserId::new("7"),
            email: "jane@example.com".to_string(),
            full_name: "Jane Citizen".to_string(),
            phone: Some("555-0100".to_string()),
        }
    }

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session"));

        assert_eq!(store.load().await.unwrap(), Session::default());

        store.save_token("tok").await.unwrap();
        store.save_user(&profile()).await.unwrap();

        let session = store.load().await.unwrap();
        assert_eq!(session.token.as_deref(), Some("tok"));
        assert_eq!(session.user, Some(profile()));
        assert!(session.is_authenticated());

        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), Session::default());
    }

    #[tokio::test]
    async fn test_file_store_corrupt_profile_is_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(USER_KEY), "{not json").unwrap();
        std::fs::write(dir.path().join(TOKEN_KEY), "tok").unwrap();

        let session = FileSessionStore::new(dir.path()).load().await.unwrap();
        assert!(!session.is_authenticated());
        assert_eq!(session.token.as_deref(), Some("tok"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_token_file_is_owner_only() {
        let dir = tempfile::tempdir().unwrap();
        let token_path = dir.path().join(TOKEN_KEY);
        std::fs::write(&token_path, "stale").unwrap();
        std::fs::set_permissions(&token_path, std::fs::Permissions::from_mode(0o644)).unwrap();

        let store = FileSessionStore::new(dir.path());
        store.save_token("tok").await.unwrap();
        store.save_user(&profile()).await.unwrap();

        let mode = std::fs::metadata(&token_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(std::fs::read_to_string(&token_path).unwrap(), "tok");

        store.remove_token().await.unwrap();
        store.save_token("fresh").await.unwrap();
        let mode = std::fs::metadata(&token_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[tokio::test]
    async fn test_clear_on_missing_dir_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("never-created"));
        assert!(store.clear().await.is_ok());
    }

    #[tokio::test]
    async fn test_memory_store_keys_are_independent() {
        let store = MemorySessionStore::new();
        store.save_user(&profile()).await.unwrap();

        let session = store.load().await.unwrap();
        assert!(session.token.is_none());
        assert!(session.is_authenticated());

        store.save_token("tok").await.unwrap();
        store.remove_token().await.unwrap();
        let session = store.load().await.unwrap();
        assert!(session.token.is_none());
        assert_eq!(session.user_email(), Some("jane@example.com"));
    }
}
