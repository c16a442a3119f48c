//! Session: the bearer token every outgoing request carries.
//!
//! The token lives in an explicitly owned [`Session`] handle that is cloned
//! into the client, never in a global. A [`TokenStore`] persists it under
//! [`TOKEN_KEY`] so a later process can restore the session.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

/// Key the token is persisted under.
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenStoreError {
    #[error("token store read failed at {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("token store write failed at {path}: {reason}")]
    Write { path: String, reason: String },
}

/// Persistent key-value slot for the session token.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>, TokenStoreError>;
    fn save(&self, token: &str) -> Result<(), TokenStoreError>;
    fn remove(&self) -> Result<(), TokenStoreError>;
}

/// Process-local store, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<BTreeMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::default();
        store
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(TOKEN_KEY.to_string(), token.into());
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, TokenStoreError> {
        let slot = self.slot.lock().unwrap_or_else(|p| p.into_inner());
        Ok(slot.get(TOKEN_KEY).cloned())
    }

    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        let mut slot = self.slot.lock().unwrap_or_else(|p| p.into_inner());
        slot.insert(TOKEN_KEY.to_string(), token.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), TokenStoreError> {
        let mut slot = self.slot.lock().unwrap_or_else(|p| p.into_inner());
        slot.remove(TOKEN_KEY);
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct TokenFile {
    token: String,
}

/// JSON file holding `{"token": "..."}`.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_error(&self, reason: impl fmt::Display) -> TokenStoreError {
        TokenStoreError::Read {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    fn write_error(&self, reason: impl fmt::Display) -> TokenStoreError {
        TokenStoreError::Write {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, TokenStoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path).map_err(|e| self.read_error(e))?;
        if raw.trim().is_empty() {
            return Ok(None);
        }
        let file: TokenFile = serde_json::from_str(&raw).map_err(|e| self.read_error(e))?;
        Ok(Some(file.token).filter(|t| !t.is_empty()))
    }

    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }
        let body = serde_json::to_string(&TokenFile {
            token: token.to_string(),
        })
        .map_err(|e| self.write_error(e))?;
        fs::write(&self.path, body).map_err(|e| self.write_error(e))
    }

    fn remove(&self) -> Result<(), TokenStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.write_error(e)),
        }
    }
}

/// Owned handle to the current bearer token.
///
/// Clones share state. `set` and `clear` write through to the token store.
#[derive(Clone)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
    store: Arc<dyn TokenStore>,
}

impl fmt::Debug for Session {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl Session {
    /// Empty session backed by `store`; nothing is read yet.
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            token: Arc::new(RwLock::new(None)),
            store,
        }
    }

    /// Session with no persistence.
    pub fn ephemeral() -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()))
    }

    /// Session restored from whatever `store` holds.
    pub fn restore(store: Arc<dyn TokenStore>) -> Result<Self, TokenStoreError> {
        let token = store.load()?;
        Ok(Self {
            token: Arc::new(RwLock::new(token)),
            store,
        })
    }

    pub fn get(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_some()
    }

    pub fn set(&self, token: impl Into<String>) -> Result<(), TokenStoreError> {
        let token = token.into();
        self.store.save(&token)?;
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token);
        Ok(())
    }

    /// Drop the token in memory first, so a failing store still logs the
    /// process out.
    pub fn clear(&self) -> Result<(), TokenStoreError> {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        self.store.remove()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    struct TempDirGuard {
        path: PathBuf,
    }

    impl TempDirGuard {
        fn new(prefix: &str) -> Self {
            let unique = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock should be after unix epoch")
                .as_nanos();
            let path = std::env::temp_dir().join(format!(
                "sprintdesk-transport-{prefix}-{}-{unique}",
                std::process::id()
            ));
            fs::create_dir_all(&path).expect("temp dir should be created");
            Self { path }
        }
    }

    impl Drop for TempDirGuard {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.path);
        }
    }

    #[test]
    fn session_writes_through_to_store() {
        let store = Arc::new(MemoryTokenStore::new());
        let session = Session::new(store.clone());
        assert!(!session.is_authenticated());

        session.set("abc").expect("set should persist");
        assert_eq!(session.get().as_deref(), Some("abc"));
        assert_eq!(store.load().expect("load"), Some("abc".to_string()));

        let clone = session.clone();
        clone.clear().expect("clear should persist");
        assert!(session.get().is_none());
        assert_eq!(store.load().expect("load"), None);
    }

    #[test]
    fn restore_reads_existing_token() {
        let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::with_token("saved"));
        let session = Session::restore(store).expect("restore");
        assert_eq!(session.get().as_deref(), Some("saved"));
    }

    #[test]
    fn file_store_round_trips_and_tolerates_missing_file() {
        let tmp = TempDirGuard::new("file-store");
        let store = FileTokenStore::new(tmp.path.join("nested/session.json"));

        assert_eq!(store.load().expect("missing file is empty"), None);
        store.save("tok-1").expect("save");
        assert_eq!(store.load().expect("load"), Some("tok-1".to_string()));

        store.remove().expect("remove");
        store.remove().expect("second remove is a no-op");
        assert_eq!(store.load().expect("load"), None);
    }

    #[test]
    fn file_store_reports_corrupt_contents() {
        let tmp = TempDirGuard::new("corrupt");
        let path = tmp.path.join("session.json");
        fs::write(&path, "not json").expect("write");

        let err = FileTokenStore::new(&path).load().expect_err("corrupt file");
        assert!(matches!(err, TokenStoreError::Read { .. }));
    }
}
