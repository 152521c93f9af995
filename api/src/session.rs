//! Local persistence for the signed-in session.
//!
//! The store is a plain key-value surface; what is stored under which key is
//! decided by [`crate::auth::AuthSession`].

use crate::client::{ApiError, ApiResult};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

pub const ENV_SESSION_DIR: &str = "CLUTCH_SESSION_DIR";

pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> ApiResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> ApiResult<()>;
    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> ApiResult<()>;
}

/// One JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `$CLUTCH_SESSION_DIR`, else `$XDG_CONFIG_HOME/clutch-score`, else
    /// `$HOME/.config/clutch-score`, else the working directory.
    pub fn default_dir() -> PathBuf {
        let non_empty = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        if let Some(dir) = non_empty(ENV_SESSION_DIR) {
            return PathBuf::from(dir);
        }
        if let Some(config_dir) = non_empty("XDG_CONFIG_HOME") {
            return PathBuf::from(config_dir).join("clutch-score");
        }
        if let Some(home) = non_empty("HOME") {
            return PathBuf::from(home).join(".config").join("clutch-score");
        }
        PathBuf::from(".clutch-score")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{file}.json"))
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> ApiResult<Option<String>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ApiError::Storage(format!("read {} failed: {e}", path.display()))),
        }
    }

    fn set(&self, key: &str, value: &str) -> ApiResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            ApiError::Storage(format!("create {} failed: {e}", self.dir.display()))
        })?;
        let path = self.path_for(key);
        std::fs::write(&path, value)
            .map_err(|e| ApiError::Storage(format!("write {} failed: {e}", path.display())))
    }

    fn remove(&self, key: &str) -> ApiResult<()> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ApiError::Storage(format!("remove {} failed: {e}", path.display()))),
        }
    }
}

/// Process-lifetime store; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> ApiResult<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ApiResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> ApiResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("clutch-session-{name}-{}", std::process::id()))
    }

    #[test]
    fn file_store_round_trip() {
        let dir = scratch_dir("round-trip");
        let store = FileSessionStore::new(&dir);

        assert_eq!(store.get("clutch.session").unwrap(), None);
        store.set("clutch.session", r#"{"a":1}"#).unwrap();
        assert_eq!(store.get("clutch.session").unwrap().as_deref(), Some(r#"{"a":1}"#));
        assert!(dir.join("clutch.session.json").exists());

        store.remove("clutch.session").unwrap();
        assert_eq!(store.get("clutch.session").unwrap(), None);
        // Second remove is a no-op.
        store.remove("clutch.session").unwrap();

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn file_store_keys_cannot_escape_the_directory() {
        let store = FileSessionStore::new("/tmp/clutch");
        assert_eq!(
            store.path_for("../etc/passwd"),
            PathBuf::from("/tmp/clutch/.._etc_passwd.json")
        );
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemorySessionStore::new();
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }
}
