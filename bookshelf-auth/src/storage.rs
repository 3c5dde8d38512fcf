use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use crate::error::AuthError;

/// Durable string key-value storage for the session.
///
/// Every call is a single independent put, get or delete.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, AuthError>;
    fn set(&self, key: &str, value: &str) -> Result<(), AuthError>;
    /// Removing a key that does not exist succeeds.
    fn remove(&self, key: &str) -> Result<(), AuthError>;
}

/// One file per key inside a private directory
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, AuthError> {
        let dir = dir.into();

        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| {
                AuthError::Storage(format!("Failed to create storage directory: {}", e))
            })?;
        }

        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, AuthError> {
        match fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AuthError::Storage(format!("Failed to read {}: {}", key, e))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AuthError> {
        let path = self.path(key);
        let write_err =
            |e: std::io::Error| AuthError::Storage(format!("Failed to write {}: {}", key, e));

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        // New files are owner-only (0600) from the moment they exist
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&path).map_err(write_err)?;

        // `mode` only applies on creation; tighten files left by older runs
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .map_err(|e| AuthError::Storage(format!("Failed to set file permissions: {}", e)))?;
        }

        file.write_all(value.as_bytes()).map_err(write_err)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AuthError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::Storage(format!("Failed to delete {}: {}", key, e))),
        }
    }
}

/// In-process storage, lost when the process exits
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, AuthError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AuthError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AuthError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}
