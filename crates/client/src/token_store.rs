//! Session token persistence for the login collaborator.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use advision_core::error::TokenStoreError;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::TokenPair;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub stored_at: DateTime<Utc>,
}

impl StoredTokens {
    pub fn from_pair(pair: &TokenPair) -> Self {
        Self {
            access_token: pair.access.clone(),
            refresh_token: pair.refresh.clone(),
            stored_at: Utc::now(),
        }
    }
}

pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<StoredTokens>, TokenStoreError>;
    fn save(&self, tokens: &StoredTokens) -> Result<(), TokenStoreError>;
    fn clear(&self) -> Result<(), TokenStoreError>;
}

/// In-process store for tests and short-lived sessions.
#[derive(Default)]
pub struct MemoryTokenStore {
    tokens: Mutex<Option<StoredTokens>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<StoredTokens>, TokenStoreError> {
        Ok(self.tokens.lock().clone())
    }

    fn save(&self, tokens: &StoredTokens) -> Result<(), TokenStoreError> {
        *self.tokens.lock() = Some(tokens.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        self.tokens.lock().take();
        Ok(())
    }
}

/// JSON file store. A missing file means "not logged in".
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
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<StoredTokens>, TokenStoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, tokens: &StoredTokens) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(tokens)?)?;
        debug!(path = %self.path.display(), "session tokens saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
