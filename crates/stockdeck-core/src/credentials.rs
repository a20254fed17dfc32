// ── Credential persistence ──
//
// Two named slots -- the bearer token and the last-known profile --
// written and cleared together, so a half-cleared store can never claim
// a session that has no identity. The file implementation is the
// persistent-browser-storage analog for a terminal client.

use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CoreError;
use crate::model::Identity;

/// What the store persists: the opaque bearer token plus the cached
/// profile it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub token: String,
    pub profile: Identity,
}

/// Abstract persistence for session credentials.
///
/// Implementations are plain key-value slots with no logic of their own;
/// the session manager decides when to save and clear.
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Result<Option<StoredCredentials>, CoreError>;
    fn save(&self, credentials: &StoredCredentials) -> Result<(), CoreError>;
    fn clear(&self) -> Result<(), CoreError>;
}

// ── File-backed store ───────────────────────────────────────────────

/// JSON file in the platform data directory.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<StoredCredentials>, CoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(CoreError::CredentialStore {
                    message: format!("failed to read {}: {e}", self.path.display()),
                });
            }
        };

        let credentials =
            serde_json::from_str(&raw).map_err(|e| CoreError::CredentialStore {
                message: format!("corrupt session file {}: {e}", self.path.display()),
            })?;
        Ok(Some(credentials))
    }

    fn save(&self, credentials: &StoredCredentials) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CoreError::CredentialStore {
                message: format!("failed to create {}: {e}", parent.display()),
            })?;
        }

        let raw = serde_json::to_string_pretty(credentials)
            .map_err(|e| CoreError::Internal(format!("failed to serialize session: {e}")))?;
        std::fs::write(&self.path, raw).map_err(|e| CoreError::CredentialStore {
            message: format!("failed to write {}: {e}", self.path.display()),
        })?;

        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), CoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CoreError::CredentialStore {
                message: format!("failed to remove {}: {e}", self.path.display()),
            }),
        }
    }
}

// ── In-memory store ─────────────────────────────────────────────────

/// Process-local slot, used by tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryCredentialStore {
    slot: Mutex<Option<StoredCredentials>>,
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<StoredCredentials>, CoreError> {
        Ok(self
            .slot
            .lock()
            .map_err(|_| CoreError::Internal("credential slot poisoned".into()))?
            .clone())
    }

    fn save(&self, credentials: &StoredCredentials) -> Result<(), CoreError> {
        *self
            .slot
            .lock()
            .map_err(|_| CoreError::Internal("credential slot poisoned".into()))? =
            Some(credentials.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), CoreError> {
        *self
            .slot
            .lock()
            .map_err(|_| CoreError::Internal("credential slot poisoned".into()))? = None;
        Ok(())
    }
}
