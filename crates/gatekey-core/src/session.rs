//! Session token storage and retrieval.
//!
//! Persists the auth token and user profile in `<base>/session.json` with
//! restricted permissions (0600). Tokens are never logged.
//!
//! Reads are infallible by design: a missing, unreadable, or corrupt session
//! file reads as "not signed in". Writes go through load-modify-save on the
//! whole file; access is single-threaded and user-triggered, so last write
//! wins.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::paths;

/// Persisted session contents.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct SessionFile {
    /// Opaque token returned by the authentication API.
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    /// User profile blob as returned by the API.
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<Value>,
}

/// File-backed session store.
///
/// The sole writer of persisted session state; screens and the CLI hold a
/// store and re-read it after each mutation instead of caching an auth flag.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Creates a store over the default session path.
    pub fn new() -> Self {
        Self {
            path: paths::session_path(),
        }
    }

    /// Creates a store rooted at a specific directory (used by tests).
    pub fn at(dir: &std::path::Path) -> Self {
        Self {
            path: dir.join("session.json"),
        }
    }

    /// Stores the auth token, preserving any stored user profile.
    pub fn set_token(&self, token: &str) -> Result<()> {
        let mut file = self.read();
        file.token = Some(token.to_string());
        self.write(&file)
    }

    /// Returns the stored token, or `None` when signed out.
    pub fn token(&self) -> Option<String> {
        self.read().token
    }

    /// Stores the user profile, preserving any stored token.
    pub fn set_user(&self, user: &Value) -> Result<()> {
        let mut file = self.read();
        file.user = Some(user.clone());
        self.write(&file)
    }

    /// Returns the stored user profile, or `None`.
    pub fn user(&self) -> Option<Value> {
        self.read().user
    }

    /// Removes both the token and the user profile.
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        }
        Ok(())
    }

    /// Returns true iff a token is present.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    fn read(&self) -> SessionFile {
        let Ok(contents) = fs::read_to_string(&self.path) else {
            return SessionFile::default();
        };
        serde_json::from_str(&contents).unwrap_or_default()
    }

    fn write(&self, file: &SessionFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(file).context("Failed to serialize session")?;

        // Write with restricted permissions
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut out = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            out.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
