//! Session file I/O

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::session as session_config;
use crate::error::{CfError, Result};

use super::models::Session;

/// Handles reading and writing the session file
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Create a store using the default path (~/.cfctl/session.json)
    pub fn new() -> Self {
        Self {
            path: Self::default_path(),
        }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at `path` when given, otherwise at the default location
    pub fn from_option(path: Option<PathBuf>) -> Self {
        path.map(Self::with_path).unwrap_or_default()
    }

    fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(session_config::DIR_NAME)
            .join(session_config::FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the session.
    /// Returns None if the file doesn't exist, errors on corrupt JSON.
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            CfError::Session(format!(
                "Failed to read session file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        serde_json::from_str(&content).map(Some).map_err(|e| {
            CfError::Session(format!(
                "Failed to parse session file {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Save the session.
    /// Uses atomic write (tmp file + rename) and creates parent dir if needed.
    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                CfError::Session(format!(
                    "Failed to create session directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let json = serde_json::to_string_pretty(session)?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, &json).map_err(|e| {
            CfError::Session(format!(
                "Failed to write temp session file {}: {}",
                tmp_path.display(),
                e
            ))
        })?;

        // Tokens inside, owner-only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&tmp_path, permissions).map_err(|e| {
                CfError::Session(format!("Failed to set permissions on session file: {}", e))
            })?;
        }

        fs::rename(&tmp_path, &self.path).map_err(|e| {
            CfError::Session(format!(
                "Failed to rename temp session file to {}: {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Delete the session file. Returns whether a file was removed.
    pub fn remove(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path).map_err(|e| {
            CfError::Session(format!(
                "Failed to remove session file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(true)
    }
}
