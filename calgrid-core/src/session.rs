//! The signed-in session.
//!
//! The identity provider lives on the service side; the client only stores
//! the token it was issued plus the user's profile, and never refreshes or
//! mints tokens itself.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CalGridError, CalGridResult};

/// Display identity of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    token: String,
    pub user: UserProfile,
}

impl Session {
    pub fn new(token: String, user: UserProfile) -> Self {
        Session { token, user }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    fn path() -> CalGridResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalGridError::Config("Could not determine config directory".into()))?
            .join("calgrid");

        Ok(config_dir.join("session.toml"))
    }

    /// Load the stored session. A missing file means the user has not signed
    /// in on this machine.
    pub fn load() -> CalGridResult<Self> {
        Self::load_from(&Self::path()?)
    }

    pub fn save(&self) -> CalGridResult<()> {
        self.save_to(&Self::path()?)
    }

    /// Remove the stored session (sign out). A missing file is fine.
    pub fn clear() -> CalGridResult<()> {
        let path = Self::path()?;
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    fn load_from(path: &Path) -> CalGridResult<Self> {
        if !path.exists() {
            return Err(CalGridError::SignInRequired);
        }
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| CalGridError::Serialization(e.to_string()))
    }

    fn save_to(&self, path: &Path) -> CalGridResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw =
            toml::to_string_pretty(self).map_err(|e| CalGridError::Serialization(e.to_string()))?;
        std::fs::write(path, raw)?;
        Ok(())
    }
}
