//! Path resolution for phonebook configuration files.
//!
//! All configuration lives under `~/.config/phonebook/`:
//!
//! ```text
//! ~/.config/phonebook/
//! └── secret.json              # API keys
//! ```
//!
//! The contact database location is runtime-configurable
//! (`PHONEBOOK_DB_PATH`) and is not resolved here.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for the phonebook.
pub struct PhonebookPaths;

impl PhonebookPaths {
    /// Returns the phonebook configuration directory
    /// (`~/.config/phonebook`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        let home = dirs::home_dir().ok_or(PathError::HomeDirNotFound)?;
        Ok(home.join(".config").join("phonebook"))
    }

    /// Returns the path to the secret file
    /// (`~/.config/phonebook/secret.json`).
    pub fn secret_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("secret.json"))
    }
}
