//! Error types for the phonebook application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, PhonebookError>;

/// A shared error type for the entire phonebook application.
///
/// This provides typed, structured error variants so callers can react to
/// the failure class (not-found vs conflict vs validation) instead of
/// matching on message text.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum PhonebookError {
    /// Lookup target absent (read, update, delete or confirm miss)
    #[error("Not found: {entity} '{key}'")]
    NotFound { entity: &'static str, key: String },

    /// Duplicate contact name on insert
    #[error("Contact '{name}' already exists")]
    Conflict { name: String },

    /// A required field was missing for the requested action
    #[error("Validation error: {0}")]
    Validation(String),

    /// The language backend failed to produce a usable command
    #[error("Interpretation error: {0}")]
    Interpretation(String),

    /// Data access error (repository/storage layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PhonebookError {
    /// Creates a NotFound error
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key: key.into(),
        }
    }

    /// Creates a Conflict error
    pub fn conflict(name: impl Into<String>) -> Self {
        Self::Conflict { name: name.into() }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an Interpretation error
    pub fn interpretation(message: impl Into<String>) -> Self {
        Self::Interpretation(message.into())
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a Conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a Config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
