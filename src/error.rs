//! Error types for the affinity model.
//!
//! Everything the core can reject on end-user input is a typed, recoverable
//! outcome. "No recommendation" is not an error: [`crate::store::AffinityStore::recommend`]
//! returns `Ok(None)` for it.

use std::fmt;
use thiserror::Error;

/// Result type for core model operations
pub type Result<T> = std::result::Result<T, AffinityError>;

/// Failures raised by [`crate::genre`], [`crate::user`] and [`crate::store`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AffinityError {
    /// Empty or malformed genre/user name, or a genre outside the catalog
    /// when the store only accepts catalog genres
    #[error("Invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: InvalidReason,
    },

    /// A user with the same (case-insensitive) name is already registered
    #[error("User already exists: {0}")]
    Conflict(String),

    /// The named user is not registered
    #[error("User not found: {0}")]
    NotFound(String),
}

/// Why a name was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    /// Empty, whitespace-only or missing
    Blank,
    /// Canonical genre name outside the reference catalog
    NotInCatalog(String),
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => write!(f, "must be a non-empty string"),
            Self::NotInCatalog(genre) => write!(f, "`{genre}' is not a known genre"),
        }
    }
}

impl AffinityError {
    pub(crate) fn validation(field: &'static str, reason: InvalidReason) -> Self {
        Self::Validation { field, reason }
    }

    /// Whether this is a validation failure
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
