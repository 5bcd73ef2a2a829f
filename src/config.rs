//! # Configuration Module
//!
//! Data directory and runtime settings for the CLI.
//!
//! ## Data Storage
//!
//! The affinity database lives in the platform-standard data directory:
//! - Linux: `~/.local/share/genre-affinity/affinity.db`
//! - macOS: `~/Library/Application Support/genre-affinity/affinity.db`
//! - Windows: `%APPDATA%\genre-affinity\affinity.db`
//!
//! Both the path and the genre policy can be overridden from the command line
//! or the environment (`GENRE_AFFINITY_DB`, `GENRE_AFFINITY_STRICT`).

use crate::store::GenrePolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "genre-affinity";
const DB_FILE: &str = "affinity.db";

/// Returns the platform-appropriate data directory, creating it if needed.
///
/// # Errors
///
/// This function will return an error if:
/// - The system data directory cannot be determined
/// - The subdirectory cannot be created due to permissions
pub fn get_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| {
        anyhow::anyhow!(
            "Could not determine system data directory. Use --db to choose a database file."
        )
    })?;

    let app_dir = data_dir.join(APP_DIR);
    fs::create_dir_all(&app_dir).with_context(|| {
        format!(
            "Failed to create data directory at {}. Please check file permissions.",
            app_dir.display()
        )
    })?;

    Ok(app_dir)
}

/// Returns the default database file path.
///
/// # Examples
///
/// ```no_run
/// use genre_affinity::config::get_db_path;
///
/// let db_path = get_db_path()?;
/// println!("Database location: {}", db_path.display());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn get_db_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join(DB_FILE))
}

/// Configuration for runtime behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Path to the database file
    pub db_path: PathBuf,
    /// Which genres users may declare
    pub genre_policy: GenrePolicy,
}

impl RuntimeConfig {
    /// Resolve the configuration from optional overrides.
    ///
    /// An explicit `db_path` is used as-is, after creating its parent
    /// directory; otherwise the platform default applies.
    pub fn resolve(db_path: Option<PathBuf>, strict: bool) -> Result<Self> {
        let db_path = match db_path {
            Some(path) => {
                ensure_parent(&path)?;
                path
            }
            None => get_db_path()?,
        };

        let genre_policy = if strict {
            GenrePolicy::CatalogOnly
        } else {
            GenrePolicy::Permissive
        };

        Ok(Self {
            db_path,
            genre_policy,
        })
    }

    /// Create configuration with explicit database path
    #[must_use]
    pub fn with_db_path(db_path: PathBuf) -> Self {
        Self {
            db_path,
            genre_policy: GenrePolicy::default(),
        }
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display())),
        _ => Ok(()),
    }
}
