//! # Command-Line Interface Module
//!
//! Clap derive definitions for the `genre-affinity` binary.
//!
//! ## Commands
//!
//! - `register`: Add a user with their favorite genres
//! - `recommend`: Suggest the next genre for a user
//! - `add-genre` / `remove-genre`: Edit a user's favorites
//! - `remove-user`: Forget a user
//! - `users`, `genres`, `status`: Inspect the store
//!
//! ## Examples
//!
//! ```bash
//! genre-affinity register Ana rock "hip hop"
//! genre-affinity recommend Ana --top 3
//! genre-affinity --strict register Bob jazz blues
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

/// Main application arguments structure.
#[derive(Parser, Debug)]
#[command(name = "genre-affinity")]
#[command(about = "Recommend music genres from shared listeners")]
#[command(version)]
pub struct Args {
    /// Database file (defaults to the platform data directory)
    #[arg(long, global = true, env = "GENRE_AFFINITY_DB", value_hint = clap::ValueHint::FilePath)]
    pub db: Option<PathBuf>,

    /// Only accept genres from the reference catalog
    ///
    /// The environment variable accepts the usual boolean spellings
    /// (`1`, `true`, `yes`, `on` and their negations).
    #[arg(
        long,
        global = true,
        env = "GENRE_AFFINITY_STRICT",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub strict: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Enumeration of all available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Register a new user with their favorite genres
    ///
    /// Genre names are trimmed and lowercased. Registering a name that
    /// already exists (case-insensitive) is refused.
    Register {
        /// User name
        name: String,

        /// Favorite genres
        genres: Vec<String>,
    },

    /// Recommend a genre the user does not like yet
    ///
    /// Candidates are genres related to the user's favorites through other
    /// listeners; the one with the highest summed affinity wins.
    Recommend {
        /// User name
        name: String,

        /// Show up to N ranked recommendations instead of one
        #[arg(long, value_name = "N")]
        top: Option<usize>,
    },

    /// Add a genre to a user's favorites
    AddGenre {
        name: String,
        genre: String,
    },

    /// Remove a genre from a user's favorites
    RemoveGenre {
        name: String,
        genre: String,
    },

    /// Remove a user and their contribution to every affinity
    RemoveUser {
        name: String,
    },

    /// List registered users and their genres
    Users {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List genres known to the store
    Genres {
        /// Print the reference catalog instead
        #[arg(long)]
        known: bool,
    },

    /// Show user, genre and edge counts
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    ///
    /// Usage: genre-affinity completion bash > ~/.local/share/bash-completion/completions/genre-affinity
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },

    /// List user names for completion (hidden command)
    #[command(hide = true)]
    CompleteUsers {
        #[arg(long)]
        shell: Option<Shell>,
    },

    /// List genre names for completion (hidden command)
    #[command(hide = true)]
    CompleteGenres {
        #[arg(long)]
        shell: Option<Shell>,
    },
}

impl Command {
    /// Whether the command changes the store and needs saving
    #[must_use]
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::Register { .. }
                | Self::AddGenre { .. }
                | Self::RemoveGenre { .. }
                | Self::RemoveUser { .. }
        )
    }
}
