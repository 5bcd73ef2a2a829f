//! # Shell Completion Module
//!
//! - Generation of completion scripts through `clap_complete`
//! - Dynamic user and genre names for completion scripts (hidden commands)
//!
//! ## Usage
//!
//! ```bash
//! genre-affinity completion bash > ~/.local/share/bash-completion/completions/genre-affinity
//! genre-affinity completion zsh > ~/.config/zsh/completions/_genre-affinity
//! ```

use crate::cli::Shell;
use crate::store::AffinityStore;
use clap::Command;
use clap_complete::{generate, Generator, Shell as CompletionShell};
use std::io::{self, Write};

/// Generate shell completions for the given shell
pub fn generate_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

/// Convert our Shell enum to clap_complete's Shell enum
#[must_use]
pub fn shell_to_completion_shell(shell: Shell) -> CompletionShell {
    match shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    }
}

/// Registered user names, sorted
#[must_use]
pub fn user_completions(store: &AffinityStore) -> Vec<String> {
    store.users().map(|user| user.name().to_string()).collect()
}

/// Known genres plus the reference catalog, sorted and deduplicated
#[must_use]
pub fn genre_completions(store: &AffinityStore) -> Vec<String> {
    let mut genres: Vec<String> = store
        .genres()
        .map(str::to_string)
        .chain(crate::genre::Genre::known_genres())
        .collect();
    genres.sort();
    genres.dedup();
    genres
}

/// Write one completion per line.
///
/// Fish handles escaping itself; other shells get whitespace backslash-escaped.
pub fn write_completions<W: Write>(out: &mut W, names: &[String], shell: Option<Shell>) -> io::Result<()> {
    for name in names {
        match shell {
            Some(Shell::Fish) => writeln!(out, "{name}")?,
            _ => writeln!(out, "{}", escape_whitespace(name))?,
        }
    }
    Ok(())
}

fn escape_whitespace(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_whitespace() {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
