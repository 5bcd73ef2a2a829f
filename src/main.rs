//! # genre-affinity
//!
//! Command-line front end for the genre affinity store. Every invocation loads
//! the store from SQLite, runs one command and, for mutating commands, writes
//! the store back.
//!
//! ## Usage
//!
//! ```bash
//! genre-affinity register Ana rock pop
//! genre-affinity register Bob rock jazz
//! genre-affinity recommend Ana
//! genre-affinity status --json
//! ```

use anyhow::{bail, Result};
use clap::{CommandFactory, Parser};
use genre_affinity::cli::{self, Command};
use genre_affinity::config::RuntimeConfig;
use genre_affinity::recommender::{describe_error, Recommender};
use genre_affinity::store::SharedStore;
use genre_affinity::{completion, db};
use log::{debug, info};
use serde::Serialize;
use std::io;

#[derive(Serialize)]
struct UserListing<'a> {
    name: &'a str,
    genres: Vec<String>,
}

/// Main entry point.
///
/// Logging is controlled via `RUST_LOG`:
/// - `RUST_LOG=debug genre-affinity recommend Ana`
/// - `RUST_LOG=genre_affinity::store=trace genre-affinity register Bob rock pop`
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();

    // Completion scripts do not need the database
    if let Command::Completion { shell } = args.command {
        let mut cmd = cli::Args::command();
        completion::generate_completions(completion::shell_to_completion_shell(shell), &mut cmd);
        return Ok(());
    }

    let config = RuntimeConfig::resolve(args.db, args.strict)?;
    debug!("Runtime configuration: {config:?}");

    let mut conn = db::open(&config.db_path)?;
    let store = db::load_store(&conn, config.genre_policy)?;
    let recommender = Recommender::new(SharedStore::new(store));

    // A failed command returns early and leaves the database untouched
    let mutating = args.command.is_mutating();
    run(args.command, &recommender)?;

    if mutating {
        recommender
            .store()
            .read(|store| db::save_store(&mut conn, store))?;
        info!("Saved store to {}", config.db_path.display());
    }

    Ok(())
}

/// Route one command. Every core failure becomes an error exit carrying the
/// façade's message; "no recommendation" is still a successful run.
fn run(command: Command, recommender: &Recommender) -> Result<()> {
    let store = recommender.store();

    match command {
        Command::Register { name, genres } => match recommender.register(&name, genres.as_slice()) {
            Ok(message) => println!("{message}"),
            Err(err) => bail!(describe_error(&err)),
        },
        Command::Recommend { name, top } => {
            match recommender.recommendation_lines(&name, top.unwrap_or(1)) {
                Ok(lines) => lines.iter().for_each(|line| println!("{line}")),
                Err(err) => bail!(describe_error(&err)),
            }
        }
        Command::AddGenre { name, genre } => {
            match store.write(|store| store.add_genre_to_user(&name, &genre)) {
                Ok(true) => println!("Género '{}' agregado a {}.", genre.trim(), name.trim()),
                Ok(false) => println!("A {} ya le gusta '{}'.", name.trim(), genre.trim()),
                Err(err) => bail!(describe_error(&err)),
            }
        }
        Command::RemoveGenre { name, genre } => {
            match store.write(|store| store.remove_genre_from_user(&name, &genre)) {
                Ok(true) => println!("Género '{}' quitado a {}.", genre.trim(), name.trim()),
                Ok(false) => println!("A {} no le gustaba '{}'.", name.trim(), genre.trim()),
                Err(err) => bail!(describe_error(&err)),
            }
        }
        Command::RemoveUser { name } => match store.write(|store| store.remove_user(&name)) {
            Ok(user) => println!("Usuario eliminado: {user}"),
            Err(err) => bail!(describe_error(&err)),
        },
        Command::Users { json } => store.read(|store| -> Result<()> {
            if json {
                let listing: Vec<UserListing> = store
                    .users()
                    .map(|user| UserListing {
                        name: user.name(),
                        genres: user.sorted_favorites(),
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&listing)?);
            } else {
                for user in store.users() {
                    println!("{user}");
                }
            }
            Ok(())
        })?,
        Command::Genres { known } => {
            if known {
                for genre in Recommender::list_known_genres() {
                    println!("{genre}");
                }
            } else {
                store.read(|store| store.genres().for_each(|genre| println!("{genre}")));
            }
        }
        Command::Status { json } => {
            let status = store.read(|store| store.status());
            if json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                println!("{status}");
            }
        }
        Command::CompleteUsers { shell } => {
            let names = store.read(completion::user_completions);
            completion::write_completions(&mut io::stdout(), &names, shell)?;
        }
        Command::CompleteGenres { shell } => {
            let names = store.read(completion::genre_completions);
            completion::write_completions(&mut io::stdout(), &names, shell)?;
        }
        Command::Completion { .. } => unreachable!("handled before the store is loaded"),
    }

    Ok(())
}
