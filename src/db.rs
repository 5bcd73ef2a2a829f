//! # Database Module
//!
//! SQLite persistence for the affinity store. The CLI loads the whole store at
//! start-up and writes it back after every mutating command, so the tables are
//! a snapshot rather than a log.
//!
//! ## Schema
//!
//! - `users`: identity key (lowercased name) and display name
//! - `user_genres`: one row per (user, canonical genre)
//! - `genres`: every known genre, including ones no user likes anymore
//! - `affinity`: one row per edge, `genre_a < genre_b`, with its weight
//!
//! Stored weights are informational: [`AffinityStore::restore`] recounts them.

use crate::store::{AffinityEdge, AffinityStore, GenrePolicy};
use crate::user::User;
use anyhow::{Context, Result};
use log::{debug, trace};
use rusqlite::{params, Connection};
use std::collections::BTreeMap;
use std::path::Path;

/// Open (or create) the database at `path` and make sure the schema exists.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or the schema cannot be created.
pub fn open(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)
        .with_context(|| format!("Failed to open affinity database at {}", path.display()))?;
    init_schema(&conn)?;
    debug!("Opened affinity database at {}", path.display());
    Ok(conn)
}

/// Create the tables if they do not exist yet
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS users (
            key  TEXT PRIMARY KEY,
            name TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS user_genres (
            user_key TEXT NOT NULL,
            genre    TEXT NOT NULL,
            PRIMARY KEY (user_key, genre),
            FOREIGN KEY (user_key) REFERENCES users(key)
        );
        CREATE TABLE IF NOT EXISTS genres (
            name TEXT PRIMARY KEY
        );
        CREATE TABLE IF NOT EXISTS affinity (
            genre_a TEXT NOT NULL,
            genre_b TEXT NOT NULL,
            weight  INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (genre_a, genre_b),
            CHECK (genre_a < genre_b)
        );
        CREATE INDEX IF NOT EXISTS idx_affinity_b ON affinity(genre_b);",
    )
    .context("Failed to create affinity database schema")?;
    Ok(())
}

/// Load the full store.
///
/// # Errors
///
/// Returns an error if any table cannot be read or a stored user name is blank.
pub fn load_store(conn: &Connection, policy: GenrePolicy) -> Result<AffinityStore> {
    // key -> (display name, genres)
    let mut rows: BTreeMap<String, (String, Vec<String>)> = BTreeMap::new();

    let mut stmt = conn
        .prepare("SELECT key, name FROM users")
        .context("Invalid SQL statement when SELECTing users")?;
    let user_iter = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?;
    for user in user_iter {
        let (key, name) = user.context("Failed to read user row")?;
        rows.insert(key, (name, Vec::new()));
    }

    let mut stmt = conn
        .prepare("SELECT user_key, genre FROM user_genres")
        .context("Invalid SQL statement when SELECTing user genres")?;
    let genre_iter = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?;
    for pair in genre_iter {
        let (key, genre) = pair.context("Failed to read user genre row")?;
        match rows.get_mut(&key) {
            Some((_, genres)) => genres.push(genre),
            None => trace!("Ignoring genre `{genre}' of unknown user `{key}'"),
        }
    }

    let users = rows
        .into_values()
        .map(|(name, genres)| {
            User::with_genres(&name, genres).with_context(|| format!("Corrupt user row `{name}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut stmt = conn
        .prepare("SELECT name FROM genres")
        .context("Invalid SQL statement when SELECTing genres")?;
    let genres = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read genre rows")?;

    let mut stmt = conn
        .prepare("SELECT genre_a, genre_b, weight FROM affinity")
        .context("Invalid SQL statement when SELECTing affinity edges")?;
    let edges = stmt
        .query_map([], |row| {
            Ok(AffinityEdge {
                genre_a: row.get(0)?,
                genre_b: row.get(1)?,
                weight: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read affinity rows")?;

    debug!(
        "Loaded {} users, {} genres, {} edges",
        users.len(),
        genres.len(),
        edges.len()
    );
    Ok(AffinityStore::restore(policy, users, genres, edges))
}

/// Replace the stored snapshot with `store`, in one transaction.
///
/// # Errors
///
/// Returns an error if any statement fails; the previous snapshot is kept.
pub fn save_store(conn: &mut Connection, store: &AffinityStore) -> Result<()> {
    let tx = conn.transaction()?;

    tx.execute_batch(
        "DELETE FROM user_genres;
         DELETE FROM users;
         DELETE FROM genres;
         DELETE FROM affinity;",
    )
    .context("Failed to clear affinity tables")?;

    {
        let mut insert_user = tx.prepare("INSERT INTO users (key, name) VALUES (?1, ?2)")?;
        let mut insert_like =
            tx.prepare("INSERT INTO user_genres (user_key, genre) VALUES (?1, ?2)")?;

        for user in store.users() {
            let key = user.key();
            insert_user
                .execute(params![key, user.name()])
                .with_context(|| format!("Failed to INSERT user `{key}'"))?;
            for genre in user.sorted_favorites() {
                insert_like
                    .execute(params![key, genre])
                    .with_context(|| format!("Failed to INSERT genre `{genre}' for `{key}'"))?;
            }
        }

        let mut insert_genre = tx.prepare("INSERT INTO genres (name) VALUES (?1)")?;
        for genre in store.genres() {
            insert_genre
                .execute(params![genre])
                .with_context(|| format!("Failed to INSERT genre `{genre}'"))?;
        }

        let mut insert_edge =
            tx.prepare("INSERT INTO affinity (genre_a, genre_b, weight) VALUES (?1, ?2, ?3)")?;
        for edge in store.edges() {
            insert_edge
                .execute(params![edge.genre_a, edge.genre_b, edge.weight])
                .with_context(|| format!("Failed to INSERT edge {edge:?}"))?;
        }
    }

    tx.commit().context("Committing SQL transaction failed")?;
    debug!("Saved affinity store: {}", store.status());
    Ok(())
}
