//! Presentation-facing façade over the [`SharedStore`].
//!
//! Turns store outcomes, errors included, into the human-readable lines the
//! CLI prints. The recommendation line keeps a fixed template so other front
//! ends can parse it:
//!
//! ```text
//! Te recomendamos: <Genre> (score: <N>)
//! ```

use crate::error::{AffinityError, InvalidReason, Result};
use crate::genre::{title_case, Genre};
use crate::store::{Recommendation, SharedStore};
use crate::user::User;
use log::{debug, info};

/// Shown when the user has no candidate genre
pub const NO_RECOMMENDATION: &str = "No se encontraron recomendaciones.";

/// Text façade for registration and recommendation
#[derive(Debug, Clone)]
pub struct Recommender {
    store: SharedStore,
}

impl Recommender {
    #[must_use]
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Register a user. Always returns a message, never fails.
    pub fn register_user<S: AsRef<str>>(&self, name: &str, genres: &[S]) -> String {
        self.register(name, genres)
            .unwrap_or_else(|err| describe_error(&err))
    }

    /// Register a user and return the confirmation line.
    ///
    /// # Errors
    ///
    /// Whatever [`crate::store::AffinityStore::register_user`] rejects.
    pub fn register<S: AsRef<str>>(&self, name: &str, genres: &[S]) -> Result<String> {
        let (key, count) = self.store.write(|store| {
            let key = store.register_user(name, genres)?;
            let count = store.user(&key).map_or(0, User::favorite_count);
            Ok::<_, AffinityError>((key, count))
        })?;

        info!("Registered `{key}' with {count} genres");
        Ok(format!("Usuario '{}' registrado con {count} géneros.", name.trim()))
    }

    /// Best genre for `username`, formatted for display. Never fails.
    pub fn recommend(&self, username: &str) -> String {
        match self.store.read(|store| store.recommend(username)) {
            Ok(Some(recommendation)) => {
                debug!("Recommending {recommendation:?} to `{username}'");
                format_recommendation(&recommendation)
            }
            Ok(None) => NO_RECOMMENDATION.to_string(),
            Err(err) => describe_error(&err),
        }
    }

    /// Up to `limit` recommendation lines, best first
    pub fn recommend_top(&self, username: &str, limit: usize) -> Vec<String> {
        self.recommendation_lines(username, limit)
            .unwrap_or_else(|err| vec![describe_error(&err)])
    }

    /// Up to `limit` recommendation lines, or [`NO_RECOMMENDATION`] alone.
    ///
    /// # Errors
    ///
    /// [`AffinityError::NotFound`] for an unknown user.
    pub fn recommendation_lines(&self, username: &str, limit: usize) -> Result<Vec<String>> {
        let ranked = self
            .store
            .read(|store| store.top_recommendations(username, limit))?;

        if ranked.is_empty() {
            return Ok(vec![NO_RECOMMENDATION.to_string()]);
        }
        Ok(ranked.iter().map(format_recommendation).collect())
    }

    /// Sorted reference catalog
    #[must_use]
    pub fn list_known_genres() -> Vec<String> {
        Genre::known_genres()
    }
}

/// `Te recomendamos: <Genre> (score: <N>)`
#[must_use]
pub fn format_recommendation(recommendation: &Recommendation) -> String {
    format!(
        "Te recomendamos: {} (score: {})",
        title_case(&recommendation.genre),
        recommendation.score
    )
}

/// User-facing text for a core error
#[must_use]
pub fn describe_error(err: &AffinityError) -> String {
    match err {
        AffinityError::Conflict(name) => format!("El usuario ya existe: {name}"),
        AffinityError::NotFound(name) => format!("Usuario no encontrado: {name}"),
        AffinityError::Validation { field, reason } => {
            let field = match *field {
                "genre name" => "nombre de género",
                "user name" => "nombre de usuario",
                other => other,
            };
            match reason {
                InvalidReason::Blank => format!("Dato inválido ({field}): no puede estar vacío"),
                InvalidReason::NotInCatalog(genre) => {
                    format!("Dato inválido ({field}): '{genre}' no es un género conocido")
                }
            }
        }
    }
}
