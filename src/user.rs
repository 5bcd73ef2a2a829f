//! A listener and the set of genres they like.
//!
//! User identity is the lowercased name: two users with the same name are equal
//! no matter what they like. The store relies on this to detect duplicate
//! registrations.

use crate::error::{AffinityError, InvalidReason, Result};
use crate::genre::canonicalize;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A named user holding canonical genre names
#[derive(Debug, Clone)]
pub struct User {
    name: String,
    favorite_genres: HashSet<String>,
}

impl User {
    /// Create a user without favorites.
    ///
    /// # Errors
    ///
    /// Returns [`AffinityError::Validation`] if `name` is empty or only whitespace.
    pub fn new(name: &str) -> Result<Self> {
        Self::with_genres(name, std::iter::empty::<&str>())
    }

    /// Create a user with initial favorites.
    ///
    /// Genres are normalized into a set. Blank entries are dropped silently.
    ///
    /// # Errors
    ///
    /// Returns [`AffinityError::Validation`] if `name` is empty or only whitespace.
    pub fn with_genres<I, S>(name: &str, genres: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.trim();
        if name.is_empty() {
            return Err(AffinityError::validation("user name", InvalidReason::Blank));
        }

        let favorite_genres = genres
            .into_iter()
            .filter_map(|genre| canonicalize(genre.as_ref()))
            .collect();

        Ok(Self {
            name: name.to_string(),
            favorite_genres,
        })
    }

    /// Trimmed name, as supplied
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identity key: the lowercased name
    #[must_use]
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Add a genre. Returns `false` if it was already a favorite.
    ///
    /// # Errors
    ///
    /// Returns [`AffinityError::Validation`] for blank input; favorites are left untouched.
    pub fn add_genre(&mut self, genre: &str) -> Result<bool> {
        let genre = canonicalize(genre)
            .ok_or_else(|| AffinityError::validation("genre name", InvalidReason::Blank))?;
        Ok(self.favorite_genres.insert(genre))
    }

    /// Remove a genre. Returns `false` for blank input or a genre that is not a favorite.
    pub fn remove_genre(&mut self, genre: &str) -> bool {
        canonicalize(genre).is_some_and(|genre| self.favorite_genres.remove(&genre))
    }

    #[must_use]
    pub fn likes_genre(&self, genre: &str) -> bool {
        canonicalize(genre).is_some_and(|genre| self.favorite_genres.contains(&genre))
    }

    /// Favorites in alphabetical order
    #[must_use]
    pub fn sorted_favorites(&self) -> Vec<String> {
        let mut favorites: Vec<String> = self.favorite_genres.iter().cloned().collect();
        favorites.sort();
        favorites
    }

    #[must_use]
    pub fn favorite_count(&self) -> usize {
        self.favorite_genres.len()
    }

    #[must_use]
    pub fn favorite_genres(&self) -> &HashSet<String> {
        &self.favorite_genres
    }

    /// Genres both users like
    #[must_use]
    pub fn shared_genres_with(&self, other: &User) -> HashSet<String> {
        self.favorite_genres
            .intersection(&other.favorite_genres)
            .cloned()
            .collect()
    }

    /// Whether this user likes both genres of a pair (given in canonical form)
    pub(crate) fn likes_both(&self, a: &str, b: &str) -> bool {
        self.favorite_genres.contains(a) && self.favorite_genres.contains(b)
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for User {}

impl Hash for User {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for User {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for User {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let genres = if self.favorite_genres.is_empty() {
            "ninguno".to_string()
        } else {
            self.sorted_favorites().join(", ")
        };
        write!(f, "Usuario: {} | Géneros favoritos: {}", self.name, genres)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_name() {
        let user = User::new("  Ana ").unwrap();
        assert_eq!(user.name(), "Ana");
        assert_eq!(user.key(), "ana");
        assert_eq!(user.favorite_count(), 0);
    }

    #[test]
    fn test_new_rejects_blank_name() {
        assert!(User::new("").unwrap_err().is_validation());
        assert!(User::with_genres("  ", ["rock"]).unwrap_err().is_validation());
    }

    #[test]
    fn test_initial_genres_are_normalized() {
        let user = User::with_genres("ana", ["Rock", " rock ", "", "   ", "JAZZ"]).unwrap();
        assert_eq!(user.sorted_favorites(), vec!["jazz", "rock"]);
    }

    #[test]
    fn test_add_genre_is_idempotent() {
        let mut user = User::new("ana").unwrap();
        assert!(user.add_genre("Rock").unwrap());
        assert!(!user.add_genre("rock ").unwrap());
        assert_eq!(user.favorite_count(), 1);
    }

    #[test]
    fn test_add_blank_genre_fails_without_mutation() {
        let mut user = User::with_genres("ana", ["pop"]).unwrap();
        assert!(user.add_genre("  ").unwrap_err().is_validation());
        assert_eq!(user.sorted_favorites(), vec!["pop"]);
    }

    #[test]
    fn test_add_then_remove_round_trip() {
        let mut user = User::new("ana").unwrap();
        user.add_genre("Jazz").unwrap();
        assert!(user.remove_genre("jazz"));
        assert_eq!(user.favorite_count(), 0);
        assert!(!user.likes_genre("Jazz"));
    }

    #[test]
    fn test_remove_is_tolerant() {
        let mut user = User::with_genres("ana", ["pop"]).unwrap();
        assert!(!user.remove_genre(""));
        assert!(!user.remove_genre("rock"));
        assert!(user.likes_genre(" POP"));
        assert!(!user.likes_genre(""));
    }

    #[test]
    fn test_shared_genres() {
        let a = User::with_genres("a", ["rock", "pop", "jazz"]).unwrap();
        let b = User::with_genres("b", ["Pop", "Jazz", "trap"]).unwrap();
        let shared = a.shared_genres_with(&b);
        assert_eq!(shared.len(), 2);
        assert!(shared.contains("pop"));
        assert!(shared.contains("jazz"));
    }

    #[test]
    fn test_identity_is_case_insensitive_name() {
        let a = User::with_genres("Ana", ["rock"]).unwrap();
        let b = User::with_genres("ANA ", ["jazz"]).unwrap();
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(!set.insert(b));

        let mut users = vec![User::new("zoe").unwrap(), User::new("Bea").unwrap()];
        users.sort();
        assert_eq!(users[0].name(), "Bea");
    }

    #[test]
    fn test_display() {
        let user = User::with_genres("Ana", ["rock", "blues"]).unwrap();
        assert_eq!(user.to_string(), "Usuario: Ana | Géneros favoritos: blues, rock");
        let empty = User::new("Bob").unwrap();
        assert_eq!(empty.to_string(), "Usuario: Bob | Géneros favoritos: ninguno");
    }
}
