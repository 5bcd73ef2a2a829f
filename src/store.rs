//! # Affinity Store
//!
//! Single source of truth for users, genres and the weighted relation between
//! genre pairs.
//!
//! ## Edges
//!
//! An edge joins two distinct canonical genres and is stored once, with the
//! alphabetically smaller genre first. Its weight is the exact number of
//! registered users who currently like both genres.
//!
//! Edges are created lazily, the first time two genres appear together in one
//! user's favorites. Every mutating call recounts the weight of each edge it
//! touches from the current user set, so weights never drift under arbitrary
//! add/remove sequences. Edges are never deleted: a weight can fall back to 0
//! and the edge stays, still marking the two genres as related.
//!
//! ## Recommendations
//!
//! For a user with favorites `L`, the candidates are all genres joined by an
//! edge to some genre in `L`, minus `L` itself. A candidate's score is the sum
//! of the weights of its edges into `L`. The highest score wins and ties go to
//! the alphabetically smaller genre.
//!
//! ## Cost
//!
//! Recounting an edge is O(users). A mutation touches at most the pair closure
//! of one user's favorites, which is fine at the scale this targets (tens to
//! low hundreds of users).

use crate::error::{AffinityError, InvalidReason, Result};
use crate::genre::{canonicalize, Genre};
use crate::user::User;
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Which genres the store accepts from users
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenrePolicy {
    /// Any non-empty genre name
    #[default]
    Permissive,
    /// Only genres of the reference catalog
    CatalogOnly,
}

/// Best-next-genre answer for a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Canonical genre name
    pub genre: String,
    /// Sum of edge weights between `genre` and the user's favorites
    pub score: u32,
}

/// One stored edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffinityEdge {
    pub genre_a: String,
    pub genre_b: String,
    pub weight: u32,
}

/// Read-only counts for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub users: usize,
    pub genres: usize,
    pub edges: usize,
    /// Edges with a weight above zero
    pub weighted_edges: usize,
}

impl fmt::Display for StatusSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "users: {}, genres: {}, edges: {} ({} weighted)",
            self.users, self.genres, self.edges, self.weighted_edges
        )
    }
}

type PairKey = (String, String);

/// Order two canonical genres into an edge key. Identical genres never form an edge.
fn pair_key(a: &str, b: &str) -> Option<PairKey> {
    match a.cmp(b) {
        std::cmp::Ordering::Less => Some((a.to_string(), b.to_string())),
        std::cmp::Ordering::Greater => Some((b.to_string(), a.to_string())),
        std::cmp::Ordering::Equal => None,
    }
}

/// Every unordered pair of a sorted, deduplicated genre list
fn pair_closure(sorted: &[String]) -> Vec<PairKey> {
    sorted
        .iter()
        .enumerate()
        .flat_map(|(i, a)| sorted[i + 1..].iter().map(move |b| (a.clone(), b.clone())))
        .collect()
}

/// Owned store of users, genres and affinity edges
#[derive(Debug, Clone, Default)]
pub struct AffinityStore {
    policy: GenrePolicy,
    /// Keyed by lowercased user name
    users: BTreeMap<String, User>,
    genres: BTreeSet<String>,
    edges: BTreeMap<PairKey, u32>,
}

impl AffinityStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_policy(policy: GenrePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn policy(&self) -> GenrePolicy {
        self.policy
    }

    /// Add every catalog genre to the known genres. Returns how many were new.
    pub fn seed_catalog(&mut self) -> usize {
        Genre::known_genres()
            .into_iter()
            .filter(|name| self.genres.insert(name.clone()))
            .count()
    }

    /// Rebuild a store from persisted rows.
    ///
    /// Stored weights are not trusted: every edge is recounted from `users`,
    /// and any pair of a user's favorites without an edge gets one.
    pub fn restore<G, E>(policy: GenrePolicy, users: Vec<User>, genres: G, edges: E) -> Self
    where
        G: IntoIterator<Item = String>,
        E: IntoIterator<Item = AffinityEdge>,
    {
        let mut store = Self::with_policy(policy);
        store.genres.extend(genres);

        for user in users {
            store.genres.extend(user.favorite_genres().iter().cloned());
            store.users.insert(user.key(), user);
        }

        for edge in edges {
            let Some(key) = pair_key(&edge.genre_a, &edge.genre_b) else {
                warn!("Skipping self-edge on `{}'", edge.genre_a);
                continue;
            };
            let weight = store.count_co_listeners(&key.0, &key.1);
            if weight != edge.weight {
                warn!(
                    "Stored weight {} for ({}, {}) corrected to {}",
                    edge.weight, key.0, key.1, weight
                );
            }
            store.genres.insert(key.0.clone());
            store.genres.insert(key.1.clone());
            store.edges.insert(key, weight);
        }

        let closures: Vec<PairKey> = store
            .users
            .values()
            .flat_map(|user| pair_closure(&user.sorted_favorites()))
            .collect();
        for (a, b) in closures {
            store.refresh_pair(&a, &b);
        }

        debug!("Restored affinity store: {}", store.status());
        store
    }

    /// Register a new user and refresh the edges among their genres.
    ///
    /// Returns the user's identity key (lowercased name).
    ///
    /// # Errors
    ///
    /// - [`AffinityError::Validation`] for a blank name, or a genre outside the
    ///   catalog under [`GenrePolicy::CatalogOnly`]
    /// - [`AffinityError::Conflict`] if the name is already registered
    ///
    /// Nothing is stored when an error is returned.
    pub fn register_user<I, S>(&mut self, name: &str, genres: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let user = User::with_genres(name, genres)?;
        let key = user.key();

        if self.users.contains_key(&key) {
            return Err(AffinityError::Conflict(user.name().to_string()));
        }

        let favorites = user.sorted_favorites();
        for genre in &favorites {
            self.check_policy(genre)?;
        }

        self.genres.extend(favorites.iter().cloned());
        self.users.insert(key.clone(), user);

        for (a, b) in pair_closure(&favorites) {
            self.refresh_pair(&a, &b);
        }

        debug!("Registered user `{key}' with {} genres", favorites.len());
        Ok(key)
    }

    /// Add a genre to a registered user's favorites and refresh its edges.
    ///
    /// Returns `false` if the user already liked it.
    ///
    /// # Errors
    ///
    /// [`AffinityError::NotFound`] for an unknown user, [`AffinityError::Validation`]
    /// for a blank or (under `CatalogOnly`) uncatalogued genre.
    pub fn add_genre_to_user(&mut self, username: &str, genre: &str) -> Result<bool> {
        let key = user_key(username);
        if !self.users.contains_key(&key) {
            return Err(AffinityError::NotFound(username.trim().to_string()));
        }

        let canonical = Genre::new(genre)?.canonical_name().to_string();
        self.check_policy(&canonical)?;

        let Some(user) = self.users.get_mut(&key) else {
            return Err(AffinityError::NotFound(username.trim().to_string()));
        };

        if !user.add_genre(&canonical)? {
            return Ok(false);
        }

        let others: Vec<String> = user
            .favorite_genres()
            .iter()
            .filter(|other| **other != canonical)
            .cloned()
            .collect();

        self.genres.insert(canonical.clone());
        for other in others {
            self.refresh_pair(&canonical, &other);
        }

        debug!("User `{key}' now likes `{canonical}'");
        Ok(true)
    }

    /// Remove a genre from a registered user's favorites and recount every edge
    /// touching it.
    ///
    /// Returns `false` if the user did not like it (or the input is blank).
    ///
    /// # Errors
    ///
    /// [`AffinityError::NotFound`] for an unknown user.
    pub fn remove_genre_from_user(&mut self, username: &str, genre: &str) -> Result<bool> {
        let key = user_key(username);
        let user = self
            .users
            .get_mut(&key)
            .ok_or_else(|| AffinityError::NotFound(username.trim().to_string()))?;

        if !user.remove_genre(genre) {
            return Ok(false);
        }

        if let Some(canonical) = canonicalize(genre) {
            let touching: Vec<PairKey> = self
                .edges
                .keys()
                .filter(|(a, b)| *a == canonical || *b == canonical)
                .cloned()
                .collect();
            for (a, b) in touching {
                self.recount_existing(&a, &b);
            }
            debug!("User `{key}' no longer likes `{canonical}'");
        }

        Ok(true)
    }

    /// Remove a registered user and recount the edges among their genres.
    ///
    /// # Errors
    ///
    /// [`AffinityError::NotFound`] for an unknown user.
    pub fn remove_user(&mut self, username: &str) -> Result<User> {
        let key = user_key(username);
        let user = self
            .users
            .remove(&key)
            .ok_or_else(|| AffinityError::NotFound(username.trim().to_string()))?;

        for (a, b) in pair_closure(&user.sorted_favorites()) {
            self.recount_existing(&a, &b);
        }

        debug!("Removed user `{key}'");
        Ok(user)
    }

    /// Recount the weight of one pair from current membership.
    ///
    /// Returns whether the edge existed or was created. An edge is only created
    /// when at least one user likes both genres; blank or identical genres never
    /// form an edge.
    pub fn update_genre_similarity(&mut self, g1: &str, g2: &str) -> bool {
        let (Some(a), Some(b)) = (canonicalize(g1), canonicalize(g2)) else {
            return false;
        };
        let Some((a, b)) = pair_key(&a, &b) else {
            return false;
        };

        let weight = self.count_co_listeners(&a, &b);
        if weight == 0 && !self.edges.contains_key(&(a.clone(), b.clone())) {
            return false;
        }

        trace!("Edge ({a}, {b}) = {weight}");
        self.genres.insert(a.clone());
        self.genres.insert(b.clone());
        self.edges.insert((a, b), weight);
        true
    }

    /// Best genre the user does not like yet.
    ///
    /// `Ok(None)` when the user has no favorites or no candidate exists.
    ///
    /// # Errors
    ///
    /// [`AffinityError::NotFound`] for an unknown user.
    pub fn recommend(&self, username: &str) -> Result<Option<Recommendation>> {
        Ok(self.top_recommendations(username, 1)?.into_iter().next())
    }

    /// Up to `limit` candidates, best first, ties broken alphabetically.
    ///
    /// # Errors
    ///
    /// [`AffinityError::NotFound`] for an unknown user.
    pub fn top_recommendations(&self, username: &str, limit: usize) -> Result<Vec<Recommendation>> {
        let user = self
            .user(username)
            .ok_or_else(|| AffinityError::NotFound(username.trim().to_string()))?;

        let mut ranked = self.score_candidates(user);
        ranked.truncate(limit);
        trace!("{} candidates kept for `{}'", ranked.len(), user.key());
        Ok(ranked)
    }

    fn score_candidates(&self, user: &User) -> Vec<Recommendation> {
        let favorites = user.favorite_genres();
        let mut scores: BTreeMap<&str, u32> = BTreeMap::new();

        for ((a, b), weight) in &self.edges {
            let candidate = match (favorites.contains(a), favorites.contains(b)) {
                (true, false) => b,
                (false, true) => a,
                _ => continue,
            };
            *scores.entry(candidate.as_str()).or_insert(0) += weight;
        }

        let mut ranked: Vec<Recommendation> = scores
            .into_iter()
            .map(|(genre, score)| Recommendation {
                genre: genre.to_string(),
                score,
            })
            .collect();
        ranked.sort_by(|x, y| y.score.cmp(&x.score).then_with(|| x.genre.cmp(&y.genre)));
        ranked
    }

    /// Weight of the edge between two genres, `None` if no edge exists
    #[must_use]
    pub fn edge_weight(&self, g1: &str, g2: &str) -> Option<u32> {
        let key = pair_key(&canonicalize(g1)?, &canonicalize(g2)?)?;
        self.edges.get(&key).copied()
    }

    /// All edges, ordered by genre pair
    pub fn edges(&self) -> impl Iterator<Item = AffinityEdge> + '_ {
        self.edges.iter().map(|((a, b), weight)| AffinityEdge {
            genre_a: a.clone(),
            genre_b: b.clone(),
            weight: *weight,
        })
    }

    /// Registered users, ordered by identity key
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Look up a user by name (case-insensitive)
    #[must_use]
    pub fn user(&self, username: &str) -> Option<&User> {
        self.users.get(&user_key(username))
    }

    /// Known genres in alphabetical order
    pub fn genres(&self) -> impl Iterator<Item = &str> {
        self.genres.iter().map(String::as_str)
    }

    #[must_use]
    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            users: self.users.len(),
            genres: self.genres.len(),
            edges: self.edges.len(),
            weighted_edges: self.edges.values().filter(|weight| **weight > 0).count(),
        }
    }

    fn check_policy(&self, canonical: &str) -> Result<()> {
        match self.policy {
            GenrePolicy::CatalogOnly if !Genre::validate_name(Some(canonical)) => {
                Err(AffinityError::validation(
                    "genre name",
                    InvalidReason::NotInCatalog(canonical.to_string()),
                ))
            }
            _ => Ok(()),
        }
    }

    fn count_co_listeners(&self, a: &str, b: &str) -> u32 {
        let count = self.users.values().filter(|user| user.likes_both(a, b)).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Ensure the edge exists, then recount it
    fn refresh_pair(&mut self, a: &str, b: &str) {
        if let Some((a, b)) = pair_key(a, b) {
            let weight = self.count_co_listeners(&a, &b);
            trace!("Edge ({a}, {b}) = {weight}");
            self.edges.insert((a, b), weight);
        }
    }

    /// Recount an edge only if it already exists
    fn recount_existing(&mut self, a: &str, b: &str) {
        if let Some(key) = pair_key(a, b) {
            let weight = self.count_co_listeners(&key.0, &key.1);
            if let Some(slot) = self.edges.get_mut(&key) {
                trace!("Edge ({}, {}) = {weight}", key.0, key.1);
                *slot = weight;
            }
        }
    }
}

fn user_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// An [`AffinityStore`] behind one global lock.
///
/// Every mutation and every read takes the same mutex, so a read always sees
/// the state left by the last completed mutation.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Arc<Mutex<AffinityStore>>,
}

impl SharedStore {
    #[must_use]
    pub fn new(store: AffinityStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, AffinityStore> {
        // Mutations validate before writing, so a poisoned store is still consistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn read<T>(&self, f: impl FnOnce(&AffinityStore) -> T) -> T {
        f(&*self.lock())
    }

    pub fn write<T>(&self, f: impl FnOnce(&mut AffinityStore) -> T) -> T {
        f(&mut *self.lock())
    }

    /// Copy of the current state
    #[must_use]
    pub fn snapshot(&self) -> AffinityStore {
        self.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Users as (name, comma-separated genres)
    fn store_with(users: &[(&str, &str)]) -> AffinityStore {
        let mut store = AffinityStore::new();
        for (name, genres) in users {
            store.register_user(name, genres.split(',')).unwrap();
        }
        store
    }

    #[test]
    fn test_weight_is_exact_count() {
        let store = store_with(&[
            ("A", "rock,pop"),
            ("B", "rock,pop"),
            ("C", "rock"),
        ]);
        assert_eq!(store.edge_weight("pop", "rock"), Some(2));
        assert_eq!(store.edge_weight("Rock", " POP"), Some(2));
    }

    #[test]
    fn test_recommendation_prefers_higher_score() {
        let mut store = store_with(&[
            ("A", "rock"),
            ("B", "rock,pop"),
            ("C", "rock,jazz"),
            ("D", "rock,pop"),
        ]);
        store.register_user("E", ["rock"]).unwrap();

        let rec = store.recommend("E").unwrap().unwrap();
        assert_eq!(rec.genre, "pop");
        assert_eq!(rec.score, 2);

        let top = store.top_recommendations("e", 5).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[1].genre, "jazz");
        assert_eq!(top[1].score, 1);
    }

    #[test]
    fn test_tie_goes_to_alphabetically_smaller() {
        let mut store = store_with(&[("A", "rock,trap"), ("B", "rock,blues")]);
        store.register_user("C", ["rock"]).unwrap();

        let rec = store.recommend("C").unwrap().unwrap();
        assert_eq!(rec.genre, "blues");
        assert_eq!(rec.score, 1);
    }

    #[test]
    fn test_score_sums_over_all_favorites() {
        let mut store = store_with(&[
            ("A", "rock,pop,jazz"),
            ("B", "rock,blues"),
            ("C", "rock,blues"),
        ]);
        store.register_user("D", ["rock", "pop"]).unwrap();

        // jazz: rock-jazz 1 + pop-jazz 1; blues: rock-blues 2
        let top = store.top_recommendations("D", 10).unwrap();
        assert_eq!(top[0].score, 2);
        assert_eq!(top[0].genre, "blues");
        assert_eq!(top[1].genre, "jazz");
        assert_eq!(top[1].score, 2);
    }

    #[test]
    fn test_recommend_unknown_user() {
        let store = AffinityStore::new();
        assert_eq!(
            store.recommend("ghost").unwrap_err(),
            AffinityError::NotFound("ghost".into())
        );
    }

    #[test]
    fn test_no_recommendation_outcomes() {
        let mut store = store_with(&[("A", "rock,pop"), ("B", "rock,pop")]);
        store.register_user("Empty", Vec::<String>::new()).unwrap();

        assert_eq!(store.recommend("A").unwrap(), None);
        assert_eq!(store.recommend("empty").unwrap(), None);
    }

    #[test]
    fn test_duplicate_registration_conflicts() {
        let mut store = store_with(&[("Ana", "rock")]);
        let err = store.register_user(" ANA", ["jazz", "pop"]).unwrap_err();
        assert_eq!(err, AffinityError::Conflict("ANA".into()));

        // Nothing merged
        assert_eq!(store.user("ana").unwrap().sorted_favorites(), vec!["rock"]);
        assert_eq!(store.edge_weight("jazz", "pop"), None);
    }

    #[test]
    fn test_catalog_only_policy() {
        let mut store = AffinityStore::with_policy(GenrePolicy::CatalogOnly);
        assert!(store
            .register_user("ana", ["rock", "polka"])
            .unwrap_err()
            .is_validation());
        assert_eq!(store.status().users, 0);
        assert_eq!(store.status().genres, 0);

        store.register_user("ana", ["Rock", "K-Pop"]).unwrap();
        assert!(store.add_genre_to_user("ana", "polka").unwrap_err().is_validation());
        assert!(store.add_genre_to_user("ana", "jazz").unwrap());
    }

    #[test]
    fn test_add_genre_to_unknown_user_is_not_found_first() {
        let mut store = AffinityStore::with_policy(GenrePolicy::CatalogOnly);
        store.register_user("ana", ["rock"]).unwrap();

        // The missing user is reported before the genre is looked at
        assert_eq!(
            store.add_genre_to_user(" Ghost ", "polka").unwrap_err(),
            AffinityError::NotFound("Ghost".into())
        );
        assert_eq!(
            store.add_genre_to_user("ghost", "  ").unwrap_err(),
            AffinityError::NotFound("ghost".into())
        );
        assert_eq!(store.status().genres, 1);
    }

    #[test]
    fn test_add_genre_refreshes_edges() {
        let mut store = store_with(&[("A", "rock,pop"), ("B", "rock")]);
        assert_eq!(store.edge_weight("rock", "pop"), Some(1));

        assert!(store.add_genre_to_user("b", "Pop").unwrap());
        assert!(!store.add_genre_to_user("b", "pop").unwrap());
        assert_eq!(store.edge_weight("rock", "pop"), Some(2));

        assert_eq!(
            store.add_genre_to_user("nobody", "pop").unwrap_err(),
            AffinityError::NotFound("nobody".into())
        );
    }

    #[test]
    fn test_remove_genre_decays_weight_but_keeps_edge() {
        let mut store = store_with(&[("A", "rock,pop"), ("B", "rock,pop")]);
        assert!(store.remove_genre_from_user("A", "POP").unwrap());
        assert!(!store.remove_genre_from_user("A", "pop").unwrap());
        assert_eq!(store.edge_weight("rock", "pop"), Some(1));

        assert!(store.remove_genre_from_user("B", "rock").unwrap());
        assert_eq!(store.edge_weight("rock", "pop"), Some(0));
        assert_eq!(store.status().edges, 1);
        assert_eq!(store.status().weighted_edges, 0);
    }

    #[test]
    fn test_zero_weight_edge_still_makes_candidate() {
        let mut store = store_with(&[("A", "rock,pop")]);
        store.remove_genre_from_user("A", "pop").unwrap();

        let rec = store.recommend("A").unwrap().unwrap();
        assert_eq!(rec.genre, "pop");
        assert_eq!(rec.score, 0);
    }

    #[test]
    fn test_remove_user_recounts() {
        let mut store = store_with(&[("A", "rock,pop"), ("B", "rock,pop")]);
        let removed = store.remove_user(" a ").unwrap();
        assert_eq!(removed.name(), "A");
        assert_eq!(store.edge_weight("pop", "rock"), Some(1));
        assert!(store.remove_user("a").is_err());
    }

    #[test]
    fn test_update_genre_similarity() {
        let mut store = store_with(&[("A", "rock,pop"), ("B", "jazz")]);

        assert!(store.update_genre_similarity("Pop", "rock"));
        assert!(!store.update_genre_similarity("rock", "rock"));
        assert!(!store.update_genre_similarity("", "rock"));
        assert!(!store.update_genre_similarity("jazz", "rock"));
        assert_eq!(store.edge_weight("jazz", "rock"), None);

        store.users.get_mut("b").unwrap().add_genre("rock").unwrap();
        assert_eq!(store.edge_weight("jazz", "rock"), None);
        assert!(store.update_genre_similarity("jazz", "rock"));
        assert_eq!(store.edge_weight("jazz", "rock"), Some(1));
    }

    #[test]
    fn test_seed_catalog_and_status() {
        let mut store = store_with(&[("A", "rock,shoegaze")]);
        assert_eq!(store.seed_catalog(), 12);
        assert_eq!(store.seed_catalog(), 0);

        let status = store.status();
        assert_eq!(status.users, 1);
        assert_eq!(status.genres, 14);
        assert_eq!(status.edges, 1);
        assert_eq!(status.to_string(), "users: 1, genres: 14, edges: 1 (1 weighted)");
    }

    #[test]
    fn test_restore_recounts_stored_weights() {
        let users = vec![
            User::with_genres("A", ["rock", "pop"]).unwrap(),
            User::with_genres("B", ["rock", "pop", "jazz"]).unwrap(),
        ];
        let edges = vec![
            AffinityEdge {
                genre_a: "pop".into(),
                genre_b: "rock".into(),
                weight: 7,
            },
            AffinityEdge {
                genre_a: "blues".into(),
                genre_b: "rock".into(),
                weight: 3,
            },
        ];
        let store = AffinityStore::restore(GenrePolicy::Permissive, users, Vec::<String>::new(), edges);

        assert_eq!(store.edge_weight("pop", "rock"), Some(2));
        assert_eq!(store.edge_weight("blues", "rock"), Some(0));
        assert_eq!(store.edge_weight("jazz", "pop"), Some(1));
        assert_eq!(store.status().users, 2);
    }

    #[test]
    fn test_shared_store_serializes_writers() {
        let shared = SharedStore::new(AffinityStore::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let shared = shared.clone();
                std::thread::spawn(move || {
                    shared
                        .write(|store| store.register_user(&format!("user{i}"), ["rock", "pop"]))
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(shared.read(|store| store.edge_weight("rock", "pop")), Some(8));
        assert_eq!(shared.snapshot().status().users, 8);
    }
}
