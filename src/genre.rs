//! # Genre Module
//!
//! A genre is identified by its canonical name: the raw input trimmed and
//! lowercased. Equality, hashing and ordering only look at that canonical form,
//! so `"Rock"`, `" rock "` and `"ROCK"` are the same genre.
//!
//! A fixed reference catalog of known genres is available for validation.
//! Membership is advisory: genres outside the catalog are still valid values,
//! and it is up to the store's [`GenrePolicy`](crate::store::GenrePolicy)
//! whether to accept them.

use crate::error::{AffinityError, InvalidReason, Result};
use lazy_static::lazy_static;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

lazy_static! {
    /// Reference catalog, stored in canonical form
    static ref KNOWN_GENRES: HashSet<&'static str> = [
        "rock",
        "pop",
        "electronica",
        "jazz",
        "classical",
        "rap",
        "k-pop",
        "blues",
        "indie",
        "hip hop",
        "bossa nova",
        "trap",
        "reggaeton",
    ]
    .into_iter()
    .collect();
}

/// Normalize a raw name into canonical form.
///
/// Returns `None` when nothing is left after trimming.
#[must_use]
pub fn canonicalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Validated, normalized genre identifier
#[derive(Debug, Clone)]
pub struct Genre {
    canonical_name: String,
    original_name: String,
}

impl Genre {
    /// Create a genre from user input.
    ///
    /// # Errors
    ///
    /// Returns [`AffinityError::Validation`] if `raw` is empty or only whitespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use genre_affinity::genre::Genre;
    ///
    /// let genre = Genre::new("  Hip Hop ")?;
    /// assert_eq!(genre.canonical_name(), "hip hop");
    /// assert_eq!(genre.original_name(), "  Hip Hop ");
    /// # Ok::<(), genre_affinity::error::AffinityError>(())
    /// ```
    pub fn new(raw: &str) -> Result<Self> {
        let canonical_name = canonicalize(raw).ok_or_else(|| {
            AffinityError::validation("genre name", InvalidReason::Blank)
        })?;

        Ok(Self {
            canonical_name,
            original_name: raw.to_string(),
        })
    }

    /// Same as [`Genre::new`], for input that may be missing entirely.
    ///
    /// # Errors
    ///
    /// Returns [`AffinityError::Validation`] for `None` or blank input.
    pub fn from_optional(raw: Option<&str>) -> Result<Self> {
        match raw {
            Some(raw) => Self::new(raw),
            None => Err(AffinityError::validation("genre name", InvalidReason::Blank)),
        }
    }

    /// Build genres from a list of names, skipping blank entries.
    pub fn from_names<I, S>(names: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .filter_map(|name| Self::new(name.as_ref()).ok())
            .collect()
    }

    #[must_use]
    pub fn canonical_name(&self) -> &str {
        &self.canonical_name
    }

    #[must_use]
    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    /// Whether this genre belongs to the reference catalog
    #[must_use]
    pub fn is_valid(&self) -> bool {
        KNOWN_GENRES.contains(self.canonical_name.as_str())
    }

    /// Canonical name with only its first letter upper-cased ("hip hop" → "Hip hop")
    #[must_use]
    pub fn capitalized(&self) -> String {
        capitalize(&self.canonical_name)
    }

    /// Canonical name with every word upper-cased ("k-pop" → "K-Pop")
    #[must_use]
    pub fn title_case(&self) -> String {
        title_case(&self.canonical_name)
    }

    /// Compare against a raw name, normalizing it first.
    ///
    /// Blank input never matches.
    #[must_use]
    pub fn matches(&self, raw: &str) -> bool {
        canonicalize(raw).is_some_and(|name| name == self.canonical_name)
    }

    /// Sorted snapshot of the reference catalog
    #[must_use]
    pub fn known_genres() -> Vec<String> {
        let mut names: Vec<String> = KNOWN_GENRES.iter().map(|name| (*name).to_string()).collect();
        names.sort();
        names
    }

    /// Check catalog membership without constructing a genre.
    ///
    /// Never fails: empty or missing input is simply not valid.
    #[must_use]
    pub fn validate_name(raw: Option<&str>) -> bool {
        raw.and_then(canonicalize)
            .is_some_and(|name| KNOWN_GENRES.contains(name.as_str()))
    }
}

/// Upper-case the first character, lower-case the rest
pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Upper-case every letter that follows a non-letter, lower-case the rest
pub(crate) fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_letter = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }

    out
}

impl PartialEq for Genre {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_name == other.canonical_name
    }
}

impl Eq for Genre {}

impl PartialEq<str> for Genre {
    fn eq(&self, other: &str) -> bool {
        self.matches(other)
    }
}

impl PartialEq<&str> for Genre {
    fn eq(&self, other: &&str) -> bool {
        self.matches(other)
    }
}

impl Hash for Genre {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_name.hash(state);
    }
}

impl PartialOrd for Genre {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Genre {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical_name.cmp(&other.canonical_name)
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.capitalized())
    }
}

impl FromStr for Genre {
    type Err = AffinityError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}
