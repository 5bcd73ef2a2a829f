//! Genre recommendations from shared listeners.
//!
//! Users declare favorite genres. Every pair of genres that some user likes
//! together is joined by an affinity edge whose weight is the number of users
//! liking both. A user is recommended the genre they do not like yet with the
//! highest summed affinity to the genres they do like.
//!
//! Core modules:
//! - [`genre`] - Genre names, normalization and the reference catalog
//! - [`user`] - Users and their favorite genres
//! - [`store`] - The affinity store and recommendation query
//! - [`recommender`] - Human-readable façade over the store
//! - [`error`] - Typed failures of the core model
//!
//! ### Supporting Modules
//!
//! - [`db`] - SQLite persistence
//! - [`config`] - Data directory and runtime settings
//! - [`cli`] - Command-line interface definitions
//! - [`completion`] - Shell completion generation
//!
//! ## Quick Start Example
//!
//! ```
//! use genre_affinity::store::{AffinityStore, SharedStore};
//! use genre_affinity::recommender::Recommender;
//!
//! let recommender = Recommender::new(SharedStore::new(AffinityStore::new()));
//! recommender.register_user("Ana", &["rock", "pop"]);
//! recommender.register_user("Bob", &["rock", "pop"]);
//! recommender.register_user("Cris", &["rock", "jazz"]);
//! recommender.register_user("Dani", &["rock"]);
//!
//! assert_eq!(recommender.recommend("Dani"), "Te recomendamos: Pop (score: 2)");
//! ```
//!
//! ## Error Handling
//!
//! Core operations return [`error::Result`], with [`error::AffinityError`]
//! separating validation failures, duplicate users and unknown users. Having
//! no recommendation is a normal outcome (`Ok(None)`). Persistence and
//! configuration use `anyhow::Result`.

pub mod cli;
pub mod completion;
pub mod config;
pub mod db;
pub mod error;
pub mod genre;
pub mod recommender;
pub mod store;
pub mod user;
