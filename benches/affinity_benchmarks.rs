//! # Affinity Benchmarks
//!
//! Measures the store operations that recount edges, at the scale the store
//! targets (tens to a few hundred users).
//!
//! ## Benchmark Categories
//!
//! - **Registration**: building a store user by user
//! - **Mutation**: add/remove genre round-trips on a populated store
//! - **Recommendation**: single best genre and top-N ranking
//! - **Persistence**: saving and loading a store through SQLite
//!
//! ```bash
//! cargo bench
//! cargo bench recommendation
//! ```

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use genre_affinity::db;
use genre_affinity::genre::Genre;
use genre_affinity::store::{AffinityStore, GenrePolicy};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::hint::black_box;
use tempfile::TempDir;

/// Random users, each liking 1 to 5 catalog genres
fn create_test_users(count: usize) -> Vec<(String, Vec<String>)> {
    let mut rng = StdRng::seed_from_u64(42);
    let catalog = Genre::known_genres();

    (0..count)
        .map(|i| {
            let likes = rng.gen_range(1..=5);
            let genres = catalog
                .choose_multiple(&mut rng, likes)
                .cloned()
                .collect();
            (format!("user{i:04}"), genres)
        })
        .collect()
}

fn populated_store(count: usize) -> AffinityStore {
    let mut store = AffinityStore::new();
    for (name, genres) in create_test_users(count) {
        store
            .register_user(&name, &genres)
            .expect("generated users are unique");
    }
    store
}

fn benchmark_registration(c: &mut Criterion) {
    let mut group = c.benchmark_group("registration");

    for size in [10, 50, 100, 300].iter() {
        let users = create_test_users(*size);
        group.bench_with_input(BenchmarkId::new("register_all", size), &users, |b, users| {
            b.iter(|| {
                let mut store = AffinityStore::new();
                for (name, genres) in users {
                    store.register_user(black_box(name), black_box(genres)).unwrap();
                }
                store
            })
        });
    }

    group.finish();
}

fn benchmark_mutation(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutation");
    let store = populated_store(200);

    group.bench_function("add_remove_genre", |b| {
        b.iter_batched(
            || store.clone(),
            |mut store| {
                store.add_genre_to_user("user0001", black_box("shoegaze")).unwrap();
                store.remove_genre_from_user("user0001", black_box("shoegaze")).unwrap()
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("update_genre_similarity", |b| {
        b.iter_batched(
            || store.clone(),
            |mut store| store.update_genre_similarity(black_box("rock"), black_box("jazz")),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn benchmark_recommendation(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommendation");

    for size in [50, 200].iter() {
        let store = populated_store(*size);
        group.bench_with_input(BenchmarkId::new("best", size), &store, |b, store| {
            b.iter(|| store.recommend(black_box("user0000")).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("top_5", size), &store, |b, store| {
            b.iter(|| store.top_recommendations(black_box("user0000"), 5).unwrap())
        });
    }

    group.finish();
}

fn benchmark_persistence(c: &mut Criterion) {
    let mut group = c.benchmark_group("persistence");
    let store = populated_store(200);
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("bench_affinity.db");
    let mut conn = db::open(&db_path).expect("Failed to open database");

    group.bench_function("save_200_users", |b| {
        b.iter(|| db::save_store(&mut conn, black_box(&store)).unwrap())
    });

    group.bench_function("load_200_users", |b| {
        b.iter(|| db::load_store(&conn, GenrePolicy::Permissive).unwrap())
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_registration,
    benchmark_mutation,
    benchmark_recommendation,
    benchmark_persistence
);

criterion_main!(benches);
