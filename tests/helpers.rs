// Shared test helpers for database setup and test data creation.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use sqlx::SqlitePool;

use stream_backup::{run_migrations, SqliteStore, StreamRecord};

/// Creates a test store over an in-memory database with migrations applied.
#[allow(dead_code)] // Used by other test files
pub async fn create_test_store() -> SqliteStore {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    SqliteStore::new(pool)
}

/// Builds a record from (key, value) pairs, in order.
#[allow(dead_code)] // Used by other test files
pub fn record(pairs: &[(&str, &str)]) -> StreamRecord {
    let mut record = StreamRecord::new();
    for (key, value) in pairs {
        record.set(*key, Some((*value).to_string()));
    }
    record
}
