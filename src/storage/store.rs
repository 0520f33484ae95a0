//! Stream store access.
//!
//! The merge path only ever needs two operations -- look up a record by URL
//! and insert a new one -- so that pair is factored into the [`RecordStore`]
//! trait and the merge code depends on nothing else. [`SqliteStore`] is the
//! production implementation over the sqlx pool; backup additionally
//! enumerates the store through the inherent [`SqliteStore::all_records`].
//!
//! Records are stored as a fact row per stream (holding the unique URL) plus
//! one satellite row per attribute, with a sequence column preserving the
//! attribute order the record was defined with.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use crate::config::URL_ATTRIBUTE;
use crate::error_handling::DatabaseError;
use crate::models::StreamRecord;

/// The two store operations the restore merge depends on.
///
/// The lookup+insert pair for a given URL is not atomic; callers sharing a
/// store across threads must provide their own exclusion around a merge.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Looks up a record by its stream URL.
    async fn find_by_url(&self, url: &str) -> Result<Option<StreamRecord>, DatabaseError>;

    /// Inserts a new record.
    async fn insert(&self, record: &StreamRecord) -> Result<(), DatabaseError>;
}

/// SQLite-backed stream store.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Wraps an initialized connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Returns every record in the store, attributes in stored order.
    pub async fn all_records(&self) -> Result<Vec<StreamRecord>, DatabaseError> {
        let rows = sqlx::query("SELECT id FROM streams ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::SqlError)?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(self.load_record(row.get("id")).await?);
        }
        Ok(records)
    }

    async fn load_record(&self, stream_id: i64) -> Result<StreamRecord, DatabaseError> {
        let rows = sqlx::query(
            "SELECT attribute_name, attribute_value FROM stream_attributes
             WHERE stream_id = ? ORDER BY sequence_order",
        )
        .bind(stream_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::SqlError)?;

        let mut record = StreamRecord::new();
        for row in rows {
            record.set(
                row.get::<String, _>("attribute_name"),
                row.get::<Option<String>, _>("attribute_value"),
            );
        }
        Ok(record)
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn find_by_url(&self, url: &str) -> Result<Option<StreamRecord>, DatabaseError> {
        let row = sqlx::query("SELECT id FROM streams WHERE url = ?")
            .bind(url)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::SqlError)?;

        match row {
            Some(row) => Ok(Some(self.load_record(row.get("id")).await?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, record: &StreamRecord) -> Result<(), DatabaseError> {
        let url = record.url().unwrap_or_default();

        // The fact row and its attribute rows land together or not at all.
        let mut tx = self.pool.begin().await.map_err(DatabaseError::SqlError)?;

        let stream_id =
            sqlx::query_scalar::<_, i64>("INSERT INTO streams (url) VALUES (?) RETURNING id")
                .bind(url)
                .fetch_one(&mut *tx)
                .await
                .map_err(DatabaseError::SqlError)?;

        for (order, (key, value)) in record.iter().enumerate() {
            sqlx::query(
                "INSERT INTO stream_attributes (stream_id, attribute_name, attribute_value, sequence_order)
                 VALUES (?, ?, ?, ?)",
            )
            .bind(stream_id)
            .bind(key)
            .bind(value)
            .bind(order as i64)
            .execute(&mut *tx)
            .await
            .map_err(DatabaseError::SqlError)?;
        }

        tx.commit().await.map_err(DatabaseError::SqlError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::migrations::run_migrations;

    async fn create_test_store() -> SqliteStore {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database pool");
        run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        SqliteStore::new(pool)
    }

    fn test_record(url: &str, name: &str) -> StreamRecord {
        let mut record = StreamRecord::new();
        record.set("url", Some(url.to_string()));
        record.set("name", Some(name.to_string()));
        record.set("password", None);
        record
    }

    #[tokio::test]
    async fn insert_then_find_roundtrips_record() {
        let store = create_test_store().await;
        let record = test_record("http://example.com/a", "A");

        store.insert(&record).await.expect("insert should succeed");

        let found = store
            .find_by_url("http://example.com/a")
            .await
            .expect("lookup should succeed")
            .expect("record should exist");

        assert_eq!(found, record);
        // Stored attribute order survives the round trip
        let keys: Vec<&str> = found.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["url", "name", "password"]);
    }

    #[tokio::test]
    async fn find_by_url_misses_unknown_url() {
        let store = create_test_store().await;
        let found = store
            .find_by_url("http://nowhere/")
            .await
            .expect("lookup should succeed");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn duplicate_url_insert_is_rejected() {
        let store = create_test_store().await;
        store
            .insert(&test_record("http://example.com/a", "A"))
            .await
            .expect("first insert should succeed");

        let result = store.insert(&test_record("http://example.com/a", "B")).await;
        assert!(matches!(result, Err(DatabaseError::SqlError(_))));
    }

    #[tokio::test]
    async fn all_records_returns_insertion_order() {
        let store = create_test_store().await;
        let first = test_record("http://example.com/a", "A");
        let second = test_record("http://example.com/b", "B");
        store.insert(&first).await.expect("insert should succeed");
        store.insert(&second).await.expect("insert should succeed");

        let records = store.all_records().await.expect("listing should succeed");
        assert_eq!(records, vec![first, second]);
    }

    #[tokio::test]
    async fn null_attribute_value_survives_storage() {
        let store = create_test_store().await;
        let record = test_record("http://example.com/a", "A");
        store.insert(&record).await.expect("insert should succeed");

        let found = store
            .find_by_url("http://example.com/a")
            .await
            .expect("lookup should succeed")
            .expect("record should exist");

        assert_eq!(found.iter().last(), Some(("password", None)));
    }
}
