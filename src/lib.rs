//! stream_backup library: backup and restore for a stream URL library
//!
//! This library serializes the records of a stream library (an open-ended
//! key/value attribute set per stream) into a portable XML document, and
//! merges such a document back into an existing store without creating
//! duplicates. Existing store entries always win on restore.
//!
//! # Example
//!
//! ```no_run
//! use stream_backup::{run_restore, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     db_path: std::path::PathBuf::from("streams.db"),
//!     backup_file: std::path::PathBuf::from("backup.xml"),
//!     ..Default::default()
//! };
//!
//! let report = run_restore(config).await?;
//! println!("Restored {} of {} records",
//!          report.merge.inserted, report.parsed);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

pub mod config;
mod document;
mod error_handling;
pub mod initialization;
mod merge;
mod models;
mod storage;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use document::{parse_document, write_document, ParseOutcome};
pub use error_handling::{DatabaseError, InitializationError, RestoreError, SerializeError};
pub use merge::{merge_records, MergeOutcome};
pub use models::StreamRecord;
pub use run::{run_backup, run_restore, BackupReport, RestoreReport};
pub use storage::{init_db_pool_with_path, run_migrations, RecordStore, SqliteStore};

// Internal run module (drives a whole backup or restore operation)
mod run {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use log::info;

    use crate::config::Config;
    use crate::document::{parse_document, write_document};
    use crate::error_handling::RestoreError;
    use crate::merge::{merge_records, MergeOutcome};
    use crate::storage::{init_db_pool_with_path, run_migrations, SqliteStore};

    /// Results of a completed backup.
    #[derive(Debug, Clone)]
    pub struct BackupReport {
        /// Number of records written to the document
        pub records: usize,
        /// Path of the backup document
        pub backup_path: PathBuf,
    }

    /// Results of a completed restore.
    #[derive(Debug, Clone)]
    pub struct RestoreReport {
        /// Records recovered from the document
        pub parsed: usize,
        /// Per-record merge tallies
        pub merge: MergeOutcome,
        /// Fault that stopped document parsing early, if any
        pub document_fault: Option<String>,
        /// Path of the backup document
        pub backup_path: PathBuf,
    }

    /// Backs up every record in the store to the backup document.
    ///
    /// The document is serialized fully in memory before anything touches
    /// the filesystem, so a serialization fault can never leave a truncated
    /// document behind as "the backup".
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or read, if
    /// serialization fails, or if the document cannot be written to disk.
    pub async fn run_backup(config: Config) -> Result<BackupReport> {
        let pool = init_db_pool_with_path(&config.db_path)
            .await
            .context("Failed to initialize database pool")?;
        run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        let store = SqliteStore::new(pool);
        let records = store
            .all_records()
            .await
            .context("Failed to read records from the store")?;

        let document =
            write_document(&records).context("Failed to serialize backup document")?;

        tokio::fs::write(&config.backup_file, document.as_bytes())
            .await
            .with_context(|| {
                format!(
                    "Failed to write backup document to {}",
                    config.backup_file.display()
                )
            })?;

        info!(
            "Backed up {} record(s) to {}",
            records.len(),
            config.backup_file.display()
        );

        Ok(BackupReport {
            records: records.len(),
            backup_path: config.backup_file,
        })
    }

    /// Restores the backup document into the store.
    ///
    /// Parsing is tolerant: a truncated or partially corrupted document
    /// restores every record that was fully written, and the fault is
    /// reported in the returned summary. Only a document yielding zero
    /// records while faulty is treated as a hard error.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read, if it is malformed
    /// beyond recovery, or if the database cannot be opened.
    pub async fn run_restore(config: Config) -> Result<RestoreReport> {
        let text = tokio::fs::read_to_string(&config.backup_file)
            .await
            .with_context(|| {
                format!(
                    "Failed to read backup document from {}",
                    config.backup_file.display()
                )
            })?;

        let outcome = parse_document(&text);
        if outcome.records.is_empty() {
            if let Some(fault) = outcome.fault {
                return Err(RestoreError::Malformed(fault).into());
            }
        }

        let pool = init_db_pool_with_path(&config.db_path)
            .await
            .context("Failed to initialize database pool")?;
        run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        let store = SqliteStore::new(pool);
        let merge = merge_records(&outcome.records, &store).await;

        info!(
            "Restored {} of {} record(s) from {}",
            merge.inserted,
            outcome.records.len(),
            config.backup_file.display()
        );

        Ok(RestoreReport {
            parsed: outcome.records.len(),
            merge,
            document_fault: outcome.fault,
            backup_path: config.backup_file,
        })
    }
}
