//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Error types for database operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),
}

/// Error producing the backup document.
///
/// Serialization has no partial-success mode: any fault aborts the backup
/// attempt and no document text is returned, so a truncated document can
/// never overwrite a previous good backup.
#[derive(Error, Debug)]
pub enum SerializeError {
    /// The XML writer reported an internal fault.
    #[error("XML serialization error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The produced document bytes were not valid UTF-8.
    #[error("Backup document is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Error restoring from a backup document.
///
/// Parse faults are normally tolerated (everything parsed before the fault
/// is kept); `Malformed` is raised only when not a single record could be
/// recovered.
#[derive(Error, Debug)]
pub enum RestoreError {
    /// The document was unreadable and nothing could be salvaged from it.
    #[error("Backup document is malformed and no records could be recovered: {0}")]
    Malformed(String),
}
