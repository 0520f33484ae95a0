//! Error handling.
//!
//! Error types are grouped by the operation they abort:
//! - **SerializeError**: the backup document could not be produced (terminal
//!   for that backup attempt)
//! - **RestoreError**: nothing could be recovered from a backup document
//! - **DatabaseError**: store access failed
//! - **InitializationError**: application setup failed
//!
//! Per-record problems during a restore (missing URL, failed insert) are not
//! errors at this level; they are counted in the merge outcome and logged.

mod types;

// Re-export public API
pub use types::{DatabaseError, InitializationError, RestoreError, SerializeError};
