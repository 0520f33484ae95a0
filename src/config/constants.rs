//! Configuration constants.
//!
//! Fixed names for the backup document shape and default file locations.
//! The document constants are load-bearing for interop: documents written by
//! earlier builds use the same root, record, and encoding names, so changing
//! any of them silently orphans existing backups.

/// Default backup document path.
pub const BACKUP_FILE: &str = "./backup.xml";

/// Default SQLite database path.
pub const DB_PATH: &str = "./streams.db";

/// Root element of the backup document.
pub const ROOT_ELEMENT_TAG_NAME: &str = "backup";

/// Element wrapping one backed-up stream record.
pub const RECORD_ELEMENT_TAG_NAME: &str = "uri";

/// Attribute holding the stream URL. Doubles as the uniqueness key when
/// merging a restored document into the store.
pub const URL_ATTRIBUTE: &str = "url";

/// Encoding declared on the backup document.
pub const BACKUP_ENCODING: &str = "UTF-8";
