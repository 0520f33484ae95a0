//! Application initialization.
//!
//! This module provides logger setup for the binary. Store initialization
//! lives in `storage` next to the code that uses it.

mod logger;

// Re-export public API
pub use logger::init_logger_with;
