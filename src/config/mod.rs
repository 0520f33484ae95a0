//! Application configuration and constants.
//!
//! This module provides:
//! - Backup document shape constants (element names, encoding)
//! - Default file locations
//! - CLI option types and the library configuration struct

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel};
