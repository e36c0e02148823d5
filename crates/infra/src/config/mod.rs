//! Configuration loading
//!
//! This module resolves client configuration from JSON strings, files,
//! the home directory and environment variables.

pub mod loader;

// Re-export commonly used items
pub use loader::{home_config_path, load_from_env, ConfigLoader};
