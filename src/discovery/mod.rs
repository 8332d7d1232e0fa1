//! Project configuration discovery
//!
//! This module handles the bounded filesystem search used to
//! locate the Tauri project configuration file.

pub mod finder;
pub mod manifest;

// Re-export commonly used items
pub use finder::{SearchRequest, find};
pub use manifest::{SearchSettings, config_dir, locate_project_config};
