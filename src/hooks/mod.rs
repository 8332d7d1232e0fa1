//! Bundler lifecycle hooks
//!
//! This module turns dev server and build lifecycle events
//! into packaging CLI launches.

pub mod address;
pub mod plugin;

// Re-export commonly used items
pub use address::ServerAddress;
pub use plugin::{HookOutcome, ResolvedConfig, TauriPlugin};
