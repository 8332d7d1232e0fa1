//! Packaging CLI invocation
//!
//! This module assembles the arguments passed to the Tauri CLI
//! and runs it as a child process.

pub mod args;
pub mod runner;

// Re-export commonly used items
pub use args::{TauriOptions, build_args, dev_args, dist_dir};
pub use runner::{DryRun, RunCli, Runner, TauriCli};
