//! User interface components
//!
//! This module contains the command-line definitions
//! and shell completion support.

pub mod cli;
pub mod completion;

// Re-export commonly used items
pub use cli::{Cli, Commands, GlobalArgs, cli_to_config};
pub use completion::{print_completions, write_completions};
