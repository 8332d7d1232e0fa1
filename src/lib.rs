//! Launch the Tauri CLI from web bundler lifecycle hooks.
//!
//! When the dev server starts listening, `tauri dev` is pointed at it; when a
//! production bundle has been written, `tauri build` is pointed at the output
//! directory. Both steps first locate the project's `tauri.conf.json`,
//! `tauri.conf.json5` or `Tauri.toml` with a bounded concurrent search.
//!
//! ```no_run
//! use tauri_bridge::{ResolvedConfig, SearchSettings, TauriCli, TauriOptions, TauriPlugin};
//!
//! # async fn build() -> tauri_bridge::Result<()> {
//! let cli = TauriCli::new(vec!["cargo".into(), "tauri".into()]);
//! let mut plugin = TauriPlugin::new(TauriOptions::default(), SearchSettings::default(), cli);
//! plugin.config_resolved(ResolvedConfig::new(".", "dist"));
//! plugin.close_bundle().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod discovery;
pub mod hooks;
pub mod launcher;
pub mod logging;
pub mod ui;

pub use crate::core::{BridgeError, Result};
pub use config::{CliConfig, Config};
pub use discovery::{SearchRequest, SearchSettings, find, locate_project_config};
pub use hooks::{HookOutcome, ResolvedConfig, ServerAddress, TauriPlugin};
pub use launcher::{DryRun, RunCli, Runner, TauriCli, TauriOptions};
