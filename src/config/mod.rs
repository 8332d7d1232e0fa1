//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::constants::{build, cli, config_file, dev_server, discovery};
use crate::core::error::{BridgeError, Result};
use crate::discovery::SearchSettings;
use crate::launcher::{TauriCli, TauriOptions};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Debug (`true`) or release (`false`) packaging; unset leaves the CLI default
    pub debug: Option<bool>,

    /// Target triple forwarded to the packaging CLI
    pub target: Option<String>,

    /// Forward `--verbose` and enable debug logging
    pub verbose: Option<bool>,

    /// Directory the project configuration search starts from
    pub search_root: Option<String>,

    /// Directories below the search root that are inspected
    pub max_depth: Option<usize>,

    /// Regex matched against file names to find the project configuration
    pub config_pattern: Option<String>,

    /// Regexes matched against entry names that are never visited
    pub ignore_patterns: Option<Vec<String>>,

    /// Program and leading arguments used to run the packaging CLI
    pub cli_command: Option<Vec<String>>,

    /// Bundler root that `out_dir` is relative to
    pub project_root: Option<String>,

    /// Bundler output directory
    pub out_dir: Option<String>,

    /// Address the dev server is bound to
    pub dev_address: Option<String>,

    /// Dev server serves over TLS
    pub https: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: None,
            target: None,
            verbose: Some(false),
            search_root: None, // Current directory
            max_depth: Some(discovery::MAX_DEPTH),
            config_pattern: None, // Built-in pattern
            ignore_patterns: Some(
                discovery::IGNORE_PATTERNS
                    .iter()
                    .map(|p| p.to_string())
                    .collect(),
            ),
            cli_command: Some(cli::DEFAULT_COMMAND.iter().map(|s| s.to_string()).collect()),
            project_root: None,
            out_dir: Some(build::DEFAULT_OUT_DIR.to_string()),
            dev_address: Some(dev_server::DEFAULT_ADDRESS.to_string()),
            https: Some(false),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            BridgeError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            BridgeError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        if let Ok(config) = Self::load_from_file(config_file::FILE_NAME) {
            return config;
        }

        for i in 1..=config_file::PARENT_LEVELS {
            let path = format!("{}{}", "../".repeat(i), config_file::FILE_NAME);
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        Self::default()
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        // Packaging options
        if let Some(debug) = cli_config.debug {
            self.debug = Some(debug);
        }
        if let Some(ref target) = cli_config.target {
            self.target = Some(target.clone());
        }
        if cli_config.verbose {
            self.verbose = Some(true);
        }

        // Discovery
        if let Some(ref root) = cli_config.search_root {
            self.search_root = Some(root.clone());
        }
        if let Some(max_depth) = cli_config.max_depth {
            self.max_depth = Some(max_depth);
        }

        // Launching
        if let Some(ref command) = cli_config.cli_command {
            self.cli_command = Some(command.clone());
        }

        // Bundler state
        if let Some(ref project_root) = cli_config.project_root {
            self.project_root = Some(project_root.clone());
        }
        if let Some(ref out_dir) = cli_config.out_dir {
            self.out_dir = Some(out_dir.clone());
        }
        if let Some(ref address) = cli_config.dev_address {
            self.dev_address = Some(address.clone());
        }
        if cli_config.https {
            self.https = Some(true);
        }
    }

    /// Options forwarded to the packaging CLI
    pub fn tauri_options(&self) -> TauriOptions {
        TauriOptions {
            debug: self.debug,
            target: self.target.clone(),
            verbose: self.verbose.unwrap_or(false),
        }
    }

    /// Settings for locating the project configuration
    pub fn search_settings(&self) -> SearchSettings {
        let defaults = SearchSettings::default();
        SearchSettings {
            root: self
                .search_root
                .as_ref()
                .map(PathBuf::from)
                .unwrap_or(defaults.root),
            config_pattern: self.config_pattern.clone(),
            ignore_patterns: self
                .ignore_patterns
                .clone()
                .unwrap_or(defaults.ignore_patterns),
            max_depth: self.max_depth.unwrap_or(defaults.max_depth),
        }
    }

    /// Process runner for the packaging CLI, run from the search root
    pub fn tauri_cli(&self) -> TauriCli {
        let command = self
            .cli_command
            .clone()
            .unwrap_or_else(|| cli::DEFAULT_COMMAND.iter().map(|s| s.to_string()).collect());
        let mut runner = TauriCli::new(command);
        if let Some(ref root) = self.search_root {
            runner = runner.working_dir(root);
        }
        runner
    }

    /// Bundler root directory
    pub fn project_root(&self) -> PathBuf {
        PathBuf::from(self.project_root.as_deref().unwrap_or("."))
    }

    /// Bundler output directory
    pub fn out_dir(&self) -> PathBuf {
        PathBuf::from(self.out_dir.as_deref().unwrap_or(build::DEFAULT_OUT_DIR))
    }

    /// Dev server bound address
    pub fn dev_address(&self) -> &str {
        self.dev_address
            .as_deref()
            .unwrap_or(dev_server::DEFAULT_ADDRESS)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(max_depth) = self.max_depth
            && max_depth > discovery::MAX_DEPTH_LIMIT
        {
            return Err(BridgeError::Config(format!(
                "max_depth of {max_depth} is too large. Expected a value between 0-{}.",
                discovery::MAX_DEPTH_LIMIT
            )));
        }

        if let Some(ref command) = self.cli_command
            && command.iter().all(|part| part.trim().is_empty())
        {
            return Err(BridgeError::Config(
                "cli_command cannot be empty. Expected a program name such as \"cargo\"."
                    .to_string(),
            ));
        }

        if let Some(ref target) = self.target
            && target.trim().is_empty()
        {
            return Err(BridgeError::Config("target cannot be empty.".to_string()));
        }

        // Validate patterns by trying to compile them
        if let Some(ref pattern) = self.config_pattern {
            Regex::new(pattern)?;
        }
        if let Some(ref patterns) = self.ignore_patterns {
            for pattern in patterns {
                Regex::new(pattern)?;
            }
        }

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Packaging options
    pub debug: Option<bool>,    // --debug / --release
    pub target: Option<String>, // --target
    pub verbose: bool,          // --verbose
    pub quiet: bool,            // --quiet
    pub dry_run: bool,          // --dry-run

    // Discovery
    pub search_root: Option<String>, // --root
    pub max_depth: Option<usize>,    // --max-depth

    // Launching
    pub cli_command: Option<Vec<String>>, // --cli-command

    // Bundler state
    pub project_root: Option<String>, // build --project-root
    pub out_dir: Option<String>,      // build --out-dir
    pub dev_address: Option<String>,  // dev --address
    pub https: bool,                  // dev --https

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}
