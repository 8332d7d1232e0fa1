use crate::config::Config;
use log::{debug, error, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Error
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format(|buf, record| writeln!(buf, "[tauri-bridge] {}", record.args()))
        .init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log the effective configuration
pub fn log_config_info(config: &Config) {
    let root = config.search_root.as_deref().unwrap_or(".");
    let max_depth = config.max_depth.unwrap_or_default();
    let command = config.cli_command.as_deref().unwrap_or_default().join(" ");

    debug!("Search: root={root}, max_depth={max_depth}");
    debug!("Packaging CLI: {command}");
    debug!(
        "Options: debug={:?}, target={:?}, verbose={}",
        config.debug,
        config.target,
        config.verbose.unwrap_or(false)
    );
}

/// Log the project configuration that will be used
pub fn log_config_found(path: &Path) {
    info!("{}", path.display());
}

/// Log that no project configuration exists below the search root
pub fn log_config_not_found(root: &Path) {
    info!(
        "No Tauri configuration found below {}, nothing to do",
        root.display()
    );
}

/// Log the candidates that lost to the chosen configuration
pub fn log_config_candidates(chosen: &Path, others: &[PathBuf]) {
    warn!(
        "Found {} Tauri configurations, using {}",
        others.len() + 1,
        chosen.display()
    );
    for (i, other) in others.iter().enumerate() {
        debug!("  {}. ignored {}", i + 1, other.display());
    }
}

/// Log a packaging CLI launch
pub fn log_launch(program: &str, args: &[String]) {
    debug!("Launching {program} {}", args.join(" "));
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}
