use serde::Serialize;

use std::path::{Path, PathBuf};

use crate::core::constants::cli;
use crate::core::error::Result;
use crate::discovery::config_dir;

/// Options forwarded to the packaging CLI
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TauriOptions {
    /// `Some(false)` asks `dev` for a release build, `Some(true)` asks `build` for a debug one
    pub debug: Option<bool>,
    pub target: Option<String>,
    pub verbose: bool,
}

#[derive(Serialize)]
struct InlineConfig<T: Serialize> {
    build: T,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DevBuild<'a> {
    dev_path: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DistBuild<'a> {
    dist_dir: &'a str,
}

/// Arguments for `tauri dev` pointed at a running dev server
pub fn dev_args(dev_url: &str, options: &TauriOptions) -> Result<Vec<String>> {
    let inline = serde_json::to_string(&InlineConfig {
        build: DevBuild { dev_path: dev_url },
    })?;

    let mut args = vec![cli::DEV.to_string(), cli::CONFIG_FLAG.to_string(), inline];
    if options.debug == Some(false) {
        args.push(cli::RELEASE_FLAG.to_string());
    }
    push_common_flags(&mut args, options);

    Ok(args)
}

/// Arguments for `tauri build` pointed at the bundler output
pub fn build_args(dist_dir: &str, options: &TauriOptions) -> Result<Vec<String>> {
    let inline = serde_json::to_string(&InlineConfig {
        build: DistBuild { dist_dir },
    })?;

    let mut args = vec![cli::BUILD.to_string(), cli::CONFIG_FLAG.to_string(), inline];
    if options.debug == Some(true) {
        args.push(cli::DEBUG_FLAG.to_string());
    }
    push_common_flags(&mut args, options);

    Ok(args)
}

fn push_common_flags(args: &mut Vec<String>, options: &TauriOptions) {
    if let Some(ref target) = options.target {
        args.push(cli::TARGET_FLAG.to_string());
        args.push(target.clone());
    }
    if options.verbose {
        args.push(cli::VERBOSE_FLAG.to_string());
    }
}

/// The bundler output directory as seen from the project configuration.
///
/// `out_dir` is resolved against the bundler `root` and expressed relative to
/// the directory containing `config_path`. If no relative path exists the
/// absolute output directory is returned.
pub fn dist_dir(config_path: &Path, root: &Path, out_dir: &Path) -> PathBuf {
    let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
    let out_dir = root.join(out_dir);
    pathdiff::diff_paths(&out_dir, config_dir(config_path)).unwrap_or(out_dir)
}
