use tokio::task::JoinHandle;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::error::{BridgeError, Result};
use crate::discovery::{SearchSettings, locate_project_config};
use crate::hooks::address::ServerAddress;
use crate::launcher::{RunCli, TauriOptions, build_args, dev_args, dist_dir};
use crate::logging;

/// Bundler settings captured once its configuration is resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Bundler project root
    pub root: PathBuf,
    /// Build output directory, relative to `root` unless absolute
    pub out_dir: PathBuf,
    /// Dev server uses TLS
    pub https: bool,
}

impl ResolvedConfig {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(root: P, out_dir: Q) -> Self {
        Self {
            root: root.into(),
            out_dir: out_dir.into(),
            https: false,
        }
    }

    pub fn https(mut self, https: bool) -> Self {
        self.https = https;
        self
    }
}

/// What a lifecycle hook did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    /// Project configuration found; waiting for the dev server
    Ready(PathBuf),
    /// Packaging CLI ran to completion
    Launched(PathBuf),
    /// No project configuration below the search root; nothing to do
    ConfigNotFound,
}

impl HookOutcome {
    pub fn is_config_missing(&self) -> bool {
        matches!(self, HookOutcome::ConfigNotFound)
    }
}

/// Bundler lifecycle hooks that drive the Tauri CLI.
///
/// The serve side is `config_resolved` → `configure_server` →
/// `server_listening`; the build side is `config_resolved` → `close_bundle`.
pub struct TauriPlugin<R> {
    options: TauriOptions,
    search: SearchSettings,
    runner: Arc<R>,
    resolved: Option<ResolvedConfig>,
    project_config: Option<PathBuf>,
    listening_fired: bool,
}

impl<R: RunCli + 'static> TauriPlugin<R> {
    pub fn new(options: TauriOptions, search: SearchSettings, runner: R) -> Self {
        Self {
            options,
            search,
            runner: Arc::new(runner),
            resolved: None,
            project_config: None,
            listening_fired: false,
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Project configuration found by the last `configure_server`
    pub fn project_config(&self) -> Option<&Path> {
        self.project_config.as_deref()
    }

    /// Capture the resolved bundler configuration
    pub fn config_resolved(&mut self, config: ResolvedConfig) {
        self.resolved = Some(config);
    }

    fn resolved(&self) -> Result<&ResolvedConfig> {
        self.resolved.as_ref().ok_or_else(|| {
            BridgeError::Config("bundler configuration has not been resolved yet".to_string())
        })
    }

    /// Runs before the dev server starts serving
    pub async fn configure_server(&mut self) -> Result<HookOutcome> {
        self.resolved()?;

        match locate_project_config(&self.search).await? {
            Some(path) => {
                self.project_config = Some(path.clone());
                Ok(HookOutcome::Ready(path))
            }
            None => {
                self.project_config = None;
                Ok(HookOutcome::ConfigNotFound)
            }
        }
    }

    /// Runs once the dev server is listening.
    ///
    /// Launches `tauri dev` on a background task and returns its handle, which
    /// may be dropped. Only the first call launches; later calls return `None`.
    pub fn server_listening(
        &mut self,
        address: &ServerAddress,
    ) -> Result<Option<JoinHandle<Result<()>>>> {
        if self.listening_fired {
            return Ok(None);
        }
        if self.project_config.is_none() {
            return Err(BridgeError::Config(
                "no project configuration; configure_server must find one first".to_string(),
            ));
        }
        let https = self.resolved()?.https;

        let dev_url = address.dev_url(https).inspect_err(|e| {
            logging::log_error("Dev server is not reachable over HTTP", Some(e));
        })?;
        let args = dev_args(&dev_url, &self.options)?;
        self.listening_fired = true;

        let runner = Arc::clone(&self.runner);
        Ok(Some(tokio::spawn(async move { runner.run(args).await })))
    }

    /// Runs after a production bundle has been written; waits for `tauri build`
    pub async fn close_bundle(&self) -> Result<HookOutcome> {
        let resolved = self.resolved()?;

        let Some(config_path) = locate_project_config(&self.search).await? else {
            return Ok(HookOutcome::ConfigNotFound);
        };

        let dist = dist_dir(&config_path, &resolved.root, &resolved.out_dir);
        let args = build_args(&dist.to_string_lossy(), &self.options)?;
        self.runner.run(args).await?;

        Ok(HookOutcome::Launched(config_path))
    }
}
