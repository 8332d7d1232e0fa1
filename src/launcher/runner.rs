use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use std::path::PathBuf;
use std::process::Stdio;

use crate::core::error::{BridgeError, Result};
use crate::logging;

/// Something that can execute the packaging CLI with a list of arguments
#[async_trait]
pub trait RunCli: Send + Sync {
    /// Run to completion; a non-zero exit is an error
    async fn run(&self, args: Vec<String>) -> Result<()>;
}

/// Runs the packaging CLI as a child process with inherited stdio
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TauriCli {
    command: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl TauriCli {
    /// `command` is the program followed by any leading arguments, e.g. `["cargo", "tauri"]`
    pub fn new(command: Vec<String>) -> Self {
        Self {
            command,
            working_dir: None,
        }
    }

    pub fn working_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        self.command.first().map(String::as_str).unwrap_or_default()
    }

    /// Full argument vector: leading command arguments followed by `args`
    pub fn full_args(&self, args: &[String]) -> Vec<String> {
        self.command
            .iter()
            .skip(1)
            .chain(args.iter())
            .cloned()
            .collect()
    }
}

#[async_trait]
impl RunCli for TauriCli {
    async fn run(&self, args: Vec<String>) -> Result<()> {
        let program = self.program();
        if program.is_empty() {
            return Err(BridgeError::Launch("no program configured".to_string()));
        }

        let full_args = self.full_args(&args);
        logging::log_launch(program, &full_args);

        let mut command = Command::new(program);
        command
            .args(&full_args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(ref dir) = self.working_dir {
            command.current_dir(dir);
        }

        let status = command
            .status()
            .await
            .map_err(|e| BridgeError::Launch(format!("{program}: {e}")))?;

        if status.success() {
            Ok(())
        } else {
            Err(BridgeError::CliFailed(status.code()))
        }
    }
}

/// Prints the argument vector as a JSON array instead of launching anything
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DryRun {
    inner: TauriCli,
}

impl DryRun {
    pub fn new(inner: TauriCli) -> Self {
        Self { inner }
    }

    /// The line `run` prints for `args`
    pub fn render(&self, args: &[String]) -> Result<String> {
        let mut line = vec![self.inner.program().to_string()];
        line.extend(self.inner.full_args(args));
        Ok(serde_json::to_string(&line)?)
    }
}

#[async_trait]
impl RunCli for DryRun {
    async fn run(&self, args: Vec<String>) -> Result<()> {
        let mut line = self.render(&args)?;
        line.push('\n');

        let mut stdout = tokio::io::stdout();
        stdout.write_all(line.as_bytes()).await?;
        stdout.flush().await?;
        Ok(())
    }
}

/// Either a real launch or a dry run, picked at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Runner {
    Process(TauriCli),
    DryRun(DryRun),
}

impl Runner {
    pub fn new(cli: TauriCli, dry_run: bool) -> Self {
        if dry_run {
            Runner::DryRun(DryRun::new(cli))
        } else {
            Runner::Process(cli)
        }
    }
}

#[async_trait]
impl RunCli for Runner {
    async fn run(&self, args: Vec<String>) -> Result<()> {
        match self {
            Runner::Process(cli) => cli.run(args).await,
            Runner::DryRun(dry_run) => dry_run.run(args).await,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    fn strings(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_program_and_full_args() {
        let cli = TauriCli::new(strings(&["cargo", "tauri"]));

        assert_eq!(cli.program(), "cargo");
        assert_eq!(
            cli.full_args(&strings(&["dev", "--verbose"])),
            strings(&["tauri", "dev", "--verbose"])
        );
    }

    #[test]
    fn test_program__empty_command() {
        let cli = TauriCli::new(Vec::new());

        assert_eq!(cli.program(), "");
        assert_eq!(cli.full_args(&strings(&["dev"])), strings(&["dev"]));
    }

    #[tokio::test]
    async fn test_run__empty_command_is_launch_error() {
        let result = TauriCli::new(Vec::new()).run(strings(&["dev"])).await;

        assert!(matches!(result, Err(BridgeError::Launch(_))));
    }

    #[tokio::test]
    async fn test_run__missing_program_is_launch_error() {
        let cli = TauriCli::new(strings(&["tauri-bridge-no-such-program-xyz"]));

        let result = cli.run(strings(&["build"])).await;

        match result {
            Err(BridgeError::Launch(msg)) => {
                assert!(msg.starts_with("tauri-bridge-no-such-program-xyz"))
            }
            other => panic!("Expected Launch error, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run__success() {
        let cli = TauriCli::new(strings(&["true"]));

        assert!(cli.run(strings(&["dev"])).await.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run__failure_exit_code() {
        let cli = TauriCli::new(strings(&["sh", "-c", "exit 7"]));

        let result = cli.run(Vec::new()).await;

        assert!(matches!(result, Err(BridgeError::CliFailed(Some(7)))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run__uses_working_dir() -> TestResult {
        let temp_dir = tempfile::tempdir()?;
        let cli =
            TauriCli::new(strings(&["sh", "-c", "test -f marker"])).working_dir(temp_dir.path());

        assert!(cli.run(Vec::new()).await.is_err());
        std::fs::write(temp_dir.path().join("marker"), "")?;
        assert!(cli.run(Vec::new()).await.is_ok());
        Ok(())
    }

    #[test]
    fn test_dry_run__render() -> TestResult {
        let dry_run = DryRun::new(TauriCli::new(strings(&["npx", "tauri"])));

        let line = dry_run.render(&strings(&["build", "--config", r#"{"build":{}}"#]))?;
        let parsed: Vec<String> = serde_json::from_str(&line)?;

        assert_eq!(
            parsed,
            strings(&["npx", "tauri", "build", "--config", r#"{"build":{}}"#])
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_dry_run__run_does_not_launch() {
        let dry_run = DryRun::new(TauriCli::new(strings(&["tauri-bridge-no-such-program-xyz"])));

        assert!(dry_run.run(strings(&["dev"])).await.is_ok());
    }

    #[test]
    fn test_runner__selection() {
        let cli = TauriCli::new(strings(&["cargo", "tauri"]));

        assert!(matches!(Runner::new(cli.clone(), false), Runner::Process(_)));
        assert!(matches!(Runner::new(cli, true), Runner::DryRun(_)));
    }
}
