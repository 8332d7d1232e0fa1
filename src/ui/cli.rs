// Command-line interface definitions and parsing for tauri-bridge

use crate::config::CliConfig;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    // Packaging Options
    /// Build the app in debug mode
    #[arg(
        long,
        global = true,
        conflicts_with = "release",
        help_heading = "Packaging Options"
    )]
    pub debug: bool,

    /// Build the app in release mode
    #[arg(long, global = true, help_heading = "Packaging Options")]
    pub release: bool,

    /// Target triple to build against
    #[arg(
        long,
        value_name = "TRIPLE",
        global = true,
        help_heading = "Packaging Options"
    )]
    pub target: Option<String>,

    /// Command used to run the Tauri CLI (default: "cargo tauri")
    #[arg(
        long,
        value_name = "COMMAND",
        global = true,
        help_heading = "Packaging Options"
    )]
    pub cli_command: Option<String>,

    /// Print the Tauri CLI invocation instead of running it
    #[arg(long, global = true, help_heading = "Packaging Options")]
    pub dry_run: bool,

    // Discovery
    /// Directory to search for the Tauri configuration (default: current directory)
    #[arg(long, value_name = "DIR", global = true, help_heading = "Discovery")]
    pub root: Option<String>,

    /// How many directories deep to search (default: 3)
    #[arg(long, value_name = "DEPTH", global = true, help_heading = "Discovery")]
    pub max_depth: Option<usize>,

    // Output & Verbosity
    /// Enable verbose logging and pass --verbose to the Tauri CLI
    #[arg(short = 'v', long, global = true, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Only print errors
    #[arg(short = 'q', long, global = true, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", global = true, help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, global = true, help_heading = "Configuration")]
    pub no_config: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run `tauri dev` against a listening dev server
    Dev {
        /// Address the dev server is bound to (default: localhost:1420)
        #[arg(long, value_name = "ADDRESS")]
        address: Option<String>,

        /// The dev server uses TLS
        #[arg(long)]
        https: bool,
    },
    /// Run `tauri build` after the bundler has written its output
    Build {
        /// Bundler output directory (default: dist)
        #[arg(long, value_name = "DIR")]
        out_dir: Option<String>,

        /// Bundler root the output directory is relative to
        #[arg(long, value_name = "DIR")]
        project_root: Option<String>,
    },
    /// Print the Tauri configuration file that would be used
    Locate,
    /// Generate shell completions
    #[command(name = "completion-generate", arg_required_else_help = true)]
    CompletionGenerate {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Convert the derive-based CLI into the merge-ready CliConfig
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    let global = &cli.global;
    let debug = if global.debug {
        Some(true)
    } else if global.release {
        Some(false)
    } else {
        None
    };

    let mut cli_config = CliConfig {
        debug,
        target: global.target.clone(),
        verbose: global.verbose,
        quiet: global.quiet,
        dry_run: global.dry_run,
        search_root: global.root.clone(),
        max_depth: global.max_depth,
        cli_command: global.cli_command.as_deref().map(split_command),
        config_file: global.config.clone(),
        no_config: global.no_config,
        ..Default::default()
    };

    match &cli.command {
        Commands::Dev { address, https } => {
            cli_config.dev_address = address.clone();
            cli_config.https = *https;
        }
        Commands::Build {
            out_dir,
            project_root,
        } => {
            cli_config.out_dir = out_dir.clone();
            cli_config.project_root = project_root.clone();
        }
        Commands::Locate | Commands::CompletionGenerate { .. } => {}
    }

    cli_config
}

fn split_command(command: &str) -> Vec<String> {
    command.split_whitespace().map(str::to_string).collect()
}
