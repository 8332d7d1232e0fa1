use clap::{CommandFactory, Parser};
use tauri_bridge::config::{CliConfig, Config};
use tauri_bridge::core::constants::exit_codes;
use tauri_bridge::logging;
use tauri_bridge::ui::{Cli, Commands, cli_to_config, print_completions};
use tauri_bridge::{
    BridgeError, ResolvedConfig, Result, Runner, ServerAddress, TauriPlugin,
    locate_project_config,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Handle completion commands first
    if let Commands::CompletionGenerate { shell } = cli.command {
        let mut app = Cli::command();
        print_completions(shell, &mut app);
        std::process::exit(exit_codes::SUCCESS);
    }

    let cli_config = cli_to_config(&cli);
    let config = match load_and_merge_config(&cli_config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(exit_codes::FAILURE);
        }
    };

    logging::init_logger(config.verbose.unwrap_or(false), cli_config.quiet);
    logging::log_config_info(&config);

    match run_bridge_logic(&cli, &config, cli_config.dry_run).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            logging::log_error("tauri-bridge failed", Some(&e));
            std::process::exit(e.exit_code());
        }
    }
}

/// Load the settings file (unless disabled) and apply CLI overrides
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file)?
    } else {
        Config::load_from_standard_locations()
    };

    // Merge CLI arguments with configuration (CLI takes precedence)
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}

/// Dispatch a subcommand and return the process exit code
pub async fn run_bridge_logic(cli: &Cli, config: &Config, dry_run: bool) -> Result<i32> {
    match cli.command {
        Commands::Dev { .. } => run_dev(config, dry_run).await,
        Commands::Build { .. } => run_build(config, dry_run).await,
        Commands::Locate => run_locate(config).await,
        Commands::CompletionGenerate { .. } => Ok(exit_codes::SUCCESS),
    }
}

fn plugin_for(config: &Config, dry_run: bool) -> TauriPlugin<Runner> {
    let runner = Runner::new(config.tauri_cli(), dry_run);
    let mut plugin = TauriPlugin::new(config.tauri_options(), config.search_settings(), runner);
    plugin.config_resolved(
        ResolvedConfig::new(config.project_root(), config.out_dir())
            .https(config.https.unwrap_or(false)),
    );
    plugin
}

async fn run_dev(config: &Config, dry_run: bool) -> Result<i32> {
    let mut plugin = plugin_for(config, dry_run);

    if plugin.configure_server().await?.is_config_missing() {
        return Ok(exit_codes::SUCCESS);
    }

    let address = ServerAddress::parse(config.dev_address());
    if let Some(handle) = plugin.server_listening(&address)? {
        // The dev loop lives as long as the Tauri CLI does
        handle
            .await
            .map_err(|e| BridgeError::Launch(e.to_string()))??;
    }

    Ok(exit_codes::SUCCESS)
}

async fn run_build(config: &Config, dry_run: bool) -> Result<i32> {
    let plugin = plugin_for(config, dry_run);
    plugin.close_bundle().await?;
    Ok(exit_codes::SUCCESS)
}

async fn run_locate(config: &Config) -> Result<i32> {
    if let Some(path) = locate_project_config(&config.search_settings()).await? {
        println!("{}", path.display());
    }
    Ok(exit_codes::SUCCESS)
}
