//! Application-wide constants to avoid magic values throughout the codebase.

/// Project configuration discovery defaults
pub mod discovery {
    /// Matches the file names the Tauri CLI accepts as its project configuration
    pub const CONFIG_FILE_PATTERN: &str = r"(tauri\.conf\.(json|json5)|Tauri\.toml)$";
    /// Directory names skipped during discovery
    pub const IGNORE_PATTERNS: [&str; 2] = ["node_modules", "target"];
    /// How many directories below the search root are inspected
    pub const MAX_DEPTH: usize = 3;
    /// Upper bound accepted from configuration
    pub const MAX_DEPTH_LIMIT: usize = 64;
}

/// Dev server defaults
pub mod dev_server {
    /// Port the Tauri template expects the dev server on
    pub const DEFAULT_PORT: u16 = 1420;
    /// Host name used in generated dev URLs for loopback addresses
    pub const LOCALHOST: &str = "localhost";
    /// Default bound address when none is given
    pub const DEFAULT_ADDRESS: &str = "localhost:1420";
    /// Addresses that are rewritten to `localhost`
    pub const LOOPBACK_ALIASES: [&str; 4] = [
        "localhost",
        "127.0.0.1",
        "::1",
        "0000:0000:0000:0000:0000:0000:0000:0001",
    ];
}

/// Build defaults
pub mod build {
    /// Bundler output directory when none is configured
    pub const DEFAULT_OUT_DIR: &str = "dist";
}

/// Packaging CLI invocation
pub mod cli {
    /// Command used to run the packaging CLI
    pub const DEFAULT_COMMAND: [&str; 2] = ["cargo", "tauri"];
    /// Sub-command for the development loop
    pub const DEV: &str = "dev";
    /// Sub-command for production builds
    pub const BUILD: &str = "build";
    /// Flag carrying the inline JSON configuration
    pub const CONFIG_FLAG: &str = "--config";
    pub const RELEASE_FLAG: &str = "--release";
    pub const DEBUG_FLAG: &str = "--debug";
    pub const TARGET_FLAG: &str = "--target";
    pub const VERBOSE_FLAG: &str = "--verbose";
}

/// Configuration file lookup
pub mod config_file {
    /// Name of the optional tauri-bridge settings file
    pub const FILE_NAME: &str = ".tauri-bridge.toml";
    /// Parent directories searched for the settings file
    pub const PARENT_LEVELS: usize = 3;
}

/// Process exit codes
pub mod exit_codes {
    /// Launched, or nothing to do
    pub const SUCCESS: i32 = 0;
    /// Fatal error
    pub const FAILURE: i32 = 1;
}
