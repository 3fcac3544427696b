//! Main entry point for the bgpeepr-rs CLI tool

use bgpeepr_rs::cli::Cli;
use bgpeepr_rs::config::AppConfig;
use log::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_normalized();

    // Load configuration before logging is up; report failures afterwards
    let loaded = AppConfig::load();
    let verbose = cli.verbose
        || loaded
            .as_ref()
            .map(|config| config.global.verbose)
            .unwrap_or(false);

    // Initialize logging
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    info!("Starting bgpeepr-rs v{}", env!("CARGO_PKG_VERSION"));

    let config = loaded.unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {}, using defaults", e);
        AppConfig::default()
    });

    // Execute CLI logic
    cli.run(config).await?;

    Ok(())
}
