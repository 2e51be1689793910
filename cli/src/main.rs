//! Event space booking service: CLI server
//!
//! Headless REST API for the event space marketplace, suitable for
//! deployment as a systemd service, Docker container, or standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/eventspace/config.toml)
//! eventspace-service
//!
//! # Custom config path
//! eventspace-service --config /etc/eventspace/config.toml
//!
//! # Override the listen port
//! eventspace-service --port 8080
//!
//! # Validate config without starting
//! eventspace-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use eventspace::config::AppConfig;
use eventspace::server::{init_tracing, ServerHandle, ServerOptions};

/// Event space booking service, hourly rentals of event spaces.
#[derive(Parser, Debug)]
#[command(
    name = "eventspace-service",
    version,
    about = "REST API for listing, searching and booking event spaces by the hour",
    long_about = "Event space booking service: REST API for hosts listing spaces \
                  and guests booking them by the hour.\n\n\
                  Default config: ~/.config/eventspace/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "EVENTSPACE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(eventspace::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", config_path.display(), e);
            eprintln!("Using default configuration.");
            AppConfig::default()
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.server.address());
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        println!("   Service fee : {}%", config.booking.service_fee_percent);
        return Ok(());
    }

    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    // ── Start server ───────────────────────────────────────────
    let handle = match ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await
    {
        Ok(handle) => handle,
        Err(e) => {
            error!("Failed to start server: {}", e);
            return Err(e);
        }
    };

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
