//! ExpirySync — CLI Server
//!
//! Headless inventory-expiry tracking service suitable for deployment
//! as a systemd service, Docker container, or standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/expirysync/config.toml)
//! expirysyncd
//!
//! # Custom config path
//! expirysyncd --config /etc/expirysync/config.toml
//!
//! # Override port
//! expirysyncd --api-port 8080
//!
//! # Validate config without starting
//! expirysyncd --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use expirysync::config::AppConfig;
use expirysync::server::{init_tracing, ServerHandle, ServerOptions};

/// ExpirySync — inventory-expiry tracking server.
#[derive(Parser, Debug)]
#[command(
    name = "expirysyncd",
    version,
    about = "Inventory-expiry tracking service",
    long_about = "ExpirySync — REST API + WebSocket server \
                  for tracking product expiry, stock levels and urgency.\n\n\
                  Default config: ~/.config/expirysync/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "EXPIRYSYNC_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip seeding the demo data set.
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(expirysync::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Init tracing first so subsequent logs are formatted properly
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            let cfg = AppConfig::default();
            init_tracing(&cfg);
            tracing::error!(
                "Failed to load config from {}: {}",
                config_path.display(),
                e
            );
            tracing::error!("Using default configuration.");
            cfg
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.api_port {
        info!("CLI override: api_port = {}", port);
        config.server.api_port = port;
    }
    if let Some(ref level) = cli.log_level {
        info!("CLI override: log_level = {}", level);
        config.logging.level = level.clone();
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("✅ Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!(
            "   API address : {}:{}",
            config.server.api_host, config.server.api_port
        );
        println!("   Database    : {}", config.database.connection_url());
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        seed_demo_data: !cli.no_seed,
    })
    .await?;

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    // Wait for shutdown signal, then clean up
    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
