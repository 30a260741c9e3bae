#![cfg_attr(not(test), deny(clippy::panic))]

use clap::Parser;
use game_registry::config::{self, Config};
use game_registry::http;
use game_registry::logging;
use game_registry::server::RegistryService;
use std::net::SocketAddr;

/// Game registry -- game server registry and message router
#[derive(Parser, Debug)]
#[command(name = "game-registry")]
#[command(about = "Game server registry with capacity-aware player assignment and message routing")]
#[command(version)]
struct Cli {
    /// Validate configuration and exit without starting the server.
    #[arg(long, short = 'c', conflicts_with = "print_config")]
    validate_config: bool,

    /// Print the loaded configuration to stdout (as JSON, secrets redacted) and exit.
    #[arg(long, conflicts_with = "validate_config")]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = config::load();

    if cli.print_config {
        let json = serde_json::to_string_pretty(&redacted(&cfg)?)
            .map_err(|e| anyhow::anyhow!("Failed to serialize config: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    // load() only reports validation errors; here they decide the exit code.
    let validation_result = config::validate_config(&cfg);

    if cli.validate_config {
        match validation_result {
            Ok(()) => {
                println!("Configuration validation passed");
                println!();
                println!("Configuration summary:");
                println!("  Port: {}", cfg.port);
                println!(
                    "  Default max players per server: {}",
                    cfg.registry.default_max_players
                );
                println!("  Broker enabled: {}", cfg.broker.enabled);
                if cfg.broker.enabled {
                    println!(
                        "  Broker endpoint: {}:{} (vhost {})",
                        cfg.broker.host, cfg.broker.port, cfg.broker.vhost
                    );
                }
                return Ok(());
            }
            Err(e) => {
                eprintln!("Configuration validation failed:\n{e}");
                std::process::exit(1);
            }
        }
    }

    validation_result?;

    let _log_guard = logging::init_with_config(&cfg.logging);

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
    let service = RegistryService::from_config(&cfg).await?;

    http::run_server(addr, service, &cfg.security.cors_origins, shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}

fn redacted(cfg: &Config) -> anyhow::Result<serde_json::Value> {
    let mut value = serde_json::to_value(cfg)?;
    if let Some(password) = value.pointer_mut("/broker/password") {
        *password = serde_json::Value::String("<redacted>".to_string());
    }
    Ok(value)
}
