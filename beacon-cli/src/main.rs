use anyhow::{Context, Result};
use beacon_server::RelayConfig;
use clap::Parser;
use colored::*;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// WebRTC signaling relay: rooms of WebSocket clients exchanging
/// offers, answers and ICE candidates.
#[derive(Parser)]
#[command(name = "beacon")]
struct Cli {
    /// Interface to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Seconds between server stats log lines, 0 disables them
    #[arg(long, default_value_t = 30)]
    stats_interval: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("{}", "🚀 Starting beacon signaling relay...".green().bold());
    println!("   📡 ws://{}:{}", cli.host, cli.port);

    let config = RelayConfig {
        host: cli.host,
        port: cli.port,
        stats_interval: Duration::from_secs(cli.stats_interval),
    };

    beacon_server::run(config)
        .await
        .context("signaling relay exited with an error")?;

    Ok(())
}
