use std::{net::SocketAddr, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use dotenvy::dotenv;
use license_checker::{AppState, Config, LicenseCodeSet, build_router};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "license-checker")]
#[command(about = "License code issuance and validation service")]
struct Cli {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// JSON file holding the `licenseCodes` array
    #[arg(long, env = "LICENSE_CODES_PATH", default_value = "data/license-codes.json")]
    license_codes: PathBuf,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_target(false)
        .compact()
        .init();

    let codes = LicenseCodeSet::load(&cli.license_codes).with_context(|| {
        format!("Failed to load license codes from {}", cli.license_codes.display())
    })?;
    info!(
        "Loaded {} license codes from {}",
        codes.len(),
        cli.license_codes.display()
    );

    let config = Config::from_env()?;
    let state = AppState::new(codes, config);
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port)
        .parse()
        .context("Invalid bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running on {}", addr);

    axum::serve(listener, app).await.context("HTTP server failed")?;

    Ok(())
}
