//! # Sweet Crumbs Storefront
//!
//! ```text
//! storefront [--config <path>]
//! ```
//!
//! Configuration comes from `--config`, `CRUMBS_CONFIG` or the platform
//! config directory, then `CRUMBS_*` environment overrides. Log filtering
//! follows `RUST_LOG`.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crumbs_core::fallback::FallbackContent;
use storefront::{build_router, AppState, SiteConfig};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Sweet Crumbs storefront server")]
struct Args {
    /// TOML config file; defaults to `CRUMBS_CONFIG` or the platform config dir
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();

    let config = SiteConfig::load(args.config).context("Failed to load configuration")?;
    info!(
        bind = %config.server.bind_address(),
        base_url = %config.base_url(),
        cms = config.cms.is_configured(),
        production = config.site.production,
        "Configuration loaded"
    );

    let bind_addr = config.server.bind_address();
    let state = AppState::from_config(config, FallbackContent::bakery())
        .context("Failed to initialise application state")?;
    let app = build_router(state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {bind_addr}"))?;
    info!(addr = %bind_addr, "Storefront listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Log filter defaults to `info,storefront=debug,crumbs_cms=debug`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug,crumbs_cms=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_flag() {
        let args = Args::try_parse_from(["storefront", "--config", "site.toml"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("site.toml")));

        let args = Args::try_parse_from(["storefront", "-c", "other.toml"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("other.toml")));

        assert_eq!(Args::try_parse_from(["storefront"]).unwrap().config, None);
    }

    #[test]
    fn test_rejects_unknown_arguments() {
        assert!(Args::try_parse_from(["storefront", "--port", "80"]).is_err());
        assert!(Args::try_parse_from(["storefront", "--config"]).is_err());
    }
}
