//! Waitlist Server
//!
//! Serves the signup endpoint at /api/waitlist. Signups are written to the log.

use admirals_chronicle::core::config::{config, set_config};
use admirals_chronicle::core::ChronicleConfig;
use admirals_chronicle::waitlist::{waitlist_router, LogSink, SharedSink, WAITLIST_ROUTE};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

/// Waitlist Server - accepts early-access signups
#[derive(Parser, Debug)]
#[command(name = "waitlist_server")]
#[command(about = "Serve the waitlist signup endpoint")]
struct Args {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bind address, overriding the config (e.g. 0.0.0.0:8080)
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let mut loaded = ChronicleConfig::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        loaded.waitlist_bind = bind;
        loaded.validate()?;
    }
    if set_config(loaded).is_err() {
        tracing::warn!("config already initialized");
    }
    let cfg = config();
    let addr = cfg.waitlist_addr()?;

    let sink: SharedSink = Arc::new(LogSink);
    let app = waitlist_router(sink);

    tracing::info!(%addr, route = WAITLIST_ROUTE, environment = ?cfg.environment, "waitlist server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
