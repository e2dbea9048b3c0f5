//! ct-gossip - Certificate Transparency gossip relay

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ct_gossip::api::{create_router, AppState};
use ct_gossip::config::Config;
use ct_gossip::traits::FeedbackVerifier;
use ct_gossip::{EncodingVerifier, PermissiveVerifier, SamplingStrategy, SqliteStore};

#[derive(Parser, Debug)]
#[command(name = "ct-gossip")]
#[command(about = "Certificate Transparency SCT feedback and STH pollination relay")]
struct Args {
    /// Host to bind to
    #[arg(long, env = "CT_GOSSIP_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to bind to
    #[arg(long, env = "CT_GOSSIP_PORT", default_value = "8080")]
    port: u16,

    /// Path to SQLite database
    #[arg(long, env = "CT_GOSSIP_DB", default_value = "./gossip.db")]
    database: String,

    /// Log level
    #[arg(long, env = "CT_GOSSIP_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Number of random fresh STHs returned per pollination request
    #[arg(long, env = "CT_GOSSIP_SAMPLE_LIMIT", default_value = "10")]
    sample_limit: usize,

    /// Drop feedback whose certificates or SCTs are not valid base64
    #[arg(long, env = "CT_GOSSIP_STRICT_ENCODING")]
    strict_encoding: bool,

    /// Sampling strategy: native | reservoir
    #[arg(long, env = "CT_GOSSIP_SAMPLING", default_value = "native")]
    sampling: SamplingStrategy,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            host: args.host,
            port: args.port,
            database_path: args.database,
            log_level: args.log_level,
            sample_limit: args.sample_limit,
            strict_encoding: args.strict_encoding,
            sampling: args.sampling,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config: Config = Args::parse().into();
    config.validate()?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_level))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting ct-gossip v{}", env!("CARGO_PKG_VERSION"));

    let store = Arc::new(
        SqliteStore::with_config(config.to_sqlite_config())
            .with_context(|| format!("opening database {}", config.database_path))?,
    );

    let verifier: Arc<dyn FeedbackVerifier> = if config.strict_encoding {
        Arc::new(EncodingVerifier)
    } else {
        Arc::new(PermissiveVerifier)
    };

    let state = Arc::new(AppState {
        storage: store.clone(),
        verifier,
        sample_limit: config.sample_limit,
    });

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    tracing::info!(addr = %addr, sample_limit = config.sample_limit, "Listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    store.close()?;
    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
