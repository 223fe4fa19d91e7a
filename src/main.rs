use anyhow::Context;
use clap::Parser;
use gemini_relay::api::{build_routes, RELAY_PATH};
use gemini_relay::core::models::{RelayConfig, DEFAULT_MODEL, DEFAULT_UPSTREAM_BASE};
use gemini_relay::state::AppState;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// Gemini API key; requests fail with 500 while unset
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Allowed CORS origin (any origin when unset)
    #[arg(long, env = "FRONTEND_URL")]
    allowed_origin: Option<String>,

    #[arg(long, env = "GEMINI_API_BASE", default_value = DEFAULT_UPSTREAM_BASE)]
    upstream_base: String,

    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Outbound request timeout in seconds (no timeout when unset)
    #[arg(long, env = "REQUEST_TIMEOUT_SECS")]
    request_timeout: Option<u64>,
}

impl Args {
    fn into_config(self) -> anyhow::Result<RelayConfig> {
        let config = RelayConfig::new(&self.upstream_base, &self.model)?
            .with_api_key(self.api_key)
            .with_allowed_origin(self.allowed_origin)?
            .with_request_timeout(self.request_timeout.map(Duration::from_secs));
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 可选
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Ok(path) = dotenv {
        tracing::debug!("Loaded environment from {:?}", path);
    }

    let args = Args::parse();
    let addr = SocketAddr::new(args.host, args.port);
    let config = args.into_config().context("Invalid configuration")?;

    if config.api_key().is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; relay requests will fail until it is configured");
    }
    match config.allowed_origin() {
        Some(origin) => tracing::info!("CORS allowed origin: {:?}", origin),
        None => tracing::info!("CORS allows any origin"),
    }
    tracing::info!("Upstream endpoint: {}", config.endpoint());

    let state = AppState::new(config).context("Failed to build upstream client")?;
    let app = build_routes(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Proxy server listening on {}", addr);
    tracing::info!("Relay endpoint: POST http://{}{}", addr, RELAY_PATH);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
