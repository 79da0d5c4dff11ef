use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use todos_api::app::{self, AppState};
use todos_api::config;

#[derive(Parser)]
#[command(name = "todos-api", version, about = "Todo list HTTP API")]
struct Cli {
    #[arg(long, help = "Address to bind (overrides SERVER_HOST)")]
    host: Option<String>,

    #[arg(long, help = "Port to listen on (overrides SERVER_PORT)")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up APP_ENV, SERVER_PORT, etc.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    // Initialize configuration (this loads the config singleton)
    let mut config = config::config().clone();
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!todos_api::is_production!())
        .init();

    tracing::info!("Starting todos API in {:?} mode", config.environment);

    // Wiring problems stop the process here, never at request time
    let state = AppState::from_config(&config).context("invalid mediator wiring")?;
    let app = app::router(state, &config);

    let bind_addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Todos API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
