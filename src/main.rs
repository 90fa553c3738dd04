use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use callbridge::{ServerConfig, routes, state::AppState};

/// Call bridge - relays Twilio call speech to a conversational engine
#[derive(Parser, Debug)]
#[command(name = "callbridge")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (must be done before config loading)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // Load configuration from file or environment
    let config = if let Some(config_path) = cli.config {
        info!("Loading configuration from {}", config_path.display());
        ServerConfig::from_file(&config_path).map_err(|e| anyhow!(e.to_string()))?
    } else {
        ServerConfig::from_env().map_err(|e| anyhow!(e.to_string()))?
    };

    let address = config.address();
    info!(
        engine_url = %config.engine_url,
        language_stt = %config.language_stt,
        language_tts = %config.language_tts,
        "Bridge configured"
    );
    match &config.webhook_url {
        Some(webhook_url) => info!("Twilio will send messages to this server on: {webhook_url}"),
        None => info!("No WEBHOOK_FOR_TWILIO set, gathers will post back to the request URL"),
    }

    let app_state = AppState::new(config)
        .await
        .map_err(|e| anyhow!("Failed to create engine client: {}", e))?;

    let app = routes::api::create_api_router().with_state(app_state);

    let socket_addr: SocketAddr = address
        .parse()
        .map_err(|e| anyhow!("Invalid server address '{}': {}", address, e))?;

    info!("Server listening on http://{}", socket_addr);

    let listener = TcpListener::bind(&socket_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
