use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use chatpage_openai::client::OpenAiClient;
use chatpage_openai::generator::TextGenerator;
use chatpage_server::config::ServerConfig;
use chatpage_server::router;
use chatpage_server::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = ServerConfig::from_env()?;

    let generator: Option<Arc<dyn TextGenerator>> = match config.openai {
        Some(openai) => Some(Arc::new(OpenAiClient::new(openai)?)),
        None => {
            tracing::warn!("OPENAI_API_KEY is not set; generation requests will fail");
            None
        }
    };

    let app = router(AppState::new(generator));

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!(addr = %config.bind, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("failed to listen for shutdown signal: {e}");
            }
        })
        .await?;

    Ok(())
}
