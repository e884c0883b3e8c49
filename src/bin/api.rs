use tracing::{error, info};
use vertovoice::core::config::AppConfig;
use vertovoice::core::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    vertovoice::setup_logging();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        anyhow::anyhow!(e)
    })?;
    let state = AppState::from_config(&config)?;
    let app = vertovoice::api::build_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!(port = config.port, model = %config.openai_model, "VertoVoice listening");
    axum::serve(listener, app).await?;

    Ok(())
}
