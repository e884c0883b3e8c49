/// VertoVoice - a Slack bot that turns shared links and PDFs into LinkedIn
/// post drafts.
///
/// A user drops a web link, a YouTube video or a PDF into a channel. The bot
/// extracts the content, parks it under the message's thread and posts a
/// voice picker. Clicking a voice generates two drafts with OpenAI and posts
/// them back in the thread.
///
/// # Architecture
///
/// The system uses:
/// - axum for the Slack webhook endpoints
/// - Tokio tasks for extraction and generation after the ack
/// - slack-morphism and the Slack Web API for posting
/// - scraper and lopdf for page and PDF text, Gemini for video
/// - the OpenAI Responses API for drafting
///
/// # Example
///
/// ```no_run
/// use vertovoice::core::config::AppConfig;
/// use vertovoice::core::state::AppState;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     vertovoice::setup_logging();
///
///     let config = AppConfig::from_env()?;
///     let state = AppState::from_config(&config)?;
///     let app = vertovoice::api::build_router(state);
///
///     let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
///     axum::serve(listener, app).await?;
///     Ok(())
/// }
/// ```
// Module declarations
pub mod ai;
pub mod api;
pub mod core;
pub mod errors;
pub mod extract;
pub mod slack;
pub mod utils;
pub mod worker;

pub use errors::SlackError;

/// Configure structured logging with JSON output.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Calling this more
/// than once is harmless; later calls leave the first subscriber in place.
///
/// # Example
///
/// ```
/// vertovoice::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
