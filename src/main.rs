use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;

use dispatch_agent::config::AppConfig;
use dispatch_agent::routes;
use dispatch_agent::services::ai::gemini::GeminiProvider;
use dispatch_agent::services::ai::openai::OpenAiProvider;
use dispatch_agent::services::ai::LlmProvider;
use dispatch_agent::services::sessions::SessionRegistry;
use dispatch_agent::services::telephony::retell::RetellClient;
use dispatch_agent::state::AppState;
use dispatch_agent::store::RecordStore;

fn select_llm(config: &AppConfig) -> Option<Box<dyn LlmProvider>> {
    if !config.gemini_api_key.is_empty() {
        tracing::info!("using Gemini LLM provider (model: {})", config.gemini_model);
        Some(Box::new(GeminiProvider::new(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
        )))
    } else if !config.openai_api_key.is_empty() {
        tracing::info!("using OpenAI LLM provider (model: {})", config.openai_model);
        Some(Box::new(OpenAiProvider::new(
            config.openai_api_key.clone(),
            config.openai_model.clone(),
        )))
    } else {
        tracing::warn!("no LLM provider key set, live replies disabled");
        None
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    if config.retell_api_key.is_empty() {
        tracing::warn!("RETELL_API_KEY not set, outbound calls will fail");
    }
    let telephony = RetellClient::new(
        config.retell_api_key.clone(),
        config.start_call_url(),
        config.reply_url(),
    );

    let state = Arc::new(AppState {
        store: Mutex::new(RecordStore::new()),
        config: config.clone(),
        llm: select_llm(&config),
        telephony: Box::new(telephony),
        sessions: SessionRegistry::new(),
    });

    let app = routes::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
