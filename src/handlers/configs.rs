use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::errors::AppError;
use crate::models::{AgentConfig, AgentConfigInput, AgentConfigSummary};
use crate::state::AppState;

// POST /config
pub async fn upsert_config(
    State(state): State<Arc<AppState>>,
    Json(input): Json<AgentConfigInput>,
) -> Result<Json<AgentConfig>, AppError> {
    let id = input.id;
    let saved = {
        let mut store = state.store.lock().unwrap();
        store.upsert_config(input)
    };

    match saved {
        Some(config) => {
            tracing::info!(config_id = config.id, name = %config.name, "saved agent config");
            Ok(Json(config))
        }
        None => Err(AppError::NotFound(format!("config {} not found", id.unwrap_or_default()))),
    }
}

// GET /configs
pub async fn list_configs(State(state): State<Arc<AppState>>) -> Json<Vec<AgentConfigSummary>> {
    let configs = state.store.lock().unwrap().list_configs();
    Json(configs)
}

// GET /config/:id
pub async fn get_config(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<AgentConfig>, AppError> {
    let config = state.store.lock().unwrap().get_config(id);
    config
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("config {id} not found")))
}
