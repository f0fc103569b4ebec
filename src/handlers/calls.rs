use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::NewCallLog;
use crate::services::telephony::OutboundCall;
use crate::state::AppState;

// POST /start-call
#[derive(Deserialize)]
pub struct StartCallRequest {
    pub driver_name: String,
    pub phone_number: String,
    pub load_number: String,
    pub config_id: i64,
}

#[derive(Serialize)]
pub struct StartCallResponse {
    pub call_id: i64,
    pub external_call_id: Option<String>,
}

pub async fn start_call(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StartCallRequest>,
) -> Result<Json<StartCallResponse>, AppError> {
    let config = {
        let store = state.store.lock().unwrap();
        store.get_config(req.config_id)
    }
    .ok_or_else(|| AppError::BadRequest("invalid config_id".to_string()))?;

    let settings = config.typed_settings();
    let agent_id = settings.agent_id().ok_or_else(|| {
        AppError::BadRequest(
            "agent configuration must include 'retell_agent_id' in settings".to_string(),
        )
    })?;

    if state.config.retell_api_key.is_empty() {
        return Err(AppError::Config("RETELL_API_KEY is not configured".to_string()));
    }

    let call = OutboundCall {
        agent_id: agent_id.to_string(),
        to_number: req.phone_number.clone(),
        from_number: state.config.from_number(),
        driver_name: req.driver_name.clone(),
        load_number: req.load_number.clone(),
        config_id: req.config_id,
        webhook_url: state.config.webhook_url(),
        voice_overrides: settings.voice_overrides(),
    };

    let external_call_id = state.telephony.start_call(&call).await.map_err(|e| {
        tracing::error!(error = %e, config_id = req.config_id, "failed to start call");
        AppError::Telephony(format!("{e:#}"))
    })?;

    let log = {
        let mut store = state.store.lock().unwrap();
        store.insert_call_log(NewCallLog {
            driver_name: req.driver_name,
            phone_number: req.phone_number,
            load_number: req.load_number,
            external_call_id: external_call_id.clone(),
            config_id: req.config_id,
        })
    };

    tracing::info!(
        call_log_id = log.id,
        external_call_id = external_call_id.as_deref().unwrap_or("-"),
        "started check call"
    );

    Ok(Json(StartCallResponse {
        call_id: log.id,
        external_call_id,
    }))
}

// GET /call-logs
pub async fn call_logs(State(state): State<Arc<AppState>>) -> Json<Value> {
    let logs = {
        let store = state.store.lock().unwrap();
        store.list_call_logs()
    };
    Json(json!({ "messages": logs }))
}
