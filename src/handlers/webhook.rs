use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::{AgentConfig, CallIdentity, CallLog, KeywordVocabulary};
use crate::services::classifier::{build_structured_summary, classify};
use crate::services::conversation::ConversationSession;
use crate::state::AppState;

// Partial transcripts are still classified but never answered, so one
// utterance produces one turn.
const REPLY_EVENTS: &[&str] = &["transcript.final", "asr.final"];
const END_EVENTS: &[&str] = &["call_ended", "call.ended"];

/// Telephony webhook body. Every field is optional and `call_id` may be a
/// string (provider id) or a number (our call log id).
#[derive(Debug, Default)]
pub struct WebhookPayload {
    pub call_id: Option<String>,
    pub internal_id: Option<i64>,
    pub event: Option<String>,
    pub transcript: String,
    pub metadata: Value,
}

impl WebhookPayload {
    pub fn from_value(raw: &Value) -> Self {
        let call_id = match &raw["call_id"] {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        };
        let event = raw["event"]
            .as_str()
            .or_else(|| raw["type"].as_str())
            .map(str::to_string);
        let metadata = match &raw["metadata"] {
            Value::Object(_) => raw["metadata"].clone(),
            _ => json!({}),
        };

        Self {
            call_id,
            internal_id: raw["call_id"].as_i64(),
            event,
            transcript: raw["transcript"].as_str().unwrap_or_default().to_string(),
            metadata,
        }
    }

    fn metadata_str(&self, key: &str) -> Option<String> {
        self.metadata[key].as_str().map(str::to_string)
    }

    fn config_id(&self) -> Option<i64> {
        let value = &self.metadata["config_id"];
        value
            .as_i64()
            .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
    }

    fn is_event(&self, events: &[&str]) -> bool {
        self.event.as_deref().is_some_and(|e| events.contains(&e))
    }
}

fn find_call_log(state: &AppState, payload: &WebhookPayload) -> Option<CallLog> {
    let store = state.store.lock().unwrap();
    let by_external = payload
        .call_id
        .as_deref()
        .and_then(|id| store.find_call_log_by_external_id(id));
    by_external.or_else(|| payload.internal_id.and_then(|id| store.get_call_log(id)))
}

// POST /webhook
pub async fn webhook(
    State(state): State<Arc<AppState>>,
    Json(raw): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let payload = WebhookPayload::from_value(&raw);

    let call_log = find_call_log(&state, &payload)
        .ok_or_else(|| AppError::NotFound("call log not found".to_string()))?;

    tracing::info!(
        call_log_id = call_log.id,
        event = payload.event.as_deref().unwrap_or("-"),
        transcript_len = payload.transcript.len(),
        "webhook delivery"
    );

    let config: Option<AgentConfig> = {
        let config_id = payload.config_id().unwrap_or(call_log.config_id);
        let store = state.store.lock().unwrap();
        store.get_config(config_id)
    };
    let settings = config
        .as_ref()
        .map(AgentConfig::typed_settings)
        .unwrap_or_default();

    let session_key = payload
        .call_id
        .clone()
        .unwrap_or_else(|| call_log.id.to_string());

    if payload.is_event(REPLY_EVENTS) && !payload.transcript.is_empty() {
        if let Some(llm) = state.llm.as_deref() {
            let identity = CallIdentity {
                call_id: Some(session_key.clone()),
                driver_name: payload
                    .metadata_str("driver_name")
                    .or_else(|| Some(call_log.driver_name.clone())),
                load_number: payload
                    .metadata_str("load_number")
                    .or_else(|| Some(call_log.load_number.clone())),
            };
            let base_prompt = config.as_ref().map(|c| c.prompt.as_str()).unwrap_or("");
            let session = state.sessions.session_for(&session_key, || {
                ConversationSession::start(base_prompt, settings.clone(), identity)
            });

            let mut session = session.lock().await;
            match session.generate_reply(llm, &payload.transcript).await {
                Ok(reply) => {
                    if let Err(e) = state.telephony.send_reply(&session_key, &reply).await {
                        tracing::error!(
                            error = %e,
                            call_id = %session_key,
                            "failed to deliver reply"
                        );
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, call_id = %session_key, "no reply generated");
                }
            }
        } else {
            tracing::warn!("no LLM provider configured, skipping reply");
        }
    }

    if payload.is_event(END_EVENTS) {
        state.sessions.end(&session_key);
    }

    let vocab = KeywordVocabulary::with_overrides(&settings.conversation_flow);
    let summary = classify(&payload.transcript, &vocab);
    let summary_json =
        serde_json::to_value(&summary).map_err(|e| AppError::Internal(e.to_string()))?;

    {
        let mut store = state.store.lock().unwrap();
        store.record_transcript(call_log.id, &payload.transcript, summary_json);
    }

    tracing::info!(
        call_log_id = call_log.id,
        call_outcome = summary.call_outcome(),
        emergency = summary.emergency,
        "recorded structured summary"
    );

    Ok(Json(json!({"ok": true, "call_log_id": call_log.id})))
}

// POST /webhook/test
#[derive(Deserialize)]
pub struct WebhookTestRequest {
    #[serde(default)]
    pub transcript: String,
}

pub async fn webhook_test(Json(req): Json<WebhookTestRequest>) -> Json<Value> {
    let summary = build_structured_summary(&req.transcript);
    Json(json!({"ok": true, "structured_summary": summary}))
}

// GET /webhook/examples
pub async fn webhook_examples() -> Json<Value> {
    const OPENING: &str = "this is Dispatch with a check call on load";
    let scenario = |description: &str,
                    call_id: &str,
                    driver: &str,
                    greeting: &str,
                    load: &str,
                    body: &str| {
        let transcript = format!(
            "{greeting}, {OPENING} {load}. Can you give me an update on your status? {body}"
        );
        json!({
            "description": description,
            "payload": {
                "call_id": call_id,
                "transcript": transcript,
                "metadata": {"driver": driver, "load_number": load},
            },
        })
    };

    Json(json!({
        "examples": [
            scenario(
                "Scenario 1: Driver Check-in - Arrival Confirmation",
                "rt-12345", "Mike", "Hi Mike", "7891-B",
                "I've arrived at the destination and I'm unloading now. Everything went smoothly.",
            ),
            scenario(
                "Scenario 1: Driver Check-in - In-Transit Update",
                "rt-67890", "Sarah", "Hi Sarah", "7892-C",
                "I'm currently driving on I-10 near Indio, CA. I should arrive tomorrow at 8:00 AM. Everything is going well.",
            ),
            scenario(
                "Scenario 2: Emergency Protocol - Breakdown",
                "rt-54321", "Tom", "Hi Tom", "7893-D",
                "Emergency! I just had a blowout, I'm pulling over to the side of I-15 North at mile marker 123. Need immediate assistance.",
            ),
            scenario(
                "Special Case: Uncooperative Driver",
                "rt-11223", "Uncooperative Driver", "Hi", "7894-E",
                "Yeah. Driving. Okay. Later.",
            ),
            scenario(
                "Special Case: Noisy Environment",
                "rt-55667", "Noisy Environment", "Hi", "7895-F",
                "[inaudible] driving [garbled] traffic [unclear] can't hear you [inaudible]",
            ),
        ]
    }))
}
