use anyhow::Context;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};

use super::{CallTrigger, OutboundCall};

pub struct RetellClient {
    api_key: String,
    start_call_url: String,
    reply_url: String,
    client: reqwest::Client,
}

impl RetellClient {
    pub fn new(api_key: String, start_call_url: String, reply_url: String) -> Self {
        Self {
            api_key,
            start_call_url,
            reply_url,
            client: reqwest::Client::new(),
        }
    }
}

fn start_call_payload(call: &OutboundCall) -> Value {
    let mut payload = json!({
        "agent_id": call.agent_id,
        "to_number": call.to_number,
        "metadata": {
            "driver_name": call.driver_name,
            "load_number": call.load_number,
            "config_id": call.config_id,
        },
        "webhook_url": call.webhook_url,
    });
    if let Some(from) = call.from_number.as_deref().filter(|n| !n.is_empty()) {
        payload["from_number"] = json!(from);
    }
    if let Some(overrides) = &call.voice_overrides {
        payload["voice_overrides"] = Value::Object(overrides.clone());
    }
    payload
}

fn error_detail(body: &Value) -> String {
    body.get("detail")
        .or_else(|| body.get("error_message"))
        .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl CallTrigger for RetellClient {
    async fn start_call(&self, call: &OutboundCall) -> anyhow::Result<Option<String>> {
        anyhow::ensure!(!self.api_key.is_empty(), "RETELL_API_KEY is not configured");
        anyhow::ensure!(!call.agent_id.is_empty(), "agent id is required for Retell calls");

        let resp = self
            .client
            .post(&self.start_call_url)
            .bearer_auth(&self.api_key)
            .json(&start_call_payload(call))
            .send()
            .await
            .context("failed to call Retell API")?;

        let status = resp.status();
        let text = resp.text().await.context("failed to read Retell response")?;
        let body: Value = serde_json::from_str(&text).unwrap_or_else(|_| json!({ "text": text }));

        if status == StatusCode::BAD_REQUEST {
            anyhow::bail!("Retell API error: bad request - {}", error_detail(&body));
        }
        if status == StatusCode::UNAUTHORIZED {
            anyhow::bail!("invalid Retell API key");
        }
        if !status.is_success() {
            anyhow::bail!("Retell API error ({}): {}", status, body);
        }

        Ok(body["call_id"].as_str().map(str::to_string))
    }

    async fn send_reply(&self, call_id: &str, text: &str) -> anyhow::Result<()> {
        self.client
            .post(&self.reply_url)
            .bearer_auth(&self.api_key)
            .json(&json!({ "call_id": call_id, "text": text }))
            .send()
            .await
            .context("failed to send reply to Retell")?
            .error_for_status()
            .context("Retell API returned error")?;

        Ok(())
    }
}
