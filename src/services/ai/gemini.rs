use anyhow::Context;
use async_trait::async_trait;
use serde_json::{json, Value};

use super::{LlmProvider, Message, Role};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub struct GeminiProvider {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            client: reqwest::Client::new(),
        }
    }
}

/// Gemini has no system role: the system prompt goes in as a tagged user part,
/// and assistant turns use the `model` role.
fn to_contents(messages: &[Message]) -> Vec<Value> {
    messages
        .iter()
        .map(|msg| match msg.role {
            Role::System => json!({
                "role": "user",
                "parts": [{"text": format!("[SYSTEM]\n{}", msg.content)}],
            }),
            Role::Assistant => json!({
                "role": "model",
                "parts": [{"text": msg.content}],
            }),
            Role::User => json!({
                "role": "user",
                "parts": [{"text": msg.content}],
            }),
        })
        .collect()
}

fn reply_text(data: &Value) -> String {
    data["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn generate(&self, messages: &[Message]) -> anyhow::Result<String> {
        let body = json!({
            "contents": to_contents(messages),
            "generationConfig": {"temperature": 0.6},
        });

        let resp = self
            .client
            .post(format!("{GEMINI_BASE_URL}/{}:generateContent", self.model))
            .query(&[("key", &self.api_key)])
            .json(&body)
            .send()
            .await
            .context("failed to call Gemini API")?;

        let status = resp.status();
        let data: Value = resp
            .json()
            .await
            .context("failed to parse Gemini response")?;

        if !status.is_success() {
            anyhow::bail!("Gemini API error ({}): {}", status, data);
        }

        Ok(reply_text(&data))
    }
}
