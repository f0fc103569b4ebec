use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::settings::AgentSettings;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    pub id: i64,
    pub name: String,
    pub prompt: String,
    pub settings: Value,
    pub created_at: NaiveDateTime,
}

impl AgentConfig {
    pub fn typed_settings(&self) -> AgentSettings {
        AgentSettings::from_value(&self.settings)
    }
}

/// Create when `id` is absent, otherwise replace the existing config.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfigInput {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub prompt: String,
    #[serde(default = "empty_object")]
    pub settings: Value,
}

fn empty_object() -> Value {
    Value::Object(Default::default())
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentConfigSummary {
    pub id: i64,
    pub name: String,
}
