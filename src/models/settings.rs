use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Typed view over the free-form `settings` mapping stored with an agent config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentSettings {
    #[serde(default)]
    pub conversation_flow: ConversationFlow,
    #[serde(default)]
    pub retell_agent_id: Option<String>,
    #[serde(default)]
    pub voice_settings: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationFlow {
    #[serde(default)]
    pub emergency_keywords: Vec<String>,
    #[serde(default)]
    pub status_keywords: Vec<String>,
}

/// Voice settings the telephony provider accepts as per-call overrides.
pub const VOICE_OVERRIDE_KEYS: &[&str] = &[
    "voice_id",
    "speed",
    "backchanneling",
    "filler_words",
    "interruption_sensitivity",
];

impl AgentSettings {
    /// Never fails. Each key is read on its own, so a malformed entry only
    /// falls back to that key's default.
    pub fn from_value(value: &Value) -> Self {
        let flow = &value["conversation_flow"];
        Self {
            conversation_flow: ConversationFlow {
                emergency_keywords: field(flow, "emergency_keywords"),
                status_keywords: field(flow, "status_keywords"),
            },
            retell_agent_id: field(value, "retell_agent_id"),
            voice_settings: field(value, "voice_settings"),
        }
    }

    pub fn agent_id(&self) -> Option<&str> {
        self.retell_agent_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    pub fn voice_overrides(&self) -> Option<Map<String, Value>> {
        let settings = self.voice_settings.as_ref()?;
        let overrides: Map<String, Value> = settings
            .iter()
            .filter(|(k, _)| VOICE_OVERRIDE_KEYS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        if overrides.is_empty() {
            None
        } else {
            Some(overrides)
        }
    }
}

fn field<T: DeserializeOwned + Default>(value: &Value, key: &str) -> T {
    match &value[key] {
        Value::Null => T::default(),
        raw => serde_json::from_value(raw.clone()).unwrap_or_else(|e| {
            tracing::warn!(key, error = %e, "malformed agent setting, using default");
            T::default()
        }),
    }
}
