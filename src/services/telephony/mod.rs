pub mod retell;

use async_trait::async_trait;
use serde_json::{Map, Value};

/// Everything the telephony provider needs to place a check call.
#[derive(Debug, Clone)]
pub struct OutboundCall {
    pub agent_id: String,
    pub to_number: String,
    pub from_number: Option<String>,
    pub driver_name: String,
    pub load_number: String,
    pub config_id: i64,
    pub webhook_url: String,
    pub voice_overrides: Option<Map<String, Value>>,
}

#[async_trait]
pub trait CallTrigger: Send + Sync {
    /// Returns the provider's call id when it reports one.
    async fn start_call(&self, call: &OutboundCall) -> anyhow::Result<Option<String>>;

    async fn send_reply(&self, call_id: &str, text: &str) -> anyhow::Result<()>;
}
