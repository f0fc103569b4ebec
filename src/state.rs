use std::sync::Mutex;

use crate::config::AppConfig;
use crate::services::ai::LlmProvider;
use crate::services::sessions::SessionRegistry;
use crate::services::telephony::CallTrigger;
use crate::store::RecordStore;

pub struct AppState {
    pub store: Mutex<RecordStore>,
    pub config: AppConfig,
    /// `None` when no provider key is configured; transcripts are still classified.
    pub llm: Option<Box<dyn LlmProvider>>,
    pub telephony: Box<dyn CallTrigger>,
    pub sessions: SessionRegistry,
}
