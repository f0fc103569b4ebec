use chrono::Utc;
use serde_json::Value;

use crate::models::{AgentConfig, AgentConfigInput, AgentConfigSummary, CallLog, NewCallLog};

/// Process-local record store for agent configs and call logs. Records live
/// only as long as the process; ids are assigned sequentially from 1.
#[derive(Debug, Default)]
pub struct RecordStore {
    configs: Vec<AgentConfig>,
    call_logs: Vec<CallLog>,
    next_config_id: i64,
    next_call_log_id: i64,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Agent configs ──

    /// Returns `None` when updating an id that does not exist.
    pub fn upsert_config(&mut self, input: AgentConfigInput) -> Option<AgentConfig> {
        match input.id {
            Some(id) => {
                let existing = self.configs.iter_mut().find(|c| c.id == id)?;
                existing.name = input.name;
                existing.prompt = input.prompt;
                existing.settings = input.settings;
                Some(existing.clone())
            }
            None => {
                self.next_config_id += 1;
                let config = AgentConfig {
                    id: self.next_config_id,
                    name: input.name,
                    prompt: input.prompt,
                    settings: input.settings,
                    created_at: Utc::now().naive_utc(),
                };
                self.configs.push(config.clone());
                Some(config)
            }
        }
    }

    pub fn get_config(&self, id: i64) -> Option<AgentConfig> {
        self.configs.iter().find(|c| c.id == id).cloned()
    }

    /// Newest first.
    pub fn list_configs(&self) -> Vec<AgentConfigSummary> {
        self.configs
            .iter()
            .rev()
            .map(|c| AgentConfigSummary {
                id: c.id,
                name: c.name.clone(),
            })
            .collect()
    }

    // ── Call logs ──

    pub fn insert_call_log(&mut self, new: NewCallLog) -> CallLog {
        self.next_call_log_id += 1;
        let log = CallLog {
            id: self.next_call_log_id,
            driver_name: new.driver_name,
            phone_number: new.phone_number,
            load_number: new.load_number,
            transcript: None,
            structured_summary: None,
            external_call_id: new.external_call_id,
            config_id: new.config_id,
            created_at: Utc::now().naive_utc(),
        };
        self.call_logs.push(log.clone());
        log
    }

    pub fn get_call_log(&self, id: i64) -> Option<CallLog> {
        self.call_logs.iter().find(|l| l.id == id).cloned()
    }

    pub fn find_call_log_by_external_id(&self, external_call_id: &str) -> Option<CallLog> {
        self.call_logs
            .iter()
            .find(|l| l.external_call_id.as_deref() == Some(external_call_id))
            .cloned()
    }

    pub fn record_transcript(&mut self, id: i64, transcript: &str, summary: Value) -> bool {
        match self.call_logs.iter_mut().find(|l| l.id == id) {
            Some(log) => {
                log.transcript = Some(transcript.to_string());
                log.structured_summary = Some(summary);
                true
            }
            None => false,
        }
    }

    /// Newest first.
    pub fn list_call_logs(&self) -> Vec<CallLog> {
        self.call_logs.iter().rev().cloned().collect()
    }
}
