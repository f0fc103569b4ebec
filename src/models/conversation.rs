use serde::{Deserialize, Serialize};

use super::settings::AgentSettings;

/// Who is on the line. Any field may be missing on a given webhook delivery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallIdentity {
    pub call_id: Option<String>,
    pub driver_name: Option<String>,
    pub load_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub user: String,
    pub assistant: String,
}

#[derive(Debug, Clone)]
pub struct ConversationContext {
    pub system_prompt: String,
    pub settings: AgentSettings,
    pub identity: CallIdentity,
    turns: Vec<Turn>,
}

impl ConversationContext {
    pub fn new(system_prompt: String, settings: AgentSettings, identity: CallIdentity) -> Self {
        Self {
            system_prompt,
            settings,
            identity,
            turns: Vec::new(),
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub(crate) fn push_turn(&mut self, turn: Turn) {
        self.turns.push(turn);
    }
}
