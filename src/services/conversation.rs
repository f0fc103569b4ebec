use anyhow::Context;

use crate::models::{AgentSettings, CallIdentity, ConversationContext, Turn};
use crate::services::ai::{LlmProvider, Message};
use crate::services::prompt::build_system_prompt;

/// Dialogue state for a single call. Turns are only ever appended, and only
/// after the provider has produced a reply.
#[derive(Debug, Clone)]
pub struct ConversationSession {
    ctx: ConversationContext,
}

impl ConversationSession {
    pub fn new(ctx: ConversationContext) -> Self {
        Self { ctx }
    }

    /// Assemble the system prompt from the agent's base prompt and settings.
    pub fn start(base_prompt: &str, settings: AgentSettings, identity: CallIdentity) -> Self {
        let system_prompt = build_system_prompt(base_prompt, &settings, &identity);
        Self::new(ConversationContext::new(system_prompt, settings, identity))
    }

    pub fn turns(&self) -> &[Turn] {
        self.ctx.turns()
    }

    /// System prompt (when set), every prior turn as user/assistant, then the new utterance.
    pub fn build_messages(&self, user_text: &str) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.turns().len() * 2 + 2);
        if !self.ctx.system_prompt.is_empty() {
            messages.push(Message::system(self.ctx.system_prompt.clone()));
        }
        for turn in self.turns() {
            messages.push(Message::user(turn.user.clone()));
            messages.push(Message::assistant(turn.assistant.clone()));
        }
        messages.push(Message::user(user_text));
        messages
    }

    pub async fn generate_reply(
        &mut self,
        llm: &dyn LlmProvider,
        user_text: &str,
    ) -> anyhow::Result<String> {
        let messages = self.build_messages(user_text);
        let reply = llm
            .generate(&messages)
            .await
            .context("reply generation failed")?;

        self.ctx.push_turn(Turn {
            user: user_text.to_string(),
            assistant: reply.clone(),
        });

        tracing::info!(
            call_id = self.ctx.identity.call_id.as_deref().unwrap_or("-"),
            turns = self.turns().len(),
            "generated reply"
        );

        Ok(reply)
    }
}
