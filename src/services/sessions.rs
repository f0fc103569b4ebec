use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::Mutex as AsyncMutex;

use super::conversation::ConversationSession;

pub type SharedSession = Arc<AsyncMutex<ConversationSession>>;

/// Live sessions keyed by call id. Each session sits behind its own async
/// mutex, so deliveries for one call are handled one at a time while other
/// calls proceed independently.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<String, SharedSession>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_for<F>(&self, call_id: &str, create: F) -> SharedSession
    where
        F: FnOnce() -> ConversationSession,
    {
        let mut sessions = self.sessions.lock().unwrap();
        Arc::clone(
            sessions
                .entry(call_id.to_string())
                .or_insert_with(|| {
                    tracing::info!(call_id, "starting conversation session");
                    Arc::new(AsyncMutex::new(create()))
                }),
        )
    }

    pub fn get(&self, call_id: &str) -> Option<SharedSession> {
        self.sessions.lock().unwrap().get(call_id).cloned()
    }

    /// Drop the session once the call is over.
    pub fn end(&self, call_id: &str) -> bool {
        let removed = self.sessions.lock().unwrap().remove(call_id).is_some();
        if removed {
            tracing::info!(call_id, "ended conversation session");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
