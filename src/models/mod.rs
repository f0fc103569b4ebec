pub mod agent_config;
pub mod call_log;
pub mod conversation;
pub mod settings;
pub mod summary;
pub mod vocabulary;

pub use agent_config::{AgentConfig, AgentConfigInput, AgentConfigSummary};
pub use call_log::{CallLog, NewCallLog};
pub use conversation::{CallIdentity, ConversationContext, Turn};
pub use settings::{AgentSettings, ConversationFlow};
pub use summary::{CallOutcome, DriverStatus, EmergencyType, StructuredSummary};
pub use vocabulary::KeywordVocabulary;
