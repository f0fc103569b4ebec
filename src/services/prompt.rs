use crate::models::{AgentSettings, CallIdentity};

const BEHAVIOR_POLICY: &str = "You are an AI voice agent for a logistics dispatch team. \
Always be concise, helpful, and professional. \
Use open-ended questions first, then focused follow-ups. \
If the driver speaks one-word answers repeatedly, proactively probe 2-3 times, then end the call politely. \
If the audio is noisy or unclear, ask to repeat up to 2 times, then end the call and promise a call back. \
If an emergency is detected, immediately gather location, nature of emergency, and safety status, then end the call stating a dispatcher will call back.";

const UNKNOWN: &str = "Unknown";

/// Base prompt, fixed behavior policy, configured keywords, then who is being called.
pub fn build_system_prompt(
    base_prompt: &str,
    settings: &AgentSettings,
    identity: &CallIdentity,
) -> String {
    let flow = &settings.conversation_flow;

    let keywords_block = format!(
        "Emergency keywords to watch for: {}. Status keywords include: {}. ",
        flow.emergency_keywords.join(", "),
        flow.status_keywords.join(", "),
    );

    let identity_block = format!(
        "Driver name: {}. Load number: {}. ",
        or_unknown(identity.driver_name.as_deref()),
        or_unknown(identity.load_number.as_deref()),
    );

    format!("{base_prompt}\n\n{BEHAVIOR_POLICY}\n\n{keywords_block}{identity_block}")
}

fn or_unknown(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(UNKNOWN)
}
