use super::settings::ConversationFlow;

pub const DEFAULT_EMERGENCY_KEYWORDS: &[&str] = &[
    "accident",
    "breakdown",
    "blowout",
    "emergency",
    "injured",
    "help",
    "medical",
];

pub const DEFAULT_STATUS_KEYWORDS: &[&str] = &[
    "arrived",
    "delayed",
    "driving",
    "en route",
    "stuck",
    "pulling over",
    "stopped",
];

/// Emergency and status keywords matched against a lowercased transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordVocabulary {
    pub emergency: Vec<String>,
    pub status: Vec<String>,
}

impl Default for KeywordVocabulary {
    fn default() -> Self {
        Self {
            emergency: to_owned(DEFAULT_EMERGENCY_KEYWORDS),
            status: to_owned(DEFAULT_STATUS_KEYWORDS),
        }
    }
}

impl KeywordVocabulary {
    /// Each list configured on the agent replaces its default; an empty list
    /// keeps the default.
    pub fn with_overrides(flow: &ConversationFlow) -> Self {
        let defaults = Self::default();
        Self {
            emergency: normalize(&flow.emergency_keywords).unwrap_or(defaults.emergency),
            status: normalize(&flow.status_keywords).unwrap_or(defaults.status),
        }
    }
}

fn to_owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn normalize(words: &[String]) -> Option<Vec<String>> {
    let words: Vec<String> = words
        .iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        None
    } else {
        Some(words)
    }
}
