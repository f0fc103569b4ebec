use std::sync::OnceLock;

use regex::Regex;

// Tried in order, first match wins. Free-text captures run until a character
// outside the class (e.g. ':' or '!'), so "at" also matches inside "that".
const LOCATION_PATTERNS: &[&str] = &[
    r"near ([a-z0-9 .,'-]+)",
    r"at ([a-z0-9 .,'-]+)",
    r"on ([a-z0-9 .,'-]+)",
    r"mile marker (\d+)",
    r"exit (\d+)",
    r"i-(\d+)",
    r"highway (\d+)",
];

const DURATION_PATTERNS: &[&str] = &[
    r"eta ([0-9]{1,2})\s*(hour|hours|min|mins|minutes)",
    r"in ([0-9]{1,2})\s*(hour|hours|min|mins|minutes)",
    r"arrive in ([0-9]{1,2})\s*(hour|hours|min|mins|minutes)",
    r"be there in ([0-9]{1,2})\s*(hour|hours|min|mins|minutes)",
];

const CLOCK_PATTERNS: &[&str] = &[
    r"tomorrow at ([0-9]{1,2}):?([0-9]{2})?\s*(am|pm)?",
    r"tonight at ([0-9]{1,2}):?([0-9]{2})?\s*(am|pm)?",
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedEntities {
    pub location: Option<String>,
    pub eta: Option<String>,
}

impl ExtractedEntities {
    pub fn from_transcript(transcript: &str) -> Self {
        let text = transcript.to_lowercase();
        Self {
            location: find_location(&text),
            eta: find_eta(&text),
        }
    }
}

/// Occurrences of "inaudible", "garbled", "unclear" or "can't hear" as whole words.
pub fn count_noisy_markers(transcript: &str) -> usize {
    noisy_marker_regex()
        .find_iter(&transcript.to_lowercase())
        .count()
}

fn find_location(text: &str) -> Option<String> {
    location_regexes().iter().find_map(|re| {
        re.captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
    })
}

fn find_eta(text: &str) -> Option<String> {
    let (durations, clocks) = eta_regexes();

    let duration = durations.iter().find_map(|re| {
        let caps = re.captures(text)?;
        Some(format!("{} {}", caps.get(1)?.as_str(), caps.get(2)?.as_str()))
    });
    if duration.is_some() {
        return duration;
    }

    clocks
        .iter()
        .find_map(|re| re.find(text).map(|m| m.as_str().to_string()))
}

fn location_regexes() -> &'static [Regex] {
    static LOCATION_RE: OnceLock<Vec<Regex>> = OnceLock::new();
    LOCATION_RE.get_or_init(|| compile_all(LOCATION_PATTERNS))
}

fn eta_regexes() -> &'static (Vec<Regex>, Vec<Regex>) {
    static ETA_RE: OnceLock<(Vec<Regex>, Vec<Regex>)> = OnceLock::new();
    ETA_RE.get_or_init(|| (compile_all(DURATION_PATTERNS), compile_all(CLOCK_PATTERNS)))
}

fn noisy_marker_regex() -> &'static Regex {
    static NOISY_RE: OnceLock<Regex> = OnceLock::new();
    NOISY_RE.get_or_init(|| {
        Regex::new(r"\b(inaudible|garbled|unclear|can't hear)\b")
            .expect("noisy marker regex must compile")
    })
}

fn compile_all(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("extraction regex must compile"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_location(transcript: &str) -> Option<String> {
        ExtractedEntities::from_transcript(transcript).location
    }

    fn extract_eta(transcript: &str) -> Option<String> {
        ExtractedEntities::from_transcript(transcript).eta
    }

    #[test]
    fn test_near_wins_over_later_patterns() {
        let loc = extract_location("I'm on I-10 near Indio, CA");
        assert_eq!(loc.as_deref(), Some("indio, ca"));
    }

    #[test]
    fn test_location_stops_at_unlisted_character() {
        let loc = extract_location("Parked at Love's truck stop! See you soon");
        assert_eq!(loc.as_deref(), Some("love's truck stop"));
    }

    #[test]
    fn test_at_matches_inside_words() {
        // "that" contains "at "; the literal substring behavior is intended.
        let loc = extract_location("Tell them that I'm fine");
        assert_eq!(loc.as_deref(), Some("i'm fine"));
    }

    #[test]
    fn test_numeric_location_patterns() {
        assert_eq!(extract_location("Mile marker 42").as_deref(), Some("42"));
        assert_eq!(extract_location("took exit 7").as_deref(), Some("7"));
        assert_eq!(extract_location("I-80 westbound").as_deref(), Some("80"));
        assert_eq!(extract_location("Highway 101").as_deref(), Some("101"));
        assert_eq!(extract_location("nothing useful here"), None);
    }

    #[test]
    fn test_relative_eta() {
        // Unit alternatives are tried in listed order, so "minutes" reports as "min".
        assert_eq!(extract_eta("ETA 45 minutes").as_deref(), Some("45 min"));
        assert_eq!(extract_eta("I'll be there in 2 hours").as_deref(), Some("2 hour"));
        assert_eq!(extract_eta("arrive in 30mins").as_deref(), Some("30 min"));
    }

    #[test]
    fn test_clock_eta() {
        assert_eq!(
            extract_eta("I should arrive tomorrow at 8:00 AM.").as_deref(),
            Some("tomorrow at 8:00 am")
        );
        assert_eq!(extract_eta("tonight at 9pm").as_deref(), Some("tonight at 9pm"));
        assert_eq!(extract_eta("no idea when"), None);
    }

    #[test]
    fn test_relative_eta_beats_clock_eta() {
        let eta = extract_eta("tomorrow at 6, or maybe in 3 hours");
        assert_eq!(eta.as_deref(), Some("3 hour"));
    }

    #[test]
    fn test_noisy_marker_count() {
        let text = "[inaudible] driving [garbled] traffic [unclear] can't hear you [inaudible]";
        assert_eq!(count_noisy_markers(text), 5);
        assert_eq!(count_noisy_markers("UNCLEAR"), 1);
        assert_eq!(count_noisy_markers("unclearly"), 0);
        assert_eq!(count_noisy_markers(""), 0);
    }

    #[test]
    fn test_entities_from_transcript() {
        let entities = ExtractedEntities::from_transcript("Stuck on Route 66, ETA 2 hours");
        assert_eq!(entities.location.as_deref(), Some("route 66, eta 2 hours"));
        assert_eq!(entities.eta.as_deref(), Some("2 hour"));
    }
}
