use std::collections::BTreeSet;

use crate::models::{CallOutcome, DriverStatus, EmergencyType, KeywordVocabulary, StructuredSummary};
use crate::services::extraction::{count_noisy_markers, ExtractedEntities};

const NOISY_THRESHOLD: usize = 3;
const UNCOOPERATIVE_THRESHOLD: usize = 3;
const SHORT_UTTERANCE_WORDS: usize = 3;

/// Classify with the built-in keyword vocabulary.
pub fn build_structured_summary(transcript: &str) -> StructuredSummary {
    classify(transcript, &KeywordVocabulary::default())
}

/// Keyword checks are plain substring tests on the lowercased transcript.
/// Priority: emergency, noisy environment, uncooperative driver, status update.
pub fn classify(transcript: &str, vocab: &KeywordVocabulary) -> StructuredSummary {
    let text = transcript.to_lowercase();

    let keywords: Vec<String> = vocab
        .status
        .iter()
        .filter(|kw| text.contains(kw.as_str()))
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let emergency = vocab.emergency.iter().any(|kw| text.contains(kw.as_str()));

    let noisy_indicator_count = count_noisy_markers(transcript);
    let short_utterance_count = count_short_utterances(transcript);
    let ExtractedEntities { location, eta } = ExtractedEntities::from_transcript(transcript);

    let outcome = if emergency {
        CallOutcome::Emergency {
            emergency_type: emergency_type(&text),
            emergency_location: location,
        }
    } else if noisy_indicator_count >= NOISY_THRESHOLD {
        CallOutcome::NoisyEnvironment {
            noisy_indicator_count,
            location,
        }
    } else if short_utterance_count >= UNCOOPERATIVE_THRESHOLD {
        CallOutcome::UncooperativeDriver {
            short_utterance_count,
            location,
        }
    } else {
        CallOutcome::StatusUpdate {
            driver_status: driver_status(&text),
            current_location: location,
            eta,
        }
    };

    tracing::debug!(
        call_outcome = outcome.label(),
        emergency,
        noisy_indicator_count,
        short_utterance_count,
        "classified transcript"
    );

    StructuredSummary {
        keywords,
        emergency,
        outcome,
    }
}

/// Sentences (split on `.`, `!`, `?` and newlines) with fewer than three words.
pub fn count_short_utterances(transcript: &str) -> usize {
    transcript
        .split(['.', '!', '?', '\n'])
        .map(str::trim)
        .filter(|seg| !seg.is_empty())
        .filter(|seg| seg.split_whitespace().count() < SHORT_UTTERANCE_WORDS)
        .count()
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

fn emergency_type(text: &str) -> EmergencyType {
    if contains_any(text, &["accident", "crash"]) {
        EmergencyType::Accident
    } else if contains_any(text, &["breakdown", "blowout", "flat tire"]) {
        EmergencyType::Breakdown
    } else if contains_any(text, &["medical", "sick", "injured"]) {
        EmergencyType::Medical
    } else {
        EmergencyType::Other
    }
}

fn driver_status(text: &str) -> DriverStatus {
    if contains_any(text, &["arrived", "delivered", "unloading"]) {
        DriverStatus::Arrived
    } else if contains_any(text, &["delayed", "running late", "behind schedule"]) {
        DriverStatus::Delayed
    } else if contains_any(text, &["driving", "en route", "on the way"]) {
        DriverStatus::Driving
    } else if contains_any(text, &["stuck", "traffic", "pulling over"]) {
        DriverStatus::Delayed
    } else {
        DriverStatus::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::ConversationFlow;

    const OUTCOMES: &[&str] = &[
        "Emergency Detected",
        "Noisy Environment - Call Ended",
        "Uncooperative Driver",
        "Arrival Confirmation",
        "In-Transit Update",
    ];

    #[test]
    fn test_arrival_confirmation() {
        let summary =
            build_structured_summary("I've arrived at the destination and I'm unloading now.");
        assert_eq!(summary.call_outcome(), "Arrival Confirmation");
        assert!(!summary.emergency);
        assert_eq!(summary.keywords, vec!["arrived".to_string()]);
        match summary.outcome {
            CallOutcome::StatusUpdate {
                driver_status,
                current_location,
                ..
            } => {
                assert_eq!(driver_status, DriverStatus::Arrived);
                assert_eq!(
                    current_location.as_deref(),
                    Some("the destination and i'm unloading now.")
                );
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_blowout_is_breakdown_emergency() {
        let summary = build_structured_summary(
            "Emergency! I just had a blowout, I'm pulling over to the side of I-15 North at mile marker 123.",
        );
        assert!(summary.emergency);
        assert_eq!(summary.call_outcome(), "Emergency Detected");
        assert_eq!(summary.keywords, vec!["pulling over".to_string()]);
        match &summary.outcome {
            CallOutcome::Emergency {
                emergency_type,
                emergency_location,
            } => {
                assert_eq!(*emergency_type, EmergencyType::Breakdown);
                assert!(emergency_location
                    .as_deref()
                    .unwrap()
                    .contains("mile marker 123"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["escalation_status"], "Escalation Flagged");
    }

    #[test]
    fn test_short_answers_are_uncooperative() {
        let summary = build_structured_summary("Yeah. Driving. Okay. Later.");
        assert_eq!(summary.call_outcome(), "Uncooperative Driver");
        match summary.outcome {
            CallOutcome::UncooperativeDriver {
                short_utterance_count,
                ..
            } => assert_eq!(short_utterance_count, 4),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(summary.keywords, vec!["driving".to_string()]);
    }

    #[test]
    fn test_noisy_environment() {
        let summary = build_structured_summary(
            "[inaudible] driving [garbled] traffic [unclear] can't hear you [inaudible]",
        );
        assert_eq!(summary.call_outcome(), "Noisy Environment - Call Ended");
        match summary.outcome {
            CallOutcome::NoisyEnvironment {
                noisy_indicator_count,
                ..
            } => assert!(noisy_indicator_count >= 3),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_emergency_beats_noise_and_short_answers() {
        let summary = build_structured_summary(
            "Help. [inaudible]. [garbled]. [unclear]. Accident.",
        );
        assert!(summary.emergency);
        assert_eq!(summary.call_outcome(), "Emergency Detected");
        match summary.outcome {
            CallOutcome::Emergency { emergency_type, .. } => {
                assert_eq!(emergency_type, EmergencyType::Accident)
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_noise_beats_short_answers() {
        let summary = build_structured_summary("Unclear. Garbled. Inaudible. Hello.");
        assert_eq!(summary.call_outcome(), "Noisy Environment - Call Ended");
    }

    #[test]
    fn test_emergency_subtypes() {
        let kind = |text: &str| match build_structured_summary(text).outcome {
            CallOutcome::Emergency { emergency_type, .. } => emergency_type,
            other => panic!("unexpected outcome: {other:?}"),
        };
        assert_eq!(kind("there was a crash, I need help with everything"), EmergencyType::Accident);
        assert_eq!(kind("emergency, flat tire on the trailer right now"), EmergencyType::Breakdown);
        assert_eq!(kind("my co-driver is injured and feeling very sick"), EmergencyType::Medical);
        assert_eq!(kind("this is an emergency, the load shifted badly"), EmergencyType::Other);
    }

    #[test]
    fn test_driver_status_order() {
        let status = |text: &str| match build_structured_summary(text).outcome {
            CallOutcome::StatusUpdate { driver_status, .. } => driver_status,
            other => panic!("unexpected outcome: {other:?}"),
        };
        assert_eq!(status("we are running late because of the weather"), DriverStatus::Delayed);
        assert_eq!(status("I'm on the way to the receiver right now"), DriverStatus::Driving);
        assert_eq!(status("sitting in heavy traffic on the bridge today"), DriverStatus::Delayed);
        assert_eq!(status("delivered but I'm delayed for the next pickup"), DriverStatus::Arrived);
        assert_eq!(status("nothing much to report from my side today"), DriverStatus::Unknown);
    }

    #[test]
    fn test_in_transit_with_location_and_eta() {
        let summary = build_structured_summary(
            "I'm currently driving on I-10 near Indio, CA. I should arrive tomorrow at 8:00 AM. Everything is going well.",
        );
        assert_eq!(summary.call_outcome(), "In-Transit Update");
        match summary.outcome {
            CallOutcome::StatusUpdate {
                driver_status,
                current_location,
                eta,
            } => {
                assert_eq!(driver_status, DriverStatus::Driving);
                assert!(current_location.unwrap().starts_with("indio, ca"));
                assert_eq!(eta.as_deref(), Some("tomorrow at 8:00 am"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_empty_transcript() {
        let summary = build_structured_summary("");
        assert!(summary.keywords.is_empty());
        assert!(!summary.emergency);
        assert_eq!(summary.call_outcome(), "In-Transit Update");
        assert_eq!(
            summary.outcome,
            CallOutcome::StatusUpdate {
                driver_status: DriverStatus::Unknown,
                current_location: None,
                eta: None,
            }
        );
    }

    #[test]
    fn test_keywords_match_inside_words() {
        let summary =
            build_structured_summary("the truck got unstuck and we stopped for fuel near Reno");
        assert_eq!(summary.keywords, vec!["stopped".to_string(), "stuck".to_string()]);
    }

    #[test]
    fn test_deterministic() {
        let text = "Driving near Flagstaff, ETA 3 hours. Traffic is light.";
        let a = serde_json::to_string(&build_structured_summary(text)).unwrap();
        let b = serde_json::to_string(&build_structured_summary(text)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_every_transcript_has_one_outcome() {
        for text in [
            "",
            "ok",
            "Yeah. No. Fine.",
            "help",
            "[inaudible] [inaudible] [inaudible]",
            "I've delivered the load and everything looks good here.",
        ] {
            let value = serde_json::to_value(build_structured_summary(text)).unwrap();
            let outcome = value["call_outcome"].as_str().unwrap();
            assert!(OUTCOMES.contains(&outcome), "{text:?} -> {outcome}");
            assert!(value["keywords"].is_array());
            assert!(value["emergency"].is_boolean());
        }
    }

    #[test]
    fn test_custom_vocabulary() {
        let flow = ConversationFlow {
            emergency_keywords: vec!["fire".to_string()],
            status_keywords: vec!["parked".to_string()],
        };
        let vocab = KeywordVocabulary::with_overrides(&flow);

        let summary = classify("I'm parked at the yard, all good.", &vocab);
        assert_eq!(summary.keywords, vec!["parked".to_string()]);
        assert!(!summary.emergency);

        let summary = classify("There's a fire in the engine bay, I am safe.", &vocab);
        assert!(summary.emergency);
    }

    #[test]
    fn test_count_short_utterances() {
        assert_eq!(count_short_utterances("Yeah. Driving. Okay. Later."), 4);
        assert_eq!(count_short_utterances("I am on the way now!\nOk?"), 1);
        assert_eq!(count_short_utterances("...!!!"), 0);
    }
}
