use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmergencyType {
    Accident,
    Breakdown,
    Medical,
    Other,
}

impl EmergencyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmergencyType::Accident => "Accident",
            EmergencyType::Breakdown => "Breakdown",
            EmergencyType::Medical => "Medical",
            EmergencyType::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverStatus {
    Arrived,
    Delayed,
    Driving,
    Unknown,
}

impl DriverStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverStatus::Arrived => "Arrived",
            DriverStatus::Delayed => "Delayed",
            DriverStatus::Driving => "Driving",
            DriverStatus::Unknown => "Unknown",
        }
    }
}

pub const ESCALATION_FLAGGED: &str = "Escalation Flagged";

/// Exactly one outcome per classified transcript, in priority order.
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutcome {
    Emergency {
        emergency_type: EmergencyType,
        emergency_location: Option<String>,
    },
    NoisyEnvironment {
        noisy_indicator_count: usize,
        location: Option<String>,
    },
    UncooperativeDriver {
        short_utterance_count: usize,
        location: Option<String>,
    },
    StatusUpdate {
        driver_status: DriverStatus,
        current_location: Option<String>,
        eta: Option<String>,
    },
}

impl CallOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            CallOutcome::Emergency { .. } => "Emergency Detected",
            CallOutcome::NoisyEnvironment { .. } => "Noisy Environment - Call Ended",
            CallOutcome::UncooperativeDriver { .. } => "Uncooperative Driver",
            CallOutcome::StatusUpdate {
                driver_status: DriverStatus::Arrived,
                ..
            } => "Arrival Confirmation",
            CallOutcome::StatusUpdate { .. } => "In-Transit Update",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructuredSummary {
    pub keywords: Vec<String>,
    pub emergency: bool,
    pub outcome: CallOutcome,
}

impl StructuredSummary {
    pub fn call_outcome(&self) -> &'static str {
        self.outcome.label()
    }
}

// Flattened into one JSON object: keywords, emergency, call_outcome, then the
// outcome's own fields. Missing values are written as null.
impl Serialize for StructuredSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("keywords", &self.keywords)?;
        map.serialize_entry("emergency", &self.emergency)?;
        map.serialize_entry("call_outcome", self.outcome.label())?;
        match &self.outcome {
            CallOutcome::Emergency {
                emergency_type,
                emergency_location,
            } => {
                map.serialize_entry("emergency_type", emergency_type.as_str())?;
                map.serialize_entry("emergency_location", emergency_location)?;
                map.serialize_entry("escalation_status", ESCALATION_FLAGGED)?;
            }
            CallOutcome::NoisyEnvironment {
                noisy_indicator_count,
                location,
            } => {
                map.serialize_entry("noisy_indicator_count", noisy_indicator_count)?;
                map.serialize_entry("location", location)?;
            }
            CallOutcome::UncooperativeDriver {
                short_utterance_count,
                location,
            } => {
                map.serialize_entry("short_utterance_count", short_utterance_count)?;
                map.serialize_entry("location", location)?;
            }
            CallOutcome::StatusUpdate {
                driver_status,
                current_location,
                eta,
            } => {
                map.serialize_entry("driver_status", driver_status.as_str())?;
                map.serialize_entry("current_location", current_location)?;
                map.serialize_entry("eta", eta)?;
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_emergency_fields() {
        let summary = StructuredSummary {
            keywords: vec!["pulling over".to_string()],
            emergency: true,
            outcome: CallOutcome::Emergency {
                emergency_type: EmergencyType::Breakdown,
                emergency_location: Some("mile marker 123".to_string()),
            },
        };
        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({
                "keywords": ["pulling over"],
                "emergency": true,
                "call_outcome": "Emergency Detected",
                "emergency_type": "Breakdown",
                "emergency_location": "mile marker 123",
                "escalation_status": "Escalation Flagged"
            })
        );
    }

    #[test]
    fn test_status_update_writes_nulls() {
        let summary = StructuredSummary {
            keywords: vec![],
            emergency: false,
            outcome: CallOutcome::StatusUpdate {
                driver_status: DriverStatus::Unknown,
                current_location: None,
                eta: None,
            },
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["call_outcome"], "In-Transit Update");
        assert_eq!(value["driver_status"], "Unknown");
        assert!(value["current_location"].is_null());
        assert!(value["eta"].is_null());
        assert!(value.get("location").is_none());
    }

    #[test]
    fn test_arrived_is_arrival_confirmation() {
        let outcome = CallOutcome::StatusUpdate {
            driver_status: DriverStatus::Arrived,
            current_location: None,
            eta: None,
        };
        assert_eq!(outcome.label(), "Arrival Confirmation");
    }
}
