use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::SectionTiming;
use crate::enums::Variant;
use crate::response_set::ResponseSet;

/// Body of `POST /api/questionnaire/save`.
///
/// Response sets the client did not fill are sent as `{}` or left out.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireSubmission {
    pub variant: Variant,
    #[serde(default)]
    pub participant_id: Option<String>,
    #[serde(default)]
    pub trust_responses: ResponseSet,
    #[serde(default)]
    pub sus_responses: ResponseSet,
    #[serde(default)]
    pub preference_responses: ResponseSet,
    #[serde(default)]
    pub completed_sections: Vec<String>,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub section_times: BTreeMap<String, SectionTiming>,
}

impl QuestionnaireSubmission {
    /// `end_time - start_time` in milliseconds, when the client sent both.
    #[must_use]
    pub fn total_duration_ms(&self) -> Option<i64> {
        self.end_time
            .map(|end| (end - self.start_time).num_milliseconds())
    }

    /// Participant id for file names and logs.
    #[must_use]
    pub fn participant_label(&self) -> &str {
        self.participant_id.as_deref().unwrap_or("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserializes_front_end_payload() {
        let json = r#"{
            "variant": "A",
            "participantId": "P-017",
            "trustResponses": {"trust_reliability": 4},
            "susResponses": {},
            "completedSections": ["trust"],
            "startTime": "2025-06-02T10:00:00.000Z",
            "endTime": "2025-06-02T10:12:30.000Z",
            "sectionTimes": {"trust": {"start": "2025-06-02T10:00:00Z", "end": "2025-06-02T10:04:00Z"}}
        }"#;
        let submission: QuestionnaireSubmission = serde_json::from_str(json).unwrap();
        assert_eq!(submission.variant, Variant::A);
        assert_eq!(submission.participant_label(), "P-017");
        assert!(submission.preference_responses.is_empty());
        assert_eq!(submission.total_duration_ms(), Some(750_000));
        assert_eq!(
            submission.section_times["trust"].duration_ms(),
            Some(240_000)
        );
    }

    #[test]
    fn missing_participant_is_labelled_unknown() {
        let json = r#"{"variant": "comparison", "startTime": "2025-06-02T10:00:00Z"}"#;
        let submission: QuestionnaireSubmission = serde_json::from_str(json).unwrap();
        assert_eq!(submission.participant_label(), "unknown");
        assert_eq!(submission.total_duration_ms(), None);
    }
}
