use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Variant;
use crate::errors::CoreError;

/// Start/end of one questionnaire section as recorded by the client.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SectionTiming {
    pub start: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    /// Client-measured duration in milliseconds, if it sent one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
}

impl SectionTiming {
    #[must_use]
    pub const fn started(at: DateTime<Utc>) -> Self {
        Self {
            start: at,
            end: None,
            duration: None,
        }
    }

    /// Client duration if present, otherwise `end - start`.
    #[must_use]
    pub fn duration_ms(&self) -> Option<i64> {
        self.duration
            .or_else(|| self.end.map(|end| (end - self.start).num_milliseconds()))
    }
}

/// One participant working through one variant's questionnaires.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct QuestionnaireSession {
    pub id: String,
    pub participant_id: Option<String>,
    pub variant: Variant,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub sections: BTreeMap<String, SectionTiming>,
}

impl QuestionnaireSession {
    #[must_use]
    pub const fn new(
        id: String,
        participant_id: Option<String>,
        variant: Variant,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            participant_id,
            variant,
            started_at,
            ended_at: None,
            sections: BTreeMap::new(),
        }
    }

    /// Record entering a section. Re-entering keeps the original start.
    pub fn start_section(&mut self, name: &str, at: DateTime<Utc>) {
        self.sections
            .entry(name.to_string())
            .or_insert_with(|| SectionTiming::started(at));
    }

    /// Record leaving a section.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownSection`] if the section was never started.
    pub fn end_section(&mut self, name: &str, at: DateTime<Utc>) -> Result<(), CoreError> {
        let timing = self
            .sections
            .get_mut(name)
            .ok_or_else(|| CoreError::UnknownSection(name.to_string()))?;
        timing.end = Some(at);
        timing.duration = Some((at - timing.start).num_milliseconds());
        Ok(())
    }

    pub const fn finish(&mut self, at: DateTime<Utc>) {
        self.ended_at = Some(at);
    }

    /// Whole-session duration, once finished.
    #[must_use]
    pub fn total_duration_ms(&self) -> Option<i64> {
        self.ended_at
            .map(|end| (end - self.started_at).num_milliseconds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn section_timing_prefers_client_duration() {
        let start = Utc::now();
        let timing = SectionTiming {
            start,
            end: Some(start + TimeDelta::seconds(30)),
            duration: Some(12_000),
        };
        assert_eq!(timing.duration_ms(), Some(12_000));

        let derived = SectionTiming {
            duration: None,
            ..timing
        };
        assert_eq!(derived.duration_ms(), Some(30_000));
        assert_eq!(SectionTiming::started(start).duration_ms(), None);
    }

    #[test]
    fn session_records_section_times() {
        let t0 = Utc::now();
        let mut session = QuestionnaireSession::new("ses-00000001".into(), None, Variant::A, t0);
        session.start_section("trust", t0);
        session.start_section("trust", t0 + TimeDelta::seconds(5));
        session
            .end_section("trust", t0 + TimeDelta::seconds(40))
            .unwrap();
        assert_eq!(session.sections["trust"].duration_ms(), Some(40_000));

        assert!(matches!(
            session.end_section("sus", t0),
            Err(CoreError::UnknownSection(_))
        ));

        assert_eq!(session.total_duration_ms(), None);
        session.finish(t0 + TimeDelta::minutes(3));
        assert_eq!(session.total_duration_ms(), Some(180_000));
    }
}
