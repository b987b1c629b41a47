//! Shapes of the records written to the archive.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use fiq_core::analytics::{
    DialogMetrics, FormMetrics, StudyAnalytics, StudySaveAnalytics, StudySummary,
    SubmissionAnalytics,
};
use fiq_core::entities::{
    DialogSubmission, FormSubmission, QuestionnaireSubmission, SectionTiming, StudyCompletion,
    StudyMetadata, StudySave,
};
use fiq_core::enums::Variant;
use fiq_core::ResponseSet;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct QuestionnaireResponses<'a> {
    pub trust: &'a ResponseSet,
    pub sus: &'a ResponseSet,
    pub preference: &'a ResponseSet,
}

#[derive(Debug, Serialize)]
pub struct QuestionnaireTiming<'a> {
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub total_duration: Option<i64>,
    pub section_times: &'a BTreeMap<String, SectionTiming>,
    pub completed_sections: &'a [String],
}

/// Archived questionnaire submission.
#[derive(Debug, Serialize)]
pub struct QuestionnaireRecord<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub variant: Variant,
    pub participant_id: &'a str,
    pub timestamp: DateTime<Utc>,
    pub responses: QuestionnaireResponses<'a>,
    pub analytics: &'a SubmissionAnalytics,
    pub timing: QuestionnaireTiming<'a>,
    pub study_metadata: StudyMetadata,
}

impl<'a> QuestionnaireRecord<'a> {
    #[must_use]
    pub fn new(
        submission: &'a QuestionnaireSubmission,
        analytics: &'a SubmissionAnalytics,
        study_metadata: StudyMetadata,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            kind: "questionnaire_response",
            variant: submission.variant,
            participant_id: submission.participant_label(),
            timestamp,
            responses: QuestionnaireResponses {
                trust: &submission.trust_responses,
                sus: &submission.sus_responses,
                preference: &submission.preference_responses,
            },
            analytics,
            timing: QuestionnaireTiming {
                start_time: submission.start_time,
                end_time: submission.end_time,
                total_duration: submission.total_duration_ms(),
                section_times: &submission.section_times,
                completed_sections: &submission.completed_sections,
            },
            study_metadata,
        }
    }
}

/// Archived study completion: the request verbatim plus what was derived
/// from it.
#[derive(Debug, Serialize)]
pub struct StudyRecord<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub study: &'a StudyCompletion,
    pub study_summary: &'a StudySummary,
    pub analytics: &'a StudyAnalytics,
    pub archive_metadata: StudyMetadata,
}

/// Archived whole-study save: the request verbatim plus its scores.
#[derive(Debug, Serialize)]
pub struct StudySaveRecord<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub study: &'a StudySave,
    pub analytics: &'a StudySaveAnalytics,
    pub study_metadata: StudyMetadata,
}

/// Archived Variant A or Variant B record.
#[derive(Debug, Serialize)]
pub struct VariantRecord<'a, S, M> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub variant: Variant,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub submission: &'a S,
    pub metrics: M,
    pub study_metadata: StudyMetadata,
}

pub type FormRecord<'a> = VariantRecord<'a, FormSubmission, FormMetrics>;
pub type DialogRecord<'a> = VariantRecord<'a, DialogSubmission, DialogMetrics>;
