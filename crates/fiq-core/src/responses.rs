//! JSON response bodies returned by the study API.
//!
//! Every save endpoint answers with `success: true` even when the primary
//! store was unreachable; `storage` says where the record actually went and
//! `backup` carries the record itself whenever it did not reach durable
//! storage, so the client can offer it as a download.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analytics::{
    DialogMetrics, FieldIssue, FormMetrics, StudyAnalytics, StudySaveAnalytics, StudySummary,
};
use crate::dialog::DialogProgress;
use crate::entities::{DialogQuestion, FormField};
use crate::enums::{MessageIntent, StorageMethod, Variant};
use crate::response_set::ResponseSet;

/// Where an archived record ended up.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StorageReceipt {
    pub method: StorageMethod,
    pub file_name: String,
    /// Object path in the store, when the write succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Why the primary store was skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StorageReceipt {
    #[must_use]
    pub const fn status(&self) -> &'static str {
        if self.method.is_durable() {
            "saved"
        } else {
            "logged"
        }
    }
}

/// Headline scores of a questionnaire submission. `null` means undefined.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AnalyticsSummary {
    pub sus_score: Option<f64>,
    pub trust_average: Option<f64>,
    /// Milliseconds from start to end, when both were sent.
    pub completion_time: Option<i64>,
}

/// Response from `POST /api/questionnaire/save`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SubmissionResponse {
    pub success: bool,
    pub questionnaire_type: Variant,
    pub analytics: AnalyticsSummary,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<FieldIssue>,
    pub storage: StorageReceipt,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup: Option<Value>,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

/// Response from `POST /api/study/complete`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct StudyCompleteResponse {
    pub success: bool,
    pub participant_id: String,
    pub study_summary: StudySummary,
    pub analytics: StudyAnalytics,
    pub storage: StorageReceipt,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup: Option<Value>,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

/// Response from `POST /api/study/save`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct StudySaveResponse {
    pub success: bool,
    pub participant_id: String,
    pub analytics_preview: StudySaveAnalytics,
    pub storage: StorageReceipt,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup: Option<Value>,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

/// Response from `POST /api/form/save` and `POST /api/dialog/save`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RecordSavedResponse<M> {
    pub success: bool,
    pub variant: Variant,
    pub metrics: M,
    pub storage: StorageReceipt,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup: Option<Value>,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

pub type FormSavedResponse = RecordSavedResponse<FormMetrics>;
pub type DialogSavedResponse = RecordSavedResponse<DialogMetrics>;

/// Response from `POST /api/dialog/start`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DialogStartResponse {
    pub session_id: String,
    pub questions: Vec<DialogQuestion>,
    pub welcome_message: String,
}

/// Response from `POST /api/dialog/message`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DialogMessageResponse {
    pub response: String,
    pub session_id: String,
    pub intent: MessageIntent,
    /// 1-based number of the question now being asked.
    pub current_question: usize,
    pub total_questions: usize,
    pub progress: DialogProgress,
    pub dialog_complete: bool,
    pub answers_collected: ResponseSet,
    pub can_ask_followup: bool,
    pub llm_used: bool,
}

/// Response from `POST /api/generate-instructions`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct InstructionsResponse {
    pub fields: Vec<FormField>,
    /// The scenario text the client sent, echoed back.
    pub context_used: Option<String>,
    pub instructions: Vec<String>,
}

/// Response from `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChatResponse {
    pub response: String,
    pub context_understanding: String,
    pub llm_used: bool,
}

/// Response from `POST /api/error/report`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ErrorReportResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "errorId", default, skip_serializing_if = "Option::is_none")]
    pub error_id: Option<String>,
    /// `backend` or `local_logs`.
    pub saved_to: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ServiceStatus {
    pub storage: bool,
    pub backend: bool,
}

/// Response from `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub services: ServiceStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_scores_serialize_as_null() {
        let json = serde_json::to_value(AnalyticsSummary::default()).unwrap();
        assert_eq!(json["sus_score"], Value::Null);
        assert_eq!(json["trust_average"], Value::Null);
    }

    #[test]
    fn receipt_status_follows_method() {
        let receipt = StorageReceipt {
            method: StorageMethod::LogFallback,
            file_name: "questionnaire_A_P-1.json".into(),
            location: None,
            error: Some("storage not configured".into()),
        };
        assert_eq!(receipt.status(), "logged");
        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["method"], "log_fallback");
        assert!(json.get("location").is_none());
    }
}
