use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ChatRole;
use crate::response_set::ResponseSet;

/// One field of the generated Variant A form.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FormField {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type", default = "default_field_type")]
    pub field_type: String,
    /// Choices of a `select` field.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default)]
    pub required: bool,
    /// `easy`, `medium` or `hard`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

fn default_field_type() -> String {
    "text".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FormInstructions {
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FormField>,
}

/// Body of `POST /api/form/save`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FormSubmission {
    #[serde(default)]
    pub participant_id: Option<String>,
    #[serde(default)]
    pub instructions: FormInstructions,
    /// Field id to entered value.
    #[serde(default)]
    pub values: ResponseSet,
}

/// A main question of the Variant B dialog.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DialogQuestion {
    #[serde(default)]
    pub id: String,
    pub question: String,
    pub field: String,
    #[serde(rename = "type", default = "default_field_type")]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default = "default_required")]
    pub required: bool,
}

const fn default_required() -> bool {
    true
}

/// A chat or dialog message.
///
/// Accepts both `{role, content}` and the older `{type, message}` shape.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChatMessage {
    #[serde(alias = "type")]
    pub role: ChatRole,
    #[serde(alias = "message")]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ChatMessage {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            timestamp: Some(Utc::now()),
        }
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            timestamp: Some(Utc::now()),
        }
    }
}

/// Body of `POST /api/dialog/save`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DialogSubmission {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub participant_id: Option<String>,
    #[serde(default)]
    pub questions: Vec<DialogQuestion>,
    #[serde(default)]
    pub answers: ResponseSet,
    #[serde(default, alias = "chatHistory")]
    pub chat_history: Vec<ChatMessage>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn chat_message_accepts_legacy_shape() {
        let msg: ChatMessage =
            serde_json::from_str(r#"{"type": "bot", "message": "Hallo!"}"#).unwrap();
        assert_eq!(msg.role, ChatRole::Assistant);
        assert_eq!(msg.content, "Hallo!");
        assert_eq!(msg.timestamp, None);
    }

    #[test]
    fn dialog_submission_accepts_camel_case_history() {
        let json = r#"{
            "questions": [{"question": "Baujahr?", "field": "BAUJAHR", "type": "number"}],
            "answers": {"BAUJAHR": "1965"},
            "chatHistory": [{"role": "user", "content": "1965"}]
        }"#;
        let submission: DialogSubmission = serde_json::from_str(json).unwrap();
        assert_eq!(submission.chat_history.len(), 1);
        assert!(submission.questions[0].required);
        assert_eq!(submission.questions[0].field_type, "number");
    }

    #[test]
    fn form_field_defaults() {
        let field: FormField = serde_json::from_str(r#"{"id": "BAUJAHR"}"#).unwrap();
        assert_eq!(field.field_type, "text");
        assert!(!field.required);
    }
}
