use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::response_set::ResponseSet;

/// Self-reported participant profile. Values are the front end's option ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Demographics {
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub tech_affinity: String,
}

impl Demographics {
    /// Pipe-joined profile for one-line summaries.
    #[must_use]
    pub fn compact(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.age, self.education, self.experience, self.tech_affinity
        )
    }
}

/// Metadata stamped onto every archived record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StudyMetadata {
    pub project: String,
    pub institution: String,
    pub researcher: String,
    pub version: String,
}

/// Body of `POST /api/study/complete`.
///
/// The three questionnaire payloads are the records the client got back from
/// earlier submissions. They are kept verbatim for the archive and only
/// their analytics are read.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct StudyCompletion {
    pub participant_id: String,
    /// Order the variants were shown in, e.g. `"A-B"`.
    pub randomization: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub demographics: Demographics,
    #[serde(default)]
    pub variant1_questionnaire: Option<Value>,
    #[serde(default)]
    pub variant2_questionnaire: Option<Value>,
    #[serde(default)]
    pub comparison_questionnaire: Option<Value>,
    #[serde(default)]
    pub study_metadata: Option<StudyMetadata>,
}

impl StudyCompletion {
    /// The two variant labels in the order shown, from `randomization`.
    ///
    /// Falls back to `variant1`/`variant2` unless the order is `X-Y` with two
    /// distinct labels, so summaries keyed by label never lose a variant.
    #[must_use]
    pub fn variant_order(&self) -> (String, String) {
        let labels = self
            .randomization
            .split_once('-')
            .map(|(first, second)| (first.trim(), second.trim()));
        match labels {
            Some((first, second)) if !first.is_empty() && !second.is_empty() && first != second => {
                (first.to_string(), second.to_string())
            }
            _ => ("variant1".to_string(), "variant2".to_string()),
        }
    }

    #[must_use]
    pub fn total_duration_ms(&self) -> i64 {
        (self.end_time - self.start_time).num_milliseconds()
    }
}

/// One variant's raw questionnaire answers inside a study save.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VariantResults {
    #[serde(default)]
    pub sus_results: Option<ResponseSet>,
    #[serde(default)]
    pub trust_results: Option<ResponseSet>,
    /// Everything else recorded for the variant, archived as sent.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Per-aspect votes from the final comparison.
///
/// A vote of `"A"` or `"variant_a"` counts for Variant A, `"B"` or
/// `"variant_b"` for Variant B. Anything else abstains.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PreferenceVotes {
    #[serde(default)]
    pub speed: Option<Value>,
    #[serde(default)]
    pub ease_of_use: Option<Value>,
    #[serde(default)]
    pub user_control: Option<Value>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Body of `POST /api/study/save`: a whole study in one request, with both
/// variants' raw answers still unscored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StudySave {
    #[serde(default)]
    pub participant_id: Option<String>,
    #[serde(default)]
    pub demographics: Option<Value>,
    #[serde(default)]
    pub variant_a_data: Option<VariantResults>,
    #[serde(default)]
    pub variant_b_data: Option<VariantResults>,
    #[serde(default)]
    pub preference_comparison: Option<PreferenceVotes>,
    /// Client-side timings; only `totalDuration` (whole seconds) is read.
    #[serde(default)]
    pub timing_data: Option<Value>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl StudySave {
    /// The participant id, unless it is missing or blank.
    #[must_use]
    pub fn participant(&self) -> Option<&str> {
        self.participant_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    #[must_use]
    pub fn total_duration_secs(&self) -> Option<i64> {
        self.timing_data.as_ref()?.get("totalDuration")?.as_i64()
    }
}

/// Headline numbers pulled out of one variant's questionnaire record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct VariantOutcome {
    pub variant: Option<String>,
    pub sus_score: Option<f64>,
    pub trust_average: Option<f64>,
    pub completion_time: Option<i64>,
}

impl VariantOutcome {
    /// Read a questionnaire record as archived by the save endpoint.
    #[must_use]
    pub fn from_record(record: &Value) -> Self {
        Self {
            variant: record
                .get("variant")
                .and_then(Value::as_str)
                .map(ToString::to_string),
            sus_score: record.pointer("/analytics/sus_score").and_then(Value::as_f64),
            trust_average: record
                .pointer("/analytics/trust_analysis/average_score")
                .or_else(|| record.pointer("/analytics/trust_average"))
                .and_then(Value::as_f64),
            completion_time: record
                .pointer("/timing/total_duration")
                .or_else(|| record.pointer("/analytics/completion_time"))
                .and_then(Value::as_i64),
        }
    }
}
