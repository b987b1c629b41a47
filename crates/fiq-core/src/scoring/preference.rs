//! Comparison questionnaire analysis.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::catalogue::{OVERALL_PREFERENCE_KEY, PREFERENCE_CHOICE_KEYS, PREFERENCE_RATING_KEYS};
use crate::enums::PreferenceDirection;
use crate::errors::ScoreError;
use crate::response_set::ResponseSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PreferenceAnalysis {
    /// Answered A-vs-B choices, e.g. `speed_preference: "A"`.
    pub direct_comparisons: BTreeMap<String, String>,
    /// Answered Likert ratings.
    pub variant_ratings: BTreeMap<String, u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_preference_direction: Option<PreferenceDirection>,
}

/// Summarize the comparison questionnaire.
///
/// Unanswered keys are left out rather than reported, so an empty set yields
/// an empty analysis.
///
/// # Errors
///
/// Returns [`ScoreError::InvalidValue`] if a rating key holds something other
/// than a 1-5 rating.
pub fn analyze_preferences(responses: &ResponseSet) -> Result<PreferenceAnalysis, ScoreError> {
    let direct_comparisons = PREFERENCE_CHOICE_KEYS
        .iter()
        .filter_map(|key| {
            responses
                .get(key)
                .filter(|value| value.is_answered())
                .map(|value| ((*key).to_string(), value.to_display_string()))
        })
        .collect();

    let mut variant_ratings = BTreeMap::new();
    for key in PREFERENCE_RATING_KEYS {
        if let Some(rating) = responses.likert(key)? {
            variant_ratings.insert(key.to_string(), rating);
        }
    }

    let overall_preference_direction = variant_ratings
        .get(OVERALL_PREFERENCE_KEY)
        .copied()
        .map(PreferenceDirection::from_rating);

    Ok(PreferenceAnalysis {
        direct_comparisons,
        variant_ratings,
        overall_preference_direction,
    })
}
