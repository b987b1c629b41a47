//! Trust questionnaire aggregation.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::round_to;
use crate::catalogue::TRUST_KEYS;
use crate::enums::TrustLevel;
use crate::errors::ScoreError;
use crate::response_set::ResponseSet;

/// Mean trust rating over whichever trust items were answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TrustAnalysis {
    /// Arithmetic mean, rounded to two decimals.
    pub average_score: f64,
    /// Number of answered trust items.
    pub total_responses: usize,
    /// The ratings that went into the mean.
    pub individual_scores: BTreeMap<String, u8>,
    pub trust_level: TrustLevel,
}

/// Aggregate the five trust items.
///
/// Partial sets are fine: the mean covers the answered subset. The level is
/// bucketed from the unrounded mean.
///
/// # Errors
///
/// - [`ScoreError::Incomplete`] if no trust item is answered.
/// - [`ScoreError::InvalidValue`] if an answered item is outside 1-5.
pub fn analyze_trust(responses: &ResponseSet) -> Result<TrustAnalysis, ScoreError> {
    let mut individual_scores = BTreeMap::new();
    for key in TRUST_KEYS {
        if let Some(value) = responses.likert(key)? {
            individual_scores.insert(key.to_string(), value);
        }
    }

    if individual_scores.is_empty() {
        return Err(ScoreError::Incomplete {
            missing: TRUST_KEYS.iter().map(ToString::to_string).collect(),
        });
    }

    let total: u32 = individual_scores.values().map(|v| u32::from(*v)).sum();
    let count = u32::try_from(individual_scores.len()).unwrap_or(u32::MAX);
    let mean = f64::from(total) / f64::from(count);

    Ok(TrustAnalysis {
        average_score: round_to(mean, 2),
        total_responses: individual_scores.len(),
        individual_scores,
        trust_level: TrustLevel::from_mean(mean),
    })
}

/// Shorthand for the rounded mean only.
///
/// # Errors
///
/// Same as [`analyze_trust`].
pub fn trust_average(responses: &ResponseSet) -> Result<f64, ScoreError> {
    analyze_trust(responses).map(|analysis| analysis.average_score)
}
