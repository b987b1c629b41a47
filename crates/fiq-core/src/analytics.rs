//! Derived analytics for submissions, study completions, and Variant A/B records.
//!
//! Scoring failures never abort an analysis. They leave the affected score
//! undefined and add a [`FieldIssue`] naming the offending keys.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use serde_json::Value;

use crate::entities::{
    Demographics, DialogSubmission, FormSubmission, PreferenceVotes, QuestionnaireSubmission,
    StudyCompletion, StudySave, VariantOutcome, VariantResults,
};
use crate::enums::{PreferenceDirection, TrustLevel, Variant};
use crate::errors::ScoreError;
use crate::progress::percent;
use crate::response_set::ResponseSet;
use crate::scoring::{
    PreferenceAnalysis, TrustAnalysis, analyze_preferences, analyze_trust, round_to, sus_score,
    trust_average,
};

/// Round milliseconds to whole minutes.
#[must_use]
pub fn minutes(ms: i64) -> i64 {
    (ms + 30_000).div_euclid(60_000)
}

// ---------------------------------------------------------------------------
// Questionnaire submissions
// ---------------------------------------------------------------------------

/// A field-level validation message for a score that could not be computed.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FieldIssue {
    pub section: String,
    pub fields: Vec<String>,
    pub message: String,
}

impl FieldIssue {
    #[must_use]
    pub fn from_score_error(section: &str, error: &ScoreError) -> Self {
        Self {
            section: section.to_string(),
            fields: error.fields(),
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CompletionStats {
    pub total_sections: usize,
    /// Per-section duration in milliseconds, `None` for unfinished sections.
    pub section_durations: BTreeMap<String, Option<i64>>,
    pub total_duration: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SubmissionAnalytics {
    pub sus_score: Option<f64>,
    pub trust_analysis: Option<TrustAnalysis>,
    pub preference_analysis: Option<PreferenceAnalysis>,
    pub completion_stats: CompletionStats,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<FieldIssue>,
}

/// Compute every score a questionnaire submission supports.
///
/// An empty response set is "not part of this submission" and produces
/// neither a score nor an issue. Preference analysis runs only for
/// `comparison` submissions.
#[must_use]
pub fn analyze_submission(submission: &QuestionnaireSubmission) -> SubmissionAnalytics {
    let mut issues = Vec::new();

    let sus_score = score_section(
        "sus",
        &submission.sus_responses,
        sus_score,
        &mut issues,
    );
    let trust_analysis = score_section(
        "trust",
        &submission.trust_responses,
        analyze_trust,
        &mut issues,
    );
    let preference_analysis = if submission.variant == Variant::Comparison {
        score_section(
            "preference",
            &submission.preference_responses,
            analyze_preferences,
            &mut issues,
        )
    } else {
        None
    };

    let completion_stats = CompletionStats {
        total_sections: submission.completed_sections.len(),
        section_durations: submission
            .section_times
            .iter()
            .map(|(name, timing)| (name.clone(), timing.duration_ms()))
            .collect(),
        total_duration: submission.total_duration_ms(),
    };

    SubmissionAnalytics {
        sus_score,
        trust_analysis,
        preference_analysis,
        completion_stats,
        issues,
    }
}

fn score_section<T>(
    section: &str,
    responses: &ResponseSet,
    score: impl FnOnce(&ResponseSet) -> Result<T, ScoreError>,
    issues: &mut Vec<FieldIssue>,
) -> Option<T> {
    if responses.is_empty() {
        return None;
    }
    match score(responses) {
        Ok(value) => Some(value),
        Err(error) => {
            issues.push(FieldIssue::from_score_error(section, &error));
            None
        }
    }
}

/// One-line digest of a submission for the log stream.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SubmissionSummary {
    pub participant: String,
    pub variant: Variant,
    pub sus_score: Option<f64>,
    pub trust_level: Option<TrustLevel>,
    pub overall_preference: Option<PreferenceDirection>,
    pub completion_time_minutes: Option<i64>,
}

impl SubmissionSummary {
    #[must_use]
    pub fn new(submission: &QuestionnaireSubmission, analytics: &SubmissionAnalytics) -> Self {
        Self {
            participant: submission.participant_label().to_string(),
            variant: submission.variant,
            sus_score: analytics.sus_score,
            trust_level: analytics.trust_analysis.as_ref().map(|t| t.trust_level),
            overall_preference: analytics
                .preference_analysis
                .as_ref()
                .and_then(|p| p.overall_preference_direction),
            completion_time_minutes: analytics.completion_stats.total_duration.map(minutes),
        }
    }
}

// ---------------------------------------------------------------------------
// Study completion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PerformanceComparison {
    /// Second variant minus first, rounded to two decimals.
    pub sus_difference: Option<f64>,
    pub trust_difference: Option<f64>,
    pub preferred_variant: Option<PreferenceDirection>,
    pub randomization_order: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CompletionQuality {
    pub total_duration_minutes: i64,
    pub all_sections_completed: bool,
    pub study_flow: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct StudyAnalytics {
    pub participant_profile: Demographics,
    pub performance_comparison: PerformanceComparison,
    pub completion_quality: CompletionQuality,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct StudyOutcomes {
    pub variant1: VariantOutcome,
    pub variant2: VariantOutcome,
    pub comparison_preference: Option<PreferenceDirection>,
}

/// Digest of a completed study, keyed by the variant labels shown.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct StudySummary {
    pub participant: String,
    pub duration_min: i64,
    pub randomization: String,
    pub sus_scores: BTreeMap<String, Option<f64>>,
    pub trust_scores: BTreeMap<String, Option<f64>>,
    pub overall_preference: Option<PreferenceDirection>,
    pub demographics: String,
}

/// Extract headline numbers from the three questionnaire records.
#[must_use]
pub fn study_outcomes(study: &StudyCompletion) -> StudyOutcomes {
    let outcome = |record: Option<&serde_json::Value>| {
        record.map(VariantOutcome::from_record).unwrap_or_default()
    };
    let comparison_preference = study
        .comparison_questionnaire
        .as_ref()
        .and_then(|record| {
            record.pointer("/analytics/preference_analysis/overall_preference_direction")
        })
        .and_then(|value| serde_json::from_value(value.clone()).ok());

    StudyOutcomes {
        variant1: outcome(study.variant1_questionnaire.as_ref()),
        variant2: outcome(study.variant2_questionnaire.as_ref()),
        comparison_preference,
    }
}

fn difference(first: Option<f64>, second: Option<f64>) -> Option<f64> {
    Some(round_to(second? - first?, 2))
}

#[must_use]
pub fn analyze_study(study: &StudyCompletion, outcomes: &StudyOutcomes) -> StudyAnalytics {
    StudyAnalytics {
        participant_profile: study.demographics.clone(),
        performance_comparison: PerformanceComparison {
            sus_difference: difference(outcomes.variant1.sus_score, outcomes.variant2.sus_score),
            trust_difference: difference(
                outcomes.variant1.trust_average,
                outcomes.variant2.trust_average,
            ),
            preferred_variant: outcomes.comparison_preference,
            randomization_order: study.randomization.clone(),
        },
        completion_quality: CompletionQuality {
            total_duration_minutes: minutes(study.total_duration_ms()),
            all_sections_completed: study.variant1_questionnaire.is_some()
                && study.variant2_questionnaire.is_some()
                && study.comparison_questionnaire.is_some(),
            study_flow: format!("Demographics → {} → Comparison", study.randomization),
        },
    }
}

#[must_use]
pub fn summarize_study(study: &StudyCompletion, outcomes: &StudyOutcomes) -> StudySummary {
    let (first, second) = study.variant_order();
    StudySummary {
        participant: study.participant_id.clone(),
        duration_min: minutes(study.total_duration_ms()),
        randomization: study.randomization.clone(),
        sus_scores: [
            (first.clone(), outcomes.variant1.sus_score),
            (second.clone(), outcomes.variant2.sus_score),
        ]
        .into(),
        trust_scores: [
            (first, outcomes.variant1.trust_average),
            (second, outcomes.variant2.trust_average),
        ]
        .into(),
        overall_preference: outcomes.comparison_preference,
        demographics: study.demographics.compact(),
    }
}

// ---------------------------------------------------------------------------
// Whole-study saves
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SaveCompletion {
    pub demographics_completed: bool,
    /// The variant sent SUS answers, complete or not.
    pub variant_a_completed: bool,
    pub variant_b_completed: bool,
    pub comparison_completed: bool,
    pub total_duration_minutes: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct VariantScores {
    pub variant_a: Option<f64>,
    pub variant_b: Option<f64>,
}

/// Tally of the per-aspect comparison votes.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct VoteTally {
    /// Whichever variant won more of the three aspects.
    pub overall_preference: PreferenceDirection,
    pub speed_preference: Option<Value>,
    pub ease_preference: Option<Value>,
    pub control_preference: Option<Value>,
}

impl VoteTally {
    #[must_use]
    pub fn count(votes: &PreferenceVotes) -> Self {
        let aspects = [&votes.speed, &votes.ease_of_use, &votes.user_control];
        let votes_for = |variant: Variant| {
            aspects
                .iter()
                .filter(|vote| vote_for(vote.as_ref()) == Some(variant))
                .count()
        };
        let overall_preference = match votes_for(Variant::A).cmp(&votes_for(Variant::B)) {
            std::cmp::Ordering::Greater => PreferenceDirection::PrefersA,
            std::cmp::Ordering::Less => PreferenceDirection::PrefersB,
            std::cmp::Ordering::Equal => PreferenceDirection::Neutral,
        };
        Self {
            overall_preference,
            speed_preference: votes.speed.clone(),
            ease_preference: votes.ease_of_use.clone(),
            control_preference: votes.user_control.clone(),
        }
    }
}

fn vote_for(vote: Option<&Value>) -> Option<Variant> {
    match vote?.as_str()?.trim() {
        "A" | "variant_a" => Some(Variant::A),
        "B" | "variant_b" => Some(Variant::B),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct StudySaveAnalytics {
    pub completion_metrics: SaveCompletion,
    pub sus_scores: VariantScores,
    /// Trust means, rounded to two decimals.
    pub trust_scores: VariantScores,
    pub preference_analysis: Option<VoteTally>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<FieldIssue>,
}

/// Score both variants of a whole-study save.
///
/// Uses the same SUS and trust rules as questionnaire submissions, so an
/// incomplete SUS set scores `null` and lands in `issues` under
/// `variant_a.sus` or `variant_b.sus`.
#[must_use]
pub fn analyze_study_save(save: &StudySave) -> StudySaveAnalytics {
    let mut issues = Vec::new();
    let (sus_a, trust_a) = score_variant("variant_a", save.variant_a_data.as_ref(), &mut issues);
    let (sus_b, trust_b) = score_variant("variant_b", save.variant_b_data.as_ref(), &mut issues);
    let sent_sus = |data: Option<&VariantResults>| data.is_some_and(|d| d.sus_results.is_some());

    StudySaveAnalytics {
        completion_metrics: SaveCompletion {
            demographics_completed: save.demographics.is_some(),
            variant_a_completed: sent_sus(save.variant_a_data.as_ref()),
            variant_b_completed: sent_sus(save.variant_b_data.as_ref()),
            comparison_completed: save.preference_comparison.is_some(),
            total_duration_minutes: save
                .total_duration_secs()
                .filter(|secs| *secs > 0)
                .map(|secs| minutes(secs.saturating_mul(1000))),
        },
        sus_scores: VariantScores {
            variant_a: sus_a,
            variant_b: sus_b,
        },
        trust_scores: VariantScores {
            variant_a: trust_a,
            variant_b: trust_b,
        },
        preference_analysis: save.preference_comparison.as_ref().map(VoteTally::count),
        issues,
    }
}

fn score_variant(
    variant: &str,
    data: Option<&VariantResults>,
    issues: &mut Vec<FieldIssue>,
) -> (Option<f64>, Option<f64>) {
    let Some(data) = data else {
        return (None, None);
    };
    let sus = match &data.sus_results {
        Some(set) => score_section(&format!("{variant}.sus"), set, sus_score, issues),
        None => None,
    };
    let trust = match &data.trust_results {
        Some(set) => score_section(&format!("{variant}.trust"), set, trust_average, issues),
        None => None,
    };
    (sus, trust)
}

// ---------------------------------------------------------------------------
// Variant A / B records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FormMetrics {
    pub total_fields: usize,
    pub filled_fields: usize,
    /// Percent of fields filled; 0 when the form has no fields.
    pub completion_rate: u8,
}

#[must_use]
pub fn form_metrics(form: &FormSubmission) -> FormMetrics {
    let total_fields = form.instructions.fields.len();
    let filled_fields = form.values.iter().filter(|(_, v)| v.is_answered()).count();
    FormMetrics {
        total_fields,
        filled_fields,
        completion_rate: percent(filled_fields, total_fields).unwrap_or(0),
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DialogMetrics {
    pub total_questions: usize,
    pub answered_questions: usize,
    pub completion_rate: u8,
    pub chat_interactions: usize,
}

#[must_use]
pub fn dialog_metrics(dialog: &DialogSubmission) -> DialogMetrics {
    let total_questions = dialog.questions.len();
    let answered_questions = dialog.answers.iter().filter(|(_, v)| v.is_answered()).count();
    DialogMetrics {
        total_questions,
        answered_questions,
        completion_rate: percent(answered_questions, total_questions).unwrap_or(0),
        chat_interactions: dialog.chat_history.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::{SUS_KEYS, TRUST_KEYS};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn submission(variant: &str) -> QuestionnaireSubmission {
        serde_json::from_value(json!({
            "variant": variant,
            "participantId": "P-001",
            "startTime": "2025-06-02T10:00:00Z",
            "endTime": "2025-06-02T10:08:40Z",
            "completedSections": ["trust", "sus"],
        }))
        .unwrap()
    }

    #[test]
    fn full_variant_submission() {
        let mut sub = submission("A");
        sub.sus_responses = SUS_KEYS.iter().map(|k| (*k, 3_i64)).collect();
        sub.trust_responses = TRUST_KEYS.iter().map(|k| (*k, 4_i64)).collect();
        sub.preference_responses = ResponseSet::new().with("overall_preference", 5_i64);

        let analytics = analyze_submission(&sub);
        assert_eq!(analytics.sus_score, Some(50.0));
        assert_eq!(
            analytics.trust_analysis.as_ref().map(|t| t.trust_level),
            Some(TrustLevel::High)
        );
        assert_eq!(analytics.preference_analysis, None);
        assert_eq!(analytics.completion_stats.total_sections, 2);
        assert_eq!(analytics.completion_stats.total_duration, Some(520_000));
        assert!(analytics.issues.is_empty());

        let summary = SubmissionSummary::new(&sub, &analytics);
        assert_eq!(summary.completion_time_minutes, Some(9));
        assert_eq!(summary.trust_level, Some(TrustLevel::High));
    }

    #[test]
    fn incomplete_sus_is_undefined_with_issue() {
        let mut sub = submission("B");
        sub.sus_responses = ResponseSet::new().with("sus_1", 4_i64);

        let analytics = analyze_submission(&sub);
        assert_eq!(analytics.sus_score, None);
        assert_eq!(analytics.issues.len(), 1);
        assert_eq!(analytics.issues[0].section, "sus");
        assert_eq!(analytics.issues[0].fields.len(), 9);
    }

    #[test]
    fn empty_sets_are_silent() {
        let analytics = analyze_submission(&submission("B"));
        assert_eq!(analytics.sus_score, None);
        assert_eq!(analytics.trust_analysis, None);
        assert!(analytics.issues.is_empty());
    }

    #[test]
    fn comparison_runs_preference_analysis() {
        let mut sub = submission("comparison");
        sub.preference_responses = ResponseSet::new()
            .with("overall_preference", 2_i64)
            .with("speed_preference", "B");
        let analytics = analyze_submission(&sub);
        let summary = SubmissionSummary::new(&sub, &analytics);
        assert_eq!(summary.overall_preference, Some(PreferenceDirection::PrefersB));
    }

    #[test]
    fn minutes_round_half_up() {
        assert_eq!(minutes(0), 0);
        assert_eq!(minutes(29_999), 0);
        assert_eq!(minutes(30_000), 1);
        assert_eq!(minutes(750_000), 13);
    }

    fn study(v1: Option<serde_json::Value>, v2: Option<serde_json::Value>) -> StudyCompletion {
        serde_json::from_value(json!({
            "participant_id": "P-009",
            "randomization": "B-A",
            "start_time": "2025-06-02T09:00:00Z",
            "end_time": "2025-06-02T09:45:10Z",
            "demographics": {"age": "25-34", "education": "bachelor", "experience": "mid", "tech_affinity": "3"},
            "variant1_questionnaire": v1,
            "variant2_questionnaire": v2,
            "comparison_questionnaire": {
                "analytics": {"preference_analysis": {"overall_preference_direction": "prefers_a"}}
            }
        }))
        .unwrap()
    }

    #[test]
    fn study_differences_are_second_minus_first() {
        let study = study(
            Some(json!({"variant": "B", "analytics": {"sus_score": 62.5, "trust_analysis": {"average_score": 3.4}}})),
            Some(json!({"variant": "A", "analytics": {"sus_score": 80.0, "trust_analysis": {"average_score": 4.13}}})),
        );
        let outcomes = study_outcomes(&study);
        let analytics = analyze_study(&study, &outcomes);

        assert_eq!(analytics.performance_comparison.sus_difference, Some(17.5));
        assert_eq!(analytics.performance_comparison.trust_difference, Some(0.73));
        assert_eq!(
            analytics.performance_comparison.preferred_variant,
            Some(PreferenceDirection::PrefersA)
        );
        assert!(analytics.completion_quality.all_sections_completed);
        assert_eq!(analytics.completion_quality.total_duration_minutes, 45);
        assert_eq!(analytics.completion_quality.study_flow, "Demographics → B-A → Comparison");

        let summary = summarize_study(&study, &outcomes);
        assert_eq!(summary.sus_scores.get("B"), Some(&Some(62.5)));
        assert_eq!(summary.sus_scores.get("A"), Some(&Some(80.0)));
        assert_eq!(summary.demographics, "25-34|bachelor|mid|3");
    }

    #[test]
    fn repeated_label_keeps_both_variants() {
        let mut study = study(
            Some(json!({"analytics": {"sus_score": 55.0, "trust_analysis": {"average_score": 3.0}}})),
            Some(json!({"analytics": {"sus_score": 75.0, "trust_analysis": {"average_score": 4.0}}})),
        );
        study.randomization = "A-A".into();
        let summary = summarize_study(&study, &study_outcomes(&study));

        assert_eq!(summary.sus_scores.len(), 2);
        assert_eq!(summary.sus_scores.get("variant1"), Some(&Some(55.0)));
        assert_eq!(summary.sus_scores.get("variant2"), Some(&Some(75.0)));
        assert_eq!(summary.trust_scores.get("variant1"), Some(&Some(3.0)));
    }

    #[test]
    fn missing_variant_leaves_difference_undefined() {
        let study = study(
            Some(json!({"analytics": {"sus_score": 70.0}})),
            None,
        );
        let outcomes = study_outcomes(&study);
        let analytics = analyze_study(&study, &outcomes);
        assert_eq!(analytics.performance_comparison.sus_difference, None);
        assert!(!analytics.completion_quality.all_sections_completed);
    }

    fn study_save(body: serde_json::Value) -> StudySave {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn study_save_scores_both_variants() {
        let sus: serde_json::Map<_, _> =
            SUS_KEYS.iter().map(|k| ((*k).to_string(), json!(4))).collect();
        let trust: serde_json::Map<_, _> =
            TRUST_KEYS.iter().map(|k| ((*k).to_string(), json!(4))).collect();
        let save = study_save(json!({
            "participantId": "P-11",
            "demographics": {"age": "25-34"},
            "variantAData": {"susResults": sus, "trustResults": trust},
            "variantBData": {"susResults": {"sus_1": 5, "sus_2": 1}},
            "preferenceComparison": {"speed": "B", "ease_of_use": "variant_b", "user_control": "A"},
            "timingData": {"totalDuration": 2430}
        }));

        let analytics = analyze_study_save(&save);

        assert_eq!(analytics.sus_scores.variant_a, Some(50.0));
        assert_eq!(analytics.sus_scores.variant_b, None);
        assert_eq!(analytics.trust_scores.variant_a, Some(4.0));
        assert_eq!(analytics.trust_scores.variant_b, None);
        assert_eq!(
            analytics.completion_metrics,
            SaveCompletion {
                demographics_completed: true,
                variant_a_completed: true,
                variant_b_completed: true,
                comparison_completed: true,
                total_duration_minutes: Some(41),
            }
        );
        let tally = analytics.preference_analysis.unwrap();
        assert_eq!(tally.overall_preference, PreferenceDirection::PrefersB);
        assert_eq!(tally.control_preference, Some(json!("A")));
        assert_eq!(analytics.issues.len(), 1);
        assert_eq!(analytics.issues[0].section, "variant_b.sus");
        assert_eq!(analytics.issues[0].fields.len(), 8);
    }

    #[test]
    fn bare_study_save_is_all_undefined() {
        let analytics = analyze_study_save(&study_save(json!({
            "participantId": "P-12",
            "preferenceComparison": {"speed": "A", "ease_of_use": "B", "user_control": 3},
            "timingData": {"totalDuration": 0}
        })));
        assert_eq!(analytics.sus_scores, VariantScores::default());
        assert_eq!(analytics.completion_metrics.total_duration_minutes, None);
        assert!(!analytics.completion_metrics.variant_a_completed);
        assert_eq!(
            analytics.preference_analysis.unwrap().overall_preference,
            PreferenceDirection::Neutral
        );
        assert!(analytics.issues.is_empty());
    }

    #[test]
    fn form_metrics_count_non_blank_values() {
        let form: FormSubmission = serde_json::from_value(json!({
            "instructions": {"fields": [{"id": "BAUJAHR"}, {"id": "ADRESSE"}, {"id": "DAEMMUNG"}]},
            "values": {"BAUJAHR": "1965", "ADRESSE": "  ", "DAEMMUNG": "Mineralwolle"}
        }))
        .unwrap();
        assert_eq!(
            form_metrics(&form),
            FormMetrics {
                total_fields: 3,
                filled_fields: 2,
                completion_rate: 67
            }
        );
    }

    #[test]
    fn form_without_fields_has_zero_rate() {
        let form: FormSubmission = serde_json::from_value(json!({"values": {"x": "y"}})).unwrap();
        assert_eq!(form_metrics(&form).completion_rate, 0);
    }

    #[test]
    fn dialog_metrics_count_history() {
        let dialog: DialogSubmission = serde_json::from_value(json!({
            "questions": [
                {"question": "Q1", "field": "F1"},
                {"question": "Q2", "field": "F2"}
            ],
            "answers": {"frage_1": "Südseite", "frage_2": ""},
            "chat_history": [
                {"role": "user", "content": "Südseite"},
                {"role": "assistant", "content": "Danke"},
                {"role": "user", "content": ""}
            ]
        }))
        .unwrap();
        assert_eq!(
            dialog_metrics(&dialog),
            DialogMetrics {
                total_questions: 2,
                answered_questions: 1,
                completion_rate: 50,
                chat_interactions: 3
            }
        );
    }
}
