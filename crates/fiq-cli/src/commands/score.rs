use fiq_core::analytics::FieldIssue;
use fiq_core::catalogue::{PREFERENCE_SECTION, SUS_SECTION, TRUST_SECTION};
use fiq_core::scoring::{analyze_preferences, analyze_trust, sus_score};
use fiq_core::{ResponseSet, ScoreError};
use serde::Serialize;
use serde_json::Value;

use crate::cli::{GlobalFlags, ScoreCommands};
use crate::input::load_responses;
use crate::output::output;

/// Result of scoring one section. A failed score is `null` with an issue.
#[derive(Debug, Serialize)]
pub struct ScoreReport {
    pub section: &'static str,
    pub answered: usize,
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<FieldIssue>,
}

/// Handle `fiq score <section> <file>`.
pub fn handle(action: &ScoreCommands, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (section, arg) = match action {
        ScoreCommands::Sus(arg) => (SUS_SECTION, arg),
        ScoreCommands::Trust(arg) => (TRUST_SECTION, arg),
        ScoreCommands::Preference(arg) => (PREFERENCE_SECTION, arg),
    };
    let responses = load_responses(&arg.file, section)?;
    output(&score(section, &responses)?, flags.format)
}

/// Score `responses` as `section`.
pub fn score(section: &'static str, responses: &ResponseSet) -> anyhow::Result<ScoreReport> {
    let (result, issue) = match section {
        SUS_SECTION => split(section, sus_score(responses))?,
        TRUST_SECTION => split(section, analyze_trust(responses))?,
        PREFERENCE_SECTION => split(section, analyze_preferences(responses))?,
        other => anyhow::bail!("unknown section '{other}'"),
    };
    Ok(ScoreReport {
        section,
        answered: responses.iter().filter(|(_, v)| v.is_answered()).count(),
        result,
        issue,
    })
}

fn split<T: Serialize>(
    section: &str,
    scored: Result<T, ScoreError>,
) -> anyhow::Result<(Option<Value>, Option<FieldIssue>)> {
    match scored {
        Ok(value) => Ok((Some(serde_json::to_value(value)?), None)),
        Err(error) => Ok((None, Some(FieldIssue::from_score_error(section, &error)))),
    }
}
