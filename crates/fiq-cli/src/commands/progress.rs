use fiq_core::ResponseSet;
use fiq_core::catalogue::SectionDefinition;
use fiq_core::enums::SectionStatus;
use fiq_core::progress::{Progress, SectionTracker};
use serde::Serialize;

use crate::cli::{GlobalFlags, ProgressArgs};
use crate::input::load_responses;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct ProgressReport {
    pub section: String,
    pub status: SectionStatus,
    #[serde(flatten)]
    pub progress: Progress,
    pub can_advance: bool,
    /// Required keys still unanswered.
    pub missing: Vec<String>,
}

/// Handle `fiq progress <section> <file>`.
pub fn handle(args: &ProgressArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let responses = load_responses(&args.input.file, &args.section)?;
    output(&report(&args.section, &responses)?, flags.format)
}

pub fn report(section: &str, responses: &ResponseSet) -> anyhow::Result<ProgressReport> {
    let Some(definition) = SectionDefinition::standard(section) else {
        anyhow::bail!("unknown section '{section}' (expected sus, trust, or preference)");
    };
    let missing = definition
        .required
        .iter()
        .filter(|key| !responses.is_answered(key))
        .cloned()
        .collect();

    let mut tracker = SectionTracker::new(definition);
    let status = tracker.observe(responses);
    Ok(ProgressReport {
        section: tracker.name().to_string(),
        status,
        progress: tracker.progress(responses),
        can_advance: tracker.can_advance(responses),
        missing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fiq_core::catalogue::TRUST_KEYS;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_trust_is_in_progress() {
        let responses = ResponseSet::new()
            .with(TRUST_KEYS[0], 4_u8)
            .with(TRUST_KEYS[1], 5_u8);
        let report = report("trust", &responses).unwrap();
        assert_eq!(report.status, SectionStatus::InProgress);
        assert_eq!(report.progress.answered, 2);
        assert_eq!(report.progress.percentage, 40);
        assert!(!report.can_advance);
        assert_eq!(report.missing, TRUST_KEYS[2..].to_vec());
    }

    #[test]
    fn full_trust_can_advance() {
        let responses: ResponseSet = TRUST_KEYS.iter().map(|k| (*k, 3_u8)).collect();
        let report = report("trust", &responses).unwrap();
        assert_eq!(report.status, SectionStatus::Complete);
        assert!(report.can_advance);
        assert!(report.missing.is_empty());
    }

    #[test]
    fn empty_file_is_not_started() {
        let report = report("sus", &ResponseSet::new()).unwrap();
        assert_eq!(report.status, SectionStatus::NotStarted);
        assert_eq!(report.progress.percentage, 0);
    }

    #[test]
    fn unknown_section_fails() {
        assert!(report("demographics", &ResponseSet::new()).is_err());
    }
}
