//! Completion tracking and section gating.
//!
//! [`Progress`] is a pure count of answered required keys. [`SectionTracker`]
//! layers the `not_started → in_progress → complete` state machine on top,
//! and [`SessionTracker`] walks an ordered list of sections, refusing to
//! advance past one whose required answers are incomplete.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::catalogue::SectionDefinition;
use crate::enums::SectionStatus;
use crate::errors::CoreError;
use crate::response_set::ResponseSet;

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Answered vs. required keys for one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
    /// `round(answered / total * 100)`, or 100 for a section with no
    /// required keys.
    pub percentage: u8,
}

impl Progress {
    /// Count the required keys of `section` answered in `responses`.
    #[must_use]
    pub fn of(section: &SectionDefinition, responses: &ResponseSet) -> Self {
        let answered = responses.answered_count(section.required.iter().map(String::as_str));
        let total = section.required.len();
        Self {
            answered,
            total,
            percentage: percent(answered, total).unwrap_or(100),
        }
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.answered >= self.total
    }
}

/// `round(part / whole * 100)`, clamped to 100. `None` when `whole` is zero.
#[must_use]
pub fn percent(part: usize, whole: usize) -> Option<u8> {
    if whole == 0 {
        return None;
    }
    let ratio = (part.min(whole) * 100 + whole / 2) / whole;
    u8::try_from(ratio).ok()
}

// ---------------------------------------------------------------------------
// SectionTracker
// ---------------------------------------------------------------------------

/// Status of one section as answers come in.
#[derive(Debug, Clone)]
pub struct SectionTracker {
    definition: SectionDefinition,
    status: SectionStatus,
    completions: u32,
}

impl SectionTracker {
    #[must_use]
    pub const fn new(definition: SectionDefinition) -> Self {
        Self {
            definition,
            status: SectionStatus::NotStarted,
            completions: 0,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    #[must_use]
    pub const fn definition(&self) -> &SectionDefinition {
        &self.definition
    }

    #[must_use]
    pub const fn status(&self) -> SectionStatus {
        self.status
    }

    /// How many times this section has entered `complete`.
    #[must_use]
    pub const fn completions(&self) -> u32 {
        self.completions
    }

    /// Feed the current answers and return the resulting status.
    ///
    /// Any answered key of the section, optional ones included, starts it.
    /// Once `complete`, the status stays put regardless of later edits.
    pub fn observe(&mut self, responses: &ResponseSet) -> SectionStatus {
        if self.status == SectionStatus::Complete {
            return self.status;
        }

        if self.status == SectionStatus::NotStarted
            && self.definition.all_keys().any(|key| responses.is_answered(key))
        {
            self.step(SectionStatus::InProgress);
        }

        if self.status == SectionStatus::InProgress
            && Progress::of(&self.definition, responses).is_complete()
        {
            self.step(SectionStatus::Complete);
            self.completions += 1;
        }

        self.status
    }

    /// Whether every required key is answered right now.
    ///
    /// Gating looks at the live answers, not the sticky status: a completed
    /// section whose answers were cleared cannot be left until refilled.
    #[must_use]
    pub fn can_advance(&self, responses: &ResponseSet) -> bool {
        Progress::of(&self.definition, responses).is_complete()
    }

    #[must_use]
    pub fn progress(&self, responses: &ResponseSet) -> Progress {
        Progress::of(&self.definition, responses)
    }

    /// Return to `not_started`. The completion count is kept.
    pub const fn reset(&mut self) {
        self.status = SectionStatus::NotStarted;
    }

    fn step(&mut self, next: SectionStatus) {
        debug_assert!(
            self.status.can_transition_to(next),
            "{} -> {next} is not a valid section transition",
            self.status
        );
        self.status = next;
    }
}

// ---------------------------------------------------------------------------
// SessionTracker
// ---------------------------------------------------------------------------

/// Walks an ordered list of sections.
///
/// Moving forward requires the current section to be answerable in full;
/// moving back to any section already reached is always allowed.
#[derive(Debug, Clone)]
pub struct SessionTracker {
    sections: Vec<SectionTracker>,
    current: usize,
    furthest: usize,
}

impl SessionTracker {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if `sections` is empty.
    pub fn new(sections: Vec<SectionDefinition>) -> Result<Self, CoreError> {
        if sections.is_empty() {
            return Err(CoreError::Validation(
                "a session needs at least one section".into(),
            ));
        }
        Ok(Self {
            sections: sections.into_iter().map(SectionTracker::new).collect(),
            current: 0,
            furthest: 0,
        })
    }

    #[must_use]
    pub fn current(&self) -> &SectionTracker {
        &self.sections[self.current]
    }

    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn section(&self, name: &str) -> Option<&SectionTracker> {
        self.sections.iter().find(|s| s.name() == name)
    }

    /// Feed answers for the current section.
    pub fn observe(&mut self, responses: &ResponseSet) -> SectionStatus {
        self.sections[self.current].observe(responses)
    }

    /// Leave the current section.
    ///
    /// Returns the name of the section now current, or `None` when the last
    /// section was just finished (the position does not change then).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::SectionIncomplete`] if a required key of the
    /// current section is unanswered.
    pub fn advance(&mut self, responses: &ResponseSet) -> Result<Option<&str>, CoreError> {
        let section = &mut self.sections[self.current];
        section.observe(responses);
        let progress = section.progress(responses);
        if !progress.is_complete() {
            return Err(CoreError::SectionIncomplete {
                section: section.name().to_string(),
                answered: progress.answered,
                total: progress.total,
            });
        }

        if self.current + 1 == self.sections.len() {
            return Ok(None);
        }
        self.current += 1;
        self.furthest = self.furthest.max(self.current);
        Ok(Some(self.sections[self.current].name()))
    }

    /// Jump back to a section already reached.
    ///
    /// # Errors
    ///
    /// - [`CoreError::UnknownSection`] if no section has that name.
    /// - [`CoreError::InvalidTransition`] if the section lies beyond the
    ///   furthest one reached.
    pub fn revisit(&mut self, name: &str) -> Result<(), CoreError> {
        let index = self.index_of(name)?;
        if index > self.furthest {
            return Err(CoreError::InvalidTransition {
                section: name.to_string(),
                from: self.current().name().to_string(),
                to: name.to_string(),
            });
        }
        self.current = index;
        Ok(())
    }

    /// Reset one section to `not_started`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownSection`] if no section has that name.
    pub fn reset_section(&mut self, name: &str) -> Result<(), CoreError> {
        let index = self.index_of(name)?;
        self.sections[index].reset();
        Ok(())
    }

    /// Every section with its status, in order.
    #[must_use]
    pub fn statuses(&self) -> Vec<(&str, SectionStatus)> {
        self.sections.iter().map(|s| (s.name(), s.status())).collect()
    }

    /// Names of sections currently `complete`, in order.
    #[must_use]
    pub fn completed_sections(&self) -> Vec<String> {
        self.sections
            .iter()
            .filter(|s| s.status() == SectionStatus::Complete)
            .map(|s| s.name().to_string())
            .collect()
    }

    fn index_of(&self, name: &str) -> Result<usize, CoreError> {
        self.sections
            .iter()
            .position(|s| s.name() == name)
            .ok_or_else(|| CoreError::UnknownSection(name.to_string()))
    }
}
