//! Variants, section statuses, score buckets, and storage methods.
//!
//! Status enums with state machines provide `allowed_next_states()` to enforce
//! valid transitions at the application layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Variant
// ---------------------------------------------------------------------------

/// The UX treatment a questionnaire refers to.
///
/// `A` is the visible form with chat help, `B` the conversational dialog, and
/// `comparison` the post-hoc questionnaire comparing both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Variant {
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "comparison")]
    Comparison,
}

impl Variant {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::Comparison => "comparison",
        }
    }

    /// Human-readable label used in study records.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "Sichtbares Formular",
            Self::B => "Dialog-System",
            Self::Comparison => "Vergleich",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" | "variant_a" => Ok(Self::A),
            "B" | "b" | "variant_b" => Ok(Self::B),
            "comparison" => Ok(Self::Comparison),
            other => Err(CoreError::Validation(format!("unknown variant '{other}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// SectionStatus
// ---------------------------------------------------------------------------

/// Completion status of one questionnaire section.
///
/// ```text
/// not_started → in_progress → complete
/// ```
///
/// `complete` is terminal. Editing answers afterwards never reverts it; only
/// an explicit reset returns a section to `not_started`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SectionStatus {
    NotStarted,
    InProgress,
    Complete,
}

impl SectionStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::NotStarted => &[Self::InProgress],
            Self::InProgress => &[Self::Complete],
            Self::Complete => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for SectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TrustLevel
// ---------------------------------------------------------------------------

/// Qualitative bucket for an average trust rating.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TrustLevel {
    Low,
    Medium,
    High,
}

impl TrustLevel {
    /// Classify a mean rating: `>= 4` is high, `>= 3` medium, anything else low.
    #[must_use]
    pub fn from_mean(mean: f64) -> Self {
        if mean >= 4.0 {
            Self::High
        } else if mean >= 3.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for TrustLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PreferenceDirection
// ---------------------------------------------------------------------------

/// Which variant the participant leaned towards on the overall rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceDirection {
    #[serde(alias = "prefers_A")]
    PrefersA,
    #[serde(alias = "prefers_B")]
    PrefersB,
    Neutral,
}

impl PreferenceDirection {
    /// Map the 1-5 `overall_preference` rating: `>= 4` leans A, `<= 2` leans B.
    #[must_use]
    pub const fn from_rating(rating: u8) -> Self {
        if rating >= 4 {
            Self::PrefersA
        } else if rating <= 2 {
            Self::PrefersB
        } else {
            Self::Neutral
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PrefersA => "prefers_a",
            Self::PrefersB => "prefers_b",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for PreferenceDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// StorageMethod
// ---------------------------------------------------------------------------

/// Where an archived record ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StorageMethod {
    /// Written to the configured object store.
    ObjectStore,
    /// Primary store unavailable; the record was logged and returned for download.
    LogFallback,
    /// Serialization or logging failed too; only the embedded backup remains.
    EmergencyBackup,
}

impl StorageMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ObjectStore => "object_store",
            Self::LogFallback => "log_fallback",
            Self::EmergencyBackup => "emergency_backup",
        }
    }

    /// Whether the record reached durable storage.
    #[must_use]
    pub const fn is_durable(self) -> bool {
        matches!(self, Self::ObjectStore)
    }
}

impl fmt::Display for StorageMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DialogStatus
// ---------------------------------------------------------------------------

/// Status of a Variant B dialog.
///
/// ```text
/// asking → completed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DialogStatus {
    Asking,
    Completed,
}

impl DialogStatus {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Asking => &[Self::Completed],
            Self::Completed => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asking => "asking",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for DialogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MessageIntent
// ---------------------------------------------------------------------------

/// How a dialog message was interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MessageIntent {
    /// A question about the current main question; the dialog stays put.
    FollowUp,
    /// An answer to the current main question; the dialog advances.
    Answer,
    /// Neither; the participant is asked to clarify.
    Unclear,
}

impl MessageIntent {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FollowUp => "follow_up",
            Self::Answer => "answer",
            Self::Unclear => "unclear",
        }
    }
}

impl fmt::Display for MessageIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ChatRole
// ---------------------------------------------------------------------------

/// Author of a chat or dialog message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    #[serde(alias = "bot")]
    Assistant,
}
