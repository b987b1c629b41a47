//! Cross-cutting error types for FormularIQ.
//!
//! Scoring failures are local validation problems: callers surface them as an
//! undefined score plus a field-level message, never as a fatal error.
//! Upstream failures (storage, remote backend) are defined in their
//! respective crates and converted to degraded-success responses at the
//! HTTP boundary.

use thiserror::Error;

/// Why a score could not be computed from a response set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// One or more required question keys are missing, zero, or blank.
    #[error("Incomplete responses: missing {}", missing.join(", "))]
    Incomplete { missing: Vec<String> },

    /// A rating lies outside the 1-5 Likert range or is not a number.
    #[error("Invalid value for '{key}': {value} (expected a rating from 1 to 5)")]
    InvalidValue { key: String, value: String },
}

impl ScoreError {
    /// Question keys this error refers to, for field-level messages.
    #[must_use]
    pub fn fields(&self) -> Vec<String> {
        match self {
            Self::Incomplete { missing } => missing.clone(),
            Self::InvalidValue { key, .. } => vec![key.clone()],
        }
    }
}

/// Errors raised by the session and progress model.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A section state transition was attempted that is not allowed.
    #[error("Invalid state transition: section {section} from {from} to {to}")]
    InvalidTransition {
        section: String,
        from: String,
        to: String,
    },

    /// Navigation was attempted before every required answer was given.
    #[error("Section '{section}' is incomplete: {answered}/{total} required answers")]
    SectionIncomplete {
        section: String,
        answered: usize,
        total: usize,
    },

    /// A section name that the tracker or session does not know.
    #[error("Unknown section: {0}")]
    UnknownSection(String),

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operating system random source failed.
    #[error("Failed to generate identifier: {0}")]
    Entropy(String),

    #[error(transparent)]
    Score(#[from] ScoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_lists_missing_keys() {
        let err = ScoreError::Incomplete {
            missing: vec!["sus_2".into(), "sus_7".into()],
        };
        assert_eq!(err.to_string(), "Incomplete responses: missing sus_2, sus_7");
        assert_eq!(err.fields(), vec!["sus_2".to_string(), "sus_7".to_string()]);
    }

    #[test]
    fn invalid_value_names_the_field() {
        let err = ScoreError::InvalidValue {
            key: "trust_accuracy".into(),
            value: "9".into(),
        };
        assert_eq!(err.fields(), vec!["trust_accuracy".to_string()]);
        assert!(err.to_string().contains("trust_accuracy"));
    }
}
