//! # fiq-core
//!
//! Core types, scoring, and error types for the FormularIQ usability study.
//!
//! This crate provides the foundational types shared across all FormularIQ crates:
//! - Response sets (question key -> Likert rating or free text)
//! - The fixed questionnaire catalogue (SUS, trust, preference sections)
//! - SUS, trust and preference scoring
//! - Section progress tracking with a per-section state machine
//! - The Variant B dialog flow
//! - Submission analytics and API response types
//!
//! Nothing in this crate performs I/O. Every scoring function is a pure
//! function of its input, so a score is always recomputed from the responses
//! it summarizes.

pub mod analytics;
pub mod catalogue;
pub mod dialog;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod progress;
pub mod response_set;
pub mod responses;
pub mod scoring;

pub use errors::{CoreError, ScoreError};
pub use response_set::{ResponseSet, ResponseValue};
