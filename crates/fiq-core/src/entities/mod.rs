//! Request and record types for the study API.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema`. Field
//! names follow what the study front end sends: questionnaire submissions and
//! whole-study saves are camelCase, everything else snake_case.

mod form;
mod session;
mod study;
mod submission;

pub use form::{ChatMessage, DialogQuestion, DialogSubmission, FormField, FormInstructions, FormSubmission};
pub use session::{QuestionnaireSession, SectionTiming};
pub use study::{
    Demographics, PreferenceVotes, StudyCompletion, StudyMetadata, StudySave, VariantOutcome,
    VariantResults,
};
pub use submission::QuestionnaireSubmission;
