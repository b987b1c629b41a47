//! Variant B dialog flow.
//!
//! A dialog walks a fixed list of main questions. Each participant message is
//! classified as a follow-up question (stay on the current question), an
//! answer (record it and move on), or unclear (ask again). Reply text is
//! produced elsewhere; this module only tracks where the dialog stands.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{ChatMessage, DialogQuestion};
use crate::enums::{DialogStatus, MessageIntent};
use crate::errors::CoreError;
use crate::progress::percent;
use crate::response_set::ResponseSet;

/// Scenario every participant is given.
pub const SCENARIO_CONTEXT: &str =
    "Mehrfamilienhaus Baujahr 1965, WDVS-Sanierung Eingangsfassade Südseite, 140mm Mineralwolle";

/// Substrings that mark a message as a question about the current question.
pub const FOLLOW_UP_INDICATORS: &[&str] = &[
    "?",
    "warum",
    "wie",
    "was",
    "welche",
    "wo",
    "wann",
    "wer",
    "können sie",
    "erkläre",
    "erklären",
    "bedeutet",
    "heißt",
    "beispiel",
    "genauer",
    "detail",
    "mehr",
    "weitere",
    "verstehe nicht",
    "unklar",
    "unsicher",
];

/// Substrings that mark a message as an answer or a request to move on.
pub const PROGRESS_INDICATORS: &[&str] = &[
    "weiter",
    "nächste",
    "fortfahren",
    "fertig",
    "ok",
    "verstanden",
    "passt",
    "stimmt",
    "richtig",
    "ja",
    "genau",
    "klar",
];

/// Messages shorter than this (in characters, after trimming) count as
/// progress regardless of content.
pub const SHORT_MESSAGE_CHARS: usize = 10;

#[must_use]
pub fn is_follow_up(message: &str) -> bool {
    let lower = message.to_lowercase();
    FOLLOW_UP_INDICATORS
        .iter()
        .any(|indicator| lower.contains(indicator))
}

#[must_use]
pub fn is_progress(message: &str) -> bool {
    let lower = message.trim().to_lowercase();
    if lower.chars().count() < SHORT_MESSAGE_CHARS {
        return true;
    }
    PROGRESS_INDICATORS
        .iter()
        .any(|indicator| lower.contains(indicator))
}

/// Follow-up wins only when the message is not also a progress signal.
#[must_use]
pub fn classify(message: &str) -> MessageIntent {
    if is_follow_up(message) && !is_progress(message) {
        MessageIntent::FollowUp
    } else if is_progress(message) {
        MessageIntent::Answer
    } else {
        MessageIntent::Unclear
    }
}

/// The main questions of the building-energy consultation.
#[must_use]
pub fn standard_dialog_questions() -> Vec<DialogQuestion> {
    let question = |id: &str, text: &str, field: &str, field_type: &str, difficulty: &str| {
        DialogQuestion {
            id: id.to_string(),
            question: text.to_string(),
            field: field.to_string(),
            field_type: field_type.to_string(),
            difficulty: Some(difficulty.to_string()),
            required: true,
        }
    };
    vec![
        question(
            "building_year",
            "In welchem Jahr wurde Ihr Gebäude erbaut?",
            "BAUJAHR",
            "number",
            "easy",
        ),
        question(
            "total_units",
            "Wie viele Wohneinheiten befinden sich in Ihrem Gebäude?",
            "ANZAHL_WOHNEINHEITEN",
            "number",
            "easy",
        ),
        question(
            "total_living_space",
            "Wie groß ist die gesamte Wohnfläche Ihres Gebäudes in Quadratmetern?",
            "WOHNFLÄCHE_GESAMT",
            "number",
            "easy",
        ),
        question(
            "building_address",
            "Wie lautet die vollständige Adresse Ihres Gebäudes?",
            "GEBÄUDEADRESSE",
            "text",
            "easy",
        ),
        question(
            "insulation_system",
            "Welches Dämmsystem planen Sie für die Fassadensanierung?",
            "DÄMMSYSTEM",
            "text",
            "easy",
        ),
        question(
            "complex_energy_analysis",
            "Führen Sie eine detaillierte energetische Bewertung durch: Berechnen Sie die \
             U-Werte vor und nach der Sanierung, den erwarteten Primärenergiebedarf, die \
             CO2-Einsparungen und erstellen Sie eine Wirtschaftlichkeitsberechnung mit \
             Amortisationszeit für die geplante WDVS-Maßnahme.",
            "ENERGETISCHE_ANALYSE_DETAIL",
            "textarea",
            "hard",
        ),
    ]
}

/// Answer key for the question at 0-based `index`.
#[must_use]
pub fn answer_key(index: usize) -> String {
    format!("frage_{}", index + 1)
}

/// Where the dialog stands, 1-based for display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DialogProgress {
    pub current: usize,
    pub total: usize,
    pub percentage: u8,
}

/// What one participant message did to the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogTurn {
    pub intent: MessageIntent,
    /// The main question the message was about.
    pub question: DialogQuestion,
    /// Answer key written by this turn, if any.
    pub answered_key: Option<String>,
    /// The question now being asked, `None` once the dialog is complete.
    pub next_question: Option<DialogQuestion>,
    /// The dialog was already complete before this message.
    pub after_completion: bool,
}

impl DialogTurn {
    #[must_use]
    pub const fn advanced(&self) -> bool {
        self.answered_key.is_some()
    }

    /// Context handed to the help assistant for this turn.
    #[must_use]
    pub fn assistant_context(&self, session: &DialogSession) -> String {
        let mut context = format!(
            "SZENARIO: {}\nAKTUELLE FRAGE: {}\nABSICHT: {}",
            session.context(),
            self.question.question,
            self.intent
        );
        if let Some(next) = &self.next_question {
            context.push_str("\nNÄCHSTE FRAGE: ");
            context.push_str(&next.question);
        }
        if self.after_completion || self.next_question.is_none() {
            if let Ok(answers) = serde_json::to_string(session.answers()) {
                context.push_str("\nANTWORTEN: ");
                context.push_str(&answers);
            }
        }
        context
    }
}

/// State of one participant's dialog.
#[derive(Debug, Clone)]
pub struct DialogSession {
    id: String,
    questions: Vec<DialogQuestion>,
    answers: ResponseSet,
    current: usize,
    status: DialogStatus,
    context: String,
    history: Vec<ChatMessage>,
}

impl DialogSession {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if `questions` is empty.
    pub fn new(
        id: impl Into<String>,
        questions: Vec<DialogQuestion>,
        context: impl Into<String>,
    ) -> Result<Self, CoreError> {
        if questions.is_empty() {
            return Err(CoreError::Validation(
                "a dialog needs at least one question".into(),
            ));
        }
        Ok(Self {
            id: id.into(),
            questions,
            answers: ResponseSet::new(),
            current: 0,
            status: DialogStatus::Asking,
            context: context.into(),
            history: Vec::new(),
        })
    }

    /// A dialog over [`standard_dialog_questions`] in the study scenario.
    ///
    /// # Errors
    ///
    /// Never in practice; the standard question list is not empty.
    pub fn standard(id: impl Into<String>) -> Result<Self, CoreError> {
        Self::new(id, standard_dialog_questions(), SCENARIO_CONTEXT)
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn questions(&self) -> &[DialogQuestion] {
        &self.questions
    }

    #[must_use]
    pub const fn answers(&self) -> &ResponseSet {
        &self.answers
    }

    #[must_use]
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }

    #[must_use]
    pub const fn status(&self) -> DialogStatus {
        self.status
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == DialogStatus::Completed
    }

    #[must_use]
    pub fn current_question(&self) -> &DialogQuestion {
        &self.questions[self.current]
    }

    #[must_use]
    pub fn progress(&self) -> DialogProgress {
        let total = self.questions.len();
        let answered = self.answers.len();
        DialogProgress {
            current: (self.current + 1).min(total),
            total,
            percentage: percent(answered, total).unwrap_or(0),
        }
    }

    /// Apply a participant message.
    ///
    /// Answers are stored under `frage_<n>`. Answering the last question
    /// completes the dialog; messages after that are logged but change
    /// nothing.
    pub fn submit(&mut self, message: &str) -> DialogTurn {
        self.history.push(ChatMessage::user(message));
        let intent = classify(message);
        let question = self.current_question().clone();

        if self.is_complete() {
            return DialogTurn {
                intent,
                question,
                answered_key: None,
                next_question: None,
                after_completion: true,
            };
        }

        let mut answered_key = None;
        if intent == MessageIntent::Answer {
            let key = answer_key(self.current);
            self.answers.insert(key.clone(), message.trim());
            answered_key = Some(key);

            if self.current + 1 < self.questions.len() {
                self.current += 1;
            } else if self.status.can_transition_to(DialogStatus::Completed) {
                self.status = DialogStatus::Completed;
            }
        }

        DialogTurn {
            intent,
            question,
            answered_key,
            next_question: (!self.is_complete()).then(|| self.current_question().clone()),
            after_completion: false,
        }
    }

    /// Record the reply shown to the participant.
    pub fn record_reply(&mut self, reply: impl Into<String>) {
        self.history.push(ChatMessage::assistant(reply));
    }
}
