//! The fixed questionnaire catalogue: question keys, section definitions and
//! the Variant A form.

use crate::entities::{FormField, FormInstructions};

/// SUS items in questionnaire order. Odd positions are positively phrased.
pub const SUS_KEYS: [&str; 10] = [
    "sus_1", "sus_2", "sus_3", "sus_4", "sus_5", "sus_6", "sus_7", "sus_8", "sus_9", "sus_10",
];

/// Trust items, each a 1-5 rating.
pub const TRUST_KEYS: [&str; 5] = [
    "trust_reliability",
    "trust_accuracy",
    "trust_recommendations",
    "trust_data_handling",
    "trust_decision_support",
];

/// Direct A-vs-B comparison choices (free text such as `A`, `B`, `equal`).
pub const PREFERENCE_CHOICE_KEYS: [&str; 4] = [
    "speed_preference",
    "ease_preference",
    "help_preference",
    "control_feeling",
];

/// Likert ratings in the comparison questionnaire.
pub const PREFERENCE_RATING_KEYS: [&str; 5] = [
    "overall_preference",
    "future_usage_a",
    "future_usage_b",
    "recommendation_a",
    "recommendation_b",
];

/// Free-text and context fields that never block navigation.
pub const PREFERENCE_OPTIONAL_KEYS: [&str; 3] = [
    "preference_reasoning",
    "simple_forms_preference",
    "complex_forms_preference",
];

/// Rating key that drives [`crate::enums::PreferenceDirection`].
pub const OVERALL_PREFERENCE_KEY: &str = "overall_preference";

pub const SUS_SECTION: &str = "sus";
pub const TRUST_SECTION: &str = "trust";
pub const PREFERENCE_SECTION: &str = "preference";

/// The expected keys of one questionnaire section.
///
/// Only `required` keys gate navigation; `optional` keys still count as
/// activity when deciding whether a section has been started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionDefinition {
    pub name: String,
    pub required: Vec<String>,
    pub optional: Vec<String>,
}

impl SectionDefinition {
    /// Create a section with the given required keys and no optional keys.
    pub fn new<I, S>(name: impl Into<String>, required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            required: required.into_iter().map(Into::into).collect(),
            optional: Vec::new(),
        }
    }

    /// Add optional keys.
    #[must_use]
    pub fn with_optional<I, S>(mut self, optional: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.optional.extend(optional.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn sus() -> Self {
        Self::new(SUS_SECTION, SUS_KEYS)
    }

    #[must_use]
    pub fn trust() -> Self {
        Self::new(TRUST_SECTION, TRUST_KEYS)
    }

    #[must_use]
    pub fn preference() -> Self {
        Self::new(
            PREFERENCE_SECTION,
            PREFERENCE_CHOICE_KEYS
                .iter()
                .chain(PREFERENCE_RATING_KEYS.iter())
                .copied(),
        )
        .with_optional(PREFERENCE_OPTIONAL_KEYS)
    }

    /// Look up one of the built-in sections by name.
    #[must_use]
    pub fn standard(name: &str) -> Option<Self> {
        match name {
            SUS_SECTION => Some(Self::sus()),
            TRUST_SECTION => Some(Self::trust()),
            PREFERENCE_SECTION => Some(Self::preference()),
            _ => None,
        }
    }

    /// Every key of the section, required first.
    pub fn all_keys(&self) -> impl Iterator<Item = &str> {
        self.required
            .iter()
            .chain(self.optional.iter())
            .map(String::as_str)
    }

    #[must_use]
    pub fn is_required(&self, key: &str) -> bool {
        self.required.iter().any(|k| k == key)
    }
}

/// The sections a variant questionnaire walks through, in order.
#[must_use]
pub fn variant_sections() -> Vec<SectionDefinition> {
    vec![SectionDefinition::trust(), SectionDefinition::sus()]
}

// ---------------------------------------------------------------------------
// Variant A form
// ---------------------------------------------------------------------------

fn form_field(
    id: &str,
    label: &str,
    field_type: &str,
    options: &[&str],
    difficulty: &str,
    hint: &str,
    placeholder: &str,
) -> FormField {
    FormField {
        id: id.to_string(),
        label: label.to_string(),
        field_type: field_type.to_string(),
        options: options.iter().map(ToString::to_string).collect(),
        required: true,
        difficulty: Some(difficulty.to_string()),
        placeholder: Some(placeholder.to_string()),
        hint: Some(hint.to_string()),
    }
}

/// The fields the Variant A form renders, in display order.
#[must_use]
pub fn form_fields() -> Vec<FormField> {
    vec![
        form_field(
            "apartment_designation",
            "WOHNUNGSBEZEICHNUNG",
            "select",
            &["EG Links", "EG Rechts", "OG Links", "OG Rechts", "DG Links", "DG Rechts"],
            "easy",
            "Wählen Sie die Lage der betroffenen Wohnung im Gebäude. Das Hochparterre entspricht dem EG.",
            "Bitte wählen Sie die Wohnungslage",
        ),
        form_field(
            "energy_source",
            "ENERGIETRÄGER DER HEIZANLAGE",
            "select",
            &["Heizöl", "Erdgas", "Fernwärme", "Pellets", "Wärmepumpe", "Sonstiges"],
            "medium",
            "Geben Sie an, womit das Gebäude aktuell beheizt wird. Bei Baujahr 1965 ist oft eine Ölheizung vorhanden.",
            "Art der aktuellen Heizung",
        ),
        form_field(
            "facade_orientation",
            "HIMMELSRICHTUNG DER HAUPTFASSADE",
            "select",
            &[
                "Norden", "Nordosten", "Osten", "Südosten", "Süden", "Südwesten", "Westen",
                "Nordwesten",
            ],
            "easy",
            "Bestimmen Sie die Himmelsrichtung der Eingangsfassade (Straßenseite). Dies beeinflusst die Dämmstoffwahl.",
            "Richtung der Eingangsfassade",
        ),
        form_field(
            "u_value_current",
            "AKTUELLER U-WERT DER FASSADE (W/m²·K)",
            "number",
            &[],
            "hard",
            "Der U-Wert gibt den Wärmeverlust durch die Fassade an. Bei ungedämmten Gebäuden von 1965 liegt er typisch bei 1,7 W/m²·K. Nach der Sanierung sollte er unter 0,24 W/m²·K liegen.",
            "z.B. 1.7",
        ),
    ]
}

/// [`form_fields`] plus one instruction line per field, taken from its hint.
#[must_use]
pub fn form_instructions() -> FormInstructions {
    let fields = form_fields();
    let instructions = fields.iter().filter_map(|f| f.hint.clone()).collect();
    FormInstructions {
        instructions,
        fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_sections_resolve() {
        assert_eq!(SectionDefinition::standard("sus").unwrap().required.len(), 10);
        assert_eq!(SectionDefinition::standard("trust").unwrap().required.len(), 5);
        assert!(SectionDefinition::standard("demographics").is_none());
    }

    #[test]
    fn preference_optional_keys_are_not_required() {
        let section = SectionDefinition::preference();
        assert_eq!(section.required.len(), 9);
        assert!(!section.is_required("preference_reasoning"));
        assert!(section.is_required("overall_preference"));
        assert_eq!(section.all_keys().count(), 12);
    }

    #[test]
    fn form_catalogue_has_one_instruction_per_field() {
        let form = form_instructions();
        let ids: Vec<&str> = form.fields.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(
            ids,
            ["apartment_designation", "energy_source", "facade_orientation", "u_value_current"]
        );
        assert_eq!(form.instructions.len(), form.fields.len());
        assert!(form.fields.iter().all(|f| f.required));
        assert_eq!(form.fields[2].options.len(), 8);
        assert!(form.fields[3].options.is_empty());
        assert_eq!(form.fields[3].field_type, "number");
    }
}
