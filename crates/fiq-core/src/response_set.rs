//! Response sets: question key to submitted value.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ScoreError;

/// Lowest valid Likert rating.
pub const LIKERT_MIN: u8 = 1;

/// Highest valid Likert rating.
pub const LIKERT_MAX: u8 = 5;

/// A single submitted answer: a numeric rating or free text.
///
/// `0` and `null` are the front end's placeholders for "not yet answered", so
/// they count as unanswered just like blank text. Anything else the client
/// sends (fractions, booleans, nested JSON) is kept verbatim in `Other` so a
/// malformed rating never costs the rest of the submission; scoring reports
/// it as an invalid value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ResponseValue {
    Null,
    Number(i64),
    Text(String),
    Other(Value),
}

impl ResponseValue {
    /// Non-zero number, text that is non-empty after trimming, or any other
    /// non-null value.
    #[must_use]
    pub fn is_answered(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Number(n) => *n != 0,
            Self::Text(text) => !text.trim().is_empty(),
            Self::Other(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            Self::Other(value) => !value.is_null(),
        }
    }

    #[must_use]
    pub const fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Render for logs and direct-comparison summaries.
    #[must_use]
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Number(n) => n.to_string(),
            Self::Text(text) => text.trim().to_string(),
            Self::Other(value) => value.to_string(),
        }
    }
}

impl From<i64> for ResponseValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<u8> for ResponseValue {
    fn from(value: u8) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<&str> for ResponseValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ResponseValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Answers for one questionnaire instance, keyed by question id.
///
/// Backed by a `BTreeMap` so serialized records have a stable key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ResponseSet(BTreeMap<String, ResponseValue>);

impl ResponseSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ResponseValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace an answer, returning the previous one.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ResponseValue>,
    ) -> Option<ResponseValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<ResponseValue> {
        self.0.remove(key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ResponseValue> {
        self.0.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResponseValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Whether `key` holds an answered value.
    #[must_use]
    pub fn is_answered(&self, key: &str) -> bool {
        self.0.get(key).is_some_and(ResponseValue::is_answered)
    }

    /// Count how many of `keys` are answered.
    pub fn answered_count<'a>(&self, keys: impl IntoIterator<Item = &'a str>) -> usize {
        keys.into_iter().filter(|key| self.is_answered(key)).count()
    }

    /// Read `key` as a Likert rating.
    ///
    /// Returns `Ok(None)` when the key is missing, zero, or blank text.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::InvalidValue`] when the value is a number outside
    /// 1-5, a fraction, a boolean, or non-numeric text.
    pub fn likert(&self, key: &str) -> Result<Option<u8>, ScoreError> {
        let Some(value) = self.0.get(key) else {
            return Ok(None);
        };
        if !value.is_answered() {
            return Ok(None);
        }
        let parsed = match value {
            ResponseValue::Number(n) => Some(*n),
            // Some older front-end builds post ratings as strings.
            ResponseValue::Text(text) => text.trim().parse::<i64>().ok(),
            ResponseValue::Null | ResponseValue::Other(_) => None,
        };
        match parsed.and_then(|n| u8::try_from(n).ok()) {
            Some(rating) if (LIKERT_MIN..=LIKERT_MAX).contains(&rating) => Ok(Some(rating)),
            _ => Err(ScoreError::InvalidValue {
                key: key.to_string(),
                value: value.to_display_string(),
            }),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ResponseSet
where
    K: Into<String>,
    V: Into<ResponseValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_blank_are_unanswered() {
        let set = ResponseSet::new()
            .with("a", 0_i64)
            .with("b", "   ")
            .with("c", 3_i64)
            .with("d", "Südseite");
        assert!(!set.is_answered("a"));
        assert!(!set.is_answered("b"));
        assert!(set.is_answered("c"));
        assert!(set.is_answered("d"));
        assert!(!set.is_answered("missing"));
        assert_eq!(set.answered_count(["a", "b", "c", "d"]), 2);
    }

    #[test]
    fn likert_reads_valid_ratings() {
        let set = ResponseSet::new().with("q", 4_i64).with("s", "2");
        assert_eq!(set.likert("q"), Ok(Some(4)));
        assert_eq!(set.likert("s"), Ok(Some(2)));
        assert_eq!(set.likert("absent"), Ok(None));
    }

    #[test]
    fn likert_rejects_out_of_range() {
        let set = ResponseSet::new()
            .with("high", 6_i64)
            .with("neg", -1_i64)
            .with("word", "sehr gut");
        assert!(matches!(set.likert("high"), Err(ScoreError::InvalidValue { .. })));
        assert!(matches!(set.likert("neg"), Err(ScoreError::InvalidValue { .. })));
        assert!(matches!(set.likert("word"), Err(ScoreError::InvalidValue { .. })));
    }

    #[test]
    fn odd_json_values_parse_and_fail_only_when_scored() {
        let set: ResponseSet = serde_json::from_str(
            r#"{"half": 3.5, "gone": null, "flag": true, "zero": 0.0, "ok": 4}"#,
        )
        .unwrap();
        assert_eq!(set.get("gone"), Some(&ResponseValue::Null));
        assert!(!set.is_answered("gone"));
        assert!(!set.is_answered("zero"));
        assert!(set.is_answered("half"));
        assert_eq!(set.likert("gone"), Ok(None));
        assert_eq!(set.likert("ok"), Ok(Some(4)));
        assert_eq!(
            set.likert("half"),
            Err(ScoreError::InvalidValue {
                key: "half".into(),
                value: "3.5".into()
            })
        );
        assert!(matches!(set.likert("flag"), Err(ScoreError::InvalidValue { .. })));
    }

    #[test]
    fn null_round_trips_as_null() {
        let set: ResponseSet = serde_json::from_str(r#"{"sus_4": null}"#).unwrap();
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"{"sus_4":null}"#);
    }

    #[test]
    fn deserializes_mixed_json_object() {
        let set: ResponseSet =
            serde_json::from_str(r#"{"sus_1": 5, "preference_reasoning": "schneller"}"#).unwrap();
        assert_eq!(set.get("sus_1"), Some(&ResponseValue::Number(5)));
        assert_eq!(
            set.get("preference_reasoning").and_then(ResponseValue::as_text),
            Some("schneller")
        );
    }
}
