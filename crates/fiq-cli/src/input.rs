//! Reading response files.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use fiq_core::ResponseSet;
use serde_json::Value;

/// Read a JSON document from `path`, or stdin for `-`.
pub fn read_json(path: &Path) -> anyhow::Result<Value> {
    let raw = if path.as_os_str() == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("failed to read stdin")?;
        raw
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };
    serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// The response set for `section` inside `document`.
///
/// A full questionnaire submission carries one set per section under
/// `<section>Responses`; anything else is taken as a bare response set.
pub fn responses_for(document: Value, section: &str) -> anyhow::Result<ResponseSet> {
    let field = format!("{section}Responses");
    let set = match document {
        Value::Object(mut map) if map.contains_key(&field) => map.remove(&field).unwrap_or_default(),
        other => other,
    };
    serde_json::from_value(set)
        .with_context(|| format!("expected a {section} response set of numbers or strings"))
}

/// [`read_json`] followed by [`responses_for`].
pub fn load_responses(path: &Path, section: &str) -> anyhow::Result<ResponseSet> {
    responses_for(read_json(path)?, section)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn bare_set_is_used_as_is() {
        let set = responses_for(json!({"sus_1": 4, "sus_2": 2}), "sus").unwrap();
        assert_eq!(set, ResponseSet::new().with("sus_1", 4_i64).with("sus_2", 2_i64));
    }

    #[test]
    fn submission_field_is_extracted() {
        let doc = json!({
            "variant": "A",
            "susResponses": {"sus_1": 5},
            "trustResponses": {"trust_accuracy": 3}
        });
        let set = responses_for(doc, "trust").unwrap();
        assert_eq!(set, ResponseSet::new().with("trust_accuracy", 3_i64));
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(responses_for(json!([1, 2, 3]), "sus").is_err());
    }

    #[test]
    fn reads_files_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("responses.json");
        std::fs::write(&path, r#"{"overall_preference": 4}"#).unwrap();
        let set = load_responses(&path, "preference").unwrap();
        assert!(set.is_answered("overall_preference"));
    }
}
