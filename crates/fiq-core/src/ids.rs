//! Prefixed identifiers such as `"ses-a3f8b2c1"`.
//!
//! Four random bytes from the OS, rendered as eight lowercase hex digits
//! behind a three-letter prefix.

use crate::errors::CoreError;

pub const PREFIX_SESSION: &str = "ses";
pub const PREFIX_DIALOG: &str = "dlg";
pub const PREFIX_PARTICIPANT: &str = "prt";
pub const PREFIX_ERROR_REPORT: &str = "err";

pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_SESSION,
    PREFIX_DIALOG,
    PREFIX_PARTICIPANT,
    PREFIX_ERROR_REPORT,
];

/// Generate `"{prefix}-xxxxxxxx"`.
///
/// # Errors
///
/// Returns [`CoreError::Entropy`] if the OS random source is unavailable.
pub fn prefixed_id(prefix: &str) -> Result<String, CoreError> {
    let mut bytes = [0_u8; 4];
    getrandom::fill(&mut bytes).map_err(|e| CoreError::Entropy(e.to_string()))?;
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    Ok(format!("{prefix}-{hex}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_have_prefix_and_eight_hex_digits() {
        for prefix in ALL_PREFIXES {
            let id = prefixed_id(prefix).unwrap();
            assert_eq!(id.len(), 12, "unexpected id {id}");
            let (head, tail) = id.split_once('-').unwrap();
            assert_eq!(head, *prefix);
            assert!(tail.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn ids_differ() {
        let a = prefixed_id(PREFIX_DIALOG).unwrap();
        let b = prefixed_id(PREFIX_DIALOG).unwrap();
        assert_ne!(a, b);
    }
}
