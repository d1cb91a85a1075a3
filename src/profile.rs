//! Visitor profile used for tier classification

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// What the assistant knows about the visitor
///
/// Both fields are optional on the wire: a missing age is 0 and a missing
/// interest is the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserProfile {
    /// Age in years
    #[serde(default)]
    pub age: i64,

    /// Free-text answer to "how interested are you in history?"
    #[serde(default)]
    pub interest_in_history: String,
}

impl UserProfile {
    /// Create a profile from an age and interest answer
    #[must_use]
    pub fn new(age: i64, interest_in_history: impl Into<String>) -> Self {
        Self {
            age,
            interest_in_history: interest_in_history.into(),
        }
    }

    /// Parse a profile from JSON
    ///
    /// # Errors
    ///
    /// Returns error if the JSON is malformed or a field has the wrong type
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Profile(format!("invalid profile JSON: {e}")))
    }

    /// Read a JSON profile from disk
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let profile = Self::from_json(&content)?;
        tracing::debug!(path = %path.display(), age = profile.age, "loaded profile");
        Ok(profile)
    }
}

/// Parse a spoken or typed age answer such as "12" or " 30 years"
///
/// Takes the first run of digits; returns `None` when there is none.
/// A leading sign is not part of the digit run, so "-5" reads as 5.
/// Runs too long for an `i64` saturate to `i64::MAX`.
#[must_use]
pub fn parse_age(answer: &str) -> Option<i64> {
    let digits: String = answer
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();

    if digits.is_empty() {
        return None;
    }

    // Only overflow can fail on a pure digit run
    Some(digits.parse().unwrap_or_else(|_| {
        tracing::debug!(digits = %digits, "age out of range, saturating");
        i64::MAX
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let profile = UserProfile::from_json("{}").unwrap();
        assert_eq!(profile, UserProfile::default());
        assert_eq!(profile.age, 0);
        assert!(profile.interest_in_history.is_empty());
    }

    #[test]
    fn test_partial_profile() {
        let profile = UserProfile::from_json(r#"{"age": 42}"#).unwrap();
        assert_eq!(profile.age, 42);
        assert!(profile.interest_in_history.is_empty());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let profile =
            UserProfile::from_json(r#"{"age": 9, "interest_in_history": "yes", "name": "Mira"}"#)
                .unwrap();
        assert_eq!(profile, UserProfile::new(9, "yes"));
    }

    #[test]
    fn test_wrong_type_is_profile_error() {
        let err = UserProfile::from_json(r#"{"age": "ten"}"#).unwrap_err();
        assert!(matches!(err, Error::Profile(_)));
    }

    #[test]
    fn test_parse_age() {
        assert_eq!(parse_age("12"), Some(12));
        assert_eq!(parse_age(" I'm 30 years old"), Some(30));
        assert_eq!(parse_age("not telling"), None);
        assert_eq!(parse_age(""), None);
    }

    #[test]
    fn test_parse_age_ignores_sign() {
        assert_eq!(parse_age("-5"), Some(5));
    }

    #[test]
    fn test_parse_age_saturates_on_overflow() {
        assert_eq!(parse_age("99999999999999999999"), Some(i64::MAX));
    }
}
