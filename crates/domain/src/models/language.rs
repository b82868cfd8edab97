//! Language domain model.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A supported UI language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Language {
    pub id: i64,
    pub code: String,
    pub name: String,
}

impl Language {
    /// Built-in English entry used when no languages can be read.
    ///
    /// Its id is 0, which no stored row ever has.
    pub fn default_locale() -> Self {
        Self {
            id: 0,
            code: "en".to_string(),
            name: "English".to_string(),
        }
    }
}

/// Request to register a language.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct NewLanguage {
    #[validate(
        length(min = 1, max = 16, message = "Code must be 1-16 characters"),
        custom(function = "validate_not_blank")
    )]
    pub code: String,
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,
}

impl NewLanguage {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Rejects values made only of whitespace.
pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value must not be blank".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_locale() {
        let lang = Language::default_locale();
        assert_eq!(lang.code, "en");
        assert_eq!(lang.name, "English");
    }

    #[test]
    fn test_new_language_validation() {
        assert!(NewLanguage::new("sw", "Swahili").validate().is_ok());
        assert!(NewLanguage::new("", "Swahili").validate().is_err());
        assert!(NewLanguage::new("sw", "   ").validate().is_err());
    }
}
