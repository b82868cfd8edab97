//! Translation domain models.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::language::validate_not_blank;

/// A localized string for one language code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Translation {
    pub id: i64,
    pub lang_code: Option<String>,
    pub key: String,
    pub value: String,
}

/// Request to store a translation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct NewTranslation {
    #[validate(length(min = 1, max = 16), custom(function = "validate_not_blank"))]
    pub lang_code: String,
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub key: String,
    #[validate(length(min = 1, message = "Translation text is required"))]
    pub value: String,
}

impl NewTranslation {
    pub fn new(
        lang_code: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            lang_code: lang_code.into(),
            key: key.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_translation_requires_every_field() {
        assert!(NewTranslation::new("fr", "greeting", "Bonjour").validate().is_ok());
        assert!(NewTranslation::new("", "greeting", "Bonjour").validate().is_err());
        assert!(NewTranslation::new("fr", " ", "Bonjour").validate().is_err());
        assert!(NewTranslation::new("fr", "greeting", "").validate().is_err());
    }
}
