use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use super::{ExtractError, FieldExtractor, FieldValue};

// `\w` is Unicode-aware, so accented display names directly in front of an
// address are scanned as part of the local part instead of splitting it.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[\w.%+-]+@[\w.-]+\.[A-Za-z]{2,}\b").expect("email pattern is valid")
});

/// Regex-based email extractor. Local, deterministic, never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailExtractor;

impl EmailExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Returns the left-most address in `text`, or an empty string.
    pub fn find(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        EMAIL_PATTERN
            .find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }
}

#[async_trait]
impl FieldExtractor for EmailExtractor {
    async fn extract(&self, text: &str) -> Result<FieldValue, ExtractError> {
        Ok(FieldValue::Email(self.find(text)))
    }
}
