use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::prompts::{render, NAME_PROMPT};
use super::{ask_model, prompt_window, ExtractError, Field, FieldExtractor, FieldValue};
use crate::config::LlmSettings;
use crate::errors::ConfigError;
use crate::llm_client::{LlmClient, TextModel};
use crate::models::resume::UNKNOWN_NAME;
use crate::observer::{ParseObserver, TracingObserver};

/// Only the head of the resume is sent; the name sits near the top.
const NAME_WINDOW_CHARS: usize = 2000;

/// Candidate-name extractor backed by the hosted model.
pub struct NameExtractor {
    model: Arc<dyn TextModel>,
    observer: Arc<dyn ParseObserver>,
}

impl NameExtractor {
    /// Builds the extractor with its own model client. Fails without a credential.
    pub fn from_settings(settings: &LlmSettings) -> Result<Self, ConfigError> {
        Ok(Self::with_model(Arc::new(LlmClient::new(settings)?)))
    }

    pub fn with_model(model: Arc<dyn TextModel>) -> Self {
        Self {
            model,
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ParseObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Asks the model for the candidate name.
    ///
    /// `Ok("Unknown")` means the model found no name (or there was no text);
    /// `Err` means the call or its reply was unusable.
    pub async fn try_extract(&self, text: &str) -> Result<String, ExtractError> {
        if text.is_empty() {
            return Ok(UNKNOWN_NAME.to_string());
        }

        let prompt = render(NAME_PROMPT, prompt_window(text, NAME_WINDOW_CHARS));
        let reply = ask_model(&self.model, &self.observer, Field::Name, &prompt).await?;

        match reply.get("name") {
            Some(Value::String(name)) if !name.trim().is_empty() => Ok(name.clone()),
            Some(Value::String(_)) | Some(Value::Null) => Ok(UNKNOWN_NAME.to_string()),
            Some(_) => Err(ExtractError::WrongType {
                key: "name",
                expected: "a string",
            }),
            None => Err(ExtractError::MissingKey("name")),
        }
    }
}

#[async_trait]
impl FieldExtractor for NameExtractor {
    async fn extract(&self, text: &str) -> Result<FieldValue, ExtractError> {
        self.try_extract(text).await.map(FieldValue::Name)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::extractors::testing::StubModel;
    use crate::observer::testing::RecordingObserver;

    fn extractor(model: &Arc<StubModel>) -> NameExtractor {
        NameExtractor::with_model(model.clone())
    }

    /// What the record ends up holding: any error becomes "Unknown".
    async fn extract_name(extractor: &NameExtractor, text: &str) -> String {
        extractor
            .try_extract(text)
            .await
            .unwrap_or_else(|_| UNKNOWN_NAME.to_string())
    }

    #[test]
    fn test_construction_without_api_key_fails() {
        let settings = LlmSettings {
            api_key: None,
            model: "gemini-pro".to_string(),
            api_base: "https://example.invalid".to_string(),
            timeout: Duration::from_secs(1),
        };
        let err = NameExtractor::from_settings(&settings).err().unwrap();
        assert_eq!(err.to_string(), "GEMINI_API_KEY not found");
    }

    #[tokio::test]
    async fn test_successful_json_response() {
        let model = StubModel::replying(r#"{"name": "John Doe"}"#);
        let name = extract_name(&extractor(&model), "John Doe Software Engineer").await;
        assert_eq!(name, "John Doe");
        assert_eq!(model.calls(), 1);
    }

    #[tokio::test]
    async fn test_non_ascii_name_is_returned_unchanged() {
        let model = StubModel::replying(r#"{"name": "Zoë Ångström-Müller"}"#);
        let name = extract_name(&extractor(&model), "Zoë Ångström-Müller, Berlin").await;
        assert_eq!(name, "Zoë Ångström-Müller");
    }

    #[tokio::test]
    async fn test_fenced_reply_is_accepted() {
        let model = StubModel::replying("```json\n{\"name\": \"Jane Roe\"}\n```");
        assert_eq!(extract_name(&extractor(&model), "Jane Roe").await, "Jane Roe");
    }

    #[tokio::test]
    async fn test_api_error_yields_unknown() {
        let model = StubModel::failing("API connection failed");
        let extractor = extractor(&model);
        assert!(matches!(
            extractor.try_extract("John Doe").await,
            Err(ExtractError::Model(_))
        ));
        assert_eq!(extract_name(&extractor, "John Doe").await, "Unknown");
    }

    #[tokio::test]
    async fn test_empty_text_skips_model_call() {
        let model = StubModel::replying(r#"{"name": "Should Not Be Used"}"#);
        assert_eq!(extract_name(&extractor(&model), "").await, "Unknown");
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_whitespace_text_still_calls_model() {
        let model = StubModel::replying(r#"{"name": "X"}"#);
        assert_eq!(extract_name(&extractor(&model), " \n ").await, "X");
        assert_eq!(model.calls(), 1);
    }

    #[tokio::test]
    async fn test_unusable_replies_yield_unknown() {
        for reply in [
            "",
            "   ",
            "not json at all",
            r#"["John Doe"]"#,
            r#"{"candidate": "John Doe"}"#,
            r#"{"name": 42}"#,
            r#"{"name": ""}"#,
        ] {
            let model = StubModel::replying(reply);
            assert_eq!(
                extract_name(&extractor(&model), "John Doe").await,
                "Unknown",
                "reply: {reply:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_missing_key_is_an_error_not_a_no_name() {
        let model = StubModel::replying(r#"{"candidate": "John Doe"}"#);
        let err = extractor(&model).try_extract("John Doe").await.unwrap_err();
        assert!(matches!(err, ExtractError::MissingKey("name")));
    }

    #[tokio::test]
    async fn test_only_first_2000_chars_are_sent() {
        let model = StubModel::replying(r#"{"name": "A"}"#);
        let text = format!("{}{}", "a".repeat(2000), "TAIL_MARKER");
        extract_name(&extractor(&model), &text).await;
        let prompt = model.last_prompt().unwrap();
        assert!(prompt.contains(&"a".repeat(2000)));
        assert!(!prompt.contains("TAIL_MARKER"));
    }

    #[tokio::test]
    async fn test_model_request_is_observed() {
        let model = StubModel::replying(r#"{"name": "John Doe"}"#);
        let observer = Arc::new(RecordingObserver::default());
        let extractor = extractor(&model).with_observer(observer.clone());
        extract_name(&extractor, "John Doe").await;
        assert_eq!(observer.events(), vec!["model:name".to_string()]);
    }
}
