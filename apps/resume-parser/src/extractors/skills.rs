use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::prompts::{render, SKILLS_PROMPT};
use super::{ask_model, prompt_window, ExtractError, Field, FieldExtractor, FieldValue};
use crate::config::LlmSettings;
use crate::errors::ConfigError;
use crate::llm_client::{LlmClient, TextModel};
use crate::observer::{ParseObserver, TracingObserver};

/// Skills are spread over every section, so the window is wider than for names.
const SKILLS_WINDOW_CHARS: usize = 6000;
const MIN_SKILL_CHARS: usize = 2;
const MAX_SKILL_CHARS: usize = 49;

/// Skills extractor backed by the hosted model.
pub struct SkillsExtractor {
    model: Arc<dyn TextModel>,
    observer: Arc<dyn ParseObserver>,
}

impl SkillsExtractor {
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

    pub async fn try_extract(&self, text: &str) -> Result<Vec<String>, ExtractError> {
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let prompt = render(SKILLS_PROMPT, prompt_window(text, SKILLS_WINDOW_CHARS));
        let reply = ask_model(&self.model, &self.observer, Field::Skills, &prompt).await?;

        match reply.get("skills") {
            Some(Value::Array(items)) => Ok(clean_skills(items)),
            Some(_) => Err(ExtractError::WrongType {
                key: "skills",
                expected: "a list",
            }),
            None => Err(ExtractError::MissingKey("skills")),
        }
    }
}

#[async_trait]
impl FieldExtractor for SkillsExtractor {
    async fn extract(&self, text: &str) -> Result<FieldValue, ExtractError> {
        self.try_extract(text).await.map(FieldValue::Skills)
    }
}

/// Keeps string entries only, trimmed and lowercased, 2..=49 chars,
/// first occurrence wins, sorted ascending.
fn clean_skills(items: &[Value]) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    for item in items {
        let Some(raw) = item.as_str() else {
            continue;
        };
        let skill = raw.trim().to_lowercase();
        let len = skill.chars().count();
        if (MIN_SKILL_CHARS..=MAX_SKILL_CHARS).contains(&len) && !skills.contains(&skill) {
            skills.push(skill);
        }
    }
    skills.sort();
    skills
}
