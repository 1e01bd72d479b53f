//! Field extractors: each maps the full resume text to one field of the record.
//!
//! The set of fields is closed (`Field`). Extractors return an explicit
//! `Result` so callers can tell "nothing found" apart from "the model call
//! failed"; the orchestrator turns any error into the field default.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::llm_client::{parse_json_reply, LlmError, TextModel};
use crate::models::resume::UNKNOWN_NAME;
use crate::observer::{ParseEvent, ParseObserver};

pub mod email;
pub mod name;
pub mod prompts;
pub mod skills;

pub use email::EmailExtractor;
pub use name::NameExtractor;
pub use skills::SkillsExtractor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    Email,
    Skills,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Skills => "skills",
        }
    }

    pub fn default_value(self) -> FieldValue {
        match self {
            Field::Name => FieldValue::Name(UNKNOWN_NAME.to_string()),
            Field::Email => FieldValue::Email(String::new()),
            Field::Skills => FieldValue::Skills(Vec::new()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Name(String),
    Email(String),
    Skills(Vec<String>),
}

impl FieldValue {
    pub fn field(&self) -> Field {
        match self {
            FieldValue::Name(_) => Field::Name,
            FieldValue::Email(_) => Field::Email,
            FieldValue::Skills(_) => Field::Skills,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("model call failed: {0}")]
    Model(#[from] LlmError),

    #[error("model reply is not valid JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("model reply is not a JSON object")]
    NotAnObject,

    #[error("model reply has no '{0}' key")]
    MissingKey(&'static str),

    #[error("'{key}' is not {expected}")]
    WrongType {
        key: &'static str,
        expected: &'static str,
    },

    #[error("extractor for {expected:?} produced a {found:?} value")]
    FieldMismatch { expected: Field, found: Field },
}

#[async_trait]
pub trait FieldExtractor: Send + Sync {
    async fn extract(&self, text: &str) -> Result<FieldValue, ExtractError>;
}

/// Takes at most `max_chars` characters without splitting a UTF-8 sequence.
pub(crate) fn prompt_window(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Shared request path for the LLM-backed extractors.
pub(crate) async fn ask_model(
    model: &Arc<dyn TextModel>,
    observer: &Arc<dyn ParseObserver>,
    field: Field,
    prompt: &str,
) -> Result<serde_json::Map<String, Value>, ExtractError> {
    observer.on_event(&ParseEvent::ModelRequest {
        field,
        model: model.model_name(),
        prompt_chars: prompt.chars().count(),
    });

    let reply = model.generate(prompt).await?;
    if reply.trim().is_empty() {
        return Err(LlmError::EmptyContent.into());
    }

    match parse_json_reply(&reply)? {
        Value::Object(map) => Ok(map),
        _ => Err(ExtractError::NotAnObject),
    }
}
