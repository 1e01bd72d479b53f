//! Side-channel observation of a parse run.
//!
//! Components report what happened through `ParseObserver` instead of writing
//! to a log stream themselves. `TracingObserver` is the default sink.

use std::path::Path;

use crate::extractors::{ExtractError, Field};

#[derive(Debug)]
pub enum ParseEvent<'a> {
    ReaderResolved {
        path: &'a Path,
        extension: &'a str,
        format: &'static str,
    },
    TextExtracted {
        chars: usize,
    },
    ModelRequest {
        field: Field,
        model: &'a str,
        prompt_chars: usize,
    },
    FieldExtracted {
        field: Field,
    },
    /// An extractor failed; the field received its default value.
    FieldDefaulted {
        field: Field,
        error: &'a ExtractError,
    },
}

pub trait ParseObserver: Send + Sync {
    fn on_event(&self, event: &ParseEvent<'_>);
}

/// Maps every event to a `tracing` record.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ParseObserver for TracingObserver {
    fn on_event(&self, event: &ParseEvent<'_>) {
        match event {
            ParseEvent::ReaderResolved {
                path,
                extension,
                format,
            } => {
                tracing::info!(path = %path.display(), extension, format, "Reading document");
            }
            ParseEvent::TextExtracted { chars } => {
                tracing::debug!(chars, "Document text extracted");
            }
            ParseEvent::ModelRequest {
                field,
                model,
                prompt_chars,
            } => {
                tracing::debug!(field = field.as_str(), model, prompt_chars, "Calling hosted model");
            }
            ParseEvent::FieldExtracted { field } => {
                tracing::debug!(field = field.as_str(), "Field extracted");
            }
            ParseEvent::FieldDefaulted { field, error } => {
                tracing::warn!(field = field.as_str(), error = %error, "Field extraction failed, using default");
            }
        }
    }
}
