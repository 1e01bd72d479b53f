//! Extraction orchestrator: picks a reader by file extension, runs every
//! registered field extractor on the text and assembles the `ResumeData`.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::Arc;

use crate::errors::ParseError;
use crate::extractors::{ExtractError, Field, FieldExtractor, FieldValue};
use crate::models::resume::UNKNOWN_NAME;
use crate::models::ResumeData;
use crate::observer::{ParseEvent, ParseObserver, TracingObserver};
use crate::readers::DocumentReader;

/// Readers and extractors are injected by the caller; nothing is registered
/// implicitly.
pub struct ResumeParser {
    readers: HashMap<String, Arc<dyn DocumentReader>>,
    extractors: Vec<(Field, Arc<dyn FieldExtractor>)>,
    observer: Arc<dyn ParseObserver>,
}

impl ResumeParser {
    /// Extension keys are matched case-insensitively, with or without the
    /// leading dot. A field registered twice keeps its last extractor.
    pub fn new(
        readers: HashMap<String, Arc<dyn DocumentReader>>,
        extractors: Vec<(Field, Arc<dyn FieldExtractor>)>,
    ) -> Self {
        let readers = readers
            .into_iter()
            .map(|(ext, reader)| (normalize_extension(&ext), reader))
            .collect();

        let mut registered: Vec<(Field, Arc<dyn FieldExtractor>)> = Vec::new();
        for (field, extractor) in extractors {
            match registered.iter_mut().find(|(f, _)| *f == field) {
                Some(slot) => slot.1 = extractor,
                None => registered.push((field, extractor)),
            }
        }

        Self {
            readers,
            extractors: registered,
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ParseObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn supported_file_types(&self) -> BTreeSet<String> {
        self.readers.keys().cloned().collect()
    }

    /// Parses one resume.
    ///
    /// Reader failures (and unsupported extensions) abort the call. Extractor
    /// failures only affect their own field, which receives its default.
    pub async fn parse_resume(&self, path: impl AsRef<Path>) -> Result<ResumeData, ParseError> {
        let path = path.as_ref();
        let extension = file_extension(path);
        let reader = self
            .readers
            .get(&extension)
            .ok_or_else(|| ParseError::UnsupportedType(extension.clone()))?;

        self.observer.on_event(&ParseEvent::ReaderResolved {
            path,
            extension: &extension,
            format: reader.format(),
        });

        let raw_text = reader.parse(path).await?;
        self.observer.on_event(&ParseEvent::TextExtracted {
            chars: raw_text.chars().count(),
        });

        let mut name = None;
        let mut email = None;
        let mut skills = None;

        for (field, extractor) in &self.extractors {
            let value = match self.run_extractor(*field, extractor.as_ref(), &raw_text).await {
                Ok(value) => {
                    self.observer.on_event(&ParseEvent::FieldExtracted { field: *field });
                    value
                }
                Err(error) => {
                    self.observer.on_event(&ParseEvent::FieldDefaulted {
                        field: *field,
                        error: &error,
                    });
                    field.default_value()
                }
            };

            match value {
                FieldValue::Name(v) => name = Some(v),
                FieldValue::Email(v) => email = Some(v),
                FieldValue::Skills(v) => skills = Some(v),
            }
        }

        Ok(ResumeData::new(
            name.unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            email.unwrap_or_default(),
            skills.unwrap_or_default(),
        ))
    }

    async fn run_extractor(
        &self,
        field: Field,
        extractor: &dyn FieldExtractor,
        text: &str,
    ) -> Result<FieldValue, ExtractError> {
        let value = extractor.extract(text).await?;
        if value.field() != field {
            return Err(ExtractError::FieldMismatch {
                expected: field,
                found: value.field(),
            });
        }
        Ok(value)
    }
}

fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}

/// Lowercased extension with a leading dot, or "" when the path has none.
fn file_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}
