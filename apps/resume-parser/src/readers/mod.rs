//! Document readers: turn a file on disk into one plain-text blob.

use std::path::Path;

use async_trait::async_trait;

use crate::errors::ParseError;

pub mod pdf;
pub mod word;

pub use pdf::PdfReader;
pub use word::WordReader;

#[async_trait]
pub trait DocumentReader: Send + Sync {
    /// Extracts all text from `path`.
    ///
    /// Fails with `NotFound` before opening anything if the path does not
    /// exist, and with `EmptyContent` if the document holds no text.
    async fn parse(&self, path: &Path) -> Result<String, ParseError>;

    /// Human-readable format name, used in errors and events.
    fn format(&self) -> &'static str;
}

/// Reads the whole file after the existence check shared by all readers.
///
/// Only a definite "does not exist" maps to `NotFound`; any other failure to
/// stat the path (permissions, a file used as a directory) is `Io`.
pub(crate) async fn read_document(path: &Path) -> Result<Vec<u8>, ParseError> {
    if !tokio::fs::try_exists(path).await? {
        return Err(ParseError::NotFound(path.to_path_buf()));
    }
    Ok(tokio::fs::read(path).await?)
}
