use std::path::Path;

use async_trait::async_trait;

use super::{read_document, DocumentReader};
use crate::errors::ParseError;

const FORMAT: &str = "PDF";
const PAGE_SEPARATOR: &str = "\n\n";

/// PDF reader using the pdf-extract library.
///
/// Extraction is synchronous and CPU-bound, so it runs on a blocking task.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfReader;

impl PdfReader {
    pub fn new() -> Self {
        Self
    }

    fn extract_sync(content: Vec<u8>) -> Result<String, ParseError> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(&content).map_err(|e| {
            ParseError::Document {
                format: FORMAT,
                message: e.to_string(),
            }
        })?;
        join_pages(pages)
    }
}

/// Joins the non-blank pages; a document with none is an error.
fn join_pages(pages: Vec<String>) -> Result<String, ParseError> {
    let pages: Vec<String> = pages
        .into_iter()
        .filter(|page| !page.trim().is_empty())
        .collect();

    if pages.is_empty() {
        return Err(ParseError::EmptyContent { format: FORMAT });
    }
    Ok(pages.join(PAGE_SEPARATOR))
}

#[async_trait]
impl DocumentReader for PdfReader {
    async fn parse(&self, path: &Path) -> Result<String, ParseError> {
        let content = read_document(path).await?;
        tokio::task::spawn_blocking(move || Self::extract_sync(content)).await?
    }

    fn format(&self) -> &'static str {
        FORMAT
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[tokio::test]
    async fn test_missing_file() {
        let err = PdfReader::new()
            .parse(Path::new("nonexistent.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, ParseError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_special_character_filenames_not_found() {
        for name in ["test file with spaces.pdf", "测试文件.pdf", "файл.pdf"] {
            let err = PdfReader::new().parse(Path::new(name)).await.unwrap_err();
            assert!(matches!(err, ParseError::NotFound(_)), "{name}");
        }
    }

    #[tokio::test]
    async fn test_corrupt_file_propagates_library_error() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"This is not a PDF").unwrap();

        let err = PdfReader::new().parse(file.path()).await.unwrap_err();
        assert!(!matches!(err, ParseError::EmptyContent { .. }));
        assert!(!matches!(err, ParseError::NotFound(_)));
    }

    #[test]
    fn test_join_pages_skips_blank_pages() {
        let pages = vec!["Page one".to_string(), "  \n".to_string(), "Page three".to_string()];
        assert_eq!(join_pages(pages).unwrap(), "Page one\n\nPage three");
    }

    #[test]
    fn test_join_pages_all_blank_is_empty_content() {
        let err = join_pages(vec![String::new(), " ".to_string()]).unwrap_err();
        assert!(matches!(err, ParseError::EmptyContent { format: "PDF" }));
    }

    #[test]
    fn test_format_name() {
        assert_eq!(PdfReader::new().format(), "PDF");
    }
}
