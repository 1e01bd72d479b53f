use std::path::Path;

use async_trait::async_trait;
use docx_rs::{DocumentChild, ParagraphChild, RunChild, TableCellContent, TableChild, TableRowChild};

use super::{read_document, DocumentReader};
use crate::errors::ParseError;

const FORMAT: &str = "Word";
const CELL_SEPARATOR: &str = " | ";

/// Word-family reader using docx-rs.
///
/// Output is every non-blank paragraph (trimmed, in document order) followed
/// by every table row with its non-blank cells joined by `" | "`, one segment
/// per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordReader;

impl WordReader {
    pub fn new() -> Self {
        Self
    }

    fn extract_sync(content: Vec<u8>) -> Result<String, ParseError> {
        let docx = docx_rs::read_docx(&content).map_err(|e| ParseError::Document {
            format: FORMAT,
            message: e.to_string(),
        })?;

        let mut paragraphs: Vec<String> = Vec::new();
        let mut rows: Vec<String> = Vec::new();

        for child in &docx.document.children {
            match child {
                DocumentChild::Paragraph(p) => {
                    let text = paragraph_text(p);
                    let text = text.trim();
                    if !text.is_empty() {
                        paragraphs.push(text.to_string());
                    }
                }
                DocumentChild::Table(t) => rows.extend(table_rows(t)),
                _ => {}
            }
        }

        paragraphs.extend(rows);
        if paragraphs.is_empty() {
            return Err(ParseError::EmptyContent { format: FORMAT });
        }
        Ok(paragraphs.join("\n"))
    }
}

fn paragraph_text(p: &docx_rs::Paragraph) -> String {
    let mut text = String::new();

    for child in &p.children {
        match child {
            ParagraphChild::Run(r) => push_run_text(&mut text, &r.children),
            ParagraphChild::Hyperlink(h) => {
                for child in &h.children {
                    if let ParagraphChild::Run(r) = child {
                        push_run_text(&mut text, &r.children);
                    }
                }
            }
            _ => {}
        }
    }

    text
}

fn push_run_text(text: &mut String, children: &[RunChild]) {
    for run_child in children {
        match run_child {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}

/// One line per row that has at least one non-blank cell.
fn table_rows(t: &docx_rs::Table) -> Vec<String> {
    let mut lines = Vec::new();

    for row in &t.rows {
        let TableChild::TableRow(r) = row;
        let mut cells: Vec<String> = Vec::new();
        for cell in &r.cells {
            let TableRowChild::TableCell(c) = cell;
            let cell_text = c
                .children
                .iter()
                .filter_map(|content| match content {
                    TableCellContent::Paragraph(p) => Some(paragraph_text(p)),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("\n");
            let cell_text = cell_text.trim();
            if !cell_text.is_empty() {
                cells.push(cell_text.to_string());
            }
        }
        if !cells.is_empty() {
            lines.push(cells.join(CELL_SEPARATOR));
        }
    }

    lines
}

#[async_trait]
impl DocumentReader for WordReader {
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

    use docx_rs::{Docx, Paragraph, Run, Table, TableCell, TableRow};
    use tempfile::NamedTempFile;

    use super::*;

    fn text_paragraph(text: &str) -> Paragraph {
        Paragraph::new().add_run(Run::new().add_text(text))
    }

    fn cell(text: &str) -> TableCell {
        TableCell::new().add_paragraph(text_paragraph(text))
    }

    fn write_docx(docx: Docx) -> NamedTempFile {
        let file = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
        docx.build()
            .pack(std::fs::File::create(file.path()).unwrap())
            .unwrap();
        file
    }

    #[tokio::test]
    async fn test_paragraphs_then_table_rows() {
        let table = Table::new(vec![
            TableRow::new(vec![cell("Languages"), cell(" Rust "), cell("Go")]),
            TableRow::new(vec![cell(""), cell("")]),
            TableRow::new(vec![cell("Cloud"), cell(""), cell("AWS")]),
        ]);
        let docx = Docx::new()
            .add_paragraph(text_paragraph("  Jane Roe  "))
            .add_table(table)
            .add_paragraph(text_paragraph("   "))
            .add_paragraph(text_paragraph("jane@roe.dev"));
        let file = write_docx(docx);

        let text = WordReader::new().parse(file.path()).await.unwrap();
        assert_eq!(
            text,
            "Jane Roe\njane@roe.dev\nLanguages | Rust | Go\nCloud | AWS"
        );
    }

    #[tokio::test]
    async fn test_document_without_text_is_empty_content() {
        let file = write_docx(Docx::new().add_paragraph(text_paragraph("  ")));

        let err = WordReader::new().parse(file.path()).await.unwrap_err();
        assert!(matches!(err, ParseError::EmptyContent { format: "Word" }));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = WordReader::new()
            .parse(Path::new("nonexistent.docx"))
            .await
            .unwrap_err();
        assert!(matches!(err, ParseError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_legacy_binary_doc_propagates_library_error() {
        let mut file = tempfile::Builder::new().suffix(".doc").tempfile().unwrap();
        file.write_all(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1]).unwrap();

        let err = WordReader::new().parse(file.path()).await.unwrap_err();
        assert!(matches!(err, ParseError::Document { format: "Word", .. }));
    }
}
