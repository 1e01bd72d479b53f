mod config;
mod errors;
mod extractors;
mod llm_client;
mod models;
mod observer;
mod parser;
mod readers;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extractors::{EmailExtractor, Field, FieldExtractor, NameExtractor, SkillsExtractor};
use crate::observer::{ParseObserver, TracingObserver};
use crate::parser::ResumeParser;
use crate::readers::{DocumentReader, PdfReader, WordReader};

/// Extract name, email and skills from a PDF or Word resume.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Resume to parse (.pdf, .docx or .doc)
    input: PathBuf,

    /// Where to write the JSON result
    #[arg(short, long, default_value = "results.json")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    ensure_input_exists(&args.input)?;

    let observer: Arc<dyn ParseObserver> = Arc::new(TracingObserver);
    let parser = build_parser(&config, observer)?;
    info!(
        "Resume parser ready (model: {}, types: {:?})",
        config.llm.model,
        parser.supported_file_types()
    );

    let result = parser.parse_resume(&args.input).await?;
    let json = result.to_json().context("Failed to serialize result")?;
    tokio::fs::write(&args.output, json)
        .await
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!("Parsed {} - saved to {}", result.name, args.output.display());
    Ok(())
}

fn ensure_input_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("File not found: {}", path.display());
    }
    Ok(())
}

/// Registers the stock readers and extractors. Fails if the credential is missing.
fn build_parser(config: &Config, observer: Arc<dyn ParseObserver>) -> Result<ResumeParser> {
    let pdf: Arc<dyn DocumentReader> = Arc::new(PdfReader::new());
    let word: Arc<dyn DocumentReader> = Arc::new(WordReader::new());
    let readers: HashMap<String, Arc<dyn DocumentReader>> = HashMap::from([
        (".pdf".to_string(), pdf),
        (".docx".to_string(), word.clone()),
        (".doc".to_string(), word),
    ]);

    let name = NameExtractor::from_settings(&config.llm)?.with_observer(observer.clone());
    let skills = SkillsExtractor::from_settings(&config.llm)?.with_observer(observer.clone());
    let extractors: Vec<(Field, Arc<dyn FieldExtractor>)> = vec![
        (Field::Name, Arc::new(name)),
        (Field::Email, Arc::new(EmailExtractor::new())),
        (Field::Skills, Arc::new(skills)),
    ];

    Ok(ResumeParser::new(readers, extractors).with_observer(observer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_default_output() {
        let args = Args::try_parse_from(["resume-parser", "cv.pdf"]).unwrap();
        assert_eq!(args.input, PathBuf::from("cv.pdf"));
        assert_eq!(args.output, PathBuf::from("results.json"));
    }

    #[test]
    fn test_args_require_input() {
        assert!(Args::try_parse_from(["resume-parser"]).is_err());
    }

    #[test]
    fn test_missing_input_is_reported() {
        let err = ensure_input_exists(Path::new("no/such/resume.pdf")).unwrap_err();
        assert_eq!(err.to_string(), "File not found: no/such/resume.pdf");
    }

    #[test]
    fn test_existing_input_is_accepted() {
        let file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        assert!(ensure_input_exists(file.path()).is_ok());
    }

    #[test]
    fn test_build_parser_without_key_fails() {
        let config = Config::from_lookup(|_| None).unwrap();
        let err = build_parser(&config, Arc::new(TracingObserver)).err().unwrap();
        assert_eq!(err.to_string(), "GEMINI_API_KEY not found");
    }

    #[test]
    fn test_build_parser_registers_pdf_and_word() {
        let config = Config::from_lookup(|key| {
            (key == config::API_KEY_VAR).then(|| "test_api_key_12345".to_string())
        })
        .unwrap();
        let parser = build_parser(&config, Arc::new(TracingObserver)).unwrap();
        let types: Vec<String> = parser.supported_file_types().into_iter().collect();
        assert_eq!(types, vec![".doc", ".docx", ".pdf"]);
    }
}
