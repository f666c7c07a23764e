//! End-to-end conversion and output formatting
//!
//! [`convert`] runs the whole pipeline: tokenize, parse, compact, emit. The
//! result keeps the compacted document for inspection next to the re-emitted
//! markup, and carries the truncation point if the input was malformed.

use crate::sml::compaction::compact;
use crate::sml::document::Document;
use crate::sml::emitting::emit;
use crate::sml::error::{MalformedMarkupError, ProcessingError, UnknownTagError};
use crate::sml::lexing::{tokenize, RawToken};
use crate::sml::parsing::parse;
use serde::Deserialize;
use std::str::FromStr;

/// Markup used by `sml sample`
pub const SAMPLE: &str = "<B>bold<r>red and bold</r>just bold</B>";

/// Everything produced by one conversion
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub document: Document,
    pub sml: String,
    pub truncation: Option<MalformedMarkupError>,
}

impl Conversion {
    pub fn is_truncated(&self) -> bool {
        self.truncation.is_some()
    }
}

/// Parse and compact markup. A truncated input yields the document up to the
/// truncation point.
pub fn parse_markup(
    markup: &str,
) -> Result<(Document, Option<MalformedMarkupError>), UnknownTagError> {
    let stream = tokenize(markup);
    let document = compact(parse(stream.tokens())?);
    Ok((document, stream.truncation()))
}

/// Parse, compact and re-emit markup.
pub fn convert(markup: &str) -> Result<Conversion, UnknownTagError> {
    let (document, truncation) = parse_markup(markup)?;
    let sml = emit(&document);
    Ok(Conversion {
        document,
        sml,
        truncation,
    })
}

/// How a document or token stream is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One run per line, diagnostic rendering
    #[default]
    Simple,
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn available() -> &'static [&'static str] {
        &["simple", "json", "yaml"]
    }
}

impl FromStr for OutputFormat {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(OutputFormat::Simple),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            other => Err(ProcessingError::InvalidFormat(other.to_string())),
        }
    }
}

/// Render a document in the given format
pub fn format_document(
    document: &Document,
    format: OutputFormat,
) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Simple => Ok(document.to_string()),
        OutputFormat::Json => serde_json::to_string_pretty(document)
            .map(|s| s + "\n")
            .map_err(|e| ProcessingError::Serialization(e.to_string())),
        OutputFormat::Yaml => serde_yaml::to_string(document)
            .map_err(|e| ProcessingError::Serialization(e.to_string())),
    }
}

/// Render a token stream in the given format
pub fn format_tokens(tokens: &[RawToken], format: OutputFormat) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Simple => {
            let mut result = String::new();
            for token in tokens {
                match token {
                    RawToken::Text(text) => result.push_str(&format!("TEXT {:?}\n", text)),
                    RawToken::Tag {
                        name,
                        closing: false,
                    } => result.push_str(&format!("OPEN {}\n", name)),
                    RawToken::Tag {
                        name,
                        closing: true,
                    } => result.push_str(&format!("CLOSE {}\n", name)),
                }
            }
            Ok(result)
        }
        OutputFormat::Json => serde_json::to_string_pretty(tokens)
            .map(|s| s + "\n")
            .map_err(|e| ProcessingError::Serialization(e.to_string())),
        OutputFormat::Yaml => serde_yaml::to_string(tokens)
            .map_err(|e| ProcessingError::Serialization(e.to_string())),
    }
}
