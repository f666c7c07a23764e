//! Error types for sml conversion
//!
//! Only [`UnknownTagError`] stops a conversion. Malformed markup is recovered
//! inside the tokenizer and is reported alongside the (shortened) result.

use std::fmt;

/// A tag token outside the sml vocabulary reached tag application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTagError {
    pub tag: String,
}

impl UnknownTagError {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }
}

impl fmt::Display for UnknownTagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown tag: <{}>", self.tag)
    }
}

impl std::error::Error for UnknownTagError {}

/// Why the tokenizer stopped early
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedKind {
    /// `<>`
    EmptyTag,
    /// A `<` with no `>` after it
    UnterminatedTag,
}

/// Records where tokenizing was cut short. Everything from `offset` on was
/// dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MalformedMarkupError {
    pub offset: usize,
    pub kind: MalformedKind,
}

impl fmt::Display for MalformedMarkupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MalformedKind::EmptyTag => write!(f, "Empty tag at byte {}", self.offset),
            MalformedKind::UnterminatedTag => {
                write!(f, "Unterminated tag at byte {}", self.offset)
            }
        }
    }
}

impl std::error::Error for MalformedMarkupError {}

/// Errors that can occur while processing sml input end to end
#[derive(Debug)]
pub enum ProcessingError {
    Io(std::io::Error),
    Config(config::ConfigError),
    UnknownTag(UnknownTagError),
    Truncated(MalformedMarkupError),
    InvalidFormat(String),
    Serialization(String),
}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingError::Io(err) => write!(f, "IO error: {}", err),
            ProcessingError::Config(err) => write!(f, "Configuration error: {}", err),
            ProcessingError::UnknownTag(err) => write!(f, "{}", err),
            ProcessingError::Truncated(err) => write!(f, "Input truncated: {}", err),
            ProcessingError::InvalidFormat(format) => write!(f, "Invalid format: {}", format),
            ProcessingError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for ProcessingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProcessingError::Io(err) => Some(err),
            ProcessingError::Config(err) => Some(err),
            ProcessingError::UnknownTag(err) => Some(err),
            ProcessingError::Truncated(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ProcessingError {
    fn from(err: std::io::Error) -> Self {
        ProcessingError::Io(err)
    }
}

impl From<config::ConfigError> for ProcessingError {
    fn from(err: config::ConfigError) -> Self {
        ProcessingError::Config(err)
    }
}

impl From<UnknownTagError> for ProcessingError {
    fn from(err: UnknownTagError) -> Self {
        ProcessingError::UnknownTag(err)
    }
}
