//! Parsing tokens into a document
//!
//! The parser keeps the current style state and a stack of the states that
//! were current when each still-open tag was opened. Opening a tag saves the
//! current state and applies the tag; closing any tag restores the most
//! recently saved state. Closing tags are not matched by name, and a close
//! with nothing open is ignored.

use crate::sml::document::{Document, Run};
use crate::sml::error::UnknownTagError;
use crate::sml::lexing::RawToken;
use crate::sml::style::StyleState;

/// Saved style states, one per open tag
#[derive(Debug, Clone, Default)]
pub struct StyleStack {
    states: Vec<StyleState>,
}

impl StyleStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, state: StyleState) {
        self.states.push(state);
    }

    pub fn pop(&mut self) -> Option<StyleState> {
        self.states.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.states.len()
    }
}

/// Build a document from tokens. Fails on the first unknown tag.
///
/// The result is not compacted: it may contain empty runs and adjacent runs
/// with equal states.
pub fn parse(tokens: &[RawToken]) -> Result<Document, UnknownTagError> {
    let mut document = Document::new();
    let mut context = StyleStack::new();
    let mut current = StyleState::new();

    for token in tokens {
        match token {
            RawToken::Text(text) => {
                if !text.is_empty() {
                    document.push(Run::new(current, text));
                }
            }
            RawToken::Tag {
                name,
                closing: false,
            } => {
                let next = current.apply(name)?;
                context.push(current);
                current = next;
            }
            RawToken::Tag { closing: true, .. } => {
                if let Some(previous) = context.pop() {
                    current = previous;
                }
            }
        }
        log::trace!(
            target: "sml.parsing",
            "{:?} -> {} (depth {})",
            token,
            current,
            context.depth()
        );
    }

    Ok(document)
}
