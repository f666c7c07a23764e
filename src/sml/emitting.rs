//! Minimal tag emission
//!
//! The emitter walks a document and writes, before each run whose state
//! differs from the previous one, the tags needed to move from one state to
//! the other. It tracks the tags it has opened on a [`TagStack`] so that
//! closing tags are written in properly nested order.
//!
//! Transitions are computed one run at a time with no lookahead, attribute by
//! attribute in a fixed order:
//!
//! 1. bold. Turning bold on opens `B`. Turning it off closes tags from the top
//!    of the stack down to and including the nearest `B`. Tags closed on the
//!    way are not reopened.
//! 2. emphasis. Any change opens `Em`; emphasis is a toggle in the markup, so
//!    a second `Em` switches it back off.
//! 3. color. A new color opens its letter. Returning to the default color
//!    closes from the top of the stack while any color tag is still open.
//!
//! Italic, strike, underline, size and literal are not written out.
//!
//! All tags still open after the last run are closed, innermost first.

use crate::sml::document::Document;
use crate::sml::style::{Color, StyleState};
use std::fmt;

pub const BOLD_TAG: &str = "B";
pub const EMPHASIS_TAG: &str = "Em";

/// One tag to write during a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagEdit {
    Open(&'static str),
    Close(&'static str),
}

impl TagEdit {
    /// The tag content to wrap in `<` `>`, with a leading `/` for closes.
    pub fn name(&self) -> String {
        match self {
            TagEdit::Open(name) => (*name).to_string(),
            TagEdit::Close(name) => format!("/{}", name),
        }
    }

    pub fn is_close(&self) -> bool {
        matches!(self, TagEdit::Close(_))
    }
}

impl fmt::Display for TagEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagEdit::Open(name) => write!(f, "<{}>", name),
            TagEdit::Close(name) => write!(f, "</{}>", name),
        }
    }
}

/// Names of the tags the emitter has opened and not yet closed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagStack {
    names: Vec<&'static str>,
}

impl TagStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &'static str) {
        self.names.push(name);
    }

    pub fn pop(&mut self) -> Option<&'static str> {
        self.names.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.names.len()
    }

    /// Whether any color tag is open, at any depth.
    pub fn contains_color(&self) -> bool {
        self.names.iter().any(|name| Color::is_color_tag(name))
    }

    pub fn names(&self) -> &[&'static str] {
        &self.names
    }
}

impl fmt::Display for TagStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.names.join(","))
    }
}

/// Tags that move the output from `from` to `to`, updating `open` to match.
pub fn diff(from: &StyleState, to: &StyleState, open: &mut TagStack) -> Vec<TagEdit> {
    let mut edits = Vec::new();

    if from.bold != to.bold {
        if to.bold {
            open.push(BOLD_TAG);
            edits.push(TagEdit::Open(BOLD_TAG));
        } else {
            while let Some(name) = open.pop() {
                edits.push(TagEdit::Close(name));
                if name == BOLD_TAG {
                    break;
                }
            }
        }
    }

    if from.emphasis != to.emphasis {
        open.push(EMPHASIS_TAG);
        edits.push(TagEdit::Open(EMPHASIS_TAG));
    }

    if from.color != to.color {
        match to.color.tag() {
            Some(tag) => {
                open.push(tag);
                edits.push(TagEdit::Open(tag));
            }
            None => {
                while open.contains_color() {
                    let Some(name) = open.pop() else { break };
                    edits.push(TagEdit::Close(name));
                }
            }
        }
    }

    edits
}

/// Number of tags [`diff`] would write for this transition. `open` is left
/// untouched.
pub fn transition_cost(from: &StyleState, to: &StyleState, open: &TagStack) -> usize {
    let mut scratch = open.clone();
    diff(from, to, &mut scratch).len()
}

/// Serialize a document back to markup.
pub fn emit(document: &Document) -> String {
    let mut output = String::new();
    let mut open = TagStack::new();
    let mut current = StyleState::new();

    for run in document {
        if run.state != current {
            log::trace!(target: "sml.emitting", "{} -> {}", current, run.state);
            log::trace!(target: "sml.emitting", "tag stack before: {}", open);
            for edit in diff(&current, &run.state, &mut open) {
                output.push_str(&edit.to_string());
            }
            log::trace!(target: "sml.emitting", "tag stack after: {}", open);
        }
        output.push_str(&run.text());
        current = run.state;
    }

    while let Some(name) = open.pop() {
        output.push_str(&TagEdit::Close(name).to_string());
    }

    output
}
