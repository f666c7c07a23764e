//! Runs and documents
//!
//! A [`Run`] is text sharing one style state. Non-literal text is stored as
//! its whitespace separated words; literal text is one token holding the text
//! exactly as written.

use crate::sml::style::StyleState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A stretch of text under a single style state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub state: StyleState,
    pub tokens: Vec<String>,
}

impl Run {
    /// Build a run from source text, splitting it into words unless the state
    /// is literal.
    pub fn new(state: StyleState, text: &str) -> Self {
        let tokens = if state.literal {
            vec![text.to_string()]
        } else {
            split_words(text)
        };
        Self { state, tokens }
    }

    /// Build a run from already split tokens.
    pub fn from_tokens<I, S>(state: StyleState, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            state,
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// A run with no content: no tokens, or a literal run whose text is empty.
    pub fn is_empty(&self) -> bool {
        match self.tokens.as_slice() {
            [] => true,
            [only] if self.state.literal => only.is_empty(),
            _ => false,
        }
    }

    /// The run's text as it is written back out.
    pub fn text(&self) -> String {
        if self.state.literal {
            self.tokens.concat()
        } else {
            self.tokens.join(" ")
        }
    }
}

impl fmt::Display for Run {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}} [{}]", self.state, self.tokens.join(", "))
    }
}

fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

/// Words of `text`, with every stretch of whitespace acting as one separator
/// and no empty words at either end.
fn split_words(text: &str) -> Vec<String> {
    text.split(is_separator)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// Runs in reading order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub runs: Vec<Run>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_runs(runs: Vec<Run>) -> Self {
        Self { runs }
    }

    pub fn push(&mut self, run: Run) {
        self.runs.push(run);
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Run> {
        self.runs.iter()
    }

    /// Merge adjacent equal-state runs and drop empty ones.
    pub fn compact(self) -> Document {
        crate::sml::compaction::compact(self)
    }

    /// Every token of every run, in order.
    pub fn all_tokens(&self) -> Vec<&str> {
        self.runs
            .iter()
            .flat_map(|run| run.tokens.iter().map(String::as_str))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Run;
    type IntoIter = std::slice::Iter<'a, Run>;

    fn into_iter(self) -> Self::IntoIter {
        self.runs.iter()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for run in &self.runs {
            writeln!(f, "{}", run)?;
        }
        Ok(())
    }
}
