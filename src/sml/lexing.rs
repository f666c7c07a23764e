//! Tokenization of sml markup
//!
//! The tokenizer splits markup into literal text and tags without giving
//! either any meaning. Text is passed through verbatim, whitespace included;
//! collapsing happens later, once the style state of the text is known.
//!
//! Malformed tags do not fail tokenization. An empty tag (`<>`) or a `<` that
//! is never closed ends the stream: tokens read so far are kept, the rest of
//! the input is dropped, and the [`TokenStream`] records where it stopped.

pub mod tokens;

pub use tokens::Token;

use crate::sml::error::{MalformedKind, MalformedMarkupError};
use logos::Logos;
use serde::{Deserialize, Serialize};

/// A token as seen by the parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawToken {
    Text(String),
    /// Tag content with the delimiters and, for closing tags, the leading `/`
    /// removed.
    Tag { name: String, closing: bool },
}

/// Ordered tokens plus, if tokenizing stopped early, the reason.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<RawToken>,
    truncation: Option<MalformedMarkupError>,
}

impl TokenStream {
    pub fn tokens(&self) -> &[RawToken] {
        &self.tokens
    }

    /// Where and why input was dropped, if it was.
    pub fn truncation(&self) -> Option<MalformedMarkupError> {
        self.truncation
    }

    pub fn is_truncated(&self) -> bool {
        self.truncation.is_some()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Split markup into text and tag tokens.
pub fn tokenize(markup: &str) -> TokenStream {
    let mut lexer = Token::lexer(markup);
    let mut stream = TokenStream::default();

    while let Some(result) = lexer.next() {
        let token = match result {
            Ok(Token::Text) => RawToken::Text(lexer.slice().to_string()),
            Ok(Token::Tag) => {
                let slice = lexer.slice();
                tag_token(&slice[1..slice.len() - 1])
            }
            Err(()) => {
                let offset = lexer.span().start;
                let kind = if markup[offset..].starts_with("<>") {
                    MalformedKind::EmptyTag
                } else {
                    MalformedKind::UnterminatedTag
                };
                let truncation = MalformedMarkupError { offset, kind };
                log::warn!(target: "sml.lexing", "{}; dropping the rest of the input", truncation);
                stream.truncation = Some(truncation);
                break;
            }
        };
        log::trace!(target: "sml.lexing", "token: {:?}", token);
        stream.tokens.push(token);
    }

    stream
}

fn tag_token(body: &str) -> RawToken {
    match body.strip_prefix('/') {
        Some(name) => RawToken::Tag {
            name: name.to_string(),
            closing: true,
        },
        None => RawToken::Tag {
            name: body.to_string(),
            closing: false,
        },
    }
}
