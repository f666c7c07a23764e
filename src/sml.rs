//! Main module for sml library functionality
//!
//! Markup flows through the stages in this order:
//!
//! ```text
//! markup --lexing--> tokens --parsing--> document --compaction--> document --emitting--> markup
//! ```
//!
//! [`processor::convert`] runs all of them at once.

pub mod compaction;
pub mod config;
pub mod document;
pub mod emitting;
pub mod error;
pub mod lexing;
pub mod parsing;
pub mod processor;
pub mod style;

pub use compaction::compact;
pub use document::{Document, Run};
pub use emitting::{diff, emit, transition_cost, TagEdit, TagStack};
pub use error::{MalformedKind, MalformedMarkupError, ProcessingError, UnknownTagError};
pub use lexing::{tokenize, RawToken, TokenStream};
pub use parsing::{parse, StyleStack};
pub use processor::{convert, Conversion, OutputFormat};
pub use style::{apply, Color, StyleState};
