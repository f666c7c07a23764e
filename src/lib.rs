//! # sml
//!
//! Conversion between SML, a small nested tag markup for styled text, and a
//! sequence of style-annotated text runs.
//!
//! Markup is tokenized, parsed into runs under a stack of style states,
//! compacted so that no two neighbouring runs share a state, and written back
//! out with a short sequence of nested open and close tags.

pub mod sml;
