//! Style states and tag application
//!
//! A [`StyleState`] is the complete set of decorations active for a run of
//! text. States are plain values: applying a tag never mutates its input, it
//! produces a new state. Tag content may hold several space separated tokens,
//! which are applied left to right. Only the space character separates tokens.
//!
//! Emphasis is a toggle, and the toggle is always computed from the state the
//! call started with. `apply(s, "EM EM")` therefore flips emphasis once, while
//! two separate calls flip it twice.

use crate::sml::error::UnknownTagError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest underline level; further `U` tags saturate here.
pub const MAX_UNDERLINE: u8 = 3;

/// Text color. `Default` is the sentinel for "no color tag in effect".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[default]
    Default,
    White,
    Red,
    Green,
    Blue,
    Cyan,
    Magenta,
    Yellow,
    Black,
}

impl Color {
    /// Every concrete color, in tag-letter order.
    pub const ALL: [Color; 8] = [
        Color::White,
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Cyan,
        Color::Magenta,
        Color::Yellow,
        Color::Black,
    ];

    /// Map a tag token (`w`, `r`, ...) to its color.
    pub fn from_tag(tag: &str) -> Option<Color> {
        match tag {
            "w" => Some(Color::White),
            "r" => Some(Color::Red),
            "g" => Some(Color::Green),
            "b" => Some(Color::Blue),
            "c" => Some(Color::Cyan),
            "m" => Some(Color::Magenta),
            "y" => Some(Color::Yellow),
            "k" => Some(Color::Black),
            _ => None,
        }
    }

    /// The tag token that selects this color. `Default` has none.
    pub fn tag(self) -> Option<&'static str> {
        match self {
            Color::Default => None,
            Color::White => Some("w"),
            Color::Red => Some("r"),
            Color::Green => Some("g"),
            Color::Blue => Some("b"),
            Color::Cyan => Some("c"),
            Color::Magenta => Some("m"),
            Color::Yellow => Some("y"),
            Color::Black => Some("k"),
        }
    }

    /// Check whether a tag name is one of the color tokens
    pub fn is_color_tag(tag: &str) -> bool {
        Color::from_tag(tag).is_some()
    }

    fn letter(self) -> char {
        match self {
            Color::Default => '_',
            other => other
                .tag()
                .and_then(|t| t.chars().next())
                .map(|c| c.to_ascii_uppercase())
                .unwrap_or('_'),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// The full decoration state of a run. Always fully specified.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StyleState {
    pub bold: bool,
    pub emphasis: bool,
    pub italic: bool,
    pub strike: bool,
    /// Typewriter text: the run keeps its text as one unsplit token.
    pub literal: bool,
    pub underline: u8,
    pub size: u8,
    pub color: Color,
}

impl StyleState {
    /// The state before any tag has been applied.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the (possibly space separated) tag content to this state.
    pub fn apply(&self, tag: &str) -> Result<StyleState, UnknownTagError> {
        apply(self, tag)
    }
}

/// Two states are equal when every attribute matches, except that emphasis is
/// not compared when either side is literal.
impl PartialEq for StyleState {
    fn eq(&self, other: &Self) -> bool {
        let emphasis_matters = !(self.literal || other.literal);
        self.bold == other.bold
            && (!emphasis_matters || self.emphasis == other.emphasis)
            && self.italic == other.italic
            && self.strike == other.strike
            && self.literal == other.literal
            && self.underline == other.underline
            && self.size == other.size
            && self.color == other.color
    }
}

impl Eq for StyleState {}

/// Compute the state produced by applying `tag` to `src`.
///
/// `src` is never modified. An unrecognized token anywhere in `tag` fails the
/// whole call; no partially applied state is returned.
pub fn apply(src: &StyleState, tag: &str) -> Result<StyleState, UnknownTagError> {
    let mut out = *src;
    let mut applied = 0usize;

    for token in tag.split(' ').filter(|token| !token.is_empty()) {
        match token {
            "B" => out.bold = true,
            // toggle relative to the call's input, not to `out`
            "EM" | "Em" => out.emphasis = !src.emphasis,
            "I" => out.italic = true,
            "S" => out.strike = true,
            "TT" => out.literal = true,
            "U" => out.underline = out.underline.saturating_add(1).min(MAX_UNDERLINE),
            "PL" => {
                out.underline = 0;
                out.bold = false;
                out.emphasis = false;
                out.strike = false;
                out.literal = false;
            }
            _ => {
                if let Some(size) = size_digit(token) {
                    out.size = size;
                } else if let Some(color) = Color::from_tag(token) {
                    out.color = color;
                } else {
                    return Err(UnknownTagError::new(token));
                }
            }
        }
        applied += 1;
    }

    if applied == 0 {
        return Err(UnknownTagError::new(tag));
    }
    Ok(out)
}

fn size_digit(token: &str) -> Option<u8> {
    match token.as_bytes() {
        [d @ b'0'..=b'9'] => Some(*d - b'0'),
        _ => None,
    }
}

fn underline_glyph(level: u8) -> char {
    match level {
        0 => '|',
        1 => '-',
        2 => '=',
        _ => '≡',
    }
}

fn flag(set: bool, on: char) -> char {
    if set {
        on
    } else {
        on.to_ascii_lowercase()
    }
}

/// Compact one-line rendering used in diagnostics, e.g. `Beist|0R`.
impl fmt::Display for StyleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}{}{}{}",
            flag(self.bold, 'B'),
            flag(self.emphasis, 'E'),
            flag(self.italic, 'I'),
            flag(self.strike, 'S'),
            flag(self.literal, 'T'),
            underline_glyph(self.underline),
            self.size,
            self.color
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_state() {
        let state = StyleState::new();
        assert!(!state.bold);
        assert!(!state.emphasis);
        assert_eq!(state.underline, 0);
        assert_eq!(state.size, 0);
        assert_eq!(state.color, Color::Default);
    }

    #[rstest]
    #[case("B", StyleState { bold: true, ..StyleState::new() })]
    #[case("I", StyleState { italic: true, ..StyleState::new() })]
    #[case("S", StyleState { strike: true, ..StyleState::new() })]
    #[case("TT", StyleState { literal: true, ..StyleState::new() })]
    #[case("U", StyleState { underline: 1, ..StyleState::new() })]
    #[case("7", StyleState { size: 7, ..StyleState::new() })]
    #[case("w", StyleState { color: Color::White, ..StyleState::new() })]
    #[case("k", StyleState { color: Color::Black, ..StyleState::new() })]
    fn test_single_tag(#[case] tag: &str, #[case] expected: StyleState) {
        assert_eq!(apply(&StyleState::new(), tag).unwrap(), expected);
    }

    #[test]
    fn test_every_color_letter_round_trips() {
        for color in Color::ALL {
            let tag = color.tag().unwrap();
            assert_eq!(Color::from_tag(tag), Some(color));
            assert!(Color::is_color_tag(tag));
        }
        assert_eq!(Color::Default.tag(), None);
    }

    #[test]
    fn test_underline_saturates() {
        let mut state = StyleState::new();
        for _ in 0..5 {
            state = apply(&state, "U").unwrap();
        }
        assert_eq!(state.underline, MAX_UNDERLINE);
    }

    #[test]
    fn test_emphasis_toggles_per_call() {
        let once = apply(&StyleState::new(), "EM").unwrap();
        assert!(once.emphasis);
        let twice = apply(&once, "EM").unwrap();
        assert!(!twice.emphasis);
        let thrice = apply(&twice, "EM").unwrap();
        assert!(thrice.emphasis);
    }

    #[test]
    fn test_emphasis_toggle_uses_call_input() {
        let state = apply(&StyleState::new(), "EM EM").unwrap();
        assert!(state.emphasis);
    }

    #[test]
    fn test_plain_resets_decorations_only() {
        let state = StyleState {
            bold: true,
            emphasis: true,
            italic: true,
            strike: true,
            literal: true,
            underline: 2,
            size: 4,
            color: Color::Cyan,
        };
        let plain = apply(&state, "PL").unwrap();
        assert!(!plain.bold && !plain.emphasis && !plain.strike && !plain.literal);
        assert_eq!(plain.underline, 0);
        assert!(plain.italic);
        assert_eq!(plain.size, 4);
        assert_eq!(plain.color, Color::Cyan);
    }

    #[test]
    fn test_multiple_tokens_compose() {
        let state = apply(&StyleState::new(), "B r 3").unwrap();
        assert!(state.bold);
        assert_eq!(state.color, Color::Red);
        assert_eq!(state.size, 3);
    }

    #[test]
    fn test_apply_does_not_mutate_input() {
        let src = StyleState::new();
        let _ = apply(&src, "B").unwrap();
        assert!(!src.bold);
    }

    #[rstest]
    #[case("X")]
    #[case("10")]
    #[case("R")]
    #[case("b q")]
    #[case("   ")]
    fn test_unknown_tag(#[case] tag: &str) {
        assert!(apply(&StyleState::new(), tag).is_err());
    }

    #[test]
    fn test_only_spaces_separate_tokens() {
        let state = apply(&StyleState::new(), "  B   r ").unwrap();
        assert!(state.bold);
        assert_eq!(state.color, Color::Red);

        let err = apply(&StyleState::new(), "B\tr").unwrap_err();
        assert_eq!(err.tag, "B\tr");
        assert!(apply(&StyleState::new(), "B\nr").is_err());
    }

    #[test]
    fn test_unknown_tag_names_offending_token() {
        let err = apply(&StyleState::new(), "B zz").unwrap_err();
        assert_eq!(err.tag, "zz");
    }

    #[test]
    fn test_equality_ignores_emphasis_for_literal() {
        let a = StyleState {
            literal: true,
            emphasis: true,
            ..StyleState::new()
        };
        let b = StyleState {
            literal: true,
            ..StyleState::new()
        };
        assert_eq!(a, b);

        let c = StyleState {
            emphasis: true,
            ..StyleState::new()
        };
        assert_ne!(c, StyleState::new());
    }

    #[test]
    fn test_display() {
        let state = StyleState {
            bold: true,
            underline: 3,
            size: 2,
            color: Color::Red,
            ..StyleState::new()
        };
        assert_eq!(state.to_string(), "Beist≡2R");
        assert_eq!(StyleState::new().to_string(), "beist|0_");
    }
}
