//! Token definitions for sml markup
//!
//! The markup has exactly two lexical classes: a tag delimited by `<` and the
//! next `>`, and a stretch of text running up to the next `<`. A `<` that
//! starts neither (`<>`, or `<` with no `>` after it) is a lex error, which the
//! tokenizer treats as the end of usable input.
use logos::Logos;

/// All possible tokens in sml markup
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token {
    // Tag body may contain anything but `>`, including another `<`
    #[regex(r"<[^>]+>")]
    Tag,

    #[regex(r"[^<]+")]
    Text,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_and_text() {
        let mut lexer = Token::lexer("<B>bold</B>");
        assert_eq!(lexer.next(), Some(Ok(Token::Tag)));
        assert_eq!(lexer.slice(), "<B>");
        assert_eq!(lexer.next(), Some(Ok(Token::Text)));
        assert_eq!(lexer.slice(), "bold");
        assert_eq!(lexer.next(), Some(Ok(Token::Tag)));
        assert_eq!(lexer.slice(), "</B>");
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn test_text_keeps_whitespace() {
        let mut lexer = Token::lexer("  a \n b ");
        assert_eq!(lexer.next(), Some(Ok(Token::Text)));
        assert_eq!(lexer.slice(), "  a \n b ");
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn test_empty_tag_is_error() {
        let mut lexer = Token::lexer("<>");
        assert_eq!(lexer.next(), Some(Err(())));
    }

    #[test]
    fn test_unterminated_tag_is_error() {
        let mut lexer = Token::lexer("ab<B");
        assert_eq!(lexer.next(), Some(Ok(Token::Text)));
        assert_eq!(lexer.next(), Some(Err(())));
    }

    #[test]
    fn test_nested_open_bracket_belongs_to_tag() {
        let mut lexer = Token::lexer("<a<b>");
        assert_eq!(lexer.next(), Some(Ok(Token::Tag)));
        assert_eq!(lexer.slice(), "<a<b>");
        assert_eq!(lexer.next(), None);
    }
}
