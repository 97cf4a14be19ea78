//! Implementation of the cfgl lexer
//!
//! Tokenization itself is handled entirely by logos. This module adds the recovery rule:
//! when no token matches, exactly one character is reported and skipped, and lexing
//! resumes right after it.

use std::ops::Range;

use logos::Logos;

use crate::cfgl::lexer::tokens::{LexError, Token};

/// Type alias for token with span
pub type TokenSpan = (Token, Range<usize>);

/// Type alias for a rejected piece of input
pub type ErrorSpan = (LexError, Range<usize>);

/// Tokenize a string, collecting tokens and lexical errors with their byte spans
pub fn tokenize(source: &str) -> (Vec<TokenSpan>, Vec<ErrorSpan>) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut offset = 0;

    'restart: while offset < source.len() {
        let mut lexer = Token::lexer(&source[offset..]);

        while let Some(result) = lexer.next() {
            let span = lexer.span();
            let span = offset + span.start..offset + span.end;

            match result {
                Ok(token) => tokens.push((token, span)),
                Err(LexError::UnexpectedCharacter) => {
                    // A failed partial match (an unterminated comment, a lone `§`) can cover
                    // more than one character; only the first one is rejected.
                    let width = source[span.start..]
                        .chars()
                        .next()
                        .map_or(1, char::len_utf8);
                    let skipped = span.start..span.start + width;
                    errors.push((LexError::UnexpectedCharacter, skipped.clone()));
                    if span.end != skipped.end {
                        offset = skipped.end;
                        continue 'restart;
                    }
                }
                Err(reason) => errors.push((reason, span)),
            }
        }

        break;
    }

    (tokens, errors)
}

/// Convenience function to tokenize a string, dropping spans and errors
pub fn tokens_only(source: &str) -> Vec<Token> {
    tokenize(source).0.into_iter().map(|(t, _)| t).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfgl::lexer::tokens::Number;

    #[test]
    fn test_simple_tokenization() {
        let tokens = tokens_only("x = 5;");
        assert_eq!(
            tokens,
            vec![
                Token::Name("x".into()),
                Token::Equals,
                Token::Number(Number::Integer(5)),
                Token::Semicolon
            ]
        );
    }

    #[test]
    fn test_spans_are_byte_offsets() {
        let (tokens, errors) = tokenize("{ a: §b§ }");
        assert!(errors.is_empty());
        let spans: Vec<_> = tokens.into_iter().map(|(_, s)| s).collect();
        assert_eq!(spans, vec![0..1, 2..3, 3..4, 5..10, 11..12]);
    }

    #[test]
    fn test_unknown_character_is_skipped() {
        let (tokens, errors) = tokenize("x = 5; @ y = 6;");
        assert_eq!(errors, vec![(LexError::UnexpectedCharacter, 7..8)]);
        assert_eq!(tokens.len(), 8);
        assert_eq!(tokens[4], (Token::Name("y".into()), 9..10));
    }

    #[test]
    fn test_unterminated_comment_is_lexed_character_by_character() {
        let (tokens, errors) = tokenize("--[[ x");
        assert_eq!(
            errors,
            vec![
                (LexError::UnexpectedCharacter, 0..1),
                (LexError::UnexpectedCharacter, 1..2),
                (LexError::UnexpectedCharacter, 2..3),
                (LexError::UnexpectedCharacter, 3..4),
            ]
        );
        assert_eq!(tokens, vec![(Token::Name("x".into()), 5..6)]);
    }

    #[test]
    fn test_unclosed_const_ref_rejects_only_the_delimiter() {
        let (tokens, errors) = tokenize("§abc");
        assert_eq!(errors, vec![(LexError::UnexpectedCharacter, 0..2)]);
        assert_eq!(tokens, vec![(Token::Name("abc".into()), 2..5)]);
    }

    #[test]
    fn test_integer_out_of_range_skips_the_literal() {
        let (tokens, errors) = tokenize("( 123456789012345678901, 2 )");
        assert_eq!(errors, vec![(LexError::IntegerOutOfRange, 2..23)]);
        assert_eq!(
            tokens.into_iter().map(|(t, _)| t).collect::<Vec<_>>(),
            vec![
                Token::LParen,
                Token::Comma,
                Token::Number(Number::Integer(2)),
                Token::RParen
            ]
        );
    }

    #[test]
    fn test_multiline_comment_between_tokens() {
        let tokens = tokens_only("{ --[[ first\nsecond ]] a: 1 }");
        assert_eq!(
            tokens,
            vec![
                Token::LBrace,
                Token::Name("a".into()),
                Token::Colon,
                Token::Number(Number::Integer(1)),
                Token::RBrace
            ]
        );
    }
}
