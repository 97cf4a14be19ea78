//! Parser combinator functions for building the cfgl parser.
//!
//! The parser consumes `(Token, byte-span)` pairs, so every primitive here matches on the
//! token and keeps the span when the node needs it.

use chumsky::prelude::*;
use std::ops::Range;

use crate::cfgl::ast::{Node, Pair};
pub use crate::cfgl::lexer::TokenSpan;
use crate::cfgl::lexer::Token;

/// Type alias for parser error
pub type ParserError = Simple<TokenSpan>;

/// Helper: match a specific token type, ignoring the span
pub(crate) fn token(t: Token) -> impl Parser<TokenSpan, (), Error = ParserError> + Clone {
    filter(move |(tok, _): &TokenSpan| tok == &t).ignored()
}

/// An identifier with its span
pub(crate) fn name() -> impl Parser<TokenSpan, (String, Range<usize>), Error = ParserError> + Clone
{
    select! { (Token::Name(name), span) => (name, span) }
}

/// A numeric literal
pub(crate) fn number() -> impl Parser<TokenSpan, Node, Error = ParserError> + Clone {
    select! { (Token::Number(value), span) => Node::Number { value, span } }
}

/// A `§name§` constant reference
pub(crate) fn const_ref() -> impl Parser<TokenSpan, Node, Error = ParserError> + Clone {
    select! { (Token::ConstRef(name), span) => Node::ConstRef { name, span } }
}

/// `{ pair (, pair)* }`, where pair is `NAME : value`. Empty maps are allowed, trailing
/// commas are not.
pub(crate) fn map_literal<P>(
    value: P,
) -> impl Parser<TokenSpan, Vec<Pair>, Error = ParserError> + Clone
where
    P: Parser<TokenSpan, Node, Error = ParserError> + Clone,
{
    let pair = name()
        .then_ignore(token(Token::Colon))
        .then(value)
        .map(|((key, span), value)| Pair { key, span, value });

    token(Token::LBrace)
        .ignore_then(pair.separated_by(token(Token::Comma)))
        .then_ignore(token(Token::RBrace))
}

/// `( value (, value)* )`. Empty sequences are allowed, trailing commas are not.
pub(crate) fn sequence_literal<P>(
    value: P,
) -> impl Parser<TokenSpan, Vec<Node>, Error = ParserError> + Clone
where
    P: Parser<TokenSpan, Node, Error = ParserError> + Clone,
{
    token(Token::LParen)
        .ignore_then(value.separated_by(token(Token::Comma)))
        .then_ignore(token(Token::RParen))
}
