//! Grammar for cfgl documents
//!
//! ```text
//! document    := element+
//! element     := declaration | map | sequence
//! declaration := NAME '=' value ';'
//! map         := '{' (pair (',' pair)*)? '}'
//! pair        := NAME ':' value
//! sequence    := '(' (value (',' value)*)? ')'
//! value       := NUMBER | map | sequence | CONST_REF
//! ```
//!
//! Elements are consumed greedily until the end of input. A bare scalar is a value but not
//! an element, so `5` alone does not parse.

use chumsky::prelude::*;

use super::combinators::{
    const_ref, map_literal, name, number, sequence_literal, token, ParserError, TokenSpan,
};
use crate::cfgl::ast::{Element, Node, Script};
use crate::cfgl::lexer::Token;

/// Parse a value: number, constant reference, map or sequence
pub fn value() -> impl Parser<TokenSpan, Node, Error = ParserError> + Clone {
    recursive(|value| {
        choice((
            number(),
            const_ref(),
            map_literal(value.clone()).map(Node::Map),
            sequence_literal(value).map(Node::Sequence),
        ))
    })
}

/// Parse a top-level element: declaration, map or sequence
pub fn element() -> impl Parser<TokenSpan, Element, Error = ParserError> + Clone {
    let value = value();

    let declaration = name()
        .then_ignore(token(Token::Equals))
        .then(value.clone())
        .then_ignore(token(Token::Semicolon))
        .map(|((name, span), value)| Element::Declaration { name, span, value });

    choice((
        declaration,
        map_literal(value.clone()).map(Element::Map),
        sequence_literal(value).map(Element::Sequence),
    ))
}

/// Parse a whole document
pub fn script() -> impl Parser<TokenSpan, Script, Error = ParserError> + Clone {
    element()
        .repeated()
        .at_least(1)
        .then_ignore(end())
        .map(|elements| Script { elements })
}
