//! Parser module for the cfgl language
//!
//! This module turns the lexer's token stream into a syntax tree using chumsky parser
//! combinators. Parsing is purely syntactic: constant references are kept as names and
//! resolved later by the evaluator.
//!
//! Submodules:
//!     combinators: token-level primitives and the map/sequence literals
//!     grammar: the recursive value grammar and the document entry point

pub mod combinators;
pub mod grammar;

pub use grammar::{element, script, value};

use chumsky::Parser;
use tracing::debug;

use crate::cfgl::ast::{Script, SourceLocation};
use crate::cfgl::diagnostics::Fault;
use crate::cfgl::lexer::{Token, TokenSpan};

/// Deepest bracket nesting accepted by [`parse`]. Every later stage recurses once per level.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Find the first opening bracket that nests deeper than `limit`.
///
/// Unbalanced closers never drive the depth below zero; the grammar reports them.
pub fn check_nesting(tokens: &[TokenSpan], limit: usize) -> Option<&TokenSpan> {
    let mut depth = 0usize;
    for pair in tokens {
        match pair.0 {
            Token::LParen | Token::LBrace => {
                depth += 1;
                if depth > limit {
                    return Some(pair);
                }
            }
            Token::RParen | Token::RBrace => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    None
}

/// Parse a token stream into a [`Script`].
///
/// `source` is only used to describe syntax faults (token text and line numbers). Input
/// nesting deeper than [`MAX_NESTING_DEPTH`] is rejected before the grammar runs.
pub fn parse(tokens: Vec<TokenSpan>, source: &str) -> Result<Script, Vec<Fault>> {
    let count = tokens.len();
    if let Some((_, span)) = check_nesting(&tokens, MAX_NESTING_DEPTH) {
        let loc = SourceLocation::new(source);
        debug!(limit = MAX_NESTING_DEPTH, "nesting too deep");
        return Err(vec![Fault::nesting_too_deep(
            MAX_NESTING_DEPTH,
            span.clone(),
            &loc,
        )]);
    }
    match script().parse(tokens) {
        Ok(script) => {
            debug!(tokens = count, elements = script.elements.len(), "parsed script");
            Ok(script)
        }
        Err(errors) => {
            let loc = SourceLocation::new(source);
            let mut faults: Vec<Fault> = errors
                .iter()
                .map(|error| Fault::syntax(error.found(), &loc))
                .collect();
            faults.dedup();
            debug!(faults = faults.len(), "parse failed");
            Err(faults)
        }
    }
}
