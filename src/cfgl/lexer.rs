//! Lexer module for the cfgl language
//!
//! This module orchestrates tokenization:
//! 1. Core tokenization using the logos lexer (see [tokens])
//! 2. Recovery from unmatched input, one character at a time (see [lexer_impl])
//! 3. Conversion of rejected input into line-numbered [`Fault`]s
//!
//! The lexer never fails outright. Rejected characters become lexical faults next to the
//! token stream, and the parser decides whether what is left still makes sense.

pub mod lexer_impl;
pub mod tokens;

pub use lexer_impl::{tokenize, tokens_only, TokenSpan};
pub use tokens::{LexError, Number, Token};

use tracing::{debug, warn};

use crate::cfgl::ast::SourceLocation;
use crate::cfgl::diagnostics::Fault;

/// Result of lexing a source: tokens with byte spans, plus recorded lexical faults
#[derive(Debug, Clone, PartialEq)]
pub struct Lexed {
    pub tokens: Vec<TokenSpan>,
    pub faults: Vec<Fault>,
}

/// Main lexer function that returns tokens with their locations and any lexical faults
pub fn lex(source: &str) -> Lexed {
    let (tokens, errors) = tokenize(source);
    let loc = SourceLocation::new(source);

    let faults: Vec<Fault> = errors
        .into_iter()
        .map(|(reason, span)| Fault::lexical(reason, span, &loc))
        .collect();

    for fault in &faults {
        warn!(%fault, "recovered from lexical error");
    }
    debug!(tokens = tokens.len(), faults = faults.len(), "lexed source");

    Lexed { tokens, faults }
}
