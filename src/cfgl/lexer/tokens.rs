//! Token definitions for the cfgl language
//!
//! This module defines all the tokens that can be produced by the cfgl lexer.
//! The tokens are defined using the logos derive macro for efficient tokenization.
//! Whitespace (space, tab, newline) and `--[[ ... ]]` block comments are skipped by
//! logos itself and never surface as tokens.
use logos::{Lexer, Logos};
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Delimiter wrapped around constant references: `§name§`
pub const CONST_DELIMITER: char = '§';

/// Reasons the lexer can reject a piece of input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum LexError {
    /// No token rule matches at this position
    #[default]
    UnexpectedCharacter,
    /// An integer literal that does not fit in 64 bits
    IntegerOutOfRange,
}

/// A decoded numeric literal.
///
/// Literals carrying a decimal point or an exponent decode to `Float`, everything else to
/// `Integer`. Equality and hashing compare floats bitwise so the token can be used as
/// parser input.
#[derive(Debug, Clone, Copy, Serialize)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Number::Integer(i) => {
                0u8.hash(state);
                i.hash(state);
            }
            Number::Float(f) => {
                1u8.hash(state);
                f.to_bits().hash(state);
            }
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(x) => write!(f, "{:?}", x),
        }
    }
}

/// All possible tokens in the cfgl language
#[derive(Logos, Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[logos(error = LexError)]
#[logos(skip r"[ \t\n]+")]
#[logos(skip r"--\[\[([^\]]|\][^\]])*\]\]")]
pub enum Token {
    // Constant reference, delimiters stripped
    #[regex(r"§[a-zA-Z_]+§", const_name)]
    ConstRef(String),

    // Identifiers: letters and underscores only
    #[regex(r"[a-zA-Z_]+", |lex| lex.slice().to_string())]
    Name(String),

    #[regex(r"-?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][-+]?[0-9]+)?", decode_number)]
    Number(Number),

    // Structural tokens
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("=")]
    Equals,
}

fn const_name(lex: &mut Lexer<Token>) -> String {
    lex.slice().trim_matches(CONST_DELIMITER).to_string()
}

fn decode_number(lex: &mut Lexer<Token>) -> Result<Number, LexError> {
    let raw = lex.slice();
    if raw.contains(['.', 'e', 'E']) {
        // The regex only admits well-formed float syntax
        raw.parse::<f64>()
            .map(Number::Float)
            .map_err(|_| LexError::UnexpectedCharacter)
    } else {
        raw.parse::<i64>()
            .map(Number::Integer)
            .map_err(|_| LexError::IntegerOutOfRange)
    }
}

impl Token {
    /// Name of the token kind, as used in syntax diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::ConstRef(_) => "ConstRef",
            Token::Name(_) => "Name",
            Token::Number(_) => "Number",
            Token::LBrace => "LBrace",
            Token::RBrace => "RBrace",
            Token::LParen => "LParen",
            Token::RParen => "RParen",
            Token::Colon => "Colon",
            Token::Comma => "Comma",
            Token::Semicolon => "Semicolon",
            Token::Equals => "Equals",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::ConstRef(name) => write!(f, "<const-ref:{}>", name),
            Token::Name(name) => write!(f, "<name:{}>", name),
            Token::Number(n) => write!(f, "<number:{}>", n),
            Token::LBrace => write!(f, "<lbrace>"),
            Token::RBrace => write!(f, "<rbrace>"),
            Token::LParen => write!(f, "<lparen>"),
            Token::RParen => write!(f, "<rparen>"),
            Token::Colon => write!(f, "<colon>"),
            Token::Comma => write!(f, "<comma>"),
            Token::Semicolon => write!(f, "<semicolon>"),
            Token::Equals => write!(f, "<equals>"),
        }
    }
}
