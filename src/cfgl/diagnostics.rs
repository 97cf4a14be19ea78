//! Faults raised while compiling cfgl source
//!
//! Four classes of fault exist:
//!
//!     Lexical: a character (or an out-of-range integer literal) matched no token rule. The
//!         lexer skips it and keeps going, so the fault is recorded and compilation continues.
//!     Syntax: the token stream does not fit the grammar, or brackets nest deeper than the
//!         compiler accepts. Fatal, no document is produced.
//!     UndefinedConstant: a `§name§` reference with no live binding. The slot becomes null,
//!         the fault is recorded and compilation continues with a degraded document.
//!     EmptyInput: nothing to compile. Raised before lexing; fatal.
//!
//! Faults carry byte spans into the source and one-based line numbers. [`Fault::render`]
//! turns a fault into a source-annotated report for terminals.

use std::ops::Range;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::cfgl::ast::SourceLocation;
use crate::cfgl::lexer::tokens::{LexError, Token};

/// Coarse classification of a [`Fault`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultClass {
    Lexical,
    Syntax,
    UndefinedConstant,
    EmptyInput,
}

/// A single diagnostic produced during compilation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Fault {
    #[error("lexical error at line {line}: {}", lexical_message(.reason, .text))]
    Lexical {
        reason: LexError,
        text: String,
        line: usize,
        span: Range<usize>,
    },

    #[error("syntax error at line {line}: unexpected {kind} ('{text}')")]
    UnexpectedToken {
        kind: &'static str,
        text: String,
        line: usize,
        span: Range<usize>,
    },

    #[error("syntax error: unexpected end of input")]
    UnexpectedEnd { offset: usize },

    #[error("syntax error at line {line}: nesting exceeds {limit} levels")]
    NestingTooDeep {
        limit: usize,
        line: usize,
        span: Range<usize>,
    },

    #[error("undefined constant '{name}' at line {line}")]
    UndefinedConstant {
        name: String,
        line: usize,
        span: Range<usize>,
    },

    #[error("input is empty")]
    EmptyInput,
}

fn lexical_message(reason: &LexError, text: &str) -> String {
    match reason {
        LexError::UnexpectedCharacter => format!("unexpected character '{}'", text),
        LexError::IntegerOutOfRange => format!("integer literal '{}' is out of range", text),
    }
}

impl Fault {
    /// Build a lexical fault for the given byte span
    pub fn lexical(reason: LexError, span: Range<usize>, loc: &SourceLocation<'_>) -> Self {
        Fault::Lexical {
            reason,
            text: loc.slice(&span).to_string(),
            line: loc.line_number(span.start),
            span,
        }
    }

    /// Build a syntax fault for an offending token, or for the end of input when `found` is
    /// `None`
    pub fn syntax(found: Option<&(Token, Range<usize>)>, loc: &SourceLocation<'_>) -> Self {
        match found {
            Some((token, span)) => Fault::UnexpectedToken {
                kind: token.kind_name(),
                text: loc.slice(span).to_string(),
                line: loc.line_number(span.start),
                span: span.clone(),
            },
            None => Fault::UnexpectedEnd {
                offset: loc.end_offset(),
            },
        }
    }

    /// Build a nesting fault for the opening bracket at `span`
    pub fn nesting_too_deep(limit: usize, span: Range<usize>, loc: &SourceLocation<'_>) -> Self {
        Fault::NestingTooDeep {
            limit,
            line: loc.line_number(span.start),
            span,
        }
    }

    /// Build an undefined-constant fault for a reference at `span`
    pub fn undefined_constant(
        name: impl Into<String>,
        span: Range<usize>,
        loc: &SourceLocation<'_>,
    ) -> Self {
        Fault::UndefinedConstant {
            name: name.into(),
            line: loc.line_number(span.start),
            span,
        }
    }

    pub fn class(&self) -> FaultClass {
        match self {
            Fault::Lexical { .. } => FaultClass::Lexical,
            Fault::UnexpectedToken { .. }
            | Fault::UnexpectedEnd { .. }
            | Fault::NestingTooDeep { .. } => FaultClass::Syntax,
            Fault::UndefinedConstant { .. } => FaultClass::UndefinedConstant,
            Fault::EmptyInput => FaultClass::EmptyInput,
        }
    }

    /// Fatal faults abort compilation; the others are recorded and compilation continues
    pub fn is_fatal(&self) -> bool {
        matches!(self.class(), FaultClass::Syntax | FaultClass::EmptyInput)
    }

    /// Byte span of the offending source, if the fault points at one
    pub fn span(&self) -> Option<Range<usize>> {
        match self {
            Fault::Lexical { span, .. }
            | Fault::UnexpectedToken { span, .. }
            | Fault::NestingTooDeep { span, .. }
            | Fault::UndefinedConstant { span, .. } => Some(span.clone()),
            Fault::UnexpectedEnd { offset } => Some(*offset..*offset),
            Fault::EmptyInput => None,
        }
    }

    fn label(&self) -> String {
        match self {
            Fault::Lexical {
                reason: LexError::UnexpectedCharacter,
                ..
            } => "no token starts with this character".to_string(),
            Fault::Lexical {
                reason: LexError::IntegerOutOfRange,
                ..
            } => "does not fit in a 64-bit integer".to_string(),
            Fault::UnexpectedToken { kind, .. } => format!("{} is not allowed here", kind),
            Fault::UnexpectedEnd { .. } => "input ends here".to_string(),
            Fault::NestingTooDeep { limit, .. } => format!("this opens level {}", limit + 1),
            Fault::UndefinedConstant { name, .. } => {
                format!("'{}' is not declared before this point", name)
            }
            Fault::EmptyInput => String::new(),
        }
    }

    /// Render the fault as a source-annotated report.
    ///
    /// `origin` names the input (a path or `<stdin>`). Faults without a span fall back to a
    /// single `error: ...` line.
    pub fn render(&self, source: &str, origin: &str, color: bool) -> String {
        let plain = format!("error: {}\n", self);
        let Some(span) = self.span() else {
            return plain;
        };

        let loc = SourceLocation::new(source);
        let mut chars = loc.char_range(&span);
        if chars.is_empty() {
            // Point at the last character rather than past the end of the source
            chars = chars.start.saturating_sub(1)..chars.start;
        }

        let origin = origin.to_string();
        let report = Report::build(ReportKind::Error, origin.clone(), chars.start)
            .with_config(Config::default().with_color(color))
            .with_message(self.to_string())
            .with_label(
                Label::new((origin.clone(), chars))
                    .with_message(self.label())
                    .with_color(Color::Red),
            )
            .finish();

        let mut output = Vec::new();
        match report.write((origin, Source::from(source)), &mut output) {
            Ok(()) => String::from_utf8_lossy(&output).into_owned(),
            Err(_) => plain,
        }
    }
}

/// Render every fault in order, one report after the other
pub fn render_all(faults: &[Fault], source: &str, origin: &str, color: bool) -> String {
    faults
        .iter()
        .map(|fault| fault.render(source, origin, color))
        .collect()
}
