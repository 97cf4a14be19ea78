//! Position tracking for source locations
//!
//! The lexer pairs every token with a **byte range** into the source. Diagnostics need
//! human positions instead, so [`SourceLocation`] pre-computes the byte offset of every
//! line start once and answers conversions with a binary search:
//!
//! ```text
//! Source: "x = 1;\n{ a: §x§ }"
//! line_starts = [0, 7]
//! byte_to_position(9) -> Position { line: 1, column: 2 }
//! ```
//!
//! Positions are zero-based. [`SourceLocation::line_number`] gives the one-based line used in
//! messages. Columns are counted in bytes; [`SourceLocation::char_offset`] converts a byte
//! offset to the character offset that report renderers expect.

use std::fmt;
use std::ops::Range;

/// Represents a position in source code (line and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Provides fast conversion from byte offsets to line/column positions
#[derive(Debug, Clone)]
pub struct SourceLocation<'a> {
    source: &'a str,
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
}

impl<'a> SourceLocation<'a> {
    /// Create a new SourceLocation from source code
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];

        for (byte_pos, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(byte_pos + 1);
            }
        }

        Self {
            source,
            line_starts,
        }
    }

    /// Convert a byte offset to a line/column position
    pub fn byte_to_position(&self, byte_offset: usize) -> Position {
        let byte_offset = byte_offset.min(self.source.len());
        let line = self
            .line_starts
            .binary_search(&byte_offset)
            .unwrap_or_else(|i| i - 1);

        let column = byte_offset - self.line_starts[line];

        Position::new(line, column)
    }

    /// One-based line number of the line holding `byte_offset`
    pub fn line_number(&self, byte_offset: usize) -> usize {
        self.byte_to_position(byte_offset).line + 1
    }

    /// Convert a byte offset to a character offset
    pub fn char_offset(&self, byte_offset: usize) -> usize {
        let byte_offset = byte_offset.min(self.source.len());
        self.source
            .char_indices()
            .take_while(|(i, _)| *i < byte_offset)
            .count()
    }

    /// Convert a byte range to a character range
    pub fn char_range(&self, range: &Range<usize>) -> Range<usize> {
        self.char_offset(range.start)..self.char_offset(range.end)
    }

    /// Source text covered by a byte range, empty when the range is out of bounds
    pub fn slice(&self, range: &Range<usize>) -> &'a str {
        self.source.get(range.clone()).unwrap_or("")
    }

    /// Byte offset just past the end of the source
    pub fn end_offset(&self) -> usize {
        self.source.len()
    }
}
