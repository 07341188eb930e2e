//! Span - where a token or error sits in the source
//!
//! Positions count lines and columns from 1 and keep the byte offset
//! alongside, so a span can both slice the source and be shown to a user.

#[cfg(feature = "serde")]
use serde::Serialize;

/// A single point in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Position {
    /// Line (1-indexed)
    pub line: u32,
    /// Column in chars (1-indexed)
    pub column: u32,
    /// Byte offset from the beginning of the source
    pub offset: usize,
}

impl Position {
    pub fn new(line: u32, column: u32, offset: usize) -> Self {
        Self { line, column, offset }
    }

    /// Position of the first char of a source
    pub fn start() -> Self {
        Self::new(1, 1, 0)
    }

    /// Returns the position just past `ch`
    pub fn advance(self, ch: char) -> Self {
        let offset = self.offset + ch.len_utf8();
        if ch == '\n' {
            Self::new(self.line + 1, 1, offset)
        } else {
            Self::new(self.line, self.column + 1, offset)
        }
    }

    /// Returns the position just past every char of `text`
    pub fn advance_str(self, text: &str) -> Self {
        text.chars().fold(self, Position::advance)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

/// A region of one source file, `start` inclusive and `end` exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Span {
    pub start: Position,
    pub end: Position,
    /// Id handed out by [`SourceCache::add`](crate::SourceCache::add)
    pub file_id: u32,
}

impl Span {
    pub fn new(start: Position, end: Position, file_id: u32) -> Self {
        Self { start, end, file_id }
    }

    /// An empty span at `pos`
    pub fn point(pos: Position, file_id: u32) -> Self {
        Self::new(pos, pos, file_id)
    }

    /// Smallest span covering both `self` and `other`
    pub fn merge(self, other: Span) -> Span {
        debug_assert_eq!(self.file_id, other.file_id, "spans belong to different files");
        let start = if other.start.offset < self.start.offset {
            other.start
        } else {
            self.start
        };
        let end = if other.end.offset > self.end.offset {
            other.end
        } else {
            self.end
        };
        Span::new(start, end, self.file_id)
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The slice of `source` this span covers, if it lies on char boundaries
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start.offset..self.end.offset)
    }
}

/// Anything that can point back into the source
pub trait Spanned {
    fn span(&self) -> Span;
}
