//! Tokens produced by the emark lexer

use emark_error::span::{Span, Spanned};
#[cfg(feature = "serde")]
use serde::Serialize;
use std::fmt;

/// Every kind of token the markup grammar knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum TokenKind {
    /// `{` - opens a group
    OpenBrace,
    /// `}` - closes a group
    CloseBrace,
    /// `\em` - switch to emphasis
    ///
    /// The token text is `"}"`, not the command name. Downstream consumers
    /// have always seen that payload, so it is kept as is.
    EmCommand,
    /// A maximal run of chars that are none of `{`, `}` or `\`
    Text,
    /// End of input, returned forever once reached
    Eof,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::OpenBrace => "OpenBrace",
            TokenKind::CloseBrace => "CloseBrace",
            TokenKind::EmCommand => "EmCommand",
            TokenKind::Text => "Text",
            TokenKind::Eof => "Eof",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// A classified slice of the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Token<'src> {
    pub kind: TokenKind,
    /// Literal text of the token, or the fixed payload for `EmCommand`/`Eof`
    pub text: &'src str,
    pub span: Span,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, text: &'src str, span: Span) -> Self {
        Self { kind, text, span }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl Spanned for Token<'_> {
    fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({:?}) at {}:{}",
            self.kind, self.text, self.span.start.line, self.span.start.column
        )
    }
}
