//! Lexer errors

use emark_error::{Diagnostic, ErrorCode, Span, Spanned};
use thiserror::Error;

/// A backslash that does not start `\em`
///
/// This is the only way lexing can fail. The lexer does not recover from it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error at {remaining:?}")]
pub struct SyntaxError {
    /// Unconsumed input following the backslash
    pub remaining: String,
    /// Covers the offending backslash
    pub span: Span,
}

impl SyntaxError {
    pub fn new(remaining: impl Into<String>, span: Span) -> Self {
        Self {
            remaining: remaining.into(),
            span,
        }
    }

    /// Renders the error as a diagnostic pointing at the backslash
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic = Diagnostic::error("unknown escape sequence")
            .with_code(ErrorCode::INVALID_ESCAPE)
            .with_label(self.span, "expected `\\em`");

        let diagnostic = match self.remaining.chars().next() {
            None => diagnostic.with_note("input ends right after the backslash"),
            Some(c) => diagnostic.with_note(format!("found `\\{}`", c)),
        };
        diagnostic.with_help("the only supported command is `\\em`")
    }
}

impl Spanned for SyntaxError {
    fn span(&self) -> Span {
        self.span
    }
}

impl From<&SyntaxError> for Diagnostic {
    fn from(err: &SyntaxError) -> Self {
        err.to_diagnostic()
    }
}
