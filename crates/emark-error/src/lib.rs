//! emark-error - Source locations and diagnostics for emark
//!
//! Lexer errors are turned into [`Diagnostic`]s and rendered against the
//! sources registered in a [`SourceCache`].
//!
//! # Example
//!
//! ```rust
//! use emark_error::{Diagnostic, DiagnosticRenderer, ErrorCode, SourceCache};
//! use emark_error::span::{Position, Span};
//!
//! let mut cache = SourceCache::new();
//! let file_id = cache.add("notes.tex", "see \\bf{this}");
//!
//! let span = Span::new(Position::new(1, 5, 4), Position::new(1, 6, 5), file_id);
//! let diagnostic = Diagnostic::error("unknown escape sequence")
//!     .with_code(ErrorCode::INVALID_ESCAPE)
//!     .with_label(span, "expected `\\em`");
//!
//! let renderer = DiagnosticRenderer::new(&cache).without_colors();
//! assert!(renderer.render(&diagnostic).contains("notes.tex:1:5"));
//! ```

pub mod diagnostic;
pub mod span;

pub use diagnostic::{Diagnostic, DiagnosticRenderer, ErrorCode, Label, Level, SourceCache, SourceFile};
pub use span::{Position, Span, Spanned};
