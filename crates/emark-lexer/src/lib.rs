//! emark-lexer - Lexer for a small LaTeX-style markup
//!
//! The grammar has four kinds of lexeme:
//!
//! - `{` and `}` delimit groups
//! - `\em` switches to emphasis
//! - everything else is plain text, read as the longest possible run
//!
//! Any other backslash sequence is a [`SyntaxError`].
//!
//! # Example
//!
//! ```rust
//! use emark_lexer::{Lexer, TokenKind};
//!
//! let mut lexer = Lexer::new("plain {\\em loud}", 0);
//! let tokens = lexer.tokenize().unwrap();
//!
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     [
//!         TokenKind::Text,
//!         TokenKind::OpenBrace,
//!         TokenKind::EmCommand,
//!         TokenKind::Text,
//!         TokenKind::CloseBrace,
//!         TokenKind::Eof,
//!     ]
//! );
//! ```

pub mod error;
pub mod lexer;
pub mod token;

pub use error::SyntaxError;
pub use lexer::{tokenize, Lexer};
pub use token::{Token, TokenKind};
