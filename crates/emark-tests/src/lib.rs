//! Integration tests for emark
//!
//! Runs sources through the whole pipeline:
//! Source → SourceCache → Lexer → Diagnostic rendering

use emark_error::{DiagnosticRenderer, SourceCache};
use emark_lexer::{Lexer, SyntaxError, TokenKind};
use std::path::Path;

/// Result of lexing one source
#[derive(Debug)]
pub struct LexResult {
    pub success: bool,
    /// Tokens read before the end of input or the first error
    pub tokens: Vec<(TokenKind, String)>,
    pub error: Option<SyntaxError>,
    /// Colorless rendering of the error diagnostic
    pub rendered: Option<String>,
}

/// Lexes `source` as if it were a file called `name`
pub fn lex_named(name: &str, source: &str) -> LexResult {
    let mut cache = SourceCache::new();
    let file_id = cache.add(name, source);

    let mut tokens = Vec::new();
    for result in Lexer::new(source, file_id) {
        match result {
            Ok(token) => tokens.push((token.kind, token.text.to_string())),
            Err(err) => {
                let renderer = DiagnosticRenderer::new(&cache).without_colors();
                let rendered = renderer.render(&err.to_diagnostic());
                return LexResult {
                    success: false,
                    tokens,
                    error: Some(err),
                    rendered: Some(rendered),
                };
            }
        }
    }

    LexResult {
        success: true,
        tokens,
        error: None,
        rendered: None,
    }
}

pub fn lex(source: &str) -> LexResult {
    lex_named("input.tex", source)
}

/// Reads and lexes a file from disk
pub fn lex_file(path: &Path) -> std::io::Result<LexResult> {
    let source = std::fs::read_to_string(path)?;
    Ok(lex_named(&path.display().to_string(), &source))
}

/// Asserts that `source` lexes to exactly `expected`, `Eof` included
pub fn assert_lexes(source: &str, expected: &[(TokenKind, &str)]) {
    let result = lex(source);
    if !result.success {
        panic!(
            "Expected source to lex, but got:\n{}",
            result.rendered.unwrap_or_default()
        );
    }
    let actual: Vec<_> = result.tokens.iter().map(|(k, t)| (*k, t.as_str())).collect();
    assert_eq!(actual, expected, "tokens of {:?}", source);
}

/// Asserts that `source` fails to lex and returns the error
pub fn assert_lex_fails(source: &str) -> SyntaxError {
    match lex(source).error {
        Some(err) => err,
        None => panic!("Expected {:?} to fail lexing, but it succeeded", source),
    }
}
