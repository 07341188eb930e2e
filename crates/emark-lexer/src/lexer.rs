//! Lexer for the emark markup
//!
//! Reads one lexical chunk per call: a single brace, the `\em` command, or
//! the longest run of plain text. The cursor only ever moves forward.

use crate::error::SyntaxError;
use crate::token::{Token, TokenKind};
use emark_error::span::{Position, Span};
use std::iter::FusedIterator;

/// The one command name accepted after a backslash
const EM: &str = "em";

/// Payload carried by every `EmCommand` token
const EM_PAYLOAD: &str = "}";

fn is_delimiter(ch: char) -> bool {
    matches!(ch, '{' | '}' | '\\')
}

/// Pull-based lexer over a borrowed source string
///
/// Once [`TokenKind::Eof`] has been returned every later call returns it
/// again. Once a [`SyntaxError`] has been returned every later call returns
/// the same error.
#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    source: &'src str,
    /// Cursor; `pos.offset` is always on a char boundary
    pos: Position,
    file_id: u32,
    failure: Option<SyntaxError>,
    /// Set once the iterator has yielded `Eof` or an error
    exhausted: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str, file_id: u32) -> Self {
        Self {
            source,
            pos: Position::start(),
            file_id,
            failure: None,
            exhausted: false,
        }
    }

    /// Current cursor position
    pub fn position(&self) -> Position {
        self.pos
    }

    /// Input not yet consumed
    pub fn remaining(&self) -> &'src str {
        &self.source[self.pos.offset..]
    }

    pub fn is_at_end(&self) -> bool {
        self.pos.offset >= self.source.len()
    }

    /// The error this lexer stopped on, if any
    pub fn failure(&self) -> Option<&SyntaxError> {
        self.failure.as_ref()
    }

    fn make_span(&self, start: Position) -> Span {
        Span::new(start, self.pos, self.file_id)
    }

    /// Moves the cursor past `text`, which must be a prefix of the remaining input
    fn bump(&mut self, text: &str) {
        debug_assert!(self.remaining().starts_with(text));
        self.pos = self.pos.advance_str(text);
    }

    fn emit(&self, kind: TokenKind, text: &'src str, start: Position) -> Token<'src> {
        let token = Token::new(kind, text, self.make_span(start));
        tracing::trace!(kind = %kind, text, offset = start.offset, "token");
        token
    }

    /// Returns the next token and advances past it
    pub fn next_token(&mut self) -> Result<Token<'src>, SyntaxError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        let start = self.pos;
        let rest = self.remaining();
        let Some(ch) = rest.chars().next() else {
            return Ok(self.emit(TokenKind::Eof, "", start));
        };

        match ch {
            '{' => {
                self.bump("{");
                Ok(self.emit(TokenKind::OpenBrace, &rest[..1], start))
            }
            '}' => {
                self.bump("}");
                Ok(self.emit(TokenKind::CloseBrace, &rest[..1], start))
            }
            '\\' => self.read_command(start),
            _ => Ok(self.read_text(start)),
        }
    }

    /// Reads `\em`; any other escape is a syntax error
    fn read_command(&mut self, start: Position) -> Result<Token<'src>, SyntaxError> {
        self.bump("\\");

        if self.remaining().starts_with(EM) {
            self.bump(EM);
            return Ok(self.emit(TokenKind::EmCommand, EM_PAYLOAD, start));
        }

        let err = SyntaxError::new(self.remaining(), self.make_span(start));
        tracing::debug!(
            line = start.line,
            column = start.column,
            remaining = %err.remaining,
            "unknown escape sequence"
        );
        self.failure = Some(err.clone());
        Err(err)
    }

    /// Reads the longest run of non-delimiter chars
    fn read_text(&mut self, start: Position) -> Token<'src> {
        let rest = self.remaining();
        let len = rest.find(is_delimiter).unwrap_or(rest.len());
        let text = &rest[..len];
        self.bump(text);
        self.emit(TokenKind::Text, text, start)
    }

    /// Drains the input, returning every token up to and including `Eof`
    pub fn tokenize(&mut self) -> Result<Vec<Token<'src>>, SyntaxError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let is_eof = token.is_eof();
            tokens.push(token);

            if is_eof {
                break;
            }
        }

        Ok(tokens)
    }
}

/// Yields each token including the final `Eof`, or the first error, then stops
impl<'src> Iterator for Lexer<'src> {
    type Item = Result<Token<'src>, SyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let result = self.next_token();
        self.exhausted = match &result {
            Ok(token) => token.is_eof(),
            Err(_) => true,
        };
        Some(result)
    }
}

impl FusedIterator for Lexer<'_> {}

/// Tokenizes a whole source string
pub fn tokenize(source: &str, file_id: u32) -> Result<Vec<Token<'_>>, SyntaxError> {
    Lexer::new(source, file_id).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lex(source: &str) -> Vec<(TokenKind, &str)> {
        tokenize(source, 0)
            .expect("source should lex")
            .into_iter()
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let mut lexer = Lexer::new("", 0);
        let token = lexer.next_token().unwrap();
        assert!(token.is_eof());
        assert_eq!(token.text, "");
    }

    #[test]
    fn test_braces() {
        assert_eq!(
            lex("{}"),
            vec![
                (TokenKind::OpenBrace, "{"),
                (TokenKind::CloseBrace, "}"),
                (TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn test_brace_only_inputs() {
        for len in 0..=6u32 {
            for bits in 0..(1u32 << len) {
                let source: String = (0..len)
                    .map(|i| if bits & (1 << i) == 0 { '{' } else { '}' })
                    .collect();

                let tokens = lex(&source);
                assert_eq!(tokens.len(), source.len() + 1, "input {:?}", source);

                for (ch, (kind, text)) in source.chars().zip(&tokens) {
                    let expected = if ch == '{' {
                        TokenKind::OpenBrace
                    } else {
                        TokenKind::CloseBrace
                    };
                    assert_eq!(*kind, expected);
                    assert_eq!(*text, ch.to_string());
                }
                assert_eq!(tokens.last(), Some(&(TokenKind::Eof, "")));
            }
        }
    }

    #[test]
    fn test_em_command_payload() {
        // EmCommand carries "}" rather than the command name
        assert_eq!(
            lex("\\em"),
            vec![(TokenKind::EmCommand, "}"), (TokenKind::Eof, "")]
        );
    }

    #[test]
    fn test_em_is_a_prefix_match() {
        assert_eq!(
            lex("{\\emph}"),
            vec![
                (TokenKind::OpenBrace, "{"),
                (TokenKind::EmCommand, "}"),
                (TokenKind::Text, "ph"),
                (TokenKind::CloseBrace, "}"),
                (TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn test_text_stops_at_delimiters() {
        assert_eq!(
            lex("hello{world}"),
            vec![
                (TokenKind::Text, "hello"),
                (TokenKind::OpenBrace, "{"),
                (TokenKind::Text, "world"),
                (TokenKind::CloseBrace, "}"),
                (TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn test_text_keeps_whitespace_and_unicode() {
        assert_eq!(
            lex("a b\n{\\em  ção }"),
            vec![
                (TokenKind::Text, "a b\n"),
                (TokenKind::OpenBrace, "{"),
                (TokenKind::EmCommand, "}"),
                (TokenKind::Text, "  ção "),
                (TokenKind::CloseBrace, "}"),
                (TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn test_unknown_escape() {
        let mut lexer = Lexer::new("\\x", 0);
        let err = lexer.next_token().unwrap_err();
        assert_eq!(err.remaining, "x");
        assert_eq!(err.span.start, Position::new(1, 1, 0));
        assert_eq!(err.span.end, Position::new(1, 2, 1));
    }

    #[test]
    fn test_error_after_valid_tokens() {
        let mut lexer = Lexer::new("ok{\\bf{x}}", 0);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Text);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::OpenBrace);

        let err = lexer.next_token().unwrap_err();
        assert_eq!(err.remaining, "bf{x}}");
        assert_eq!(err.span.start.column, 4);
        assert_eq!(lexer.remaining(), "bf{x}}");
    }

    #[test]
    fn test_backslash_at_end_of_input() {
        let err = tokenize("text\\", 0).unwrap_err();
        assert_eq!(err.remaining, "");

        let err = tokenize("\\e", 0).unwrap_err();
        assert_eq!(err.remaining, "e");
    }

    #[test]
    fn test_error_is_sticky() {
        let mut lexer = Lexer::new("\\x rest", 0);
        let first = lexer.next_token().unwrap_err();
        let position = lexer.position();

        for _ in 0..3 {
            assert_eq!(lexer.next_token().unwrap_err(), first);
            assert_eq!(lexer.position(), position);
        }
        assert_eq!(lexer.failure(), Some(&first));
    }

    #[test]
    fn test_eof_is_idempotent() {
        let mut lexer = Lexer::new("{", 0);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::OpenBrace);

        let eof = lexer.next_token().unwrap();
        assert!(eof.is_eof());
        assert!(lexer.is_at_end());

        for _ in 0..3 {
            assert_eq!(lexer.next_token().unwrap(), eof);
            assert_eq!(lexer.position().offset, 1);
        }
    }

    #[test]
    fn test_cursor_strictly_advances() {
        let mut lexer = Lexer::new("a{b}\\em c", 0);
        let mut last = lexer.position().offset;

        loop {
            let token = lexer.next_token().unwrap();
            if token.is_eof() {
                break;
            }
            assert!(lexer.position().offset > last);
            last = lexer.position().offset;
        }
    }

    #[test]
    fn test_spans() {
        let tokens = tokenize("a\n{é}", 3).unwrap();

        assert_eq!(tokens[0].span, Span::new(Position::new(1, 1, 0), Position::new(2, 1, 2), 3));
        assert_eq!(tokens[1].span.start, Position::new(2, 1, 2));
        assert_eq!(tokens[2].text, "é");
        assert_eq!(tokens[2].span, Span::new(Position::new(2, 2, 3), Position::new(2, 3, 5), 3));
        assert_eq!(tokens[3].span.start, Position::new(2, 3, 5));
        assert_eq!(tokens[4].span, Span::point(Position::new(2, 4, 6), 3));
    }

    #[test]
    fn test_token_text_matches_span() {
        let source = "x{\\em y}z";
        for token in tokenize(source, 0).unwrap() {
            if token.kind != TokenKind::EmCommand {
                assert_eq!(token.span.slice(source), Some(token.text));
            }
        }
    }

    #[test]
    fn test_iterator_stops_after_eof() {
        let kinds: Vec<_> = Lexer::new("{a}", 0).map(|r| r.unwrap().kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::OpenBrace,
                TokenKind::Text,
                TokenKind::CloseBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let results: Vec<_> = Lexer::new("a\\b c", 0).collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[test]
    fn test_collect_into_result() {
        let tokens: Result<Vec<_>, _> = Lexer::new("{}", 0).collect();
        assert_eq!(tokens.unwrap().len(), 3);

        let tokens: Result<Vec<_>, _> = Lexer::new("{\\q}", 0).collect();
        assert!(tokens.is_err());
    }

    #[test]
    fn test_lexer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Lexer<'static>>();
    }
}
