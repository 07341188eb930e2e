//! Diagnostic - compiler-style error reports
//!
//! A [`Diagnostic`] carries a level, an optional code, a message and labels
//! pointing into sources held by a [`SourceCache`]. The
//! [`DiagnosticRenderer`] turns it into text such as:
//!
//! ```text
//! error[EL001]: unknown escape sequence
//!  --> notes.tex:1:7
//!   |
//! 1 | hello \x
//!   |       ^ expected `\em`
//!   = help: the only supported command is `\em`
//! ```

use crate::span::Span;
use std::fmt;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const BLUE: &str = "\x1b[1;34m";
const GREEN: &str = "\x1b[1;32m";

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
    Note,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Note => "note",
        }
    }

    /// ANSI escape used for the level's header
    pub fn color_code(&self) -> &'static str {
        match self {
            Level::Error => "\x1b[1;31m",
            Level::Warning => "\x1b[1;33m",
            Level::Note => "\x1b[1;36m",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable identifier for a class of diagnostic, shown as `E<category><nnn>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode {
    /// `L` for lexer
    pub category: char,
    pub number: u16,
}

impl ErrorCode {
    pub const fn new(category: char, number: u16) -> Self {
        Self { category, number }
    }

    /// A backslash not followed by a known command name
    pub const INVALID_ESCAPE: Self = Self::new('L', 1);
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}{:03}", self.category, self.number)
    }
}

/// A message attached to a region of source
#[derive(Debug, Clone)]
pub struct Label {
    pub span: Span,
    pub message: String,
    /// Primary labels are underlined with `^`, secondary ones with `-`
    pub primary: bool,
}

impl Label {
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            primary: true,
        }
    }

    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            primary: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub level: Level,
    pub code: Option<ErrorCode>,
    pub message: String,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
    pub help: Vec<String>,
}

impl Diagnostic {
    fn with_level(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::with_level(Level::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_level(Level::Warning, message)
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Adds a primary label
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level)?;
        if let Some(code) = &self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

/// A named source registered with a [`SourceCache`]
#[derive(Debug)]
pub struct SourceFile {
    pub name: String,
    pub source: String,
    /// Byte offset at which each line begins
    line_starts: Vec<usize>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        Self {
            name: name.into(),
            source,
            line_starts,
        }
    }

    /// Text of 1-indexed `line`, without its line terminator
    pub fn get_line(&self, line: u32) -> Option<&str> {
        let idx = line.checked_sub(1)? as usize;
        let start = *self.line_starts.get(idx)?;
        let end = match self.line_starts.get(idx + 1) {
            Some(&next) => next - 1,
            None => self.source.len(),
        };
        let text = &self.source[start..end];
        Some(text.strip_suffix('\r').unwrap_or(text))
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

/// Sources known to the renderer, indexed by file id
#[derive(Debug, Default)]
pub struct SourceCache {
    files: Vec<SourceFile>,
}

impl SourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a source and returns its file id
    pub fn add(&mut self, name: impl Into<String>, source: impl Into<String>) -> u32 {
        let id = self.files.len() as u32;
        self.files.push(SourceFile::new(name, source));
        id
    }

    pub fn get(&self, id: u32) -> Option<&SourceFile> {
        self.files.get(id as usize)
    }
}

/// Renders diagnostics against the sources in a [`SourceCache`]
pub struct DiagnosticRenderer<'a> {
    cache: &'a SourceCache,
    use_colors: bool,
}

impl<'a> DiagnosticRenderer<'a> {
    pub fn new(cache: &'a SourceCache) -> Self {
        Self {
            cache,
            use_colors: true,
        }
    }

    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    fn paint(&self, code: &'static str) -> &'static str {
        if self.use_colors {
            code
        } else {
            ""
        }
    }

    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        let reset = self.paint(RESET);
        let level_color = self.paint(diagnostic.level.color_code());
        let bold = self.paint(BOLD);
        let blue = self.paint(BLUE);

        let mut out = String::new();
        out.push_str(level_color);
        out.push_str(diagnostic.level.as_str());
        if let Some(code) = &diagnostic.code {
            out.push_str(&format!("[{}]", code));
        }
        out.push_str(&format!("{reset}{bold}: {}{reset}\n", diagnostic.message));

        // Width of the line-number gutter, shared by every label
        let gutter = diagnostic
            .labels
            .iter()
            .map(|l| l.span.start.line.to_string().len())
            .max()
            .unwrap_or(1);
        let pad = " ".repeat(gutter);

        for label in &diagnostic.labels {
            let Some(file) = self.cache.get(label.span.file_id) else {
                continue;
            };
            let start = label.span.start;
            out.push_str(&format!(
                "{pad}{blue}-->{reset} {}:{}:{}\n",
                file.name, start.line, start.column
            ));

            let Some(line) = file.get_line(start.line) else {
                continue;
            };
            out.push_str(&format!("{pad} {blue}|{reset}\n"));
            out.push_str(&format!(
                "{blue}{:>gutter$} |{reset} {}\n",
                start.line, line
            ));

            let line_chars = line.chars().count();
            let col = start.column as usize;
            // Multi-line labels underline to the end of the first line
            let end_column = if label.span.end.line == start.line {
                label.span.end.column as usize
            } else {
                line_chars + 1
            };
            let width = end_column.saturating_sub(col).max(1);
            let marker = if label.primary { '^' } else { '-' };
            let marker_color = if label.primary { level_color } else { blue };
            out.push_str(&format!(
                "{pad} {blue}|{reset} {}{marker_color}{} {}{reset}\n",
                " ".repeat(col.saturating_sub(1)),
                marker.to_string().repeat(width),
                label.message
            ));
        }

        for note in &diagnostic.notes {
            out.push_str(&format!("{pad} = {bold}note{reset}: {}\n", note));
        }
        let green = self.paint(GREEN);
        for help in &diagnostic.help {
            out.push_str(&format!("{pad} = {green}help{reset}: {}\n", help));
        }

        out
    }
}
