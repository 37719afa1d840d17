//! Lexer for nginx configuration text
//!
//! Key features:
//! - Whitespace (newlines included) only separates tokens
//! - `;` terminates a simple directive, `{` / `}` delimit blocks
//! - "..." and '...' for quoted strings
//! - # for comments (skipped)

use logos::{Logos, Span as LogosSpan};
use std::fmt;

/// Byte range in the source, used to recover line numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl From<LogosSpan> for Span {
    fn from(span: LogosSpan) -> Self {
        Self {
            start: span.start,
            end: span.end,
        }
    }
}

/// A token with its location in the source
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub value: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(value: T, span: impl Into<Span>) -> Self {
        Self {
            value,
            span: span.into(),
        }
    }
}

/// Token types for nginx configuration syntax
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token {
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Whitespace,

    // A comment starts only where a token could start; `#` inside a word
    // (URI fragments) stays part of the word.
    #[regex(r"#[^\n]*", logos::skip)]
    Comment,

    // ============================================================
    // Structural
    // ============================================================
    #[token("{")]
    BlockOpen,

    #[token("}")]
    BlockClose,

    #[token(";")]
    Semicolon,

    // ============================================================
    // Values
    // ============================================================
    /// Quoted string literal: "..." or '...'
    #[regex(r#""([^"\\]|\\.)*""#, |lex| {
        let s = lex.slice();
        unescape_string(&s[1..s.len()-1])
    })]
    #[regex(r#"'([^'\\]|\\.)*'"#, |lex| {
        let s = lex.slice();
        unescape_string(&s[1..s.len()-1])
    })]
    QuotedString(String),

    /// Unquoted word: directive names, paths, URLs, variables
    #[regex(r#"[^ \t\r\n\f{};#"'][^ \t\r\n\f{};"']*"#, |lex| lex.slice().to_string())]
    Word(String),
}

impl Token {
    /// Text carried by a value token
    pub fn into_text(self) -> Option<String> {
        match self {
            Token::QuotedString(s) | Token::Word(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::BlockOpen => write!(f, "{{"),
            Token::BlockClose => write!(f, "}}"),
            Token::Semicolon => write!(f, ";"),
            Token::QuotedString(s) => write!(f, "\"{}\"", s),
            Token::Word(s) => write!(f, "{}", s),
            _ => write!(f, "{:?}", self),
        }
    }
}

/// Unescape a string literal
fn unescape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('r') => result.push('\r'),
                Some('t') => result.push('\t'),
                Some('\\') => result.push('\\'),
                Some('"') => result.push('"'),
                Some('\'') => result.push('\''),
                Some(c) => {
                    // nginx keeps unknown escapes, e.g. regex `\d`
                    result.push('\\');
                    result.push(c);
                }
                None => result.push('\\'),
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// Lexer result type
pub type LexResult = Result<Vec<Spanned<Token>>, LexError>;

/// Lexer error
#[derive(Debug, Clone, thiserror::Error)]
pub enum LexError {
    #[error("Unexpected character at position {position}")]
    UnexpectedChar { position: usize },
}

/// Tokenize nginx configuration text
pub fn tokenize(source: &str) -> LexResult {
    let lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    for (result, span) in lexer.spanned() {
        match result {
            Ok(Token::Whitespace) | Ok(Token::Comment) => continue,
            Ok(token) => tokens.push(Spanned::new(token, span)),
            // Only an unterminated quote can fail: words accept everything else
            Err(_) => return Err(LexError::UnexpectedChar { position: span.start }),
        }
    }

    Ok(tokens)
}

/// Maps byte offsets to 1-based line numbers
#[derive(Debug, Clone)]
pub struct LineIndex<'src> {
    source: &'src str,
    starts: Vec<usize>,
}

impl<'src> LineIndex<'src> {
    pub fn new(source: &'src str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { source, starts }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    /// 1-based line containing `offset`
    pub fn line_of(&self, offset: usize) -> usize {
        match self.starts.binary_search(&offset) {
            Ok(i) => i + 1,
            Err(i) => i,
        }
    }

    /// Trimmed text of a 1-based line
    pub fn line_text(&self, line: usize) -> &'src str {
        let Some(&start) = self.starts.get(line.saturating_sub(1)) else {
            return "";
        };
        let end = self.starts.get(line).copied().unwrap_or(self.source.len());
        self.source[start..end].trim()
    }
}
