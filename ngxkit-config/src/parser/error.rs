//! Parser error types
//!
//! Every error carries the 1-based source line it refers to. A parse either
//! succeeds completely or returns exactly one of these.

use std::fmt;
use thiserror::Error;

/// Parser error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: unknown directive: {text}")]
    UnknownDirective { line: usize, text: String },

    #[error("line {line}: unexpected '}}' with no open block")]
    UnmatchedCloseBrace { line: usize },

    #[error("line {opened_at_line}: block is never closed")]
    UnterminatedBlock { opened_at_line: usize },

    #[error("line {line}: duplicate upstream name: {name}")]
    DuplicateUpstreamName { name: String, line: usize },

    #[error("line {line}: '{directive}' is not allowed in {context} context")]
    MisplacedDirective {
        line: usize,
        directive: String,
        context: Context,
    },

    #[error("line {line}: directive is missing its terminating ';'")]
    UnterminatedStatement { line: usize },

    #[error("line {line}: unexpected '{found}'")]
    UnexpectedToken { line: usize, found: String },

    #[error("line {line}: invalid token: {text}")]
    InvalidToken { line: usize, text: String },

    #[error("line {line}: invalid arguments for '{directive}': {message}")]
    InvalidArgument {
        line: usize,
        directive: String,
        message: String,
    },

    #[error("line {line}: '{directive}' is already set in this block")]
    DuplicateDirective { line: usize, directive: String },
}

/// Coarse error taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unmatched or unterminated blocks, directives outside their scope
    Structural,
    /// Input that matches no known directive or argument shape
    UnrecognizedInput,
    /// A name or single-valued directive declared twice
    DuplicateDefinition,
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::UnmatchedCloseBrace { .. }
            | ParseError::UnterminatedBlock { .. }
            | ParseError::MisplacedDirective { .. }
            | ParseError::UnterminatedStatement { .. }
            | ParseError::UnexpectedToken { .. } => ErrorKind::Structural,
            ParseError::UnknownDirective { .. }
            | ParseError::InvalidToken { .. }
            | ParseError::InvalidArgument { .. } => ErrorKind::UnrecognizedInput,
            ParseError::DuplicateUpstreamName { .. } | ParseError::DuplicateDirective { .. } => {
                ErrorKind::DuplicateDefinition
            }
        }
    }

    /// 1-based line the error refers to
    pub fn line(&self) -> usize {
        match self {
            ParseError::UnknownDirective { line, .. }
            | ParseError::UnmatchedCloseBrace { line }
            | ParseError::DuplicateUpstreamName { line, .. }
            | ParseError::MisplacedDirective { line, .. }
            | ParseError::UnterminatedStatement { line }
            | ParseError::UnexpectedToken { line, .. }
            | ParseError::InvalidToken { line, .. }
            | ParseError::InvalidArgument { line, .. }
            | ParseError::DuplicateDirective { line, .. } => *line,
            ParseError::UnterminatedBlock { opened_at_line } => *opened_at_line,
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Block scope a directive is read in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    Main,
    Http,
    Server,
    Location,
    Upstream,
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Context::Main => "main",
            Context::Http => "http",
            Context::Server => "server",
            Context::Location => "location",
            Context::Upstream => "upstream",
        };
        f.write_str(name)
    }
}
