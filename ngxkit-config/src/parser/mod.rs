//! Parser module for nginx configuration
//!
//! This module provides the lexer, statement grouping and the context-stack
//! parser that fills in the typed model.

pub mod error;
pub mod lexer;
pub mod parser;
pub mod statement;

pub use error::{Context, ErrorKind, ParseError, ParseResult};
pub use lexer::{LexError, LineIndex, Span, Spanned, Token, tokenize};
pub use parser::{Parser, parse};
pub use statement::{Statement, statements};
