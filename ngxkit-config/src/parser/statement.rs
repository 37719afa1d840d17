//! Groups tokens into statements
//!
//! A statement ends at `;` (simple directive), `{` (block opening) or `}`
//! (block closing). Several statements may share a physical line.

use crate::parser::error::{ParseError, ParseResult};
use crate::parser::lexer::{LineIndex, Spanned, Token};

/// One directive-level unit of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `name args...;`
    Simple {
        line: usize,
        name: String,
        args: Vec<String>,
    },
    /// `name args... {`
    Open {
        line: usize,
        name: String,
        args: Vec<String>,
    },
    /// `}`
    Close { line: usize },
}

/// Words collected since the last terminator
struct Pending {
    line: usize,
    words: Vec<String>,
}

impl Pending {
    fn split(self) -> (usize, String, Vec<String>) {
        let mut words = self.words.into_iter();
        let name = words.next().unwrap_or_default();
        (self.line, name, words.collect())
    }
}

/// Group a token stream into statements
pub fn statements(tokens: Vec<Spanned<Token>>, lines: &LineIndex<'_>) -> ParseResult<Vec<Statement>> {
    let mut out = Vec::new();
    let mut pending: Option<Pending> = None;

    for token in tokens {
        let line = lines.line_of(token.span.start);
        match token.value {
            Token::Semicolon => {
                let (line, name, args) = pending
                    .take()
                    .ok_or(ParseError::UnexpectedToken {
                        line,
                        found: ";".to_string(),
                    })?
                    .split();
                out.push(Statement::Simple { line, name, args });
            }
            Token::BlockOpen => {
                let (line, name, args) = pending
                    .take()
                    .ok_or(ParseError::UnexpectedToken {
                        line,
                        found: "{".to_string(),
                    })?
                    .split();
                out.push(Statement::Open { line, name, args });
            }
            Token::BlockClose => {
                if let Some(unfinished) = pending {
                    return Err(ParseError::UnterminatedStatement {
                        line: unfinished.line,
                    });
                }
                out.push(Statement::Close { line });
            }
            value => {
                if let Some(word) = value.into_text() {
                    pending
                        .get_or_insert_with(|| Pending {
                            line,
                            words: Vec::new(),
                        })
                        .words
                        .push(word);
                }
            }
        }
    }

    if let Some(unfinished) = pending {
        return Err(ParseError::UnterminatedStatement {
            line: unfinished.line,
        });
    }

    Ok(out)
}
