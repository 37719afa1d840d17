//! Generic directive tree
//!
//! This is the untyped form the renderer builds before emitting text:
//! - Directives (Name + Parameters + optional Block)
//! - Blocks (List of Directives)

use std::fmt::{self, Write};

const INDENT: &str = "  ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Directive name (e.g. "server", "proxy_pass", "location")
    pub name: String,

    /// Parameters following the name
    pub parameters: Vec<String>,

    /// Nested directives for block directives, `None` for `name params;`
    pub block: Option<Vec<Directive>>,
}

impl Directive {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            block: None,
        }
    }

    /// Simple directive with a single parameter
    pub fn simple(name: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self::new(name).with_param(parameter)
    }

    pub fn with_param(mut self, parameter: impl Into<String>) -> Self {
        self.parameters.push(parameter.into());
        self
    }

    pub fn with_params<I, S>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameters.extend(parameters.into_iter().map(Into::into));
        self
    }

    pub fn with_block(mut self, block: Vec<Directive>) -> Self {
        self.block = Some(block);
        self
    }

    fn write_indented(&self, out: &mut impl Write, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            out.write_str(INDENT)?;
        }
        out.write_str(&self.name)?;
        for param in &self.parameters {
            out.write_char(' ')?;
            write_param(out, param)?;
        }

        match &self.block {
            None => out.write_str(";\n"),
            Some(children) => {
                out.write_str(" {\n")?;
                for child in children {
                    child.write_indented(out, depth + 1)?;
                }
                for _ in 0..depth {
                    out.write_str(INDENT)?;
                }
                out.write_str("}\n")
            }
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

/// Parameters the lexer would split or misread are double-quoted
fn needs_quotes(param: &str) -> bool {
    param.is_empty()
        || param.starts_with('#')
        || param
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | ';' | '{' | '}'))
}

fn write_param(out: &mut impl Write, param: &str) -> fmt::Result {
    if !needs_quotes(param) {
        return out.write_str(param);
    }
    out.write_char('"')?;
    for c in param.chars() {
        match c {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            c => out.write_char(c)?,
        }
    }
    out.write_char('"')
}
