//! ngxkit Configuration Parser and Renderer
//!
//! This crate turns nginx `server` / `location` / `upstream` configuration
//! text into the typed model from `ngxkit-core`, and renders that model back
//! into canonical text.
//!
//! # Example
//!
//! ```rust
//! use ngxkit_config::{parse, render};
//!
//! let source = r#"
//!     upstream backend { server 10.0.0.1:80; server 10.0.0.2:80; }
//!     server { listen 80; server_name example.com;
//!       location / { proxy_pass http://backend; } }
//! "#;
//!
//! let unit = parse(source).unwrap();
//! assert_eq!(unit.upstreams()[0].servers.len(), 2);
//!
//! let text = render(&unit);
//! assert_eq!(parse(&text).unwrap(), unit);
//! ```

pub mod adapter;
pub mod parser;
pub mod render;

pub use adapter::{AdapterError, JsonAdapter};
pub use parser::{Context, ErrorKind, ParseError, parse};
pub use render::{Directive, Render, render, to_lower_snake_case};

use ngxkit_core::ParseUnit;
use std::path::Path;

/// Read and parse a configuration file
pub fn parse_file(path: impl AsRef<Path>) -> Result<ParseUnit, LoadError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|e| LoadError::Io(e.to_string()))?;
    tracing::debug!(path = %path.display(), bytes = source.len(), "parsing configuration file");
    Ok(parse(&source)?)
}

/// File loading error
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}
