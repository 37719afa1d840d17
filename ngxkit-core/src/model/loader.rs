//! Model document loader

use crate::error::{Error, Result};
use crate::model::ParseUnit;
use std::path::Path;

/// Loads serialized parse units from JSON or TOML documents
pub struct ModelLoader;

impl ModelLoader {
    /// Load a model document, choosing the format by extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<ParseUnit> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        tracing::debug!(path = %path.display(), format = ext, "loading model document");

        match ext {
            "json" => Self::from_json(&content),
            "toml" => Self::from_toml(&content),
            _ => Err(Error::Document(format!("Unknown model format: {}", ext))),
        }
    }

    /// Parse a JSON model document
    pub fn from_json(content: &str) -> Result<ParseUnit> {
        serde_json::from_str(content).map_err(|e| Error::Document(format!("Invalid JSON: {}", e)))
    }

    /// Parse a TOML model document
    pub fn from_toml(content: &str) -> Result<ParseUnit> {
        toml::from_str(content).map_err(|e| Error::Document(format!("Invalid TOML: {}", e)))
    }
}
