//! JSON model adapter

use ngxkit_core::{ModelLoader, ParseUnit};

/// Adapter errors
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Model(#[from] ngxkit_core::Error),
}

/// JSON model adapter
pub struct JsonAdapter;

impl JsonAdapter {
    /// Parse a JSON model document
    pub fn parse(input: &str) -> Result<ParseUnit, AdapterError> {
        Ok(ModelLoader::from_json(input)?)
    }

    /// Serialize a parse unit to JSON; arrays keep model order
    pub fn serialize(unit: &ParseUnit, pretty: bool) -> Result<String, AdapterError> {
        let json = if pretty {
            serde_json::to_string_pretty(unit)?
        } else {
            serde_json::to_string(unit)?
        };
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn test_json_preserves_order() {
        let unit = parse(
            "server {\n location / {\n proxy_hide_header B;\n proxy_hide_header A;\n }\n}",
        )
        .unwrap();
        let json = JsonAdapter::serialize(&unit, false).unwrap();
        assert!(json.contains(r#""hide_headers":["B","A"]"#));

        let back = JsonAdapter::parse(&json).unwrap();
        assert_eq!(back, unit);
    }

    #[test]
    fn test_json_rejects_duplicate_upstreams() {
        let err = JsonAdapter::parse(r#"{"upstreams":[{"name":"a"},{"name":"a"}]}"#).unwrap_err();
        assert!(matches!(err, AdapterError::Model(_)));
    }
}
