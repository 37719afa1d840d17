//! Block type definitions
//!
//! A server owns its locations and property groups; upstreams belong to the
//! parse unit and are only referenced by name from `proxy_pass`.

use crate::error::{Error, Result};
use crate::model::properties::{ErrorPage, PropertyGroup};
use serde::{Deserialize, Serialize};

/// Everything produced by one parse: independent top-level blocks
///
/// Upstream names are unique. The collections are only reachable through
/// methods that keep that true, including deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "ParseUnitRepr")]
pub struct ParseUnit {
    upstreams: Vec<Upstream>,
    servers: Vec<Server>,
}

#[derive(Deserialize)]
struct ParseUnitRepr {
    #[serde(default)]
    upstreams: Vec<Upstream>,
    #[serde(default)]
    servers: Vec<Server>,
}

impl TryFrom<ParseUnitRepr> for ParseUnit {
    type Error = Error;

    fn try_from(repr: ParseUnitRepr) -> Result<Self> {
        Self::from_parts(repr.upstreams, repr.servers)
    }
}

impl ParseUnit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a unit from existing collections, rejecting duplicate upstreams
    pub fn from_parts(upstreams: Vec<Upstream>, servers: Vec<Server>) -> Result<Self> {
        let mut unit = Self {
            upstreams: Vec::with_capacity(upstreams.len()),
            servers,
        };
        for upstream in upstreams {
            unit.add_upstream(upstream)?;
        }
        Ok(unit)
    }

    /// Append an upstream; re-declaring a name is an error, never an overwrite
    pub fn add_upstream(&mut self, upstream: Upstream) -> Result<()> {
        if self.upstream(&upstream.name).is_some() {
            return Err(Error::DuplicateUpstream {
                name: upstream.name,
            });
        }
        self.upstreams.push(upstream);
        Ok(())
    }

    pub fn add_server(&mut self, server: Server) {
        self.servers.push(server);
    }

    pub fn upstreams(&self) -> &[Upstream] {
        &self.upstreams
    }

    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    pub fn upstream(&self, name: &str) -> Option<&Upstream> {
        self.upstreams.iter().find(|u| u.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.upstreams.is_empty() && self.servers.is_empty()
    }
}

/// `upstream <name> { server ...; }`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Upstream {
    pub name: String,

    /// Backend entries in load-balancing priority order, e.g. `10.0.0.1:80`
    /// or `10.0.0.2:80 weight=5`
    #[serde(default)]
    pub servers: Vec<String>,
}

impl Upstream {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            servers: Vec::new(),
        }
    }

    pub fn with_server(mut self, server: impl Into<String>) -> Self {
        self.servers.push(server.into());
        self
    }
}

/// Server (virtual host) block
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Server {
    #[serde(default)]
    pub names: Vec<String>,

    /// `host:port` or port tokens in declaration order; duplicates allowed
    #[serde(default)]
    pub listens: Vec<String>,

    #[serde(default)]
    pub locations: Vec<Location>,

    /// Included file globs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<String>,

    #[serde(default)]
    pub properties: PropertyGroup,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_page: Option<ErrorPage>,
}

impl Server {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    pub fn with_listen(mut self, listen: impl Into<String>) -> Self {
        self.listens.push(listen.into());
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.locations.push(location);
        self
    }

    pub fn with_include(mut self, path: impl Into<String>) -> Self {
        self.includes.push(path.into());
        self
    }

    pub fn with_properties(mut self, properties: PropertyGroup) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_error_page(mut self, page: ErrorPage) -> Self {
        self.error_page = Some(page);
        self
    }
}

/// `location <path> { ... }`
///
/// Holds only what was declared inside the block; nothing is inherited from
/// the enclosing server.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
    /// Match pattern, modifiers included (`/`, `/api`, `~* \.php$`)
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_pass: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<String>,

    #[serde(default)]
    pub properties: PropertyGroup,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_page: Option<ErrorPage>,
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_proxy_pass(mut self, url: impl Into<String>) -> Self {
        self.proxy_pass = Some(url.into());
        self
    }

    pub fn with_include(mut self, path: impl Into<String>) -> Self {
        self.includes.push(path.into());
        self
    }

    pub fn with_properties(mut self, properties: PropertyGroup) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_error_page(mut self, page: ErrorPage) -> Self {
        self.error_page = Some(page);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_upstream_rejected() {
        let mut unit = ParseUnit::new();
        unit.add_upstream(Upstream::new("backend").with_server("10.0.0.1:80"))
            .unwrap();
        let err = unit
            .add_upstream(Upstream::new("backend").with_server("10.0.0.2:80"))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateUpstream { ref name } if name == "backend"));
        // First declaration is untouched
        assert_eq!(unit.upstreams().len(), 1);
        assert_eq!(unit.upstreams()[0].servers, vec!["10.0.0.1:80"]);
    }

    #[test]
    fn test_from_parts() {
        let unit = ParseUnit::from_parts(
            vec![Upstream::new("a"), Upstream::new("b")],
            vec![Server::new().with_listen("80")],
        )
        .unwrap();
        assert!(unit.upstream("b").is_some());
        assert!(unit.upstream("c").is_none());
        assert_eq!(unit.servers().len(), 1);

        assert!(ParseUnit::from_parts(vec![Upstream::new("a"), Upstream::new("a")], vec![]).is_err());
    }

    #[test]
    fn test_deserialize_enforces_unique_upstreams() {
        let json = r#"{"upstreams": [{"name": "x"}, {"name": "x"}]}"#;
        let err = serde_json::from_str::<ParseUnit>(json).unwrap_err();
        assert!(err.to_string().contains("Duplicate upstream name: x"));
    }

    #[test]
    fn test_server_json_shape() {
        let server = Server::new()
            .with_name("example.com")
            .with_listen("80")
            .with_location(Location::new("/").with_proxy_pass("http://backend"));
        let json = serde_json::to_value(&server).unwrap();
        assert_eq!(json["names"][0], "example.com");
        assert_eq!(json["locations"][0]["proxy_pass"], "http://backend");
        assert!(json.get("error_page").is_none());
        assert!(json["locations"][0].get("error_page").is_none());
    }
}
