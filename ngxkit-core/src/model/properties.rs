//! Property groups shared by servers and locations
//!
//! Ref: http://nginx.org/en/docs/http/ngx_http_core_module.html,
//! ngx_http_access_module and ngx_http_proxy_module.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Tunables attachable to a server or a location
///
/// Scalar knobs are `Option<String>` so an unset knob stays distinguishable
/// from one set to an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PropertyGroup {
    /// `allow` / `deny` rules, evaluated first-match by nginx
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub access: Vec<AccessRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute_redirect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aio_write: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunked_transfer_encoding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_body_buffer_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keepalive_requests: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_max_body_size: Option<String>,

    /// Headers stripped from the upstream response, in emission order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hide_headers: Vec<String>,

    /// Headers passed through despite being hidden by default
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pass_headers: Vec<String>,

    /// Request headers rewritten towards the upstream; a name may repeat
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub set_headers: Vec<SetHeader>,
}

impl PropertyGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_access(mut self, rule: AccessRule) -> Self {
        self.access.push(rule);
        self
    }

    pub fn with_hide_header(mut self, header: impl Into<String>) -> Self {
        self.hide_headers.push(header.into());
        self
    }

    pub fn with_pass_header(mut self, header: impl Into<String>) -> Self {
        self.pass_headers.push(header.into());
        self
    }

    pub fn with_set_header(mut self, header: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_headers.push(SetHeader::new(header, value));
        self
    }

    pub fn with_client_max_body_size(mut self, size: impl Into<String>) -> Self {
        self.client_max_body_size = Some(size.into());
        self
    }

    pub fn with_keepalive_requests(mut self, requests: impl Into<String>) -> Self {
        self.keepalive_requests = Some(requests.into());
        self
    }

    /// True when no directive would be produced for this group
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One `proxy_set_header <header> <value>` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetHeader {
    pub header: String,
    /// Kept verbatim; may contain nginx variables such as `$host`
    pub value: String,
}

impl SetHeader {
    pub fn new(header: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            value: value.into(),
        }
    }
}

/// `allow` or `deny`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessAction {
    Allow,
    Deny,
}

impl AccessAction {
    /// Directive name for this action
    pub fn directive(self) -> &'static str {
        match self {
            AccessAction::Allow => "allow",
            AccessAction::Deny => "deny",
        }
    }
}

/// Access control rule, e.g. `deny 10.0.0.0/8;` or `allow all;`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRule {
    pub action: AccessAction,
    pub address: String,
}

impl AccessRule {
    pub fn allow(address: impl Into<String>) -> Self {
        Self {
            action: AccessAction::Allow,
            address: address.into(),
        }
    }

    pub fn deny(address: impl Into<String>) -> Self {
        Self {
            action: AccessAction::Deny,
            address: address.into(),
        }
    }
}

/// `error_page code ... [=[response]] uri;`
///
/// Always holds at least one status code, whether built in code or
/// deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ErrorPageRepr")]
pub struct ErrorPage {
    codes: BTreeSet<StatusMatch>,

    /// `Some("")` is a bare `=`, `Some("200")` is `=200`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_override: Option<String>,

    /// Text, variable or URI
    pub uri: String,
}

#[derive(Deserialize)]
struct ErrorPageRepr {
    codes: BTreeSet<StatusMatch>,
    #[serde(default)]
    response_override: Option<String>,
    uri: String,
}

impl TryFrom<ErrorPageRepr> for ErrorPage {
    type Error = Error;

    fn try_from(repr: ErrorPageRepr) -> Result<Self, Self::Error> {
        let mut codes = repr.codes.into_iter();
        let first = codes.next().ok_or_else(|| Error::EmptyErrorPage {
            uri: repr.uri.clone(),
        })?;
        let mut page = ErrorPage::new(first, repr.uri);
        page.codes.extend(codes);
        page.response_override = repr.response_override;
        Ok(page)
    }
}

impl ErrorPage {
    pub fn new(code: StatusMatch, uri: impl Into<String>) -> Self {
        Self {
            codes: BTreeSet::from([code]),
            response_override: None,
            uri: uri.into(),
        }
    }

    pub fn with_code(mut self, code: StatusMatch) -> Self {
        self.codes.insert(code);
        self
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.response_override = Some(response.into());
        self
    }

    /// Codes in ascending order, `*` last
    pub fn codes(&self) -> &BTreeSet<StatusMatch> {
        &self.codes
    }
}

/// Status code an error page applies to: a code in 300..=599, or `*`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StatusMatch(Status);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Status {
    Code(u16),
    Any,
}

impl StatusMatch {
    /// `*`
    pub const ANY: StatusMatch = StatusMatch(Status::Any);

    pub fn code(code: u16) -> Result<Self, Error> {
        if (300..=599).contains(&code) {
            Ok(StatusMatch(Status::Code(code)))
        } else {
            Err(Error::InvalidStatus {
                value: code.to_string(),
            })
        }
    }

    /// The numeric code, `None` for `*`
    pub fn as_code(self) -> Option<u16> {
        match self.0 {
            Status::Code(code) => Some(code),
            Status::Any => None,
        }
    }
}

impl FromStr for StatusMatch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "*" {
            return Ok(StatusMatch::ANY);
        }
        s.parse::<u16>()
            .ok()
            .and_then(|code| StatusMatch::code(code).ok())
            .ok_or_else(|| Error::InvalidStatus {
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for StatusMatch {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StatusMatch> for String {
    fn from(status: StatusMatch) -> Self {
        status.to_string()
    }
}

impl fmt::Display for StatusMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Status::Code(code) => write!(f, "{}", code),
            Status::Any => write!(f, "*"),
        }
    }
}
