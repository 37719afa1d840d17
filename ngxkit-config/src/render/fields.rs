//! Declarative field table for property groups
//!
//! Each entry pairs a field accessor with its directive name and emission
//! kind. Directive names are derived from the field identifier once, when the
//! table is first used. The renderer walks the table to emit directives and the
//! parser looks entries up by directive name to fill fields back in.

use ngxkit_core::{PropertyGroup, SetHeader};
use std::collections::HashMap;
use std::sync::LazyLock;

/// How a field turns into directives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// One directive with one parameter, only when set and non-empty
    Scalar,
    /// One directive per element, in order
    Sequence,
    /// One two-parameter directive per pair, in order
    PairSequence,
}

/// Read view of a field
pub enum FieldValue<'a> {
    Scalar(Option<&'a str>),
    Sequence(&'a [String]),
    PairSequence(&'a [SetHeader]),
}

/// Write view of a field
pub enum FieldSlot<'a> {
    Scalar(&'a mut Option<String>),
    Sequence(&'a mut Vec<String>),
    PairSequence(&'a mut Vec<SetHeader>),
}

type Reader = for<'a> fn(&'a PropertyGroup) -> FieldValue<'a>;
type Writer = for<'a> fn(&'a mut PropertyGroup) -> FieldSlot<'a>;

/// One row of the table
pub struct PropertyField {
    /// Directive name derived from the camel-case field identifier
    pub directive: String,
    pub kind: FieldKind,
    read: Reader,
    write: Writer,
}

impl PropertyField {
    fn new(ident: &'static str, kind: FieldKind, read: Reader, write: Writer) -> Self {
        Self {
            directive: to_lower_snake_case(ident),
            kind,
            read,
            write,
        }
    }

    pub fn read<'a>(&self, group: &'a PropertyGroup) -> FieldValue<'a> {
        (self.read)(group)
    }

    pub fn slot<'a>(&self, group: &'a mut PropertyGroup) -> FieldSlot<'a> {
        (self.write)(group)
    }
}

macro_rules! scalar {
    ($ident:literal, $field:ident) => {
        PropertyField::new(
            $ident,
            FieldKind::Scalar,
            |g| FieldValue::Scalar(g.$field.as_deref()),
            |g| FieldSlot::Scalar(&mut g.$field),
        )
    };
}

/// Every property-group field, split by where it appears in a block
pub struct PropertyTable {
    /// Core module knobs, emitted after access rules
    pub core: Vec<PropertyField>,
    /// Proxy header fields, emitted after `error_page`
    pub headers: Vec<PropertyField>,
    by_directive: HashMap<String, (bool, usize)>,
}

impl PropertyTable {
    fn new(core: Vec<PropertyField>, headers: Vec<PropertyField>) -> Self {
        let by_directive = core
            .iter()
            .enumerate()
            .map(|(i, f)| (f.directive.clone(), (true, i)))
            .chain(
                headers
                    .iter()
                    .enumerate()
                    .map(|(i, f)| (f.directive.clone(), (false, i))),
            )
            .collect();
        Self {
            core,
            headers,
            by_directive,
        }
    }

    /// Field emitted under this directive name
    pub fn lookup(&self, directive: &str) -> Option<&PropertyField> {
        let &(core, i) = self.by_directive.get(directive)?;
        if core { self.core.get(i) } else { self.headers.get(i) }
    }
}

/// The property table, built on first use
pub static PROPERTY_TABLE: LazyLock<PropertyTable> = LazyLock::new(|| {
    let core = vec![
        scalar!("AbsoluteRedirect", absolute_redirect),
        scalar!("Aio", aio),
        scalar!("AioWrite", aio_write),
        scalar!("ChunkedTransferEncoding", chunked_transfer_encoding),
        scalar!("ClientBodyBufferSize", client_body_buffer_size),
        scalar!("KeepaliveRequests", keepalive_requests),
        scalar!("ClientMaxBodySize", client_max_body_size),
    ];
    let headers = vec![
        PropertyField::new(
            "ProxyHideHeader",
            FieldKind::Sequence,
            |g| FieldValue::Sequence(&g.hide_headers),
            |g| FieldSlot::Sequence(&mut g.hide_headers),
        ),
        PropertyField::new(
            "ProxyPassHeader",
            FieldKind::Sequence,
            |g| FieldValue::Sequence(&g.pass_headers),
            |g| FieldSlot::Sequence(&mut g.pass_headers),
        ),
        PropertyField::new(
            "ProxySetHeader",
            FieldKind::PairSequence,
            |g| FieldValue::PairSequence(&g.set_headers),
            |g| FieldSlot::PairSequence(&mut g.set_headers),
        ),
    ];
    PropertyTable::new(core, headers)
});

/// `ClientMaxBodySize` -> `client_max_body_size`
///
/// Every uppercase letter after the first character starts a new word.
pub fn to_lower_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case() {
        assert_eq!(to_lower_snake_case("ClientMaxBodySize"), "client_max_body_size");
        assert_eq!(to_lower_snake_case("Aio"), "aio");
        assert_eq!(to_lower_snake_case("proxyPass"), "proxy_pass");
        assert_eq!(to_lower_snake_case(""), "");
    }

    #[test]
    fn test_table_directive_names() {
        let core: Vec<_> = PROPERTY_TABLE.core.iter().map(|f| f.directive.as_str()).collect();
        assert_eq!(
            core,
            vec![
                "absolute_redirect",
                "aio",
                "aio_write",
                "chunked_transfer_encoding",
                "client_body_buffer_size",
                "keepalive_requests",
                "client_max_body_size",
            ]
        );
        let headers: Vec<_> = PROPERTY_TABLE.headers.iter().map(|f| f.directive.as_str()).collect();
        assert_eq!(headers, vec!["proxy_hide_header", "proxy_pass_header", "proxy_set_header"]);
    }

    #[test]
    fn test_lookup_reads_and_writes_same_field() {
        let field = PROPERTY_TABLE.lookup("client_max_body_size").unwrap();
        assert_eq!(field.kind, FieldKind::Scalar);

        let mut group = PropertyGroup::default();
        if let FieldSlot::Scalar(slot) = field.slot(&mut group) {
            *slot = Some("10m".to_string());
        }
        assert_eq!(group.client_max_body_size.as_deref(), Some("10m"));
        assert!(matches!(field.read(&group), FieldValue::Scalar(Some("10m"))));

        let field = PROPERTY_TABLE.lookup("proxy_set_header").unwrap();
        assert_eq!(field.kind, FieldKind::PairSequence);
        assert!(PROPERTY_TABLE.lookup("proxy_pass").is_none());
    }
}
