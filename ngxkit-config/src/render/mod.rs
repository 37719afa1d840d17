//! Canonical renderer
//!
//! Turns model values into [`Directive`] trees and then into text. Property
//! groups go through [`PROPERTY_TABLE`], so adding a knob to the model and a
//! row to the table is enough to render it.
//!
//! Emission order inside a block:
//! `server_name` / location path, `listen`, access rules, core knobs,
//! `error_page`, `proxy_hide_header`, `proxy_pass_header`,
//! `proxy_set_header`, `include`, `proxy_pass`, nested locations.

pub mod directive;
pub mod fields;

pub use directive::Directive;
pub use fields::{FieldKind, PROPERTY_TABLE, PropertyField, to_lower_snake_case};

use fields::FieldValue;
use ngxkit_core::{ErrorPage, Location, ParseUnit, PropertyGroup, Server, Upstream};

/// Anything that renders to one or more top-level directives
pub trait Render {
    fn to_directives(&self) -> Vec<Directive>;
}

/// Render to canonical text; top-level blocks are separated by a blank line
pub fn render<R: Render + ?Sized>(item: &R) -> String {
    let directives = item.to_directives();
    let text = directives
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    tracing::debug!(blocks = directives.len(), bytes = text.len(), "rendered configuration");
    text
}

impl Render for ParseUnit {
    fn to_directives(&self) -> Vec<Directive> {
        self.upstreams()
            .iter()
            .flat_map(Render::to_directives)
            .chain(self.servers().iter().flat_map(Render::to_directives))
            .collect()
    }
}

impl Render for Upstream {
    fn to_directives(&self) -> Vec<Directive> {
        let body = self
            .servers
            .iter()
            .map(|entry| Directive::new("server").with_params(split_params(entry)))
            .collect();
        vec![Directive::simple("upstream", self.name.as_str()).with_block(body)]
    }
}

impl Render for Server {
    fn to_directives(&self) -> Vec<Directive> {
        let mut body = Vec::new();

        if !self.names.is_empty() {
            body.push(Directive::new("server_name").with_params(self.names.iter().map(String::as_str)));
        }
        for listen in &self.listens {
            body.push(Directive::new("listen").with_params(split_params(listen)));
        }

        push_properties(&mut body, &self.properties, self.error_page.as_ref());
        push_includes(&mut body, &self.includes);

        for location in &self.locations {
            body.extend(location.to_directives());
        }

        vec![Directive::new("server").with_block(body)]
    }
}

impl Render for Location {
    fn to_directives(&self) -> Vec<Directive> {
        let mut body = Vec::new();

        push_properties(&mut body, &self.properties, self.error_page.as_ref());
        push_includes(&mut body, &self.includes);

        if let Some(url) = &self.proxy_pass {
            body.push(Directive::simple("proxy_pass", url.as_str()));
        }

        vec![
            Directive::new("location")
                .with_params(split_params(&self.path))
                .with_block(body),
        ]
    }
}

/// Access rules, core knobs, `error_page`, then proxy headers
fn push_properties(body: &mut Vec<Directive>, group: &PropertyGroup, error_page: Option<&ErrorPage>) {
    for rule in &group.access {
        body.push(Directive::simple(rule.action.directive(), rule.address.as_str()));
    }

    for field in &PROPERTY_TABLE.core {
        push_field(body, field, group);
    }

    if let Some(page) = error_page {
        body.push(error_page_directive(page));
    }

    for field in &PROPERTY_TABLE.headers {
        push_field(body, field, group);
    }
}

fn push_field(body: &mut Vec<Directive>, field: &PropertyField, group: &PropertyGroup) {
    let name = field.directive.as_str();
    match field.read(group) {
        FieldValue::Scalar(Some(value)) if !value.is_empty() => {
            body.push(Directive::new(name).with_params(split_params(value)));
        }
        FieldValue::Scalar(_) => {}
        FieldValue::Sequence(items) => {
            body.extend(items.iter().map(|item| Directive::simple(name, item.as_str())));
        }
        FieldValue::PairSequence(pairs) => {
            body.extend(pairs.iter().map(|pair| {
                Directive::new(name)
                    .with_param(pair.header.as_str())
                    .with_param(pair.value.as_str())
            }));
        }
    }
}

/// Parameters for a value the parser stores as space-joined arguments
///
/// A value that is not a single-space join of plain words goes out as one
/// quoted parameter, so `""`, `" "` and `"443  ssl"` parse back unchanged.
fn split_params(value: &str) -> Vec<&str> {
    let words: Vec<&str> = value.split(' ').collect();
    if words
        .iter()
        .all(|word| !word.is_empty() && !word.contains(char::is_whitespace))
    {
        words
    } else {
        vec![value]
    }
}

fn push_includes(body: &mut Vec<Directive>, includes: &[String]) {
    body.extend(includes.iter().map(|path| Directive::simple("include", path.as_str())));
}

fn error_page_directive(page: &ErrorPage) -> Directive {
    let mut directive = Directive::new("error_page").with_params(page.codes().iter().map(ToString::to_string));
    if let Some(response) = &page.response_override {
        directive = directive.with_param(format!("={}", response));
    }
    directive.with_param(page.uri.as_str())
}
