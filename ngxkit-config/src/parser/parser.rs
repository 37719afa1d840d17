//! nginx configuration parser
//!
//! Single pass over statements with an explicit stack of open blocks. Simple
//! directives always target the innermost open block, so a header directive
//! inside `location` lands on the location and never on its server.

use crate::parser::error::{Context, ParseError, ParseResult};
use crate::parser::lexer::{LexError, LineIndex, tokenize};
use crate::parser::statement::{Statement, statements};
use crate::render::PROPERTY_TABLE;
use crate::render::fields::{FieldSlot, PropertyField};
use ngxkit_core::{
    AccessRule, ErrorPage, Location, ParseUnit, PropertyGroup, Server, StatusMatch, Upstream,
};
use tracing::{debug, trace};

/// An open block and the record being filled in
#[derive(Debug)]
enum Frame {
    Http { line: usize },
    Server { line: usize, server: Server },
    /// The enclosing server frame moves in here and moves back out on close
    Location {
        line: usize,
        location: Location,
        parent_line: usize,
        parent: Server,
    },
    Upstream { line: usize, upstream: Upstream },
}

impl Frame {
    fn line(&self) -> usize {
        match self {
            Frame::Http { line }
            | Frame::Server { line, .. }
            | Frame::Location { line, .. }
            | Frame::Upstream { line, .. } => *line,
        }
    }

    fn context(&self) -> Context {
        match self {
            Frame::Http { .. } => Context::Http,
            Frame::Server { .. } => Context::Server,
            Frame::Location { .. } => Context::Location,
            Frame::Upstream { .. } => Context::Upstream,
        }
    }
}

/// Parser state
pub struct Parser<'src> {
    lines: LineIndex<'src>,
    stack: Vec<Frame>,
    unit: ParseUnit,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            lines: LineIndex::new(source),
            stack: Vec::new(),
            unit: ParseUnit::new(),
        }
    }

    /// Parse the whole source; no partial unit survives an error
    pub fn parse(mut self) -> ParseResult<ParseUnit> {
        let tokens = tokenize(self.lines_source()).map_err(|err| match err {
            LexError::UnexpectedChar { position } => {
                let line = self.lines.line_of(position);
                ParseError::InvalidToken {
                    line,
                    text: self.lines.line_text(line).to_string(),
                }
            }
        })?;

        for statement in statements(tokens, &self.lines)? {
            match statement {
                Statement::Open { line, name, args } => self.open(line, &name, args)?,
                Statement::Simple { line, name, args } => self.simple(line, &name, args)?,
                Statement::Close { line } => self.close(line)?,
            }
        }

        if let Some(frame) = self.stack.last() {
            return Err(ParseError::UnterminatedBlock {
                opened_at_line: frame.line(),
            });
        }

        debug!(
            upstreams = self.unit.upstreams().len(),
            servers = self.unit.servers().len(),
            "parsed configuration"
        );
        Ok(self.unit)
    }

    fn lines_source(&self) -> &'src str {
        self.lines.source()
    }

    fn context(&self) -> Context {
        self.stack.last().map_or(Context::Main, Frame::context)
    }

    // ========================================
    // Blocks
    // ========================================

    fn open(&mut self, line: usize, name: &str, args: Vec<String>) -> ParseResult<()> {
        let context = self.context();
        let frame = match (name, context) {
            ("http", Context::Main) => {
                no_args(line, name, &args)?;
                Frame::Http { line }
            }
            ("server", Context::Main | Context::Http) => {
                no_args(line, name, &args)?;
                Frame::Server {
                    line,
                    server: Server::new(),
                }
            }
            ("upstream", Context::Main | Context::Http) => Frame::Upstream {
                line,
                upstream: Upstream::new(single(line, name, args)?),
            },
            ("location", Context::Server) => {
                let location = Location::new(joined(line, name, args)?);
                let Some(Frame::Server {
                    line: parent_line,
                    server: parent,
                }) = self.stack.pop()
                else {
                    return Err(ParseError::MisplacedDirective {
                        line,
                        directive: name.to_string(),
                        context,
                    });
                };
                Frame::Location {
                    line,
                    location,
                    parent_line,
                    parent,
                }
            }
            ("http" | "server" | "upstream" | "location", _) => {
                return Err(ParseError::MisplacedDirective {
                    line,
                    directive: name.to_string(),
                    context,
                });
            }
            _ => return Err(self.unknown(line)),
        };

        debug!(line, block = name, "opened block");
        self.stack.push(frame);
        Ok(())
    }

    fn close(&mut self, line: usize) -> ParseResult<()> {
        let frame = self
            .stack
            .pop()
            .ok_or(ParseError::UnmatchedCloseBrace { line })?;
        debug!(line, block = %frame.context(), opened_at = frame.line(), "closed block");

        match frame {
            Frame::Http { .. } => {}
            Frame::Server { server, .. } => self.unit.add_server(server),
            Frame::Location {
                location,
                parent_line,
                mut parent,
                ..
            } => {
                parent.locations.push(location);
                self.stack.push(Frame::Server {
                    line: parent_line,
                    server: parent,
                });
            }
            Frame::Upstream { line, upstream } => {
                self.unit
                    .add_upstream(upstream)
                    .map_err(|err| model_error(err, line, "upstream"))?;
            }
        }
        Ok(())
    }

    // ========================================
    // Simple directives
    // ========================================

    fn simple(&mut self, line: usize, name: &str, args: Vec<String>) -> ParseResult<()> {
        trace!(line, directive = name, ?args, "directive");
        let context = self.context();
        let misplaced = || ParseError::MisplacedDirective {
            line,
            directive: name.to_string(),
            context,
        };

        match name {
            "server_name" => {
                let server = self.server_mut().ok_or_else(misplaced)?;
                server.names.extend(required(line, name, args)?);
            }
            "listen" => {
                let server = self.server_mut().ok_or_else(misplaced)?;
                server.listens.push(joined(line, name, args)?);
            }
            "server" => {
                let upstream = self.upstream_mut().ok_or_else(misplaced)?;
                upstream.servers.push(joined(line, name, args)?);
            }
            "proxy_pass" => {
                let location = self.location_mut().ok_or_else(misplaced)?;
                if location.proxy_pass.is_some() {
                    return Err(duplicate(line, name));
                }
                location.proxy_pass = Some(single(line, name, args)?);
            }
            "include" => {
                let includes = self.includes_mut().ok_or_else(misplaced)?;
                includes.push(single(line, name, args)?);
            }
            "allow" | "deny" => {
                let (group, _) = self.properties_mut().ok_or_else(misplaced)?;
                let address = single(line, name, args)?;
                group.access.push(if name == "allow" {
                    AccessRule::allow(address)
                } else {
                    AccessRule::deny(address)
                });
            }
            "error_page" => {
                let (_, page) = self.properties_mut().ok_or_else(misplaced)?;
                if page.is_some() {
                    return Err(duplicate(line, name));
                }
                *page = Some(error_page(line, args)?);
            }
            _ => {
                let Some(field) = PROPERTY_TABLE.lookup(name) else {
                    return Err(self.unknown(line));
                };
                let (group, _) = self.properties_mut().ok_or_else(misplaced)?;
                assign_field(field, group, line, args)?;
            }
        }
        Ok(())
    }

    fn unknown(&self, line: usize) -> ParseError {
        ParseError::UnknownDirective {
            line,
            text: self.lines.line_text(line).to_string(),
        }
    }

    // ========================================
    // Attachment targets (innermost block only)
    // ========================================

    fn server_mut(&mut self) -> Option<&mut Server> {
        match self.stack.last_mut()? {
            Frame::Server { server, .. } => Some(server),
            _ => None,
        }
    }

    fn location_mut(&mut self) -> Option<&mut Location> {
        match self.stack.last_mut()? {
            Frame::Location { location, .. } => Some(location),
            _ => None,
        }
    }

    fn upstream_mut(&mut self) -> Option<&mut Upstream> {
        match self.stack.last_mut()? {
            Frame::Upstream { upstream, .. } => Some(upstream),
            _ => None,
        }
    }

    fn includes_mut(&mut self) -> Option<&mut Vec<String>> {
        match self.stack.last_mut()? {
            Frame::Server { server, .. } => Some(&mut server.includes),
            Frame::Location { location, .. } => Some(&mut location.includes),
            _ => None,
        }
    }

    fn properties_mut(&mut self) -> Option<(&mut PropertyGroup, &mut Option<ErrorPage>)> {
        match self.stack.last_mut()? {
            Frame::Server { server, .. } => Some((&mut server.properties, &mut server.error_page)),
            Frame::Location { location, .. } => {
                Some((&mut location.properties, &mut location.error_page))
            }
            _ => None,
        }
    }
}

// ========================================
// Argument helpers
// ========================================

fn invalid(line: usize, directive: &str, message: impl Into<String>) -> ParseError {
    ParseError::InvalidArgument {
        line,
        directive: directive.to_string(),
        message: message.into(),
    }
}

fn duplicate(line: usize, directive: &str) -> ParseError {
    ParseError::DuplicateDirective {
        line,
        directive: directive.to_string(),
    }
}

fn model_error(err: ngxkit_core::Error, line: usize, directive: &str) -> ParseError {
    match err {
        ngxkit_core::Error::DuplicateUpstream { name } => {
            ParseError::DuplicateUpstreamName { name, line }
        }
        other => invalid(line, directive, other.to_string()),
    }
}

fn no_args(line: usize, directive: &str, args: &[String]) -> ParseResult<()> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(invalid(line, directive, "takes no arguments"))
    }
}

fn single(line: usize, directive: &str, args: Vec<String>) -> ParseResult<String> {
    match <[String; 1]>::try_from(args) {
        Ok([value]) => Ok(value),
        Err(args) => Err(invalid(
            line,
            directive,
            format!("expected 1 argument, found {}", args.len()),
        )),
    }
}

fn required(line: usize, directive: &str, args: Vec<String>) -> ParseResult<Vec<String>> {
    if args.is_empty() {
        return Err(invalid(line, directive, "expected at least 1 argument"));
    }
    Ok(args)
}

/// Arguments rejoined with single spaces, e.g. `listen 443 ssl`
fn joined(line: usize, directive: &str, args: Vec<String>) -> ParseResult<String> {
    Ok(required(line, directive, args)?.join(" "))
}

fn assign_field(
    field: &PropertyField,
    group: &mut PropertyGroup,
    line: usize,
    args: Vec<String>,
) -> ParseResult<()> {
    let name = field.directive.as_str();
    match field.slot(group) {
        FieldSlot::Scalar(slot) => {
            if slot.is_some() {
                return Err(duplicate(line, name));
            }
            *slot = Some(joined(line, name, args)?);
        }
        FieldSlot::Sequence(items) => items.push(single(line, name, args)?),
        FieldSlot::PairSequence(pairs) => {
            let mut args = args.into_iter();
            let (Some(header), Some(first)) = (args.next(), args.next()) else {
                return Err(invalid(line, name, "expected a header name and a value"));
            };
            let value = std::iter::once(first).chain(args).collect::<Vec<_>>().join(" ");
            pairs.push(ngxkit_core::SetHeader::new(header, value));
        }
    }
    Ok(())
}

/// `error_page code ... [=[response]] uri`
fn error_page(line: usize, args: Vec<String>) -> ParseResult<ErrorPage> {
    const NAME: &str = "error_page";

    let mut args = args;
    let uri = match args.pop() {
        Some(uri) if !args.is_empty() => uri,
        _ => return Err(invalid(line, NAME, "expected at least one code and a uri")),
    };

    let mut response = None;
    if let Some(value) = args.last().and_then(|a| a.strip_prefix('=')) {
        response = Some(value.to_string());
        args.pop();
    }

    let status = |code: &String| {
        code.parse::<StatusMatch>()
            .map_err(|err| model_error(err, line, NAME))
    };
    let Some((first, rest)) = args.split_first() else {
        return Err(invalid(line, NAME, "expected at least one status code"));
    };

    let mut page = ErrorPage::new(status(first)?, uri);
    for code in rest {
        page = page.with_code(status(code)?);
    }
    page.response_override = response;
    Ok(page)
}

/// Parse nginx configuration text into a parse unit
pub fn parse(source: &str) -> ParseResult<ParseUnit> {
    Parser::new(source).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::error::ErrorKind;
    use ngxkit_core::{AccessAction, SetHeader};

    #[test]
    fn test_parse_empty() {
        let unit = parse("").unwrap();
        assert!(unit.is_empty());

        let unit = parse("# only a comment\n\n").unwrap();
        assert!(unit.is_empty());
    }

    #[test]
    fn test_parse_server() {
        let unit = parse(
            r#"
            server {
                listen 80;
                listen 127.0.0.1:8080;
                listen 80;
                server_name example.com www.example.com;
                include /etc/nginx/includes/*.conf;
            }
        "#,
        )
        .unwrap();

        assert_eq!(unit.servers().len(), 1);
        let server = &unit.servers()[0];
        assert_eq!(server.names, vec!["example.com", "www.example.com"]);
        assert_eq!(server.listens, vec!["80", "127.0.0.1:8080", "80"]);
        assert_eq!(server.includes, vec!["/etc/nginx/includes/*.conf"]);
    }

    #[test]
    fn test_header_order_preserved_in_location() {
        let unit = parse(
            r#"
            server {
                location / {
                    proxy_hide_header A;
                    proxy_hide_header B;
                    proxy_hide_header A;
                }
            }
        "#,
        )
        .unwrap();

        let server = &unit.servers()[0];
        assert!(server.properties.hide_headers.is_empty());
        assert_eq!(server.locations[0].properties.hide_headers, vec!["A", "B", "A"]);
    }

    #[test]
    fn test_innermost_scope_attachment() {
        let unit = parse(
            "server { listen 80; proxy_hide_header X-Powered-By;\n  location / { proxy_set_header Foo bar; } }",
        )
        .unwrap();

        let server = &unit.servers()[0];
        assert_eq!(server.properties.hide_headers, vec!["X-Powered-By"]);
        assert!(server.properties.set_headers.is_empty());

        let location = &server.locations[0];
        assert_eq!(location.properties.set_headers, vec![SetHeader::new("Foo", "bar")]);
        assert!(location.properties.hide_headers.is_empty());
    }

    #[test]
    fn test_server_scope_resumes_after_location() {
        let unit = parse(
            r#"
            server {
                location /a {
                    proxy_pass_header Server;
                }
                proxy_pass_header X-Accel;
            }
        "#,
        )
        .unwrap();
        let server = &unit.servers()[0];
        assert_eq!(server.properties.pass_headers, vec!["X-Accel"]);
        assert_eq!(server.locations[0].properties.pass_headers, vec!["Server"]);
    }

    #[test]
    fn test_set_header_value_rejoined() {
        let unit = parse(
            r#"
            server {
                proxy_set_header X-Forwarded-For $proxy_add_x_forwarded_for;
                proxy_set_header Upgrade   $http_upgrade   extra;
                proxy_set_header Accept-Encoding "";
                proxy_set_header X-Forwarded-For second;
            }
        "#,
        )
        .unwrap();

        assert_eq!(
            unit.servers()[0].properties.set_headers,
            vec![
                SetHeader::new("X-Forwarded-For", "$proxy_add_x_forwarded_for"),
                SetHeader::new("Upgrade", "$http_upgrade extra"),
                SetHeader::new("Accept-Encoding", ""),
                SetHeader::new("X-Forwarded-For", "second"),
            ]
        );
    }

    #[test]
    fn test_end_to_end_example() {
        let unit = parse(
            r#"
            upstream backend { server 10.0.0.1:80; server 10.0.0.2:80; }
            server { listen 80; server_name example.com;
              location / { proxy_pass http://backend; } }
        "#,
        )
        .unwrap();

        assert_eq!(unit.upstreams().len(), 1);
        let upstream = &unit.upstreams()[0];
        assert_eq!(upstream.name, "backend");
        assert_eq!(upstream.servers, vec!["10.0.0.1:80", "10.0.0.2:80"]);

        let server = &unit.servers()[0];
        assert_eq!(server.names, vec!["example.com"]);
        assert_eq!(server.listens, vec!["80"]);
        assert_eq!(server.locations.len(), 1);
        assert_eq!(server.locations[0].path, "/");
        assert_eq!(server.locations[0].proxy_pass.as_deref(), Some("http://backend"));
    }

    #[test]
    fn test_duplicate_upstream() {
        let err = parse(
            "upstream same_name {\n server a:80;\n}\nupstream same_name {\n server b:80;\n}\n",
        )
        .unwrap_err();
        assert_eq!(
            err,
            ParseError::DuplicateUpstreamName {
                name: "same_name".to_string(),
                line: 4,
            }
        );
        assert_eq!(err.kind(), ErrorKind::DuplicateDefinition);
    }

    #[test]
    fn test_unknown_directive_fails_closed() {
        let err = parse("server {\n  listen 80;\n  foo_bar baz;\n}\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownDirective {
                line: 3,
                text: "foo_bar baz;".to_string(),
            }
        );
        assert_eq!(err.kind(), ErrorKind::UnrecognizedInput);
    }

    #[test]
    fn test_unknown_block() {
        let err = parse("server {\n  if ($host) {\n  }\n}").unwrap_err();
        assert!(matches!(err, ParseError::UnknownDirective { line: 2, .. }));
    }

    #[test]
    fn test_unmatched_close_brace() {
        let err = parse("server {\n}\n}\n").unwrap_err();
        assert_eq!(err, ParseError::UnmatchedCloseBrace { line: 3 });
        assert_eq!(err.kind(), ErrorKind::Structural);
    }

    #[test]
    fn test_unterminated_block_reports_innermost() {
        let err = parse("server {\n  location / {\n    proxy_pass http://a;\n").unwrap_err();
        assert_eq!(err, ParseError::UnterminatedBlock { opened_at_line: 2 });
    }

    #[test]
    fn test_server_frame_restored_after_location() {
        let err = parse("server {\n  location /a {\n  }\n  listen 80;\n").unwrap_err();
        assert_eq!(err, ParseError::UnterminatedBlock { opened_at_line: 1 });

        let unit = parse(
            "server {\n listen 80;\n location /a {\n }\n location /b {\n }\n listen 81;\n}",
        )
        .unwrap();
        let server = &unit.servers()[0];
        assert_eq!(server.listens, vec!["80", "81"]);
        let paths: Vec<_> = server.locations.iter().map(|l| l.path.as_str()).collect();
        assert_eq!(paths, vec!["/a", "/b"]);
    }

    #[test]
    fn test_quoted_arguments_kept_verbatim() {
        let unit = parse("server {\n listen \"443  ssl\";\n location \"\" {\n }\n}").unwrap();
        let server = &unit.servers()[0];
        assert_eq!(server.listens, vec!["443  ssl"]);
        assert_eq!(server.locations[0].path, "");
    }

    #[test]
    fn test_header_outside_block_is_structural() {
        let err = parse("proxy_hide_header X-Powered-By;").unwrap_err();
        assert_eq!(
            err,
            ParseError::MisplacedDirective {
                line: 1,
                directive: "proxy_hide_header".to_string(),
                context: Context::Main,
            }
        );
        assert_eq!(err.kind(), ErrorKind::Structural);
    }

    #[test]
    fn test_misplaced_directives() {
        let cases = [
            ("server {\n location / {\n listen 80;\n }\n}", "listen", Context::Location),
            ("server {\n proxy_pass http://a;\n}", "proxy_pass", Context::Server),
            ("server {\n server 10.0.0.1:80;\n}", "server", Context::Server),
            ("upstream u {\n proxy_hide_header X;\n}", "proxy_hide_header", Context::Upstream),
            ("server {\n server {\n }\n}", "server", Context::Server),
            ("server {\n location / {\n location /a {\n }\n }\n}", "location", Context::Location),
            ("location / {\n}", "location", Context::Main),
        ];
        for (source, directive, context) in cases {
            match parse(source) {
                Err(ParseError::MisplacedDirective {
                    directive: d,
                    context: c,
                    ..
                }) => {
                    assert_eq!(d, directive, "{source}");
                    assert_eq!(c, context, "{source}");
                }
                other => panic!("{source}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_http_wrapper_is_transparent() {
        let unit = parse(
            r#"
            http {
                upstream app { server 127.0.0.1:3000; }
                server { listen 8080; }
            }
        "#,
        )
        .unwrap();
        assert_eq!(unit.upstreams()[0].name, "app");
        assert_eq!(unit.servers()[0].listens, vec!["8080"]);
    }

    #[test]
    fn test_upstream_entry_keeps_parameters() {
        let unit = parse("upstream u {\n server 10.0.0.1:80 weight=5 max_fails=3;\n}").unwrap();
        assert_eq!(unit.upstreams()[0].servers, vec!["10.0.0.1:80 weight=5 max_fails=3"]);
    }

    #[test]
    fn test_access_and_core_properties() {
        let unit = parse(
            r#"
            server {
                allow 10.0.0.0/8;
                deny all;
                client_max_body_size 10m;
                keepalive_requests 1000;
                location /upload {
                    client_max_body_size 100m;
                    aio threads;
                }
            }
        "#,
        )
        .unwrap();

        let server = &unit.servers()[0];
        assert_eq!(server.properties.access.len(), 2);
        assert_eq!(server.properties.access[0].action, AccessAction::Allow);
        assert_eq!(server.properties.access[1], AccessRule::deny("all"));
        assert_eq!(server.properties.client_max_body_size.as_deref(), Some("10m"));
        assert_eq!(server.properties.keepalive_requests.as_deref(), Some("1000"));

        // Nothing leaks between scopes
        let location = &server.locations[0];
        assert_eq!(location.properties.client_max_body_size.as_deref(), Some("100m"));
        assert_eq!(location.properties.aio.as_deref(), Some("threads"));
        assert!(location.properties.access.is_empty());
        assert!(location.properties.keepalive_requests.is_none());
    }

    #[test]
    fn test_error_page() {
        let unit = parse(
            r#"
            server {
                error_page 500 502 503 504 /50x.html;
                location / {
                    error_page 404 =200 /empty.gif;
                }
                location /b {
                    error_page 404 = @fallback;
                }
            }
        "#,
        )
        .unwrap();

        let server = &unit.servers()[0];
        let page = server.error_page.as_ref().unwrap();
        assert_eq!(page.codes().len(), 4);
        assert!(page.codes().contains(&StatusMatch::code(502).unwrap()));
        assert_eq!(page.uri, "/50x.html");
        assert!(page.response_override.is_none());

        let page = server.locations[0].error_page.as_ref().unwrap();
        assert_eq!(page.response_override.as_deref(), Some("200"));
        assert_eq!(page.uri, "/empty.gif");

        let page = server.locations[1].error_page.as_ref().unwrap();
        assert_eq!(page.response_override.as_deref(), Some(""));
        assert_eq!(page.uri, "@fallback");
    }

    #[test]
    fn test_error_page_invalid() {
        for source in [
            "server {\n error_page /50x.html;\n}",
            "server {\n error_page =200 /x;\n}",
            "server {\n error_page 200 /x;\n}",
            "server {\n error_page abc /x;\n}",
        ] {
            let err = parse(source).unwrap_err();
            assert!(
                matches!(err, ParseError::InvalidArgument { line: 2, .. }),
                "{source}: {err:?}"
            );
        }
    }

    #[test]
    fn test_duplicate_single_valued_directives() {
        for (source, directive) in [
            ("server {\n location / {\n proxy_pass http://a;\n proxy_pass http://b;\n }\n}", "proxy_pass"),
            ("server {\n aio on;\n aio off;\n}", "aio"),
            ("server {\n error_page 404 /a;\n error_page 500 /b;\n}", "error_page"),
        ] {
            match parse(source) {
                Err(ParseError::DuplicateDirective { directive: d, .. }) => assert_eq!(d, directive),
                other => panic!("{source}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_argument_arity() {
        assert!(matches!(
            parse("server {\n proxy_hide_header A B;\n}"),
            Err(ParseError::InvalidArgument { line: 2, .. })
        ));
        assert!(matches!(
            parse("server {\n proxy_set_header Host;\n}"),
            Err(ParseError::InvalidArgument { line: 2, .. })
        ));
        assert!(matches!(
            parse("server {\n listen;\n}"),
            Err(ParseError::InvalidArgument { line: 2, .. })
        ));
        assert!(matches!(
            parse("server example.com {\n}"),
            Err(ParseError::InvalidArgument { line: 1, .. })
        ));
        assert!(matches!(
            parse("upstream {\n}"),
            Err(ParseError::InvalidArgument { line: 1, .. })
        ));
    }

    #[test]
    fn test_location_modifiers_kept_in_path() {
        let unit = parse("server {\n location ~* \\.(jpg|png)$ {\n }\n}").unwrap();
        assert_eq!(unit.servers()[0].locations[0].path, "~* \\.(jpg|png)$");
    }

    #[test]
    fn test_location_includes() {
        let unit = parse(
            "server {\n include /etc/nginx/a.conf;\n location / {\n include /etc/nginx/b.conf;\n }\n}",
        )
        .unwrap();
        let server = &unit.servers()[0];
        assert_eq!(server.includes, vec!["/etc/nginx/a.conf"]);
        assert_eq!(server.locations[0].includes, vec!["/etc/nginx/b.conf"]);
    }

    #[test]
    fn test_unterminated_quote_reports_line() {
        let err = parse("server {\n server_name \"broken;\n}").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidToken {
                line: 2,
                text: "server_name \"broken;".to_string(),
            }
        );
    }
}
