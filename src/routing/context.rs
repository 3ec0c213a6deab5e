//! Effective request context.
//!
//! Header overrides are folded in exactly once per request, so the rest of
//! routing never looks at raw headers:
//! - host: first `X-Forwarded-Host` value, else `Host`, else the URI authority
//! - protocol: first `X-Forwarded-Proto` value, else the URI scheme, else `http`
//!
//! Hosts are stored lower-cased with any `:port` removed.

use axum::http::{header, HeaderMap, Uri};
use url::Url;

pub const X_FORWARDED_HOST: &str = "x-forwarded-host";
pub const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Everything the resolver needs to know about one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    path: String,
    query: Option<String>,
    host: Option<String>,
    protocol: String,
    accept_language: Option<String>,
}

impl RequestContext {
    /// Context for a bare path, with no host and protocol `http`.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let path = if path.is_empty() { "/".to_string() } else { path };
        Self {
            path,
            query: None,
            host: None,
            protocol: "http".to_string(),
            accept_language: None,
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.query = (!query.is_empty()).then_some(query);
        self
    }

    /// Set the effective host; a port suffix is dropped.
    pub fn with_host(mut self, host: &str) -> Self {
        self.host = effective_host(host);
        self
    }

    pub fn with_protocol(mut self, protocol: &str) -> Self {
        let protocol = protocol.trim().to_ascii_lowercase();
        if !protocol.is_empty() {
            self.protocol = protocol;
        }
        self
    }

    pub fn with_accept_language(mut self, header: impl Into<String>) -> Self {
        self.accept_language = Some(header.into());
        self
    }

    /// Derive the context from an incoming request's URI and headers.
    pub fn from_request_parts(uri: &Uri, headers: &HeaderMap) -> Self {
        let mut ctx = Self::new(uri.path());
        if let Some(query) = uri.query() {
            ctx = ctx.with_query(query);
        }

        let host = first_value(headers, X_FORWARDED_HOST)
            .or_else(|| first_value(headers, header::HOST.as_str()))
            .or_else(|| uri.authority().map(|a| a.as_str().to_string()));
        if let Some(host) = host {
            ctx = ctx.with_host(&host);
        }

        let protocol = first_value(headers, X_FORWARDED_PROTO)
            .or_else(|| uri.scheme_str().map(str::to_string));
        if let Some(protocol) = protocol {
            ctx = ctx.with_protocol(&protocol);
        }

        if let Some(value) = headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok())
        {
            ctx = ctx.with_accept_language(value);
        }

        ctx
    }

    /// Derive the context from an absolute URL, as the CLI and static build do.
    pub fn from_url(raw: &str) -> Result<Self, url::ParseError> {
        let url = Url::parse(raw)?;
        let mut ctx = Self::new(url.path()).with_protocol(url.scheme());
        if let Some(query) = url.query() {
            ctx = ctx.with_query(query);
        }
        if let Some(host) = url.host_str() {
            ctx = ctx.with_host(host);
        }
        Ok(ctx)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Lower-cased effective host without port.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn accept_language(&self) -> Option<&str> {
        self.accept_language.as_deref()
    }
}

fn first_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let value = headers.get(name)?.to_str().ok()?;
    let first = value.split(',').next()?.trim();
    (!first.is_empty()).then(|| first.to_string())
}

fn effective_host(raw: &str) -> Option<String> {
    let host = strip_port(raw.trim()).to_ascii_lowercase();
    (!host.is_empty()).then_some(host)
}

/// `example.pt:8080` -> `example.pt`, `[::1]:8080` -> `[::1]`.
pub fn strip_port(authority: &str) -> &str {
    if authority.starts_with('[') {
        return match authority.find(']') {
            Some(end) => &authority[..=end],
            None => authority,
        };
    }
    match authority.rsplit_once(':') {
        Some((host, port)) if !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()) => host,
        _ => authority,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_strip_port() {
        assert_eq!(strip_port("example.pt:8080"), "example.pt");
        assert_eq!(strip_port("example.pt"), "example.pt");
        assert_eq!(strip_port("[::1]:4321"), "[::1]");
        assert_eq!(strip_port("[::1]"), "[::1]");
    }

    #[test]
    fn test_host_header_with_port() {
        let uri: Uri = "/new-site/start".parse().unwrap();
        let ctx = RequestContext::from_request_parts(
            &uri,
            &headers(&[("host", "Example.PT:8080"), ("x-forwarded-proto", "https")]),
        );
        assert_eq!(ctx.host(), Some("example.pt"));
        assert_eq!(ctx.protocol(), "https");
        assert_eq!(ctx.path(), "/new-site/start");
    }

    #[test]
    fn test_forwarded_host_overrides_host() {
        let uri: Uri = "/".parse().unwrap();
        let ctx = RequestContext::from_request_parts(
            &uri,
            &headers(&[
                ("host", "localhost:4321"),
                ("x-forwarded-host", "example.pt, proxy.internal"),
                ("x-forwarded-proto", "https"),
            ]),
        );
        assert_eq!(ctx.host(), Some("example.pt"));
        assert_eq!(ctx.protocol(), "https");
    }

    #[test]
    fn test_defaults_without_headers() {
        let uri: Uri = "/a?b=c".parse().unwrap();
        let ctx = RequestContext::from_request_parts(&uri, &HeaderMap::new());
        assert_eq!(ctx.host(), None);
        assert_eq!(ctx.protocol(), "http");
        assert_eq!(ctx.query(), Some("b=c"));
        assert_eq!(ctx.accept_language(), None);
    }

    #[test]
    fn test_from_url() {
        let ctx = RequestContext::from_url("https://it.example.com:8443/about?x=1").unwrap();
        assert_eq!(ctx.host(), Some("it.example.com"));
        assert_eq!(ctx.protocol(), "https");
        assert_eq!(ctx.path(), "/about");
        assert_eq!(ctx.query(), Some("x=1"));
    }

    #[test]
    fn test_empty_query_is_none() {
        let ctx = RequestContext::new("/").with_query("");
        assert_eq!(ctx.query(), None);
    }
}
