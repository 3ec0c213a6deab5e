//! The resolver's sole output.
//!
//! A `RoutingDecision` is built fresh per request (or per pre-rendered path)
//! and consumed by the live server and the static build alike. Live mode
//! maps `Redirect` to a status plus `Location`; static mode renders it with
//! `meta_refresh_html`.

use serde::Serialize;

/// Status for locale and fallback redirects.
pub const FOUND: u16 = 302;
/// Status for trailing-slash normalization.
pub const MOVED_PERMANENTLY: u16 = 301;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoutingDecision {
    /// Render `path` (base and locale segment removed) in `locale`.
    Serve {
        locale: String,
        path: String,
        /// Locale originally requested, when this is a rewrite fallback.
        #[serde(skip_serializing_if = "Option::is_none")]
        fallback_from: Option<String>,
    },
    Redirect {
        location: String,
        status: u16,
    },
    NotFound {
        reason: MissReason,
    },
}

/// Why a request was not found. Diagnostics only; never changes the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissReason {
    OutsideBase,
    UnconfiguredLocale,
    DefaultLocalePrefixed,
    MissingLocalePrefix,
    UnknownHost,
    FallbackExhausted,
}

impl MissReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissReason::OutsideBase => "outside_base",
            MissReason::UnconfiguredLocale => "unconfigured_locale",
            MissReason::DefaultLocalePrefixed => "default_locale_prefixed",
            MissReason::MissingLocalePrefix => "missing_locale_prefix",
            MissReason::UnknownHost => "unknown_host",
            MissReason::FallbackExhausted => "fallback_exhausted",
        }
    }
}

impl RoutingDecision {
    pub fn serve(locale: impl Into<String>, path: impl Into<String>) -> Self {
        RoutingDecision::Serve {
            locale: locale.into(),
            path: path.into(),
            fallback_from: None,
        }
    }

    pub fn redirect(location: impl Into<String>, status: u16) -> Self {
        RoutingDecision::Redirect {
            location: location.into(),
            status,
        }
    }

    pub fn not_found(reason: MissReason) -> Self {
        RoutingDecision::NotFound { reason }
    }

    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RoutingDecision::Serve { .. } => "serve",
            RoutingDecision::Redirect { .. } => "redirect",
            RoutingDecision::NotFound { .. } => "not_found",
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, RoutingDecision::Redirect { .. })
    }
}

/// Static-mode rendering of a redirect.
pub fn meta_refresh_html(location: &str) -> String {
    let location = escape_attr(location);
    format!(
        "<!doctype html><title>Redirecting to: {location}</title>\
         <meta http-equiv=\"refresh\" content=\"0;url={location}\">\
         <meta name=\"robots\" content=\"noindex\">\
         <link rel=\"canonical\" href=\"{location}\">\
         <body><a href=\"{location}\">Redirecting to <code>{location}</code></a></body>"
    )
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_kind_tag() {
        let json = serde_json::to_value(RoutingDecision::redirect("/new-site/en", FOUND)).unwrap();
        assert_eq!(json["kind"], "redirect");
        assert_eq!(json["location"], "/new-site/en");
        assert_eq!(json["status"], 302);

        let json = serde_json::to_value(RoutingDecision::serve("en", "/start")).unwrap();
        assert!(json.get("fallback_from").is_none());

        let json = serde_json::to_value(RoutingDecision::not_found(MissReason::OutsideBase)).unwrap();
        assert_eq!(json["reason"], "outside_base");
    }

    #[test]
    fn test_meta_refresh() {
        let html = meta_refresh_html("/new-site/en");
        assert!(html.contains(r#"<meta http-equiv="refresh" content="0;url=/new-site/en">"#));
    }

    #[test]
    fn test_meta_refresh_escapes_location() {
        let html = meta_refresh_html("/a?x=\"1\"&y=2");
        assert!(html.contains("url=/a?x=&quot;1&quot;&amp;y=2"));
        assert!(!html.contains("x=\"1\""));

        let html = meta_refresh_html("/it's");
        assert!(html.contains("url=/it&#39;s"));
        assert!(!html.contains("it's"));
    }
}
