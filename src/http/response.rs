//! Routing decision → HTTP response.
//!
//! # Responsibilities
//! - Render `Serve` decisions from the page table
//! - Map `Redirect` to status + `Location`
//! - Map `NotFound` (and `Serve` without a page) to 404, using `404.html`
//!   when the site has one
//! - Serve endpoints verbatim
//!
//! # Design Decisions
//! - `Content-Language` is set on rendered pages
//! - A location that is not a valid header value is a server error

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
};

use crate::content::Endpoint;
use crate::lifecycle::startup::Site;
use crate::page::{render, PageContext};
use crate::routing::decision::RoutingDecision;

/// Build the response for `decision`.
pub fn decision_response(
    decision: &RoutingDecision,
    site: &Site,
    accept_language: Option<&str>,
) -> Response {
    match decision {
        RoutingDecision::Serve { locale, path, .. } => {
            let Some(template) = site.pages.page(locale, path) else {
                tracing::debug!(locale = %locale, path = %path, "No page for served locale");
                return not_found_response(site);
            };
            let ctx = PageContext::new(site.resolver.config(), locale, accept_language);
            let mut response = Html(render(template, &ctx)).into_response();
            if let Ok(value) = HeaderValue::from_str(locale) {
                response.headers_mut().insert(header::CONTENT_LANGUAGE, value);
            }
            response
        }
        RoutingDecision::Redirect { location, status } => redirect_response(location, *status),
        RoutingDecision::NotFound { .. } => not_found_response(site),
    }
}

pub fn redirect_response(location: &str, status: u16) -> Response {
    let status = StatusCode::from_u16(status)
        .ok()
        .filter(StatusCode::is_redirection)
        .unwrap_or(StatusCode::FOUND);
    match HeaderValue::from_str(location) {
        Ok(value) => (status, [(header::LOCATION, value)]).into_response(),
        Err(e) => {
            tracing::error!(location = %location, error = %e, "Invalid redirect location");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub fn not_found_response(site: &Site) -> Response {
    match site.pages.not_found() {
        Some(template) => {
            let config = site.resolver.config();
            let ctx = PageContext::new(config, config.default_locale().path(), None);
            (StatusCode::NOT_FOUND, Html(render(template, &ctx))).into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

pub fn endpoint_response(endpoint: &Endpoint) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, endpoint.content_type.as_str())
        .body(Body::from(endpoint.body.clone()))
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to build endpoint response");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        })
}
