//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with a single fallback handler
//! - Wire up middleware (timeout, request ID, tracing)
//! - Serve endpoints before consulting the resolver
//! - Resolve every other request and map the decision to a response
//! - Swap in reloaded sites (dev mode)
//! - Observability (metrics, correlation IDs)

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{
    extract::{Request, State},
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::http::request::{request_id_header, request_id_of, UuidRequestId};
use crate::http::response::{decision_response, endpoint_response};
use crate::lifecycle::startup::Site;
use crate::observability::metrics;
use crate::routing::context::RequestContext;
use crate::routing::path::strip_base;

/// Which execution mode the server runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerMode {
    /// Server-rendered: config and content fixed at startup.
    Production,
    /// Dev: sites are swapped in as the watcher reloads them.
    Dev,
}

impl ServerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerMode::Production => "serve",
            ServerMode::Dev => "dev",
        }
    }
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub site: Arc<ArcSwap<Site>>,
    pub mode: ServerMode,
}

/// HTTP server answering requests through the locale resolver.
pub struct HttpServer {
    router: Router,
    site: Arc<ArcSwap<Site>>,
    mode: ServerMode,
}

impl HttpServer {
    pub fn new(site: Site, mode: ServerMode) -> Self {
        let timeout = Duration::from_secs(site.config.server.request_timeout_secs);
        let site = Arc::new(ArcSwap::from_pointee(site));
        let state = AppState {
            site: site.clone(),
            mode,
        };

        let router = Self::build_router(timeout, state);
        Self { router, site, mode }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(timeout: Duration, state: AppState) -> Router {
        Router::new()
            .fallback(locale_handler)
            .with_state(state)
            .layer(TimeoutLayer::new(timeout))
            .layer(PropagateRequestIdLayer::new(request_id_header()))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(request_id_header(), UuidRequestId))
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Handle on the live site, for callers that swap it themselves.
    pub fn site(&self) -> Arc<ArcSwap<Site>> {
        self.site.clone()
    }

    /// Run the server until `shutdown` fires.
    ///
    /// Sites received on `updates` replace the live one; requests in flight
    /// keep the snapshot they loaded.
    pub async fn run(
        self,
        listener: TcpListener,
        updates: Option<mpsc::UnboundedReceiver<Site>>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, mode = self.mode.as_str(), "HTTP server starting");

        if let Some(mut updates) = updates {
            let site = self.site.clone();
            tokio::spawn(async move {
                while let Some(next) = updates.recv().await {
                    tracing::info!(pages = next.pages.len(), "Site reloaded");
                    site.store(Arc::new(next));
                }
            });
        }

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Endpoints first, then the resolver.
async fn locale_handler(State(state): State<AppState>, request: Request) -> Response {
    let site = state.site.load_full();
    let mode = state.mode.as_str();
    let request_id = request_id_of(&request).to_string();
    let path = request.uri().path().to_string();

    if let Some(rest) = strip_base(&path, site.resolver.config().base()) {
        if let Some(endpoint) = site.pages.endpoint(rest) {
            tracing::debug!(request_id = %request_id, path = %path, "Serving endpoint");
            metrics::record_endpoint_hit(mode);
            return endpoint_response(endpoint);
        }
    }

    let ctx = RequestContext::from_request_parts(request.uri(), request.headers());
    let decision = site.resolver.resolve(&ctx, &site.pages);
    metrics::record_decision(&decision, mode);

    tracing::debug!(
        request_id = %request_id,
        path = %path,
        host = ?ctx.host(),
        decision = ?decision,
        "Routed request"
    );

    decision_response(&decision, &site, ctx.accept_language())
}
