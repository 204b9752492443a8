//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, request ID)
//! - Build one relay executor per provider pool over a shared upstream client
//! - Serve plain HTTP or TLS with graceful shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::{ConnectInfo, DefaultBodyLimit};
use axum::http::header::InvalidHeaderValue;
use axum::http::Request;
use axum::routing::any;
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::{ProviderConfig, RelayConfig};
use crate::http::handlers;
use crate::http::request::{UuidRequestId, X_REQUEST_ID};
use crate::relay::{RelayExecutor, RelaySettings};
use crate::upstream::{HttpsClient, ProviderError, ProviderList, WeightedSelector};

/// Executor type used by the running server.
pub type DohExecutor = RelayExecutor<HttpsClient>;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub general: Arc<DohExecutor>,
    pub family: Arc<DohExecutor>,
    /// Scheme advertised on the landing page when no proxy header says otherwise.
    pub public_scheme: &'static str,
}

/// Errors raised while assembling the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("invalid provider pool: {0}")]
    Providers(#[from] ProviderError),

    #[error("invalid header value: {0}")]
    Header(#[from] InvalidHeaderValue),
}

/// HTTP server for the DoH relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Result<Self, ServerError> {
        let client = Arc::new(HttpsClient::new(&config.upstream)?);
        let settings = RelaySettings::from_config(&config.upstream, &config.response)?;

        let general = build_executor("general", &config.pools.general, &client, &settings)?;
        let family = build_executor("family", &config.pools.family, &client, &settings)?;

        tracing::info!(
            general = general.providers().len(),
            family = family.providers().len(),
            attempt_timeout_ms = config.upstream.attempt_timeout_ms,
            "Provider pools ready"
        );

        let state = AppState {
            general: Arc::new(general),
            family: Arc::new(family),
            public_scheme: if config.listener.tls.is_some() { "https" } else { "http" },
        };

        let router = Self::build_router(state, config.limits.max_body_bytes);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState, max_body_bytes: usize) -> Router {
        Router::new()
            .route("/", any(handlers::root))
            .route("/dns-query", any(handlers::general_query))
            .route("/family/dns-query", any(handlers::family_query))
            .fallback(handlers::fallback)
            .with_state(state)
            .layer(DefaultBodyLimit::max(max_body_bytes))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
                    .layer(TraceLayer::new_for_http().make_span_with(request_span))
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID)),
            )
    }

    /// The assembled router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Serve plain HTTP on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Serve HTTPS on `addr` until `shutdown` fires.
    pub async fn run_tls(
        self,
        addr: SocketAddr,
        tls: RustlsConfig,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        tracing::info!(address = %addr, "HTTPS server starting");

        let handle = axum_server::Handle::new();
        let drain = handle.clone();
        tokio::spawn(async move {
            let _ = shutdown.recv().await;
            tracing::info!("Shutdown signal received, draining connections");
            drain.graceful_shutdown(Some(Duration::from_secs(10)));
        });

        axum_server::bind_rustls(addr, tls)
            .handle(handle)
            .serve(self.router.into_make_service_with_connect_info::<SocketAddr>())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }
}

fn build_executor(
    pool: &str,
    providers: &[ProviderConfig],
    client: &Arc<HttpsClient>,
    settings: &RelaySettings,
) -> Result<DohExecutor, ProviderError> {
    Ok(RelayExecutor::new(
        pool,
        ProviderList::from_configs(providers)?,
        client.clone(),
        WeightedSelector::default(),
        settings.clone(),
    ))
}

/// Span for one inbound request. The query string is left out: it carries the DNS question.
fn request_span(request: &Request<Body>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());

    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
        peer = %peer,
    )
}
