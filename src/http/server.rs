//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Assemble the Axum router for the time or greeting service
//! - Wire up middleware (request ID, tracing, timeout)
//! - Serve on a bound listener until shutdown is signalled

use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, http::Request, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnFailure, TraceLayer},
};
use tracing::Level;

use crate::config::ServiceConfig;
use crate::greeting::{self, TimeClient, UpstreamError};
use crate::health;
use crate::http::request::{request_id, MakeRequestUuidV4, X_REQUEST_ID};
use crate::http::response::not_found;
use crate::lifecycle::shutdown::wait_for;
use crate::time::{self, Clock, SystemClock};

/// One running service: either the time provider or the greeting composer.
pub struct HttpServer {
    name: &'static str,
    router: Router,
}

impl HttpServer {
    /// Time service backed by the system clock.
    pub fn time(config: &ServiceConfig) -> Self {
        Self::time_with_clock(config, Arc::new(SystemClock))
    }

    /// Time service backed by an arbitrary clock.
    pub fn time_with_clock(config: &ServiceConfig, clock: Arc<dyn Clock>) -> Self {
        let routes = time::routes(clock).merge(health::routes("time"));
        Self::new("time", routes, config)
    }

    /// Greeting service calling the configured time service.
    pub fn greeting(config: &ServiceConfig) -> Result<Self, UpstreamError> {
        let client = TimeClient::new(&config.upstream)?;
        tracing::info!(
            upstream = %client.time_url(),
            provider = %client.provider_name(),
            "Greeting service configured"
        );

        let routes = greeting::routes(Arc::new(client)).merge(health::routes("greeting"));
        Ok(Self::new("greeting", routes, config))
    }

    fn new(name: &'static str, routes: Router, config: &ServiceConfig) -> Self {
        Self {
            name,
            router: Self::build_router(routes, config),
        }
    }

    /// Wrap service routes with the shared middleware stack.
    #[allow(deprecated)]
    fn build_router(routes: Router, config: &ServiceConfig) -> Router {
        routes
            .fallback(not_found)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(|request: &Request<Body>| {
                        tracing::info_span!(
                            "request",
                            method = %request.method(),
                            path = %request.uri().path(),
                            request_id = %request_id(request.headers()).unwrap_or("unknown"),
                        )
                    })
                    // Handlers log their own failures; the access log stays quiet.
                    .on_failure(DefaultOnFailure::new().level(Level::DEBUG)),
            )
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
    }

    /// Service name used in logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The fully layered router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            service = self.name,
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for(shutdown))
            .await?;

        tracing::info!(service = self.name, "HTTP server stopped");
        Ok(())
    }
}
