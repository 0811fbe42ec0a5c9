//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{http::{HeaderMap, StatusCode}, routing::get, Router};
use tokio::net::TcpListener;

use time_greeter::{HttpServer, ServiceConfig, Shutdown};

/// Config pointing the greeting service at `upstream`, with short timeouts.
pub fn test_config(upstream: &str) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.time.bind_address = "127.0.0.1:0".into();
    config.greeting.bind_address = "127.0.0.1:0".into();
    config.upstream.base_url = upstream.to_string();
    config.upstream.connect_timeout_secs = 1;
    config.upstream.timeout_secs = 2;
    config
}

/// Serve `server` on an ephemeral loopback port.
pub async fn spawn_server(server: HttpServer, shutdown: &Shutdown) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    addr
}

/// Start a programmable mock time service. `f` receives the request headers
/// of each `GET /time` and returns the status and raw body to send.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(HeaderMap) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let f = Arc::new(f);
    let app = Router::new().route(
        "/time",
        get(move |headers: HeaderMap| {
            let f = f.clone();
            async move {
                let (status, body) = (*f)(headers).await;
                (StatusCode::from_u16(status).unwrap(), body)
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// An address nothing is listening on.
pub fn unused_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

/// HTTP client that never goes through an environment proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap()
}
