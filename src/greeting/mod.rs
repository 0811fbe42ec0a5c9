//! Greeting composer.
//!
//! # Data Flow
//! ```text
//! GET /greet
//!     → handler.rs (read x-request-id)
//!     → client.rs (GET {upstream}/time, forward x-request-id)
//!     → 200 {"greeting": "Hello! The current time is <time>"}
//!       or 500 {"error": "Could not retrieve time from <provider>"}
//! ```

pub mod client;
pub mod handler;
pub mod types;

use std::sync::Arc;

use axum::{routing::get, Router};

pub use client::{TimeClient, UpstreamError};
pub use handler::GreetingState;
pub use types::GreetingResponse;

/// Routes served by the greeting service.
pub fn routes(client: Arc<TimeClient>) -> Router {
    Router::new()
        .route("/greet", get(handler::get_greeting))
        .with_state(GreetingState { client })
}
