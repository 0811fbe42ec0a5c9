//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (assign or keep x-request-id)
//!     → service routes (time::routes / greeting::routes / health::routes)
//!     → response.rs (JSON fallback for unknown paths)
//!     → Send to client, x-request-id echoed
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{request_id, MakeRequestUuidV4, X_REQUEST_ID};
pub use server::HttpServer;
