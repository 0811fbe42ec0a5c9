//! Time and greeting services.
//!
//! Two small HTTP services: a time provider answering `GET /time`, and a
//! greeting composer answering `GET /greet` by calling the time provider and
//! embedding its timestamp.
//!
//! ```text
//!   client ──GET /greet──▶ greeting service ──GET /time──▶ time service
//!          ◀─{"greeting"}─                   ◀──{"time"}──
//! ```

pub mod config;
pub mod greeting;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod time;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
