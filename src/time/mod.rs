//! Time provider.
//!
//! Serves `GET /time` with the current UTC time as ISO-8601. Always succeeds.

pub mod clock;
pub mod handler;
pub mod types;

use std::sync::Arc;

use axum::{routing::get, Router};

pub use clock::{to_iso8601, Clock, FixedClock, SystemClock};
pub use handler::TimeState;
pub use types::TimeResponse;

/// Routes served by the time service.
pub fn routes(clock: Arc<dyn Clock>) -> Router {
    Router::new()
        .route("/time", get(handler::get_time))
        .with_state(TimeState { clock })
}
