use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};

use crate::observability::metrics;
use crate::time::clock::{to_iso8601, Clock};
use crate::time::types::TimeResponse;

/// State shared by the time service handlers.
#[derive(Clone)]
pub struct TimeState {
    pub clock: Arc<dyn Clock>,
}

/// `GET /time`. Ignores everything about the request.
pub async fn get_time(State(state): State<TimeState>) -> Json<TimeResponse> {
    let start = Instant::now();
    let time = to_iso8601(state.clock.now());

    tracing::debug!(time = %time, "Serving current time");
    metrics::record_request("time", "/time", StatusCode::OK.as_u16(), start);

    Json(TimeResponse { time })
}
