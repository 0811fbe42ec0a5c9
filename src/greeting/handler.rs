use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};

use crate::greeting::client::TimeClient;
use crate::greeting::types::GreetingResponse;
use crate::http::request::request_id;
use crate::observability::metrics;

/// State shared by the greeting service handlers.
#[derive(Clone)]
pub struct GreetingState {
    pub client: Arc<TimeClient>,
}

/// `GET /greet`: fetch the time upstream and wrap it in a greeting.
pub async fn get_greeting(
    State(state): State<GreetingState>,
    headers: HeaderMap,
) -> (StatusCode, Json<GreetingResponse>) {
    let start = Instant::now();
    let request_id = request_id(&headers);

    match state.client.fetch_time(request_id).await {
        Ok(time) => {
            metrics::record_request("greeting", "/greet", StatusCode::OK.as_u16(), start);
            (StatusCode::OK, Json(GreetingResponse::with_time(&time)))
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id.unwrap_or("unknown"),
                upstream = %state.client.time_url(),
                error = %e,
                "Error fetching time from upstream"
            );
            metrics::record_upstream_failure(e.kind());
            metrics::record_request(
                "greeting",
                "/greet",
                StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                start,
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(GreetingResponse::upstream_failure(state.client.provider_name())),
            )
        }
    }
}
