//! Wire types for the time service.

use serde::{Deserialize, Serialize};

/// Body of `GET /time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeResponse {
    /// ISO-8601 timestamp in UTC.
    pub time: String,
}
