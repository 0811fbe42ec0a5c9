//! Wire types for the greeting service.

use serde::{Deserialize, Serialize};

/// Body of `GET /greet`: exactly one of `greeting` or `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GreetingResponse {
    Greeting { greeting: String },
    Error { error: String },
}

impl GreetingResponse {
    /// Greeting that embeds the provider's timestamp verbatim.
    pub fn with_time(time: &str) -> Self {
        GreetingResponse::Greeting {
            greeting: format!("Hello! The current time is {}", time),
        }
    }

    /// Error body returned when the time could not be fetched.
    pub fn upstream_failure(provider_name: &str) -> Self {
        GreetingResponse::Error {
            error: format!("Could not retrieve time from {}", provider_name),
        }
    }
}
