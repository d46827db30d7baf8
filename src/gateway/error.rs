// ABOUTME: Gateway error taxonomy — connection, remote-service, and empty-response failures.
// ABOUTME: Also extracts human-readable messages from service error bodies.

use thiserror::Error;

/// Errors surfaced by the agent gateway. Each is reported inline once and
/// never retried by this layer.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The service could not be reached at all (DNS, TLS, refused socket).
    #[error("could not reach the agent service: {0}")]
    Connection(#[source] reqwest::Error),

    /// The service answered but reported a failure (HTTP error status or a
    /// run that ended without completing).
    #[error("agent service error: {0}")]
    Remote(String),

    /// The run finished but produced no assistant message with text content.
    #[error("the agent returned no usable reply")]
    EmptyResponse,
}

/// Pull a readable message out of a service error body.
///
/// Bodies usually look like `{"error":{"message":"...","code":"..."}}`;
/// anything else is passed through trimmed, falling back to the HTTP
/// status line.
pub fn remote_error_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            return message.to_string();
        }
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {status}")
    } else {
        format!("HTTP {status}: {trimmed}")
    }
}
