// SPDX-License-Identifier: AGPL-3.0
// Voyara Network - Error normalization
//
// Transport and server failures collapse into one user-facing message per
// operation. Priority: timeout, 4xx, 5xx, anything else.

use crate::models::ErrorResponse;

/// Broad category of a gateway failure, for logging and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Timeout,
    Unauthorized,
    NotFound,
    BadRequest,
    Client,
    Server,
    Decode,
    Other,
}

impl ErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            404 => Self::NotFound,
            400..=499 => Self::Client,
            500..=599 => Self::Server,
            _ => Self::Other,
        }
    }
}

/// The single error type surfaced to callers; `message` is ready for display
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    kind: ErrorKind,
    message: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Raw outcome of a failed round-trip, before normalization
#[derive(Debug, thiserror::Error)]
pub(crate) enum Failure {
    #[error("timed out: {0}")]
    Timeout(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP {status}")]
    Status { status: u16, body: String },

    #[error("decode error: {0}")]
    Decode(String),
}

impl Failure {
    /// 5xx and transport problems are worth another attempt; 4xx never is
    pub(crate) fn is_retryable(&self) -> bool {
        match self {
            Failure::Timeout(_) | Failure::Transport(_) => true,
            Failure::Status { status, .. } => (500..=599).contains(status),
            Failure::Decode(_) => false,
        }
    }
}

impl From<reqwest::Error> for Failure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Failure::Timeout(err.to_string())
        } else if err.is_decode() {
            Failure::Decode(err.to_string())
        } else {
            Failure::Transport(err.to_string())
        }
    }
}

/// Per-operation wording for each failure category
pub(crate) struct ErrorMessages {
    pub operation: &'static str,
    pub timeout: &'static str,
    pub client_fallback: &'static str,
    pub server: &'static str,
    pub other_fallback: &'static str,
    /// Phrases marking a detail that is already fit for display
    pub passthrough: &'static [&'static str],
}

fn mentions_timeout(detail: &str) -> bool {
    let lower = detail.to_lowercase();
    lower.contains("timeout") || lower.contains("timed out")
}

/// Pull `message`, then `error`, out of a structured error body
pub(crate) fn structured_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(ErrorResponse::into_message)
}

/// Standard mapping from a raw failure to the user-facing error
pub(crate) fn normalize(failure: Failure, messages: &ErrorMessages) -> ApiError {
    match failure {
        Failure::Timeout(detail) => {
            tracing::warn!("{} timed out: {}", messages.operation, detail);
            ApiError::new(ErrorKind::Timeout, messages.timeout)
        }
        Failure::Status { status, body } if (400..=499).contains(&status) => {
            tracing::warn!("{} rejected with HTTP {}", messages.operation, status);
            let message =
                structured_message(&body).unwrap_or_else(|| messages.client_fallback.to_string());
            ApiError::new(ErrorKind::from_status(status), message)
        }
        Failure::Status { status, .. } if status >= 500 => {
            tracing::error!("{} failed with HTTP {}", messages.operation, status);
            ApiError::new(ErrorKind::Server, messages.server)
        }
        Failure::Status { status, .. } => {
            tracing::error!("{} got unexpected HTTP {}", messages.operation, status);
            ApiError::new(ErrorKind::Other, messages.other_fallback)
        }
        Failure::Transport(detail) | Failure::Decode(detail) if mentions_timeout(&detail) => {
            tracing::warn!("{} timed out: {}", messages.operation, detail);
            ApiError::new(ErrorKind::Timeout, messages.timeout)
        }
        Failure::Transport(detail) => {
            tracing::error!("{} failed: {}", messages.operation, detail);
            if messages.passthrough.iter().any(|p| detail.contains(p)) {
                ApiError::new(ErrorKind::Other, detail)
            } else {
                ApiError::new(ErrorKind::Other, messages.other_fallback)
            }
        }
        Failure::Decode(detail) => {
            tracing::error!("{} returned an unreadable body: {}", messages.operation, detail);
            ApiError::new(ErrorKind::Decode, messages.other_fallback)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MESSAGES: ErrorMessages = ErrorMessages {
        operation: "test",
        timeout: "slow",
        client_fallback: "bad input",
        server: "server down",
        other_fallback: "broken",
        passthrough: &["Connection"],
    };

    #[test]
    fn test_status_kinds() {
        assert_eq!(ErrorKind::from_status(401), ErrorKind::Unauthorized);
        assert_eq!(ErrorKind::from_status(404), ErrorKind::NotFound);
        assert_eq!(ErrorKind::from_status(409), ErrorKind::Client);
        assert_eq!(ErrorKind::from_status(503), ErrorKind::Server);
    }

    #[test]
    fn test_structured_body_prefers_message() {
        let err = normalize(
            Failure::Status {
                status: 409,
                body: r#"{"message":"Email already exists","error":"Conflict"}"#.to_string(),
            },
            &MESSAGES,
        );
        assert_eq!(err.message(), "Email already exists");

        let err = normalize(
            Failure::Status {
                status: 400,
                body: r#"{"error":"Missing field"}"#.to_string(),
            },
            &MESSAGES,
        );
        assert_eq!(err.message(), "Missing field");
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn test_unparsable_client_body_uses_fallback() {
        let err = normalize(
            Failure::Status {
                status: 422,
                body: "<html>nope</html>".to_string(),
            },
            &MESSAGES,
        );
        assert_eq!(err.message(), "bad input");
    }

    #[test]
    fn test_server_and_timeout_messages() {
        let err = normalize(
            Failure::Status {
                status: 502,
                body: String::new(),
            },
            &MESSAGES,
        );
        assert_eq!(err.message(), "server down");

        let err = normalize(Failure::Timeout("deadline".to_string()), &MESSAGES);
        assert_eq!(err.kind(), ErrorKind::Timeout);
        assert_eq!(err.message(), "slow");

        let err = normalize(Failure::Transport("Socket Timeout hit".to_string()), &MESSAGES);
        assert_eq!(err.message(), "slow");
    }

    #[test]
    fn test_recognized_detail_passes_through() {
        let err = normalize(Failure::Transport("Connection reset".to_string()), &MESSAGES);
        assert_eq!(err.message(), "Connection reset");

        let err = normalize(Failure::Transport("dns failure".to_string()), &MESSAGES);
        assert_eq!(err.message(), "broken");
    }

    #[test]
    fn test_error_displays_message_only() {
        let err = ApiError::new(ErrorKind::Server, "Server error. Please try again later.");
        assert_eq!(err.to_string(), "Server error. Please try again later.");
    }
}
