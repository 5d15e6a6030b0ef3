//! Error types and the status-code classifier.
//!
//! # Design
//! `NotFound` gets a dedicated variant because "this email/password is not in
//! the breach corpus" is an expected answer, not a fault. `RateLimited` is
//! only surfaced once the executor's retry budget is spent. Every other
//! non-2xx status lands in exactly one of `Authentication`, `Server` or the
//! catch-all `HttpError`, which keeps the raw body for debugging.

use thiserror::Error;

/// Errors returned by every `XonClient` operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input was rejected locally; no request was sent.
    #[error("{0}")]
    Validation(String),

    /// 401/403: the API key is missing, invalid or lacks access.
    #[error("authentication failed (HTTP {status}): {message}")]
    Authentication { status: u16, message: String },

    /// 404: the subject is not present in the breach corpus.
    #[error("not found: {message}")]
    NotFound { message: String },

    /// 429 with rate-limit handling disabled, or after the retry budget ran out.
    #[error("rate limit exceeded after {attempts} attempt(s)")]
    RateLimited { attempts: u32 },

    /// 5xx from upstream. Not retried.
    #[error("server error (HTTP {status}): {body}")]
    Server { status: u16, body: String },

    /// Any other non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// A 2xx body could not be deserialized into the expected shape.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request never produced a response (connect, TLS, timeout, IO).
    #[error("transport failed: {0}")]
    Transport(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status behind this error, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Authentication { status, .. }
            | ApiError::Server { status, .. }
            | ApiError::HttpError { status, .. } => Some(*status),
            ApiError::NotFound { .. } => Some(404),
            ApiError::RateLimited { .. } => Some(429),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}

/// Map a non-2xx status and its body to an `ApiError`.
///
/// Decided on the status code alone; the body only enriches the message.
/// A 429 is reported as a single attempt, the executor rewrites the count
/// when it gives up after retrying.
pub fn classify(status: u16, body: &str) -> ApiError {
    match status {
        401 | 403 => ApiError::Authentication {
            status,
            message: extract_message(body).unwrap_or_else(|| "invalid or missing API key".to_string()),
        },
        404 => ApiError::NotFound {
            message: extract_message(body).unwrap_or_else(|| "not found".to_string()),
        },
        429 => ApiError::RateLimited { attempts: 1 },
        500..=599 => ApiError::Server {
            status,
            body: body.to_string(),
        },
        _ => ApiError::HttpError {
            status,
            body: body.to_string(),
        },
    }
}

/// Pull a human-readable message out of an error body.
///
/// Premium errors nest it as `{"detail":{"status","message"}}`, free ones use
/// `{"Error": "..."}`. Falls back to the trimmed raw text.
fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) else {
        return Some(trimmed.to_string());
    };
    let candidates = [
        value.pointer("/detail/message"),
        value.get("detail").filter(|d| d.is_string()),
        value.get("Error"),
        value.get("error"),
        value.get("message"),
    ];
    let found = candidates
        .into_iter()
        .flatten()
        .find_map(|v| v.as_str().map(str::to_string));
    found.or_else(|| Some(trimmed.to_string()))
}
