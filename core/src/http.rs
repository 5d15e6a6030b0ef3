//! HTTP request and response types described as plain data.
//!
//! # Design
//! The router builds `HttpRequest` values and the response mapper consumes
//! `HttpResponse` values; neither touches the network. Only a `Transport`
//! implementation turns one into the other, so routing and mapping stay
//! deterministic and testable without a server.
//!
//! Every call this client makes is a `GET`, so a request is just a
//! fully-qualified URL plus headers.

use std::fmt;

/// Header carrying the API key on every request when one is configured.
pub const API_KEY_HEADER: &str = "x-api-key";

/// An HTTP `GET` request described as plain data.
///
/// `url` is fully qualified: base host, versioned path and any
/// percent-encoded query string. `endpoint` is the path template the URL was
/// built from (`/v1/check-email/{email}`); it holds no caller data and is
/// the only part of a request that gets logged.
#[derive(Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub endpoint: &'static str,
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Value of the first header named `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

// Hand-written so neither the API key nor the email in the URL ends up in a
// log line or panic message.
impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(name, value)| {
                if name.eq_ignore_ascii_case(API_KEY_HEADER) {
                    (name.as_str(), "[REDACTED]")
                } else {
                    (name.as_str(), value.as_str())
                }
            })
            .collect();
        f.debug_struct("HttpRequest")
            .field("endpoint", &self.endpoint)
            .field("headers", &headers)
            .finish()
    }
}

/// An HTTP response described as plain data.
///
/// Produced by a `Transport` after executing an `HttpRequest`. Non-2xx
/// statuses are ordinary values here; classification happens later.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}
