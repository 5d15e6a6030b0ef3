//! The single seam between the client and the network.
//!
//! # Design
//! Everything above this layer deals in `HttpRequest`/`HttpResponse` data.
//! `UreqTransport` is the production implementation; tests substitute a
//! scripted in-memory transport or point `UreqTransport` at the mock server.

use std::time::Duration;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one HTTP request.
///
/// Implementations must return 4xx/5xx responses as `Ok` so the executor can
/// classify them; `Err` is reserved for requests that got no response.
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).send(request)
    }
}

/// Blocking transport backed by a `ureq` agent.
///
/// The agent (and its connection pool) is created once and released when the
/// transport is dropped.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self.agent.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let mut response = builder
            .call()
            .map_err(|e| transport_error("GET", request, e))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| transport_error("reading body of", request, e))?;

        Ok(HttpResponse { status, headers, body })
    }
}

/// Names the target by origin and endpoint template; the error text never
/// carries the email from the URL.
fn transport_error(action: &str, request: &HttpRequest, err: ureq::Error) -> ApiError {
    let detail = err.to_string().replace(&request.url, request.endpoint);
    ApiError::Transport(format!("{action} {}{}: {detail}", origin(&request.url), request.endpoint))
}

/// `scheme://host[:port]` of `url`.
fn origin(url: &str) -> &str {
    let host_start = url.find("://").map_or(0, |i| i + 3);
    match url[host_start..].find(['/', '?']) {
        Some(end) => &url[..host_start + end],
        None => url,
    }
}
