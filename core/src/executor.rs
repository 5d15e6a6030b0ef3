//! Request execution with bounded rate-limit retries.
//!
//! # Design
//! One call is a small state machine:
//!
//! ```text
//! Pending -> Sent -> Succeeded
//!             |  \-> Failed
//!             v
//!          Retrying -> Sent (bounded by max_retries)
//! ```
//!
//! Only HTTP 429 loops, and only when rate-limit handling is enabled. Every
//! other non-2xx status is classified and returned from the first attempt,
//! so a rate-limited call makes at most `max_retries + 1` requests.

use std::time::Duration;

use tracing::{debug, warn};

use crate::config::{RetryPolicy, MAX_RETRY_AFTER};
use crate::error::{classify, ApiError};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

#[derive(Debug)]
enum State {
    Pending,
    /// `attempt` is 0-based; the request goes out on entering this state.
    Sent { attempt: u32 },
    Retrying { attempt: u32, delay: Duration },
    Succeeded(HttpResponse),
    Failed(ApiError),
}

pub struct Executor<'a, T: Transport> {
    transport: &'a T,
    policy: &'a RetryPolicy,
}

impl<'a, T: Transport> Executor<'a, T> {
    pub fn new(transport: &'a T, policy: &'a RetryPolicy) -> Self {
        Self { transport, policy }
    }

    /// Run `request` to a 2xx response or a classified error.
    pub fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut state = State::Pending;
        loop {
            state = match state {
                State::Pending => State::Sent { attempt: 0 },
                State::Sent { attempt } => self.send(request, attempt),
                State::Retrying { attempt, delay } => {
                    if !delay.is_zero() {
                        std::thread::sleep(delay);
                    }
                    State::Sent { attempt }
                }
                State::Succeeded(response) => return Ok(response),
                State::Failed(err) => return Err(err),
            };
        }
    }

    fn send(&self, request: &HttpRequest, attempt: u32) -> State {
        debug!(endpoint = request.endpoint, attempt, "sending request");
        match self.transport.send(request) {
            Ok(response) => self.next_state(attempt, response),
            Err(err) => {
                debug!(endpoint = request.endpoint, error = %err, "transport failure");
                State::Failed(err)
            }
        }
    }

    fn next_state(&self, attempt: u32, response: HttpResponse) -> State {
        if response.is_success() {
            return State::Succeeded(response);
        }

        if response.status == 429 {
            if self.policy.rate_limit && attempt < self.policy.max_retries {
                let delay = retry_after(&response).unwrap_or_else(|| self.policy.backoff.delay(attempt));
                warn!(
                    attempt,
                    max_retries = self.policy.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    "rate limited, retrying"
                );
                return State::Retrying {
                    attempt: attempt + 1,
                    delay,
                };
            }
            return State::Failed(ApiError::RateLimited { attempts: attempt + 1 });
        }

        let err = classify(response.status, &response.body);
        debug!(status = response.status, "request failed");
        State::Failed(err)
    }
}

/// `Retry-After` in whole seconds, capped at `MAX_RETRY_AFTER`; HTTP-date
/// values are ignored.
fn retry_after(response: &HttpResponse) -> Option<Duration> {
    response
        .header("retry-after")
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(|secs| Duration::from_secs(secs).min(MAX_RETRY_AFTER))
}
