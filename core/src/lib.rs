//! Blocking client for the XposedOrNot data-breach lookup service.
//!
//! # Overview
//! Four operations: list breaches, check an email, fetch breach analytics
//! for an email, and check a password by k-anonymity. Each call is
//! synchronous and returns a typed result or an `ApiError`.
//!
//! # Design
//! - `validate` rejects malformed emails before anything is sent.
//! - `router` picks backend, path and headers; an API key switches email
//!   checks from the free to the premium backend.
//! - `executor` sends through a `Transport`, retrying HTTP 429 within a
//!   bounded budget; `error::classify` maps every other failure.
//! - `mapper` turns 2xx bodies into the types in `types`.
//! - `anon` hashes passwords; only the 10-char token is ever routable.
//! - `XonClient` wires these together over an immutable `ClientConfig`.

pub mod anon;
pub mod client;
pub mod config;
pub mod error;
pub mod executor;
pub mod http;
pub mod mapper;
pub mod router;
pub mod secret;
pub mod transport;
pub mod types;
pub mod validate;

pub use anon::{anonymize, AnonToken};
pub use client::XonClient;
pub use config::{Backoff, ClientConfig, Endpoints, RetryPolicy, DEFAULT_MAX_RETRIES, MAX_RETRY_AFTER};
pub use error::{classify, ApiError};
pub use http::{HttpRequest, HttpResponse, API_KEY_HEADER};
pub use router::{Backend, Call, Route, Router};
pub use secret::Credential;
pub use transport::{Transport, UreqTransport};
pub use types::{
    AnalyticsResult, BreachFilter, BreachMetrics, BreachRecord, EmailLookupResult, PasswordLookupResult,
};
pub use validate::validate_email;
