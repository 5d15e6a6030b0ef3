//! In-process stand-in for the three XposedOrNot backends.
//!
//! One listener serves all of them under different prefixes:
//! - free API at `/` (`/v1/breaches`, `/v1/check-email/{email}`, `/v1/breach-analytics`)
//! - premium API at `/plus` (`/plus/v3/check-email/{email}`, needs `x-api-key`)
//! - password API at `/passwords/api` (`/passwords/api/v1/pass/anon/{token}`)
//!
//! Every request is logged in `MockState`. A test can script the responses
//! for a path; scripted responses are served in order, the last one repeats,
//! and they take precedence over the canned fixtures.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub mod fixtures;

pub const API_KEY_HEADER: &str = "x-api-key";
pub const PLUS_PREFIX: &str = "/plus";
pub const PASSWORD_PREFIX: &str = "/passwords/api";

/// Email the canned fixtures know about; any other email is "not found".
pub const KNOWN_EMAIL: &str = "test@example.com";
/// Keccak-512 prefix of `password123`; any other token is "not found".
pub const KNOWN_TOKEN: &str = "aa77c1b9b7";

/// A response to serve for a scripted path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canned {
    pub status: u16,
    pub body: String,
}

impl Canned {
    pub fn json(status: u16, value: Value) -> Self {
        Self {
            status,
            body: value.to_string(),
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

impl IntoResponse for Canned {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, [(header::CONTENT_TYPE, "application/json")], self.body).into_response()
    }
}

/// What the mock saw for one request. `path` and query values are decoded.
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub path: String,
    pub query: HashMap<String, String>,
    pub api_key: Option<String>,
}

impl RecordedRequest {
    fn from_request(request: &Request) -> Self {
        let uri = request.uri();
        let query = uri
            .query()
            .unwrap_or_default()
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .map(|(k, v)| (decode(k), decode(v)))
            .collect();
        let api_key = request
            .headers()
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        Self {
            path: decode(uri.path()),
            query,
            api_key,
        }
    }
}

fn decode(s: &str) -> String {
    urlencoding::decode(s)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| s.to_string())
}

#[derive(Default)]
struct Inner {
    scripts: HashMap<String, VecDeque<Canned>>,
    log: Vec<RecordedRequest>,
}

/// Shared between the server task and the test thread, hence a std mutex:
/// it is never held across an await.
#[derive(Clone, Default)]
pub struct MockState {
    inner: Arc<Mutex<Inner>>,
}

impl MockState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the scripted responses for `path` (decoded form).
    pub fn script(&self, path: &str, responses: impl IntoIterator<Item = Canned>) {
        self.lock().scripts.insert(path.to_string(), responses.into_iter().collect());
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().log.clone()
    }

    /// Number of requests received for `path` (decoded form).
    pub fn hits(&self, path: &str) -> usize {
        self.lock().log.iter().filter(|r| r.path == path).count()
    }

    fn record(&self, request: RecordedRequest) -> Option<Canned> {
        let mut inner = self.lock();
        let scripted = inner.scripts.get_mut(&request.path).and_then(|queue| {
            if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            }
        });
        inner.log.push(request);
        scripted
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

pub fn app(state: MockState) -> Router {
    Router::new()
        .route("/v1/breaches", get(list_breaches))
        .route("/v1/check-email/{email}", get(check_email))
        .route("/v1/breach-analytics", get(breach_analytics))
        .route("/plus/v3/check-email/{email}", get(check_email_detailed))
        .route("/passwords/api/v1/pass/anon/{token}", get(password_anon))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state, intercept))
}

pub async fn run(listener: TcpListener, state: MockState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}

async fn intercept(State(state): State<MockState>, request: Request, next: Next) -> Response {
    let recorded = RecordedRequest::from_request(&request);
    tracing::info!(path = %recorded.path, "request");
    match state.record(recorded) {
        Some(canned) => canned.into_response(),
        None => next.run(request).await,
    }
}

fn free_not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"Error": "Not found"}))).into_response()
}

fn premium_error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({"detail": {"status": "error", "message": message}}))).into_response()
}

async fn not_found() -> Response {
    free_not_found()
}

#[derive(Deserialize)]
pub struct BreachQuery {
    pub domain: Option<String>,
    pub email: Option<String>,
}

async fn list_breaches(Query(query): Query<BreachQuery>) -> Json<Value> {
    let breaches: Vec<Value> = fixtures::breaches()
        .into_iter()
        .filter(|b| query.domain.as_deref().is_none_or(|d| b["domain"] == d))
        .filter(|_| query.email.as_deref().is_none_or(|e| e == KNOWN_EMAIL))
        .collect();
    Json(json!({"status": "success", "message": null, "exposedBreaches": breaches}))
}

async fn check_email(Path(email): Path<String>) -> Response {
    if email == KNOWN_EMAIL {
        Json(fixtures::email_summary()).into_response()
    } else {
        free_not_found()
    }
}

async fn check_email_detailed(headers: HeaderMap, Path(email): Path<String>) -> Response {
    if headers.get(API_KEY_HEADER).is_none() {
        return premium_error(StatusCode::UNAUTHORIZED, "Invalid or missing API key");
    }
    if email == KNOWN_EMAIL {
        Json(fixtures::email_detailed(&email)).into_response()
    } else {
        premium_error(StatusCode::NOT_FOUND, "No breaches found")
    }
}

#[derive(Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

async fn breach_analytics(Query(query): Query<EmailQuery>) -> Response {
    match query.email.as_deref() {
        Some(KNOWN_EMAIL) => Json(fixtures::analytics()).into_response(),
        _ => free_not_found(),
    }
}

async fn password_anon(Path(token): Path<String>) -> Response {
    if token == KNOWN_TOKEN {
        Json(fixtures::password(&token)).into_response()
    } else {
        free_not_found()
    }
}
