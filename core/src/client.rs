//! Blocking client for the XposedOrNot breach lookup API.
//!
//! # Design
//! `XonClient` owns an immutable `ClientConfig` and a `Transport`; it carries
//! no other state between calls. Each operation runs the same pipeline:
//! validate -> route -> execute (with retries) -> map. The transport (for the
//! default `UreqTransport`, a connection pool) lives exactly as long as the
//! client and is released by `close` or on drop.

use tracing::debug;

use crate::anon::anonymize;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::executor::Executor;
use crate::mapper;
use crate::router::{Call, Route, Router};
use crate::transport::{Transport, UreqTransport};
use crate::types::{AnalyticsResult, BreachFilter, BreachRecord, EmailLookupResult, PasswordLookupResult};
use crate::validate::validate_email;

#[derive(Debug)]
pub struct XonClient<T: Transport = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl XonClient {
    /// Client over a `ureq` agent using the configured timeout.
    pub fn new(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(config.timeout());
        Self { config, transport }
    }

    /// Client configured from `XON_*` environment variables.
    pub fn from_env() -> Result<Self, ApiError> {
        Ok(Self::new(ClientConfig::from_env()?))
    }
}

impl Default for XonClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl<T: Transport> XonClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// List known breaches, optionally filtered by domain and/or email.
    pub fn get_breaches(&self, filter: &BreachFilter) -> Result<Vec<BreachRecord>, ApiError> {
        if let Some(email) = filter.email.as_deref() {
            ensure_email(email)?;
        }
        let route = self.route(Call::Breaches {
            domain: filter.domain.as_deref(),
            email: filter.email.as_deref(),
        });
        let body = self.execute(&route)?;
        mapper::map_breaches(&body)
    }

    /// Breaches containing `email`.
    ///
    /// Returns `EmailLookupResult::Summary` without an API key and
    /// `EmailLookupResult::Detailed` with one. An email with no breaches is
    /// `ApiError::NotFound`.
    pub fn check_email(&self, email: &str) -> Result<EmailLookupResult, ApiError> {
        ensure_email(email)?;
        let route = self.route(Call::CheckEmail { email });
        debug!(backend = ?route.backend, "checking email");
        let body = self.execute(&route)?;
        mapper::map_check_email(route.backend, &body)
    }

    pub fn breach_analytics(&self, email: &str) -> Result<AnalyticsResult, ApiError> {
        ensure_email(email)?;
        let route = self.route(Call::Analytics { email });
        let body = self.execute(&route)?;
        mapper::map_analytics(&body)
    }

    /// Exposure count for `password`.
    ///
    /// Only the 10-character Keccak-512 prefix leaves this function; the
    /// password itself is neither sent nor logged.
    pub fn check_password(&self, password: &str) -> Result<PasswordLookupResult, ApiError> {
        let token = anonymize(password);
        let route = self.route(Call::Password { token: &token });
        let body = self.execute(&route)?;
        mapper::map_password(&token, &body)
    }

    /// Release the transport. Dropping the client has the same effect.
    pub fn close(self) {
        debug!("closing client");
    }

    fn route(&self, call: Call<'_>) -> Route {
        Router::new(&self.config).route(call)
    }

    fn execute(&self, route: &Route) -> Result<String, ApiError> {
        let response = Executor::new(&self.transport, self.config.retry()).execute(&route.request)?;
        Ok(response.body)
    }
}

fn ensure_email(email: &str) -> Result<(), ApiError> {
    if validate_email(email) {
        Ok(())
    } else {
        Err(ApiError::Validation(format!("Invalid email format: {email:?}")))
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;
    use crate::config::Backoff;
    use crate::http::API_KEY_HEADER;
    use crate::transport::scripted::ScriptedTransport;

    fn config() -> ClientConfig {
        ClientConfig::new().with_backoff(Backoff::Fixed(Duration::ZERO))
    }

    #[test]
    fn default_client_uses_public_endpoints() {
        let client: XonClient = XonClient::default();
        assert_eq!(client.config().endpoints().free, "https://api.xposedornot.com");
        assert!(client.config().api_key().is_none());
        client.close();
    }

    #[test]
    fn invalid_email_never_reaches_transport() {
        let transport = ScriptedTransport::new([(200, "{}")]);
        let client = XonClient::with_transport(config(), &transport);

        let err = client.check_email("not-an-email").unwrap_err();
        assert!(matches!(&err, ApiError::Validation(msg) if msg.contains("Invalid email format")));
        assert!(matches!(client.check_email(""), Err(ApiError::Validation(_))));
        assert!(matches!(client.breach_analytics("invalid-email"), Err(ApiError::Validation(_))));
        assert!(matches!(
            client.get_breaches(&BreachFilter::email("bad email@x.com")),
            Err(ApiError::Validation(_))
        ));
        assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn check_email_without_key_returns_summary() {
        let transport = ScriptedTransport::new([(200, r#"{"breaches": ["Adobe", "LinkedIn", "Dropbox"]}"#)]);
        let client = XonClient::with_transport(config(), &transport);

        let result = client.check_email("test@example.com").unwrap();
        assert_eq!(
            result,
            EmailLookupResult::Summary {
                breaches: vec!["Adobe".into(), "LinkedIn".into(), "Dropbox".into()]
            }
        );
        let sent = transport.sent();
        assert_eq!(sent[0].url, "https://api.xposedornot.com/v1/check-email/test%40example.com");
        assert_eq!(sent[0].header(API_KEY_HEADER), None);
    }

    #[test]
    fn check_email_with_key_returns_detailed() {
        let body = r#"{"status":"success","email":"test@example.com","breaches":[{"breach_id":"Adobe","domain":"adobe.com","xposed_records":152445165}]}"#;
        let transport = ScriptedTransport::new([(200, body)]);
        let client = XonClient::with_transport(config().with_api_key("my-secret-key"), &transport);

        match client.check_email("test@example.com").unwrap() {
            EmailLookupResult::Detailed { breaches, email, .. } => {
                assert_eq!(email.as_deref(), Some("test@example.com"));
                assert_eq!(breaches[0].breach_id, "Adobe");
                assert_eq!(breaches[0].exposed_records, Some(152_445_165));
            }
            other => panic!("expected detailed result, got {other:?}"),
        }
        let sent = transport.sent();
        assert!(sent[0].url.starts_with("https://plus-api.xposedornot.com/v3/check-email/"));
        assert!(sent[0].url.ends_with("?detailed=true"));
        assert_eq!(sent[0].header(API_KEY_HEADER), Some("my-secret-key"));
    }

    #[test]
    fn check_email_not_found() {
        let transport = ScriptedTransport::new([(404, r#"{"Error": "Not found"}"#)]);
        let client = XonClient::with_transport(config(), &transport);
        let err = client.check_email("clean@example.com").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn check_password_sends_only_the_token() {
        let body = r#"{"anon":"a1b2c3d4e5","char":{"digits":3,"alphabets":8,"special":0,"length":11},"count":12345}"#;
        let transport = ScriptedTransport::new([(200, body)]);
        let client = XonClient::with_transport(config(), &transport);

        let result = client.check_password("password123").unwrap();
        assert_eq!(result.count, 12345);
        assert_eq!(result.anon.as_str(), "aa77c1b9b7");
        assert_eq!(result.characteristics["digits"], 3);

        let sent = transport.sent();
        assert_eq!(sent[0].url, "https://passwords.xposedornot.com/api/v1/pass/anon/aa77c1b9b7");
        assert!(sent.iter().all(|r| !format!("{r:?}").contains("password123")));
    }

    #[test]
    fn get_breaches_with_domain_filter() {
        let body = r#"{"status":"success","exposedBreaches":[{"breachID":"adobe","domain":"adobe.com","exposedRecords":152000000}]}"#;
        let transport = ScriptedTransport::new([(200, body)]);
        let client = XonClient::with_transport(config(), &transport);

        let result = client.get_breaches(&BreachFilter::domain("adobe.com")).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].breach_id, "adobe");
        assert_eq!(result[0].exposed_records, Some(152_000_000));
        assert_eq!(transport.sent()[0].url, "https://api.xposedornot.com/v1/breaches?domain=adobe.com");
    }

    #[test]
    fn rate_limit_budget_is_shared_by_all_operations() {
        let transport = ScriptedTransport::new([(429, r#"{"error":"Rate limit exceeded"}"#)]);
        let client = XonClient::with_transport(config().with_max_retries(2), &transport);
        let err = client.breach_analytics("test@example.com").unwrap_err();
        assert!(matches!(err, ApiError::RateLimited { attempts: 3 }));
        assert_eq!(transport.calls(), 3);
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn logs_carry_neither_email_nor_api_key() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let email = "alice.secret@example.com";
        let transport = ScriptedTransport::new([
            (429, ""),
            (404, r#"{"detail":{"message":"alice.secret@example.com not found"}}"#),
        ]);
        let client = XonClient::with_transport(config().with_api_key("my-secret-key"), &transport);
        let offline = XonClient::new(config().with_api_key("my-secret-key").with_base_url("http://127.0.0.1:9"));

        tracing::subscriber::with_default(subscriber, || {
            assert!(client.check_email(email).is_err());
            assert!(client.breach_analytics(email).is_err());
            assert!(client.get_breaches(&BreachFilter::email(email)).is_err());
            assert!(matches!(offline.breach_analytics(email), Err(ApiError::Transport(_))));
        });

        let out = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(out.contains("rate limited, retrying"), "{out}");
        assert!(out.contains("/v3/check-email/{email}"), "{out}");
        assert!(out.contains("/v1/breach-analytics"), "{out}");
        assert!(out.contains("transport failure"), "{out}");
        assert!(!out.contains("alice"), "{out}");
        assert!(!out.contains("my-secret-key"), "{out}");
    }
}
