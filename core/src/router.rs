//! Endpoint selection: which backend, which path, which headers.
//!
//! # Design
//! `Router` borrows the immutable `ClientConfig` and turns a `Call` into a
//! `Route`. The only behavioural branch is the email check, which goes to the
//! free backend without an API key and to the premium backend (`/v3`,
//! `detailed=true`) with one. The `Backend` travels with the request so the
//! mapper knows which payload shape to expect without sniffing it.

use crate::anon::AnonToken;
use crate::config::ClientConfig;
use crate::http::{HttpRequest, API_KEY_HEADER};

/// Upstream service answering a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Free,
    Premium,
    Password,
}

/// One logical API call, already validated.
#[derive(Debug, Clone, Copy)]
pub enum Call<'a> {
    Breaches {
        domain: Option<&'a str>,
        email: Option<&'a str>,
    },
    CheckEmail {
        email: &'a str,
    },
    Analytics {
        email: &'a str,
    },
    /// Only the token is routable; there is no variant that takes a password.
    Password {
        token: &'a AnonToken,
    },
}

#[derive(Debug, Clone)]
pub struct Route {
    pub backend: Backend,
    pub request: HttpRequest,
}

#[derive(Debug, Clone, Copy)]
pub struct Router<'a> {
    config: &'a ClientConfig,
}

impl<'a> Router<'a> {
    pub fn new(config: &'a ClientConfig) -> Self {
        Self { config }
    }

    pub fn route(&self, call: Call<'_>) -> Route {
        let endpoints = self.config.endpoints();
        match call {
            Call::Breaches { domain, email } => {
                let mut query = Vec::new();
                if let Some(domain) = domain {
                    query.push(("domain", domain));
                }
                if let Some(email) = email {
                    query.push(("email", email));
                }
                self.get(
                    Backend::Free,
                    "/v1/breaches",
                    format!("{}/v1/breaches", endpoints.free),
                    &query,
                )
            }
            Call::CheckEmail { email } => {
                let email = urlencoding::encode(email);
                if self.config.api_key().is_some() {
                    self.get(
                        Backend::Premium,
                        "/v3/check-email/{email}",
                        format!("{}/v3/check-email/{email}", endpoints.premium),
                        &[("detailed", "true")],
                    )
                } else {
                    self.get(
                        Backend::Free,
                        "/v1/check-email/{email}",
                        format!("{}/v1/check-email/{email}", endpoints.free),
                        &[],
                    )
                }
            }
            Call::Analytics { email } => self.get(
                Backend::Free,
                "/v1/breach-analytics",
                format!("{}/v1/breach-analytics", endpoints.free),
                &[("email", email)],
            ),
            Call::Password { token } => self.get(
                Backend::Password,
                "/v1/pass/anon/{token}",
                format!("{}/v1/pass/anon/{token}", endpoints.password),
                &[],
            ),
        }
    }

    fn get(&self, backend: Backend, endpoint: &'static str, mut url: String, query: &[(&str, &str)]) -> Route {
        for (i, (key, value)) in query.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(&urlencoding::encode(key));
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }

        let mut headers = vec![("accept".to_string(), "application/json".to_string())];
        if let Some(key) = self.config.api_key() {
            headers.push((API_KEY_HEADER.to_string(), key.expose().to_string()));
        }

        Route {
            backend,
            request: HttpRequest { endpoint, url, headers },
        }
    }
}
