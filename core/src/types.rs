//! Typed results returned by `XonClient`.
//!
//! # Design
//! These are the client's own model, independent of the upstream JSON shapes
//! (those live in `mapper`). Values are built once by the mapper and never
//! mutated. Optional upstream fields stay `Option` so "absent" is never
//! confused with zero or `false`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::anon::AnonToken;

/// One breach event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreachRecord {
    pub breach_id: String,
    pub domain: Option<String>,
    pub breached_date: Option<String>,
    pub industry: Option<String>,
    pub verified: Option<bool>,
    pub searchable: Option<bool>,
    pub sensitive: Option<bool>,
    pub exposed_records: Option<u64>,
    /// Categories in upstream order, e.g. `["Email addresses", "Passwords"]`.
    pub exposed_data: Vec<String>,
    pub password_risk: Option<String>,
    pub reference_url: Option<String>,
    pub description: Option<String>,
    pub logo: Option<String>,
}

/// Optional filters for the breach list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreachFilter {
    pub domain: Option<String>,
    pub email: Option<String>,
}

impl BreachFilter {
    pub fn domain(domain: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
            email: None,
        }
    }

    pub fn email(email: impl Into<String>) -> Self {
        Self {
            domain: None,
            email: Some(email.into()),
        }
    }
}

/// Result of a single-email check.
///
/// Which variant comes back depends only on whether an API key was
/// configured: without one the free backend answers with breach names,
/// with one the premium backend answers with full records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailLookupResult {
    Summary {
        breaches: Vec<String>,
    },
    Detailed {
        status: Option<String>,
        email: Option<String>,
        breaches: Vec<BreachRecord>,
    },
}

impl EmailLookupResult {
    /// Breach names in either variant.
    pub fn breach_names(&self) -> Vec<&str> {
        match self {
            EmailLookupResult::Summary { breaches } => breaches.iter().map(String::as_str).collect(),
            EmailLookupResult::Detailed { breaches, .. } => {
                breaches.iter().map(|b| b.breach_id.as_str()).collect()
            }
        }
    }
}

/// Category -> count histograms from the analytics endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreachMetrics {
    pub industry: BTreeMap<String, u64>,
    pub risk: BTreeMap<String, u64>,
    pub passwords_strength: BTreeMap<String, u64>,
    pub exposed_data: BTreeMap<String, u64>,
    /// Keyed by year, e.g. `"2013"`.
    pub yearly: BTreeMap<String, u64>,
}

/// Aggregate exposure report for one email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsResult {
    pub exposures_count: Option<u64>,
    pub breaches_count: Option<u64>,
    pub first_breach: Option<String>,
    pub pastes_count: Option<u64>,
    pub breaches_details: Vec<BreachRecord>,
    pub metrics: Option<BreachMetrics>,
}

/// Exposure of an anonymized password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordLookupResult {
    /// The token this client sent, not the upstream echo.
    pub anon: AnonToken,
    pub count: u64,
    /// Keys: `digits`, `alphabets`, `special`, `length`.
    pub characteristics: BTreeMap<String, u64>,
}
