//! Upstream JSON shapes and their mapping into the client's types.
//!
//! # Design
//! Wire structs mirror what each backend sends and stay private; the
//! `map_*` functions convert a 2xx body into the public types in `types`.
//! The caller passes the `Backend` that answered, so the free/premium email
//! shapes are picked by routing, never guessed from the payload.
//!
//! Upstream is loose about types (booleans as `"Yes"`, lists as `;`-joined
//! strings, counts as strings), so a few untagged helpers normalize those.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::anon::AnonToken;
use crate::error::ApiError;
use crate::router::Backend;
use crate::types::{AnalyticsResult, BreachMetrics, BreachRecord, EmailLookupResult, PasswordLookupResult};

fn parse<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

// ---------------------------------------------------------------------------
// Loose scalar helpers
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Text(String),
}

impl Flag {
    fn into_bool(self) -> Option<bool> {
        match self {
            Flag::Bool(b) => Some(b),
            Flag::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "yes" | "true" | "1" => Some(true),
                "no" | "false" | "0" => Some(false),
                _ => None,
            },
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextList {
    List(Vec<String>),
    Joined(String),
}

impl TextList {
    fn into_vec(self) -> Vec<String> {
        match self {
            TextList::List(items) => items,
            TextList::Joined(s) => {
                let sep = if s.contains(';') { ';' } else { ',' };
                s.split(sep)
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect()
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Count {
    Number(u64),
    Text(String),
}

impl Count {
    fn into_u64(self) -> Option<u64> {
        match self {
            Count::Number(n) => Some(n),
            Count::Text(s) => s.trim().parse().ok(),
        }
    }
}

// ---------------------------------------------------------------------------
// Breach list (free backend)
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BreachesWire {
    #[serde(default)]
    exposed_breaches: Vec<BreachWire>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BreachWire {
    #[serde(rename = "breachID")]
    breach_id: String,
    breached_date: Option<String>,
    domain: Option<String>,
    exposed_data: Option<TextList>,
    exposed_records: Option<u64>,
    exposure_description: Option<String>,
    industry: Option<String>,
    logo: Option<String>,
    password_risk: Option<String>,
    #[serde(rename = "referenceURL")]
    reference_url: Option<String>,
    searchable: Option<Flag>,
    sensitive: Option<Flag>,
    verified: Option<Flag>,
}

impl From<BreachWire> for BreachRecord {
    fn from(w: BreachWire) -> Self {
        Self {
            breach_id: w.breach_id,
            domain: w.domain,
            breached_date: w.breached_date,
            industry: w.industry,
            verified: w.verified.and_then(Flag::into_bool),
            searchable: w.searchable.and_then(Flag::into_bool),
            sensitive: w.sensitive.and_then(Flag::into_bool),
            exposed_records: w.exposed_records,
            exposed_data: w.exposed_data.map(TextList::into_vec).unwrap_or_default(),
            password_risk: w.password_risk,
            reference_url: w.reference_url,
            description: w.exposure_description,
            logo: w.logo,
        }
    }
}

pub fn map_breaches(body: &str) -> Result<Vec<BreachRecord>, ApiError> {
    let wire: BreachesWire = parse(body)?;
    Ok(wire.exposed_breaches.into_iter().map(BreachRecord::from).collect())
}

// ---------------------------------------------------------------------------
// Email check (free summary / premium detailed)
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum NameGroup {
    Name(String),
    Nested(Vec<String>),
}

#[derive(Deserialize)]
struct SummaryWire {
    #[serde(default)]
    breaches: Vec<NameGroup>,
}

#[derive(Deserialize)]
struct DetailedWire {
    status: Option<String>,
    email: Option<String>,
    #[serde(default)]
    breaches: Vec<DetailedBreachWire>,
}

#[derive(Deserialize)]
struct DetailedBreachWire {
    breach_id: String,
    breached_date: Option<String>,
    domain: Option<String>,
    industry: Option<String>,
    logo: Option<String>,
    password_risk: Option<String>,
    references: Option<String>,
    searchable: Option<Flag>,
    sensitive: Option<Flag>,
    verified: Option<Flag>,
    xposed_data: Option<TextList>,
    xposed_records: Option<u64>,
    xposure_desc: Option<String>,
}

impl From<DetailedBreachWire> for BreachRecord {
    fn from(w: DetailedBreachWire) -> Self {
        Self {
            breach_id: w.breach_id,
            domain: w.domain,
            breached_date: w.breached_date,
            industry: w.industry,
            verified: w.verified.and_then(Flag::into_bool),
            searchable: w.searchable.and_then(Flag::into_bool),
            sensitive: w.sensitive.and_then(Flag::into_bool),
            exposed_records: w.xposed_records,
            exposed_data: w.xposed_data.map(TextList::into_vec).unwrap_or_default(),
            password_risk: w.password_risk,
            reference_url: w.references,
            description: w.xposure_desc,
            logo: w.logo,
        }
    }
}

/// Map an email-check body according to the backend that produced it.
pub fn map_check_email(backend: Backend, body: &str) -> Result<EmailLookupResult, ApiError> {
    match backend {
        Backend::Premium => {
            let wire: DetailedWire = parse(body)?;
            Ok(EmailLookupResult::Detailed {
                status: wire.status,
                email: wire.email,
                breaches: wire.breaches.into_iter().map(BreachRecord::from).collect(),
            })
        }
        Backend::Free => {
            let wire: SummaryWire = parse(body)?;
            let breaches = wire
                .breaches
                .into_iter()
                .flat_map(|group| match group {
                    NameGroup::Name(name) => vec![name],
                    NameGroup::Nested(names) => names,
                })
                .collect();
            Ok(EmailLookupResult::Summary { breaches })
        }
        Backend::Password => Err(ApiError::DeserializationError(
            "email check answered by the password backend".to_string(),
        )),
    }
}

// ---------------------------------------------------------------------------
// Breach analytics (free backend)
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct AnalyticsWire {
    #[serde(rename = "BreachesSummary")]
    breaches_summary: Option<SummaryCounts>,
    #[serde(rename = "ExposedBreaches")]
    exposed_breaches: Option<ExposedBreachesWire>,
    #[serde(rename = "BreachMetrics", default)]
    breach_metrics: Value,
    #[serde(rename = "PastesSummary")]
    pastes_summary: Option<PastesWire>,
}

#[derive(Deserialize)]
struct SummaryCounts {
    exposures: Option<Count>,
    site: Option<SiteCount>,
    first_breach: Option<String>,
}

/// Either a count or a `;`-joined list of site names.
#[derive(Deserialize)]
#[serde(untagged)]
enum SiteCount {
    Number(u64),
    Names(String),
}

impl SiteCount {
    fn into_u64(self) -> u64 {
        match self {
            SiteCount::Number(n) => n,
            SiteCount::Names(s) => match s.trim().parse() {
                Ok(n) => n,
                Err(_) => s.split(';').filter(|name| !name.trim().is_empty()).count() as u64,
            },
        }
    }
}

#[derive(Deserialize)]
struct ExposedBreachesWire {
    #[serde(default)]
    breaches_details: Vec<AnalyticsBreachWire>,
}

#[derive(Deserialize)]
struct AnalyticsBreachWire {
    breach: String,
    details: Option<String>,
    domain: Option<String>,
    industry: Option<String>,
    logo: Option<String>,
    password_risk: Option<String>,
    references: Option<String>,
    searchable: Option<Flag>,
    verified: Option<Flag>,
    xposed_data: Option<TextList>,
    xposed_date: Option<String>,
    xposed_records: Option<u64>,
}

impl From<AnalyticsBreachWire> for BreachRecord {
    fn from(w: AnalyticsBreachWire) -> Self {
        Self {
            breach_id: w.breach,
            domain: w.domain,
            breached_date: w.xposed_date,
            industry: w.industry,
            verified: w.verified.and_then(Flag::into_bool),
            searchable: w.searchable.and_then(Flag::into_bool),
            sensitive: None,
            exposed_records: w.xposed_records,
            exposed_data: w.xposed_data.map(TextList::into_vec).unwrap_or_default(),
            password_risk: w.password_risk,
            reference_url: w.references,
            description: w.details,
            logo: w.logo,
        }
    }
}

/// Metric histograms come in several layouts: `{name,count}` or
/// `{year,count}` objects, `[name, count]` pairs (nested in lists at any
/// depth), `{risk_label,risk_score}` objects and plain `{key: count}` maps.
/// Entries in any other layout are skipped; the bundle never fails the call.
fn breach_metrics(value: &Value) -> Option<BreachMetrics> {
    let fields = value.as_object()?;
    let histogram_of = |key: &str| fields.get(key).map(histogram).unwrap_or_default();
    let yearly = histogram_of("yearwise_details")
        .into_iter()
        .fold(BTreeMap::new(), |mut years, (key, count)| {
            *years.entry(year_key(key)).or_insert(0) += count;
            years
        });
    Some(BreachMetrics {
        industry: histogram_of("industry"),
        risk: histogram_of("risk"),
        passwords_strength: histogram_of("passwords_strength"),
        exposed_data: histogram_of("xposed_data"),
        yearly,
    })
}

/// Repeated categories are summed.
fn histogram(value: &Value) -> BTreeMap<String, u64> {
    let mut map = BTreeMap::new();
    collect_metric(value, &mut map);
    map
}

fn collect_metric(value: &Value, map: &mut BTreeMap<String, u64>) {
    match value {
        Value::Array(items) => match items.as_slice() {
            [Value::String(key), count] if metric_count(count).is_some() => {
                if let Some(count) = metric_count(count) {
                    *map.entry(key.clone()).or_insert(0) += count;
                }
            }
            _ => items.iter().for_each(|item| collect_metric(item, map)),
        },
        Value::Object(fields) => {
            let key = ["name", "year", "risk_label"]
                .iter()
                .find_map(|k| fields.get(*k))
                .and_then(metric_key);
            let count = ["count", "risk_score"]
                .iter()
                .find_map(|k| fields.get(*k))
                .and_then(metric_count);
            match (key, count) {
                (Some(key), Some(count)) => *map.entry(key).or_insert(0) += count,
                _ => {
                    for (key, count) in fields {
                        if let Some(count) = metric_count(count) {
                            *map.entry(key.clone()).or_insert(0) += count;
                        }
                    }
                }
            }
        }
        _ => {}
    }
}

fn metric_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn metric_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// `"y2012"` and `"2012"` name the same year.
fn year_key(key: String) -> String {
    let digits = key
        .strip_prefix(['y', 'Y'])
        .filter(|year| !year.is_empty() && year.bytes().all(|b| b.is_ascii_digit()))
        .map(str::to_string);
    digits.unwrap_or(key)
}

#[derive(Deserialize)]
struct PastesWire {
    cnt: Option<Count>,
}

pub fn map_analytics(body: &str) -> Result<AnalyticsResult, ApiError> {
    let wire: AnalyticsWire = parse(body)?;
    let (exposures_count, breaches_count, first_breach) = match wire.breaches_summary {
        Some(summary) => (
            summary.exposures.and_then(Count::into_u64),
            summary.site.map(SiteCount::into_u64),
            summary.first_breach,
        ),
        None => (None, None, None),
    };
    Ok(AnalyticsResult {
        exposures_count,
        breaches_count,
        first_breach,
        pastes_count: wire.pastes_summary.and_then(|p| p.cnt).and_then(Count::into_u64),
        breaches_details: wire
            .exposed_breaches
            .map(|e| e.breaches_details.into_iter().map(BreachRecord::from).collect())
            .unwrap_or_default(),
        metrics: breach_metrics(&wire.breach_metrics),
    })
}

// ---------------------------------------------------------------------------
// Password check (password backend)
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum PasswordWire {
    Wrapped {
        #[serde(rename = "SearchPassAnon")]
        search: PasswordBody,
    },
    Flat(PasswordBody),
}

#[derive(Deserialize)]
struct PasswordBody {
    #[serde(rename = "char")]
    characteristics: Option<Characteristics>,
    count: Count,
}

/// `{"digits":3,...}` or the compact `"D:3;A:8;S:0;L:11"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Characteristics {
    Map(BTreeMap<String, u64>),
    Compact(String),
}

impl Characteristics {
    fn into_map(self) -> BTreeMap<String, u64> {
        match self {
            Characteristics::Map(map) => map,
            Characteristics::Compact(s) => s
                .split(';')
                .filter_map(|part| {
                    let (code, value) = part.split_once(':')?;
                    let key = match code.trim() {
                        "D" => "digits",
                        "A" => "alphabets",
                        "S" => "special",
                        "L" => "length",
                        _ => return None,
                    };
                    Some((key.to_string(), value.trim().parse().ok()?))
                })
                .collect(),
        }
    }
}

/// Map a password-check body. `anon` is the token that was sent.
pub fn map_password(anon: &AnonToken, body: &str) -> Result<PasswordLookupResult, ApiError> {
    let wire: PasswordWire = parse(body)?;
    let body = match wire {
        PasswordWire::Wrapped { search } => search,
        PasswordWire::Flat(body) => body,
    };
    let count = body
        .count
        .into_u64()
        .ok_or_else(|| ApiError::DeserializationError("password count is not a number".to_string()))?;
    Ok(PasswordLookupResult {
        anon: anon.clone(),
        count,
        characteristics: body.characteristics.map(Characteristics::into_map).unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anon::anonymize;

    const BREACHES: &str = r#"{
        "status": "success",
        "message": null,
        "exposedBreaches": [
            {
                "breachID": "adobe",
                "breachedDate": "2013-10-04",
                "domain": "adobe.com",
                "exposedData": ["Email addresses", "Passwords", "Usernames"],
                "exposedRecords": 152000000,
                "exposureDescription": "Adobe breach in 2013",
                "industry": "Technology",
                "logo": "https://example.com/adobe.png",
                "passwordRisk": "high",
                "referenceURL": "https://example.com",
                "searchable": true,
                "sensitive": false,
                "verified": true
            },
            {
                "breachID": "linkedin",
                "domain": "linkedin.com",
                "exposedRecords": 164000000
            }
        ]
    }"#;

    #[test]
    fn breaches_map_all_fields() {
        let records = map_breaches(BREACHES).unwrap();
        assert_eq!(records.len(), 2);

        let adobe = &records[0];
        assert_eq!(adobe.breach_id, "adobe");
        assert_eq!(adobe.domain.as_deref(), Some("adobe.com"));
        assert_eq!(adobe.exposed_records, Some(152_000_000));
        assert_eq!(adobe.industry.as_deref(), Some("Technology"));
        assert_eq!(adobe.verified, Some(true));
        assert_eq!(adobe.sensitive, Some(false));
        assert_eq!(adobe.exposed_data, vec!["Email addresses", "Passwords", "Usernames"]);
        assert_eq!(adobe.reference_url.as_deref(), Some("https://example.com"));
        assert_eq!(adobe.description.as_deref(), Some("Adobe breach in 2013"));
    }

    #[test]
    fn absent_fields_stay_absent() {
        let records = map_breaches(BREACHES).unwrap();
        let linkedin = &records[1];
        assert_eq!(linkedin.breach_id, "linkedin");
        assert_eq!(linkedin.verified, None);
        assert_eq!(linkedin.industry, None);
        assert!(linkedin.exposed_data.is_empty());
    }

    #[test]
    fn breaches_missing_list_is_empty() {
        assert!(map_breaches(r#"{"Breaches": []}"#).unwrap().is_empty());
        assert!(map_breaches(r#"{"status":"success","exposedBreaches":[]}"#).unwrap().is_empty());
    }

    #[test]
    fn breaches_bad_json() {
        let err = map_breaches("not json").unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn free_email_summary_flat_and_nested() {
        let flat = map_check_email(Backend::Free, r#"{"breaches": ["Adobe", "LinkedIn", "Dropbox"]}"#).unwrap();
        assert_eq!(
            flat,
            EmailLookupResult::Summary {
                breaches: vec!["Adobe".into(), "LinkedIn".into(), "Dropbox".into()]
            }
        );

        let nested = map_check_email(Backend::Free, r#"{"breaches": [["Adobe", "LinkedIn"], ["Dropbox"]]}"#).unwrap();
        assert_eq!(nested, flat);
    }

    #[test]
    fn premium_email_detailed() {
        let body = r#"{
            "status": "success",
            "email": "test@example.com",
            "breaches": [{
                "breach_id": "Adobe",
                "breached_date": "2013-10-04T00:00:00",
                "domain": "adobe.com",
                "industry": "Information Technology",
                "password_risk": "hardtocrack",
                "searchable": "Yes",
                "sensitive": "No",
                "verified": "Yes",
                "xposed_data": "Email addresses;Password hints;Passwords;Usernames",
                "xposed_records": 152445165,
                "xposure_desc": "In October 2013..."
            }]
        }"#;
        let EmailLookupResult::Detailed { status, email, breaches } =
            map_check_email(Backend::Premium, body).unwrap()
        else {
            panic!("expected detailed result");
        };
        assert_eq!(status.as_deref(), Some("success"));
        assert_eq!(email.as_deref(), Some("test@example.com"));
        assert_eq!(breaches.len(), 1);
        let adobe = &breaches[0];
        assert_eq!(adobe.breach_id, "Adobe");
        assert_eq!(adobe.searchable, Some(true));
        assert_eq!(adobe.sensitive, Some(false));
        assert_eq!(adobe.exposed_records, Some(152_445_165));
        assert_eq!(
            adobe.exposed_data,
            vec!["Email addresses", "Password hints", "Passwords", "Usernames"]
        );
    }

    #[test]
    fn shape_follows_backend_not_payload() {
        // A summary-shaped body from the premium backend is not read as a summary.
        let err = map_check_email(Backend::Premium, r#"{"breaches": ["Adobe"]}"#).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    const ANALYTICS: &str = r#"{
        "BreachesSummary": {"exposures": 5, "site": 3, "first_breach": "2013-10-04"},
        "ExposedBreaches": {"breaches_details": [{
            "breach": "Adobe",
            "details": "Adobe breach description",
            "domain": "adobe.com",
            "industry": "Technology",
            "logo": "https://example.com/adobe.png",
            "password_risk": "high",
            "references": "https://example.com",
            "searchable": true,
            "verified": true,
            "xposed_data": "email,password",
            "xposed_date": "2013-10-04",
            "xposed_records": 152000000
        }]},
        "BreachMetrics": {
            "industry": [{"name": "Technology", "count": 1}],
            "passwords_strength": [{"name": "weak", "count": 1}],
            "risk": [{"name": "high", "count": 1}],
            "xposed_data": [{"name": "email", "count": 1}],
            "yearwise_details": [{"year": 2013, "count": 1}]
        },
        "PastesSummary": {"cnt": 2}
    }"#;

    #[test]
    fn analytics_maps_summary_details_and_metrics() {
        let result = map_analytics(ANALYTICS).unwrap();
        assert_eq!(result.exposures_count, Some(5));
        assert_eq!(result.breaches_count, Some(3));
        assert_eq!(result.first_breach.as_deref(), Some("2013-10-04"));
        assert_eq!(result.pastes_count, Some(2));
        assert_eq!(result.breaches_details.len(), 1);

        let adobe = &result.breaches_details[0];
        assert_eq!(adobe.breach_id, "Adobe");
        assert_eq!(adobe.domain.as_deref(), Some("adobe.com"));
        assert_eq!(adobe.exposed_records, Some(152_000_000));
        assert_eq!(adobe.verified, Some(true));
        assert_eq!(adobe.exposed_data, vec!["email", "password"]);

        let metrics = result.metrics.unwrap();
        assert_eq!(metrics.industry.len(), 1);
        assert_eq!(metrics.industry["Technology"], 1);
        assert_eq!(metrics.yearly["2013"], 1);
        assert_eq!(metrics.passwords_strength["weak"], 1);
    }

    #[test]
    fn analytics_site_names_and_pair_metrics() {
        let body = r#"{
            "BreachesSummary": {"exposures": "4", "site": "Adobe;LinkedIn", "first_breach": "2012"},
            "BreachMetrics": {"risk": [["high", 2], ["high", 1], ["low", 1]]}
        }"#;
        let result = map_analytics(body).unwrap();
        assert_eq!(result.exposures_count, Some(4));
        assert_eq!(result.breaches_count, Some(2));
        assert_eq!(result.pastes_count, None);
        assert!(result.breaches_details.is_empty());
        let metrics = result.metrics.unwrap();
        assert_eq!(metrics.risk["high"], 3);
        assert_eq!(metrics.risk["low"], 1);
        assert!(metrics.industry.is_empty());
    }

    #[test]
    fn analytics_metrics_tolerate_live_layouts() {
        let body = r#"{
            "BreachesSummary": {"site": "Adobe;LinkedIn"},
            "ExposedBreaches": {"breaches_details": [{"breach": "Adobe"}]},
            "BreachMetrics": {
                "industry": [[["misc", 1], ["tech", 1], ["misc", 2]]],
                "yearwise_details": [{"y2012": 1, "y2013": 2}, {"year": "2013", "count": 1}],
                "risk": [{"risk_label": "Medium", "risk_score": 42}],
                "passwords_strength": [{"EasyToCrack": 1, "PlainText": 0, "StrongHash": 2}],
                "xposed_data": [{"children": [{"name": "Email"}]}, "garbage", 7]
            }
        }"#;
        let result = map_analytics(body).unwrap();
        assert_eq!(result.breaches_count, Some(2));
        assert_eq!(result.breaches_details[0].breach_id, "Adobe");

        let metrics = result.metrics.unwrap();
        assert_eq!(metrics.industry["misc"], 3);
        assert_eq!(metrics.industry["tech"], 1);
        assert_eq!(metrics.yearly["2012"], 1);
        assert_eq!(metrics.yearly["2013"], 3);
        assert_eq!(metrics.risk["Medium"], 42);
        assert_eq!(metrics.passwords_strength["EasyToCrack"], 1);
        assert_eq!(metrics.passwords_strength["StrongHash"], 2);
        assert!(metrics.exposed_data.is_empty());
    }

    #[test]
    fn analytics_unrecognised_metrics_bundle_is_absent() {
        let result = map_analytics(r#"{"BreachesSummary": {"site": 1}, "BreachMetrics": "n/a"}"#).unwrap();
        assert_eq!(result.breaches_count, Some(1));
        assert!(result.metrics.is_none());
    }

    #[test]
    fn analytics_without_metrics_is_absent() {
        let result = map_analytics(r#"{"BreachesSummary": {"site": 0}}"#).unwrap();
        assert_eq!(result.breaches_count, Some(0));
        assert!(result.metrics.is_none());
    }

    #[test]
    fn password_flat_shape_keeps_sent_token() {
        let token = anonymize("password123");
        let body = r#"{"anon": "a1b2c3d4e5", "char": {"digits": 3, "alphabets": 8, "special": 0, "length": 11}, "count": 12345}"#;
        let result = map_password(&token, body).unwrap();
        assert_eq!(result.count, 12345);
        assert_eq!(result.anon.as_str(), "aa77c1b9b7");
        assert_eq!(result.characteristics["digits"], 3);
        assert_eq!(result.characteristics["alphabets"], 8);
        assert_eq!(result.characteristics["length"], 11);
    }

    #[test]
    fn password_wrapped_compact_shape() {
        let token = anonymize("password123");
        let body = r#"{"SearchPassAnon": {"anon": "aa77c1b9b7", "char": "D:3;A:8;S:0;L:11", "count": "12345", "wordlist": 0}}"#;
        let result = map_password(&token, body).unwrap();
        assert_eq!(result.count, 12345);
        assert_eq!(result.characteristics["digits"], 3);
        assert_eq!(result.characteristics["special"], 0);
        assert_eq!(result.characteristics.len(), 4);
    }

    #[test]
    fn password_non_numeric_count_is_an_error() {
        let token = anonymize("x");
        let err = map_password(&token, r#"{"count": "lots"}"#).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
