//! Local input validation, run before any request is built.

use std::sync::LazyLock;

use regex::Regex;

// local@label(.label)*.tld: labels are non-empty, so the domain can't hold
// consecutive dots or start/end with one.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern compiles")
});

/// Whether `email` has the shape `local@domain.tld`.
///
/// Rejects empty input, a missing or empty local part, a domain without a
/// dot-separated TLD, whitespace anywhere and consecutive dots.
pub fn validate_email(email: &str) -> bool {
    !email.contains("..") && EMAIL_RE.is_match(email)
}
