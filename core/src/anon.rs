//! One-way password anonymization for k-anonymity lookups.
//!
//! The password backend is queried with the first 10 hex characters of the
//! password's Keccak-512 digest (the original Keccak padding, not NIST
//! SHA3-512). `AnonToken` can only be built by `anonymize`, and the router
//! only accepts an `AnonToken` for password checks, so the raw password has
//! no path onto the wire.

use std::fmt;

use tiny_keccak::{Hasher, Keccak};

/// Number of hex characters sent upstream.
pub const TOKEN_LEN: usize = 10;

/// Lowercase hex prefix of a password digest. Safe to log and transmit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnonToken(String);

impl AnonToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnonToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hash `secret` (as UTF-8 bytes) and keep the first `TOKEN_LEN` hex chars.
pub fn anonymize(secret: &str) -> AnonToken {
    let mut hasher = Keccak::v512();
    hasher.update(secret.as_bytes());
    let mut digest = [0u8; 64];
    hasher.finalize(&mut digest);
    AnonToken(hex::encode(&digest[..TOKEN_LEN / 2]))
}
