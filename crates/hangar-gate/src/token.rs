//! Session token format: `<random hex>:<issued-at unix seconds>`.

use std::fmt;

use rand::rngs::OsRng;
use rand::RngCore;

use crate::AuthError;

/// Bytes of OS randomness per token (hex encoded to 64 chars).
pub const TOKEN_RANDOM_BYTES: usize = 32;

/// Separates the random part from the timestamp. Never produced by hex.
pub const TOKEN_DELIMITER: char = ':';

/// An issued session token.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Issue a fresh token stamped with `issued_at`.
    pub fn issue(issued_at: i64) -> Self {
        let mut bytes = [0u8; TOKEN_RANDOM_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(format!("{}{TOKEN_DELIMITER}{issued_at}", hex::encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Issuance time embedded in the token.
    pub fn issued_at(&self) -> Result<i64, AuthError> {
        parse_issued_at(&self.0)
    }
}

// Token values are credentials; keep them out of logs.
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Token").field(&"<redacted>").finish()
    }
}

/// Extract the issuance timestamp from a raw token string.
pub fn parse_issued_at(raw: &str) -> Result<i64, AuthError> {
    let parts: Vec<&str> = raw.split(TOKEN_DELIMITER).collect();
    if parts.len() != 2 {
        return Err(AuthError::Malformed);
    }
    parts[1].parse::<i64>().map_err(|_| AuthError::Malformed)
}

/// Validate a raw token against `now` and a lifetime of `ttl_secs`.
///
/// A token is expired once `now - issued_at >= ttl_secs`.
pub fn validate(raw: Option<&str>, now: i64, ttl_secs: i64) -> Result<(), AuthError> {
    let raw = match raw {
        Some(r) if !r.is_empty() => r,
        _ => return Err(AuthError::Missing),
    };
    let issued_at = parse_issued_at(raw)?;
    if now.saturating_sub(issued_at) >= ttl_secs {
        return Err(AuthError::Expired);
    }
    Ok(())
}
