//! Request authentication for the VDC APIs.
//!
//! Two schemes are supported and may be combined:
//!
//! 1. HTTP Basic, from the configured username/password (two-way SSL projects)
//! 2. x-pay-token, an HMAC-SHA256 token over the request components
//!
//! # x-pay-token
//!
//! ```text
//! pre_hash = timestamp + resource_path + sorted_query_string + body
//! token    = "xv2:" + timestamp + ":" + hex(hmac_sha256(shared_secret, pre_hash))
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::SigningError;

type HmacSha256 = Hmac<Sha256>;

/// Header / key identifier the upstream expects for the token.
pub const X_PAY_TOKEN: &str = "x-pay-token";

/// Current Unix time in seconds.
///
/// # Errors
///
/// Returns an error if the system time is before the UNIX epoch.
pub fn unix_timestamp() -> Result<u64, SigningError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|_| SigningError::SystemTime("System time before UNIX epoch".to_string()))
}

/// Compute an x-pay-token.
///
/// `query_string` must be the exact sorted, encoded query that is sent and
/// `body` the exact body string (empty when there is none).
///
/// # Example
///
/// ```ignore
/// let token = sign(1700000000, "/vmorc/offers/v1/all", "", "", "s3cr3t");
/// assert!(token.starts_with("xv2:1700000000:"));
/// ```
pub fn sign(timestamp: u64, resource_path: &str, query_string: &str, body: &str, shared_secret: &str) -> String {
    let pre_hash = format!("{}{}{}{}", timestamp, resource_path, query_string, body);

    let mut mac =
        HmacSha256::new_from_slice(shared_secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(pre_hash.as_bytes());
    let digest = mac.finalize().into_bytes();

    format!("xv2:{}:{}", timestamp, hex::encode(digest))
}

/// Sign with a configured secret, failing fast when it is missing or empty.
pub fn x_pay_token(
    timestamp: u64,
    resource_path: &str,
    query_string: &str,
    body: &str,
    shared_secret: Option<&str>,
) -> Result<String, SigningError> {
    match shared_secret {
        Some(secret) if !secret.is_empty() => {
            Ok(sign(timestamp, resource_path, query_string, body, secret))
        }
        _ => Err(SigningError::MissingSharedSecret),
    }
}

/// `Authorization` header value for HTTP Basic.
pub fn basic_authorization(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", username, password)))
}
