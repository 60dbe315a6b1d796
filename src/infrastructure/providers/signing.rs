//! # Request Signing
//!
//! HMAC-SHA256 request signatures for providers that authenticate each call
//! with a shared secret.
//!
//! The signed payload is `METHOD \n endpoint \n timestamp \n body` and the
//! signature is the lowercase hex digest.

use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// Signs requests with a shared API secret.
#[derive(Clone)]
pub struct RequestSigner {
    secret: String,
}

impl RequestSigner {
    /// Creates a signer for the given secret.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Signs one request.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::InternalError` if the MAC cannot be keyed.
    pub fn sign(&self, method: &str, endpoint: &str, timestamp: &str, body: &str) -> ProviderResult<String> {
        let payload = format!("{method}\n{endpoint}\n{timestamp}\n{body}");
        hmac_sha256_hex(self.secret.as_bytes(), payload.as_bytes())
    }
}

impl fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSigner")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Computes a hex-encoded HMAC-SHA256.
///
/// # Errors
///
/// Returns `ProviderError::InternalError` if the MAC cannot be keyed.
pub fn hmac_sha256_hex(key: &[u8], message: &[u8]) -> ProviderResult<String> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| ProviderError::internal_error(format!("invalid signing key: {e}")))?;
    mac.update(message);
    Ok(hex::encode(mac.finalize().into_bytes()))
}
