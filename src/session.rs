//! HMAC-signed session tokens.
//!
//! A token is `base64url(claims json) . base64url(hmac-sha256 signature)`.
//! Tokens are verified constant-time via `ring` before the payload is
//! parsed, so a forged token is rejected without ever deserializing it.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Duration, Utc};
use ring::hmac;
use serde::{Deserialize, Serialize};

use crate::directory::{is_admin, DirectoryUser};
use crate::error::Error;

/// Sessions live for seven days from issuance.
pub const SESSION_TTL_DAYS: i64 = 7;

/// The authenticated identity a session token carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    pub user_id: u64,
    pub external_id: String,
    pub email: String,
    pub display_name: String,
    pub is_admin: bool,
    pub expires_at: DateTime<Utc>,
}

impl SessionClaims {
    /// Claims for a directory user, expiring [`SESSION_TTL_DAYS`] after `now`.
    pub fn for_user(user: &DirectoryUser, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user.id,
            external_id: user.id.to_string(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            is_admin: is_admin(user),
            expires_at: now + Duration::days(SESSION_TTL_DAYS),
        }
    }
}

/// Issues and verifies session tokens with a fixed secret key.
pub struct SessionSigner {
    key: hmac::Key,
}

impl SessionSigner {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            key: hmac::Key::new(hmac::HMAC_SHA256, secret),
        }
    }

    /// Sign claims into a token.
    pub fn issue(&self, claims: &SessionClaims) -> Result<String, Error> {
        let payload = serde_json::to_vec(claims)?;
        let signature = hmac::sign(&self.key, &payload);
        Ok(format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(&payload),
            URL_SAFE_NO_PAD.encode(signature.as_ref())
        ))
    }

    /// Verify a token against the key and the expiry deadline at `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, Error> {
        let (payload_b64, signature_b64) = token
            .split_once('.')
            .ok_or_else(|| Error::InvalidSession("malformed token".to_string()))?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| Error::InvalidSession("payload is not base64url".to_string()))?;
        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| Error::InvalidSession("signature is not base64url".to_string()))?;

        hmac::verify(&self.key, &payload, &signature)
            .map_err(|_| Error::InvalidSession("signature mismatch".to_string()))?;

        let claims: SessionClaims = serde_json::from_slice(&payload)
            .map_err(|_| Error::InvalidSession("unreadable claims".to_string()))?;

        if claims.expires_at <= now {
            return Err(Error::InvalidSession("token expired".to_string()));
        }
        Ok(claims)
    }

    /// [`SessionSigner::verify_at`] with the current wall-clock time.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, Error> {
        self.verify_at(token, Utc::now())
    }
}
