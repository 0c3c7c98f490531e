//! Session Token Codec
//!
//! `admin-session` cookie format: `<base64url(json claims)>.<base64url(hmac)>`.

use chrono::{DateTime, Utc};
use platform::crypto::{from_base64_url, hmac_sha256, to_base64_url, verify_hmac_sha256};

use crate::domain::entity::SessionClaims;
use crate::error::{AuthError, AuthResult};

#[derive(Clone)]
pub struct SessionTokenCodec {
    secret: [u8; 32],
}

impl SessionTokenCodec {
    pub fn new(secret: [u8; 32]) -> Self {
        Self { secret }
    }

    /// Serialize and sign claims
    pub fn encode(&self, claims: &SessionClaims) -> AuthResult<String> {
        let json = serde_json::to_vec(claims)
            .map_err(|e| AuthError::Internal(format!("Failed to encode session claims: {e}")))?;
        let payload = to_base64_url(&json);
        let signature = hmac_sha256(&self.secret, payload.as_bytes());

        Ok(format!("{}.{}", payload, to_base64_url(&signature)))
    }

    /// Verify signature and expiry, then return the claims
    pub fn decode(&self, token: &str) -> AuthResult<SessionClaims> {
        self.decode_at(token, Utc::now())
    }

    pub fn decode_at(&self, token: &str, now: DateTime<Utc>) -> AuthResult<SessionClaims> {
        let (payload, signature_b64) = token.split_once('.').ok_or(AuthError::SessionInvalid)?;

        let signature = from_base64_url(signature_b64).map_err(|_| AuthError::SessionInvalid)?;
        if !verify_hmac_sha256(&self.secret, payload.as_bytes(), &signature) {
            tracing::warn!("Session token signature mismatch");
            return Err(AuthError::SessionInvalid);
        }

        let json = from_base64_url(payload).map_err(|_| AuthError::SessionInvalid)?;
        let claims: SessionClaims =
            serde_json::from_slice(&json).map_err(|_| AuthError::SessionInvalid)?;

        if claims.is_expired_at(now) {
            tracing::debug!(sub = %claims.sub, "Session token expired");
            return Err(AuthError::SessionInvalid);
        }

        Ok(claims)
    }
}

impl std::fmt::Debug for SessionTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionTokenCodec { .. }")
    }
}
