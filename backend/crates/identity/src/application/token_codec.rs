//! Token Codec
//!
//! Compact HS256 JWTs (`header.payload.signature`) via `jsonwebtoken`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, decode_header, encode};
use platform::crypto::from_base64url;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::claims::ExpiringClaims;
use crate::domain::signing_key::SigningKey;
use crate::error::TokenError;

/// Signs and verifies claim payloads.
///
/// Payload-agnostic: the caller picks the claims type.
pub trait TokenCodec: Send + Sync {
    fn sign<C: Serialize>(&self, claims: &C) -> Result<String, TokenError>;

    /// Verify against an explicit clock
    fn verify_at<C>(&self, token: &str, now: DateTime<Utc>) -> Result<C, TokenError>
    where
        C: DeserializeOwned + Clone + ExpiringClaims;

    fn verify<C>(&self, token: &str) -> Result<C, TokenError>
    where
        C: DeserializeOwned + Clone + ExpiringClaims,
    {
        self.verify_at(token, Utc::now())
    }
}

/// HMAC-SHA256 codec
#[derive(Clone)]
pub struct HmacTokenCodec {
    key: Arc<SigningKey>,
    validation: Validation,
}

impl HmacTokenCodec {
    pub fn new(key: Arc<SigningKey>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_aud = false;
        // `exp` is compared against the caller's clock in `verify_at`
        validation.validate_exp = false;

        Self { key, validation }
    }
}

impl std::fmt::Debug for HmacTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacTokenCodec")
            .field("algorithm", &Algorithm::HS256)
            .finish_non_exhaustive()
    }
}

fn classify(err: &jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
    }
}

impl TokenCodec for HmacTokenCodec {
    fn sign<C: Serialize>(&self, claims: &C) -> Result<String, TokenError> {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(self.key.as_bytes()),
        )
        .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    fn verify_at<C>(&self, token: &str, now: DateTime<Utc>) -> Result<C, TokenError>
    where
        C: DeserializeOwned + Clone + ExpiringClaims,
    {
        // Everything after the second dot is the signature segment
        let mut segments = token.splitn(3, '.');
        let (Some(header), Some(payload), Some(signature)) =
            (segments.next(), segments.next(), segments.next())
        else {
            return Err(TokenError::Malformed);
        };

        let signed_part = &token[..header.len() + payload.len() + 2];
        let header = decode_header(signed_part).map_err(|_| TokenError::Malformed)?;
        if header.alg != Algorithm::HS256 {
            return Err(TokenError::Malformed);
        }

        if from_base64url(signature).is_err() {
            return Err(TokenError::InvalidSignature);
        }

        let data = decode::<C>(
            token,
            &DecodingKey::from_secret(self.key.as_bytes()),
            &self.validation,
        )
        .map_err(|e| classify(&e))?;

        if data.claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }
}
