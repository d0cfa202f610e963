//! Token verification against the authority's published keys.
//!
//! `AuthService` is the orchestrating half of the authorization core: it takes
//! the raw compact token, resolves the signing key by `kid` through a
//! [`KeySource`], and verifies signature + standard claims in one
//! `jsonwebtoken::decode` call. Apart from the key fetch it is a pure function
//! of its inputs and wall-clock time (expiry check), so repeated verification
//! of the same token yields identical claims.

use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header, errors::ErrorKind};
use serde::Deserialize;

use crate::services::auth::AuthError;
use crate::services::auth::jwks::KeySource;

/// Decoded claims payload. Produced only after successful verification;
/// scoped to one request.
///
/// NOTE: `aud` in a JWT can be either a string or an array; it is kept as a
/// raw value and validated by `jsonwebtoken` against the configured audience.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Claims {
    pub iss: String,
    #[serde(default)]
    pub aud: serde_json::Value,
    #[serde(default)]
    pub sub: Option<String>,
    pub exp: u64,
    #[serde(default)]
    pub iat: Option<u64>,
    /// Fine-grained permission strings granted by the authority. Absent when
    /// the authority's RBAC settings don't attach permissions to the token.
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
}

/// RS256-family access-token verifier backed by a remote key set.
#[derive(Clone)]
pub struct AuthService {
    key_source: Arc<dyn KeySource>,
    validation: Validation,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("validation", &self.validation)
            .finish()
    }
}

impl AuthService {
    pub fn new(
        key_source: Arc<dyn KeySource>,
        algorithms: Vec<Algorithm>,
        audience: &str,
        issuer: &str,
        leeway_seconds: u64,
    ) -> Result<Self, &'static str> {
        let Some(&first) = algorithms.first() else {
            return Err("algorithm allow-list must not be empty");
        };

        let mut validation = Validation::new(first);
        validation.algorithms = algorithms;
        validation.set_audience(&[audience]);
        validation.set_issuer(&[issuer]);
        validation.leeway = leeway_seconds;

        Ok(Self {
            key_source,
            validation,
        })
    }

    /// Verify and decode a compact token.
    ///
    /// Failure taxonomy:
    /// - no `kid` in the unverified header → `invalid_header` (401)
    /// - no matching key in the fetched set → `invalid_header` (403)
    /// - expired signature                 → `token_expired` (401)
    /// - audience/issuer mismatch          → `invalid_claims` (403)
    /// - anything else (malformed token, bad signature, disallowed
    ///   algorithm, unusable key)          → `invalid_header` (403)
    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::unparseable())?;
        let kid = header.kid.ok_or_else(AuthError::malformed_header)?;

        let jwks = self.key_source.fetch().await.map_err(|e| {
            tracing::error!(error = %e, "failed to fetch signing key set");
            AuthError::keys_unavailable()
        })?;

        let jwk = jwks.find(&kid).ok_or_else(AuthError::unknown_key)?;
        let key = jwk.signing_key().ok_or_else(AuthError::unparseable)?;

        let decoding_key = DecodingKey::from_rsa_components(&key.n, &key.e)
            .map_err(|_| AuthError::unparseable())?;

        let data = decode::<Claims>(token, &decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::token_expired(),
                ErrorKind::InvalidAudience | ErrorKind::InvalidIssuer => {
                    AuthError::invalid_claims()
                }
                _ => AuthError::unparseable(),
            }
        })?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::fixtures::{
        AUDIENCE, FailingKeys, ISSUER, K1_KID, K1_PEM, K2_PEM, claims_json, service, sign,
    };
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn valid_token_decodes() {
        let token = sign(Some(K1_KID), Algorithm::RS256, K1_PEM, &claims_json(3600));
        let claims = service().verify(&token).await.unwrap();

        assert_eq!(claims.iss, ISSUER);
        assert_eq!(claims.sub.as_deref(), Some("auth0|barista"));
        assert_eq!(
            claims.permissions.as_deref(),
            Some(&["get:drinks-detail".to_string()][..])
        );
    }

    #[tokio::test]
    async fn verification_is_idempotent() {
        let token = sign(Some(K1_KID), Algorithm::RS256, K1_PEM, &claims_json(3600));
        let svc = service();

        let first = svc.verify(&token).await.unwrap();
        let second = svc.verify(&token).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn expired_token_is_token_expired() {
        let token = sign(Some(K1_KID), Algorithm::RS256, K1_PEM, &claims_json(-3600));
        let err = service().verify(&token).await.unwrap_err();

        assert_eq!(err.code, "token_expired");
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn wrong_audience_is_invalid_claims() {
        let mut claims = claims_json(3600);
        claims["aud"] = json!("https://some-other-api/");
        let token = sign(Some(K1_KID), Algorithm::RS256, K1_PEM, &claims);
        let err = service().verify(&token).await.unwrap_err();

        assert_eq!(err.code, "invalid_claims");
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn wrong_issuer_is_invalid_claims() {
        let mut claims = claims_json(3600);
        claims["iss"] = json!("https://rogue.example/");
        let token = sign(Some(K1_KID), Algorithm::RS256, K1_PEM, &claims);
        let err = service().verify(&token).await.unwrap_err();

        assert_eq!(err, AuthError::invalid_claims());
    }

    #[tokio::test]
    async fn missing_kid_is_invalid_header_401() {
        let token = sign(None, Algorithm::RS256, K1_PEM, &claims_json(3600));
        let err = service().verify(&token).await.unwrap_err();

        assert_eq!(err.code, "invalid_header");
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.description, "Authorization malformed.");
    }

    #[tokio::test]
    async fn unknown_kid_is_invalid_header_403() {
        let token = sign(Some("who-dis"), Algorithm::RS256, K1_PEM, &claims_json(3600));
        let err = service().verify(&token).await.unwrap_err();

        assert_eq!(err.code, "invalid_header");
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.description, "Unable to find the appropriate key.");
    }

    #[tokio::test]
    async fn signature_from_other_key_is_rejected() {
        // kid resolves to K1, but the signature was produced with K2.
        let token = sign(Some(K1_KID), Algorithm::RS256, K2_PEM, &claims_json(3600));
        let err = service().verify(&token).await.unwrap_err();

        assert_eq!(err, AuthError::unparseable());
    }

    #[tokio::test]
    async fn disallowed_algorithm_is_rejected() {
        // Service only allows RS256.
        let token = sign(Some(K1_KID), Algorithm::RS384, K1_PEM, &claims_json(3600));
        let err = service().verify(&token).await.unwrap_err();

        assert_eq!(err, AuthError::unparseable());
    }

    #[tokio::test]
    async fn garbage_token_is_invalid_header() {
        let err = service().verify("not-a-jwt").await.unwrap_err();
        assert_eq!(err, AuthError::unparseable());
    }

    #[tokio::test]
    async fn key_set_fetch_failure_is_internal() {
        let svc = AuthService::new(
            Arc::new(FailingKeys),
            vec![Algorithm::RS256],
            AUDIENCE,
            ISSUER,
            0,
        )
        .unwrap();

        let token = sign(Some(K1_KID), Algorithm::RS256, K1_PEM, &claims_json(3600));
        let err = svc.verify(&token).await.unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn empty_allow_list_is_a_construction_error() {
        let result = AuthService::new(Arc::new(FailingKeys), Vec::new(), AUDIENCE, ISSUER, 0);
        assert!(result.is_err());
    }
}
