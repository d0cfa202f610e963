//! Authorization failure modes.
//!
//! Every stage of the chain (header extraction → key resolution → token
//! verification → permission check) reports failure as an [`AuthError`]: a
//! stable machine code, a client-facing description, and the HTTP status the
//! boundary layer must answer with. Credential-extraction failures keep a
//! deliberately generic description so responses don't aid credential
//! guessing; claim/permission failures may say more, since the caller already
//! proved possession of *some* token.

use axum::http::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {description}")]
pub struct AuthError {
    pub code: &'static str,
    pub description: &'static str,
    pub status: StatusCode,
}

impl AuthError {
    /// Missing or malformed `Authorization` header. Intentionally generic.
    pub fn unauthorized() -> Self {
        Self {
            code: "unauthorized",
            description: "Unauthorized",
            status: StatusCode::UNAUTHORIZED,
        }
    }

    /// Token header carries no `kid`.
    pub fn malformed_header() -> Self {
        Self {
            code: "invalid_header",
            description: "Authorization malformed.",
            status: StatusCode::UNAUTHORIZED,
        }
    }

    /// No key in the fetched key set matches the token's `kid`.
    pub fn unknown_key() -> Self {
        Self {
            code: "invalid_header",
            description: "Unable to find the appropriate key.",
            status: StatusCode::FORBIDDEN,
        }
    }

    /// Catch-all for parse/verify failures: bad signature, unsupported
    /// algorithm, unusable key material, undecodable token.
    pub fn unparseable() -> Self {
        Self {
            code: "invalid_header",
            description: "Unable to parse authentication token.",
            status: StatusCode::FORBIDDEN,
        }
    }

    pub fn token_expired() -> Self {
        Self {
            code: "token_expired",
            description: "Token expired.",
            status: StatusCode::UNAUTHORIZED,
        }
    }

    /// Audience or issuer did not match configuration.
    pub fn invalid_claims() -> Self {
        Self {
            code: "invalid_claims",
            description: "Incorrect claims. Please, check the audience and issuer.",
            status: StatusCode::FORBIDDEN,
        }
    }

    pub fn forbidden() -> Self {
        Self {
            code: "forbidden",
            description: "Forbidden",
            status: StatusCode::FORBIDDEN,
        }
    }

    /// The authority's key set could not be fetched or parsed. A deployment
    /// problem, not a caller problem; surfaces as a plain 500.
    pub fn keys_unavailable() -> Self {
        Self {
            code: "keys_unavailable",
            description: "Internal Server Error",
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
