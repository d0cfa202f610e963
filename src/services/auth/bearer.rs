//! Bearer credential extraction from the `Authorization` header.
//!
//! Pure read of transport metadata; the token itself is returned verbatim and
//! not inspected here. All failures collapse into the same generic 401 so the
//! response never reveals which part of the credential was wrong.

use axum::http::{HeaderMap, header};

use crate::services::auth::AuthError;

/// Pull the bearer token out of the request headers.
///
/// Accepts exactly `Bearer <token>` (scheme case-insensitive, single space);
/// anything else is `unauthorized`.
pub fn extract(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(AuthError::unauthorized)?;
    let value = value.to_str().map_err(|_| AuthError::unauthorized())?;

    let pieces: Vec<&str> = value.split(' ').collect();
    if pieces.len() != 2 {
        return Err(AuthError::unauthorized());
    }
    if !pieces[0].eq_ignore_ascii_case("bearer") {
        return Err(AuthError::unauthorized());
    }

    Ok(pieces[1])
}
