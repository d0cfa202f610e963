/*
 * Responsibility
 * - the type handlers see as the "verified request" contract
 * - the middleware verifies and stores it in request extensions; handlers
 *   only ever receive this type
 *
 * Notes
 * - OAuth2/JWT verification lives in middleware/services; this is the fixed
 *   contract between them
 */

use crate::services::auth::Claims;

/// Decoded claims payload attached to an authorized request.
#[derive(Debug, Clone)]
pub struct AuthPayload(Claims);

impl AuthPayload {
    pub fn new(claims: Claims) -> Self {
        Self(claims)
    }

    pub fn claims(&self) -> &Claims {
        &self.0
    }
}
