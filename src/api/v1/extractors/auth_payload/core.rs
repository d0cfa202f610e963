use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

use super::AuthPayload;

/// Extractor so handlers can receive the decoded payload.
/// Assumes the authorization middleware already inserted it into
/// request extensions; absence means the route is not guarded (or the
/// middleware is missing) and yields a 401.
impl FromRequestParts<AppState> for AuthPayload
where
    AppState: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthPayload>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}
