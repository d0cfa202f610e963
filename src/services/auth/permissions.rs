//! Permission check against a verified claims payload.
//!
//! Strictly downstream of verification: a payload only ever reaches this
//! check after `AuthService::verify` succeeded. Pure predicate, no side
//! effects.

use crate::services::auth::{AuthError, Claims};

/// Require `permission` to be a member of the payload's permission set.
///
/// A payload without a `permissions` claim at all is treated the same as an
/// insufficient one (it means the authority's RBAC settings never attached
/// permissions to the token).
pub fn check(permission: &str, claims: &Claims) -> Result<(), AuthError> {
    let Some(granted) = claims.permissions.as_deref() else {
        return Err(AuthError::forbidden());
    };

    if !granted.iter().any(|p| p == permission) {
        return Err(AuthError::forbidden());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn claims(permissions: Option<&[&str]>) -> Claims {
        Claims {
            iss: "https://tenant.example.auth0.com/".into(),
            aud: serde_json::json!("https://drinks/"),
            sub: Some("auth0|barista".into()),
            exp: 4_102_444_800,
            iat: None,
            permissions: permissions.map(|p| p.iter().map(|s| s.to_string()).collect()),
        }
    }

    #[test]
    fn missing_permissions_claim_is_forbidden() {
        let err = check("get:drinks-detail", &claims(None)).unwrap_err();
        assert_eq!(err.code, "forbidden");
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn absent_permission_is_forbidden() {
        let err = check("delete:drinks", &claims(Some(&["get:drinks-detail"]))).unwrap_err();
        assert_eq!(err, AuthError::forbidden());
    }

    #[test]
    fn empty_permission_set_is_forbidden() {
        assert!(check("get:drinks-detail", &claims(Some(&[]))).is_err());
    }

    #[test]
    fn granted_permission_passes() {
        let payload = claims(Some(&["get:drinks-detail", "post:drinks"]));
        assert!(check("post:drinks", &payload).is_ok());
    }
}
