//! Per-route authorization middleware.
//!
//! Composes the whole chain in fixed order — bearer extraction → key
//! resolution + token verification → permission check — and either runs the
//! wrapped handler (with the decoded payload available via extensions) or
//! short-circuits with the stage's `AuthError`. Each invocation is
//! self-contained: no shared mutable state, safe to attach to any number of
//! routes.
//!
//! Usage (in `routes.rs`):
//! ```ignore
//! Router::new()
//!     .route("/drinks-detail", get(list_drinks_detail))
//!     .route_layer(middleware::from_fn_with_state(
//!         RequireAuth::new(state.clone(), "get:drinks-detail"),
//!         access::guard,
//!     ))
//! ```

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::api::v1::extractors::AuthPayload;
use crate::error::AppError;
use crate::services::auth::{bearer, permissions};
use crate::state::AppState;

/// State handed to `guard` via `from_fn_with_state`: the shared app state
/// plus the permission this particular route demands.
#[derive(Clone)]
pub struct RequireAuth {
    state: AppState,
    permission: &'static str,
}

impl RequireAuth {
    pub fn new(state: AppState, permission: &'static str) -> Self {
        Self { state, permission }
    }
}

pub async fn guard(
    State(ctx): State<RequireAuth>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = match bearer::extract(req.headers()) {
        Ok(token) => token,
        Err(err) => {
            tracing::warn!(code = err.code, "bearer extraction failed");
            return Err(err.into());
        }
    };

    // Signature + iss/aud/exp verification, including the per-request JWKS
    // fetch, happens inside AuthService.
    let claims = match ctx.state.auth.verify(token).await {
        Ok(claims) => claims,
        Err(err) => {
            tracing::warn!(code = err.code, "access token verification failed");
            return Err(err.into());
        }
    };

    if let Err(err) = permissions::check(ctx.permission, &claims) {
        tracing::warn!(
            permission = ctx.permission,
            sub = claims.sub.as_deref().unwrap_or("<none>"),
            "permission check failed"
        );
        return Err(err.into());
    }

    // middleware → extractor hand-off
    req.extensions_mut().insert(AuthPayload::new(claims));

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::fixtures::{
        K1_KID, K1_PEM, claims_json, service, sign,
    };
    use axum::{
        Json, Router,
        body::{Body, to_bytes},
        http::{Request as HttpRequest, StatusCode, header},
        middleware::from_fn_with_state,
        routing::get,
    };
    use jsonwebtoken::Algorithm;
    use serde_json::json;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };
    use tower::ServiceExt;

    fn test_state() -> AppState {
        // connect_lazy performs no I/O; the db is never touched in these tests.
        let db = sqlx::PgPool::connect_lazy("postgres://localhost/unused").unwrap();
        AppState::new(db, Arc::new(service()))
    }

    async fn echo_permissions(payload: AuthPayload) -> Json<serde_json::Value> {
        Json(json!({ "permissions": payload.claims().permissions }))
    }

    fn protected_router(state: AppState, permission: &'static str) -> Router {
        Router::new()
            .route("/probe", get(echo_permissions))
            .route_layer(from_fn_with_state(
                RequireAuth::new(state.clone(), permission),
                guard,
            ))
            .with_state(state)
    }

    fn request(auth_header: Option<String>) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder().uri("/probe");
        if let Some(value) = auth_header {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_json(res: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn missing_header_short_circuits_with_401() {
        let app = protected_router(test_state(), "get:drinks-detail");
        let res = app.oneshot(request(None)).await.unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(res).await;
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!(401));
        assert_eq!(body["message"], json!("Unauthorized"));
    }

    #[tokio::test]
    async fn insufficient_permission_short_circuits_with_403() {
        let app = protected_router(test_state(), "delete:drinks");
        let token = sign(Some(K1_KID), Algorithm::RS256, K1_PEM, &claims_json(3600));
        let res = app
            .oneshot(request(Some(format!("Bearer {token}"))))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        let body = body_json(res).await;
        assert_eq!(body["message"], json!("Forbidden"));
    }

    #[tokio::test]
    async fn expired_token_short_circuits_with_401() {
        let app = protected_router(test_state(), "get:drinks-detail");
        let token = sign(Some(K1_KID), Algorithm::RS256, K1_PEM, &claims_json(-3600));
        let res = app
            .oneshot(request(Some(format!("Bearer {token}"))))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(res).await;
        assert_eq!(body["message"], json!("Token expired."));
    }

    #[tokio::test]
    async fn valid_token_reaches_handler_with_payload() {
        let app = protected_router(test_state(), "get:drinks-detail");
        let token = sign(Some(K1_KID), Algorithm::RS256, K1_PEM, &claims_json(3600));
        let res = app
            .oneshot(request(Some(format!("Bearer {token}"))))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["permissions"], json!(["get:drinks-detail"]));
    }

    #[tokio::test]
    async fn handler_runs_exactly_once_per_authorized_request() {
        let calls = Arc::new(AtomicUsize::new(0));
        let state = test_state();

        let counter = calls.clone();
        let app = Router::new()
            .route(
                "/probe",
                get(move || {
                    let counter = counter.clone();
                    async move {
                        counter.fetch_add(1, Ordering::SeqCst);
                        "ok"
                    }
                }),
            )
            .route_layer(from_fn_with_state(
                RequireAuth::new(state.clone(), "get:drinks-detail"),
                guard,
            ))
            .with_state(state);

        let token = sign(Some(K1_KID), Algorithm::RS256, K1_PEM, &claims_json(3600));
        let res = app
            .oneshot(request(Some(format!("Bearer {token}"))))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
