/*
 * Responsibility
 * - v1 URL structure
 * - decide here which routes sit behind the authorization guard, and with
 *   which permission (one sub-router per permission, merged at the end)
 */
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post},
};

use crate::middleware::auth::{RequireAuth, access};
use crate::state::AppState;

use crate::api::v1::handlers::{
    drinks::{create_drink, delete_drink, list_drinks, list_drinks_detail, update_drink},
    health::health,
};

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/health", get(health))
        .route("/drinks", get(list_drinks));

    let detail = Router::new()
        .route("/drinks-detail", get(list_drinks_detail))
        .route_layer(from_fn_with_state(
            RequireAuth::new(state.clone(), "get:drinks-detail"),
            access::guard,
        ));

    let create = Router::new()
        .route("/drinks", post(create_drink))
        .route_layer(from_fn_with_state(
            RequireAuth::new(state.clone(), "post:drinks"),
            access::guard,
        ));

    let update = Router::new()
        .route("/drinks/{drink_id}", patch(update_drink))
        .route_layer(from_fn_with_state(
            RequireAuth::new(state.clone(), "patch:drinks"),
            access::guard,
        ));

    let remove = Router::new()
        .route("/drinks/{drink_id}", delete(delete_drink))
        .route_layer(from_fn_with_state(
            RequireAuth::new(state, "delete:drinks"),
            access::guard,
        ));

    public.merge(detail).merge(create).merge(update).merge(remove)
}
