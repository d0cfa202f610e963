/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 *   - db: PgPool, auth: AuthService
 * - Held by Clone (internals are Arc / cheap to clone)
 */
use std::sync::Arc;

use crate::services::auth::AuthService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(db: sqlx::PgPool, auth: Arc<AuthService>) -> Self {
        Self { db, auth }
    }
}
