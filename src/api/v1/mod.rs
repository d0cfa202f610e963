/*
 * Responsibility
 * - v1 public surface (re-export of routes() etc.)
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::routes;
