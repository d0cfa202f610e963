/*
 * Responsibility
 * - public interface of middleware (re-exports)
 */
pub mod auth;
pub mod cors;
pub mod http;
