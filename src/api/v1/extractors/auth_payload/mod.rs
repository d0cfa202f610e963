/*!
 * Authorized-request payload extractor
 *
 * Responsibility:
 * - hand the decoded claims payload (AuthPayload) to handlers
 * - HTTP/axum wiring stays in core, the type contract in types
 *
 * Public API:
 * - AuthPayload
 */

mod core;
mod types;

pub use types::AuthPayload;
