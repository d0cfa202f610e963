pub mod api_json;
pub mod auth_payload;

pub use api_json::ApiJson;
pub use auth_payload::AuthPayload;
