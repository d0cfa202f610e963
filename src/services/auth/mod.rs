pub mod bearer;
pub mod error;
pub mod factory;
pub mod jwks;
pub mod permissions;
pub mod verify;

pub use error::AuthError;
pub use factory::build_auth_service;
pub use verify::{AuthService, Claims};

#[cfg(test)]
pub(crate) mod fixtures;
