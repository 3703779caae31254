pub mod admin;
pub mod auth;

pub use admin::admin_authorization;
pub use auth::{auth_middleware, AuthUser};
