pub mod auth;
pub mod guard;

pub use auth::{session_middleware, AuthKeys, AuthUser};
pub use guard::{RequireAdmin, RequireUser, XSRF_HEADER};
