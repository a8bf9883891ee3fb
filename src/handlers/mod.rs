// handlers/mod.rs
//
// Public endpoints (`/`, `/health`) live in `system`; every `/api/<resource>`
// route is an instantiation of the generic controller in `resource`.

pub mod resource;
pub mod system;

pub use resource::{resource_routes, EntityKey};
