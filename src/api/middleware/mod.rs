//! API middleware.

mod auth;
mod timing;

pub use auth::{auth_middleware, require_admin, CurrentUser};
pub use timing::timing_middleware;
