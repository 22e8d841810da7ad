//! HTTP request handlers.

pub mod auth_handler;
pub mod comment_handler;
pub mod file_handler;
pub mod ingredient_handler;
pub mod like_handler;
pub mod recipe_handler;
pub mod tag_handler;
pub mod user_handler;

pub use auth_handler::{account_routes, auth_routes};
pub use comment_handler::comment_routes;
pub use file_handler::file_routes;
pub use ingredient_handler::ingredient_routes;
pub use like_handler::like_routes;
pub use recipe_handler::recipe_routes;
pub use tag_handler::tag_routes;
pub use user_handler::user_routes;
