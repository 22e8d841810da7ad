//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! Database-backed services share one Unit of Work for repository
//! access and transaction management.

mod auth_service;
mod comment_service;
pub mod container;
mod file_service;
mod ingredient_service;
mod like_service;
mod recipe_service;
mod tag_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthResponse, AuthService, Authenticator, Claims, Registration};
pub use comment_service::{CommentManager, CommentService};
pub use file_service::{FileManager, FileService, UploadedFile};
pub use ingredient_service::{IngredientManager, IngredientService};
pub use like_service::{LikeManager, LikeService};
pub use recipe_service::{RecipeManager, RecipeService};
pub use tag_service::{TagManager, TagService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::MockAuthService;
#[cfg(any(test, feature = "test-utils"))]
pub use comment_service::MockCommentService;
#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
#[cfg(any(test, feature = "test-utils"))]
pub use file_service::MockFileService;
#[cfg(any(test, feature = "test-utils"))]
pub use ingredient_service::MockIngredientService;
#[cfg(any(test, feature = "test-utils"))]
pub use like_service::MockLikeService;
#[cfg(any(test, feature = "test-utils"))]
pub use recipe_service::MockRecipeService;
#[cfg(any(test, feature = "test-utils"))]
pub use tag_service::MockTagService;
#[cfg(any(test, feature = "test-utils"))]
pub use user_service::MockUserService;
