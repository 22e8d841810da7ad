//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod comment_repository;
pub(crate) mod entities;
mod ingredient_repository;
mod like_repository;
pub(crate) mod recipe_repository;
mod tag_repository;
mod user_repository;

pub use comment_repository::{CommentRepository, CommentStore};
pub use ingredient_repository::{IngredientRepository, IngredientStore};
pub use like_repository::{LikeRepository, LikeStore};
pub use recipe_repository::{RecipeRepository, RecipeStore};
pub use tag_repository::{TagRepository, TagStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use comment_repository::MockCommentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use ingredient_repository::MockIngredientRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use like_repository::MockLikeRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use recipe_repository::MockRecipeRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use tag_repository::MockTagRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
