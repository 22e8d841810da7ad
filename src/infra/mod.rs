//! Infrastructure layer - External systems integration
//!
//! - Database connection, migrations and repositories
//! - Unit of Work for transaction management
//! - Blob storage for uploaded pictures

pub mod db;
pub mod repositories;
pub mod storage;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    CommentRepository, IngredientRepository, LikeRepository, RecipeRepository, TagRepository,
    UserRepository,
};
pub use storage::{BlobStore, FilesystemBlobStore, StorageError};
pub use unit_of_work::{Persistence, TransactionContext, TxRecipeRepository, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockCommentRepository, MockIngredientRepository, MockLikeRepository, MockRecipeRepository,
    MockTagRepository, MockUserRepository,
};
#[cfg(any(test, feature = "test-utils"))]
pub use storage::MockBlobStore;
