//! Service Container - Centralized service access.
//!
//! Handlers depend on the `ServiceContainer` trait only, so router tests
//! can swap in a mocked container.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, CommentManager, CommentService, FileManager, FileService,
    IngredientManager, IngredientService, LikeManager, LikeService, RecipeManager, RecipeService,
    TagManager, TagService, UserManager, UserService,
};
use crate::config::Config;
use crate::infra::{BlobStore, Persistence};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn recipes(&self) -> Arc<dyn RecipeService>;

    fn ingredients(&self) -> Arc<dyn IngredientService>;

    fn tags(&self) -> Arc<dyn TagService>;

    fn likes(&self) -> Arc<dyn LikeService>;

    fn comments(&self) -> Arc<dyn CommentService>;

    fn files(&self) -> Arc<dyn FileService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    recipe_service: Arc<dyn RecipeService>,
    ingredient_service: Arc<dyn IngredientService>,
    tag_service: Arc<dyn TagService>,
    like_service: Arc<dyn LikeService>,
    comment_service: Arc<dyn CommentService>,
    file_service: Arc<dyn FileService>,
}

impl Services {
    /// Wire every service over one unit of work and the given blob store
    pub fn from_connection(
        db: sea_orm::DatabaseConnection,
        config: Config,
        blob_store: Arc<dyn BlobStore>,
    ) -> Self {
        let uow = Arc::new(Persistence::new(db));

        let file_service = FileManager::new(
            blob_store,
            config.storage_container.clone(),
            config.public_base_url.clone(),
        );

        Self {
            user_service: Arc::new(UserManager::new(uow.clone())),
            recipe_service: Arc::new(RecipeManager::new(uow.clone())),
            ingredient_service: Arc::new(IngredientManager::new(uow.clone())),
            tag_service: Arc::new(TagManager::new(uow.clone())),
            like_service: Arc::new(LikeManager::new(uow.clone())),
            comment_service: Arc::new(CommentManager::new(uow.clone())),
            file_service: Arc::new(file_service),
            auth_service: Arc::new(Authenticator::new(uow, config)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn recipes(&self) -> Arc<dyn RecipeService> {
        self.recipe_service.clone()
    }

    fn ingredients(&self) -> Arc<dyn IngredientService> {
        self.ingredient_service.clone()
    }

    fn tags(&self) -> Arc<dyn TagService> {
        self.tag_service.clone()
    }

    fn likes(&self) -> Arc<dyn LikeService> {
        self.like_service.clone()
    }

    fn comments(&self) -> Arc<dyn CommentService> {
        self.comment_service.clone()
    }

    fn files(&self) -> Arc<dyn FileService> {
        self.file_service.clone()
    }
}
