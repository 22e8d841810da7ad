//! Shared test doubles and fixtures.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use sharespoon::domain::{
    AppRole, DifficultyLevel, EstimatedTime, Ingredient, IngredientLine, QuantityType, Recipe,
    RecipeDetails, RecipeDraft, RecipeIngredient, RecipeOverview, Tag, TagType, User,
};
use sharespoon::errors::{AppError, AppResult};
use sharespoon::infra::{
    CommentRepository, IngredientRepository, LikeRepository, MockCommentRepository,
    MockIngredientRepository, MockLikeRepository, MockRecipeRepository, MockTagRepository,
    MockUserRepository, RecipeRepository, TagRepository, TransactionContext, UnitOfWork,
    UserRepository,
};

/// Unit of work over mocked repositories.
///
/// Each repository starts without expectations; set the ones a test
/// needs through the `with_*` builders.
pub struct TestUnitOfWork {
    users: Arc<MockUserRepository>,
    recipes: Arc<MockRecipeRepository>,
    ingredients: Arc<MockIngredientRepository>,
    tags: Arc<MockTagRepository>,
    likes: Arc<MockLikeRepository>,
    comments: Arc<MockCommentRepository>,
}

impl TestUnitOfWork {
    pub fn new() -> Self {
        Self {
            users: Arc::new(MockUserRepository::new()),
            recipes: Arc::new(MockRecipeRepository::new()),
            ingredients: Arc::new(MockIngredientRepository::new()),
            tags: Arc::new(MockTagRepository::new()),
            likes: Arc::new(MockLikeRepository::new()),
            comments: Arc::new(MockCommentRepository::new()),
        }
    }

    pub fn with_users(mut self, repo: MockUserRepository) -> Self {
        self.users = Arc::new(repo);
        self
    }

    pub fn with_recipes(mut self, repo: MockRecipeRepository) -> Self {
        self.recipes = Arc::new(repo);
        self
    }

    pub fn with_ingredients(mut self, repo: MockIngredientRepository) -> Self {
        self.ingredients = Arc::new(repo);
        self
    }

    pub fn with_tags(mut self, repo: MockTagRepository) -> Self {
        self.tags = Arc::new(repo);
        self
    }

    pub fn with_likes(mut self, repo: MockLikeRepository) -> Self {
        self.likes = Arc::new(repo);
        self
    }

    pub fn with_comments(mut self, repo: MockCommentRepository) -> Self {
        self.comments = Arc::new(repo);
        self
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn recipes(&self) -> Arc<dyn RecipeRepository> {
        self.recipes.clone()
    }

    fn ingredients(&self) -> Arc<dyn IngredientRepository> {
        self.ingredients.clone()
    }

    fn tags(&self) -> Arc<dyn TagRepository> {
        self.tags.clone()
    }

    fn likes(&self) -> Arc<dyn LikeRepository> {
        self.likes.clone()
    }

    fn comments(&self) -> Arc<dyn CommentRepository> {
        self.comments.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        // Transactions need a real connection
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}

pub fn test_user(id: Uuid, role: AppRole) -> User {
    User {
        id,
        first_name: "Becca".to_string(),
        last_name: "Richards".to_string(),
        email: "richards_becca@example.com".to_string(),
        birthday: NaiveDate::from_ymd_opt(1994, 5, 17).unwrap(),
        picture_url: None,
        role,
        password_hash: "hashed".to_string(),
        created_at: Utc::now(),
    }
}

/// User repository where every looked-up account exists
pub fn known_users() -> MockUserRepository {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_user(id, AppRole::User))));
    users
}

/// User repository where every looked-up account is gone
pub fn missing_users() -> MockUserRepository {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().returning(|_| Ok(None));
    users
}

pub fn test_details(id: i64, author: Option<Uuid>) -> RecipeDetails {
    RecipeDetails {
        recipe: Recipe {
            id,
            user_id: author,
            name: "Banana Bread".to_string(),
            description: "Moist and easy".to_string(),
            estimated_time: EstimatedTime::from_hms(1, 20, 0),
            difficulty: DifficultyLevel::Medium,
            picture_url: None,
            created_at: Utc::now(),
        },
        author: author.map(|id| test_user(id, AppRole::User)),
        ingredients: vec![RecipeIngredient {
            ingredient: Ingredient {
                id: 1,
                name: "Banana".to_string(),
            },
            quantity: 3.0,
            quantity_type: QuantityType::Pieces,
        }],
        tags: vec![Tag {
            id: 2,
            name: "Dessert".to_string(),
            tag_type: TagType::Course,
        }],
    }
}

pub fn test_overview(id: i64, author: Option<Uuid>, likes: u64) -> RecipeOverview {
    RecipeOverview {
        details: test_details(id, author),
        likes,
        comments: 0,
        liked_by_viewer: false,
    }
}

pub fn test_draft(ingredient_ids: &[i64], tag_ids: &[i64]) -> RecipeDraft {
    RecipeDraft {
        name: "Banana Bread".to_string(),
        description: "Moist and easy".to_string(),
        estimated_time: EstimatedTime::from_hms(1, 20, 0),
        difficulty: DifficultyLevel::Medium,
        picture_url: None,
        ingredients: ingredient_ids
            .iter()
            .map(|id| IngredientLine {
                ingredient_id: *id,
                quantity: 1.0,
                quantity_type: QuantityType::Pieces,
            })
            .collect(),
        tag_ids: tag_ids.to_vec(),
    }
}
