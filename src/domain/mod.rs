//! Domain layer - Core business entities and logic
//!
//! Plain entities, enums and response shapes. Nothing here knows about
//! SeaORM or axum.

pub mod ingredient;
pub mod interaction;
pub mod password;
pub mod recipe;
pub mod tag;
pub mod user;

pub use ingredient::Ingredient;
pub use interaction::{Comment, CommentResponse, CommentWithAuthor, Like, LikesCounter};
pub use password::Password;
pub use recipe::{
    DifficultyLevel, EstimatedTime, IngredientLine, QuantityType, Recipe, RecipeDetails,
    RecipeDraft, RecipeIngredient, RecipeIngredientResponse, RecipeOverview, RecipeResponse,
    RecipeSearch, RecipeWithInteractions,
};
pub use tag::{Tag, TagType};
pub use user::{
    AppRole, NewUser, ProfileUpdate, User, UserActivity, UserResponse, UserWithInteractions,
};
