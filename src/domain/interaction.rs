//! Likes and comments left by users on recipes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::{User, UserResponse};

/// A user's like on a recipe. At most one per (user, recipe).
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub id: i64,
    pub user_id: Option<Uuid>,
    pub recipe_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Number of likes on a recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikesCounter {
    #[schema(example = 12)]
    pub likes_counter: u64,
}

/// Comment row
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: i64,
    pub user_id: Option<Uuid>,
    pub recipe_id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn is_written_by(&self, user_id: Uuid) -> bool {
        self.user_id == Some(user_id)
    }
}

/// Comment with its author loaded
#[derive(Debug, Clone)]
pub struct CommentWithAuthor {
    pub comment: Comment,
    pub author: Option<User>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: i64,
    pub user_id: Option<Uuid>,
    pub user: Option<UserResponse>,
    pub recipe_id: i64,
    #[schema(example = "Made this twice already!")]
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<CommentWithAuthor> for CommentResponse {
    fn from(value: CommentWithAuthor) -> Self {
        let CommentWithAuthor { comment, author } = value;
        Self {
            id: comment.id,
            user_id: comment.user_id,
            user: author.map(UserResponse::from),
            recipe_id: comment.recipe_id,
            text: comment.text,
            created_at: comment.created_at,
        }
    }
}
