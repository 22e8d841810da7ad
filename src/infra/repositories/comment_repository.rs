//! Comment repository. Comments are always loaded with their author.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::{comment, user};
use crate::domain::{Comment, CommentWithAuthor, User};
use crate::errors::{AppError, AppResult};
use crate::types::{Page, PageRequest};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<CommentWithAuthor>>;

    async fn create(&self, user_id: Uuid, recipe_id: i64, text: String)
        -> AppResult<CommentWithAuthor>;

    /// Newest first
    async fn list_for_recipe(
        &self,
        recipe_id: i64,
        page: PageRequest,
    ) -> AppResult<Page<CommentWithAuthor>>;

    /// Replace the text and reset the timestamp to now
    async fn update_text(&self, id: i64, text: String) -> AppResult<CommentWithAuthor>;

    async fn delete(&self, id: i64) -> AppResult<bool>;
}

pub struct CommentStore {
    db: DatabaseConnection,
}

impl CommentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn author_of(&self, model: &comment::Model) -> AppResult<Option<User>> {
        let Some(user_id) = model.user_id else {
            return Ok(None);
        };
        user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await?
            .map(User::try_from)
            .transpose()
    }
}

fn with_author(
    (comment, author): (comment::Model, Option<user::Model>),
) -> AppResult<CommentWithAuthor> {
    Ok(CommentWithAuthor {
        comment: Comment::from(comment),
        author: author.map(User::try_from).transpose()?,
    })
}

#[async_trait]
impl CommentRepository for CommentStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<CommentWithAuthor>> {
        comment::Entity::find_by_id(id)
            .find_also_related(user::Entity)
            .one(&self.db)
            .await?
            .map(with_author)
            .transpose()
    }

    async fn create(
        &self,
        user_id: Uuid,
        recipe_id: i64,
        text: String,
    ) -> AppResult<CommentWithAuthor> {
        let model = comment::ActiveModel {
            text: Set(text),
            created_at: Set(Utc::now()),
            user_id: Set(Some(user_id)),
            recipe_id: Set(recipe_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        let author = self.author_of(&model).await?;
        Ok(CommentWithAuthor {
            comment: Comment::from(model),
            author,
        })
    }

    async fn list_for_recipe(
        &self,
        recipe_id: i64,
        page: PageRequest,
    ) -> AppResult<Page<CommentWithAuthor>> {
        let paginator = comment::Entity::find()
            .filter(comment::Column::RecipeId.eq(recipe_id))
            .order_by_desc(comment::Column::CreatedAt)
            .order_by_desc(comment::Column::Id)
            .find_also_related(user::Entity)
            .paginate(&self.db, page.limit());

        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.page_number()).await?;
        let items = rows
            .into_iter()
            .map(with_author)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Page::new(items, total))
    }

    async fn update_text(&self, id: i64, text: String) -> AppResult<CommentWithAuthor> {
        let model = comment::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Comment", id))?;

        let mut active: comment::ActiveModel = model.into();
        active.text = Set(text);
        active.created_at = Set(Utc::now());
        let model = active.update(&self.db).await?;

        let author = self.author_of(&model).await?;
        Ok(CommentWithAuthor {
            comment: Comment::from(model),
            author,
        })
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = comment::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
