//! Tag catalog repository.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::entities::tag;
use crate::domain::{Tag, TagType};
use crate::errors::AppResult;
use crate::utils::contains_pattern;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// All tags ordered by name
    async fn list(&self) -> AppResult<Vec<Tag>>;

    /// Case-insensitive exact name lookup
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Tag>>;

    /// Case-insensitive substring search on the name
    async fn search(&self, term: &str) -> AppResult<Vec<Tag>>;

    /// How many of `ids` exist. Callers pass distinct ids.
    async fn count_existing(&self, ids: Vec<i64>) -> AppResult<u64>;

    async fn create(&self, name: String, tag_type: TagType) -> AppResult<Tag>;

    async fn list_by_types(&self, types: Vec<TagType>) -> AppResult<Vec<Tag>>;
}

pub struct TagStore {
    db: DatabaseConnection,
}

impl TagStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn lower_name() -> Expr {
    Expr::expr(Func::lower(Expr::col((tag::Entity, tag::Column::Name))))
}

/// Case-insensitive substring match on `tags.name`
pub(crate) fn name_contains(term: &str) -> SimpleExpr {
    lower_name().like(LikeExpr::new(contains_pattern(term)).escape('\\'))
}

fn into_tags(models: Vec<tag::Model>) -> AppResult<Vec<Tag>> {
    models.into_iter().map(Tag::try_from).collect()
}

#[async_trait]
impl TagRepository for TagStore {
    async fn list(&self) -> AppResult<Vec<Tag>> {
        let models = tag::Entity::find()
            .order_by_asc(tag::Column::Name)
            .all(&self.db)
            .await?;
        into_tags(models)
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Tag>> {
        tag::Entity::find()
            .filter(lower_name().eq(name.trim().to_lowercase()))
            .one(&self.db)
            .await?
            .map(Tag::try_from)
            .transpose()
    }

    async fn search(&self, term: &str) -> AppResult<Vec<Tag>> {
        let models = tag::Entity::find()
            .filter(name_contains(term))
            .order_by_asc(tag::Column::Name)
            .all(&self.db)
            .await?;
        into_tags(models)
    }

    async fn count_existing(&self, ids: Vec<i64>) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let count = tag::Entity::find()
            .filter(tag::Column::Id.is_in(ids))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn create(&self, name: String, tag_type: TagType) -> AppResult<Tag> {
        let model = tag::ActiveModel {
            name: Set(name),
            tag_type: Set(tag_type.into()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        Tag::try_from(model)
    }

    async fn list_by_types(&self, types: Vec<TagType>) -> AppResult<Vec<Tag>> {
        let models = tag::Entity::find()
            .filter(tag::Column::TagType.is_in(types.into_iter().map(i32::from)))
            .order_by_asc(tag::Column::TagType)
            .order_by_asc(tag::Column::Name)
            .all(&self.db)
            .await?;
        into_tags(models)
    }
}
