//! User repository: accounts and their activity counters.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set, SqlErr,
};
use uuid::Uuid;

use super::entities::{like, recipe, user};
use crate::domain::{AppRole, NewUser, ProfileUpdate, User, UserActivity};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by (already lowercased) email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn create(&self, user: NewUser) -> AppResult<User>;

    async fn update_profile(&self, id: Uuid, profile: ProfileUpdate) -> AppResult<User>;

    async fn update_role(&self, id: Uuid, role: AppRole) -> AppResult<User>;

    /// Hard delete. Authored rows keep existing with a NULL author.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// User with all-time posted recipes and received likes
    async fn find_with_interactions(&self, id: Uuid) -> AppResult<Option<UserActivity>>;

    /// Every non-admin user with counters restricted to rows created at or after `since`
    async fn list_activity(&self, since: DateTime<Utc>) -> AppResult<Vec<UserActivity>>;
}

#[derive(Debug, FromQueryResult)]
struct UserCount {
    user_id: Uuid,
    count: i64,
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: Uuid) -> AppResult<user::Model> {
        user::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("User", id))
    }

    /// Recipes posted per author
    async fn posted_recipes(
        &self,
        only: Option<Uuid>,
        since: Option<DateTime<Utc>>,
    ) -> AppResult<HashMap<Uuid, u64>> {
        let mut query = recipe::Entity::find()
            .select_only()
            .column_as(recipe::Column::UserId, "user_id")
            .column_as(recipe::Column::Id.count(), "count")
            .filter(recipe::Column::UserId.is_not_null());
        if let Some(id) = only {
            query = query.filter(recipe::Column::UserId.eq(id));
        }
        if let Some(since) = since {
            query = query.filter(recipe::Column::CreatedAt.gte(since));
        }

        collect_counts(query.group_by(recipe::Column::UserId), &self.db).await
    }

    /// Likes received per recipe author
    async fn received_likes(
        &self,
        only: Option<Uuid>,
        since: Option<DateTime<Utc>>,
    ) -> AppResult<HashMap<Uuid, u64>> {
        let mut query = like::Entity::find()
            .select_only()
            .column_as(recipe::Column::UserId, "user_id")
            .column_as(like::Column::Id.count(), "count")
            .join(JoinType::InnerJoin, like::Relation::Recipe.def())
            .filter(recipe::Column::UserId.is_not_null());
        if let Some(id) = only {
            query = query.filter(recipe::Column::UserId.eq(id));
        }
        if let Some(since) = since {
            query = query.filter(like::Column::CreatedAt.gte(since));
        }

        collect_counts(query.group_by(recipe::Column::UserId), &self.db).await
    }
}

async fn collect_counts<E: EntityTrait>(
    query: Select<E>,
    db: &DatabaseConnection,
) -> AppResult<HashMap<Uuid, u64>> {
    let rows = query.into_model::<UserCount>().all(db).await?;
    Ok(rows
        .into_iter()
        .map(|row| (row.user_id, row.count.max(0) as u64))
        .collect())
}

fn activity(user: User, recipes: &HashMap<Uuid, u64>, likes: &HashMap<Uuid, u64>) -> UserActivity {
    UserActivity {
        posted_recipes: recipes.get(&user.id).copied().unwrap_or(0),
        received_likes: likes.get(&user.id).copied().unwrap_or(0),
        user,
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        user::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let email = new_user.email.clone();
        let active_model = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            first_name: Set(new_user.first_name),
            last_name: Set(new_user.last_name),
            email: Set(new_user.email),
            birthday: Set(new_user.birthday),
            picture_url: Set(new_user.picture_url),
            role: Set(new_user.role.into()),
            password_hash: Set(new_user.password_hash),
            created_at: Set(Utc::now()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => AppError::UserAlreadyExists(email),
                _ => AppError::from(e),
            })?;
        User::try_from(model)
    }

    async fn update_profile(&self, id: Uuid, profile: ProfileUpdate) -> AppResult<User> {
        let mut active: user::ActiveModel = self.find_model(id).await?.into();
        active.first_name = Set(profile.first_name);
        active.last_name = Set(profile.last_name);
        active.birthday = Set(profile.birthday);
        active.picture_url = Set(profile.picture_url);

        let model = active.update(&self.db).await?;
        User::try_from(model)
    }

    async fn update_role(&self, id: Uuid, role: AppRole) -> AppResult<User> {
        let mut active: user::ActiveModel = self.find_model(id).await?.into();
        active.role = Set(role.into());

        let model = active.update(&self.db).await?;
        User::try_from(model)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = user::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    async fn find_with_interactions(&self, id: Uuid) -> AppResult<Option<UserActivity>> {
        let Some(user) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let recipes = self.posted_recipes(Some(id), None).await?;
        let likes = self.received_likes(Some(id), None).await?;
        Ok(Some(activity(user, &recipes, &likes)))
    }

    async fn list_activity(&self, since: DateTime<Utc>) -> AppResult<Vec<UserActivity>> {
        let users = user::Entity::find()
            .filter(user::Column::Role.ne(i32::from(AppRole::Admin)))
            .order_by_asc(user::Column::CreatedAt)
            .all(&self.db)
            .await?;

        let recipes = self.posted_recipes(None, Some(since)).await?;
        let likes = self.received_likes(None, Some(since)).await?;

        users
            .into_iter()
            .map(|model| Ok(activity(User::try_from(model)?, &recipes, &likes)))
            .collect::<Result<Vec<_>, AppError>>()
    }
}

