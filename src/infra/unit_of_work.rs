//! Unit of Work pattern implementation.
//!
//! Centralizes access to all repositories and runs multi-table writes
//! inside one database transaction.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, IsolationLevel, QueryFilter, Set, TransactionTrait,
};
use std::sync::Arc;

use super::repositories::entities::{recipe, recipe_ingredient, recipe_tag};
use super::repositories::recipe_repository::hydrate;
use super::repositories::{
    CommentRepository, CommentStore, IngredientRepository, IngredientStore, LikeRepository,
    LikeStore, RecipeRepository, RecipeStore, TagRepository, TagStore, UserRepository, UserStore,
};
use crate::domain::{RecipeDetails, RecipeDraft};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Not mockable directly due to the generic `transaction` method.
/// Tests implement it by hand over mocked repositories.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn recipes(&self) -> Arc<dyn RecipeRepository>;

    fn ingredients(&self) -> Arc<dyn IngredientRepository>;

    fn tags(&self) -> Arc<dyn TagRepository>;

    fn likes(&self) -> Arc<dyn LikeRepository>;

    fn comments(&self) -> Arc<dyn CommentRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is committed on success or rolled back on error.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Repository access scoped to one open transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn recipes(&self) -> TxRecipeRepository<'_> {
        TxRecipeRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    recipe_repo: Arc<RecipeStore>,
    ingredient_repo: Arc<IngredientStore>,
    tag_repo: Arc<TagStore>,
    like_repo: Arc<LikeStore>,
    comment_repo: Arc<CommentStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            recipe_repo: Arc::new(RecipeStore::new(db.clone())),
            ingredient_repo: Arc::new(IngredientStore::new(db.clone())),
            tag_repo: Arc::new(TagStore::new(db.clone())),
            like_repo: Arc::new(LikeStore::new(db.clone())),
            comment_repo: Arc::new(CommentStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn recipes(&self) -> Arc<dyn RecipeRepository> {
        self.recipe_repo.clone()
    }

    fn ingredients(&self) -> Arc<dyn IngredientRepository> {
        self.ingredient_repo.clone()
    }

    fn tags(&self) -> Arc<dyn TagRepository> {
        self.tag_repo.clone()
    }

    fn likes(&self) -> Arc<dyn LikeRepository> {
        self.like_repo.clone()
    }

    fn comments(&self) -> Arc<dyn CommentRepository> {
        self.comment_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            )
            .await?;

        match f(TransactionContext::new(&txn)).await {
            Ok(result) => {
                txn.commit().await?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-aware recipe writes.
///
/// A recipe row, its ingredient lines and its tag links are always
/// written together.
pub struct TxRecipeRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxRecipeRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Insert a recipe authored by `author` and return its id
    pub async fn insert(&self, author: uuid::Uuid, draft: &RecipeDraft) -> AppResult<i64> {
        let model = recipe::ActiveModel {
            user_id: Set(Some(author)),
            name: Set(draft.name.clone()),
            description: Set(draft.description.clone()),
            estimated_time_seconds: Set(seconds(draft)?),
            difficulty: Set(draft.difficulty.into()),
            picture_url: Set(draft.picture_url.clone()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.txn)
        .await?;

        self.write_links(model.id, draft).await?;
        Ok(model.id)
    }

    /// Overwrite the recipe fields and replace its ingredient and tag sets.
    /// Author and creation time are kept.
    pub async fn replace(&self, id: i64, draft: &RecipeDraft) -> AppResult<()> {
        let existing = recipe::Entity::find_by_id(id)
            .one(self.txn)
            .await?
            .ok_or_else(|| AppError::not_found("Recipe", id))?;

        let mut active: recipe::ActiveModel = existing.into();
        active.name = Set(draft.name.clone());
        active.description = Set(draft.description.clone());
        active.estimated_time_seconds = Set(seconds(draft)?);
        active.difficulty = Set(draft.difficulty.into());
        active.picture_url = Set(draft.picture_url.clone());
        active.update(self.txn).await?;

        recipe_ingredient::Entity::delete_many()
            .filter(recipe_ingredient::Column::RecipeId.eq(id))
            .exec(self.txn)
            .await?;
        recipe_tag::Entity::delete_many()
            .filter(recipe_tag::Column::RecipeId.eq(id))
            .exec(self.txn)
            .await?;

        self.write_links(id, draft).await
    }

    /// Re-read a recipe inside the transaction
    pub async fn details(&self, id: i64) -> AppResult<RecipeDetails> {
        let model = recipe::Entity::find_by_id(id)
            .one(self.txn)
            .await?
            .ok_or_else(|| AppError::not_found("Recipe", id))?;

        hydrate(self.txn, vec![model])
            .await?
            .pop()
            .ok_or_else(|| AppError::not_found("Recipe", id))
    }

    async fn write_links(&self, recipe_id: i64, draft: &RecipeDraft) -> AppResult<()> {
        if !draft.ingredients.is_empty() {
            let lines = draft.ingredients.iter().map(|line| recipe_ingredient::ActiveModel {
                recipe_id: Set(recipe_id),
                ingredient_id: Set(line.ingredient_id),
                quantity: Set(line.quantity),
                quantity_type: Set(line.quantity_type.into()),
            });
            recipe_ingredient::Entity::insert_many(lines)
                .exec_without_returning(self.txn)
                .await?;
        }

        if !draft.tag_ids.is_empty() {
            let links = draft.tag_ids.iter().map(|tag_id| recipe_tag::ActiveModel {
                recipe_id: Set(recipe_id),
                tag_id: Set(*tag_id),
            });
            recipe_tag::Entity::insert_many(links)
                .exec_without_returning(self.txn)
                .await?;
        }

        Ok(())
    }
}

fn seconds(draft: &RecipeDraft) -> AppResult<i32> {
    i32::try_from(draft.estimated_time.as_seconds())
        .map_err(|_| AppError::validation("Estimated time is too long"))
}

/// Simpler API for executing transactional operations.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Transaction, Value};
    use uuid::Uuid;

    use super::*;
    use crate::domain::{
        DifficultyLevel, EstimatedTime, IngredientLine, QuantityType, TagType,
    };
    use crate::infra::repositories::entities::{ingredient, tag, user};
    use crate::services::{RecipeManager, RecipeService};

    const RECIPE_ID: i64 = 7;

    fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
    }

    fn exec(rows: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected: rows,
        }
    }

    fn author_row(id: Uuid) -> user::Model {
        user::Model {
            id,
            first_name: "Ada".to_string(),
            last_name: "Baker".to_string(),
            email: "ada@example.com".to_string(),
            birthday: NaiveDate::from_ymd_opt(1990, 4, 2).unwrap(),
            picture_url: None,
            role: 1,
            password_hash: "hash".to_string(),
            created_at: Utc::now(),
        }
    }

    fn recipe_row(author: Uuid, name: &str) -> recipe::Model {
        recipe::Model {
            id: RECIPE_ID,
            user_id: Some(author),
            name: name.to_string(),
            description: "Moist and easy".to_string(),
            estimated_time_seconds: 4800,
            difficulty: 2,
            picture_url: None,
            created_at: Utc::now(),
        }
    }

    fn line_row() -> (recipe_ingredient::Model, ingredient::Model) {
        (
            recipe_ingredient::Model {
                recipe_id: RECIPE_ID,
                ingredient_id: 3,
                quantity: 2.0,
                quantity_type: 5,
            },
            ingredient::Model {
                id: 3,
                name: "Banana".to_string(),
            },
        )
    }

    fn tag_row() -> (recipe_tag::Model, tag::Model) {
        (
            recipe_tag::Model {
                recipe_id: RECIPE_ID,
                tag_id: 4,
            },
            tag::Model {
                id: 4,
                name: "Dessert".to_string(),
                tag_type: 1,
            },
        )
    }

    fn draft(name: &str) -> RecipeDraft {
        RecipeDraft {
            name: name.to_string(),
            description: "Moist and easy".to_string(),
            estimated_time: EstimatedTime::from_hms(1, 20, 0),
            difficulty: DifficultyLevel::Medium,
            picture_url: None,
            ingredients: vec![IngredientLine {
                ingredient_id: 3,
                quantity: 2.0,
                quantity_type: QuantityType::Pieces,
            }],
            tag_ids: vec![4],
        }
    }

    /// Queue the four reads `hydrate` performs for one recipe
    fn with_hydration(db: MockDatabase, author: Uuid, name: &str) -> MockDatabase {
        db.append_query_results([vec![recipe_row(author, name)]])
            .append_query_results([vec![author_row(author)]])
            .append_query_results([vec![line_row()]])
            .append_query_results([vec![tag_row()]])
    }

    fn sql_of(txn: &Transaction) -> Vec<String> {
        txn.statements().iter().map(|s| s.sql.clone()).collect()
    }

    /// The logged transaction opened by the write, as opposed to
    /// the single statements run outside of it
    fn write_transaction(log: &[Transaction]) -> Vec<String> {
        log.iter()
            .map(sql_of)
            .find(|sql| sql.first().is_some_and(|s| s == "BEGIN"))
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_create_commits_recipe_with_links() {
        let author = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // ingredient and tag existence checks
            .append_query_results([vec![count_row(1)]])
            .append_query_results([vec![count_row(1)]])
            .append_query_results([vec![author_row(author)]])
            // INSERT ... RETURNING
            .append_query_results([vec![recipe_row(author, "Banana Bread")]])
            .append_exec_results([exec(1), exec(1)]);
        let conn = with_hydration(db, author, "Banana Bread").into_connection();

        let recipes = RecipeManager::new(Arc::new(Persistence::new(conn.clone())));
        let created = recipes.create(author, draft("Banana Bread")).await.unwrap();

        assert_eq!(created.id, RECIPE_ID);
        assert_eq!(created.user_id, Some(author));
        assert_eq!(created.user.map(|u| u.id), Some(author));
        assert_eq!(created.recipe_ingredients.len(), 1);
        assert_eq!(created.recipe_ingredients[0].name, "Banana");
        assert_eq!(created.recipe_ingredients[0].quantity_type, QuantityType::Pieces);
        assert_eq!(created.recipe_tags.len(), 1);
        assert_eq!(created.recipe_tags[0].tag_type, TagType::Course);

        let sql = write_transaction(&conn.into_transaction_log());
        assert_eq!(sql.last().map(String::as_str), Some("COMMIT"));
        assert!(sql[1].starts_with("INSERT INTO \"recipes\""));
        assert!(sql
            .iter()
            .any(|s| s.starts_with("INSERT INTO \"recipe_ingredients\"")));
        assert!(sql.iter().any(|s| s.starts_with("INSERT INTO \"recipe_tags\"")));
    }

    #[tokio::test]
    async fn test_update_replaces_links_inside_transaction() {
        let author = Uuid::new_v4();
        // ownership lookup outside the transaction
        let db = with_hydration(MockDatabase::new(DatabaseBackend::Postgres), author, "Old")
            .append_query_results([vec![count_row(1)]])
            .append_query_results([vec![count_row(1)]])
            // row to overwrite, then UPDATE ... RETURNING
            .append_query_results([vec![recipe_row(author, "Old")]])
            .append_query_results([vec![recipe_row(author, "New")]])
            .append_exec_results([exec(2), exec(1), exec(1), exec(1)]);
        let conn = with_hydration(db, author, "New").into_connection();

        let recipes = RecipeManager::new(Arc::new(Persistence::new(conn.clone())));
        let updated = recipes.update(author, RECIPE_ID, draft("New")).await.unwrap();

        assert_eq!(updated.name, "New");
        assert_eq!(updated.recipe_ingredients.len(), 1);

        let sql = write_transaction(&conn.into_transaction_log());
        let position = |prefix: &str| sql.iter().position(|s| s.starts_with(prefix));
        let deleted_lines = position("DELETE FROM \"recipe_ingredients\"").unwrap();
        let deleted_tags = position("DELETE FROM \"recipe_tags\"").unwrap();
        let inserted_lines = position("INSERT INTO \"recipe_ingredients\"").unwrap();
        let inserted_tags = position("INSERT INTO \"recipe_tags\"").unwrap();

        assert!(position("UPDATE \"recipes\"").unwrap() < deleted_lines);
        assert!(deleted_lines < inserted_lines);
        assert!(deleted_tags < inserted_tags);
        assert!(deleted_tags < inserted_lines);
        assert_eq!(sql.last().map(String::as_str), Some("COMMIT"));
    }

    #[tokio::test]
    async fn test_failed_write_rolls_back() {
        let author = Uuid::new_v4();
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(1)]])
            .append_query_results([vec![count_row(1)]])
            .append_query_results([vec![author_row(author)]])
            .append_query_results([vec![recipe_row(author, "Banana Bread")]])
            .append_exec_errors([sea_orm::DbErr::Custom("fk violation".to_string())])
            .into_connection();

        let recipes = RecipeManager::new(Arc::new(Persistence::new(conn.clone())));
        let result = recipes.create(author, draft("Banana Bread")).await;

        assert!(result.is_err());
        let sql = write_transaction(&conn.into_transaction_log());
        assert_eq!(sql.last().map(String::as_str), Some("ROLLBACK"));
        assert!(!sql.iter().any(|s| s == "COMMIT"));
    }
}
