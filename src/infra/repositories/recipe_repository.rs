//! Recipe repository: reads, search and deletion.
//!
//! Inserts and updates touch three tables and go through
//! [`TxRecipeRepository`](crate::infra::TxRecipeRepository) instead.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr, Query as SeaQuery, SelectStatement};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};
use uuid::Uuid;

use super::entities::{
    comment, ingredient, like, recipe, recipe_ingredient, recipe_tag, tag, user,
};
use super::{ingredient_repository, tag_repository};
use crate::domain::{AppRole, Recipe, RecipeDetails, RecipeOverview, RecipeSearch, Tag, User};
use crate::errors::AppResult;
use crate::types::{Page, PageRequest};
use crate::utils::contains_pattern;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    async fn exists(&self, id: i64) -> AppResult<bool>;

    /// Recipe with author, ingredient lines and tags
    async fn find_by_id(&self, id: i64) -> AppResult<Option<RecipeDetails>>;

    /// Recipe with counters as seen by `viewer`
    async fn find_overview(&self, viewer: Uuid, id: i64) -> AppResult<Option<RecipeOverview>>;

    /// All recipes, newest first
    async fn list(&self, viewer: Uuid, page: PageRequest) -> AppResult<Page<RecipeOverview>>;

    async fn list_by_author(
        &self,
        viewer: Uuid,
        author_id: Uuid,
        page: PageRequest,
    ) -> AppResult<Page<RecipeOverview>>;

    async fn list_liked_by(
        &self,
        viewer: Uuid,
        user_id: Uuid,
        page: PageRequest,
    ) -> AppResult<Page<RecipeOverview>>;

    /// Every present filter must match, newest first
    async fn search(
        &self,
        viewer: Uuid,
        search: RecipeSearch,
        page: PageRequest,
    ) -> AppResult<Page<RecipeOverview>>;

    async fn delete(&self, id: i64) -> AppResult<bool>;
}

#[derive(Debug, FromQueryResult)]
struct RecipeCount {
    recipe_id: i64,
    count: i64,
}

pub struct RecipeStore {
    db: DatabaseConnection,
}

impl RecipeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn fetch_page(
        &self,
        viewer: Uuid,
        select: Select<recipe::Entity>,
        page: PageRequest,
    ) -> AppResult<Page<RecipeOverview>> {
        let paginator = select
            .order_by_desc(recipe::Column::CreatedAt)
            .order_by_desc(recipe::Column::Id)
            .paginate(&self.db, page.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.page_number()).await?;
        let items = overviews(&self.db, viewer, models).await?;

        Ok(Page::new(items, total))
    }
}

/// Recipes using an ingredient whose name contains `term`
fn with_ingredient_named(term: &str) -> SelectStatement {
    SeaQuery::select()
        .column((recipe_ingredient::Entity, recipe_ingredient::Column::RecipeId))
        .from(recipe_ingredient::Entity)
        .inner_join(
            ingredient::Entity,
            Expr::col((ingredient::Entity, ingredient::Column::Id)).equals((
                recipe_ingredient::Entity,
                recipe_ingredient::Column::IngredientId,
            )),
        )
        .and_where(ingredient_repository::name_contains(term))
        .to_owned()
}

/// Recipes carrying a tag whose name contains `term`
fn with_tag_named(term: &str) -> SelectStatement {
    SeaQuery::select()
        .column((recipe_tag::Entity, recipe_tag::Column::RecipeId))
        .from(recipe_tag::Entity)
        .inner_join(
            tag::Entity,
            Expr::col((tag::Entity, tag::Column::Id))
                .equals((recipe_tag::Entity, recipe_tag::Column::TagId)),
        )
        .and_where(tag_repository::name_contains(term))
        .to_owned()
}

/// Build the filter for a recipe search
pub(crate) fn search_condition(search: &RecipeSearch) -> Condition {
    let mut condition = Condition::all();

    if let Some(text) = search.text() {
        let name_matches = Expr::expr(Func::lower(Expr::col((
            recipe::Entity,
            recipe::Column::Name,
        ))))
        .like(LikeExpr::new(contains_pattern(text)).escape('\\'));

        condition = condition.add(
            Condition::any()
                .add(name_matches)
                .add(recipe::Column::Id.in_subquery(with_ingredient_named(text)))
                .add(recipe::Column::Id.in_subquery(with_tag_named(text))),
        );
    }

    if search.promoted_users {
        condition = condition.add(
            recipe::Column::UserId.in_subquery(
                SeaQuery::select()
                    .column(user::Column::Id)
                    .from(user::Entity)
                    .and_where(user::Column::Role.eq(i32::from(AppRole::Chef)))
                    .to_owned(),
            ),
        );
    }

    if !search.difficulties.is_empty() {
        condition = condition.add(
            recipe::Column::Difficulty.is_in(search.difficulties.iter().map(|d| i32::from(*d))),
        );
    }

    if !search.tag_ids.is_empty() {
        condition = condition.add(
            recipe::Column::Id.in_subquery(
                SeaQuery::select()
                    .column(recipe_tag::Column::RecipeId)
                    .from(recipe_tag::Entity)
                    .and_where(recipe_tag::Column::TagId.is_in(search.tag_ids.clone()))
                    .to_owned(),
            ),
        );
    }

    condition
}

/// Load authors, ingredient lines and tags for a batch of recipe rows,
/// preserving the row order.
pub(crate) async fn hydrate<C: ConnectionTrait>(
    db: &C,
    models: Vec<recipe::Model>,
) -> AppResult<Vec<RecipeDetails>> {
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
    let author_ids: HashSet<Uuid> = models.iter().filter_map(|m| m.user_id).collect();

    let mut authors: HashMap<Uuid, User> = HashMap::new();
    if !author_ids.is_empty() {
        for model in user::Entity::find()
            .filter(user::Column::Id.is_in(author_ids))
            .all(db)
            .await?
        {
            let author = User::try_from(model)?;
            authors.insert(author.id, author);
        }
    }

    let mut lines: HashMap<i64, Vec<_>> = HashMap::new();
    for (line, ingredient) in recipe_ingredient::Entity::find()
        .filter(recipe_ingredient::Column::RecipeId.is_in(ids.clone()))
        .find_also_related(ingredient::Entity)
        .order_by_asc(ingredient::Column::Name)
        .all(db)
        .await?
    {
        let Some(ingredient) = ingredient else {
            continue;
        };
        let recipe_id = line.recipe_id;
        lines
            .entry(recipe_id)
            .or_default()
            .push(recipe_ingredient::into_domain(line, ingredient)?);
    }

    let mut tags: HashMap<i64, Vec<Tag>> = HashMap::new();
    for (link, tag) in recipe_tag::Entity::find()
        .filter(recipe_tag::Column::RecipeId.is_in(ids))
        .find_also_related(tag::Entity)
        .order_by_asc(tag::Column::Name)
        .all(db)
        .await?
    {
        if let Some(tag) = tag {
            tags.entry(link.recipe_id)
                .or_default()
                .push(Tag::try_from(tag)?);
        }
    }

    models
        .into_iter()
        .map(|model| {
            let author = model.user_id.and_then(|id| authors.get(&id).cloned());
            let ingredients = lines.remove(&model.id).unwrap_or_default();
            let recipe_tags = tags.remove(&model.id).unwrap_or_default();
            Ok(RecipeDetails {
                recipe: Recipe::try_from(model)?,
                author,
                ingredients,
                tags: recipe_tags,
            })
        })
        .collect()
}

async fn count_by_recipe<E, C>(
    db: &C,
    select: Select<E>,
) -> AppResult<HashMap<i64, u64>>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let rows = select.into_model::<RecipeCount>().all(db).await?;
    Ok(rows
        .into_iter()
        .map(|row| (row.recipe_id, row.count.max(0) as u64))
        .collect())
}

/// Hydrate rows and attach like/comment counters for `viewer`
async fn overviews<C: ConnectionTrait>(
    db: &C,
    viewer: Uuid,
    models: Vec<recipe::Model>,
) -> AppResult<Vec<RecipeOverview>> {
    if models.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<i64> = models.iter().map(|m| m.id).collect();

    let likes = count_by_recipe(
        db,
        like::Entity::find()
            .select_only()
            .column(like::Column::RecipeId)
            .column_as(like::Column::Id.count(), "count")
            .filter(like::Column::RecipeId.is_in(ids.clone()))
            .group_by(like::Column::RecipeId),
    )
    .await?;

    let comments = count_by_recipe(
        db,
        comment::Entity::find()
            .select_only()
            .column(comment::Column::RecipeId)
            .column_as(comment::Column::Id.count(), "count")
            .filter(comment::Column::RecipeId.is_in(ids.clone()))
            .group_by(comment::Column::RecipeId),
    )
    .await?;

    let liked: HashSet<i64> = like::Entity::find()
        .select_only()
        .column(like::Column::RecipeId)
        .filter(like::Column::UserId.eq(viewer))
        .filter(like::Column::RecipeId.is_in(ids))
        .into_tuple::<i64>()
        .all(db)
        .await?
        .into_iter()
        .collect();

    let details = hydrate(db, models).await?;
    Ok(details
        .into_iter()
        .map(|details| {
            let id = details.recipe.id;
            RecipeOverview {
                details,
                likes: likes.get(&id).copied().unwrap_or(0),
                comments: comments.get(&id).copied().unwrap_or(0),
                liked_by_viewer: liked.contains(&id),
            }
        })
        .collect())
}

#[async_trait]
impl RecipeRepository for RecipeStore {
    async fn exists(&self, id: i64) -> AppResult<bool> {
        let count = recipe::Entity::find()
            .filter(recipe::Column::Id.eq(id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<RecipeDetails>> {
        let Some(model) = recipe::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(hydrate(&self.db, vec![model]).await?.into_iter().next())
    }

    async fn find_overview(&self, viewer: Uuid, id: i64) -> AppResult<Option<RecipeOverview>> {
        let Some(model) = recipe::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(overviews(&self.db, viewer, vec![model])
            .await?
            .into_iter()
            .next())
    }

    async fn list(&self, viewer: Uuid, page: PageRequest) -> AppResult<Page<RecipeOverview>> {
        self.fetch_page(viewer, recipe::Entity::find(), page).await
    }

    async fn list_by_author(
        &self,
        viewer: Uuid,
        author_id: Uuid,
        page: PageRequest,
    ) -> AppResult<Page<RecipeOverview>> {
        let select = recipe::Entity::find().filter(recipe::Column::UserId.eq(author_id));
        self.fetch_page(viewer, select, page).await
    }

    async fn list_liked_by(
        &self,
        viewer: Uuid,
        user_id: Uuid,
        page: PageRequest,
    ) -> AppResult<Page<RecipeOverview>> {
        let select = recipe::Entity::find().filter(
            recipe::Column::Id.in_subquery(
                SeaQuery::select()
                    .column(like::Column::RecipeId)
                    .from(like::Entity)
                    .and_where(like::Column::UserId.eq(user_id))
                    .to_owned(),
            ),
        );
        self.fetch_page(viewer, select, page).await
    }

    async fn search(
        &self,
        viewer: Uuid,
        search: RecipeSearch,
        page: PageRequest,
    ) -> AppResult<Page<RecipeOverview>> {
        let select = recipe::Entity::find().filter(search_condition(&search));
        self.fetch_page(viewer, select, page).await
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = recipe::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
