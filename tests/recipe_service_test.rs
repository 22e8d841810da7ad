//! Recipe service unit tests.

mod common;

use mockall::predicate::eq;
use uuid::Uuid;

use common::{known_users, missing_users, test_details, test_draft, test_overview, TestUnitOfWork};
use sharespoon::domain::{AppRole, DifficultyLevel, RecipeSearch};
use sharespoon::errors::AppError;
use sharespoon::infra::{MockIngredientRepository, MockRecipeRepository, MockTagRepository};
use sharespoon::services::{RecipeManager, RecipeService};
use sharespoon::types::{Page, PageRequest};

fn catalog(ingredients: u64, tags: u64) -> (MockIngredientRepository, MockTagRepository) {
    let mut ingredient_repo = MockIngredientRepository::new();
    ingredient_repo
        .expect_count_existing()
        .returning(move |_| Ok(ingredients));
    let mut tag_repo = MockTagRepository::new();
    tag_repo.expect_count_existing().returning(move |_| Ok(tags));
    (ingredient_repo, tag_repo)
}

#[tokio::test]
async fn test_create_without_ingredients() {
    let service = RecipeManager::new(TestUnitOfWork::new().shared());

    let err = service
        .create(Uuid::new_v4(), test_draft(&[], &[1]))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::EmptyIngredientsList));
    assert_eq!(
        err.to_string(),
        "No valid ingredients provided. A recipe must include at least one valid ingredient."
    );
}

#[tokio::test]
async fn test_create_with_unknown_ingredient() {
    let (ingredients, tags) = catalog(1, 1);
    let uow = TestUnitOfWork::new()
        .with_ingredients(ingredients)
        .with_tags(tags)
        .shared();

    let result = RecipeManager::new(uow)
        .create(Uuid::new_v4(), test_draft(&[1, 99], &[1]))
        .await;

    assert!(matches!(result, Err(AppError::EmptyIngredientsList)));
}

#[tokio::test]
async fn test_create_without_tags() {
    let (ingredients, tags) = catalog(1, 0);
    let uow = TestUnitOfWork::new()
        .with_ingredients(ingredients)
        .with_tags(tags)
        .shared();

    let result = RecipeManager::new(uow)
        .create(Uuid::new_v4(), test_draft(&[1], &[]))
        .await;

    assert!(matches!(result, Err(AppError::EmptyTagsList)));
}

#[tokio::test]
async fn test_create_counts_deduplicated_ids() {
    let mut ingredients = MockIngredientRepository::new();
    ingredients
        .expect_count_existing()
        .with(eq(vec![1_i64, 2]))
        .returning(|_| Ok(2));
    let mut tags = MockTagRepository::new();
    tags.expect_count_existing()
        .with(eq(vec![5_i64]))
        .returning(|_| Ok(1));
    let uow = TestUnitOfWork::new()
        .with_users(known_users())
        .with_ingredients(ingredients)
        .with_tags(tags)
        .shared();

    // Validation passes; the write itself needs a real transaction
    let result = RecipeManager::new(uow)
        .create(Uuid::new_v4(), test_draft(&[1, 2, 1], &[5, 5]))
        .await;

    assert!(matches!(result, Err(AppError::Internal(_))));
}

#[tokio::test]
async fn test_create_by_deleted_account() {
    let author = Uuid::new_v4();
    let (ingredients, tags) = catalog(1, 1);
    let uow = TestUnitOfWork::new()
        .with_users(missing_users())
        .with_ingredients(ingredients)
        .with_tags(tags)
        .shared();

    let err = RecipeManager::new(uow)
        .create(author, test_draft(&[1], &[1]))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        format!("The User with id {} was not found.", author)
    );
}

#[tokio::test]
async fn test_get_missing_recipe() {
    let mut recipes = MockRecipeRepository::new();
    recipes.expect_find_overview().returning(|_, _| Ok(None));

    let err = RecipeManager::new(TestUnitOfWork::new().with_recipes(recipes).shared())
        .get(Uuid::new_v4(), 7)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "The Recipe with id 7 was not found.");
}

#[tokio::test]
async fn test_get_reports_viewer_like() {
    let viewer = Uuid::new_v4();

    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_find_overview()
        .with(eq(viewer), eq(3))
        .returning(|_, id| {
            let mut overview = test_overview(id, None, 4);
            overview.liked_by_viewer = true;
            Ok(Some(overview))
        });

    let recipe = RecipeManager::new(TestUnitOfWork::new().with_recipes(recipes).shared())
        .get(viewer, 3)
        .await
        .unwrap();

    assert_eq!(recipe.likes_counter, 4);
    assert!(recipe.current_user_liked);
    assert!(recipe.recipe.user.is_none());
}

#[tokio::test]
async fn test_list_pages_overviews() {
    let mut recipes = MockRecipeRepository::new();
    recipes.expect_list().returning(|_, _| {
        Ok(Page::new(
            vec![test_overview(2, None, 0), test_overview(1, None, 1)],
            12,
        ))
    });

    let page = RecipeManager::new(TestUnitOfWork::new().with_recipes(recipes).shared())
        .list(Uuid::new_v4(), PageRequest::new(2, 2))
        .await
        .unwrap();

    assert_eq!(page.elements.len(), 2);
    assert_eq!(page.total_pages, 6);
    assert!(page.has_previous_page);
    assert!(page.has_next_page);
}

#[tokio::test]
async fn test_search_passes_filters_and_counts() {
    let search = RecipeSearch {
        input: Some("ban".to_string()),
        promoted_users: true,
        difficulties: vec![DifficultyLevel::Easy, DifficultyLevel::Hard],
        tag_ids: vec![2],
    };

    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_search()
        .withf(|_, search, page| {
            search.promoted_users && search.difficulties.len() == 2 && page.page_index == 1
        })
        .returning(|_, _, _| Ok(Page::new(vec![test_overview(1, None, 0)], 1)));

    let result = RecipeManager::new(TestUnitOfWork::new().with_recipes(recipes).shared())
        .search(Uuid::new_v4(), search, PageRequest::default())
        .await
        .unwrap();

    assert_eq!(result.results_count, 1);
    assert_eq!(result.total_pages, 1);
}

#[tokio::test]
async fn test_update_by_other_user_is_forbidden() {
    let author = Uuid::new_v4();

    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_details(id, Some(author)))));

    let result = RecipeManager::new(TestUnitOfWork::new().with_recipes(recipes).shared())
        .update(Uuid::new_v4(), 1, test_draft(&[1], &[1]))
        .await;

    assert!(matches!(result, Err(AppError::Forbidden)));
}

#[tokio::test]
async fn test_update_missing_recipe() {
    let mut recipes = MockRecipeRepository::new();
    recipes.expect_find_by_id().returning(|_| Ok(None));

    let result = RecipeManager::new(TestUnitOfWork::new().with_recipes(recipes).shared())
        .update(Uuid::new_v4(), 1, test_draft(&[1], &[1]))
        .await;

    assert!(matches!(result, Err(AppError::EntityNotFound { .. })));
}

#[tokio::test]
async fn test_admin_may_delete_any_recipe() {
    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_details(id, Some(Uuid::new_v4())))));
    recipes
        .expect_delete()
        .with(eq(8))
        .times(1)
        .returning(|_| Ok(true));

    RecipeManager::new(TestUnitOfWork::new().with_recipes(recipes).shared())
        .delete(Uuid::new_v4(), AppRole::Admin, 8)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_chef_may_not_delete_others_recipe() {
    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_details(id, Some(Uuid::new_v4())))));
    recipes.expect_delete().never();

    let result = RecipeManager::new(TestUnitOfWork::new().with_recipes(recipes).shared())
        .delete(Uuid::new_v4(), AppRole::Chef, 8)
        .await;

    assert!(matches!(result, Err(AppError::Forbidden)));
}

#[tokio::test]
async fn test_orphaned_recipe_only_deletable_by_admin() {
    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_details(id, None))));
    recipes.expect_delete().never();

    let result = RecipeManager::new(TestUnitOfWork::new().with_recipes(recipes).shared())
        .delete(Uuid::new_v4(), AppRole::User, 8)
        .await;

    assert!(matches!(result, Err(AppError::Forbidden)));
}
