//! Ingredient and tag service unit tests.

mod common;

use mockall::predicate::eq;

use common::TestUnitOfWork;
use sharespoon::domain::{Ingredient, Tag, TagType};
use sharespoon::errors::AppError;
use sharespoon::infra::{MockIngredientRepository, MockRecipeRepository, MockTagRepository};
use sharespoon::services::{IngredientManager, IngredientService, TagManager, TagService};

fn ingredient(id: i64, name: &str) -> Ingredient {
    Ingredient {
        id,
        name: name.to_string(),
    }
}

#[tokio::test]
async fn test_create_ingredient_normalizes_name() {
    let mut repo = MockIngredientRepository::new();
    repo.expect_find_by_name().returning(|_| Ok(None));
    repo.expect_create()
        .with(eq("Peanut butter".to_string()))
        .returning(|name| Ok(ingredient(10, &name)));

    let service = IngredientManager::new(TestUnitOfWork::new().with_ingredients(repo).shared());
    let created = service.create("  peanut butter ".to_string()).await.unwrap();

    assert_eq!(created.name, "Peanut butter");
}

#[tokio::test]
async fn test_create_ingredient_duplicate() {
    let mut repo = MockIngredientRepository::new();
    repo.expect_find_by_name()
        .returning(|_| Ok(Some(ingredient(1, "Banana"))));
    repo.expect_create().never();

    let err = IngredientManager::new(TestUnitOfWork::new().with_ingredients(repo).shared())
        .create("banana".to_string())
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "One Ingredient with similar name already exists."
    );
}

#[tokio::test]
async fn test_rename_to_own_name_is_allowed() {
    let mut repo = MockIngredientRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(ingredient(id, "banana"))));
    repo.expect_find_by_name()
        .returning(|_| Ok(Some(ingredient(4, "banana"))));
    repo.expect_rename()
        .with(eq(4), eq("Banana".to_string()))
        .returning(|id, name| Ok(ingredient(id, &name)));

    let renamed = IngredientManager::new(TestUnitOfWork::new().with_ingredients(repo).shared())
        .update(4, "banana".to_string())
        .await
        .unwrap();

    assert_eq!(renamed.name, "Banana");
}

#[tokio::test]
async fn test_rename_to_other_ingredients_name() {
    let mut repo = MockIngredientRepository::new();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(ingredient(id, "Bread"))));
    repo.expect_find_by_name()
        .returning(|_| Ok(Some(ingredient(1, "Banana"))));
    repo.expect_rename().never();

    let result = IngredientManager::new(TestUnitOfWork::new().with_ingredients(repo).shared())
        .update(2, "Banana".to_string())
        .await;

    assert!(matches!(result, Err(AppError::EntityAlreadyExists("Ingredient"))));
}

#[tokio::test]
async fn test_rename_missing_ingredient() {
    let mut repo = MockIngredientRepository::new();
    repo.expect_find_by_id().returning(|_| Ok(None));

    let err = IngredientManager::new(TestUnitOfWork::new().with_ingredients(repo).shared())
        .update(42, "Bread".to_string())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "The Ingredient with id 42 was not found.");
}

#[tokio::test]
async fn test_blank_search_lists_everything() {
    let mut repo = MockIngredientRepository::new();
    repo.expect_search().never();
    repo.expect_list()
        .returning(|| Ok(vec![ingredient(1, "Banana"), ingredient(2, "Bread")]));

    let found = IngredientManager::new(TestUnitOfWork::new().with_ingredients(repo).shared())
        .search("   ".to_string())
        .await
        .unwrap();

    assert_eq!(found.len(), 2);
}

#[tokio::test]
async fn test_ingredients_of_missing_recipe() {
    let mut recipes = MockRecipeRepository::new();
    recipes.expect_exists().returning(|_| Ok(false));
    let mut ingredients = MockIngredientRepository::new();
    ingredients.expect_list_for_recipe().never();

    let uow = TestUnitOfWork::new()
        .with_recipes(recipes)
        .with_ingredients(ingredients)
        .shared();
    let result = IngredientManager::new(uow).for_recipe(5).await;

    assert!(matches!(
        result,
        Err(AppError::EntityNotFound { entity: "Recipe", .. })
    ));
}

#[tokio::test]
async fn test_create_tag_duplicate() {
    let mut repo = MockTagRepository::new();
    repo.expect_find_by_name().returning(|_| {
        Ok(Some(Tag {
            id: 1,
            name: "Dessert".to_string(),
            tag_type: TagType::Course,
        }))
    });
    repo.expect_create().never();

    let err = TagManager::new(TestUnitOfWork::new().with_tags(repo).shared())
        .create("dessert".to_string(), TagType::Course)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "One Tag with similar name already exists.");
}

#[tokio::test]
async fn test_filter_tags_asks_for_courses_and_diets() {
    let mut repo = MockTagRepository::new();
    repo.expect_list_by_types()
        .with(eq(vec![TagType::Course, TagType::DietaryPreference]))
        .returning(|_| Ok(vec![]));

    let tags = TagManager::new(TestUnitOfWork::new().with_tags(repo).shared())
        .filter()
        .await
        .unwrap();

    assert!(tags.is_empty());
}
