//! Like and comment service unit tests.

mod common;

use chrono::Utc;
use mockall::predicate::eq;
use uuid::Uuid;

use common::{known_users, missing_users, test_user, TestUnitOfWork};
use sharespoon::domain::{AppRole, Comment, CommentWithAuthor, Like};
use sharespoon::errors::AppError;
use sharespoon::infra::{MockCommentRepository, MockLikeRepository, MockRecipeRepository};
use sharespoon::services::{CommentManager, CommentService, LikeManager, LikeService};
use sharespoon::types::{Page, PageRequest};

fn existing_recipe() -> MockRecipeRepository {
    let mut recipes = MockRecipeRepository::new();
    recipes.expect_exists().returning(|_| Ok(true));
    recipes
}

fn like(user_id: Uuid, recipe_id: i64) -> Like {
    Like {
        id: 1,
        user_id: Some(user_id),
        recipe_id,
        created_at: Utc::now(),
    }
}

fn comment(id: i64, author: Option<Uuid>) -> CommentWithAuthor {
    CommentWithAuthor {
        comment: Comment {
            id,
            user_id: author,
            recipe_id: 3,
            text: "Made this twice already!".to_string(),
            created_at: Utc::now(),
        },
        author: author.map(|id| test_user(id, AppRole::User)),
    }
}

#[tokio::test]
async fn test_like_recipe() {
    let user_id = Uuid::new_v4();

    let mut likes = MockLikeRepository::new();
    likes.expect_find().returning(|_, _| Ok(None));
    likes
        .expect_create()
        .with(eq(user_id), eq(3))
        .returning(|user, recipe| Ok(like(user, recipe)));

    let uow = TestUnitOfWork::new()
        .with_users(known_users())
        .with_recipes(existing_recipe())
        .with_likes(likes)
        .shared();
    let created = LikeManager::new(uow).like(user_id, 3).await.unwrap();

    assert_eq!(created.user_id, Some(user_id));
}

#[tokio::test]
async fn test_like_twice() {
    let user_id = Uuid::new_v4();

    let mut likes = MockLikeRepository::new();
    likes
        .expect_find()
        .returning(|user, recipe| Ok(Some(like(user, recipe))));
    likes.expect_create().never();

    let uow = TestUnitOfWork::new()
        .with_users(known_users())
        .with_recipes(existing_recipe())
        .with_likes(likes)
        .shared();
    let err = LikeManager::new(uow).like(user_id, 3).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        format!("The Like for User id {} on Recipe id 3 already exists.", user_id)
    );
}

#[tokio::test]
async fn test_like_missing_recipe() {
    let mut recipes = MockRecipeRepository::new();
    recipes.expect_exists().returning(|_| Ok(false));

    let result = LikeManager::new(TestUnitOfWork::new().with_recipes(recipes).shared())
        .like(Uuid::new_v4(), 3)
        .await;

    assert!(matches!(result, Err(AppError::EntityNotFound { .. })));
}

#[tokio::test]
async fn test_like_by_deleted_account() {
    let user_id = Uuid::new_v4();
    let mut likes = MockLikeRepository::new();
    likes.expect_find().never();
    likes.expect_create().never();

    let uow = TestUnitOfWork::new()
        .with_users(missing_users())
        .with_recipes(existing_recipe())
        .with_likes(likes)
        .shared();
    let result = LikeManager::new(uow).like(user_id, 3).await;

    assert!(matches!(
        result,
        Err(AppError::EntityNotFound { entity: "User", .. })
    ));
}

#[tokio::test]
async fn test_count_likes() {
    let mut likes = MockLikeRepository::new();
    likes.expect_count_for_recipe().returning(|_| Ok(12));

    let uow = TestUnitOfWork::new()
        .with_recipes(existing_recipe())
        .with_likes(likes)
        .shared();
    let counter = LikeManager::new(uow).count(3).await.unwrap();

    assert_eq!(counter.likes_counter, 12);
}

#[tokio::test]
async fn test_unlike_without_like() {
    let mut likes = MockLikeRepository::new();
    likes.expect_delete().returning(|_, _| Ok(false));

    let result = LikeManager::new(TestUnitOfWork::new().with_likes(likes).shared())
        .unlike(Uuid::new_v4(), 3)
        .await;

    assert!(matches!(result, Err(AppError::LikeNotFound { recipe_id: 3, .. })));
}

#[tokio::test]
async fn test_comment_on_missing_recipe() {
    let mut recipes = MockRecipeRepository::new();
    recipes.expect_exists().returning(|_| Ok(false));
    let mut comments = MockCommentRepository::new();
    comments.expect_create().never();

    let uow = TestUnitOfWork::new()
        .with_recipes(recipes)
        .with_comments(comments)
        .shared();
    let result = CommentManager::new(uow)
        .create(Uuid::new_v4(), 3, "Yum".to_string())
        .await;

    assert!(matches!(result, Err(AppError::EntityNotFound { .. })));
}

#[tokio::test]
async fn test_comment_by_deleted_account() {
    let user_id = Uuid::new_v4();
    let mut comments = MockCommentRepository::new();
    comments.expect_create().never();

    let uow = TestUnitOfWork::new()
        .with_users(missing_users())
        .with_recipes(existing_recipe())
        .with_comments(comments)
        .shared();
    let err = CommentManager::new(uow)
        .create(user_id, 3, "Yum".to_string())
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        format!("The User with id {} was not found.", user_id)
    );
}

#[tokio::test]
async fn test_list_comments_pages() {
    let mut comments = MockCommentRepository::new();
    comments
        .expect_list_for_recipe()
        .with(eq(3), eq(PageRequest::new(1, 2)))
        .returning(|_, _| {
            Ok(Page::new(
                vec![comment(2, Some(Uuid::new_v4())), comment(1, None)],
                3,
            ))
        });

    let uow = TestUnitOfWork::new()
        .with_recipes(existing_recipe())
        .with_comments(comments)
        .shared();
    let page = CommentManager::new(uow)
        .list(3, PageRequest::new(1, 2))
        .await
        .unwrap();

    assert_eq!(page.elements.len(), 2);
    assert_eq!(page.total_pages, 2);
    assert!(page.elements[1].user.is_none());
}

#[tokio::test]
async fn test_only_author_edits_comment() {
    let mut comments = MockCommentRepository::new();
    comments
        .expect_find_by_id()
        .returning(|id| Ok(Some(comment(id, Some(Uuid::new_v4())))));
    comments.expect_update_text().never();

    let result = CommentManager::new(TestUnitOfWork::new().with_comments(comments).shared())
        .update(Uuid::new_v4(), 1, "Edited".to_string())
        .await;

    assert!(matches!(result, Err(AppError::Forbidden)));
}

#[tokio::test]
async fn test_author_edits_comment() {
    let author = Uuid::new_v4();

    let mut comments = MockCommentRepository::new();
    comments
        .expect_find_by_id()
        .returning(move |id| Ok(Some(comment(id, Some(author)))));
    comments
        .expect_update_text()
        .with(eq(1), eq("Edited".to_string()))
        .returning(move |id, text| {
            let mut updated = comment(id, Some(author));
            updated.comment.text = text;
            Ok(updated)
        });

    let updated = CommentManager::new(TestUnitOfWork::new().with_comments(comments).shared())
        .update(author, 1, "Edited".to_string())
        .await
        .unwrap();

    assert_eq!(updated.text, "Edited");
}

#[tokio::test]
async fn test_admin_deletes_any_comment() {
    let mut comments = MockCommentRepository::new();
    comments
        .expect_find_by_id()
        .returning(|id| Ok(Some(comment(id, Some(Uuid::new_v4())))));
    comments
        .expect_delete()
        .with(eq(1))
        .times(1)
        .returning(|_| Ok(true));

    CommentManager::new(TestUnitOfWork::new().with_comments(comments).shared())
        .delete(Uuid::new_v4(), AppRole::Admin, 1)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_missing_comment() {
    let mut comments = MockCommentRepository::new();
    comments.expect_find_by_id().returning(|_| Ok(None));

    let err = CommentManager::new(TestUnitOfWork::new().with_comments(comments).shared())
        .delete(Uuid::new_v4(), AppRole::Admin, 9)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "The Comment with id 9 was not found.");
}
