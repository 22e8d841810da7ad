//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, comment_handler, file_handler, ingredient_handler, like_handler,
    recipe_handler, tag_handler, user_handler,
};
use crate::domain::{
    CommentResponse, Ingredient, Like, LikesCounter, RecipeIngredientResponse, RecipeResponse,
    RecipeWithInteractions, Tag, UserResponse, UserWithInteractions,
};
use crate::errors::ErrorResponse;
use crate::services::{AuthResponse, UploadedFile};
use crate::types::{CountedRecipes, CountedUsers, PagedComments, PagedRecipes};

/// OpenAPI documentation for the ShareSpoon API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "ShareSpoon API",
        version = "0.1.0",
        description = "Share recipes, like and comment on them, and find new ones"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        auth_handler::register,
        auth_handler::login,
        auth_handler::delete_account,
        user_handler::current_user,
        user_handler::activity,
        user_handler::change_role,
        user_handler::update_profile,
        recipe_handler::create_recipe,
        recipe_handler::list_recipes,
        recipe_handler::get_recipe,
        recipe_handler::list_user_recipes,
        recipe_handler::list_liked_recipes,
        recipe_handler::search_recipes,
        recipe_handler::update_recipe,
        recipe_handler::delete_recipe,
        ingredient_handler::create_ingredient,
        ingredient_handler::list_ingredients,
        ingredient_handler::recipe_ingredients,
        ingredient_handler::search_ingredients,
        ingredient_handler::update_ingredient,
        tag_handler::create_tag,
        tag_handler::list_tags,
        tag_handler::filter_tags,
        tag_handler::search_tags,
        like_handler::like_recipe,
        like_handler::count_likes,
        like_handler::unlike_recipe,
        comment_handler::create_comment,
        comment_handler::list_comments,
        comment_handler::update_comment,
        comment_handler::delete_comment,
        file_handler::upload_file,
        file_handler::delete_file,
    ),
    components(
        schemas(
            ErrorResponse,
            // Domain types
            UserResponse,
            UserWithInteractions,
            RecipeResponse,
            RecipeWithInteractions,
            RecipeIngredientResponse,
            Ingredient,
            Tag,
            Like,
            LikesCounter,
            CommentResponse,
            // Pages
            PagedRecipes,
            PagedComments,
            CountedRecipes,
            CountedUsers,
            // Requests and service responses
            AuthResponse,
            UploadedFile,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            user_handler::ChangeRoleRequest,
            user_handler::UpdateProfileRequest,
            recipe_handler::RecipeRequest,
            recipe_handler::RecipeIngredientRequest,
            recipe_handler::RecipeTagRequest,
            ingredient_handler::IngredientRequest,
            tag_handler::TagRequest,
            like_handler::LikeRequest,
            comment_handler::CreateCommentRequest,
            comment_handler::UpdateCommentRequest,
            file_handler::UploadForm,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and account removal"),
        (name = "Users", description = "Profiles, roles and activity reports"),
        (name = "Recipes", description = "Recipe authoring, feeds and search"),
        (name = "Ingredients", description = "Ingredient catalog"),
        (name = "Tags", description = "Tag catalog"),
        (name = "Likes", description = "Recipe likes"),
        (name = "Comments", description = "Recipe comments"),
        (name = "Files", description = "Image uploads")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_resource() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/auth/register",
            "/api/users/activity",
            "/api/recipes/search",
            "/api/ingredients/{id}",
            "/api/tags/filter",
            "/api/likes/{recipe_id}",
            "/api/comments",
            "/api/files/upload",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
