//! Ingredient entity.

use serde::Serialize;
use utoipa::ToSchema;

/// Ingredient catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Ingredient {
    pub id: i64,
    #[schema(example = "Banana")]
    pub name: String,
}
