//! Tags label recipes by category and drive search filters.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Tag category. Serialized as its integer discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum TagType {
    Course = 1,
    Cuisine = 2,
    CookingMethod = 3,
    DietaryPreference = 4,
}

impl TagType {
    /// Categories offered as quick filters next to the recipe search
    pub const FILTERABLE: [TagType; 2] = [TagType::Course, TagType::DietaryPreference];
}

impl TryFrom<i32> for TagType {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(TagType::Course),
            2 => Ok(TagType::Cuisine),
            3 => Ok(TagType::CookingMethod),
            4 => Ok(TagType::DietaryPreference),
            other => Err(format!("Invalid tag type: {}", other)),
        }
    }
}

impl From<TagType> for i32 {
    fn from(tag_type: TagType) -> Self {
        tag_type as i32
    }
}

/// Tag entity. Also the response shape for tag endpoints and recipe tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Tag {
    pub id: i64,
    #[schema(example = "Dessert")]
    pub name: String,
    /// 1 = Course, 2 = Cuisine, 3 = CookingMethod, 4 = DietaryPreference
    #[serde(rename = "type")]
    #[schema(value_type = i32, example = 1)]
    pub tag_type: TagType,
}
