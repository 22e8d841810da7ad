//! Recipe aggregate: the recipe row, its ingredient lines and tags.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Ingredient, Tag, User, UserResponse};

/// Serialized as its integer discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum DifficultyLevel {
    Easy = 1,
    Medium = 2,
    Hard = 3,
}

impl TryFrom<i32> for DifficultyLevel {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(DifficultyLevel::Easy),
            2 => Ok(DifficultyLevel::Medium),
            3 => Ok(DifficultyLevel::Hard),
            other => Err(format!("Invalid difficulty level: {}", other)),
        }
    }
}

impl From<DifficultyLevel> for i32 {
    fn from(level: DifficultyLevel) -> Self {
        level as i32
    }
}

/// Unit of an ingredient quantity. Serialized as its integer discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum QuantityType {
    Grams = 1,
    Kilograms = 2,
    Milliliters = 3,
    Liters = 4,
    Pieces = 5,
    Slices = 6,
    Cups = 7,
    Teaspoons = 8,
    Tablespoons = 9,
    NoType = 10,
}

impl TryFrom<i32> for QuantityType {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        use QuantityType::*;
        let unit = match value {
            1 => Grams,
            2 => Kilograms,
            3 => Milliliters,
            4 => Liters,
            5 => Pieces,
            6 => Slices,
            7 => Cups,
            8 => Teaspoons,
            9 => Tablespoons,
            10 => NoType,
            other => return Err(format!("Invalid quantity type: {}", other)),
        };
        Ok(unit)
    }
}

impl From<QuantityType> for i32 {
    fn from(unit: QuantityType) -> Self {
        unit as i32
    }
}

/// Preparation time, exchanged as `"HH:MM:SS"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct EstimatedTime {
    seconds: u32,
}

impl EstimatedTime {
    pub fn from_seconds(seconds: u32) -> Self {
        Self { seconds }
    }

    pub fn from_hms(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self::from_seconds(hours * 3600 + minutes * 60 + seconds)
    }

    pub fn as_seconds(&self) -> u32 {
        self.seconds
    }
}

impl fmt::Display for EstimatedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.seconds / 3600;
        let minutes = (self.seconds % 3600) / 60;
        let seconds = self.seconds % 60;
        write!(f, "{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

impl FromStr for EstimatedTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid estimated time '{}', expected HH:MM:SS", s);

        let parts: Vec<&str> = s.trim().split(':').collect();
        let [hours, minutes, seconds] = parts.as_slice() else {
            return Err(invalid());
        };

        let parse = |part: &str| part.parse::<u32>().map_err(|_| invalid());
        let (hours, minutes, seconds) = (parse(*hours)?, parse(*minutes)?, parse(*seconds)?);
        if minutes >= 60 || seconds >= 60 || hours > 999 {
            return Err(invalid());
        }

        Ok(Self::from_hms(hours, minutes, seconds))
    }
}

impl Serialize for EstimatedTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EstimatedTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Recipe row
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub id: i64,
    /// `None` once the author deleted their account
    pub user_id: Option<Uuid>,
    pub name: String,
    pub description: String,
    pub estimated_time: EstimatedTime,
    pub difficulty: DifficultyLevel,
    pub picture_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Requested quantity of an ingredient in a recipe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IngredientLine {
    pub ingredient_id: i64,
    pub quantity: f64,
    pub quantity_type: QuantityType,
}

/// Everything needed to create or fully replace a recipe
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDraft {
    pub name: String,
    pub description: String,
    pub estimated_time: EstimatedTime,
    pub difficulty: DifficultyLevel,
    pub picture_url: Option<String>,
    pub ingredients: Vec<IngredientLine>,
    pub tag_ids: Vec<i64>,
}

impl RecipeDraft {
    /// Collapse repeated ingredient and tag ids. The last line for a
    /// repeated ingredient wins; order of first appearance is kept.
    pub fn deduplicated(mut self) -> Self {
        let mut lines: Vec<IngredientLine> = Vec::with_capacity(self.ingredients.len());
        for line in self.ingredients {
            match lines.iter_mut().find(|l| l.ingredient_id == line.ingredient_id) {
                Some(existing) => *existing = line,
                None => lines.push(line),
            }
        }
        self.ingredients = lines;

        let mut tag_ids = Vec::with_capacity(self.tag_ids.len());
        for id in self.tag_ids {
            if !tag_ids.contains(&id) {
                tag_ids.push(id);
            }
        }
        self.tag_ids = tag_ids;
        self
    }

    pub fn ingredient_ids(&self) -> Vec<i64> {
        self.ingredients.iter().map(|l| l.ingredient_id).collect()
    }
}

/// Ingredient as used by a recipe
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeIngredient {
    pub ingredient: Ingredient,
    pub quantity: f64,
    pub quantity_type: QuantityType,
}

/// Recipe with its author, ingredients and tags loaded
#[derive(Debug, Clone)]
pub struct RecipeDetails {
    pub recipe: Recipe,
    pub author: Option<User>,
    pub ingredients: Vec<RecipeIngredient>,
    pub tags: Vec<Tag>,
}

/// Recipe details plus interaction counters as seen by one viewer
#[derive(Debug, Clone)]
pub struct RecipeOverview {
    pub details: RecipeDetails,
    pub likes: u64,
    pub comments: u64,
    pub liked_by_viewer: bool,
}

/// Optional filters of the recipe search. Every present filter must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeSearch {
    /// Case-insensitive match on recipe, ingredient or tag names
    pub input: Option<String>,
    /// Only recipes authored by promoted users
    pub promoted_users: bool,
    pub difficulties: Vec<DifficultyLevel>,
    /// Recipes carrying at least one of these tags
    pub tag_ids: Vec<i64>,
}

impl RecipeSearch {
    /// Search text as typed, `None` when blank. Surrounding spaces are
    /// part of the term, so `"pie "` does not match `"Pieces"`.
    pub fn text(&self) -> Option<&str> {
        self.input
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

/// Ingredient line in responses; also served by `GET /api/ingredients/{recipeId}`
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredientResponse {
    pub id: i64,
    #[schema(example = "Banana")]
    pub name: String,
    #[schema(example = 2.0)]
    pub quantity: f64,
    /// 1..=10, see QuantityType
    #[schema(value_type = i32, example = 5)]
    pub quantity_type: QuantityType,
}

impl From<RecipeIngredient> for RecipeIngredientResponse {
    fn from(line: RecipeIngredient) -> Self {
        Self {
            id: line.ingredient.id,
            name: line.ingredient.name,
            quantity: line.quantity,
            quantity_type: line.quantity_type,
        }
    }
}

/// Recipe as returned after create/update
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    pub id: i64,
    pub user_id: Option<Uuid>,
    pub user: Option<UserResponse>,
    #[schema(example = "Banana Bread")]
    pub name: String,
    pub description: String,
    #[schema(value_type = String, example = "01:20:00")]
    pub estimated_time: EstimatedTime,
    /// 1 = Easy, 2 = Medium, 3 = Hard
    #[schema(value_type = i32, example = 2)]
    pub difficulty: DifficultyLevel,
    pub recipe_ingredients: Vec<RecipeIngredientResponse>,
    pub recipe_tags: Vec<Tag>,
    pub created_at: DateTime<Utc>,
    pub picture_url: Option<String>,
}

impl From<RecipeDetails> for RecipeResponse {
    fn from(details: RecipeDetails) -> Self {
        let RecipeDetails {
            recipe,
            author,
            ingredients,
            tags,
        } = details;

        Self {
            id: recipe.id,
            user_id: recipe.user_id,
            user: author.map(UserResponse::from),
            name: recipe.name,
            description: recipe.description,
            estimated_time: recipe.estimated_time,
            difficulty: recipe.difficulty,
            recipe_ingredients: ingredients.into_iter().map(Into::into).collect(),
            recipe_tags: tags,
            created_at: recipe.created_at,
            picture_url: recipe.picture_url,
        }
    }
}

/// Recipe with like/comment counters for feeds and detail pages
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeWithInteractions {
    #[serde(flatten)]
    pub recipe: RecipeResponse,
    pub likes_counter: u64,
    pub current_user_liked: bool,
    pub comments_counter: u64,
}

impl From<RecipeOverview> for RecipeWithInteractions {
    fn from(overview: RecipeOverview) -> Self {
        Self {
            recipe: overview.details.into(),
            likes_counter: overview.likes,
            current_user_liked: overview.liked_by_viewer,
            comments_counter: overview.comments,
        }
    }
}
