//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.
//! Enum columns are plain integers and are decoded when converting.

pub mod comment;
pub mod ingredient;
pub mod like;
pub mod recipe;
pub mod recipe_ingredient;
pub mod recipe_tag;
pub mod tag;
pub mod user;

use crate::errors::{AppError, AppResult};

/// Decode an integer enum column into its domain enum
pub(crate) fn decode<T>(column: &'static str, value: i32) -> AppResult<T>
where
    T: TryFrom<i32, Error = String>,
{
    T::try_from(value).map_err(|e| AppError::internal(format!("Corrupt {} column: {}", column, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TagType;

    #[test]
    fn test_decode_known_and_unknown_values() {
        assert_eq!(decode::<TagType>("tags.type", 2).unwrap(), TagType::Cuisine);
        assert!(matches!(
            decode::<TagType>("tags.type", 9),
            Err(AppError::Internal(_))
        ));
    }
}
