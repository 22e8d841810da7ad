//! Seed command - Inserts the demo catalog.
//!
//! Rows that already exist (by case-insensitive name) are left alone, so
//! the command can be run repeatedly.

use crate::config::Config;
use crate::domain::TagType;
use crate::errors::AppResult;
use crate::infra::{Database, Persistence, UnitOfWork};

const DEMO_TAGS: &[(&str, TagType)] = &[
    ("American", TagType::Cuisine),
    ("Dessert", TagType::Course),
    ("Italian", TagType::Cuisine),
];

const DEMO_INGREDIENTS: &[&str] = &["Banana", "Bread", "Nutella Chocolate Cream"];

/// Execute the seed command
pub async fn execute(config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    let uow = Persistence::new(db.get_connection());

    let inserted = seed(&uow).await?;
    tracing::info!(inserted, "Seeding completed");
    Ok(())
}

/// Insert missing demo rows and return how many were added
pub async fn seed<U: UnitOfWork>(uow: &U) -> AppResult<usize> {
    let mut inserted = 0;

    for (name, tag_type) in DEMO_TAGS {
        if uow.tags().find_by_name(name).await?.is_none() {
            uow.tags().create(name.to_string(), *tag_type).await?;
            inserted += 1;
        }
    }

    for name in DEMO_INGREDIENTS {
        if uow.ingredients().find_by_name(name).await?.is_none() {
            uow.ingredients().create(name.to_string()).await?;
            inserted += 1;
        }
    }

    Ok(inserted)
}
