//! Tag catalog service.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Tag, TagType};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::utils::normalize_name;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TagService: Send + Sync {
    async fn create(&self, name: String, tag_type: TagType) -> AppResult<Tag>;

    async fn list(&self) -> AppResult<Vec<Tag>>;

    /// Tags offered as quick search filters
    async fn filter(&self) -> AppResult<Vec<Tag>>;

    /// Case-insensitive name search. A blank term lists everything.
    async fn search(&self, term: String) -> AppResult<Vec<Tag>>;
}

pub struct TagManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> TagManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> TagService for TagManager<U> {
    async fn create(&self, name: String, tag_type: TagType) -> AppResult<Tag> {
        let name = normalize_name(&name);
        if name.is_empty() {
            return Err(AppError::validation("Name is required"));
        }
        if self.uow.tags().find_by_name(&name).await?.is_some() {
            return Err(AppError::EntityAlreadyExists("Tag"));
        }

        let tag = self.uow.tags().create(name, tag_type).await?;
        tracing::info!(tag_id = tag.id, "Created new tag");
        Ok(tag)
    }

    async fn list(&self) -> AppResult<Vec<Tag>> {
        self.uow.tags().list().await
    }

    async fn filter(&self) -> AppResult<Vec<Tag>> {
        self.uow
            .tags()
            .list_by_types(TagType::FILTERABLE.to_vec())
            .await
    }

    async fn search(&self, term: String) -> AppResult<Vec<Tag>> {
        if term.trim().is_empty() {
            return self.uow.tags().list().await;
        }
        self.uow.tags().search(&term).await
    }
}
