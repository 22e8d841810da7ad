//! User service - Profile, role management and activity reports.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{AppRole, ProfileUpdate, UserResponse, UserWithInteractions};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{CountedPagedResponse, PageRequest};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Profile of the caller with all-time counters
    async fn current(&self, user_id: Uuid) -> AppResult<UserWithInteractions>;

    /// Non-admin users ranked by likes received in the last `days` days
    async fn activity(
        &self,
        days: u32,
        page: PageRequest,
    ) -> AppResult<CountedPagedResponse<UserWithInteractions>>;

    async fn change_role(&self, user_id: Uuid, role: AppRole) -> AppResult<UserResponse>;

    async fn update_profile(&self, user_id: Uuid, profile: ProfileUpdate)
        -> AppResult<UserResponse>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn current(&self, user_id: Uuid) -> AppResult<UserWithInteractions> {
        let activity = self
            .uow
            .users()
            .find_with_interactions(user_id)
            .await?
            .ok_or_not_found("User", user_id)?;

        Ok(UserWithInteractions::from_activity(
            activity,
            Utc::now().date_naive(),
        ))
    }

    async fn activity(
        &self,
        days: u32,
        page: PageRequest,
    ) -> AppResult<CountedPagedResponse<UserWithInteractions>> {
        let since = Utc::now() - Duration::days(i64::from(days));
        let today = Utc::now().date_naive();

        let mut users: Vec<UserWithInteractions> = self
            .uow
            .users()
            .list_activity(since)
            .await?
            .into_iter()
            .map(|activity| UserWithInteractions::from_activity(activity, today))
            .collect();
        users.sort_by(|a, b| b.received_likes_counter.cmp(&a.received_likes_counter));

        let total = users.len() as u64;
        tracing::info!(days, total, "Computed user activity");
        Ok(CountedPagedResponse::new(page.slice(users), &page, total))
    }

    async fn change_role(&self, user_id: Uuid, role: AppRole) -> AppResult<UserResponse> {
        let user = self.uow.users().update_role(user_id, role).await?;
        tracing::info!(%user_id, %role, "Changed user role");
        Ok(UserResponse::from(user))
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        profile: ProfileUpdate,
    ) -> AppResult<UserResponse> {
        if profile.birthday > Utc::now().date_naive() {
            return Err(AppError::validation("Birthday cannot be in the future"));
        }

        let user = self.uow.users().update_profile(user_id, profile).await?;
        tracing::info!(%user_id, "Updated user profile");
        Ok(UserResponse::from(user))
    }
}
