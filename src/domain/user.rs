//! User domain entity and related types.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Account roles. Serialized as their integer discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum AppRole {
    Admin = 0,
    User = 1,
    /// Promoted user, surfaced with a badge and filterable in search
    Chef = 2,
}

impl AppRole {
    pub fn is_admin(&self) -> bool {
        matches!(self, AppRole::Admin)
    }

    pub fn is_promoted(&self) -> bool {
        matches!(self, AppRole::Chef)
    }
}

impl TryFrom<i32> for AppRole {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AppRole::Admin),
            1 => Ok(AppRole::User),
            2 => Ok(AppRole::Chef),
            other => Err(format!("Invalid role: {}", other)),
        }
    }
}

impl From<AppRole> for i32 {
    fn from(role: AppRole) -> Self {
        role as i32
    }
}

impl std::fmt::Display for AppRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppRole::Admin => write!(f, "Admin"),
            AppRole::User => write!(f, "User"),
            AppRole::Chef => write!(f, "Chef"),
        }
    }
}

/// User domain entity
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub birthday: NaiveDate,
    pub picture_url: Option<String>,
    pub role: AppRole,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Age in completed years on `today`.
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        let mut age = today.year() - self.birthday.year();
        if (today.month(), today.day()) < (self.birthday.month(), self.birthday.day()) {
            age -= 1;
        }
        age
    }
}

/// Data needed to insert a new account
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub birthday: NaiveDate,
    pub picture_url: Option<String>,
    pub role: AppRole,
    pub password_hash: String,
}

/// Editable profile fields
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub birthday: NaiveDate,
    pub picture_url: Option<String>,
}

/// A user together with their recipe and like counters
#[derive(Debug, Clone)]
pub struct UserActivity {
    pub user: User,
    pub posted_recipes: u64,
    pub received_likes: u64,
}

/// Public user profile (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    #[schema(example = "Becca")]
    pub first_name: String,
    #[schema(example = "Richards")]
    pub last_name: String,
    #[schema(example = "richards_becca@example.com")]
    pub email: String,
    pub birthday: NaiveDate,
    pub picture_url: Option<String>,
    /// 0 = Admin, 1 = User, 2 = Chef
    #[schema(value_type = i32, example = 2)]
    pub role: AppRole,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            birthday: user.birthday,
            picture_url: user.picture_url,
            role: user.role,
        }
    }
}

/// Profile with age and interaction counters
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserWithInteractions {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub birthday: NaiveDate,
    #[schema(example = 27)]
    pub age: i32,
    pub picture_url: Option<String>,
    #[schema(value_type = i32, example = 1)]
    pub role: AppRole,
    pub posted_recipes_counter: u64,
    pub received_likes_counter: u64,
}

impl UserWithInteractions {
    pub fn from_activity(activity: UserActivity, today: NaiveDate) -> Self {
        let age = activity.user.age_on(today);
        let user = activity.user;
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            birthday: user.birthday,
            age,
            picture_url: user.picture_url,
            role: user.role,
            posted_recipes_counter: activity.posted_recipes,
            received_likes_counter: activity.received_likes,
        }
    }
}
