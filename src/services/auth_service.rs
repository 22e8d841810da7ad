//! Authentication service - Registration, login and token verification.
//!
//! Password hashing lives in the domain `Password` value object.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::Config;
use crate::domain::{AppRole, NewUser, Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Argon2 hash verified against when the email is unknown, so a miss
/// costs as much as a wrong password.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$HuEueodtMTHrYtkmD08c1PNaHxUDQupPMS7YnvT4Jqs";

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Email of the account
    pub sub: String,
    pub jti: Uuid,
    pub email: String,
    /// User id
    pub uid: Uuid,
    pub role: AppRole,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

/// Returned after register and login
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    /// 0 = Admin, 1 = User, 2 = Chef
    #[schema(value_type = i32, example = 1)]
    pub role: AppRole,
}

/// New account data
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub birthday: NaiveDate,
    pub picture_url: Option<String>,
    /// Defaults to `User`; `Admin` is rejected
    pub role: Option<AppRole>,
}

/// Authentication service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account and sign the caller in
    async fn register(&self, registration: Registration) -> AppResult<AuthResponse>;

    async fn login(&self, email: String, password: String) -> AppResult<AuthResponse>;

    /// Verify signature, expiry, issuer and audience
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Delete the account. Authored content stays with no author.
    async fn delete_account(&self, user_id: Uuid) -> AppResult<()>;
}

/// Sign a token for `user`
fn generate_token(user: &User, config: &Config) -> AppResult<AuthResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.email.clone(),
        jti: Uuid::new_v4(),
        email: user.email.clone(),
        uid: user.id,
        role: user.role,
        iss: config.jwt_issuer.clone(),
        aud: config.jwt_audience.clone(),
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )
    .map_err(|e| AppError::internal(format!("Failed to sign token: {}", e)))?;

    Ok(AuthResponse {
        token,
        role: user.role,
    })
}

fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[config.jwt_issuer.as_str()]);
    validation.set_audience(&[config.jwt_audience.as_str()]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, registration: Registration) -> AppResult<AuthResponse> {
        let role = registration.role.unwrap_or(AppRole::User);
        if role.is_admin() {
            return Err(AppError::validation("Invalid role"));
        }
        if registration.birthday > Utc::now().date_naive() {
            return Err(AppError::validation("Birthday cannot be in the future"));
        }

        let email = normalize_email(&registration.email);
        if self.uow.users().find_by_email(&email).await?.is_some() {
            return Err(AppError::UserAlreadyExists(email));
        }

        let password_hash = Password::new(&registration.password)?.into_string();
        let user = self
            .uow
            .users()
            .create(NewUser {
                first_name: registration.first_name.trim().to_string(),
                last_name: registration.last_name.trim().to_string(),
                email,
                birthday: registration.birthday,
                picture_url: registration.picture_url,
                role,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, "Registered new user");
        generate_token(&user, &self.config)
    }

    async fn login(&self, email: String, password: String) -> AppResult<AuthResponse> {
        let user = self.uow.users().find_by_email(&normalize_email(&email)).await?;

        let stored_hash = user
            .as_ref()
            .map(|u| u.password_hash.clone())
            .unwrap_or_else(|| DUMMY_HASH.to_string());
        let password_valid = Password::from_hash(stored_hash).verify(&password);

        match user {
            Some(user) if password_valid => {
                tracing::info!(user_id = %user.id, "User logged in");
                generate_token(&user, &self.config)
            }
            _ => Err(AppError::InvalidCredentials),
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }

    async fn delete_account(&self, user_id: Uuid) -> AppResult<()> {
        if !self.uow.users().delete(user_id).await? {
            return Err(AppError::not_found("User", user_id));
        }
        tracing::info!(%user_id, "Deleted user account");
        Ok(())
    }
}
