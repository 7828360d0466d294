//! Request identity guards.
//!
//! `AuthGuard` resolves the calling user from a bearer token or the session.
//! `ConventionGuard` resolves the convention from the `Convention` header and checks the
//! `Convention-Authorization` secret.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use chrono::Utc;
use constant_time_eq::constant_time_eq;
use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::{
    data::{auth_token::AuthTokenRepository, convention::ConventionRepository, user::UserRepository},
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    model::{
        convention::{Convention, ConventionAccess},
        user::User,
    },
};

pub const CONVENTION_HEADER: &str = "Convention";
pub const CONVENTION_AUTHORIZATION_HEADER: &str = "Convention-Authorization";

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Resolves the calling user, if any.
    ///
    /// An `Authorization: Bearer <token>` header takes precedence over the session. A
    /// bearer token that is unknown or expired resolves to no user.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Authenticated user
    /// - `Ok(None)` - Anonymous request
    /// - `Err(AuthError::UserNotInDatabase)` - Session refers to a deleted user
    pub async fn user(&self, headers: &HeaderMap) -> Result<Option<User>, AppError> {
        let user_repo = UserRepository::new(self.db);

        if let Some(token) = bearer_token(headers) {
            let token_repo = AuthTokenRepository::new(self.db);
            let Some(token) = token_repo.find_valid(token, Utc::now()).await? else {
                return Ok(None);
            };

            return Ok(user_repo.find_by_id(token.user_id).await?);
        }

        let Some(user_id) = AuthSession::new(self.session).get_user_id().await? else {
            return Ok(None);
        };

        match user_repo.find_by_id(user_id).await? {
            Some(user) => Ok(Some(user)),
            None => Err(AuthError::UserNotInDatabase(user_id).into()),
        }
    }

    /// Resolves the calling user, failing for anonymous requests.
    ///
    /// # Returns
    /// - `Ok(User)` - Authenticated user
    /// - `Err(AuthError::UserNotInSession)` - No valid credentials
    pub async fn require(&self, headers: &HeaderMap) -> Result<User, AppError> {
        self.user(headers)
            .await?
            .ok_or_else(|| AuthError::UserNotInSession.into())
    }
}

pub struct ConventionGuard<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ConventionGuard<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Resolves the convention named by the request headers.
    ///
    /// # Returns
    /// - `Ok(ConventionAccess)` - Convention, authorized when the secret header matches
    /// - `Err(AuthError::InvalidConvention)` - Header missing or key unknown
    pub async fn require(&self, headers: &HeaderMap) -> Result<ConventionAccess, AppError> {
        let Some(api_key) = header_str(headers, CONVENTION_HEADER) else {
            return Err(AuthError::InvalidConvention.into());
        };

        let repo = ConventionRepository::new(self.db);
        let Some((convention, secret)) = repo.find_by_api_key(api_key).await? else {
            return Err(AuthError::InvalidConvention.into());
        };

        let authorized = header_str(headers, CONVENTION_AUTHORIZATION_HEADER)
            .map(|provided| constant_time_eq(provided.as_bytes(), secret.as_bytes()))
            .unwrap_or(false);

        Ok(ConventionAccess {
            convention,
            authorized,
        })
    }

    /// Resolves the convention for sales desk operations.
    ///
    /// Staff is the convention itself, authorized with its API secret, or one of its
    /// managers.
    ///
    /// # Returns
    /// - `Ok(ConventionAccess)` - Convention the staff member acts for
    /// - `Err(AuthError::InvalidConvention)` - Header missing or key unknown
    /// - `Err(AuthError::UserNotInSession)` - Not authorized and not logged in
    /// - `Err(AuthError::AccessDenied)` - Logged in user does not manage the convention
    pub async fn require_staff(
        &self,
        headers: &HeaderMap,
        user: Option<&User>,
    ) -> Result<ConventionAccess, AppError> {
        let access = self.require(headers).await?;
        if access.authorized {
            return Ok(access);
        }

        let Some(user) = user else {
            return Err(AuthError::UserNotInSession.into());
        };

        if !self.is_manager(&access.convention, Some(user)).await? {
            return Err(AuthError::AccessDenied(format!(
                "User {} does not manage convention {}",
                user.id, access.convention.id
            ))
            .into());
        }

        Ok(access)
    }

    /// Whether the user may act as a manager of the convention.
    pub async fn is_manager(
        &self,
        convention: &Convention,
        user: Option<&User>,
    ) -> Result<bool, AppError> {
        let Some(user) = user else {
            return Ok(false);
        };

        let repo = ConventionRepository::new(self.db);
        Ok(repo.is_manager(convention.id, user.id).await?)
    }
}

fn header_str<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    header_str(headers, AUTHORIZATION.as_str())?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
