//! Type-safe session management wrappers.
//!
//! Each struct wraps the same underlying `Session` but exposes only the methods relevant
//! to its concern:
//! - `AuthSession` - Authenticated user id
//! - `CsrfSession` - CSRF state of a pending provider login
//! - `ProviderSession` - Last used authentication provider

use tower_sessions::Session;

use crate::server::error::{internal::InternalError, AppError};

// Session key constants
const SESSION_AUTH_USER_ID: &str = "auth:user";
const SESSION_AUTH_CSRF_TOKEN: &str = "auth:csrf_token";
const SESSION_AUTH_PROVIDER: &str = "auth:provider";

/// Authentication session management.
pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores the user's id in the session after a successful login.
    ///
    /// # Returns
    /// - `Ok(())` - User ID successfully stored
    /// - `Err(AppError::SessionErr(_))` - Failed to store in session
    pub async fn set_user_id(&self, user_id: i32) -> Result<(), AppError> {
        self.session
            .insert(SESSION_AUTH_USER_ID, user_id.to_string())
            .await?;
        Ok(())
    }

    /// Retrieves the logged in user's id.
    ///
    /// # Returns
    /// - `Ok(Some(user_id))` - User is logged in
    /// - `Ok(None)` - No user in session
    /// - `Err(AppError)` - Failed to access session or the stored id is corrupt
    pub async fn get_user_id(&self) -> Result<Option<i32>, AppError> {
        let Some(value) = self.session.get::<String>(SESSION_AUTH_USER_ID).await? else {
            return Ok(None);
        };

        let user_id = value
            .trim()
            .parse::<i32>()
            .map_err(|source| InternalError::CorruptSessionValue {
                key: SESSION_AUTH_USER_ID,
                value,
                source,
            })?;

        Ok(Some(user_id))
    }

    /// Clears all data from the session, used during logout.
    pub async fn clear(&self) {
        self.session.clear().await;
    }
}

/// CSRF protection session management.
///
/// The state is stored when a login starts and consumed by the provider callback.
pub struct CsrfSession<'a> {
    session: &'a Session,
}

impl<'a> CsrfSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub async fn set_token(&self, token: String) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_CSRF_TOKEN, token).await?;
        Ok(())
    }

    /// Retrieves and removes the CSRF token; each token can only be used once.
    pub async fn take_token(&self) -> Result<Option<String>, AppError> {
        let token = self.session.remove(SESSION_AUTH_CSRF_TOKEN).await?;
        Ok(token)
    }
}

/// Last used authentication provider.
///
/// Set when a login starts so the callback, which carries no provider name, completes
/// against the same provider.
pub struct ProviderSession<'a> {
    session: &'a Session,
}

impl<'a> ProviderSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub async fn set_provider(&self, name: &str) -> Result<(), AppError> {
        self.session
            .insert(SESSION_AUTH_PROVIDER, name.to_string())
            .await?;
        Ok(())
    }

    pub async fn get_provider(&self) -> Result<Option<String>, AppError> {
        let provider = self.session.get(SESSION_AUTH_PROVIDER).await?;
        Ok(provider)
    }
}
