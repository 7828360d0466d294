//! Login through configured authentication providers.

use chrono::{Duration, Utc};
use rand::Rng;
use sea_orm::DatabaseConnection;

use crate::server::{
    auth::AuthProviderRegistry,
    data::{auth_token::AuthTokenRepository, user::UserRepository},
    error::{auth::AuthError, AppError},
    middleware::session::{AuthSession, CsrfSession, ProviderSession},
    model::{auth::AuthToken, user::UpsertUserParams, user::User},
};

/// Path of the provider callback, relative to the application URL.
pub const CALLBACK_PATH: &str = "/api/auth/callback";

const TOKEN_LENGTH: usize = 48;
const TOKEN_LIFETIME_DAYS: i64 = 30;

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    http_client: &'a reqwest::Client,
    providers: &'a AuthProviderRegistry,
    redirect_url: String,
}

impl<'a> AuthService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        http_client: &'a reqwest::Client,
        providers: &'a AuthProviderRegistry,
        app_url: &str,
    ) -> Self {
        Self {
            db,
            http_client,
            providers,
            redirect_url: format!("{}{}", app_url, CALLBACK_PATH),
        }
    }

    /// Begins a login with the named provider.
    ///
    /// Binds the provider to the session and keeps the CSRF state there for the callback.
    ///
    /// # Returns
    /// - `Ok(String)` - Provider URL to send the user to
    /// - `Err(AuthError::UnknownProvider)` - Provider is not configured
    pub async fn start(
        &self,
        provider_session: &ProviderSession<'_>,
        csrf_session: &CsrfSession<'_>,
        provider: &str,
    ) -> Result<String, AppError> {
        let handler = self.providers.select(provider_session, provider).await?;
        let (url, csrf) = handler.authorize_url(&self.redirect_url)?;

        csrf_session.set_token(csrf.secret().clone()).await?;

        tracing::debug!("Starting login with {}", handler.name());

        Ok(url.to_string())
    }

    /// Completes a login: validates the state, exchanges the code, stores the user and
    /// issues an auth token.
    ///
    /// # Returns
    /// - `Ok((User, AuthToken))` - Logged in user and their new token
    /// - `Err(AuthError::CsrfValidationFailed)` - State missing or different from the stored one
    /// - `Err(AuthError::NoProviderInSession)` - No login was started in this session
    pub async fn callback(
        &self,
        provider_session: &ProviderSession<'_>,
        csrf_session: &CsrfSession<'_>,
        auth_session: &AuthSession<'_>,
        code: String,
        state: String,
    ) -> Result<(User, AuthToken), AppError> {
        let expected = csrf_session.take_token().await?;
        if expected.as_deref() != Some(state.as_str()) {
            return Err(AuthError::CsrfValidationFailed.into());
        }

        let handler = self.providers.current(provider_session).await?;
        let identity = handler
            .complete(self.http_client, &self.redirect_url, code)
            .await?;

        let user = UserRepository::new(self.db)
            .upsert(UpsertUserParams {
                email: identity.email,
                name: identity.name,
            })
            .await?;

        auth_session.set_user_id(user.id).await?;
        let token = self.issue_token(user.id).await?;

        tracing::info!("User {} logged in with {}", user.id, handler.name());

        Ok((user, token))
    }

    /// Creates a new bearer token for the user.
    pub async fn issue_token(&self, user_id: i32) -> Result<AuthToken, AppError> {
        let token = generate_token();
        let expires_at = Utc::now() + Duration::days(TOKEN_LIFETIME_DAYS);

        Ok(AuthTokenRepository::new(self.db)
            .create(token, user_id, expires_at)
            .await?)
    }

    /// Whether the token exists and has not expired.
    pub async fn verify(&self, token: &str) -> Result<bool, AppError> {
        let token = AuthTokenRepository::new(self.db)
            .find_valid(token, Utc::now())
            .await?;

        Ok(token.is_some())
    }

    /// Logs the session's user out, revoking their tokens.
    pub async fn logout(&self, auth_session: &AuthSession<'_>) -> Result<(), AppError> {
        if let Some(user_id) = auth_session.get_user_id().await? {
            AuthTokenRepository::new(self.db)
                .delete_for_user(user_id)
                .await?;
        }

        auth_session.clear().await;

        Ok(())
    }
}

/// Random alphanumeric token of `TOKEN_LENGTH` characters.
fn generate_token() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                             abcdefghijklmnopqrstuvwxyz\
                             0123456789";

    let mut rng = rand::rng();

    (0..TOKEN_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
