//! Authentication provider registry.
//!
//! Providers come from configuration. Selecting one builds a type-specific
//! [`AuthHandler`] and records the provider name in the session, so the callback that
//! arrives later completes against the same provider.

pub mod handler;

#[cfg(test)]
mod test;

use crate::{
    model::auth::AuthProviderDto,
    server::{
        config::{ProviderConfig, ProviderKind},
        error::{auth::AuthError, AppError},
        middleware::session::ProviderSession,
    },
};

pub use handler::AuthHandler;

/// Provider used when a login request does not name one.
pub const DEFAULT_PROVIDER: &str = "google";

#[derive(Debug, Clone, Default)]
pub struct AuthProviderRegistry {
    providers: Vec<ProviderConfig>,
}

impl AuthProviderRegistry {
    pub fn new(providers: Vec<ProviderConfig>) -> Self {
        Self { providers }
    }

    /// Lists configured providers in configuration order.
    pub fn list(&self) -> Vec<AuthProviderDto> {
        self.providers
            .iter()
            .map(|p| AuthProviderDto {
                name: p.name.clone(),
                display_name: p.display_name.clone(),
                button: p.button.clone(),
                kind: p.kind.to_string(),
            })
            .collect()
    }

    /// Instantiates the handler for a provider without touching the session.
    ///
    /// # Returns
    /// - `Ok(AuthHandler)` - Handler matching the provider's type
    /// - `Err(AuthError::UnknownProvider)` - No provider with this name is configured
    pub fn handler(&self, name: &str) -> Result<AuthHandler<'_>, AuthError> {
        let config = self
            .providers
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| AuthError::UnknownProvider(name.to_string()))?;

        Ok(match config.kind {
            ProviderKind::OpenIdConnect => AuthHandler::open_id_connect(config),
            ProviderKind::OAuth2 => AuthHandler::oauth2(config),
        })
    }

    /// Selects a provider and binds it to the session as the last used provider.
    pub async fn select(
        &self,
        session: &ProviderSession<'_>,
        name: &str,
    ) -> Result<AuthHandler<'_>, AppError> {
        let handler = self.handler(name)?;
        session.set_provider(handler.name()).await?;

        Ok(handler)
    }

    /// Returns the handler of the provider bound to the session.
    ///
    /// # Returns
    /// - `Ok(AuthHandler)` - Handler of the last used provider
    /// - `Err(AuthError::NoProviderInSession)` - Nothing bound to the session
    /// - `Err(AuthError::UnknownProvider)` - The bound provider is no longer configured
    pub async fn current(&self, session: &ProviderSession<'_>) -> Result<AuthHandler<'_>, AppError> {
        let Some(name) = session.get_provider().await? else {
            return Err(AuthError::NoProviderInSession.into());
        };

        Ok(self.handler(&name)?)
    }
}
