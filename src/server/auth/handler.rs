//! Type-specific provider handlers.
//!
//! Both handler kinds run the authorization code flow with the `oauth2` crate. They differ
//! in where their endpoints come from and in the shape of the user info document.

use oauth2::{
    basic::BasicClient, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken,
    RedirectUrl, Scope, TokenResponse, TokenUrl,
};
use serde_json::Value;
use url::Url;

use crate::server::{
    config::ProviderConfig,
    error::{auth::AuthError, AppError},
    model::auth::ProviderIdentity,
    state::OAuth2Client,
};

/// Handler for an OpenID Connect provider. Endpoints derive from the issuer URL and the
/// identity is keyed by the `sub` claim.
#[derive(Debug, Clone)]
pub struct OpenIdConnectHandler<'a> {
    config: &'a ProviderConfig,
}

/// Handler for a plain OAuth2 provider with explicit endpoints. The identity is keyed by
/// the `id` field.
#[derive(Debug, Clone)]
pub struct OAuth2Handler<'a> {
    config: &'a ProviderConfig,
}

#[derive(Debug, Clone)]
pub enum AuthHandler<'a> {
    OpenIdConnect(OpenIdConnectHandler<'a>),
    OAuth2(OAuth2Handler<'a>),
}

impl<'a> AuthHandler<'a> {
    pub fn open_id_connect(config: &'a ProviderConfig) -> Self {
        Self::OpenIdConnect(OpenIdConnectHandler { config })
    }

    pub fn oauth2(config: &'a ProviderConfig) -> Self {
        Self::OAuth2(OAuth2Handler { config })
    }

    fn config(&self) -> &'a ProviderConfig {
        match self {
            Self::OpenIdConnect(h) => h.config,
            Self::OAuth2(h) => h.config,
        }
    }

    pub fn name(&self) -> &'a str {
        &self.config().name
    }

    /// Builds the provider's authorization URL.
    ///
    /// # Arguments
    /// - `redirect_url` - Callback URL registered with the provider
    ///
    /// # Returns
    /// - `Ok((Url, CsrfToken))` - URL to send the user to and the state to keep in session
    /// - `Err(AuthError::InvalidUrl)` - A configured URL failed to parse
    pub fn authorize_url(&self, redirect_url: &str) -> Result<(Url, CsrfToken), AuthError> {
        let client = self.client(redirect_url)?;
        let scopes = self.config().scopes.iter().cloned().map(Scope::new);

        Ok(client
            .authorize_url(CsrfToken::new_random)
            .add_scopes(scopes)
            .url())
    }

    /// Exchanges an authorization code and fetches the user's identity.
    pub async fn complete(
        &self,
        http_client: &reqwest::Client,
        redirect_url: &str,
        code: String,
    ) -> Result<ProviderIdentity, AppError> {
        let client = self.client(redirect_url)?;

        let token = client
            .exchange_code(AuthorizationCode::new(code))
            .request_async(http_client)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        let user_info = http_client
            .get(&self.config().userinfo_url)
            .bearer_auth(token.access_token().secret())
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        Ok(self.identity(&user_info)?)
    }

    /// Extracts the identity from a user info document.
    pub fn identity(&self, user_info: &Value) -> Result<ProviderIdentity, AuthError> {
        let subject_key = match self {
            Self::OpenIdConnect(_) => "sub",
            Self::OAuth2(_) => "id",
        };

        let email = string_field(user_info, "email").ok_or(AuthError::MissingEmail)?;
        let subject = string_field(user_info, subject_key).unwrap_or_else(|| email.clone());
        let name = string_field(user_info, "name").unwrap_or_else(|| email.clone());

        Ok(ProviderIdentity {
            subject,
            email,
            name,
        })
    }

    fn client(&self, redirect_url: &str) -> Result<OAuth2Client, AuthError> {
        let config = self.config();

        Ok(BasicClient::new(ClientId::new(config.client_id.clone()))
            .set_client_secret(ClientSecret::new(config.client_secret.clone()))
            .set_auth_uri(AuthUrl::new(config.auth_url.clone())?)
            .set_token_uri(TokenUrl::new(config.token_url.clone())?)
            .set_redirect_uri(RedirectUrl::new(redirect_url.to_string())?))
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
