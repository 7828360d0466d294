//! Application state shared across all request handlers.
//!
//! The state is built once during startup and cloned into every handler through Axum's
//! state extraction. All fields are cheap to clone: the database handle is a pool, the
//! reqwest client and the `Arc`s are reference counted.

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::server::{auth::AuthProviderRegistry, payment::PaymentProcessor};

/// OAuth2 client with authorization and token endpoints set, as built per provider.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

#[derive(Clone)]
pub struct AppState {
    /// Connection pool of the SQLite database.
    pub db: DatabaseConnection,

    /// HTTP client for provider token and user info requests.
    ///
    /// Does not follow redirects.
    pub http_client: reqwest::Client,

    /// Configured login providers.
    pub auth_providers: Arc<AuthProviderRegistry>,

    /// Gateway used at checkout and for payment callbacks.
    pub payment: Arc<dyn PaymentProcessor>,

    /// Public base URL, used for provider redirects and gateway callbacks.
    pub app_url: String,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        auth_providers: AuthProviderRegistry,
        payment: Arc<dyn PaymentProcessor>,
        app_url: String,
    ) -> Self {
        Self {
            db,
            http_client,
            auth_providers: Arc::new(auth_providers),
            payment,
            app_url,
        }
    }
}
